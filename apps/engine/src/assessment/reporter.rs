//! Test report generation — AI-written analysis with a computed fallback.
//!
//! Both paths consume the same `TestSummary` aggregate and emit the same
//! `TestReport` shape. The fallback derives everything arithmetically from
//! the summary, so a finished test always gets a report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assessment::prompts::build_report_prompt;
use crate::errors::Result;
use crate::llm_client::{parse_json_from_response, GenerationConfig, TextGenerator};
use crate::models::question::Difficulty;
use crate::waterfall::with_fallback;

/// Per-topic tally inside a finished test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicResult {
    pub topic: String,
    pub total: u32,
    pub correct: u32,
}

/// Aggregate of one completed test, assembled by the test-taking layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSummary {
    pub category: String,
    pub difficulty: Difficulty,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub topic_results: Vec<TopicResult>,
}

/// The report shown to the student after a test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestReport {
    /// Percentage of correct answers, 0 to 100.
    pub score: u32,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
    pub next_steps: Vec<String>,
    pub resources: Vec<String>,
    pub detailed_analysis: String,
    #[serde(default = "Utc::now")]
    pub generated_at: DateTime<Utc>,
}

/// Produces the post-test report, preferring AI analysis and degrading to a
/// computed report. Never fails.
pub async fn generate_report(llm: &dyn TextGenerator, summary: &TestSummary) -> TestReport {
    let summary_json =
        serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string());
    let prompt = build_report_prompt(&summary_json);
    with_fallback(
        "report generation",
        ai_report(llm, prompt, summary),
        || basic_report(summary),
    )
    .await
}

async fn ai_report(
    llm: &dyn TextGenerator,
    prompt: String,
    summary: &TestSummary,
) -> Result<TestReport> {
    let raw = llm.generate(&prompt, &GenerationConfig::default()).await?;
    let mut report: TestReport = parse_json_from_response(&raw)?;
    // The percentage is arithmetic, not opinion; the summary wins.
    report.score = percentage(summary.correct_answers, summary.total_questions);
    Ok(report)
}

/// Arithmetic fallback report computed straight from the summary.
pub fn basic_report(summary: &TestSummary) -> TestReport {
    let score = percentage(summary.correct_answers, summary.total_questions);

    let strengths: Vec<String> = summary
        .topic_results
        .iter()
        .filter(|t| t.total > 0 && t.correct == t.total)
        .map(|t| t.topic.clone())
        .collect();

    let weaknesses: Vec<String> = summary
        .topic_results
        .iter()
        .filter(|t| t.correct < t.total)
        .map(|t| t.topic.clone())
        .collect();

    let recommendations = if weaknesses.is_empty() {
        vec![format!(
            "Move up to a harder {} test to keep progressing.",
            summary.category
        )]
    } else {
        weaknesses
            .iter()
            .map(|topic| format!("Revise \"{topic}\" and retake a short practice set."))
            .collect()
    };

    TestReport {
        score,
        strengths,
        weaknesses,
        recommendations,
        next_steps: vec![
            "Review every question you missed, including the explanations.".to_string(),
            "Schedule a follow-up practice test within the next week.".to_string(),
        ],
        resources: vec![
            "freeCodeCamp — guided tracks for the tested topics".to_string(),
            "Khan Academy — fundamentals refreshers".to_string(),
        ],
        detailed_analysis: format!(
            "You answered {} of {} questions correctly ({score}%) on the {} {} test.",
            summary.correct_answers, summary.total_questions, summary.difficulty, summary.category
        ),
        generated_at: Utc::now(),
    }
}

fn percentage(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (correct * 100 + total / 2) / total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CannedGenerator, FailingGenerator};

    fn summary() -> TestSummary {
        TestSummary {
            category: "programming".to_string(),
            difficulty: Difficulty::Medium,
            total_questions: 10,
            correct_answers: 7,
            topic_results: vec![
                TopicResult {
                    topic: "algorithms".to_string(),
                    total: 5,
                    correct: 5,
                },
                TopicResult {
                    topic: "recursion".to_string(),
                    total: 5,
                    correct: 2,
                },
            ],
        }
    }

    #[tokio::test]
    async fn fallback_report_is_computed_from_the_summary() {
        let llm = FailingGenerator::default();
        let report = generate_report(&llm, &summary()).await;
        assert_eq!(report.score, 70);
        assert_eq!(report.strengths, vec!["algorithms".to_string()]);
        assert_eq!(report.weaknesses, vec!["recursion".to_string()]);
        assert!(!report.recommendations.is_empty());
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn ai_report_keeps_prose_but_not_its_arithmetic() {
        let llm = CannedGenerator::new(
            r#"{"score": 12, "strengths": ["algorithms"], "weaknesses": ["recursion"],
                "recommendations": ["Practice recursion"], "next_steps": ["Retake"],
                "resources": ["A book"], "detailed_analysis": "Solid start."}"#,
        );
        let report = generate_report(&llm, &summary()).await;
        assert_eq!(report.score, 70, "score is recomputed from the summary");
        assert_eq!(report.detailed_analysis, "Solid start.");
    }

    #[test]
    fn empty_test_scores_zero() {
        let report = basic_report(&TestSummary {
            category: "aptitude".to_string(),
            difficulty: Difficulty::Easy,
            total_questions: 0,
            correct_answers: 0,
            topic_results: vec![],
        });
        assert_eq!(report.score, 0);
        assert!(report.weaknesses.is_empty());
    }

    #[test]
    fn perfect_test_recommends_harder_material() {
        let report = basic_report(&TestSummary {
            category: "aptitude".to_string(),
            difficulty: Difficulty::Easy,
            total_questions: 4,
            correct_answers: 4,
            topic_results: vec![TopicResult {
                topic: "sequences".to_string(),
                total: 4,
                correct: 4,
            }],
        });
        assert_eq!(report.score, 100);
        assert!(report.recommendations[0].contains("harder"));
    }
}
