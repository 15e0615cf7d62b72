//! Test generation — AI-first with static-fallback degradation.
//!
//! Flow: build prompt → one LLM call → parse + validate the JSON batch →
//! on ANY failure, substitute the static bank. The fallback is a pure table
//! lookup, so generation always terminates with a usable question list and
//! callers never see an error for a degraded (not failed) journey.

use anyhow::anyhow;
use tracing::info;
use uuid::Uuid;

use crate::assessment::fallback::{fallback_coding_questions, fallback_questions};
use crate::assessment::prompts::{
    build_coding_prompt, build_personalized_prompt, build_question_prompt,
};
use crate::errors::{EngineError, Result};
use crate::llm_client::{parse_json_from_response, GenerationConfig, TextGenerator};
use crate::models::profile::StudentProfile;
use crate::models::question::{CodingQuestion, Difficulty, Question};
use crate::waterfall::with_fallback;

#[derive(Debug, serde::Deserialize)]
struct QuestionBatch {
    questions: Vec<Question>,
}

#[derive(Debug, serde::Deserialize)]
struct CodingBatch {
    questions: Vec<CodingQuestion>,
}

/// Generates a multiple-choice test for a category/difficulty, preferring the
/// AI path and degrading to the static bank. Never fails, makes at most one
/// LLM call.
pub async fn generate_test(
    llm: &dyn TextGenerator,
    category: &str,
    difficulty: Difficulty,
    count: usize,
    topic: Option<&str>,
) -> Vec<Question> {
    info!("Generating {count} {difficulty} questions for category '{category}'");
    let prompt = build_question_prompt(category, difficulty, count, topic);
    with_fallback(
        "question generation",
        ai_questions(llm, prompt, category, difficulty, count),
        || fallback_questions(category, difficulty, count),
    )
    .await
}

/// Generates questions tailored to one student's profile and skill gaps.
/// Degrades to the default bank keyed by the student's first skill gap
/// domain, so the test flow still proceeds.
pub async fn generate_personalized_test(
    llm: &dyn TextGenerator,
    profile: &StudentProfile,
    skill_gaps: &[String],
    count: usize,
) -> Vec<Question> {
    info!(
        "Generating {count} personalized questions for student '{}'",
        profile.student_id
    );
    let prompt = build_personalized_prompt(profile, skill_gaps, count);
    let category = skill_gaps
        .first()
        .map(String::as_str)
        .unwrap_or(crate::assessment::fallback::DEFAULT_CATEGORY);
    with_fallback(
        "personalized question generation",
        ai_questions(llm, prompt, category, Difficulty::Medium, count),
        || fallback_questions(category, Difficulty::Medium, count),
    )
    .await
}

/// Generates coding exercises, degrading to the static coding bank.
pub async fn generate_coding_test(
    llm: &dyn TextGenerator,
    topic: &str,
    difficulty: Difficulty,
    count: usize,
) -> Vec<CodingQuestion> {
    info!("Generating {count} coding exercises on '{topic}'");
    let prompt = build_coding_prompt(topic, difficulty, count);
    with_fallback(
        "coding question generation",
        ai_coding_questions(llm, prompt, topic, difficulty),
        || fallback_coding_questions(topic, difficulty, count),
    )
    .await
}

/// The AI path for multiple-choice generation: one call, strict parsing,
/// whole-batch rejection if any question breaks the structural invariants.
async fn ai_questions(
    llm: &dyn TextGenerator,
    prompt: String,
    category: &str,
    difficulty: Difficulty,
    count: usize,
) -> Result<Vec<Question>> {
    let raw = llm.generate(&prompt, &GenerationConfig::default()).await?;
    let batch: QuestionBatch = parse_json_from_response(&raw)?;

    if batch.questions.is_empty() {
        return Err(EngineError::EmptyResponse);
    }

    let mut questions = batch.questions;
    questions.truncate(count);

    for q in &mut questions {
        q.id = Uuid::new_v4().to_string();
        q.category = category.to_string();
        q.difficulty = difficulty;
        if !q.validate() {
            return Err(EngineError::Internal(anyhow!(
                "generated question failed validation: {:?}",
                q.text
            )));
        }
    }

    Ok(questions)
}

async fn ai_coding_questions(
    llm: &dyn TextGenerator,
    prompt: String,
    topic: &str,
    difficulty: Difficulty,
) -> Result<Vec<CodingQuestion>> {
    let raw = llm.generate(&prompt, &GenerationConfig::default()).await?;
    let batch: CodingBatch = parse_json_from_response(&raw)?;

    if batch.questions.is_empty() {
        return Err(EngineError::EmptyResponse);
    }

    let mut questions = batch.questions;
    for q in &mut questions {
        q.id = Uuid::new_v4().to_string();
        q.topic = topic.to_string();
        q.difficulty = difficulty;
        if q.test_cases.is_empty() {
            return Err(EngineError::Internal(anyhow!(
                "generated coding question '{}' has no test cases",
                q.title
            )));
        }
    }

    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CannedGenerator, FailingGenerator};

    #[tokio::test]
    async fn failing_llm_degrades_to_exact_bank_output() {
        let llm = FailingGenerator::default();
        let generated = generate_test(&llm, "aptitude", Difficulty::Easy, 3, None).await;
        let expected = fallback_questions("aptitude", Difficulty::Easy, 3);
        assert_eq!(
            serde_json::to_value(&generated).unwrap(),
            serde_json::to_value(&expected).unwrap()
        );
        assert_eq!(llm.calls(), 1, "waterfall must not retry the LLM");
    }

    #[tokio::test]
    async fn valid_ai_batch_is_used_and_stamped() {
        let llm = CannedGenerator::new(
            r#"```json
{"questions": [
  {"text": "Pick b", "options": ["a","b","c","d"], "correct_option_index": 1,
   "explanation": "b is right", "topic": "demo"}
]}
```"#,
        );
        let questions = generate_test(&llm, "programming", Difficulty::Hard, 1, None).await;
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].category, "programming");
        assert_eq!(questions[0].difficulty, Difficulty::Hard);
        assert!(!questions[0].id.is_empty());
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn invalid_answer_index_rejects_the_whole_batch() {
        // correct_option_index out of range: the batch must be discarded and
        // the static bank substituted.
        let llm = CannedGenerator::new(
            r#"{"questions": [
  {"text": "Broken", "options": ["a","b"], "correct_option_index": 5,
   "explanation": "", "topic": "demo"}
]}"#,
        );
        let questions = generate_test(&llm, "programming", Difficulty::Easy, 2, None).await;
        let expected = fallback_questions("programming", Difficulty::Easy, 2);
        assert_eq!(questions.len(), expected.len());
        assert_eq!(questions[0].text, expected[0].text);
    }

    #[tokio::test]
    async fn prose_reply_degrades_to_bank() {
        let llm = CannedGenerator::new("Sorry, I cannot generate questions right now.");
        let questions = generate_test(&llm, "web-development", Difficulty::Medium, 2, None).await;
        assert_eq!(questions[0].id, "fallback-web-development-0");
    }

    #[tokio::test]
    async fn oversized_ai_batch_is_truncated_to_count() {
        let llm = CannedGenerator::new(
            r#"{"questions": [
  {"text": "One", "options": ["a","b","c","d"], "correct_option_index": 0, "explanation": "x", "topic": "t"},
  {"text": "Two", "options": ["a","b","c","d"], "correct_option_index": 1, "explanation": "x", "topic": "t"},
  {"text": "Three", "options": ["a","b","c","d"], "correct_option_index": 2, "explanation": "x", "topic": "t"}
]}"#,
        );
        let questions = generate_test(&llm, "programming", Difficulty::Easy, 2, None).await;
        assert_eq!(questions.len(), 2);
    }

    #[tokio::test]
    async fn coding_generation_degrades_to_coding_bank() {
        let llm = FailingGenerator::default();
        let questions = generate_coding_test(&llm, "strings", Difficulty::Medium, 2).await;
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].topic, "strings");
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn personalized_generation_never_fails() {
        let llm = FailingGenerator::default();
        let profile = StudentProfile {
            student_id: "s9".to_string(),
            ..Default::default()
        };
        let questions = generate_personalized_test(&llm, &profile, &[], 3).await;
        assert!(!questions.is_empty());
    }
}
