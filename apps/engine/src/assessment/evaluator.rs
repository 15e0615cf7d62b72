//! Answer evaluation — AI grading with a deterministic local comparator as
//! the degraded path. Both producers return the same `EvaluationResult`
//! shape, so the test-taking layer never branches on which one ran.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assessment::prompts::build_evaluation_prompt;
use crate::errors::Result;
use crate::llm_client::{parse_json_from_response, GenerationConfig, TextGenerator};
use crate::models::question::Question;
use crate::waterfall::with_fallback;

const MAX_SCORE: u8 = 10;

/// Per-answer evaluation, from either the AI grader or the local comparator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub is_correct: bool,
    /// 0 to 10.
    pub score: u8,
    pub feedback: String,
    pub suggestions: String,
    pub concept_explanation: String,
}

/// Evaluates one answered multiple-choice question.
///
/// The AI result is trusted for prose but not for facts: `is_correct` and a
/// floor on `score` are recomputed from the indices so a confused model
/// cannot flip a grade.
pub async fn evaluate_answer(
    llm: &dyn TextGenerator,
    question: &Question,
    selected_index: usize,
) -> EvaluationResult {
    let prompt = build_evaluation_prompt(
        &question.text,
        &question.options,
        question.correct_option_index,
        selected_index,
    );
    with_fallback(
        "answer evaluation",
        ai_evaluation(llm, prompt, question, selected_index),
        || local_evaluation(question, selected_index),
    )
    .await
}

async fn ai_evaluation(
    llm: &dyn TextGenerator,
    prompt: String,
    question: &Question,
    selected_index: usize,
) -> Result<EvaluationResult> {
    let raw = llm.generate(&prompt, &GenerationConfig::default()).await?;
    let mut result: EvaluationResult = parse_json_from_response(&raw)?;

    let actually_correct = selected_index == question.correct_option_index;
    if result.is_correct != actually_correct {
        debug!("AI grader disagreed with the answer key; overriding");
        result.is_correct = actually_correct;
        result.score = if actually_correct { MAX_SCORE } else { 0 };
    }
    result.score = result.score.min(MAX_SCORE);

    Ok(result)
}

/// Deterministic comparator used when the AI grader is unavailable.
pub fn local_evaluation(question: &Question, selected_index: usize) -> EvaluationResult {
    let is_correct = selected_index == question.correct_option_index;
    let correct_option = question
        .options
        .get(question.correct_option_index)
        .map(String::as_str)
        .unwrap_or_default();

    EvaluationResult {
        is_correct,
        score: if is_correct { MAX_SCORE } else { 0 },
        feedback: if is_correct {
            "Correct.".to_string()
        } else {
            format!("Incorrect. The right answer is \"{correct_option}\".")
        },
        suggestions: format!("Review the topic \"{}\" and retry similar questions.", question.topic),
        concept_explanation: question.explanation.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::Difficulty;
    use crate::testing::{CannedGenerator, FailingGenerator};

    fn question() -> Question {
        Question {
            id: "q1".to_string(),
            text: "2 + 2 = ?".to_string(),
            options: vec!["3".to_string(), "4".to_string(), "5".to_string(), "22".to_string()],
            correct_option_index: 1,
            explanation: "Basic addition.".to_string(),
            time_limit_seconds: 30,
            difficulty: Difficulty::Easy,
            category: "aptitude".to_string(),
            topic: "arithmetic".to_string(),
            points: 10,
        }
    }

    #[tokio::test]
    async fn local_comparator_grades_correct_answer() {
        let llm = FailingGenerator::default();
        let result = evaluate_answer(&llm, &question(), 1).await;
        assert!(result.is_correct);
        assert_eq!(result.score, 10);
        assert_eq!(result.concept_explanation, "Basic addition.");
    }

    #[tokio::test]
    async fn local_comparator_grades_wrong_answer() {
        let llm = FailingGenerator::default();
        let result = evaluate_answer(&llm, &question(), 0).await;
        assert!(!result.is_correct);
        assert_eq!(result.score, 0);
        assert!(result.feedback.contains('4'));
    }

    #[tokio::test]
    async fn ai_grader_result_is_used_when_consistent() {
        let llm = CannedGenerator::new(
            r#"{"is_correct": true, "score": 10, "feedback": "Nice.",
                "suggestions": "Try harder ones.", "concept_explanation": "Addition."}"#,
        );
        let result = evaluate_answer(&llm, &question(), 1).await;
        assert!(result.is_correct);
        assert_eq!(result.feedback, "Nice.");
    }

    #[tokio::test]
    async fn ai_grade_flip_is_overridden_by_the_answer_key() {
        // Model claims a wrong answer is correct; the indices win.
        let llm = CannedGenerator::new(
            r#"{"is_correct": true, "score": 10, "feedback": "Great!",
                "suggestions": "", "concept_explanation": ""}"#,
        );
        let result = evaluate_answer(&llm, &question(), 3).await;
        assert!(!result.is_correct);
        assert_eq!(result.score, 0);
    }

    #[tokio::test]
    async fn out_of_range_ai_score_is_clamped() {
        let llm = CannedGenerator::new(
            r#"{"is_correct": true, "score": 99, "feedback": "",
                "suggestions": "", "concept_explanation": ""}"#,
        );
        let result = evaluate_answer(&llm, &question(), 1).await;
        assert_eq!(result.score, 10);
    }
}
