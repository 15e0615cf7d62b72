//! Question models — multiple-choice and coding questions.
//!
//! Questions are immutable once produced: the generation pipeline (AI path or
//! static bank) creates them, the test-taking layer consumes them read-only.

use serde::{Deserialize, Serialize};

/// Difficulty tier of a generated question or test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// A single multiple-choice question.
///
/// Invariant: `correct_option_index` addresses a real entry of `options`.
/// The generation pipeline rejects AI batches containing any question that
/// fails `validate()` and substitutes the static bank instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    pub correct_option_index: usize,
    pub explanation: String,
    #[serde(default = "default_time_limit")]
    pub time_limit_seconds: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default = "default_points")]
    pub points: u32,
}

fn default_time_limit() -> u32 {
    60
}

fn default_points() -> u32 {
    10
}

impl Question {
    /// Checks the structural invariants a question must satisfy before it is
    /// shown to a student.
    pub fn validate(&self) -> bool {
        !self.text.trim().is_empty()
            && !self.options.is_empty()
            && self.options.iter().all(|o| !o.trim().is_empty())
            && self.correct_option_index < self.options.len()
    }
}

/// One input/expected-output pair a coding submission is judged against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub input: String,
    pub expected_output: String,
}

/// A coding exercise run against the remote judge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodingQuestion {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub description: String,
    pub function_signature: String,
    pub test_cases: Vec<TestCase>,
    #[serde(default)]
    pub constraints: Vec<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub topic: String,
    #[serde(default = "default_coding_time_limit")]
    pub time_limit_seconds: u32,
}

fn default_coding_time_limit() -> u32 {
    900
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_question() -> Question {
        Question {
            id: "q1".to_string(),
            text: "What does `Vec::pop` return for an empty vector?".to_string(),
            options: vec![
                "None".to_string(),
                "Some(0)".to_string(),
                "It panics".to_string(),
                "An empty Vec".to_string(),
            ],
            correct_option_index: 0,
            explanation: "`pop` returns Option<T>; an empty vector yields None.".to_string(),
            time_limit_seconds: 60,
            difficulty: Difficulty::Easy,
            category: "programming".to_string(),
            topic: "collections".to_string(),
            points: 10,
        }
    }

    #[test]
    fn valid_question_passes_validation() {
        assert!(sample_question().validate());
    }

    #[test]
    fn out_of_range_answer_index_fails_validation() {
        let mut q = sample_question();
        q.correct_option_index = 4;
        assert!(!q.validate());
    }

    #[test]
    fn blank_option_fails_validation() {
        let mut q = sample_question();
        q.options[2] = "  ".to_string();
        assert!(!q.validate());
    }

    #[test]
    fn difficulty_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Difficulty::Medium).unwrap(),
            "\"medium\""
        );
        let parsed: Difficulty = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(parsed, Difficulty::Hard);
    }
}
