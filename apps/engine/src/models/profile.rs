//! Student profile — the personalization input for question generation and
//! learning insights.

use serde::{Deserialize, Serialize};

/// Snapshot of a student's skills, interests, and goals.
///
/// Owned by the excluded data-access layer; the engine only reads it when
/// building personalized prompts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentProfile {
    pub student_id: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub career_goals: Vec<String>,
    #[serde(default)]
    pub completed_topics: Vec<String>,
}
