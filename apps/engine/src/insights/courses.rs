//! Course recommendations — AI-curated with a static catalog fallback.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{EngineError, Result};
use crate::insights::prompts::build_courses_prompt;
use crate::llm_client::{parse_json_from_response, GenerationConfig, TextGenerator};
use crate::models::profile::StudentProfile;
use crate::waterfall::with_fallback;

/// One recommended course. The static catalog emits exactly this shape —
/// never fields the AI path would not produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRecommendation {
    pub title: String,
    pub provider: String,
    pub skill: String,
    pub level: String,
    pub reason: String,
}

#[derive(Debug, Deserialize)]
struct CourseBatch {
    courses: Vec<CourseRecommendation>,
}

struct CatalogEntry {
    title: &'static str,
    provider: &'static str,
    skill: &'static str,
    level: &'static str,
    reason: &'static str,
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        title: "CS50: Introduction to Computer Science",
        provider: "Harvard / edX",
        skill: "programming",
        level: "beginner",
        reason: "Builds the fundamentals every technical career path rests on.",
    },
    CatalogEntry {
        title: "The Odin Project",
        provider: "theodinproject.com",
        skill: "web development",
        level: "beginner",
        reason: "A full project-driven path from HTML basics to deployed applications.",
    },
    CatalogEntry {
        title: "SQL for Data Science",
        provider: "UC Davis / Coursera",
        skill: "sql",
        level: "beginner",
        reason: "Querying data is a baseline expectation in analytics roles.",
    },
    CatalogEntry {
        title: "Machine Learning Specialization",
        provider: "DeepLearning.AI / Coursera",
        skill: "machine learning",
        level: "intermediate",
        reason: "The standard entry point into applied machine learning.",
    },
    CatalogEntry {
        title: "Grokking Algorithms (book + exercises)",
        provider: "Manning",
        skill: "algorithms",
        level: "intermediate",
        reason: "Interview-relevant algorithm practice with approachable visuals.",
    },
];

/// Recommends up to `count` courses for the student, degrading to the static
/// catalog filtered by the student's stated skills. Never fails.
pub async fn recommend_courses(
    llm: &dyn TextGenerator,
    profile: &StudentProfile,
    count: usize,
) -> Vec<CourseRecommendation> {
    info!(
        "Recommending {count} courses for student '{}'",
        profile.student_id
    );
    let prompt = build_courses_prompt(profile, count);
    with_fallback(
        "course recommendation",
        ai_courses(llm, prompt, count),
        || fallback_courses(profile, count),
    )
    .await
}

async fn ai_courses(
    llm: &dyn TextGenerator,
    prompt: String,
    count: usize,
) -> Result<Vec<CourseRecommendation>> {
    let raw = llm.generate(&prompt, &GenerationConfig::default()).await?;
    let batch: CourseBatch = parse_json_from_response(&raw)?;
    if batch.courses.is_empty() {
        return Err(EngineError::EmptyResponse);
    }
    let mut courses = batch.courses;
    courses.truncate(count);
    Ok(courses)
}

/// Static catalog lookup: courses teaching a skill the student does not
/// already list come first, then the rest of the catalog in order.
pub fn fallback_courses(profile: &StudentProfile, count: usize) -> Vec<CourseRecommendation> {
    let has_skill = |skill: &str| {
        profile
            .skills
            .iter()
            .any(|s| s.to_lowercase().contains(skill) || skill.contains(&s.to_lowercase()))
    };

    let mut ordered: Vec<&CatalogEntry> = CATALOG.iter().filter(|c| !has_skill(c.skill)).collect();
    ordered.extend(CATALOG.iter().filter(|c| has_skill(c.skill)));

    ordered
        .into_iter()
        .take(count)
        .map(|c| CourseRecommendation {
            title: c.title.to_string(),
            provider: c.provider.to_string(),
            skill: c.skill.to_string(),
            level: c.level.to_string(),
            reason: c.reason.to_string(),
        })
        .collect()
}
