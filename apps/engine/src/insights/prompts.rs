//! Prompt builders for course recommendations and career insights.
//! Pure and deterministic, like the assessment builders.

use crate::llm_client::prompts::{compose, JSON_ONLY_INSTRUCTION};
use crate::models::profile::StudentProfile;

/// Course recommendation template.
/// Replace: `{count}`, `{skills}`, `{interests}`, `{goals}`.
const COURSES_PROMPT_TEMPLATE: &str = r#"Recommend exactly {count} online courses for this student.

STUDENT:
- Current skills: {skills}
- Interests: {interests}
- Career goals: {goals}

Return a JSON object with this EXACT schema (no extra fields):
{
  "courses": [
    {
      "title": "Course name",
      "provider": "Platform or institution",
      "skill": "primary skill taught",
      "level": "beginner | intermediate | advanced",
      "reason": "One sentence tying the course to this student's goals."
    }
  ]
}

Rules:
- Recommend real, well-known courses only.
- Order from most to least relevant for the stated goals."#;

/// Career insight template.
/// Replace: `{skills}`, `{interests}`, `{goals}`, `{completed}`.
const CAREER_PROMPT_TEMPLATE: &str = r#"Analyze this student's readiness for their career goals.

STUDENT:
- Current skills: {skills}
- Interests: {interests}
- Career goals: {goals}
- Completed topics: {completed}

Return a JSON object with this EXACT schema (no extra fields):
{
  "suggested_roles": [
    {"title": "Role name", "match_reason": "Why this role fits the profile."}
  ],
  "skill_gaps": ["skill the goals require but the profile lacks"],
  "action_items": ["concrete next action, ordered by priority"]
}

Rules:
- Suggest 2 to 4 roles.
- Every skill gap must trace to a stated goal; do NOT invent requirements."#;

pub fn build_courses_prompt(profile: &StudentProfile, count: usize) -> String {
    let body = COURSES_PROMPT_TEMPLATE
        .replace("{count}", &count.to_string())
        .replace("{skills}", &join_or_none(&profile.skills))
        .replace("{interests}", &join_or_none(&profile.interests))
        .replace("{goals}", &join_or_none(&profile.career_goals));
    compose(&[JSON_ONLY_INSTRUCTION, &body])
}

pub fn build_career_prompt(profile: &StudentProfile) -> String {
    let body = CAREER_PROMPT_TEMPLATE
        .replace("{skills}", &join_or_none(&profile.skills))
        .replace("{interests}", &join_or_none(&profile.interests))
        .replace("{goals}", &join_or_none(&profile.career_goals))
        .replace("{completed}", &join_or_none(&profile.completed_topics));
    compose(&[JSON_ONLY_INSTRUCTION, &body])
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none listed".to_string()
    } else {
        items.join(", ")
    }
}
