//! Career insights — role suggestions and gap analysis with a static
//! interest-keyed fallback.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::Result;
use crate::insights::prompts::build_career_prompt;
use crate::llm_client::{parse_json_from_response, GenerationConfig, TextGenerator};
use crate::models::profile::StudentProfile;
use crate::waterfall::with_fallback;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleSuggestion {
    pub title: String,
    pub match_reason: String,
}

/// Career readiness analysis for one student. Fallback output uses the same
/// fields, populated from the static tables below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerInsights {
    pub suggested_roles: Vec<RoleSuggestion>,
    pub skill_gaps: Vec<String>,
    pub action_items: Vec<String>,
}

/// Produces career insights for the student, degrading to the static
/// analysis. Never fails.
pub async fn career_insights(llm: &dyn TextGenerator, profile: &StudentProfile) -> CareerInsights {
    info!(
        "Generating career insights for student '{}'",
        profile.student_id
    );
    let prompt = build_career_prompt(profile);
    with_fallback(
        "career insight generation",
        ai_insights(llm, prompt),
        || fallback_insights(profile),
    )
    .await
}

async fn ai_insights(llm: &dyn TextGenerator, prompt: String) -> Result<CareerInsights> {
    let raw = llm.generate(&prompt, &GenerationConfig::default()).await?;
    parse_json_from_response(&raw)
}

/// Static analysis keyed on the student's first interest, with a general
/// software track as the default bucket.
pub fn fallback_insights(profile: &StudentProfile) -> CareerInsights {
    let interest = profile
        .interests
        .first()
        .map(|i| i.to_lowercase())
        .unwrap_or_default();

    let (roles, gaps): (&[(&str, &str)], &[&str]) = if interest.contains("data") {
        (
            &[
                ("Data Analyst", "Matches the stated interest in data work."),
                ("Junior Data Engineer", "A build-focused path into the data field."),
            ],
            &["SQL", "statistics", "data visualization"],
        )
    } else if interest.contains("web") || interest.contains("design") {
        (
            &[
                ("Frontend Developer", "Matches the stated interest in the web."),
                ("Full-Stack Developer", "Broadens the web interest across the stack."),
            ],
            &["JavaScript", "HTTP fundamentals", "accessibility"],
        )
    } else {
        (
            &[
                ("Software Developer", "A broad entry role for general technical profiles."),
                ("QA Engineer", "A practical route into engineering teams."),
            ],
            &["data structures", "version control", "testing"],
        )
    };

    // Only gaps the profile does not already cover.
    let skill_gaps: Vec<String> = gaps
        .iter()
        .filter(|gap| {
            !profile
                .skills
                .iter()
                .any(|s| s.to_lowercase() == gap.to_lowercase())
        })
        .map(|gap| gap.to_string())
        .collect();

    CareerInsights {
        suggested_roles: roles
            .iter()
            .map(|(title, reason)| RoleSuggestion {
                title: title.to_string(),
                match_reason: reason.to_string(),
            })
            .collect(),
        skill_gaps,
        action_items: vec![
            "Take a skills assessment in your strongest area.".to_string(),
            "Close the top listed skill gap with a focused course.".to_string(),
            "Build one portfolio project that uses the new skill.".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CannedGenerator, FailingGenerator};

    #[tokio::test]
    async fn degrades_to_static_analysis() {
        let llm = FailingGenerator::default();
        let profile = StudentProfile {
            student_id: "s1".to_string(),
            interests: vec!["data science".to_string()],
            ..Default::default()
        };
        let insights = career_insights(&llm, &profile).await;
        assert!(!insights.suggested_roles.is_empty());
        assert!(insights.skill_gaps.contains(&"SQL".to_string()));
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn held_skills_are_not_reported_as_gaps() {
        let profile = StudentProfile {
            student_id: "s2".to_string(),
            skills: vec!["SQL".to_string()],
            interests: vec!["data".to_string()],
            ..Default::default()
        };
        let insights = fallback_insights(&profile);
        assert!(!insights.skill_gaps.contains(&"SQL".to_string()));
    }

    #[tokio::test]
    async fn ai_insights_parse_into_the_shared_shape() {
        let llm = CannedGenerator::new(
            r#"```json
{"suggested_roles": [{"title": "SRE", "match_reason": "ops interest"}],
 "skill_gaps": ["Kubernetes"], "action_items": ["Learn k8s"]}
```"#,
        );
        let insights = career_insights(&llm, &StudentProfile::default()).await;
        assert_eq!(insights.suggested_roles[0].title, "SRE");
        assert_eq!(insights.skill_gaps, vec!["Kubernetes".to_string()]);
    }
}
