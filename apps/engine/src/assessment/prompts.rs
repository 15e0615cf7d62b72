//! Prompt builders for the assessment pipeline.
//!
//! Every builder is a pure function of its inputs and returns byte-identical
//! text for identical inputs. Each template embeds the exact JSON schema the
//! response parser expects — the builder and `parse_json_from_response`
//! callers must agree on shape, and the schema text here is that agreement.

use crate::llm_client::prompts::{compose, JSON_ONLY_INSTRUCTION, TOPIC_SCOPE_INSTRUCTION};
use crate::models::profile::StudentProfile;
use crate::models::question::Difficulty;

/// Question generation template.
/// Replace: `{count}`, `{difficulty}`, `{category}`, `{topic_line}`.
const QUESTION_PROMPT_TEMPLATE: &str = r#"Generate exactly {count} multiple-choice questions for a career-readiness test.

Category: {category}
Difficulty: {difficulty}{topic_line}

Return a JSON object with this EXACT schema (no extra fields):
{
  "questions": [
    {
      "text": "What is the output of ...?",
      "options": ["first", "second", "third", "fourth"],
      "correct_option_index": 2,
      "explanation": "Why the third option is correct.",
      "topic": "short topic label",
      "time_limit_seconds": 60,
      "points": 10
    }
  ]
}

Rules:
- Each question has exactly 4 options.
- correct_option_index is the 0-based position of the correct option. VARY it across questions; do NOT always use 0.
- Avoid "All of the above" or "None of the above" options.
- Questions must be practical and test real understanding, not trivia."#;

/// Personalized generation template.
/// Replace: `{count}`, `{skills}`, `{interests}`, `{goals}`, `{gaps}`, `{completed}`.
const PERSONALIZED_PROMPT_TEMPLATE: &str = r#"Generate exactly {count} multiple-choice questions tailored to one student.

STUDENT PROFILE:
- Skills: {skills}
- Interests: {interests}
- Career goals: {goals}
- Already completed topics: {completed}

SKILL GAPS to target (weight questions toward these): {gaps}

Return a JSON object with this EXACT schema (no extra fields):
{
  "questions": [
    {
      "text": "...",
      "options": ["first", "second", "third", "fourth"],
      "correct_option_index": 1,
      "explanation": "...",
      "topic": "short topic label",
      "time_limit_seconds": 60,
      "points": 10
    }
  ]
}

Rules:
- Each question has exactly 4 options; VARY correct_option_index.
- Prefer the skill gaps over already-mastered skills.
- Do NOT repeat material from completed topics."#;

/// Coding-question generation template.
/// Replace: `{count}`, `{difficulty}`, `{topic}`.
const CODING_PROMPT_TEMPLATE: &str = r#"Generate exactly {count} coding exercises on "{topic}" at {difficulty} difficulty.

Return a JSON object with this EXACT schema (no extra fields):
{
  "questions": [
    {
      "title": "Sum of Two Numbers",
      "description": "Read two integers from stdin and print their sum.",
      "function_signature": "fn solve(a: i64, b: i64) -> i64",
      "test_cases": [
        {"input": "2 3", "expected_output": "5"}
      ],
      "constraints": ["1 <= a, b <= 10^9"],
      "topic": "{topic}",
      "time_limit_seconds": 900
    }
  ]
}

Rules:
- Every exercise reads from stdin and writes to stdout.
- Provide at least 3 test cases per exercise, covering edge cases.
- expected_output must be the exact stdout, no trailing commentary."#;

/// Answer evaluation template.
/// Replace: `{question}`, `{options}`, `{correct_index}`, `{selected_index}`.
const EVALUATION_PROMPT_TEMPLATE: &str = r#"A student answered a multiple-choice question. Evaluate the answer.

QUESTION: {question}
OPTIONS (0-based): {options}
CORRECT OPTION INDEX: {correct_index}
STUDENT'S SELECTED INDEX: {selected_index}

Return a JSON object with this EXACT schema (no extra fields):
{
  "is_correct": true,
  "score": 10,
  "feedback": "One or two sentences on the student's answer.",
  "suggestions": "Concrete advice on what to practice next.",
  "concept_explanation": "A short explanation of the underlying concept."
}

Rules:
- score is an integer from 0 to 10: 10 for a correct answer, 0-3 for an incorrect one depending on how close the chosen option was.
- is_correct must match the indices exactly."#;

/// Test report template. Replace: `{summary_json}`.
const REPORT_PROMPT_TEMPLATE: &str = r#"A student finished a career-readiness test. Produce a performance report.

TEST SUMMARY:
{summary_json}

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 80,
  "strengths": ["topic the student mastered"],
  "weaknesses": ["topic needing work"],
  "recommendations": ["specific study recommendation"],
  "next_steps": ["ordered next action"],
  "resources": ["named course, book, or site"],
  "detailed_analysis": "One paragraph of analysis in plain prose."
}

Rules:
- score is the percentage of correct answers, 0 to 100.
- Base every claim on the summary; do NOT invent topics the student was not tested on."#;

// ────────────────────────────────────────────────────────────────────────────
// Builders
// ────────────────────────────────────────────────────────────────────────────

pub fn build_question_prompt(
    category: &str,
    difficulty: Difficulty,
    count: usize,
    topic: Option<&str>,
) -> String {
    let topic_line = match topic {
        Some(t) => format!("\nTopic focus: {t}"),
        None => String::new(),
    };
    let body = QUESTION_PROMPT_TEMPLATE
        .replace("{count}", &count.to_string())
        .replace("{category}", category)
        .replace("{difficulty}", &difficulty.to_string())
        .replace("{topic_line}", &topic_line);
    compose(&[JSON_ONLY_INSTRUCTION, TOPIC_SCOPE_INSTRUCTION, &body])
}

pub fn build_personalized_prompt(
    profile: &StudentProfile,
    skill_gaps: &[String],
    count: usize,
) -> String {
    let body = PERSONALIZED_PROMPT_TEMPLATE
        .replace("{count}", &count.to_string())
        .replace("{skills}", &join_or_none(&profile.skills))
        .replace("{interests}", &join_or_none(&profile.interests))
        .replace("{goals}", &join_or_none(&profile.career_goals))
        .replace("{completed}", &join_or_none(&profile.completed_topics))
        .replace("{gaps}", &join_or_none(skill_gaps));
    compose(&[JSON_ONLY_INSTRUCTION, &body])
}

pub fn build_coding_prompt(topic: &str, difficulty: Difficulty, count: usize) -> String {
    let body = CODING_PROMPT_TEMPLATE
        .replace("{count}", &count.to_string())
        .replace("{difficulty}", &difficulty.to_string())
        .replace("{topic}", topic);
    compose(&[JSON_ONLY_INSTRUCTION, &body])
}

pub fn build_evaluation_prompt(
    question_text: &str,
    options: &[String],
    correct_index: usize,
    selected_index: usize,
) -> String {
    let body = EVALUATION_PROMPT_TEMPLATE
        .replace("{question}", question_text)
        .replace("{options}", &format!("{options:?}"))
        .replace("{correct_index}", &correct_index.to_string())
        .replace("{selected_index}", &selected_index.to_string());
    compose(&[JSON_ONLY_INSTRUCTION, &body])
}

pub fn build_report_prompt(summary_json: &str) -> String {
    let body = REPORT_PROMPT_TEMPLATE.replace("{summary_json}", summary_json);
    compose(&[JSON_ONLY_INSTRUCTION, &body])
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none listed".to_string()
    } else {
        items.join(", ")
    }
}
