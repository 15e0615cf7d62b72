#![allow(dead_code)]

// Cross-cutting prompt fragments shared by every service that calls the LLM.
// Each service defines its own prompts.rs with operation-specific templates;
// this file holds only the fragments they all reuse.

/// Instruction prepended to every prompt that expects a JSON reply. The
/// generation API has no separate system channel, so this rides at the top
/// of the prompt text itself.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction that keeps generated content inside the student's stated
/// scope instead of drifting to adjacent topics.
pub const TOPIC_SCOPE_INSTRUCTION: &str = "Stay strictly within the requested \
    category and topic. Do NOT introduce material from unrelated domains.";

/// Joins prompt fragments with blank lines, skipping empty pieces.
pub fn compose(fragments: &[&str]) -> String {
    fragments
        .iter()
        .filter(|f| !f.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("\n\n")
}
