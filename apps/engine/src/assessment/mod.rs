// Assessment pipeline: prompt building, AI question generation with static
// fallback, answer evaluation, and report generation.
// All LLM calls go through llm_client — no direct API calls here.

pub mod evaluator;
pub mod fallback;
pub mod generator;
pub mod prompts;
pub mod reporter;
