//! Career-readiness content engine.
//!
//! The orchestration core behind a student-facing career platform: AI test
//! generation with a static fallback bank, answer evaluation, post-test
//! reports, remote code execution against a sandboxed judge, and learning /
//! career insights. UI, persistence, and authentication are external
//! collaborators — this crate only models content, results, and the two
//! external protocols (generative-text API, code-execution judge).
//!
//! Degradation policy, everywhere: try the AI path once, then substitute a
//! static result. AI unavailability is a degraded journey, never a broken one.

pub mod assessment;
pub mod config;
pub mod errors;
pub mod insights;
pub mod judge;
pub mod llm_client;
pub mod models;
pub mod waterfall;

#[cfg(test)]
pub(crate) mod testing;

pub use config::Config;
pub use errors::{EngineError, Result};
pub use judge::JudgeClient;
pub use llm_client::{GeminiClient, GenerationConfig, TextGenerator};
