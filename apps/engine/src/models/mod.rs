// Shared domain types consumed across the engine.
// Types owned by a single pipeline (evaluation results, reports, insight
// shapes) live next to the service that produces them.

pub mod execution;
pub mod profile;
pub mod question;
