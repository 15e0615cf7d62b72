// Learning and career insight aggregators.
// Same degradation policy as the assessment pipeline: one AI attempt, then a
// static catalog. Fallback shapes are a strict subset of the AI schema so
// downstream consumers handle exactly one shape.

pub mod career;
pub mod courses;
pub mod prompts;
