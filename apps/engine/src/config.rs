use anyhow::{Context, Result};

/// Engine configuration loaded from environment variables.
///
/// Everything here is optional or defaulted: a missing LLM key does not stop
/// the engine, it only forces the static-fallback path at call time.
#[derive(Debug, Clone)]
pub struct Config {
    /// API key for the generative-text service. `None` means the AI path is
    /// unconfigured and every orchestration call degrades to its fallback.
    pub gemini_api_key: Option<String>,
    pub gemini_api_base: String,
    /// Base URL of the sandboxed code-execution service.
    pub judge_api_url: String,
    pub judge_api_key: Option<String>,
    /// Fixed delay between submission polls, in milliseconds.
    pub poll_interval_ms: u64,
    /// Hard cap on polls per submission before giving up on that test case.
    pub max_poll_attempts: u32,
    pub rust_log: String,
}

const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_JUDGE_API_URL: &str = "https://judge0-ce.p.rapidapi.com";
const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 10;

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_api_base: std::env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.to_string()),
            judge_api_url: std::env::var("JUDGE_API_URL")
                .unwrap_or_else(|_| DEFAULT_JUDGE_API_URL.to_string()),
            judge_api_key: optional_env("JUDGE_API_KEY"),
            poll_interval_ms: parsed_env("JUDGE_POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS)?,
            max_poll_attempts: parsed_env("JUDGE_MAX_POLL_ATTEMPTS", DEFAULT_MAX_POLL_ATTEMPTS)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an env var, treating empty strings as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' must be a number")),
        Err(_) => Ok(default),
    }
}
