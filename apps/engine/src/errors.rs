use thiserror::Error;

/// Engine-level error type shared by the LLM gateway, the orchestration
/// services, and the remote execution client.
///
/// Propagation policy: `QuotaExceeded`, `RequestFailed`, `MalformedResponse`,
/// `EmptyResponse`, and `Unconfigured` are caught inside the orchestration
/// services and converted into fallback results — the UI never sees them.
/// `SubmissionFailed` always propagates (code could not be submitted at all).
/// `ExecutionTimeout` is caught per test case and recorded as an error result
/// for that case only.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM quota exceeded (HTTP 429): {body}")]
    QuotaExceeded { body: String },

    #[error("LLM request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Malformed LLM response: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    #[error("LLM returned an empty response")]
    EmptyResponse,

    #[error("LLM API key not configured")]
    Unconfigured,

    #[error("Code submission failed with status {status}: {body}")]
    SubmissionFailed { status: u16, body: String },

    #[error("Execution still pending after {attempts} polls")]
    ExecutionTimeout { attempts: u32 },

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
