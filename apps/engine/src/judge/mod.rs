/// Remote Execution Client — runs student code against the sandboxed judge.
///
/// Protocol per test case: submit source + stdin, receive an opaque token,
/// then poll at a fixed interval until the judge reports a terminal status or
/// the attempt cap is hit. Test cases run strictly sequentially — one
/// outstanding token at a time, so no correlation of concurrent submissions
/// is ever needed.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::errors::{EngineError, Result};
use crate::models::execution::{ExecutionResult, Language, SubmissionStatus};
use crate::models::question::TestCase;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);
const DEFAULT_MAX_ATTEMPTS: u32 = 10;
const CPU_TIME_LIMIT_SECS: f32 = 5.0;
const MEMORY_LIMIT_KB: u32 = 128_000;
const REQUEST_TIMEOUT_SECS: u64 = 30;

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

/// Body of a judge submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionRequest {
    pub source_code: String,
    pub language_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
    pub cpu_time_limit: f32,
    pub memory_limit: u32,
}

/// Opaque handle the judge returns on submission. Lives for one poll loop
/// and is discarded once a terminal status is observed.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionToken {
    pub token: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusField {
    pub id: u16,
}

/// Raw polled state of one submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionRecord {
    pub status: StatusField,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub compile_output: Option<String>,
    pub message: Option<String>,
    /// Wall time in seconds, reported as a decimal string.
    pub time: Option<String>,
    /// Peak memory in kilobytes.
    pub memory: Option<u64>,
}

impl SubmissionRecord {
    pub fn status(&self) -> SubmissionStatus {
        SubmissionStatus::from_code(self.status.id)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Transport seam
// ────────────────────────────────────────────────────────────────────────────

/// Seam over the judge's HTTP surface so tests can script status sequences
/// without a network.
#[async_trait]
pub trait JudgeApi: Send + Sync {
    async fn create_submission(&self, request: &SubmissionRequest) -> Result<SubmissionToken>;
    async fn get_submission(&self, token: &SubmissionToken) -> Result<SubmissionRecord>;
}

/// reqwest-backed `JudgeApi` implementation.
pub struct HttpJudgeApi {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpJudgeApi {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            api_key,
        }
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("X-RapidAPI-Key", key),
            None => request,
        }
    }
}

#[async_trait]
impl JudgeApi for HttpJudgeApi {
    async fn create_submission(&self, request: &SubmissionRequest) -> Result<SubmissionToken> {
        let url = format!(
            "{}/submissions?base64_encoded=false&wait=false",
            self.base_url.trim_end_matches('/')
        );

        let response = self
            .authorized(self.client.post(&url))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Judge rejected submission with {status}: {body}");
            return Err(EngineError::SubmissionFailed {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    async fn get_submission(&self, token: &SubmissionToken) -> Result<SubmissionRecord> {
        let url = format!(
            "{}/submissions/{}?base64_encoded=false",
            self.base_url.trim_end_matches('/'),
            token.token
        );

        let response = self.authorized(self.client.get(&url)).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::SubmissionFailed {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The polling client over a `JudgeApi` transport.
pub struct JudgeClient {
    api: Arc<dyn JudgeApi>,
    poll_interval: Duration,
    max_attempts: u32,
}

impl JudgeClient {
    pub fn new(api: Arc<dyn JudgeApi>, poll_interval: Duration, max_attempts: u32) -> Self {
        Self {
            api,
            poll_interval,
            max_attempts,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(HttpJudgeApi::new(
                config.judge_api_url.clone(),
                config.judge_api_key.clone(),
            )),
            Duration::from_millis(config.poll_interval_ms),
            config.max_poll_attempts,
        )
    }

    /// Defaults: 1000ms between polls, at most 10 polls per submission.
    pub fn with_defaults(api: Arc<dyn JudgeApi>) -> Self {
        Self::new(api, DEFAULT_POLL_INTERVAL, DEFAULT_MAX_ATTEMPTS)
    }

    /// Runs `source_code` against every test case, strictly sequentially.
    ///
    /// A submission failure propagates immediately — the code could not be
    /// submitted at all and the caller must surface that. A poll-cap timeout
    /// is scoped to its single test case: it is recorded as an error result
    /// and evaluation of the remaining cases continues.
    pub async fn execute(
        &self,
        source_code: &str,
        language: Language,
        test_cases: &[TestCase],
    ) -> Result<Vec<ExecutionResult>> {
        info!(
            "Executing submission against {} test case(s), language id {}",
            test_cases.len(),
            language.judge_id()
        );

        let mut results = Vec::with_capacity(test_cases.len());

        for (index, case) in test_cases.iter().enumerate() {
            let token = self
                .api
                .create_submission(&SubmissionRequest {
                    source_code: source_code.to_string(),
                    language_id: language.judge_id(),
                    stdin: Some(case.input.clone()),
                    expected_output: Some(case.expected_output.clone()),
                    cpu_time_limit: CPU_TIME_LIMIT_SECS,
                    memory_limit: MEMORY_LIMIT_KB,
                })
                .await?;

            match self.wait_for_terminal(&token).await {
                Ok(record) => results.push(map_result(&record)),
                Err(EngineError::ExecutionTimeout { attempts }) => {
                    warn!("Test case {index} still pending after {attempts} polls");
                    results.push(timeout_result(attempts));
                }
                Err(e) => return Err(e),
            }
        }

        Ok(results)
    }

    /// Submits with no stdin or expected output and classifies the outcome
    /// as syntactically valid or not.
    ///
    /// A run that compiles but prints the wrong thing still counts as valid:
    /// `Accepted`, or `WrongAnswer` with no compiler output.
    pub async fn validate_syntax(&self, source_code: &str, language: Language) -> Result<bool> {
        let token = self
            .api
            .create_submission(&SubmissionRequest {
                source_code: source_code.to_string(),
                language_id: language.judge_id(),
                stdin: None,
                expected_output: None,
                cpu_time_limit: CPU_TIME_LIMIT_SECS,
                memory_limit: MEMORY_LIMIT_KB,
            })
            .await?;

        let record = self.wait_for_terminal(&token).await?;
        let clean_compile = non_empty(record.compile_output.as_deref()).is_none();

        Ok(match record.status() {
            SubmissionStatus::Accepted => true,
            SubmissionStatus::WrongAnswer => clean_compile,
            _ => false,
        })
    }

    /// Polls until the submission leaves the pending states.
    ///
    /// At most `max_attempts` fetches are made, with a fixed sleep between
    /// consecutive fetches. Exceeding the cap yields `ExecutionTimeout`
    /// without an extra fetch.
    async fn wait_for_terminal(&self, token: &SubmissionToken) -> Result<SubmissionRecord> {
        for attempt in 1..=self.max_attempts {
            let record = self.api.get_submission(token).await?;
            let status = record.status();
            debug!("Poll {attempt}/{}: {status:?}", self.max_attempts);

            if status.is_terminal() {
                return Ok(record);
            }
            if attempt < self.max_attempts {
                tokio::time::sleep(self.poll_interval).await;
            }
        }

        Err(EngineError::ExecutionTimeout {
            attempts: self.max_attempts,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Result mapping
// ────────────────────────────────────────────────────────────────────────────

/// Maps a terminal submission record to the normalized result.
///
/// Output precedence is fixed: stdout, then stderr, then compile_output —
/// empty strings count as absent. `error` is populated only for failed runs,
/// from stderr, then the judge's message, then compile_output.
fn map_result(record: &SubmissionRecord) -> ExecutionResult {
    let status = record.status();
    let passed = status == SubmissionStatus::Accepted;

    let output = non_empty(record.stdout.as_deref())
        .or_else(|| non_empty(record.stderr.as_deref()))
        .or_else(|| non_empty(record.compile_output.as_deref()))
        .map(str::to_string);

    let error = if passed {
        None
    } else {
        non_empty(record.stderr.as_deref())
            .or_else(|| non_empty(record.message.as_deref()))
            .or_else(|| non_empty(record.compile_output.as_deref()))
            .map(str::to_string)
    };

    ExecutionResult {
        status,
        passed,
        output,
        error,
        time: record.time.as_deref().and_then(|t| t.parse().ok()),
        memory: record.memory,
    }
}

fn timeout_result(attempts: u32) -> ExecutionResult {
    ExecutionResult {
        status: SubmissionStatus::Processing,
        passed: false,
        output: None,
        error: Some(format!("Execution still pending after {attempts} polls")),
        time: None,
        memory: None,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
