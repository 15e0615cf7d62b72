/// LLM Gateway — the single point of entry for all generative-text API calls
/// in the engine.
///
/// ARCHITECTURAL RULE: no other module may call the text-generation API
/// directly. Services depend on the `TextGenerator` trait so tests can
/// substitute deterministic stubs.
///
/// This layer performs exactly one outbound call per invocation and never
/// retries: degradation policy (LLM-first, static-fallback) belongs to the
/// orchestration services, not the gateway.
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::{EngineError, Result};

pub mod prompts;

/// The model used for all generation calls.
pub const MODEL: &str = "gemini-1.5-flash";
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Sampling parameters forwarded verbatim to the generation API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_p: f32,
    pub top_k: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 4096,
            top_p: 0.95,
            top_k: 40,
        }
    }
}

/// Seam for the generative-text backend. Production uses `GeminiClient`;
/// tests plug in stubs that return canned text or fail on demand.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends one prompt and returns the raw response text.
    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: &'a GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    /// Extracts the text of the first candidate part, if any.
    fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .filter(|t| !t.is_empty())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini-backed client
// ────────────────────────────────────────────────────────────────────────────

/// HTTP client for the hosted generative-text API.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    api_base: String,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>, api_base: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            api_base,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.gemini_api_key.clone(), config.gemini_api_base.clone())
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or(EngineError::Unconfigured)?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            MODEL
        );

        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: config,
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if status.as_u16() == 429 {
            let body = response.text().await.unwrap_or_default();
            warn!("LLM quota exhausted: {body}");
            return Err(EngineError::QuotaExceeded { body });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("LLM API returned {status}: {body}");
            return Err(EngineError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        let text = parsed.text().ok_or(EngineError::EmptyResponse)?;

        debug!("LLM call succeeded: {} chars", text.len());

        Ok(text.to_string())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Response-payload parsing
// ────────────────────────────────────────────────────────────────────────────

/// Parses the JSON payload of an LLM reply into `T`.
///
/// Models asked for JSON-only output still wrap it in markdown fences often
/// enough that both forms must be accepted: a ```json fenced block anywhere
/// in the text is preferred, otherwise the whole trimmed text is the
/// candidate payload. A parse failure is a hard `MalformedResponse` — partial
/// data is never returned.
pub fn parse_json_from_response<T: DeserializeOwned>(text: &str) -> Result<T> {
    serde_json::from_str(extract_json_payload(text)).map_err(EngineError::MalformedResponse)
}

/// Locates the JSON payload inside raw model output.
fn extract_json_payload(text: &str) -> &str {
    let text = text.trim();
    if let Some(start) = text.find("```json") {
        let inner = &text[start + "```json".len()..];
        return match inner.find("```") {
            Some(end) => inner[..end].trim(),
            None => inner.trim(),
        };
    }
    if let Some(stripped) = text.strip_prefix("```") {
        return stripped
            .strip_suffix("```")
            .map(str::trim)
            .unwrap_or_else(|| stripped.trim());
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn parses_fenced_json() {
        let wrapped = "```json\n{\"key\": \"value\", \"n\": 3}\n```";
        let parsed: Value = parse_json_from_response(wrapped).unwrap();
        assert_eq!(parsed, json!({"key": "value", "n": 3}));
    }

    #[test]
    fn parses_bare_json_identically() {
        let raw = "{\"key\": \"value\", \"n\": 3}";
        let parsed: Value = parse_json_from_response(raw).unwrap();
        assert_eq!(parsed, json!({"key": "value", "n": 3}));
    }

    #[test]
    fn parses_fence_embedded_in_prose() {
        let chatty = "Here is the test you asked for:\n```json\n[1, 2, 3]\n```\nLet me know!";
        let parsed: Value = parse_json_from_response(chatty).unwrap();
        assert_eq!(parsed, json!([1, 2, 3]));
    }

    #[test]
    fn parses_untagged_fence() {
        let wrapped = "```\n{\"ok\": true}\n```";
        let parsed: Value = parse_json_from_response(wrapped).unwrap();
        assert_eq!(parsed, json!({"ok": true}));
    }

    #[test]
    fn round_trips_arbitrary_object() {
        let original = json!({
            "questions": [{"text": "q", "options": ["a", "b"], "correct_option_index": 1}],
            "nested": {"deep": [true, null, 2.5]}
        });
        let wrapped = format!("```json\n{original}\n```");
        let parsed: Value = parse_json_from_response(&wrapped).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn garbage_is_a_malformed_response() {
        let err = parse_json_from_response::<Value>("I'm sorry, I can't do that").unwrap_err();
        assert!(matches!(err, EngineError::MalformedResponse(_)));
    }

    #[test]
    fn unterminated_fence_still_parses() {
        let wrapped = "```json\n{\"key\": 1}";
        let parsed: Value = parse_json_from_response(wrapped).unwrap();
        assert_eq!(parsed, json!({"key": 1}));
    }
}
