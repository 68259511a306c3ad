//! Gemini API client for text generation.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const API_KEY_HEADER: &str = "x-goog-api-key";

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-lite";

/// Why a generation call failed. Set by the backend adapter.
#[derive(Debug)]
pub enum BackendError {
    /// The service answered with an error (auth, quota, bad request, outage).
    Service(String),
    Timeout(String),
    /// Network or decoding failure.
    Unknown(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::Service(e) => write!(f, "API error: {e}"),
            BackendError::Timeout(e) => write!(f, "Timeout: {e}"),
            BackendError::Unknown(e) => write!(f, "Error: {e}"),
        }
    }
}

impl std::error::Error for BackendError {}

/// A hosted text generation endpoint.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate a reply from an instruction block and a question, sent as
    /// two separate input segments.
    async fn generate(&self, instruction: &str, question: &str) -> Result<String, BackendError>;
}

pub struct GeminiClient {
    api_key: String,
    base_url: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize, Debug)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Deserialize, Debug)]
struct ApiError {
    message: String,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
struct ResponsePart {
    text: Option<String>,
}

impl GeminiClient {
    /// Build a client. `timeout` of `None` waits on the backend indefinitely.
    pub fn new(api_key: String, model: String, timeout: Option<Duration>) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::Unknown(format!("failed to build HTTP client: {e}")))?;

        info!("🤖 Gemini client ready (model {model})");
        Ok(Self {
            api_key,
            base_url: GEMINI_API_BASE.to_string(),
            model,
            client,
        })
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// The key travels in a header so it never shows up in URLs or errors.
    fn url(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    async fn generate(&self, instruction: &str, question: &str) -> Result<String, BackendError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part { text: instruction.to_string() },
                    Part { text: question.to_string() },
                ],
            }],
        };

        let response = self
            .client
            .post(self.url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_transport_error)?;

        debug!("Gemini response status: {status}");

        if !status.is_success() {
            return Err(BackendError::Service(format!("{status}: {body}")));
        }

        parse_response(&body)
    }
}

fn classify_transport_error(e: reqwest::Error) -> BackendError {
    let e = e.without_url();
    if e.is_timeout() {
        BackendError::Timeout(e.to_string())
    } else {
        BackendError::Unknown(e.to_string())
    }
}

/// Concatenate the text parts of the first candidate.
///
/// A candidate without text (blocked or empty) yields an empty string so
/// the caller can substitute its fallback sentence.
fn parse_response(body: &str) -> Result<String, BackendError> {
    let parsed: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| BackendError::Unknown(format!("Failed to parse response: {e}")))?;

    if let Some(error) = parsed.error {
        return Err(BackendError::Service(error.message));
    }

    let text = parsed
        .candidates
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_joins_text_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Salom, "},{"text":"dunyo"}]}}]}"#;
        assert_eq!(parse_response(body).unwrap(), "Salom, dunyo");
    }

    #[test]
    fn test_parse_uses_first_candidate() {
        let body = r#"{"candidates":[
            {"content":{"parts":[{"text":"first"}]}},
            {"content":{"parts":[{"text":"second"}]}}
        ]}"#;
        assert_eq!(parse_response(body).unwrap(), "first");
    }

    #[test]
    fn test_parse_without_candidates_is_empty() {
        assert_eq!(parse_response(r#"{"candidates":[]}"#).unwrap(), "");
        assert_eq!(parse_response(r#"{}"#).unwrap(), "");
        assert_eq!(parse_response(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap(), "");
    }

    #[test]
    fn test_parse_error_object_is_service_error() {
        let body = r#"{"error":{"code":403,"message":"API key not valid"}}"#;
        let err = parse_response(body).unwrap_err();
        assert!(matches!(err, BackendError::Service(ref m) if m.contains("API key")));
    }

    #[test]
    fn test_parse_garbage_is_unknown() {
        assert!(matches!(parse_response("<html>"), Err(BackendError::Unknown(_))));
    }

    #[test]
    fn test_request_shape() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: "rules".into() }, Part { text: "question".into() }],
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"contents": [{"parts": [{"text": "rules"}, {"text": "question"}]}]})
        );
    }

    #[test]
    fn test_url_contains_model_not_key() {
        let client = GeminiClient::new("key123".into(), DEFAULT_MODEL.into(), None).unwrap();
        assert_eq!(
            client.url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash-lite:generateContent"
        );
    }

    #[tokio::test]
    async fn test_transport_error_does_not_leak_key() {
        // Nothing listens on port 1
        let client = GeminiClient::new("SECRETKEY123".into(), DEFAULT_MODEL.into(), Some(Duration::from_secs(5)))
            .unwrap()
            .with_base_url("http://127.0.0.1:1");

        let err = client.generate("rules", "question").await.unwrap_err();
        assert!(matches!(err, BackendError::Unknown(_) | BackendError::Timeout(_)), "got {err:?}");
        assert!(!err.to_string().contains("SECRETKEY123"), "key leaked: {err}");
    }

    #[tokio::test]
    async fn test_timeout_error_does_not_leak_key() {
        let client = GeminiClient::new("SECRETKEY123".into(), DEFAULT_MODEL.into(), Some(Duration::from_nanos(1)))
            .unwrap()
            .with_base_url("http://127.0.0.1:1");

        let err = client.generate("rules", "question").await.unwrap_err();
        assert!(!err.to_string().contains("SECRETKEY123"), "key leaked: {err}");
    }
}
