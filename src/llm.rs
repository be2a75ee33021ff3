//! Completion client: the boundary to the hosted language model.
//!
//! `CompletionClient` takes an ordered list of text blocks and returns one
//! text completion. `GeminiClient` implements it over the Gemini
//! `generateContent` REST endpoint with a blocking HTTP client; callers on
//! an async runtime must invoke it from a blocking task.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

/// Errors from the completion service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Cannot reach the model service at {0}")]
    Connection(String),
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    #[error("Model service returned HTTP {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Unexpected response from the model service: {0}")]
    ResponseParsing(String),
    #[error("The request was blocked by the model service ({0})")]
    Blocked(String),
    #[error("HTTP client error: {0}")]
    Http(String),
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),
}

/// Text-completion capability (allows faking in tests).
pub trait CompletionClient: Send + Sync {
    /// Complete the conversation formed by `blocks`, oldest first.
    fn complete(&self, blocks: &[String]) -> Result<String, ServiceError>;
}

// ═══════════════════════════════════════════════════════════
// Gemini wire types
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

fn build_request(blocks: &[String]) -> GenerateRequest<'_> {
    GenerateRequest {
        contents: vec![RequestContent {
            role: "user",
            parts: blocks.iter().map(|b| RequestPart { text: b }).collect(),
        }],
    }
}

/// Pull the reply text out of a `generateContent` response.
///
/// No candidates plus a block reason is an error; a candidate without
/// text is an empty reply.
fn extract_text(response: GenerateResponse) -> Result<String, ServiceError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(ServiceError::Blocked(reason));
        }
        return Ok(String::new());
    };

    let text = candidate
        .content
        .map(|c| {
            c.parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();
    Ok(text)
}

// ═══════════════════════════════════════════════════════════
// GeminiClient
// ═══════════════════════════════════════════════════════════

/// Gemini HTTP client.
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: &str,
        timeout_secs: u64,
    ) -> Result<Self, ServiceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ServiceError::ClientBuild(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            client,
            timeout_secs,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ServiceError> {
        Self::new(
            &config.base_url,
            &config.model,
            &config.api_key,
            config.llm_timeout_secs,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

impl CompletionClient for GeminiClient {
    fn complete(&self, blocks: &[String]) -> Result<String, ServiceError> {
        let body = build_request(blocks);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    ServiceError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    ServiceError::Timeout(self.timeout_secs)
                } else {
                    ServiceError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ServiceError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| ServiceError::ResponseParsing(e.to_string()))?;

        extract_text(parsed)
    }
}

// ═══════════════════════════════════════════════════════════
// Scripted client for tests
// ═══════════════════════════════════════════════════════════


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_puts_each_block_in_its_own_part() {
        let blocks = vec!["system".to_string(), "hello".to_string()];
        let json = serde_json::to_value(build_request(&blocks)).unwrap();
        assert_eq!(json["contents"].as_array().unwrap().len(), 1);
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "system");
        assert_eq!(json["contents"][0]["parts"][1]["text"], "hello");
    }

    #[test]
    fn extracts_joined_candidate_text() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"Hello, "},{"text":"Martha."}],"role":"model"},"finishReason":"STOP"}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(extract_text(parsed).unwrap(), "Hello, Martha.");
    }

    #[test]
    fn candidate_without_text_is_empty_reply() {
        let raw = r#"{"candidates":[{"finishReason":"SAFETY"}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(extract_text(parsed).unwrap(), "");
    }

    #[test]
    fn blocked_prompt_is_an_error() {
        let raw = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        let err = extract_text(parsed).unwrap_err();
        assert!(matches!(err, ServiceError::Blocked(ref r) if r == "SAFETY"));
    }

    #[test]
    fn empty_response_is_empty_reply() {
        let parsed: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(extract_text(parsed).unwrap(), "");
    }

    #[test]
    fn endpoint_includes_model() {
        let client =
            GeminiClient::new("https://example.test/v1beta/", "gemini-1.5-pro", "k", 5).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-1.5-pro:generateContent"
        );
        assert_eq!(client.model(), "gemini-1.5-pro");
    }

    #[test]
    fn unreachable_service_reports_connection_error() {
        // Port 9 (discard) on localhost is not expected to accept connections.
        let client = GeminiClient::new("http://127.0.0.1:9", "m", "k", 2).unwrap();
        let err = client.complete(&["hi".to_string()]).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Connection(_) | ServiceError::Timeout(_) | ServiceError::Http(_)
        ));
    }

    #[test]
    fn scripted_client_replays_queue_then_fallback() {
        let client = fake::ScriptedClient::always("later")
            .then_reply("first")
            .then_fail(ServiceError::Timeout(1));
        assert_eq!(client.complete(&[]).unwrap(), "first");
        assert!(client.complete(&[]).is_err());
        assert_eq!(client.complete(&["x".into()]).unwrap(), "later");
        assert_eq!(client.call_count(), 3);
        assert_eq!(client.calls()[2], vec!["x".to_string()]);
    }
}
