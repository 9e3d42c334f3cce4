//! Gemini `generateContent` client
//!
//! Every failure (transport, HTTP status, blocked prompt, empty reply) is
//! reported as `Error::ExternalService` carrying a human-readable message.

use arviointi_types::{CapturedImage, Error, Result};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Public Gemini REST endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Something that turns (prompt, image) into free text.
pub trait ValuationClient {
    fn generate(
        &self,
        prompt: &str,
        image: &CapturedImage,
        model: &str,
        api_key: &str,
    ) -> Result<String>;
}

/// Blocking HTTPS client for the Gemini API
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::ExternalService(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            model
        )
    }
}

impl ValuationClient for GeminiClient {
    fn generate(
        &self,
        prompt: &str,
        image: &CapturedImage,
        model: &str,
        api_key: &str,
    ) -> Result<String> {
        let url = self.generate_url(model);
        let body = build_request_body(prompt, image);

        info!(model, image_bytes = image.bytes.len(), "Sending valuation request");

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .map_err(|e| Error::ExternalService(format!("Request failed: {}", e)))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| Error::ExternalService(format!("Failed to read response: {}", e)))?;

        debug!(status = status.as_u16(), body_len = text.len(), "Received model response");

        if !status.is_success() {
            return Err(Error::ExternalService(api_error_message(status.as_u16(), &text)));
        }

        parse_generate_response(&text)
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: &'a str },
    Inline { inline_data: InlineData<'a> },
}

#[derive(Debug, Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// One user turn: the prompt text followed by the inline image
pub fn build_request_body<'a>(prompt: &'a str, image: &'a CapturedImage) -> GenerateContentRequest<'a> {
    let data = base64::engine::general_purpose::STANDARD.encode(&image.bytes);
    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![
                Part::Text { text: prompt },
                Part::Inline {
                    inline_data: InlineData {
                        mime_type: &image.mime_type,
                        data,
                    },
                },
            ],
        }],
    }
}

/// Pull the reply text out of a successful response body
pub fn parse_generate_response(body: &str) -> Result<String> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| Error::ExternalService(format!("Malformed model response: {}", e)))?;

    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates returned".to_string());
        return Err(Error::ExternalService(format!("Prompt was blocked: {}", reason)));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(Error::ExternalService(format!(
            "Model returned no text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    Ok(text)
}

/// Error message for a non-2xx response
fn api_error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => {
            let err = envelope.error;
            format!(
                "{} {}: {}",
                err.code.unwrap_or(status),
                err.status.as_deref().unwrap_or("ERROR"),
                err.message
            )
        }
        Err(_) => {
            // Truncate safely at char boundary
            let truncated: String = body.chars().take(500).collect();
            format!("HTTP {}: {}", status, truncated)
        }
    }
}
