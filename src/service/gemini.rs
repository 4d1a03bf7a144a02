//! Gemini API service

use std::time::Instant;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::common::{describe_status, redact_url};
use crate::config::Config;
use crate::error::EnhanceError;

pub const GENERATION_TEMPERATURE: f64 = 0.7;
pub const GENERATION_TOP_K: u32 = 1;
pub const GENERATION_TOP_P: f64 = 1.0;
pub const GENERATION_MAX_OUTPUT_TOKENS: u32 = 8192;

/// finishReason value the service uses for a safety refusal
const FINISH_REASON_SAFETY: &str = "SAFETY";

/// Gemini API request structure
#[derive(Debug, Serialize)]
pub struct GeminiApiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    temperature: f64,
    #[serde(rename = "topK")]
    top_k: u32,
    #[serde(rename = "topP")]
    top_p: f64,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

impl GeminiApiRequest {
    /// Single user turn carrying the meta-prompt, with fixed generation parameters
    pub fn new(meta_prompt: &str) -> Self {
        Self {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: meta_prompt.to_string(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: GENERATION_TEMPERATURE,
                top_k: GENERATION_TOP_K,
                top_p: GENERATION_TOP_P,
                max_output_tokens: GENERATION_MAX_OUTPUT_TOKENS,
            },
        }
    }
}

/// Classified response body
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseEnvelope {
    /// First candidate carried generated text
    Success { text: String },
    /// First candidate was stopped with finishReason SAFETY
    SafetyBlocked,
    /// Anything else; keeps the decoded JSON for diagnosis
    Malformed(Value),
}

impl ResponseEnvelope {
    /// Decode a raw response body and classify it
    pub fn parse(body: &str) -> Result<Self, EnhanceError> {
        let value: Value = serde_json::from_str(body).map_err(|e| {
            debug!("Response body is not JSON: {}", e);
            EnhanceError::Decode {
                body: body.to_string(),
            }
        })?;
        Ok(Self::from_value(value))
    }

    /// Classify an already-decoded envelope
    ///
    /// Only the first candidate is inspected; the rest of the envelope may
    /// hold anything.
    pub fn from_value(value: Value) -> Self {
        let Some(candidate) = value
            .get("candidates")
            .and_then(Value::as_array)
            .and_then(|candidates| candidates.first())
        else {
            debug!("Envelope has no candidates");
            return Self::Malformed(value);
        };

        let text = candidate
            .get("content")
            .and_then(|content| content.get("parts"))
            .and_then(Value::as_array)
            .and_then(|parts| parts.first())
            .and_then(|part| part.get("text"))
            .and_then(Value::as_str);

        if let Some(text) = text {
            return Self::Success {
                text: text.to_string(),
            };
        }

        match candidate.get("finishReason").and_then(Value::as_str) {
            Some(FINISH_REASON_SAFETY) => Self::SafetyBlocked,
            _ => Self::Malformed(value),
        }
    }

    pub fn into_result(self) -> Result<String, EnhanceError> {
        match self {
            Self::Success { text } => Ok(text),
            Self::SafetyBlocked => Err(EnhanceError::SafetyBlocked),
            Self::Malformed(envelope) => Err(EnhanceError::UnexpectedShape { envelope }),
        }
    }
}

/// Build the generateContent URL for a model
pub fn build_gemini_url(base_url: &str, model: &str) -> String {
    let base_url = base_url.trim_end_matches('/');
    let base_url = base_url.strip_suffix("/v1beta").unwrap_or(base_url);
    format!("{}/v1beta/models/{}:generateContent", base_url, model)
}

/// Call Gemini API endpoint with an already rendered meta-prompt
pub async fn call_gemini_endpoint(
    client: &Client,
    config: &Config,
    meta_prompt: &str,
) -> Result<String, EnhanceError> {
    let payload = GeminiApiRequest::new(meta_prompt);
    let url = build_gemini_url(&config.base_url, &config.model);

    // without_url() keeps the key out of error messages
    let request = client
        .post(&url)
        .query(&[("key", config.credential.expose())])
        .header("Content-Type", "application/json")
        .json(&payload)
        .build()
        .map_err(|e| EnhanceError::Transport(e.without_url().to_string()))?;

    info!("Calling Gemini API: {}", redact_url(request.url().as_str()));
    let start_time = Instant::now();

    let response = client.execute(request).await;

    let duration_ms = start_time.elapsed().as_millis() as u64;
    info!("Gemini API call completed in {}ms", duration_ms);

    let resp = response.map_err(|e| EnhanceError::Transport(e.without_url().to_string()))?;

    let status = resp.status();
    let body_text = resp
        .text()
        .await
        .map_err(|e| EnhanceError::Transport(e.without_url().to_string()))?;

    if !status.is_success() {
        return Err(EnhanceError::Transport(describe_status(
            status, &body_text, "Gemini",
        )));
    }

    let envelope = ResponseEnvelope::parse(&body_text)?;
    if envelope == ResponseEnvelope::SafetyBlocked {
        warn!("Gemini blocked the response for safety reasons");
    }

    envelope.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_gemini_url() {
        assert_eq!(
            build_gemini_url("https://generativelanguage.googleapis.com", "gemini-2.0-flash"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
        assert_eq!(
            build_gemini_url("https://generativelanguage.googleapis.com/", "gemini-2.0-flash"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
        assert_eq!(
            build_gemini_url(
                "https://generativelanguage.googleapis.com/v1beta/",
                "gemini-2.0-flash"
            ),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_request_payload_shape() {
        let payload = serde_json::to_value(GeminiApiRequest::new("hello")).unwrap();
        assert_eq!(
            payload,
            json!({
                "contents": [{"role": "user", "parts": [{"text": "hello"}]}],
                "generationConfig": {
                    "temperature": 0.7,
                    "topK": 1,
                    "topP": 1.0,
                    "maxOutputTokens": 8192
                }
            })
        );
    }

    #[test]
    fn test_envelope_success() {
        let envelope = ResponseEnvelope::parse(
            r#"{"candidates":[{"content":{"parts":[{"text":"Improved prompt text"}],"role":"model"},"finishReason":"STOP"}]}"#,
        )
        .unwrap();
        assert_eq!(
            envelope,
            ResponseEnvelope::Success {
                text: "Improved prompt text".to_string()
            }
        );
    }

    #[test]
    fn test_envelope_text_wins_over_safety_reason() {
        let envelope = ResponseEnvelope::from_value(json!({
            "candidates": [{
                "content": {"parts": [{"text": "partial"}]},
                "finishReason": "SAFETY"
            }]
        }));
        assert_eq!(
            envelope,
            ResponseEnvelope::Success {
                text: "partial".to_string()
            }
        );
    }

    #[test]
    fn test_envelope_safety_blocked() {
        let envelope = ResponseEnvelope::parse(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#)
            .unwrap();
        assert_eq!(envelope, ResponseEnvelope::SafetyBlocked);
    }

    #[test]
    fn test_envelope_other_finish_reason_is_malformed() {
        let value = json!({"candidates": [{"finishReason": "RECITATION"}]});
        assert_eq!(
            ResponseEnvelope::from_value(value.clone()),
            ResponseEnvelope::Malformed(value)
        );
    }

    #[test]
    fn test_envelope_malformed_variants() {
        let cases = [
            json!({}),
            json!({"candidates": []}),
            json!({"candidates": null}),
            json!({"candidates": "nope"}),
            json!({"candidates": [{"content": {}}]}),
            json!({"candidates": [{"content": {"parts": []}}]}),
            json!({"candidates": [{"content": {"parts": [{"functionCall": {}}]}}]}),
            json!({"promptFeedback": {"blockReason": "SAFETY"}}),
            json!([1, 2, 3]),
        ];

        for value in cases {
            assert_eq!(
                ResponseEnvelope::from_value(value.clone()),
                ResponseEnvelope::Malformed(value)
            );
        }
    }

    #[test]
    fn test_envelope_ignores_trailing_candidates() {
        let envelope = ResponseEnvelope::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "ok"}]}}, "junk"]
        }));
        assert_eq!(
            envelope,
            ResponseEnvelope::Success {
                text: "ok".to_string()
            }
        );
    }

    #[test]
    fn test_envelope_ignores_trailing_parts() {
        let envelope = ResponseEnvelope::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "ok"}, 7]}}]
        }));
        assert_eq!(
            envelope,
            ResponseEnvelope::Success {
                text: "ok".to_string()
            }
        );
    }

    #[test]
    fn test_envelope_safety_with_unusable_content() {
        let cases = [
            json!({"candidates": [{"finishReason": "SAFETY", "content": "x"}]}),
            json!({"candidates": [{"finishReason": "SAFETY", "content": {"parts": []}}]}),
            json!({"candidates": [{"finishReason": "SAFETY", "content": {"parts": [{"text": 3}]}}]}),
        ];

        for value in cases {
            assert_eq!(
                ResponseEnvelope::from_value(value),
                ResponseEnvelope::SafetyBlocked
            );
        }
    }

    #[test]
    fn test_envelope_ignores_unrelated_fields() {
        let envelope = ResponseEnvelope::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "ok"}], "role": 5}, "index": "zero"}],
            "usageMetadata": "not an object",
            "modelVersion": 2
        }));
        assert_eq!(
            envelope,
            ResponseEnvelope::Success {
                text: "ok".to_string()
            }
        );
    }

    #[test]
    fn test_envelope_invalid_json_is_decode_error() {
        let body = r#"{"candidates":[{"content":"#;
        match ResponseEnvelope::parse(body) {
            Err(EnhanceError::Decode { body: raw }) => assert_eq!(raw, body),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_into_result() {
        assert_eq!(
            ResponseEnvelope::Success {
                text: "ok".to_string()
            }
            .into_result()
            .unwrap(),
            "ok"
        );
        assert!(matches!(
            ResponseEnvelope::SafetyBlocked.into_result(),
            Err(EnhanceError::SafetyBlocked)
        ));
        assert!(matches!(
            ResponseEnvelope::Malformed(json!({})).into_result(),
            Err(EnhanceError::UnexpectedShape { .. })
        ));
    }
}
