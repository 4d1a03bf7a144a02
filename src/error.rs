//! Error taxonomy for prompt enhancement

use serde_json::Value;
use thiserror::Error;

/// Every way a single enhancement can fail
#[derive(Debug, Error)]
pub enum EnhanceError {
    /// Credential missing or still the placeholder value
    #[error(
        "API key not configured. Please set the GEMINI_API_KEY environment variable."
    )]
    Configuration,

    /// Idea text was empty or whitespace-only
    #[error("Please enter a prompt.")]
    Input,

    /// Connection failure, timeout or non-2xx status
    #[error("An error occurred during the API request: {0}")]
    Transport(String),

    /// Response body was not valid JSON
    #[error("Failed to decode API response. Raw response: {body}")]
    Decode { body: String },

    /// The service refused to generate for safety reasons
    #[error("The response was blocked due to safety settings. Please modify your prompt.")]
    SafetyBlocked,

    /// Valid JSON that matches no recognized response shape
    #[error("The API returned an unexpected response structure: {envelope}")]
    UnexpectedShape { envelope: Value },
}

impl EnhanceError {
    /// True for failures detected before any network activity
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Configuration | Self::Input)
    }
}
