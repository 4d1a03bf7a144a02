//! Prompt Enhancer - turns a short idea into a structured prompt
//!
//! Wraps the idea in the meta-prompt and asks Gemini to rewrite it. One
//! request per call, no retries.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::EnhanceError;
use crate::service::{call_gemini_endpoint, render_meta_prompt};

/// Reject ideas that are empty after trimming
pub fn validate_idea(idea: &str) -> Result<(), EnhanceError> {
    if idea.trim().is_empty() {
        return Err(EnhanceError::Input);
    }
    Ok(())
}

/// Prompt Enhancer
pub struct PromptEnhancer {
    config: Arc<Config>,
    client: Client,
}

impl PromptEnhancer {
    /// Create a new PromptEnhancer
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Enhance a raw idea
    ///
    /// # Arguments
    /// * `idea` - The user's idea, embedded verbatim
    ///
    /// # Returns
    /// The enhanced prompt exactly as the service produced it
    pub async fn enhance(&self, idea: &str) -> Result<String, EnhanceError> {
        if !self.config.credential.is_configured() {
            warn!("API key is not configured, skipping request");
            return Err(EnhanceError::Configuration);
        }
        validate_idea(idea)?;

        info!("Starting prompt enhancement with model {}", self.config.model);
        let meta_prompt = render_meta_prompt(idea);

        let enhanced = call_gemini_endpoint(&self.client, &self.config, &meta_prompt).await?;

        info!("Enhancement complete ({} chars)", enhanced.len());
        Ok(enhanced)
    }
}
