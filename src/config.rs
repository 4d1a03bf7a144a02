//! Configuration module - credential and endpoint settings

use std::fmt;
use std::sync::Arc;

use anyhow::{anyhow, Result};

use crate::service::common::mask_key;

/// Environment variable holding the Gemini API key
pub const ENV_API_KEY: &str = "GEMINI_API_KEY";

/// Substituted when the API key variable is absent
pub const API_KEY_PLACEHOLDER: &str = "YOUR_API_KEY_HERE";

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// API key for the generation service
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Build from a raw environment lookup, falling back to the placeholder
    pub fn from_env_value(value: Option<String>) -> Self {
        Self(value.unwrap_or_else(|| API_KEY_PLACEHOLDER.to_string()))
    }

    /// Read `GEMINI_API_KEY` from the process environment
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(ENV_API_KEY).ok())
    }

    /// Placeholder and blank keys count as not configured
    pub fn is_configured(&self) -> bool {
        let trimmed = self.0.trim();
        !trimmed.is_empty() && trimmed != API_KEY_PLACEHOLDER
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({})", mask_key(&self.0))
    }
}

/// Optional configuration parameters for Config::new()
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct Config {
    pub credential: Credential,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Config {
    /// Create a new Config from a credential plus optional overrides
    ///
    /// An unconfigured credential is accepted here; the enhancer reports it
    /// before touching the network.
    pub fn new(credential: Credential, options: ConfigOptions) -> Result<Arc<Self>> {
        let base_url = options
            .base_url
            .as_deref()
            .map(str::trim)
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        if base_url.is_empty() {
            return Err(anyhow!("base_url cannot be empty"));
        }

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(anyhow!(
                "base_url must start with http:// or https://, got '{}'",
                base_url
            ));
        }

        let model = match options.model.as_deref().map(str::trim) {
            Some("") => return Err(anyhow!("model cannot be empty")),
            Some(model) => model.to_string(),
            None => DEFAULT_MODEL.to_string(),
        };

        let timeout_secs = options.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(anyhow!("timeout must be at least 1 second"));
        }

        Ok(Arc::new(Self {
            credential,
            base_url,
            model,
            timeout_secs,
        }))
    }

    /// Create a Config whose credential comes from `GEMINI_API_KEY`
    pub fn from_env(options: ConfigOptions) -> Result<Arc<Self>> {
        Self::new(Credential::from_env(), options)
    }
}
