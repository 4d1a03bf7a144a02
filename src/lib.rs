//! prompt-enhancer library - turns short ideas into structured prompts via Gemini

pub mod config;
pub mod enhancer;
pub mod error;
pub mod service;

// Re-export commonly used types
pub use config::{Config, ConfigOptions, Credential};
pub use enhancer::PromptEnhancer;
pub use error::EnhanceError;
pub use service::ResponseEnvelope;
