//! Service modules for the generation API

pub mod common;
pub mod gemini;

// Re-export commonly used items
pub use common::render_meta_prompt;
pub use gemini::{call_gemini_endpoint, ResponseEnvelope};
