//! Prompt Enhancer module
//! Wraps a user's idea in a meta-prompt and asks Gemini to rewrite it

pub mod prompt_enhancer;
pub mod templates;

pub use prompt_enhancer::{validate_idea, PromptEnhancer};
pub use templates::META_PROMPT_TEMPLATE;
