//! Prompt domain
//!
//! Templates for generating prompts at each stage of the consensus flow.

mod template;

pub use template::PromptTemplate;
