//! Generation gateway adapters.
//!
//! Provides [`OpenAiGateway`], an OpenAI-compatible chat-completions client
//! implementing the [`LlmGateway`](lumin_application::LlmGateway) port.

pub mod error;
mod openai;

pub use error::OpenAiError;
pub use openai::{OpenAiGateway, OpenAiSettings};
