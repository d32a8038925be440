//! Infrastructure layer for lumin
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod gateway;
pub mod logging;
pub mod store;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileGatewayConfig, FileLoggingConfig, FileOutputConfig,
    FileOutputFormat, FileReplConfig, FileSessionsConfig,
};
pub use gateway::{OpenAiError, OpenAiGateway, OpenAiSettings};
pub use logging::JsonlConversationLogger;
pub use store::{InMemorySessionStore, JsonFileSessionStore};
