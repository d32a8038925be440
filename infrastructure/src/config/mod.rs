//! Configuration file loading for lumin
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `LUMIN_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./lumin.toml` or `./.lumin.toml`
//! 4. Global: `$XDG_CONFIG_HOME/lumin/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileGatewayConfig, FileLoggingConfig, FileOutputConfig, FileOutputFormat,
    FileReplConfig, FileSessionsConfig,
};
pub use loader::ConfigLoader;
