//! REPL configuration from TOML (`[repl]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Path to the line-editor history file (default: `$XDG_DATA_HOME/lumin/history.txt`)
    pub history_file: Option<PathBuf>,
}

impl FileReplConfig {
    pub fn resolve_history_file(&self) -> Option<PathBuf> {
        self.history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("lumin").join("history.txt")))
    }
}
