//! Session storage configuration from TOML (`[sessions]` section)

use lumin_application::SessionLimits;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Raw session storage configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionsConfig {
    /// Directory for session snapshots (default: `$XDG_DATA_HOME/lumin/sessions`)
    pub dir: Option<PathBuf>,
    /// Maximum sessions kept in memory
    pub max_live: usize,
    /// Seconds a session may stay idle in memory
    pub idle_ttl_secs: u64,
}

impl Default for FileSessionsConfig {
    fn default() -> Self {
        let limits = SessionLimits::default();
        Self {
            dir: None,
            max_live: limits.max_live,
            idle_ttl_secs: limits.idle_ttl.as_secs(),
        }
    }
}

impl FileSessionsConfig {
    pub fn resolve_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(Self::default_dir)
    }

    /// `$XDG_DATA_HOME/lumin/sessions`, or `./.lumin/sessions` without a home
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .map(|d| d.join("lumin").join("sessions"))
            .unwrap_or_else(|| PathBuf::from(".lumin").join("sessions"))
    }

    pub fn to_limits(&self) -> SessionLimits {
        SessionLimits::default()
            .with_max_live(self.max_live)
            .with_idle_ttl(Duration::from_secs(self.idle_ttl_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sessions_section() {
        let toml_str = r#"
[sessions]
dir = "/tmp/lumin-sessions"
max_live = 4
idle_ttl_secs = 60
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.sessions.resolve_dir(),
            PathBuf::from("/tmp/lumin-sessions")
        );
        let limits = config.sessions.to_limits();
        assert_eq!(limits.max_live, 4);
        assert_eq!(limits.idle_ttl, Duration::from_secs(60));
    }

    #[test]
    fn test_default_dir_ends_with_sessions() {
        assert!(FileSessionsConfig::default().resolve_dir().ends_with("sessions"));
    }
}
