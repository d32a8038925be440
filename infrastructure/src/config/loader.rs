//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["lumin.toml", ".lumin.toml"];
const ENV_PREFIX: &str = "LUMIN_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `LUMIN_*` environment variables (`__` separates sections,
    ///    e.g. `LUMIN_CONSENSUS__MAX_ROUNDS=3`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./lumin.toml` or `./.lumin.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/lumin/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path.map(PathBuf::as_path),
        )
        .extract()
        .map_err(Box::new)
    }

    fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(path) = global
            && path.exists()
        {
            figment = figment.merge(Toml::file(path));
        }
        if let Some(path) = project {
            figment = figment.merge(Toml::file(path));
        }
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// `$XDG_CONFIG_HOME/lumin/config.toml` (or the platform equivalent)
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("lumin").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");
        println!("  [ENV  ] Variables: {ENV_PREFIX}*");

        match explicit {
            Some(path) if path.exists() => println!("  [FOUND] Explicit: {}", path.display()),
            Some(path) => println!("  [MISS ] Explicit: {}", path.display()),
            None => {}
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./lumin.toml or ./.lumin.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumin_domain::ExhaustionPolicy;
    use std::io::Write;

    fn write_toml(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.consensus.responders, 3);
        assert_eq!(config.consensus.reviewers, 1);
        assert_eq!(config.consensus.max_rounds, 6);
    }

    #[test]
    fn test_global_config_path_mentions_lumin() {
        if let Some(path) = ConfigLoader::global_config_path() {
            assert!(path.to_string_lossy().contains("lumin"));
            assert!(path.ends_with("config.toml"));
        }
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_toml(
            &dir,
            "custom.toml",
            "[consensus]\nreviewers = 3\non_exhaustion = \"reject\"\n",
        );

        let config: FileConfig = ConfigLoader::figment(None, None, Some(&path))
            .extract()
            .unwrap();
        assert_eq!(config.consensus.reviewers, 3);
        assert_eq!(config.consensus.responders, 3);
        assert_eq!(config.consensus.on_exhaustion, ExhaustionPolicy::Reject);
    }

    #[test]
    fn test_later_sources_win() {
        let dir = tempfile::tempdir().unwrap();
        let global = write_toml(
            &dir,
            "global.toml",
            "[consensus]\nmax_rounds = 2\nmemory_window = 5\n",
        );
        let project = write_toml(&dir, "lumin.toml", "[consensus]\nmax_rounds = 9\n");

        let config: FileConfig = ConfigLoader::figment(Some(&global), Some(&project), None)
            .extract()
            .unwrap();
        assert_eq!(config.consensus.max_rounds, 9);
        assert_eq!(config.consensus.memory_window, 5);
    }

    #[test]
    fn test_missing_global_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        let config: FileConfig = ConfigLoader::figment(Some(&missing), None, None)
            .extract()
            .unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_invalid_type_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_toml(&dir, "bad.toml", "[consensus]\nresponders = \"many\"\n");

        let result: Result<FileConfig, _> =
            ConfigLoader::figment(None, None, Some(&path)).extract();
        assert!(result.is_err());
    }
}
