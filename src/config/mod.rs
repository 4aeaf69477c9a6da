//! Configuration management.

mod file_config;

pub use file_config::{ConfigFile, ConfigFileError};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "ARTICLE_NORMALIZER";

/// Config file name looked up in the working directory
const LOCAL_CONFIG_FILE: &str = "article-normalizer.toml";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Input/output file settings
    #[serde(default)]
    pub io: IoConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Default file locations used when the CLI is not given paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IoConfig {
    /// File read when no input is given
    #[serde(default = "default_input")]
    pub default_input: PathBuf,

    /// File written when no output is given
    #[serde(default = "default_output")]
    pub default_output: PathBuf,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            default_input: default_input(),
            default_output: default_output(),
        }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from("urldict.json")
}

fn default_output() -> PathBuf {
    PathBuf::from("cleaned_data.json")
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: "json" for structured logs, anything else for text
    #[serde(default)]
    pub format: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl LoggingConfig {
    /// Returns true if structured JSON logs were requested
    pub fn is_json(&self) -> bool {
        self.format
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }
}

/// Load configuration from a file, with environment overrides.
///
/// `ARTICLE_NORMALIZER_LOGGING__LEVEL=debug` overrides `[logging] level`.
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize()
}

/// Find a config file in the working directory or the user config directory
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("article-normalizer").join("config.toml"))
        .filter(|path| path.is_file())
}

/// Get the default configuration
pub fn get_config() -> Config {
    Config::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = get_config();
        assert_eq!(config.io.default_input, PathBuf::from("urldict.json"));
        assert_eq!(config.io.default_output, PathBuf::from("cleaned_data.json"));
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_load_config_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[io]\ndefault_input = \"in.json\"\n\n[logging]\nformat = \"JSON\"\n")
            .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.io.default_input, PathBuf::from("in.json"));
        assert_eq!(config.io.default_output, PathBuf::from("cleaned_data.json"));
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config(Path::new("/nonexistent/article-normalizer.toml"));
        assert!(result.is_err());
    }
}
