//! Configuration file support for article-normalizer.
//!
//! This module reads and writes the TOML configuration file directly,
//! without environment overrides. It backs `article-normalizer config init`.
//!
//! # Configuration File Format
//!
//! ```toml
//! [io]
//! default_input = "urldict.json"
//! default_output = "cleaned_data.json"
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```

use super::Config;
use std::path::Path;

/// Configuration file structure
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConfigFile {
    /// Parsed configuration
    pub config: Config,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigFileError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigFileError::Io(e.to_string()))?;

        let config = toml::from_str(&content).map_err(|e| ConfigFileError::Parse(e.to_string()))?;
        Ok(Self { config })
    }

    /// Save configuration to a TOML file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigFileError> {
        let content = toml::to_string_pretty(&self.config)
            .map_err(|e| ConfigFileError::Serialize(e.to_string()))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
    }
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_config_file_save_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut file = ConfigFile::default();
        file.config.logging.level = "debug".to_string();
        file.config.io.default_output = PathBuf::from("out.json");
        file.save(&path).unwrap();

        let loaded = ConfigFile::load(&path).unwrap();
        assert_eq!(loaded, file);
    }

    #[test]
    fn test_config_file_nonexistent() {
        let result = ConfigFile::load(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigFileError::Io(_))));
    }

    #[test]
    fn test_config_file_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.toml");
        std::fs::write(&path, "invalid = toml = content").unwrap();

        let result = ConfigFile::load(&path);
        assert!(matches!(result, Err(ConfigFileError::Parse(_))));
    }
}
