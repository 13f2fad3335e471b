use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Base URL of the API, including the `/api` prefix.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ViewerConfig {
    /// Reads `~/.config/chatlog/desktop.toml` when present; `CHATLOG_API_BASE`
    /// overrides the file.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&Self::config_path())?;
        if let Ok(api_base) = std::env::var("CHATLOG_API_BASE") {
            config.api_base = api_base;
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    fn config_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("chatlog").join("desktop.toml")
        } else {
            PathBuf::from("./chatlog-desktop.toml")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ViewerConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.api_base, "http://localhost:3000/api");
    }

    #[test]
    fn test_reads_api_base_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("desktop.toml");
        std::fs::write(&path, "api_base = \"https://logs.example.com/api\"\n").unwrap();

        let config = ViewerConfig::load_from(&path).unwrap();
        assert_eq!(config.api_base, "https://logs.example.com/api");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("desktop.toml");
        std::fs::write(&path, "api_base = [").unwrap();

        assert!(matches!(
            ViewerConfig::load_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
