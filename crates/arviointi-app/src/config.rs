//! Configuration management for auton-arviointi
//!
//! Config stored at: ~/.config/auton-arviointi/config.json

use arviointi_types::{AnalysisMode, ConfigError, CredentialOrder, Language, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application directory name under the platform config dir
const APP_DIR: &str = "auton-arviointi";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// UI and report language
    #[serde(default)]
    pub language: Language,

    /// Analysis mode (selects the model)
    #[serde(default)]
    pub mode: AnalysisMode,

    /// Whether the environment or the secret store is checked first
    #[serde(default)]
    pub credential_order: CredentialOrder,

    /// Name of the API key in the environment and the secret store
    #[serde(default = "default_api_key_name")]
    pub api_key_name: String,

    /// Secret store override (TOML)
    #[serde(default)]
    pub secrets_path: Option<PathBuf>,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Odometer value used when none is given
    #[serde(default = "default_mileage_km")]
    pub default_mileage_km: u64,

    /// Model call timeout
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// API endpoint override
    #[serde(default)]
    pub endpoint: Option<String>,
}

fn default_api_key_name() -> String {
    "GOOGLE_API_KEY".to_string()
}

fn default_mileage_km() -> u64 {
    150_000
}

fn default_timeout_secs() -> u64 {
    arviointi_vision::DEFAULT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Language::default(),
            mode: AnalysisMode::default(),
            credential_order: CredentialOrder::default(),
            api_key_name: default_api_key_name(),
            secrets_path: None,
            output_format: OutputFormat::default(),
            default_mileage_km: default_mileage_km(),
            request_timeout_secs: default_timeout_secs(),
            endpoint: None,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the secret store path
    pub fn secrets_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.secrets_path {
            return Ok(path.clone());
        }
        Ok(Self::config_dir()?.join("secrets.toml"))
    }

    /// Model endpoint, falling back to the public API
    pub fn endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or(arviointi_vision::DEFAULT_ENDPOINT)
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from a specific file, default if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::SaveError(format!("{}: {}", parent.display(), e)))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .map_err(|e| ConfigError::SaveError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Auton Arviointi Configuration")?;
        writeln!(f, "=============================")?;
        writeln!(f)?;
        writeln!(f, "Language:         {}", self.language)?;
        writeln!(f, "Mode:             {} ({})", self.mode, self.mode.model_id())?;
        writeln!(f, "Credential order: {}", self.credential_order)?;
        writeln!(f, "API key name:     {}", self.api_key_name)?;
        writeln!(
            f,
            "Secrets file:     {}",
            self.secrets_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Output format:    {}", self.output_format)?;
        writeln!(f, "Default mileage:  {} km", self.default_mileage_km)?;
        writeln!(f, "Timeout:          {} s", self.request_timeout_secs)?;
        writeln!(f, "Endpoint:         {}", self.endpoint())?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:      {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arviointi_types::Error;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.language, Language::Suomi);
        assert_eq!(config.mode, AnalysisMode::Quick);
        assert_eq!(config.credential_order, CredentialOrder::EnvFirst);
        assert_eq!(config.api_key_name, "GOOGLE_API_KEY");
        assert_eq!(config.default_mileage_km, 150_000);
        assert_eq!(config.endpoint(), arviointi_vision::DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_missing_file_gives_default() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            language: Language::English,
            mode: AnalysisMode::Deep,
            credential_order: CredentialOrder::SecretsFirst,
            secrets_path: Some(dir.path().join("secrets.toml")),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.secrets_path().unwrap(), dir.path().join("secrets.toml"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"language": "english", "credential_order": "secrets-first"}"#)
            .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.language, Language::English);
        assert_eq!(config.credential_order, CredentialOrder::SecretsFirst);
        assert_eq!(config.mode, AnalysisMode::Quick);
        assert_eq!(config.request_timeout_secs, 120);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ParseError(_))));
    }
}
