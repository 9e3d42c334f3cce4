//! Error types for auton-arviointi

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid image format: {0}")]
    InvalidImageFormat(String),

    /// No API key could be resolved from any credential source
    #[error("API key is missing")]
    MissingCredential,

    /// Any failure of the generative model call: auth, quota, network,
    /// rejected image or an empty reply
    #[error("{0}")]
    ExternalService(String),

    #[error("Invalid session transition: {0}")]
    InvalidTransition(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_service_message_is_passed_through() {
        let err = Error::ExternalService("429 RESOURCE_EXHAUSTED: quota".to_string());
        assert_eq!(err.to_string(), "429 RESOURCE_EXHAUSTED: quota");
    }

    #[test]
    fn test_config_error_converts() {
        let err: Error = ConfigError::ParseError("bad json".to_string()).into();
        assert!(matches!(err, Error::Config(ConfigError::ParseError(_))));
        assert_eq!(
            err.to_string(),
            "Configuration error: Failed to parse configuration: bad json"
        );
    }
}
