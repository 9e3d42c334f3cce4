//! API key resolution
//!
//! Sources are tried in the configured order: environment and secret store
//! (either first), then an interactive prompt. The first non-empty value
//! wins. A source that fails to answer is skipped without an error.

use crate::config::Config;
use arviointi_types::{ConfigError, CredentialOrder, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Where the API key came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Environment,
    SecretStore,
    Prompt,
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialSource::Environment => write!(f, "environment"),
            CredentialSource::SecretStore => write!(f, "secret store"),
            CredentialSource::Prompt => write!(f, "prompt"),
        }
    }
}

/// A resolved API key
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedCredential {
    pub api_key: String,
    pub source: CredentialSource,
}

impl std::fmt::Debug for ResolvedCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedCredential")
            .field("api_key", &"***")
            .field("source", &self.source)
            .finish()
    }
}

/// Asks the user for a key when nothing else provided one
pub trait KeyPrompt {
    fn ask(&self) -> Option<String>;
}

/// TOML file of named secrets, e.g. `GOOGLE_API_KEY = "..."`
#[derive(Debug, Clone)]
pub struct SecretStore {
    path: PathBuf,
}

impl SecretStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a string secret. A missing file is `Ok(None)`.
    pub fn get(&self, name: &str) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        let table: toml::Table = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", self.path.display(), e)))?;

        Ok(table
            .get(name)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()))
    }
}

/// Resolves the API key from the configured sources
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    key_name: String,
    order: CredentialOrder,
    secrets: Option<SecretStore>,
}

impl CredentialResolver {
    pub fn new(key_name: impl Into<String>, order: CredentialOrder) -> Self {
        Self {
            key_name: key_name.into(),
            order,
            secrets: None,
        }
    }

    pub fn with_secret_store(mut self, store: SecretStore) -> Self {
        self.secrets = Some(store);
        self
    }

    /// Resolver described by the configuration
    pub fn from_config(config: &Config) -> Self {
        let resolver = Self::new(config.api_key_name.clone(), config.credential_order);
        match config.secrets_path() {
            Ok(path) => resolver.with_secret_store(SecretStore::new(path)),
            Err(e) => {
                debug!(error = %e, "No secret store location");
                resolver
            }
        }
    }

    pub fn order(&self) -> CredentialOrder {
        self.order
    }

    /// Resolve from the process environment and the secret store
    pub fn resolve(&self) -> Option<ResolvedCredential> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolve with an explicit environment lookup
    pub fn resolve_with<F>(&self, env: F) -> Option<ResolvedCredential>
    where
        F: Fn(&str) -> Option<String>,
    {
        let sources = match self.order {
            CredentialOrder::EnvFirst => [CredentialSource::Environment, CredentialSource::SecretStore],
            CredentialOrder::SecretsFirst => [CredentialSource::SecretStore, CredentialSource::Environment],
        };

        sources.into_iter().find_map(|source| {
            let value = match source {
                CredentialSource::Environment => env(&self.key_name),
                CredentialSource::SecretStore => self.from_secret_store(),
                CredentialSource::Prompt => None,
            };
            non_empty(value).map(|api_key| {
                debug!(%source, "API key resolved");
                ResolvedCredential { api_key, source }
            })
        })
    }

    /// Resolve, falling back to asking the user
    pub fn resolve_or_prompt(&self, prompt: &dyn KeyPrompt) -> Option<ResolvedCredential> {
        self.resolve().or_else(|| Self::from_prompt(prompt))
    }

    /// Prompt step on its own, for callers with a custom environment lookup
    pub fn from_prompt(prompt: &dyn KeyPrompt) -> Option<ResolvedCredential> {
        non_empty(prompt.ask()).map(|api_key| ResolvedCredential {
            api_key,
            source: CredentialSource::Prompt,
        })
    }

    fn from_secret_store(&self) -> Option<String> {
        let store = self.secrets.as_ref()?;
        match store.get(&self.key_name) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable secret store");
                None
            }
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    struct FixedPrompt(Option<&'static str>);

    impl KeyPrompt for FixedPrompt {
        fn ask(&self) -> Option<String> {
            self.0.map(|s| s.to_string())
        }
    }

    #[test]
    fn test_secret_store_missing_file() {
        let store = SecretStore::new("/nonexistent/secrets.toml");
        assert_eq!(store.get("GOOGLE_API_KEY").unwrap(), None);
    }

    #[test]
    fn test_secret_store_non_string_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("secrets.toml");
        std::fs::write(&path, "GOOGLE_API_KEY = 42\nOTHER = \"x\"\n").unwrap();
        let store = SecretStore::new(&path);
        assert_eq!(store.get("GOOGLE_API_KEY").unwrap(), None);
        assert_eq!(store.get("OTHER").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_prompt_fallback_only_when_empty() {
        let resolver = CredentialResolver::new("GOOGLE_API_KEY", CredentialOrder::EnvFirst);
        let resolved = resolver.resolve_with(|_| None);
        assert!(resolved.is_none());

        let prompted = CredentialResolver::from_prompt(&FixedPrompt(Some("typed-key"))).unwrap();
        assert_eq!(prompted.api_key, "typed-key");
        assert_eq!(prompted.source, CredentialSource::Prompt);

        assert!(CredentialResolver::from_prompt(&FixedPrompt(Some("   "))).is_none());
        assert!(CredentialResolver::from_prompt(&FixedPrompt(None)).is_none());
    }

    #[test]
    fn test_debug_masks_key() {
        let cred = ResolvedCredential {
            api_key: "super-secret".to_string(),
            source: CredentialSource::Environment,
        };
        assert!(!format!("{:?}", cred).contains("super-secret"));
    }
}
