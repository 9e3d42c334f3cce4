//! Credential resolution order tests

use arviointi_app::config::Config;
use arviointi_app::credentials::{CredentialResolver, CredentialSource, SecretStore};
use arviointi_types::CredentialOrder;
use std::path::Path;
use tempfile::tempdir;

fn write_secrets(dir: &Path, content: &str) -> SecretStore {
    let path = dir.join("secrets.toml");
    std::fs::write(&path, content).unwrap();
    SecretStore::new(path)
}

fn env_with_key(name: &str) -> Option<String> {
    (name == "GOOGLE_API_KEY").then(|| "env-key".to_string())
}

#[test]
fn test_env_first_prefers_environment() {
    let dir = tempdir().unwrap();
    let store = write_secrets(dir.path(), "GOOGLE_API_KEY = \"secret-key\"\n");
    let resolver = CredentialResolver::new("GOOGLE_API_KEY", CredentialOrder::EnvFirst)
        .with_secret_store(store);

    let resolved = resolver.resolve_with(env_with_key).unwrap();
    assert_eq!(resolved.api_key, "env-key");
    assert_eq!(resolved.source, CredentialSource::Environment);
}

#[test]
fn test_secrets_first_prefers_secret_store() {
    let dir = tempdir().unwrap();
    let store = write_secrets(dir.path(), "GOOGLE_API_KEY = \"secret-key\"\n");
    let resolver = CredentialResolver::new("GOOGLE_API_KEY", CredentialOrder::SecretsFirst)
        .with_secret_store(store);

    let resolved = resolver.resolve_with(env_with_key).unwrap();
    assert_eq!(resolved.api_key, "secret-key");
    assert_eq!(resolved.source, CredentialSource::SecretStore);
}

#[test]
fn test_env_first_falls_back_to_secret_store() {
    let dir = tempdir().unwrap();
    let store = write_secrets(dir.path(), "GOOGLE_API_KEY = \"secret-key\"\n");
    let resolver = CredentialResolver::new("GOOGLE_API_KEY", CredentialOrder::EnvFirst)
        .with_secret_store(store);

    let resolved = resolver.resolve_with(|_| None).unwrap();
    assert_eq!(resolved.source, CredentialSource::SecretStore);
}

#[test]
fn test_secrets_first_falls_back_to_environment() {
    let dir = tempdir().unwrap();
    let store = write_secrets(dir.path(), "OTHER_KEY = \"unrelated\"\n");
    let resolver = CredentialResolver::new("GOOGLE_API_KEY", CredentialOrder::SecretsFirst)
        .with_secret_store(store);

    let resolved = resolver.resolve_with(env_with_key).unwrap();
    assert_eq!(resolved.api_key, "env-key");
    assert_eq!(resolved.source, CredentialSource::Environment);
}

#[test]
fn test_malformed_secret_store_is_skipped() {
    let dir = tempdir().unwrap();
    let store = write_secrets(dir.path(), "this is [not toml");
    let resolver = CredentialResolver::new("GOOGLE_API_KEY", CredentialOrder::SecretsFirst)
        .with_secret_store(store);

    let resolved = resolver.resolve_with(env_with_key).unwrap();
    assert_eq!(resolved.source, CredentialSource::Environment);
}

#[test]
fn test_empty_values_are_absent() {
    let dir = tempdir().unwrap();
    let store = write_secrets(dir.path(), "GOOGLE_API_KEY = \"\"\n");
    let resolver = CredentialResolver::new("GOOGLE_API_KEY", CredentialOrder::EnvFirst)
        .with_secret_store(store);

    assert!(resolver.resolve_with(|_| Some(String::new())).is_none());
}

#[test]
fn test_from_config_uses_configured_name_and_path() {
    let dir = tempdir().unwrap();
    write_secrets(dir.path(), "DEALER_KEY = \"dealer-secret\"\n");

    let config = Config {
        api_key_name: "DEALER_KEY".to_string(),
        credential_order: CredentialOrder::SecretsFirst,
        secrets_path: Some(dir.path().join("secrets.toml")),
        ..Config::default()
    };
    let resolver = CredentialResolver::from_config(&config);
    assert_eq!(resolver.order(), CredentialOrder::SecretsFirst);

    let resolved = resolver
        .resolve_with(|name| (name == "DEALER_KEY").then(|| "env-dealer".to_string()))
        .unwrap();
    assert_eq!(resolved.api_key, "dealer-secret");
}
