use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with the content host populated.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("AEM_HOST", "https://publish.example.com");
    m
}

#[test]
fn parse_environment_variants() {
    assert_eq!(parse_environment("development"), Environment::Development);
    assert_eq!(parse_environment("test"), Environment::Test);
    assert_eq!(parse_environment("production"), Environment::Production);
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn build_app_config_fails_without_any_content_source() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "AEM_HOST"),
        "expected MissingEnvVar(AEM_HOST), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_host_as_missing() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("AEM_HOST", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_app_config_accepts_fixture_without_host() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("WKND_CONTENT_FIXTURE_PATH", "./fixtures/adventures.json");
    let cfg = build_app_config(lookup_from_map(&map)).expect("fixture-only config");
    assert!(cfg.content_host.is_none());
    assert_eq!(
        cfg.content_fixture_path.as_deref(),
        Some(std::path::Path::new("./fixtures/adventures.json"))
    );
}

#[test]
fn build_app_config_succeeds_with_defaults() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(
        cfg.storefront_path,
        std::path::PathBuf::from("./config/storefront.yaml")
    );
    assert_eq!(
        cfg.content_host.as_deref(),
        Some("https://publish.example.com")
    );
    assert_eq!(cfg.content_graphql_endpoint, "wknd-shared");
    assert!(cfg.content_auth_token.is_none());
    assert_eq!(cfg.asset_host, DEFAULT_ASSET_HOST);
    assert_eq!(cfg.catalog_revalidate_secs, 3600);
    assert_eq!(cfg.content_request_timeout_secs, 30);
    assert_eq!(cfg.content_user_agent, "wknd-storefront/0.1");
    assert_eq!(cfg.content_max_retries, 0);
    assert_eq!(cfg.content_retry_backoff_base_secs, 1);
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = full_env();
    map.insert("WKND_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WKND_BIND_ADDR"),
        "expected InvalidEnvVar(WKND_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn catalog_revalidate_secs_override() {
    let mut map = full_env();
    map.insert("WKND_CATALOG_REVALIDATE_SECS", "43200");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.catalog_revalidate_secs, 43_200);
}

#[test]
fn catalog_revalidate_secs_invalid() {
    let mut map = full_env();
    map.insert("WKND_CATALOG_REVALIDATE_SECS", "an hour");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WKND_CATALOG_REVALIDATE_SECS"),
        "expected InvalidEnvVar(WKND_CATALOG_REVALIDATE_SECS), got: {result:?}"
    );
}

#[test]
fn content_max_retries_override() {
    let mut map = full_env();
    map.insert("WKND_CONTENT_MAX_RETRIES", "3");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.content_max_retries, 3);
}

#[test]
fn content_max_retries_invalid() {
    let mut map = full_env();
    map.insert("WKND_CONTENT_MAX_RETRIES", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WKND_CONTENT_MAX_RETRIES"),
        "expected InvalidEnvVar(WKND_CONTENT_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn content_request_timeout_secs_override() {
    let mut map = full_env();
    map.insert("WKND_CONTENT_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.content_request_timeout_secs, 5);
}

#[test]
fn auth_token_is_read_and_redacted_in_debug() {
    let mut map = full_env();
    map.insert("AEM_AUTH_TOKEN", "secret-token");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.content_auth_token.as_deref(), Some("secret-token"));
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("secret-token"));
    assert!(debug.contains("[redacted]"));
}

#[test]
fn graphql_endpoint_and_asset_host_overrides() {
    let mut map = full_env();
    map.insert("AEM_GRAPHQL_ENDPOINT", "wknd");
    map.insert("WKND_ASSET_HOST", "https://cdn.example.com/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.content_graphql_endpoint, "wknd");
    assert_eq!(cfg.asset_host, "https://cdn.example.com/");
}

#[test]
fn overrides_take_precedence_over_environment() {
    let mut overrides = HashMap::new();
    overrides.insert("WKND_CONTENT_FIXTURE_PATH", "/tmp/adventures.json".to_string());
    overrides.insert("WKND_BIND_ADDR", "127.0.0.1:4000".to_string());

    let config = load_app_config_with_overrides(&overrides).expect("overrides should load");
    assert_eq!(
        config.content_fixture_path.as_deref(),
        Some(std::path::Path::new("/tmp/adventures.json"))
    );
    assert_eq!(config.bind_addr.port(), 4000);
}
