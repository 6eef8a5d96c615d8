use std::collections::HashMap;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Image host used by the WKND publish tier.
pub const DEFAULT_ASSET_HOST: &str = "https://publish-p64257-e147834-cmstg.adobeaemcloud.com/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid, or if neither a content host
/// nor a content fixture is configured.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid or no content source is configured.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Like [`load_app_config`], but values in `overrides` (keyed by environment
/// variable name) take precedence over the environment.
///
/// # Errors
///
/// Same as [`load_app_config`].
pub fn load_app_config_with_overrides(
    overrides: &HashMap<&str, String>,
) -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_app_config(|key| {
        overrides
            .get(key)
            .cloned()
            .map_or_else(|| std::env::var(key), Ok)
    })
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it from a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let content_host = optional("AEM_HOST");
    let content_fixture_path = optional("WKND_CONTENT_FIXTURE_PATH").map(PathBuf::from);
    if content_host.is_none() && content_fixture_path.is_none() {
        return Err(ConfigError::MissingEnvVar("AEM_HOST".to_string()));
    }

    let env = parse_environment(&or_default("WKND_ENV", "development"));
    let bind_addr = parse_addr("WKND_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("WKND_LOG_LEVEL", "info");
    let storefront_path = PathBuf::from(or_default(
        "WKND_STOREFRONT_PATH",
        "./config/storefront.yaml",
    ));

    let content_graphql_endpoint = or_default("AEM_GRAPHQL_ENDPOINT", "wknd-shared");
    let content_auth_token = optional("AEM_AUTH_TOKEN");
    let asset_host = or_default("WKND_ASSET_HOST", DEFAULT_ASSET_HOST);

    let catalog_revalidate_secs = parse_u64("WKND_CATALOG_REVALIDATE_SECS", "3600")?;
    let content_request_timeout_secs = parse_u64("WKND_CONTENT_REQUEST_TIMEOUT_SECS", "30")?;
    let content_user_agent = or_default("WKND_CONTENT_USER_AGENT", "wknd-storefront/0.1");
    let content_max_retries = parse_u32("WKND_CONTENT_MAX_RETRIES", "0")?;
    let content_retry_backoff_base_secs =
        parse_u64("WKND_CONTENT_RETRY_BACKOFF_BASE_SECS", "1")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        storefront_path,
        content_host,
        content_graphql_endpoint,
        content_auth_token,
        content_fixture_path,
        asset_host,
        catalog_revalidate_secs,
        content_request_timeout_secs,
        content_user_agent,
        content_max_retries,
        content_retry_backoff_base_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
