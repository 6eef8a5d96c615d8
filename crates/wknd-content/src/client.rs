//! HTTP client for the content repository's persisted GraphQL queries.

use std::time::{Duration, Instant};

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use wknd_core::{AppConfig, ConfigError};

use crate::error::ContentError;
use crate::retry::retry_with_backoff;
use crate::types::{
    AdventureByPathResponse, AdventureListResponse, AdventureRecord, GraphqlResponse,
};

/// Persisted query returning every adventure.
pub const ADVENTURES_ALL_QUERY: &str = "adventures-all";

/// Persisted query returning one adventure by repository path.
pub const ADVENTURE_BY_PATH_QUERY: &str = "adventure-by-path";

/// Characters escaped in persisted-query parameter values. `/` must be
/// escaped because parameters are carried in the URL path.
const PARAM_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Client for adventure content stored in an AEM-style content repository.
///
/// Queries are executed as persisted queries:
/// `GET {host}/graphql/execute.json/{endpoint}/{query}[;param=value]`.
/// Non-2xx responses are mapped to typed errors. Transient failures are
/// retried only when `max_retries > 0`.
pub struct AdventureClient {
    client: Client,
    base_url: Url,
    endpoint: String,
    auth_token: Option<String>,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl AdventureClient {
    /// Creates a client for `host` (e.g. `https://publish.example.com`) and the
    /// persisted-query namespace `endpoint` (e.g. `wknd-shared`).
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidHost`] if `host` is not an absolute URL,
    /// or [`ContentError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        host: &str,
        endpoint: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ContentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // A trailing slash makes `Url::join` append instead of replacing the
        // last path segment of hosts mounted under a prefix.
        let normalised = format!("{}/", host.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ContentError::InvalidHost {
            host: host.to_owned(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ContentError::InvalidHost {
                host: host.to_owned(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url,
            endpoint: endpoint.trim_matches('/').to_owned(),
            auth_token: None,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Sends `Authorization: Bearer <token>` with every query.
    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Builds a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Config`] when no content host is configured,
    /// plus any error from [`Self::new`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ContentError> {
        let host = config
            .content_host
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("AEM_HOST".to_owned()))?;
        let client = Self::new(
            host,
            &config.content_graphql_endpoint,
            config.content_request_timeout_secs,
            &config.content_user_agent,
            config.content_max_retries,
            config.content_retry_backoff_base_secs,
        )?;
        Ok(match &config.content_auth_token {
            Some(token) => client.with_auth_token(token.clone()),
            None => client,
        })
    }

    /// Builds a client from the process environment (and `.env`).
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Config`] if the environment is incomplete or
    /// invalid, plus any error from [`Self::new`].
    pub fn from_env() -> Result<Self, ContentError> {
        let config = wknd_core::load_app_config()?;
        Self::from_app_config(&config)
    }

    /// Fetches every adventure, in repository order.
    ///
    /// A response without an adventure listing yields an empty list.
    ///
    /// # Errors
    ///
    /// - [`ContentError::Graphql`]: the query returned errors and no data.
    /// - [`ContentError::RateLimited`], [`ContentError::NotFound`],
    ///   [`ContentError::UnexpectedStatus`]: non-2xx HTTP status.
    /// - [`ContentError::Http`]: network or TLS failure.
    /// - [`ContentError::Deserialize`]: body is not the expected JSON.
    pub async fn fetch_all_adventures(&self) -> Result<Vec<AdventureRecord>, ContentError> {
        let url = self.query_url(ADVENTURES_ALL_QUERY, &[])?;
        let start = Instant::now();
        let response: AdventureListResponse = self.get_json(&url, ADVENTURES_ALL_QUERY).await?;
        Self::check_graphql_errors(ADVENTURES_ALL_QUERY, &response)?;
        let items = response.into_items();

        tracing::info!(
            count = items.len(),
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "fetched adventure list"
        );
        Ok(items)
    }

    /// Fetches one adventure by its repository path. An unknown path yields
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_all_adventures`].
    pub async fn fetch_adventure_by_path(
        &self,
        path: &str,
    ) -> Result<Option<AdventureRecord>, ContentError> {
        let url = self.query_url(ADVENTURE_BY_PATH_QUERY, &[("adventurePath", path)])?;
        let response: AdventureByPathResponse =
            self.get_json(&url, ADVENTURE_BY_PATH_QUERY).await?;
        Self::check_graphql_errors(ADVENTURE_BY_PATH_QUERY, &response)?;

        let item = response
            .data
            .and_then(|d| d.adventure_by_path)
            .and_then(|a| a.item);
        tracing::debug!(path, found = item.is_some(), "fetched adventure by path");
        Ok(item)
    }

    /// Builds the persisted-query URL for `query` with `;name=value` parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidHost`] if the joined URL is invalid.
    pub(crate) fn query_url(
        &self,
        query: &str,
        params: &[(&str, &str)],
    ) -> Result<String, ContentError> {
        let mut relative = format!("graphql/execute.json/{}/{query}", self.endpoint);
        for (name, value) in params {
            relative.push(';');
            relative.push_str(name);
            relative.push('=');
            relative.extend(utf8_percent_encode(value, PARAM_VALUE));
        }

        self.base_url
            .join(&relative)
            .map(|u| u.to_string())
            .map_err(|e| ContentError::InvalidHost {
                host: self.base_url.to_string(),
                reason: format!("cannot build query URL for {query}: {e}"),
            })
    }

    fn check_graphql_errors<T>(
        query: &str,
        response: &GraphqlResponse<T>,
    ) -> Result<(), ContentError> {
        if response.errors.is_empty() {
            return Ok(());
        }
        let messages: Vec<String> = response.errors.iter().map(|e| e.message.clone()).collect();
        if response.data.is_none() {
            return Err(ContentError::Graphql {
                query: query.to_owned(),
                messages,
            });
        }
        tracing::warn!(query, ?messages, "GraphQL query returned partial data");
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &str,
    ) -> Result<GraphqlResponse<T>, ContentError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.to_owned();
            async move {
                let mut request = self
                    .client
                    .get(&url)
                    .header(reqwest::header::ACCEPT, "application/json");
                if let Some(token) = &self.auth_token {
                    request = request.bearer_auth(token);
                }

                let response = request.send().await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(ContentError::RateLimited {
                        host: self.base_url.host_str().unwrap_or_default().to_owned(),
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(ContentError::NotFound { url });
                }

                if !status.is_success() {
                    return Err(ContentError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                let body = response.text().await?;
                serde_json::from_str::<GraphqlResponse<T>>(&body).map_err(|e| {
                    ContentError::Deserialize {
                        context: format!("{query} response from {url}"),
                        source: e,
                    }
                })
            }
        })
        .await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
