use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub storefront_path: PathBuf,
    /// Origin of the content repository, e.g. `https://publish.example.com`.
    /// Not needed when `content_fixture_path` is set.
    pub content_host: Option<String>,
    /// Persisted-query namespace, e.g. `wknd-shared`.
    pub content_graphql_endpoint: String,
    pub content_auth_token: Option<String>,
    /// Local dump of the adventure listing used instead of the remote repository.
    pub content_fixture_path: Option<PathBuf>,
    /// Host prepended to repository image paths.
    pub asset_host: String,
    pub catalog_revalidate_secs: u64,
    pub content_request_timeout_secs: u64,
    pub content_user_agent: String,
    pub content_max_retries: u32,
    pub content_retry_backoff_base_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("storefront_path", &self.storefront_path)
            .field("content_host", &self.content_host)
            .field("content_graphql_endpoint", &self.content_graphql_endpoint)
            .field(
                "content_auth_token",
                &self.content_auth_token.as_ref().map(|_| "[redacted]"),
            )
            .field("content_fixture_path", &self.content_fixture_path)
            .field("asset_host", &self.asset_host)
            .field("catalog_revalidate_secs", &self.catalog_revalidate_secs)
            .field(
                "content_request_timeout_secs",
                &self.content_request_timeout_secs,
            )
            .field("content_user_agent", &self.content_user_agent)
            .field("content_max_retries", &self.content_max_retries)
            .field(
                "content_retry_backoff_base_secs",
                &self.content_retry_backoff_base_secs,
            )
            .finish()
    }
}
