use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by {host} (retry after {retry_after_secs}s)")]
    RateLimited { host: String, retry_after_secs: u64 },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("GraphQL query {query} failed: {}", messages.join("; "))]
    Graphql {
        query: String,
        messages: Vec<String>,
    },

    #[error("invalid content host \"{host}\": {reason}")]
    InvalidHost { host: String, reason: String },

    #[error("failed to read content fixture {path}: {source}")]
    FixtureIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] wknd_core::ConfigError),
}

/// Failures while mapping one adventure record onto a product.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("adventure {path} is missing required field `{field}`")]
    MissingField { path: String, field: &'static str },

    #[error("adventure {path} has unparseable price \"{price}\"")]
    InvalidPrice { path: String, price: String },
}
