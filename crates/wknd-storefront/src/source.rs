//! Where the catalog gets its raw adventure records from.

use std::future::Future;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use wknd_content::{AdventureClient, AdventureListResponse, AdventureRecord, ContentError};
use wknd_core::AppConfig;

/// A provider of raw adventure records.
///
/// Implemented by the remote [`AdventureClient`] and by [`InMemorySource`] for
/// fixtures and tests.
pub trait AdventureSource: Send + Sync {
    /// Every record, in repository order.
    fn fetch_all(&self)
        -> impl Future<Output = Result<Vec<AdventureRecord>, ContentError>> + Send;

    /// One record by repository path; `Ok(None)` when the path is unknown.
    fn fetch_by_path(
        &self,
        path: &str,
    ) -> impl Future<Output = Result<Option<AdventureRecord>, ContentError>> + Send;
}

impl AdventureSource for AdventureClient {
    async fn fetch_all(&self) -> Result<Vec<AdventureRecord>, ContentError> {
        self.fetch_all_adventures().await
    }

    async fn fetch_by_path(&self, path: &str) -> Result<Option<AdventureRecord>, ContentError> {
        self.fetch_adventure_by_path(path).await
    }
}

/// Records held in memory, typically loaded from a saved `adventures-all`
/// response. Counts how often the full listing is requested.
#[derive(Debug, Default)]
pub struct InMemorySource {
    records: Vec<AdventureRecord>,
    fetches: AtomicUsize,
}

impl InMemorySource {
    #[must_use]
    pub fn new(records: Vec<AdventureRecord>) -> Self {
        Self {
            records,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Parses a saved `adventures-all` response body.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Deserialize`] if `body` is not a GraphQL
    /// envelope, or [`ContentError::Graphql`] if it only carries errors.
    pub fn from_json(body: &str) -> Result<Self, ContentError> {
        let response: AdventureListResponse =
            serde_json::from_str(body).map_err(|e| ContentError::Deserialize {
                context: "adventure fixture".to_owned(),
                source: e,
            })?;
        if response.data.is_none() && !response.errors.is_empty() {
            return Err(ContentError::Graphql {
                query: "adventure fixture".to_owned(),
                messages: response.errors.iter().map(|e| e.message.clone()).collect(),
            });
        }
        Ok(Self::new(response.into_items()))
    }

    /// Reads and parses a saved `adventures-all` response from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::FixtureIo`] if the file cannot be read, plus any
    /// error from [`Self::from_json`].
    pub fn from_file(path: &Path) -> Result<Self, ContentError> {
        let body = std::fs::read_to_string(path).map_err(|e| ContentError::FixtureIo {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_json(&body)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of times the full listing has been requested.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }
}

impl AdventureSource for InMemorySource {
    async fn fetch_all(&self) -> Result<Vec<AdventureRecord>, ContentError> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        Ok(self.records.clone())
    }

    async fn fetch_by_path(&self, path: &str) -> Result<Option<AdventureRecord>, ContentError> {
        Ok(self
            .records
            .iter()
            .find(|r| r.path.as_deref() == Some(path))
            .cloned())
    }
}

/// The source selected by configuration: a local fixture file when
/// `WKND_CONTENT_FIXTURE_PATH` is set, the remote repository otherwise.
pub enum ContentSource {
    Remote(AdventureClient),
    Fixture(InMemorySource),
}

impl ContentSource {
    /// # Errors
    ///
    /// Returns [`ContentError::FixtureIo`] or [`ContentError::Deserialize`] for
    /// an unreadable fixture, and [`ContentError::Config`] or
    /// [`ContentError::InvalidHost`] for an unusable remote configuration.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ContentError> {
        if let Some(path) = &config.content_fixture_path {
            let source = InMemorySource::from_file(path)?;
            tracing::info!(
                path = %path.display(),
                count = source.len(),
                "serving adventures from fixture file"
            );
            return Ok(Self::Fixture(source));
        }

        let client = AdventureClient::from_app_config(config)?;
        tracing::info!(
            host = config.content_host.as_deref().unwrap_or_default(),
            endpoint = %config.content_graphql_endpoint,
            "serving adventures from content repository"
        );
        Ok(Self::Remote(client))
    }
}

impl AdventureSource for ContentSource {
    async fn fetch_all(&self) -> Result<Vec<AdventureRecord>, ContentError> {
        match self {
            Self::Remote(client) => client.fetch_all().await,
            Self::Fixture(source) => source.fetch_all().await,
        }
    }

    async fn fetch_by_path(&self, path: &str) -> Result<Option<AdventureRecord>, ContentError> {
        match self {
            Self::Remote(client) => client.fetch_by_path(path).await,
            Self::Fixture(source) => source.fetch_by_path(path).await,
        }
    }
}
