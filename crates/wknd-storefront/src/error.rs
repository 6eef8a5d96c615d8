use thiserror::Error;
use wknd_content::{ContentError, TransformError};
use wknd_core::ConfigError;

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("content source error: {0}")]
    Content(#[from] ContentError),

    #[error("transform error: {0}")]
    Transform(#[from] TransformError),

    #[error("catalog is empty")]
    EmptyCatalog,

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}
