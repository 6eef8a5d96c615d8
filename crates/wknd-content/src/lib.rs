pub mod client;
pub mod error;
mod retry;
pub mod transform;
pub mod types;

pub use client::AdventureClient;
pub use error::{ContentError, TransformError};
pub use transform::transform_adventure;
pub use types::{AdventureListResponse, AdventureRecord};
