//! # Collection Sources
//!
//! A [`CollectionSource`] is the seam between a view-model and the HTTP client. The actor
//! only knows how to call `fetch()`; which endpoint is hit, and with which credentials, is
//! the source's business.

use crate::framework::entity::CollectionEntity;
use crate::framework::error::FetchError;
use async_trait::async_trait;

/// Loads the raw records for one view-model.
///
/// Implementations must not retry on their own; retry is always caller-initiated.
#[async_trait]
pub trait CollectionSource<T: CollectionEntity>: Send + Sync + 'static {
    async fn fetch(&self) -> Result<Vec<T::Raw>, FetchError>;

    /// Human-readable description used in log fields (e.g. the request path).
    fn describe(&self) -> String;
}
