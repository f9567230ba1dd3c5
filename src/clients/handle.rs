use crate::framework::{CollectionEntity, FrameworkError, ViewModelClient, ViewState};
use async_trait::async_trait;

/// Trait for screen-specific clients to inherit the standard view-model operations.
///
/// Implementors supply the inner [`ViewModelClient`] and an error mapping; lifecycle
/// calls come for free.
#[async_trait]
pub trait ViewModelHandle<T: CollectionEntity>: Send + Sync {
    /// The screen-specific error type.
    type Error: Send + Sync;

    fn inner(&self) -> &ViewModelClient<T>;

    /// Map framework errors to the screen-specific error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Issue the first fetch (no-op once a fetch has been issued).
    #[tracing::instrument(skip(self))]
    async fn initialize(&self) -> Result<u64, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().initialize().await.map_err(Self::map_error)
    }

    /// Re-issue the fetch; the newest one wins.
    #[tracing::instrument(skip(self))]
    async fn retry(&self) -> Result<u64, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().retry().await.map_err(Self::map_error)
    }

    async fn snapshot(&self) -> Result<ViewState<T>, Self::Error> {
        self.inner().snapshot().await.map_err(Self::map_error)
    }

    async fn wait_until_settled(&self) -> Result<ViewState<T>, Self::Error> {
        self.inner()
            .wait_until_settled()
            .await
            .map_err(Self::map_error)
    }
}
