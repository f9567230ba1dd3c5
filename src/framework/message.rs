//! # View-Model Messages
//!
//! Messages exchanged between a `ViewModelClient` and its `ViewModelActor`.

use crate::framework::entity::CollectionEntity;
use crate::framework::error::FetchError;
use crate::framework::state::ViewState;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<T>;

/// Requests sent by clients. Each variant maps to one user-facing operation.
#[derive(Debug)]
pub enum ViewModelRequest<T: CollectionEntity> {
    /// Start the first fetch if the view-model is still idle. Responds with the
    /// sequence number of the current fetch.
    Initialize { respond_to: Response<u64> },
    /// Issue a new fetch. Responds with its sequence number.
    Retry { respond_to: Response<u64> },
    /// Replace the search text. Responds with the new projection.
    SetQuery {
        text: String,
        respond_to: Response<Vec<T>>,
    },
    /// Replace (or clear) the category. Responds with the new projection.
    SetCategory {
        label: Option<String>,
        respond_to: Response<Vec<T>>,
    },
    Snapshot { respond_to: Response<ViewState<T>> },
}

/// Result of a fetch task, reported back to the actor.
#[derive(Debug)]
pub(crate) struct FetchOutcome<T: CollectionEntity> {
    pub seq: u64,
    pub result: Result<Vec<T::Raw>, FetchError>,
}
