//! # Generic Client
//!
//! The handle through which screens talk to a `ViewModelActor`.

use crate::framework::entity::CollectionEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::{Response, ViewModelRequest};
use crate::framework::state::ViewState;
use tokio::sync::{mpsc, oneshot, watch};

/// A type-safe client for interacting with a `ViewModelActor`.
///
/// * **Cloneable** – holds a request sender and a state receiver, so cloning is cheap.
/// * **Two read paths** – [`snapshot`](Self::snapshot) is ordered after every request
///   sent before it; [`current`](Self::current) and [`subscribe`](Self::subscribe) read
///   the latest published state without a round trip.
#[derive(Clone)]
pub struct ViewModelClient<T: CollectionEntity> {
    sender: mpsc::Sender<ViewModelRequest<T>>,
    state: watch::Receiver<ViewState<T>>,
}

impl<T: CollectionEntity> ViewModelClient<T> {
    pub fn new(
        sender: mpsc::Sender<ViewModelRequest<T>>,
        state: watch::Receiver<ViewState<T>>,
    ) -> Self {
        Self { sender, state }
    }

    async fn request<R>(
        &self,
        make: impl FnOnce(Response<R>) -> ViewModelRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)
    }

    /// Starts the first fetch if none has been issued. Returns the current sequence number.
    pub async fn initialize(&self) -> Result<u64, FrameworkError> {
        self.request(|respond_to| ViewModelRequest::Initialize { respond_to })
            .await
    }

    /// Issues a new fetch. Returns its sequence number.
    pub async fn retry(&self) -> Result<u64, FrameworkError> {
        self.request(|respond_to| ViewModelRequest::Retry { respond_to })
            .await
    }

    /// Replaces the search text and returns the recomputed projection.
    pub async fn set_query(&self, text: impl Into<String>) -> Result<Vec<T>, FrameworkError> {
        let text = text.into();
        self.request(|respond_to| ViewModelRequest::SetQuery { text, respond_to })
            .await
    }

    /// Selects (or clears, with `None`) the category and returns the recomputed projection.
    pub async fn set_category(&self, label: Option<String>) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ViewModelRequest::SetCategory { label, respond_to })
            .await
    }

    pub async fn snapshot(&self) -> Result<ViewState<T>, FrameworkError> {
        self.request(|respond_to| ViewModelRequest::Snapshot { respond_to })
            .await
    }

    /// The most recently published state.
    pub fn current(&self) -> ViewState<T> {
        self.state.borrow().clone()
    }

    /// A receiver notified on every state change, for the presentation layer.
    pub fn subscribe(&self) -> watch::Receiver<ViewState<T>> {
        self.state.clone()
    }

    /// Waits until the latest fetch has resolved and returns that state.
    ///
    /// Never resolves while a request hangs; callers that need a bound should wrap it in
    /// `tokio::time::timeout`.
    pub async fn wait_until_settled(&self) -> Result<ViewState<T>, FrameworkError> {
        let mut state = self.state.clone();
        let settled = state
            .wait_for(|view| view.fetch.is_settled())
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        Ok(settled.clone())
    }
}
