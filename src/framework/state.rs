//! # View State
//!
//! The state published by a view-model after every change. The presentation layer reads
//! it through a `tokio::sync::watch` receiver and renders from [`ViewState::projection`].

use crate::framework::filter::Query;

/// Lifecycle of the remote collection.
///
/// Transitions are linear: `Idle → Loading` on initialize or retry, `Loading → Success` or
/// `Loading → Error` when the latest fetch resolves, and `Error → Loading` on retry.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Success(Vec<T>),
    /// User-facing failure message.
    Error(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// `true` once a fetch has resolved, successfully or not.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Error(_))
    }

    /// The canonical collection, only available in `Success`.
    pub fn collection(&self) -> Option<&[T]> {
        match self {
            Self::Success(items) => Some(items),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success(_) => "success",
            Self::Error(_) => "error",
        }
    }
}

/// Snapshot of a view-model.
///
/// `projection` is always a subset of the canonical collection in `Success` and empty
/// in every other state.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<T> {
    pub fetch: FetchState<T>,
    pub projection: Vec<T>,
    pub query: Query,
    /// Sequence number of the latest fetch issued (0 before the first one).
    pub generation: u64,
    /// Completions dropped because a newer fetch had already been issued.
    pub stale_discarded: u64,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            fetch: FetchState::Idle,
            projection: Vec::new(),
            query: Query::default(),
            generation: 0,
            stale_discarded: 0,
        }
    }
}
