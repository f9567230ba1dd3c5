//! # Framework Errors
//!
//! Common error types shared by every view-model. Transport problems between a client
//! and its actor are [`FrameworkError`]; problems loading the remote collection are
//! [`FetchError`].

use std::error::Error as StdError;

/// Boxed cause preserved inside a [`FetchError`] for logging.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Errors that can occur within the view-model framework itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameworkError {
    #[error("View-model actor closed")]
    ActorClosed,
    #[error("View-model actor dropped response channel")]
    ActorDropped,
}

/// A failed attempt to load the remote collection.
///
/// The original cause is kept as the error `source` so it can be logged in full;
/// the presentation layer only ever sees the view-model's user-facing message.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request could not complete (DNS, connect, TLS, reset, ...).
    #[error("network failure: {0}")]
    Network(#[source] BoxError),

    /// The server answered with a non-2xx status.
    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The body was not valid JSON for the expected payload.
    #[error("malformed response body: {0}")]
    Parse(#[source] BoxError),

    /// The payload parsed but a record was rejected by the entity schema.
    #[error("record rejected by schema: {0}")]
    Schema(#[source] BoxError),
}

impl FetchError {
    pub fn network(e: impl StdError + Send + Sync + 'static) -> Self {
        Self::Network(Box::new(e))
    }

    pub fn parse(e: impl StdError + Send + Sync + 'static) -> Self {
        Self::Parse(Box::new(e))
    }

    pub fn schema(e: impl StdError + Send + Sync + 'static) -> Self {
        Self::Schema(Box::new(e))
    }

    /// Short, stable label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::HttpStatus { .. } => "http_status",
            Self::Parse(_) => "parse",
            Self::Schema(_) => "schema",
        }
    }
}
