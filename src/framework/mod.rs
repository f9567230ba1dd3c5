//! Generic remote-collection view-model.
//!
//! This module provides the building blocks every list-like screen is made of: a remote
//! source, a normalizer, a filter engine and a controller that ties them together.
//!
//! # Main Components
//!
//! - [`CollectionEntity`] - Trait that remotely loaded types implement
//! - [`CollectionSource`] - Where the raw records come from
//! - [`ViewModelActor`] - The controller, one actor task per screen
//! - [`ViewModelClient`] - Type-safe handle for sending requests and reading state
//! - [`filter()`] - The pure filter engine
//! - [`FrameworkError`] / [`FetchError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] for a scripted source that needs no HTTP.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod filter;
pub mod message;
pub mod mock;
pub mod source;
pub mod state;

// Re-export core types for convenience
pub use actor::{ViewModelActor, ViewModelOptions};
pub use client::ViewModelClient;
pub use entity::CollectionEntity;
pub use error::{BoxError, FetchError, FrameworkError};
pub use filter::{filter, CategoryFallback, FilterPolicy, Query};
pub use message::{Response, ViewModelRequest};
pub use source::CollectionSource;
pub use state::{FetchState, ViewState};
