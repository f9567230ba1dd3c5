//! # CollectionEntity Trait
//!
//! The `CollectionEntity` trait defines the contract that every remotely fetched record
//! (restaurants today) must implement to be managed by the generic `ViewModelActor`.
//! It specifies the raw wire payload, the normalization context, the error produced when a
//! record is rejected, and the fields the filter engine searches.
//!
//! # Architecture Note
//! The home listing, the map and the detail page all follow the same fetch → normalize →
//! filter → render loop. Writing that loop once against this trait means each screen only
//! supplies a [`CollectionSource`](crate::framework::CollectionSource) and a set of
//! [`ViewModelOptions`](crate::framework::ViewModelOptions).

use serde::de::DeserializeOwned;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any remotely loaded entity must implement to be managed by `ViewModelActor`.
///
/// # Context
/// `Context` is injected into [`normalize`](CollectionEntity::normalize) by the actor's
/// `run()` method, the same late binding the actor uses for every other dependency.
pub trait CollectionEntity: Clone + Send + Sync + Debug + 'static {
    /// Stable identifier of the record.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The record exactly as the remote API sends it.
    type Raw: DeserializeOwned + Send + Debug + 'static;

    /// Read-only data needed to normalize records (e.g. a map centre).
    /// Use `()` if nothing is needed.
    type Context: Send + Sync + 'static;

    /// Why a raw record was rejected.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Validate one raw record and convert it into the internal shape.
    ///
    /// `position` is the record's index in the fetched list.
    fn normalize(raw: Self::Raw, position: usize, ctx: &Self::Context) -> Result<Self, Self::Error>;

    /// Normalize a whole payload. Fails closed on the first rejected record.
    fn normalize_all(raws: Vec<Self::Raw>, ctx: &Self::Context) -> Result<Vec<Self>, Self::Error> {
        raws.into_iter()
            .enumerate()
            .map(|(position, raw)| Self::normalize(raw, position, ctx))
            .collect()
    }

    fn id(&self) -> &Self::Id;

    /// Fields matched by a free-text query.
    fn search_fields(&self) -> Vec<&str>;

    /// Additional fields matched only when the filter policy asks for them.
    fn extended_search_fields(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Category / cuisine label matched by a category filter.
    fn category(&self) -> Option<&str> {
        None
    }
}
