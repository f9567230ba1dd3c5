//! # Restaurant View-Models
//!
//! This module wires the [`Restaurant`] entity into the generic view-model.
//!
//! ## Structure
//!
//! - [`entity`] - [`CollectionEntity`](crate::framework::CollectionEntity) implementation
//!   for [`Restaurant`] (the normalizer) and its [`MapContext`]
//! - [`sanitize`] - URL clean-up and map placement helpers
//! - [`error`] - [`NormalizeError`] and [`RestaurantError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Screens
//!
//! | Screen | Options | Failure message |
//! |--------|---------|-----------------|
//! | Home listing | [`listing_options`] | "Failed to load restaurants" |
//! | Map | [`map_options`] (menu items searchable) | "Failed to load restaurants" |
//! | Detail | [`detail_options`] | "Failed to load restaurant details" |

pub mod entity;
pub mod error;
pub mod sanitize;

pub use entity::MapContext;
pub use error::*;

use crate::framework::{
    CollectionSource, FilterPolicy, ViewModelActor, ViewModelClient, ViewModelOptions,
};
use crate::model::Restaurant;
use std::sync::Arc;

pub const LIST_FAILURE_MESSAGE: &str = "Failed to load restaurants";
pub const DETAIL_FAILURE_MESSAGE: &str = "Failed to load restaurant details";

/// Creates a new Restaurant view-model actor and its client.
pub fn new(
    source: Arc<dyn CollectionSource<Restaurant>>,
    options: ViewModelOptions,
) -> (ViewModelActor<Restaurant>, ViewModelClient<Restaurant>) {
    ViewModelActor::new(source, options)
}

pub fn listing_options(buffer_size: usize) -> ViewModelOptions {
    ViewModelOptions {
        buffer_size,
        failure_message: LIST_FAILURE_MESSAGE.to_string(),
        filter: FilterPolicy::default(),
    }
}

pub fn map_options(buffer_size: usize) -> ViewModelOptions {
    ViewModelOptions {
        buffer_size,
        failure_message: LIST_FAILURE_MESSAGE.to_string(),
        filter: FilterPolicy {
            match_extended_fields: true,
            ..FilterPolicy::default()
        },
    }
}

pub fn detail_options(buffer_size: usize) -> ViewModelOptions {
    ViewModelOptions {
        buffer_size,
        failure_message: DETAIL_FAILURE_MESSAGE.to_string(),
        filter: FilterPolicy::default(),
    }
}
