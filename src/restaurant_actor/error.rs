//! Error types for the Restaurant view-models.

use crate::framework::FrameworkError;
use thiserror::Error;

/// Why a raw restaurant record was rejected by the normalizer.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NormalizeError {
    /// A required field was absent or blank.
    #[error("restaurant {record}: missing required field `{field}`")]
    MissingField { record: String, field: &'static str },

    /// A review's star rating was outside 0..=5.
    #[error("restaurant {record}: review stars {stars} out of range 0..=5")]
    StarsOutOfRange { record: String, stars: i64 },

    /// A menu price was negative or not a finite number.
    #[error("restaurant {record}: invalid price {price} for menu item `{item}`")]
    InvalidPrice { record: String, item: String, price: f64 },
}

/// Errors surfaced by the restaurant clients.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RestaurantError {
    /// An error occurred while communicating with the view-model actor.
    #[error("View-model communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for RestaurantError {
    fn from(e: FrameworkError) -> Self {
        RestaurantError::ActorCommunicationError(e.to_string())
    }
}
