//! Restaurant records: the backend's wire shape and the normalized entity.
//!
//! The `Raw*` structs mirror the JSON the backend sends field for field. Every field is
//! optional at this layer so that a missing value reaches the normalizer, which decides
//! whether it is required (and rejects the record) or has a defined default.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Type-safe identifier for Restaurants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RestaurantId(pub u64);

impl From<u64> for RestaurantId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Wire payloads
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRestaurant {
    pub restaurant_id: Option<u64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub phone_number: Option<String>,
    pub thumbnail: Option<String>,
    pub image_links: Option<Vec<String>>,
    pub menu_image_link: Option<String>,
    pub menu_pdf_link: Option<String>,
    pub order: Option<RawOrder>,
    pub total_reviews: Option<u32>,
    pub user_reviews: Option<Vec<RawReview>>,
    pub video_links: Option<Vec<RawVideoLink>>,
    pub cuisine: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawOrder {
    pub menu_items: Option<Vec<RawMenuItem>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMenuItem {
    pub item_id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub image_link: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReview {
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub stars: Option<i64>,
    pub review: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawVideoLink {
    pub link: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

// =============================================================================
// Normalized entity
// =============================================================================

/// A restaurant as the screens consume it.
///
/// Immutable once built: a refetch replaces the whole collection.
///
/// # View-Model
/// This struct implements [`CollectionEntity`](crate::framework::CollectionEntity)
/// (see [`restaurant_actor::entity`](crate::restaurant_actor::entity)), which lets
/// listing, map and detail screens share one [`ViewModelActor`](crate::framework::ViewModelActor).
#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub location: String,
    pub phone: String,
    pub description: String,
    /// Sanitized thumbnail URL.
    pub thumbnail: Option<String>,
    /// Sanitized gallery URLs, in upstream order.
    pub image_links: Vec<String>,
    pub menu_image: Option<String>,
    pub menu_pdf: Option<String>,
    pub menu: Vec<MenuItem>,
    pub reviews: Vec<Review>,
    /// Review count reported by the backend (may exceed `reviews.len()`).
    pub total_reviews: u32,
    pub videos: Vec<VideoLink>,
    pub cuisine: Option<String>,
    pub coordinate: Coordinate,
    pub rating: DisplayRating,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub item_id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub user_id: String,
    pub username: String,
    /// 0 to 5 inclusive.
    pub stars: u8,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoLink {
    pub url: String,
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Rating shown next to a restaurant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayRating {
    /// Mean of all review stars, rounded to one decimal place.
    Rated(f64),
    /// No reviews yet.
    NotAvailable,
}

impl DisplayRating {
    pub fn from_reviews(reviews: &[Review]) -> Self {
        if reviews.is_empty() {
            return Self::NotAvailable;
        }
        let total: u32 = reviews.iter().map(|r| u32::from(r.stars)).sum();
        let mean = f64::from(total) / reviews.len() as f64;
        Self::Rated((mean * 10.0).round() / 10.0)
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Rated(value) => Some(*value),
            Self::NotAvailable => None,
        }
    }
}

impl Display for DisplayRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rated(value) => write!(f, "{:.1}", value),
            Self::NotAvailable => f.write_str("not available"),
        }
    }
}

/// A pin on the map view.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub id: RestaurantId,
    pub title: String,
    pub coordinate: Coordinate,
}

impl From<&Restaurant> for MapMarker {
    fn from(restaurant: &Restaurant) -> Self {
        Self {
            id: restaurant.id,
            title: restaurant.name.clone(),
            coordinate: restaurant.coordinate,
        }
    }
}
