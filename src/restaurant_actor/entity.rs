//! CollectionEntity implementation for the Restaurant domain type.
//!
//! This is the entity normalizer: it validates one [`RawRestaurant`] against the schema the
//! screens rely on and builds the immutable [`Restaurant`]. Validation fails closed; a
//! record missing a required field is rejected with a [`NormalizeError`] instead of being
//! rendered with holes in it.

use super::error::NormalizeError;
use super::sanitize::{sanitize_url, spiral_placement};
use crate::framework::CollectionEntity;
use crate::model::{
    Coordinate, DisplayRating, MenuItem, RawMenuItem, RawRestaurant, RawReview, RawVideoLink,
    Restaurant, RestaurantId, Review, VideoLink,
};

/// Context injected into the normalizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapContext {
    /// Where records without coordinates are placed around.
    pub center: Coordinate,
    /// Spiral step in degrees.
    pub spacing: f64,
}

impl Default for MapContext {
    fn default() -> Self {
        Self {
            center: Coordinate::new(28.6304, 77.2177),
            spacing: 0.002,
        }
    }
}

impl CollectionEntity for Restaurant {
    type Id = RestaurantId;
    type Raw = RawRestaurant;
    type Context = MapContext;
    type Error = NormalizeError;

    fn normalize(
        raw: RawRestaurant,
        position: usize,
        ctx: &MapContext,
    ) -> Result<Self, NormalizeError> {
        let id = raw.restaurant_id.map(RestaurantId).ok_or_else(|| NormalizeError::MissingField {
            record: format!("#{}", position),
            field: "restaurant_id",
        })?;
        let record = id.to_string();
        let name = required(raw.name, &record, "name")?;

        let reviews = raw
            .user_reviews
            .unwrap_or_default()
            .into_iter()
            .map(|review| normalize_review(review, &record))
            .collect::<Result<Vec<_>, _>>()?;
        let menu = raw
            .order
            .and_then(|order| order.menu_items)
            .unwrap_or_default()
            .into_iter()
            .map(|item| normalize_menu_item(item, &record))
            .collect::<Result<Vec<_>, _>>()?;

        let coordinate = match (raw.latitude, raw.longitude) {
            (Some(latitude), Some(longitude))
                if Coordinate::new(latitude, longitude).is_valid() =>
            {
                Coordinate::new(latitude, longitude)
            }
            _ => spiral_placement(ctx.center, ctx.spacing, position),
        };

        Ok(Self {
            id,
            name,
            location: raw.location.unwrap_or_default(),
            phone: raw.phone_number.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            thumbnail: raw.thumbnail.as_deref().and_then(sanitize_url),
            image_links: raw
                .image_links
                .unwrap_or_default()
                .iter()
                .filter_map(|link| sanitize_url(link))
                .collect(),
            menu_image: raw.menu_image_link.as_deref().and_then(sanitize_url),
            menu_pdf: raw.menu_pdf_link.as_deref().and_then(sanitize_url),
            menu,
            rating: DisplayRating::from_reviews(&reviews),
            total_reviews: raw.total_reviews.unwrap_or(reviews.len() as u32),
            reviews,
            videos: raw
                .video_links
                .unwrap_or_default()
                .into_iter()
                .filter_map(normalize_video)
                .collect(),
            cuisine: raw
                .cuisine
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            coordinate,
        })
    }

    fn id(&self) -> &RestaurantId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.location, &self.description]
    }

    fn extended_search_fields(&self) -> Vec<&str> {
        self.menu.iter().map(|item| item.name.as_str()).collect()
    }

    fn category(&self) -> Option<&str> {
        self.cuisine.as_deref()
    }
}

fn required(
    value: Option<String>,
    record: &str,
    field: &'static str,
) -> Result<String, NormalizeError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| NormalizeError::MissingField {
            record: record.to_string(),
            field,
        })
}

fn normalize_review(raw: RawReview, record: &str) -> Result<Review, NormalizeError> {
    let stars = raw.stars.ok_or_else(|| NormalizeError::MissingField {
        record: record.to_string(),
        field: "user_reviews.stars",
    })?;
    let stars = u8::try_from(stars)
        .ok()
        .filter(|s| *s <= 5)
        .ok_or_else(|| NormalizeError::StarsOutOfRange {
            record: record.to_string(),
            stars,
        })?;
    Ok(Review {
        user_id: raw.user_id.unwrap_or_default(),
        username: required(raw.username, record, "user_reviews.username")?,
        stars,
        body: raw.review.unwrap_or_default(),
    })
}

fn normalize_menu_item(raw: RawMenuItem, record: &str) -> Result<MenuItem, NormalizeError> {
    let name = required(raw.name, record, "order.menu_items.name")?;
    let price = raw.price.ok_or_else(|| NormalizeError::MissingField {
        record: record.to_string(),
        field: "order.menu_items.price",
    })?;
    if !price.is_finite() || price < 0.0 {
        return Err(NormalizeError::InvalidPrice {
            record: record.to_string(),
            item: name,
            price,
        });
    }
    Ok(MenuItem {
        item_id: raw.item_id.unwrap_or_default(),
        name,
        category: raw.category.unwrap_or_default(),
        price,
        image: raw.image_link.as_deref().and_then(sanitize_url),
    })
}

/// Videos without a usable link are dropped rather than rejected: they are decoration.
fn normalize_video(raw: RawVideoLink) -> Option<VideoLink> {
    let url = raw.link.as_deref().and_then(sanitize_url)?;
    Some(VideoLink {
        url,
        title: raw.title.unwrap_or_default(),
        subtitle: raw.subtitle.unwrap_or_default(),
    })
}
