//! Defensive clean-up of upstream values before they reach the screens.

use crate::model::Coordinate;
use url::Url;

/// Golden angle in radians; successive markers never line up.
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Strips whitespace and backticks from an upstream URL string.
///
/// The backend occasionally wraps links in backticks or pads them with spaces and
/// newlines. Returns `None` when nothing usable is left or the result is not an
/// absolute URL.
pub fn sanitize_url(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '`')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    match Url::parse(&cleaned) {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            tracing::debug!(value = %cleaned, error = %e, "Dropping unusable URL");
            None
        }
    }
}

/// Deterministic map position for the record at `position` (golden-angle spiral
/// around `center`, radius growing with the square root of the position).
pub fn spiral_placement(center: Coordinate, spacing: f64, position: usize) -> Coordinate {
    let n = position as f64;
    let radius = spacing * (n + 1.0).sqrt();
    let angle = n * GOLDEN_ANGLE;
    Coordinate::new(
        center.latitude + radius * angle.sin(),
        center.longitude + radius * angle.cos(),
    )
}
