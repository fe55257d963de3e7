//! Raw record → [`Listing`] normalization.
//!
//! Normalization is total. Every field resolves through a fixed fallback
//! chain, so the worst a malformed record can do is produce a listing made of
//! defaults.

use crate::domain::listing::{LOCAL_IMAGE_DIR, LOCAL_IMAGE_EXT, NO_IMAGE_PATH};
use crate::domain::{Coordinates, Listing, PricePoint};
use crate::storage::models::RawListing;

/// Address shown when the record has none.
pub const UNKNOWN_ADDRESS: &str = "Unknown address";

/// Converts one raw record into a listing. `index` is the record's 0-based
/// position in the document and becomes the id (`index + 1`) when the record
/// carries no usable id.
///
/// # Resolution rules
///
/// - **prices**: the original price is the first history entry's price, else
///   the current price, else 0. The current price is the explicit current
///   price, else the first history entry's price, else 0.
/// - **coordinates**: `coords` when it is a numeric pair; otherwise `lat` and
///   `lng` when both are present and non-zero; otherwise none.
/// - **images**: absolute `http(s)` URLs are kept verbatim, bare identifiers
///   become `/images/<id>.jpg`, and an empty list becomes the single
///   "no image" placeholder.
///
/// # Examples
///
/// ```
/// use homescout::storage::{normalize, RawListing};
///
/// let raw = RawListing {
///     current_price: Some(250_000.0),
///     image_urls: vec!["house-7".to_string()],
///     ..RawListing::default()
/// };
///
/// let listing = normalize(raw, 4);
/// assert_eq!(listing.id, "5");
/// assert_eq!(listing.address, "Unknown address");
/// assert_eq!(listing.main_image, "/images/house-7.jpg");
/// assert_eq!(listing.original_price, 250_000.0);
/// ```
#[must_use]
pub fn normalize(raw: RawListing, index: usize) -> Listing {
    let first_history_price = raw.price_history.first().and_then(|p| p.price);
    let original_price = first_history_price.or(raw.current_price).unwrap_or(0.0);
    let current_price = raw.current_price.or(first_history_price).unwrap_or(0.0);

    let coordinates = resolve_coordinates(&raw);

    let mut images: Vec<String> = raw.image_urls.iter().map(|s| resolve_image(s)).collect();
    if images.is_empty() {
        images.push(NO_IMAGE_PATH.to_string());
    }
    let main_image = images[0].clone();

    let id = raw
        .id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| (index + 1).to_string());

    tracing::trace!(
        id = %id,
        has_coordinates = coordinates.is_some(),
        image_count = raw.image_urls.len(),
        "normalized listing"
    );

    Listing {
        id,
        address: non_empty(raw.address).unwrap_or_else(|| UNKNOWN_ADDRESS.to_string()),
        description: raw.description.unwrap_or_default(),
        home_type: raw.home_type.unwrap_or_default(),
        status: raw.status.unwrap_or_default(),
        direction: raw.direction.unwrap_or_default(),
        images,
        main_image,
        original_price,
        current_price,
        bedrooms: raw.bedrooms,
        bathrooms: raw.bathrooms,
        coordinates,
        last_updated: raw.last_updated.unwrap_or_default(),
        price_history: raw
            .price_history
            .into_iter()
            .map(|p| PricePoint {
                price: p.price,
                timestamp: p.timestamp,
            })
            .collect(),
    }
}

/// Normalizes a whole document's worth of records, assigning positional ids.
#[must_use]
pub fn normalize_all(raw: Vec<RawListing>) -> Vec<Listing> {
    raw.into_iter()
        .enumerate()
        .map(|(index, record)| normalize(record, index))
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn resolve_coordinates(raw: &RawListing) -> Option<Coordinates> {
    if let Some((lat, lng)) = raw.coords {
        return Some(Coordinates::new(lat, lng));
    }
    match (raw.lat, raw.lng) {
        (Some(lat), Some(lng)) if lat != 0.0 && lng != 0.0 => Some(Coordinates::new(lat, lng)),
        _ => None,
    }
}

/// Absolute URLs pass through; anything else is a local image identifier.
///
/// ```
/// use homescout::storage::normalize::resolve_image;
///
/// assert_eq!(resolve_image("HTTPS://cdn.example.com/a.png"), "HTTPS://cdn.example.com/a.png");
/// assert_eq!(resolve_image("kitchen"), "/images/kitchen.jpg");
/// ```
#[must_use]
pub fn resolve_image(identifier: &str) -> String {
    let lower = identifier.get(..8).unwrap_or(identifier).to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        identifier.to_string()
    } else {
        format!("{LOCAL_IMAGE_DIR}/{identifier}.{LOCAL_IMAGE_EXT}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::models::RawPricePoint;

    fn history(prices: &[Option<f64>]) -> Vec<RawPricePoint> {
        prices
            .iter()
            .map(|p| RawPricePoint {
                price: *p,
                timestamp: None,
            })
            .collect()
    }

    #[test]
    fn original_price_prefers_first_history_entry() {
        let raw = RawListing {
            current_price: Some(210_000.0),
            price_history: history(&[Some(200_000.0), Some(205_000.0)]),
            ..RawListing::default()
        };
        let listing = normalize(raw, 0);
        assert_eq!(listing.original_price, 200_000.0);
        assert_eq!(listing.current_price, 210_000.0);
        assert_eq!(listing.price_history.len(), 2);
    }

    #[test]
    fn current_price_falls_back_to_history_then_zero() {
        let raw = RawListing {
            price_history: history(&[Some(99_000.0)]),
            ..RawListing::default()
        };
        let listing = normalize(raw, 0);
        assert_eq!(listing.current_price, 99_000.0);
        assert_eq!(listing.original_price, 99_000.0);

        let listing = normalize(RawListing::default(), 0);
        assert_eq!(listing.current_price, 0.0);
        assert_eq!(listing.original_price, 0.0);
    }

    #[test]
    fn history_entry_without_price_is_skipped_for_fallbacks() {
        let raw = RawListing {
            current_price: Some(120_000.0),
            price_history: history(&[None, Some(100_000.0)]),
            ..RawListing::default()
        };
        assert_eq!(normalize(raw, 0).original_price, 120_000.0);
    }

    #[test]
    fn missing_images_use_placeholder() {
        let listing = normalize(RawListing::default(), 0);
        assert_eq!(listing.images, vec![NO_IMAGE_PATH.to_string()]);
        assert_eq!(listing.main_image, NO_IMAGE_PATH);
    }

    #[test]
    fn mixed_images_resolve_individually() {
        let raw = RawListing {
            image_urls: vec!["http://x.test/a.jpg".to_string(), "b".to_string()],
            ..RawListing::default()
        };
        let listing = normalize(raw, 0);
        assert_eq!(listing.main_image, "http://x.test/a.jpg");
        assert_eq!(listing.images[1], "/images/b.jpg");
    }

    #[test]
    fn coordinates_prefer_pair_then_lat_lng() {
        let raw = RawListing {
            coords: Some((-2.17, -79.92)),
            lat: Some(1.0),
            lng: Some(1.0),
            ..RawListing::default()
        };
        assert_eq!(normalize(raw, 0).coordinates, Some(Coordinates::new(-2.17, -79.92)));

        let raw = RawListing {
            lat: Some(-0.18),
            lng: Some(-78.47),
            ..RawListing::default()
        };
        assert_eq!(normalize(raw, 0).coordinates, Some(Coordinates::new(-0.18, -78.47)));

        let raw = RawListing {
            lat: Some(0.0),
            lng: Some(-78.47),
            ..RawListing::default()
        };
        assert_eq!(normalize(raw, 0).coordinates, None);
    }

    #[test]
    fn empty_id_and_blank_address_fall_back() {
        let raw = RawListing {
            id: Some(String::new()),
            address: Some("   ".to_string()),
            ..RawListing::default()
        };
        let listing = normalize(raw, 2);
        assert_eq!(listing.id, "3");
        assert_eq!(listing.address, UNKNOWN_ADDRESS);
    }

    #[test]
    fn whitespace_id_is_kept() {
        let raw = RawListing {
            id: Some("  ".to_string()),
            ..RawListing::default()
        };
        assert_eq!(normalize(raw, 2).id, "  ");
    }

    #[test]
    fn normalize_all_numbers_from_one() {
        let listings = normalize_all(vec![RawListing::default(), RawListing::default()]);
        let ids: Vec<&str> = listings.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }
}
