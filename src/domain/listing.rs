//! Listing domain model.
//!
//! A [`Listing`] is the canonical, fully-typed form of one real-estate record.
//! It is produced once by the normalizer at the worker boundary and never
//! mutated afterwards; everything downstream (filtering, pagination, markers,
//! rendering) reads it by reference or clones it whole.

use super::money::PriceChange;
use serde::{Deserialize, Serialize};

/// Image path used when a record carries no images at all.
pub const NO_IMAGE_PATH: &str = "/assets/no-image.png";

/// Directory that bare image identifiers are resolved against.
pub const LOCAL_IMAGE_DIR: &str = "/images";

/// Extension appended to bare image identifiers.
pub const LOCAL_IMAGE_EXT: &str = "jpg";

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// One entry of a listing's price history.
///
/// Entries are kept exactly as the source ordered them. The price is optional
/// because the source occasionally records an event without an amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub price: Option<f64>,
    pub timestamp: Option<String>,
}

/// Direction of a listing's price movement, used to pick a marker icon and
/// the trend glyph on cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceTrend {
    /// Current price is above the original price.
    Up,
    /// Current price is at or below the original price.
    Down,
}

/// A normalized real-estate listing.
///
/// # Fields
///
/// - `id`: unique identifier, positional (`"1"`, `"2"`, ...) when the source
///   had none
/// - `images`: resolved image paths, never empty (holds [`NO_IMAGE_PATH`]
///   when the source had no images)
/// - `main_image`: the path shown on cards before any carousel movement
/// - `original_price` / `current_price`: non-negative, finite, possibly zero
/// - `coordinates`: present only when the source supplied a usable location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub address: String,
    pub description: String,
    pub home_type: String,
    pub status: String,
    pub direction: String,
    pub images: Vec<String>,
    pub main_image: String,
    pub original_price: f64,
    pub current_price: f64,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub coordinates: Option<Coordinates>,
    pub last_updated: String,
    pub price_history: Vec<PricePoint>,
}

impl Listing {
    /// Price used for range filtering and statistics: the current price,
    /// even when it is zero. Normalization already resolved its fallbacks.
    #[must_use]
    pub fn effective_price(&self) -> f64 {
        if self.current_price.is_finite() {
            self.current_price
        } else {
            0.0
        }
    }

    /// Change from the original to the current price.
    #[must_use]
    pub fn price_change(&self) -> PriceChange {
        PriceChange::between(self.original_price, self.current_price)
    }

    #[must_use]
    pub fn trend(&self) -> PriceTrend {
        if self.price_change().is_increase() {
            PriceTrend::Up
        } else {
            PriceTrend::Down
        }
    }

    /// The location segment of the address: the text after the last comma,
    /// trimmed. Used to count distinct locations in the hero statistics.
    ///
    /// ```
    /// let listings = homescout::storage::parse_document(
    ///     r#"{"listings": [{"address": "12 Av. Amazonas, Quito"}]}"#,
    /// )?;
    /// assert_eq!(listings[0].location(), "Quito");
    /// # Ok::<(), homescout::HomescoutError>(())
    /// ```
    #[must_use]
    pub fn location(&self) -> &str {
        self.address
            .rsplit(',')
            .next()
            .map_or("", str::trim)
    }
}

/// Builds a minimal listing for examples and tests.
///
/// Only `id` and the prices are meaningful; every text field is derived from
/// the id so assertions can tell listings apart.
#[cfg(test)]
#[must_use]
pub(crate) fn sample(id: &str, price: f64) -> Listing {
    Listing {
        id: id.to_string(),
        address: format!("{id} Sample Street, Quito"),
        description: format!("Listing {id}"),
        home_type: "House".to_string(),
        status: "For sale".to_string(),
        direction: String::new(),
        images: vec![NO_IMAGE_PATH.to_string()],
        main_image: NO_IMAGE_PATH.to_string(),
        original_price: price,
        current_price: price,
        bedrooms: None,
        bathrooms: None,
        coordinates: None,
        last_updated: String::new(),
        price_history: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_current_price_is_not_replaced_by_original() {
        let mut listing = sample("a", 0.0);
        listing.original_price = 150_000.0;
        assert_eq!(listing.effective_price(), 0.0);

        listing.current_price = f64::NAN;
        assert_eq!(listing.effective_price(), 0.0);
    }

    #[test]
    fn trend_follows_price_change_sign() {
        let mut listing = sample("a", 100.0);
        assert_eq!(listing.trend(), PriceTrend::Down);

        listing.current_price = 120.0;
        assert_eq!(listing.trend(), PriceTrend::Up);

        listing.current_price = 80.0;
        assert_eq!(listing.trend(), PriceTrend::Down);
    }

    #[test]
    fn location_without_comma_is_whole_address() {
        let mut listing = sample("a", 1.0);
        listing.address = "  Cuenca ".to_string();
        assert_eq!(listing.location(), "Cuenca");
    }
}
