//! Listing filter engine.
//!
//! [`apply`] is the only way the filtered listing set is produced. It is a
//! pure function of the full listing set and a [`FilterSpec`]: the result is
//! always an order-preserving subsequence of the input, and applying the same
//! spec twice changes nothing.
//!
//! A listing passes when every criterion holds:
//!
//! - **search**: the term is empty, or it appears (case-insensitively) in the
//!   address or the description
//! - **price**: [`Listing::effective_price`] lies within the range, bounds
//!   inclusive
//! - **bedrooms / bathrooms**: the filter is unset, or the count matches
//!   exactly (a listing with an unknown count never matches a set filter)

use super::listing::Listing;
use serde::{Deserialize, Serialize};

/// Upper price bound used before any listing has been loaded.
pub const DEFAULT_MAX_PRICE: f64 = 2_000_000.0;

/// An inclusive price interval with `min <= max` guaranteed.
///
/// Both bounds are non-negative and finite. Constructors and adjusters clamp
/// their input instead of rejecting it, so a committed range is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    min: f64,
    max: f64,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: DEFAULT_MAX_PRICE,
        }
    }
}

impl PriceRange {
    /// Builds a range from two bounds given in any order.
    ///
    /// ```
    /// use homescout::domain::PriceRange;
    ///
    /// let range = PriceRange::new(300_000.0, 100_000.0);
    /// assert_eq!(range.min(), 100_000.0);
    /// assert_eq!(range.max(), 300_000.0);
    /// ```
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        let a = sanitize(a);
        let b = sanitize(b);
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// The range `[0, max]`, used once the highest observed price is known.
    #[must_use]
    pub fn up_to(max: f64) -> Self {
        Self::new(0.0, max)
    }

    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Replaces the lower bound, clamped so it never exceeds the upper bound.
    #[must_use]
    pub fn with_min(self, min: f64) -> Self {
        Self {
            min: sanitize(min).min(self.max),
            max: self.max,
        }
    }

    /// Replaces the upper bound, clamped so it never drops below the lower
    /// bound.
    #[must_use]
    pub fn with_max(self, max: f64) -> Self {
        Self {
            min: self.min,
            max: sanitize(max).max(self.min),
        }
    }

    #[must_use]
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// User-controlled filter criteria.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub search_term: String,
    pub price_range: PriceRange,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
}

impl FilterSpec {
    /// Filter state after "clear filters": empty search, no room filters and
    /// the full `[0, max_observed_price]` range.
    #[must_use]
    pub fn cleared(max_observed_price: f64) -> Self {
        Self {
            price_range: PriceRange::up_to(max_observed_price),
            ..Self::default()
        }
    }

    /// Whether a single listing passes every criterion.
    #[must_use]
    pub fn matches(&self, listing: &Listing) -> bool {
        self.passes(listing, &self.search_term.to_lowercase())
    }

    // `needle` is the lowercased search term, computed once per pass.
    fn passes(&self, listing: &Listing, needle: &str) -> bool {
        let search_ok = needle.is_empty()
            || listing.address.to_lowercase().contains(needle)
            || listing.description.to_lowercase().contains(needle);

        search_ok
            && self.price_range.contains(listing.effective_price())
            && self.bedrooms.map_or(true, |n| listing.bedrooms == Some(n))
            && self.bathrooms.map_or(true, |n| listing.bathrooms == Some(n))
    }
}

/// Returns the listings that pass `spec`, in their original order.
#[must_use]
pub fn apply(listings: &[Listing], spec: &FilterSpec) -> Vec<Listing> {
    let _span = tracing::debug_span!(
        "apply_filters",
        total_listings = listings.len(),
        term_len = spec.search_term.len(),
        bedrooms = ?spec.bedrooms,
        bathrooms = ?spec.bathrooms,
    )
    .entered();

    let needle = spec.search_term.to_lowercase();
    let filtered: Vec<Listing> = listings
        .iter()
        .filter(|listing| spec.passes(listing, &needle))
        .cloned()
        .collect();

    tracing::debug!(filtered_count = filtered.len(), "filters applied");
    filtered
}

/// Highest current price in `listings`, or zero for an empty set.
#[must_use]
pub fn max_observed_price(listings: &[Listing]) -> f64 {
    listings
        .iter()
        .map(Listing::effective_price)
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::listing::sample;

    fn priced(prices: &[(&str, f64)]) -> Vec<Listing> {
        prices.iter().map(|(id, p)| sample(id, *p)).collect()
    }

    fn ids(listings: &[Listing]) -> Vec<&str> {
        listings.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn price_range_is_inclusive() {
        let listings = priced(&[("A", 150_000.0), ("B", 250_000.0), ("C", 450_000.0)]);
        let spec = FilterSpec {
            price_range: PriceRange::new(200_000.0, 400_000.0),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&apply(&listings, &spec)), vec!["B"]);

        let spec = FilterSpec {
            price_range: PriceRange::new(150_000.0, 450_000.0),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&apply(&listings, &spec)), vec!["A", "B", "C"]);
    }

    #[test]
    fn bedroom_filter_requires_exact_count() {
        let mut listings = priced(&[("A", 1.0), ("B", 1.0), ("C", 1.0), ("D", 1.0)]);
        listings[0].bedrooms = Some(2);
        listings[1].bedrooms = Some(3);
        listings[2].bedrooms = None;
        listings[3].bedrooms = Some(3);

        let spec = FilterSpec {
            bedrooms: Some(3),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&apply(&listings, &spec)), vec!["B", "D"]);
    }

    #[test]
    fn search_matches_address_or_description_case_insensitively() {
        let mut listings = priced(&[("A", 1.0), ("B", 1.0), ("C", 1.0)]);
        listings[0].address = "Av. Samborondón, Guayaquil".to_string();
        listings[1].description = "Casa cerca de GUAYAQUIL".to_string();

        let spec = FilterSpec {
            search_term: "guayaquil".to_string(),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&apply(&listings, &spec)), vec!["A", "B"]);
    }

    #[test]
    fn zero_current_price_filters_as_zero() {
        let listings = crate::storage::parse_document(
            r#"{"listings": [{"id": "free", "currentPrice": 0, "priceHistory": [{"price": 300000}]}]}"#,
        )
        .unwrap();
        assert_eq!(listings[0].original_price, 300_000.0);

        let spec = FilterSpec {
            price_range: PriceRange::new(0.0, 100_000.0),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&apply(&listings, &spec)), vec!["free"]);
        assert_eq!(max_observed_price(&listings), 0.0);
    }

    #[test]
    fn adjusting_bounds_keeps_min_below_max() {
        let range = PriceRange::new(100.0, 200.0);
        assert_eq!(range.with_min(500.0), PriceRange::new(200.0, 200.0));
        assert_eq!(range.with_max(50.0), PriceRange::new(100.0, 100.0));
        assert_eq!(range.with_min(-10.0).min(), 0.0);
        assert_eq!(range.with_max(f64::NAN).max(), 100.0);
    }

    #[test]
    fn cleared_spec_spans_observed_prices() {
        let listings = priced(&[("A", 90_000.0), ("B", 620_000.0)]);
        let spec = FilterSpec::cleared(max_observed_price(&listings));
        assert_eq!(spec.price_range, PriceRange::new(0.0, 620_000.0));
        assert!(spec.search_term.is_empty());
        assert_eq!(spec.bedrooms, None);
        assert_eq!(spec.bathrooms, None);
        assert_eq!(apply(&listings, &spec), listings);
    }

    mod proptest_filter {
        use super::*;
        use proptest::prelude::*;

        fn arb_listing() -> impl Strategy<Value = Listing> {
            (
                0u32..1000,
                0.0f64..1_000_000.0,
                proptest::option::of(0u32..6),
                proptest::option::of(0u32..4),
                "[a-z ]{0,12}",
            )
                .prop_map(|(id, price, bedrooms, bathrooms, text)| {
                    let mut listing = sample(&id.to_string(), price);
                    listing.bedrooms = bedrooms;
                    listing.bathrooms = bathrooms;
                    listing.description = text;
                    listing
                })
        }

        fn arb_spec() -> impl Strategy<Value = FilterSpec> {
            (
                "[a-z]{0,2}",
                0.0f64..1_000_000.0,
                0.0f64..1_000_000.0,
                proptest::option::of(0u32..6),
                proptest::option::of(0u32..4),
            )
                .prop_map(|(search_term, a, b, bedrooms, bathrooms)| FilterSpec {
                    search_term,
                    price_range: PriceRange::new(a, b),
                    bedrooms,
                    bathrooms,
                })
        }

        proptest! {
            #[test]
            fn prop_result_is_ordered_subsequence(
                listings in proptest::collection::vec(arb_listing(), 0..40),
                spec in arb_spec(),
            ) {
                let filtered = apply(&listings, &spec);
                let mut remaining = listings.iter();
                for kept in &filtered {
                    prop_assert!(remaining.any(|l| l == kept));
                }
            }

            #[test]
            fn prop_apply_is_idempotent(
                listings in proptest::collection::vec(arb_listing(), 0..40),
                spec in arb_spec(),
            ) {
                let once = apply(&listings, &spec);
                let twice = apply(&once, &spec);
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn prop_apply_agrees_with_matches(
                listings in proptest::collection::vec(arb_listing(), 0..40),
                spec in arb_spec(),
            ) {
                let expected = listings.iter().filter(|l| spec.matches(l)).count();
                prop_assert_eq!(apply(&listings, &spec).len(), expected);
            }

            #[test]
            fn prop_range_bounds_stay_ordered(a in -1e7f64..1e7, b in -1e7f64..1e7, c in -1e7f64..1e7) {
                let range = PriceRange::new(a, b).with_min(c);
                prop_assert!(range.min() <= range.max());
                let range = PriceRange::new(a, b).with_max(c);
                prop_assert!(range.min() <= range.max());
            }
        }
    }
}
