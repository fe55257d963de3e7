//! Domain layer for the Homescout plugin.
//!
//! This module contains the listing model and the pure engines that operate on
//! it, independent of Zellij APIs, storage formats, or rendering. Nothing in
//! here performs I/O.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`listing`]: Normalized listing model
//! - [`money`]: Currency formatting and price-change arithmetic
//! - [`filter`]: Filter spec and the filter engine
//! - [`pagination`]: Fixed-size pages with clamped navigation
//!
//! # Examples
//!
//! ```
//! use homescout::domain::{apply, paginate, FilterSpec, PriceRange, PAGE_SIZE};
//! use homescout::storage::parse_document;
//!
//! let listings = parse_document(
//!     r#"{"listings": [{"id": "1", "currentPrice": 150000}, {"id": "2", "currentPrice": 250000}]}"#,
//! )?;
//! let spec = FilterSpec {
//!     price_range: PriceRange::new(200_000.0, 400_000.0),
//!     ..FilterSpec::default()
//! };
//!
//! let filtered = apply(&listings, &spec);
//! let page = paginate(&filtered, 1, PAGE_SIZE);
//! assert_eq!(page.items.len(), 1);
//! assert_eq!(page.items[0].id, "2");
//! # Ok::<(), homescout::HomescoutError>(())
//! ```

pub mod error;
pub mod filter;
pub mod listing;
pub mod money;
pub mod pagination;

pub use error::{HomescoutError, Result};
pub use filter::{apply, max_observed_price, FilterSpec, PriceRange};
pub use listing::{Coordinates, Listing, PricePoint, PriceTrend};
pub use money::{format_usd, PriceChange};
pub use pagination::{paginate, Page, PageNav, PAGE_SIZE};
