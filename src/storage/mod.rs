//! Storage layer for the listings document.
//!
//! This module reads the static listings document and turns it into domain
//! listings. It is used from the worker thread only.
//!
//! # Modules
//!
//! - `backend`: [`ListingSource`] trait for data source implementations
//! - `json`: JSON file source and document parser
//! - `models`: Lenient raw record types mirroring the input JSON
//! - `normalize`: Raw record → `Listing` conversion

pub mod backend;
pub mod json;
pub mod models;
pub mod normalize;

pub use backend::ListingSource;
pub use json::{parse_document, JsonListingSource};
pub use models::{RawDocument, RawListing, RawPricePoint};
pub use normalize::{normalize, normalize_all};
