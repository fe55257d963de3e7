//! Listing source abstraction.
//!
//! This module defines the [`ListingSource`] trait that abstracts over where
//! the listings document comes from. The worker only needs one operation:
//! produce the full normalized listing set.

use crate::domain::error::Result;
use crate::domain::Listing;

/// Abstraction over listing data sources.
///
/// # Implementations
///
/// - [`JsonListingSource`](crate::storage::JsonListingSource): reads a JSON
///   document from disk
///
/// # Examples
///
/// ```no_run
/// use homescout::storage::{JsonListingSource, ListingSource};
/// use std::path::PathBuf;
///
/// let source = JsonListingSource::new(PathBuf::from("/host/listings.json"));
/// let listings = source.load()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait ListingSource: Send {
    /// Loads and normalizes every listing in the source.
    ///
    /// Individual malformed records never fail the load; they normalize to
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or is not a JSON
    /// document at all.
    fn load(&self) -> Result<Vec<Listing>>;
}
