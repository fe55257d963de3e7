//! JSON file listing source.
//!
//! Reads the listings document in one go and normalizes it. The document is
//! treated as read-only; nothing is ever written back.

use crate::domain::error::{HomescoutError, Result};
use crate::domain::Listing;
use crate::storage::backend::ListingSource;
use crate::storage::models::{RawDocument, RawListing};
use crate::storage::normalize::normalize_all;
use std::path::{Path, PathBuf};

/// Listing source backed by a JSON file.
///
/// # File Format
///
/// ```json
/// {
///   "listings": [
///     {
///       "id": "q-101",
///       "address": "Av. 6 de Diciembre, Quito",
///       "imageUrls": ["q-101-front"],
///       "coords": [-0.18, -78.47],
///       "currentPrice": 185000,
///       "bedrooms": 3,
///       "priceHistory": [{ "price": 199000, "timestamp": "2024-03-01T00:00:00Z" }]
///     }
///   ]
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JsonListingSource {
    file_path: PathBuf,
}

impl JsonListingSource {
    #[must_use]
    pub const fn new(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl ListingSource for JsonListingSource {
    fn load(&self) -> Result<Vec<Listing>> {
        let _span = tracing::debug_span!("json_load_listings", path = ?self.file_path).entered();

        if !self.file_path.exists() {
            return Err(HomescoutError::Storage(format!(
                "listings file not found: {}",
                self.file_path.display()
            )));
        }

        let contents = std::fs::read_to_string(&self.file_path)?;
        let listings = parse_document(&contents)?;

        tracing::debug!(count = listings.len(), "listings loaded");
        Ok(listings)
    }
}

/// Parses and normalizes a listings document.
///
/// A document that is valid JSON but not an object, or whose `listings` key
/// is missing or not an array, yields an empty set rather than an error.
///
/// # Errors
///
/// Returns [`HomescoutError::Parse`] when `contents` is not valid JSON.
///
/// # Examples
///
/// ```
/// use homescout::storage::parse_document;
///
/// let listings = parse_document(r#"{"listings": [{"currentPrice": 1}, 7]}"#)?;
/// assert_eq!(listings.len(), 2);
/// assert_eq!(listings[1].id, "2");
/// # Ok::<(), homescout::HomescoutError>(())
/// ```
pub fn parse_document(contents: &str) -> Result<Vec<Listing>> {
    let value: serde_json::Value = serde_json::from_str(contents)?;

    let document: RawDocument = if value.is_object() {
        serde_json::from_value(value)?
    } else {
        tracing::warn!("listings document is not a JSON object");
        RawDocument::default()
    };

    let raw: Vec<RawListing> = document
        .listings
        .into_iter()
        .map(RawListing::from_value)
        .collect();

    Ok(normalize_all(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn loads_and_normalizes_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"listings": [
                {{"id": "a", "address": "1 Main St, Cuenca", "currentPrice": 100000}},
                {{"address": "2 Main St, Loja", "priceHistory": [{{"price": 80000}}]}}
            ]}}"#
        )
        .unwrap();

        let source = JsonListingSource::new(file.path().to_path_buf());
        let listings = source.load().unwrap();

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].id, "a");
        assert_eq!(listings[1].id, "2");
        assert_eq!(listings[1].current_price, 80_000.0);
    }

    #[test]
    fn missing_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonListingSource::new(dir.path().join("nope.json"));
        assert!(matches!(source.load(), Err(HomescoutError::Storage(_))));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        assert!(matches!(parse_document("{listings"), Err(HomescoutError::Parse(_))));
    }

    #[test]
    fn non_object_document_is_empty() {
        assert!(parse_document("[1, 2, 3]").unwrap().is_empty());
        assert!(parse_document(r#"{"other": []}"#).unwrap().is_empty());
    }

    #[test]
    fn malformed_records_never_reject_the_document() {
        let listings = parse_document(
            r#"{"listings": [
                {"id": 7, "currentPrice": "abc", "bedrooms": "three"},
                "not an object",
                {"address": "12 Av. Amazonas, Quito", "coords": [1.0]}
            ]}"#,
        )
        .unwrap();

        let ids: Vec<&str> = listings.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["7", "2", "3"]);
        assert!(listings.iter().all(|l| l.coordinates.is_none()));
        assert!(listings.iter().all(|l| l.current_price == 0.0));
    }
}
