//! Error types for the Homescout plugin.
//!
//! [`HomescoutError`] collects every failure the library can report, and
//! [`Result`] is the crate-wide alias built on it. Most of the pipeline is
//! total (normalization, filtering, pagination never fail), so errors only
//! surface at the edges: reading the listings document, loading a theme, and
//! talking to the worker thread.

use thiserror::Error;

/// The main error type for Homescout operations.
///
/// # Examples
///
/// ```
/// use homescout::HomescoutError;
///
/// fn check_page_size(size: usize) -> Result<(), HomescoutError> {
///     if size == 0 {
///         return Err(HomescoutError::Config("page size must be positive".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(check_page_size(0).is_err());
/// ```
#[derive(Debug, Error)]
pub enum HomescoutError {
    /// The listings document could not be read or has an unusable shape.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The listings document is not valid JSON.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Homescout operations.
pub type Result<T> = std::result::Result<T, HomescoutError>;
