//! Error types for Traducto operations.
//!
//! This module defines the main error type [`TraductoError`] which represents
//! all possible errors that can occur during fragment extraction, placeholder
//! templating, matrix handling, and fetching.
//!
//! # Example
//!
//! ```rust
//! use traducto_core::{TraductoError, Result};
//!
//! fn extract(html: &str) -> Result<Vec<String>> {
//!     if html.trim().is_empty() {
//!         return Err(TraductoError::EmptyDocument);
//!     }
//!     // ... extraction logic
//!     # Ok(Vec::new())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for localization-preparation operations.
///
/// Structural errors (`EmptyDocument`, `UnresolvedFragment`,
/// `MissingContentSlot`) abort a whole extraction or templating run: they mean
/// the document cannot be safely made translatable. Per-cell translation
/// failures are never surfaced through this type during a matrix fill; they
/// degrade to empty cells (see [`crate::translate::fill_matrix`]).
#[derive(Error, Debug)]
pub enum TraductoError {
    /// The source document is blank.
    ///
    /// Fatal for an extraction run: there is nothing to localize.
    #[error("Source document is empty")]
    EmptyDocument,

    /// A fragment has no remaining valid text-node occurrence to bind.
    ///
    /// Raised during templating when a fragment's text cannot be located in
    /// any literal text position of the document. The offending text is
    /// carried for manual inspection.
    #[error("Could not locate fragment in document text: {text:?}")]
    UnresolvedFragment { text: String },

    /// The layout document has no `{{ content }}` insertion slot.
    #[error("Layout has no content slot")]
    MissingContentSlot,

    /// An imported translation table is malformed.
    ///
    /// Returned when the row-major table is not rectangular or has no
    /// language header row.
    #[error("Malformed translation table: {0}")]
    MatrixShape(String),

    /// A translation provider call failed.
    ///
    /// Providers return this for configuration problems, rejected input, and
    /// transport failures. During a matrix fill it is logged and the cell is
    /// left empty; outside the fill protocol it propagates normally.
    #[error("Translation failed: {0}")]
    TranslationFailed(String),

    /// HTML parsing errors.
    ///
    /// Returned when a CSS selector is invalid or document markup cannot be
    /// processed.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// HTTP request errors from reqwest.
    ///
    /// This variant is only available when the `fetch` feature is enabled.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// This variant is only available when the `fetch` feature is enabled.
    #[cfg(feature = "fetch")]
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    #[error("Failed to write to file: {0}")]
    WriteError(#[from] std::io::Error),
}

/// Result type alias for TraductoError.
///
/// This is a convenience alias for `std::result::Result<T, TraductoError>`.
pub type Result<T> = std::result::Result<T, TraductoError>;
