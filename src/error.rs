//! Error types for layout segmentation.
//!
//! Only malformed input is an error. Degenerate layouts (no columns, no
//! convergent threshold, unsplittable blocks) are recovered internally.

/// Result type alias for segmentation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while ingesting or segmenting lines.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A line failed input validation
    #[error("Invalid line {index} on page {page}: {reason}")]
    InvalidLine {
        /// Zero-based page index
        page: usize,
        /// Index of the line within its page
        index: usize,
        /// What was wrong with it
        reason: String,
    },

    /// A page has unusable dimensions
    #[error("Invalid page {page}: {reason}")]
    InvalidPage {
        /// Zero-based page index
        page: usize,
        /// What was wrong with it
        reason: String,
    },

    /// Extractor JSON could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
