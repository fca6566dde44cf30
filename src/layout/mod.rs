//! Layout analysis for positioned text lines.
//!
//! This module provides the per-page stages of segmentation:
//! - Line, page and document types
//! - Column detection from edge-gap statistics
//! - Font hierarchy analysis
//! - Heading scoring
//! - Reading order

pub mod column_detector;
pub mod document_analyzer;
pub mod heading_detector;
pub mod line;
pub mod reading_order;

// Re-export main types
pub use column_detector::{assign_columns, detect_columns, ColumnBands};
pub use document_analyzer::FontHierarchy;
pub use heading_detector::{score_headings, score_line, SizeTier};
pub use line::{Document, Line, Page};
pub use reading_order::sort_reading_order;
