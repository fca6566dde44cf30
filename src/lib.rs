// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::needless_range_loop)]
#![allow(clippy::doc_overindented_list_items)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Section Oxide
//!
//! Layout segmentation for resumes: turns positioned text lines into ordered
//! section blocks using only typographic and positional signals.
//!
//! ## Core Features
//!
//! - **Column Detection**: unsupervised, from edge-gap statistics; 1, 2 or 3+ columns
//! - **Heading Scoring**: font-size tier against a per-page hierarchy, section
//!   keywords, capitalization, trailing punctuation and position
//! - **Reading Order**: page, column, top edge, left edge
//! - **Adaptive Segmentation**: bisection over the heading-score threshold
//!   targeting 3 to 10 blocks, then merge/split to land in range
//! - **Finalization**: orphan assignment, small-block merging, heading-first blocks
//!
//! ## Quick Start
//!
//! ```
//! use section_oxide::geometry::Rect;
//! use section_oxide::layout::Line;
//! use section_oxide::pipeline::SegmentationPipeline;
//!
//! # fn main() -> section_oxide::Result<()> {
//! let line = |text: &str, y: f32, size: f32| {
//!     Line::new(text, Rect::from_points(50.0, y, 250.0, y + size), size)
//! };
//! let lines = vec![
//!     line("EDUCATION", 40.0, 14.0),
//!     line("State University", 60.0, 10.0),
//!     line("B.Sc. Computer Science 2016", 75.0, 10.0),
//!     line("EXPERIENCE", 140.0, 14.0),
//!     line("Engineer at Acme", 160.0, 10.0),
//!     line("Built the billing system", 175.0, 10.0),
//! ];
//!
//! let result = SegmentationPipeline::new().segment_lines(lines)?;
//! for block in result.blocks() {
//!     println!("{}: {}", block.section_key(), block.text());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Extractor output can be loaded with [`ingest::read_extracted_file`].

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Geometry primitives
pub mod geometry;

// Per-page layout analysis
pub mod layout;

// Segmentation pipeline
pub mod pipeline;

// Extractor JSON input
pub mod ingest;

// Re-exports
pub use config::SegmenterConfig;
pub use error::{Error, Result};
pub use layout::{Document, Line, Page};
pub use pipeline::{Block, SegmentationPipeline, SegmentedDocument};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
