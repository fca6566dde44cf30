//! Section segmentation pipeline.
//!
//! ```text
//! Document (pages of positioned lines)
//!     ↓
//! [validate] (hard errors on malformed geometry)
//!     ↓
//! per page: [detect_columns] → [assign_columns] → [FontHierarchy] → [score_headings]
//!     ↓
//! [sort_reading_order] (page, column, top, left)
//!     ↓
//! [BlockSegmenter] (threshold search, merge/split to the block range)
//!     ↓
//! [BlockFinalizer] (orphans, small blocks, heading first)
//!     ↓
//! SegmentedDocument
//! ```
//!
//! Each run is self-contained: no state is kept between documents, so one
//! pipeline can be shared across threads.

pub mod blocks;
pub mod finalizer;
pub mod segmenter;

// Re-export main types
pub use blocks::{Block, PageLayout, SegmentedDocument};
pub use finalizer::BlockFinalizer;
pub use segmenter::{BlockSegmenter, ThresholdSearch};

use crate::config::{SegmenterConfig, DEFAULT_PAGE_HEIGHT, DEFAULT_PAGE_WIDTH};
use crate::error::Result;
use crate::layout::line::has_date;
use crate::layout::{
    assign_columns, detect_columns, score_headings, sort_reading_order, Document, FontHierarchy,
    Line, Page,
};

/// The segmentation pipeline - orchestrates the full flow.
pub struct SegmentationPipeline {
    config: SegmenterConfig,
}

impl SegmentationPipeline {
    /// Create a new pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(SegmenterConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: SegmenterConfig) -> Self {
        Self { config }
    }

    /// Segment a document into section blocks.
    ///
    /// # Arguments
    ///
    /// * `document` - Pages with their dimensions and lines
    ///
    /// # Returns
    ///
    /// The annotated lines grouped by block. An empty document yields an
    /// empty result with zero blocks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPage`](crate::Error::InvalidPage) or
    /// [`Error::InvalidLine`](crate::Error::InvalidLine) when the input
    /// geometry is malformed. Nothing is annotated in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use section_oxide::geometry::Rect;
    /// use section_oxide::layout::{Document, Line, Page};
    /// use section_oxide::pipeline::SegmentationPipeline;
    ///
    /// let page = Page::new(600.0, 1000.0).with_lines(vec![
    ///     Line::new("SKILLS", Rect::from_points(50.0, 100.0, 120.0, 114.0), 14.0),
    ///     Line::new(
    ///         "Rust, Go, SQL and Python",
    ///         Rect::from_points(50.0, 120.0, 300.0, 132.0),
    ///         10.0,
    ///     ),
    /// ]);
    ///
    /// let result = SegmentationPipeline::new().segment(Document::new(vec![page])).unwrap();
    /// assert_eq!(result.block_count, 1);
    /// assert_eq!(result.lines[0].text, "SKILLS");
    /// ```
    pub fn segment(&self, document: Document) -> Result<SegmentedDocument> {
        for (index, page) in document.pages.iter().enumerate() {
            page.validate(index)?;
        }

        let mut lines = Vec::with_capacity(document.line_count());
        let mut pages = Vec::with_capacity(document.pages.len());

        for (index, page) in document.pages.into_iter().enumerate() {
            let Page {
                width,
                lines: mut page_lines,
                ..
            } = page;

            let columns = detect_columns(&page_lines, width, &self.config);
            assign_columns(&mut page_lines, &columns);
            let fonts = FontHierarchy::analyze(&page_lines);
            score_headings(&mut page_lines, &fonts, &self.config);

            for line in page_lines.iter_mut() {
                line.page = index;
                line.block = 0;
                line.contains_date = has_date(&line.text);
            }

            log::debug!(
                "Page {}: {} line(s), {} column band(s), max heading score {}",
                index,
                page_lines.len(),
                columns.len(),
                page_lines.iter().map(|l| l.heading_score).max().unwrap_or(0)
            );

            pages.push(PageLayout {
                page: index,
                columns,
                fonts,
            });
            lines.extend(page_lines);
        }

        sort_reading_order(&mut lines);

        let search = BlockSegmenter::new(&self.config).segment(&mut lines);
        let lines = BlockFinalizer::new(&self.config).finalize(lines, search.threshold);
        let block_count = lines.iter().map(|l| l.block).max().unwrap_or(0);

        log::debug!(
            "Segmented {} line(s) into {} block(s) at threshold {:.3}",
            lines.len(),
            block_count,
            search.threshold
        );

        Ok(SegmentedDocument {
            lines,
            block_count,
            search,
            pages,
        })
    }

    /// Segment a flat line list, grouping it into pages by `Line::page`.
    ///
    /// Pages get the fallback dimensions (600 × 1000).
    pub fn segment_lines(&self, lines: Vec<Line>) -> Result<SegmentedDocument> {
        self.segment(Document::from_lines(
            lines,
            DEFAULT_PAGE_WIDTH,
            DEFAULT_PAGE_HEIGHT,
        ))
    }

    /// Get the current configuration.
    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }
}

impl Default for SegmentationPipeline {
    fn default() -> Self {
        Self::new()
    }
}
