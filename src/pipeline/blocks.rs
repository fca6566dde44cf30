//! Segmentation output and the per-block view over it.

use crate::layout::column_detector::ColumnBands;
use crate::layout::document_analyzer::FontHierarchy;
use crate::layout::heading_detector::normalize_heading;
use crate::layout::line::Line;
use crate::pipeline::segmenter::ThresholdSearch;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Layout facts computed for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Page index
    pub page: usize,
    /// Column bands found on the page
    pub columns: ColumnBands,
    /// Font hierarchy the heading scores were computed against
    pub fonts: FontHierarchy,
}

/// Result of segmenting a document.
///
/// Lines are grouped by block in ascending id order; within a block the
/// heading comes first and the rest follow in reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentedDocument {
    /// Annotated lines
    pub lines: Vec<Line>,
    /// Number of blocks
    pub block_count: usize,
    /// Threshold search outcome
    pub search: ThresholdSearch,
    /// Per-page layout
    pub pages: Vec<PageLayout>,
}

impl SegmentedDocument {
    /// Threshold the segmentation settled on.
    pub fn threshold(&self) -> f32 {
        self.search.threshold
    }

    /// Whether no lines were segmented.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate over blocks in id order.
    pub fn blocks(&self) -> impl Iterator<Item = Block<'_>> {
        self.lines
            .chunk_by(|a, b| a.block == b.block)
            .map(|lines| Block {
                id: lines[0].block,
                lines,
            })
    }

    /// Consume the result, keeping only the lines.
    pub fn into_lines(self) -> Vec<Line> {
        self.lines
    }
}

/// Borrowed view of one block.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Block<'a> {
    /// Block id, starting at 1
    pub id: usize,
    /// Lines of the block, heading first
    pub lines: &'a [Line],
}

impl<'a> Block<'a> {
    /// The block's heading line.
    pub fn heading(&self) -> &'a Line {
        &self.lines[0]
    }

    /// Lines joined with newlines.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Total words across the block.
    pub fn word_count(&self) -> usize {
        self.lines.iter().map(Line::word_count).sum()
    }

    /// Whether any line mentions a date.
    pub fn contains_date(&self) -> bool {
        self.lines.iter().any(|l| l.contains_date)
    }

    /// Key naming the section, e.g. `work_experience`.
    ///
    /// Falls back to `section_<id>` when the heading scores too low to be
    /// trusted as a title.
    pub fn section_key(&self) -> String {
        let heading = self.heading();
        if heading.heading_score >= 2 {
            let normalized = normalize_heading(&heading.text);
            if !normalized.is_empty() {
                return normalized.split_whitespace().collect::<Vec<_>>().join("_");
            }
        }
        format!("section_{}", self.id)
    }
}

impl fmt::Display for Block<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}
