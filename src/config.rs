//! Configuration for layout segmentation.

/// Page width used when a document carries no page dimensions.
pub const DEFAULT_PAGE_WIDTH: f32 = 600.0;

/// Page height used when a document carries no page dimensions.
pub const DEFAULT_PAGE_HEIGHT: f32 = 1000.0;

/// Segmentation configuration.
///
/// The defaults are tuned for single- and multi-column resumes: three to ten
/// sections, headings in the top few points of the type scale.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmenterConfig {
    /// Fewest blocks the threshold search aims for.
    pub min_blocks: usize,

    /// Most blocks allowed before adjacent blocks are merged.
    pub max_blocks: usize,

    /// Lower bound of the heading-score threshold search.
    pub threshold_min: f32,

    /// Upper bound of the heading-score threshold search.
    pub threshold_max: f32,

    /// Iteration cap for the threshold bisection.
    pub max_search_iterations: u32,

    /// Whitespace between consecutive lines (top minus previous bottom)
    /// that counts as a discontinuity.
    pub boundary_vertical_gap: f32,

    /// Font size change between consecutive lines that counts as a
    /// discontinuity.
    pub boundary_font_delta: f32,

    /// Minimum heading score for a line to become a forced split point.
    pub split_min_score: u32,

    /// Blocks with fewer words than this are merged into a neighbour.
    pub min_block_words: usize,

    /// Narrowest column, as a fraction of page width, a cut may produce.
    pub min_column_width_ratio: f32,

    /// Distance from the page top within which lines get the position prior.
    pub header_zone: f32,

    /// Longest line, in words, that still gets the short-line bonus.
    pub max_heading_words: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmenterConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            min_blocks: 3,
            max_blocks: 10,
            threshold_min: 1.0,
            threshold_max: 5.0,
            max_search_iterations: 10,
            boundary_vertical_gap: 3.0,
            boundary_font_delta: 1.0,
            split_min_score: 2,
            min_block_words: 4,
            min_column_width_ratio: 0.2,
            header_zone: 150.0,
            max_heading_words: 5,
        }
    }

    /// Set the target block range searched for.
    pub fn with_block_range(mut self, min_blocks: usize, max_blocks: usize) -> Self {
        self.min_blocks = min_blocks;
        self.max_blocks = max_blocks.max(min_blocks);
        self
    }

    /// Set the threshold search interval.
    pub fn with_threshold_range(mut self, min: f32, max: f32) -> Self {
        self.threshold_min = min;
        self.threshold_max = max.max(min);
        self
    }

    /// Set the bisection iteration cap.
    pub fn with_max_search_iterations(mut self, iterations: u32) -> Self {
        self.max_search_iterations = iterations;
        self
    }

    /// Set the minimum word count of a standalone block.
    pub fn with_min_block_words(mut self, words: usize) -> Self {
        self.min_block_words = words;
        self
    }

    /// Set the narrowest admissible column as a fraction of page width.
    pub fn with_min_column_width_ratio(mut self, ratio: f32) -> Self {
        self.min_column_width_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Set the header zone height.
    pub fn with_header_zone(mut self, zone: f32) -> Self {
        self.header_zone = zone;
        self
    }

    /// Whether `count` lies in the target block range.
    pub fn in_block_range(&self, count: usize) -> bool {
        (self.min_blocks..=self.max_blocks).contains(&count)
    }

    /// How far `count` lies outside the target block range (0 when inside).
    pub fn distance_from_range(&self, count: usize) -> usize {
        if count < self.min_blocks {
            self.min_blocks - count
        } else {
            count.saturating_sub(self.max_blocks)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SegmenterConfig::default();
        assert_eq!(config.min_blocks, 3);
        assert_eq!(config.max_blocks, 10);
        assert_eq!(config.threshold_min, 1.0);
        assert_eq!(config.threshold_max, 5.0);
        assert_eq!(config.max_search_iterations, 10);
        assert_eq!(config.min_block_words, 4);
    }

    #[test]
    fn test_builder() {
        let config = SegmenterConfig::new()
            .with_block_range(2, 6)
            .with_threshold_range(0.5, 8.0)
            .with_min_block_words(2)
            .with_min_column_width_ratio(1.5);

        assert_eq!(config.min_blocks, 2);
        assert_eq!(config.max_blocks, 6);
        assert_eq!(config.threshold_max, 8.0);
        assert_eq!(config.min_block_words, 2);
        assert_eq!(config.min_column_width_ratio, 1.0);
    }

    #[test]
    fn test_block_range_distance() {
        let config = SegmenterConfig::default();
        assert!(config.in_block_range(3));
        assert!(config.in_block_range(10));
        assert!(!config.in_block_range(11));
        assert_eq!(config.distance_from_range(1), 2);
        assert_eq!(config.distance_from_range(5), 0);
        assert_eq!(config.distance_from_range(14), 4);
    }
}
