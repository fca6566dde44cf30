//! Page analysis feeding the heading scorer.
//!
//! Resumes vary wildly in their type scale: some use 24pt names over 10pt
//! body text, others set everything within a couple of points. Rather than
//! fixed size thresholds, each page's own distinct font sizes define a
//! three-level hierarchy that the scorer compares against.

use crate::layout::line::Line;
use serde::{Deserialize, Serialize};

/// Offset below the largest size used for a synthesized heading level.
const SYNTHETIC_HEADING_OFFSET: f32 = 2.0;

/// Offset below the largest size used for a synthesized body level.
const SYNTHETIC_BODY_OFFSET: f32 = 4.0;

/// Three-level font-size hierarchy of one page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontHierarchy {
    /// Largest size on the page
    pub title: f32,
    /// Second largest size
    pub heading: f32,
    /// Smallest size
    pub body: f32,
}

impl FontHierarchy {
    /// Derive the hierarchy from the distinct font sizes of a page.
    ///
    /// With three or more distinct sizes the levels are the largest, second
    /// largest and smallest. With fewer, the heading and body levels are
    /// synthesized by subtracting fixed offsets from the largest size.
    ///
    /// # Examples
    ///
    /// ```
    /// use section_oxide::geometry::Rect;
    /// use section_oxide::layout::{FontHierarchy, Line};
    ///
    /// let bbox = Rect::from_points(0.0, 0.0, 10.0, 10.0);
    /// let lines = vec![
    ///     Line::new("A", bbox, 18.0),
    ///     Line::new("B", bbox, 12.0),
    ///     Line::new("C", bbox, 9.0),
    /// ];
    /// let levels = FontHierarchy::analyze(&lines);
    /// assert_eq!((levels.title, levels.heading, levels.body), (18.0, 12.0, 9.0));
    /// ```
    pub fn analyze(lines: &[Line]) -> Self {
        let mut sizes: Vec<f32> = lines.iter().map(|l| l.font_size).collect();
        sizes.sort_by(|a, b| b.total_cmp(a));
        sizes.dedup_by(|a, b| (*a - *b).abs() < 0.05);

        let hierarchy = match sizes.as_slice() {
            [] => Self::synthesized(0.0),
            [largest] | [largest, _] => Self::synthesized(*largest),
            [largest, second, .., smallest] => Self {
                title: *largest,
                heading: *second,
                body: *smallest,
            },
        };

        log::debug!(
            "Font hierarchy: {} distinct size(s) -> title={:.1}, heading={:.1}, body={:.1}",
            sizes.len(),
            hierarchy.title,
            hierarchy.heading,
            hierarchy.body
        );

        hierarchy
    }

    fn synthesized(largest: f32) -> Self {
        Self {
            title: largest,
            heading: largest - SYNTHETIC_HEADING_OFFSET,
            body: largest - SYNTHETIC_BODY_OFFSET,
        }
    }
}
