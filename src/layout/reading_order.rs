//! Reading order for segmented lines.
//!
//! Every later stage reuses the single ordering produced here:
//! page, then column band, then top edge, then left edge. Lines that tie on
//! all four keys fall back to their remaining fields so the outcome does
//! not depend on the order lines were supplied in.

use crate::layout::line::Line;
use std::cmp::Ordering;

/// Compare two lines in reading order.
///
/// # Examples
///
/// ```
/// use section_oxide::geometry::Rect;
/// use section_oxide::layout::Line;
/// use section_oxide::layout::reading_order::reading_order_cmp;
/// use std::cmp::Ordering;
///
/// let upper = Line::new("a", Rect::from_points(0.0, 10.0, 50.0, 20.0), 10.0);
/// let lower = Line::new("b", Rect::from_points(0.0, 30.0, 50.0, 40.0), 10.0);
/// assert_eq!(reading_order_cmp(&upper, &lower), Ordering::Less);
/// ```
pub fn reading_order_cmp(a: &Line, b: &Line) -> Ordering {
    a.page
        .cmp(&b.page)
        .then(a.column.cmp(&b.column))
        .then(a.y0().total_cmp(&b.y0()))
        .then(a.x0().total_cmp(&b.x0()))
        .then(a.x1().total_cmp(&b.x1()))
        .then(a.y1().total_cmp(&b.y1()))
        .then(a.font_size.total_cmp(&b.font_size))
        .then_with(|| a.text.cmp(&b.text))
        .then_with(|| a.fonts.cmp(&b.fonts))
}

/// Sort lines into reading order.
pub fn sort_reading_order(lines: &mut [Line]) {
    lines.sort_by(reading_order_cmp);
}
