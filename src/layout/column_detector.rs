//! Column detection from the distribution of line edges.
//!
//! The detector is unsupervised: it has no fixed column count. It looks for
//! an unusually wide gap between sorted left/right edges that recurs across
//! the page, and treats that width as the gutter between columns.

use crate::config::SegmenterConfig;
use crate::layout::line::Line;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered x-axis cut points partitioning one page into column bands.
///
/// Always holds at least two points; `[0, width]` is a single column.
/// Deserializing checks the same, so a band set read back from JSON is never
/// empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct ColumnBands {
    cuts: Vec<f32>,
}

impl TryFrom<Vec<f32>> for ColumnBands {
    type Error = String;

    fn try_from(cuts: Vec<f32>) -> Result<Self, Self::Error> {
        if cuts.len() < 2 {
            return Err(format!("column bands need at least 2 cuts, got {}", cuts.len()));
        }
        if cuts.iter().any(|c| !c.is_finite()) {
            return Err("column cuts must be finite".to_string());
        }
        if cuts.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(format!("column cuts must be ascending: {:?}", cuts));
        }
        Ok(Self { cuts })
    }
}

impl From<ColumnBands> for Vec<f32> {
    fn from(bands: ColumnBands) -> Self {
        bands.cuts
    }
}

impl ColumnBands {
    /// One band spanning the whole page.
    pub fn single(page_width: f32) -> Self {
        Self {
            cuts: vec![0.0, page_width],
        }
    }

    /// The cut points, including the page edges.
    pub fn cuts(&self) -> &[f32] {
        &self.cuts
    }

    /// Number of bands.
    pub fn len(&self) -> usize {
        self.cuts.len() - 1
    }

    /// Always false; a page has at least one band.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Band index containing `x`, where band `i` is `cuts[i] <= x < cuts[i + 1]`.
    ///
    /// Positions left of the first cut fall in band 0, positions at or past
    /// the last cut fall in the last band.
    ///
    /// # Examples
    ///
    /// ```
    /// use section_oxide::layout::ColumnBands;
    ///
    /// let bands = ColumnBands::single(600.0);
    /// assert_eq!(bands.band_of(250.0), 0);
    /// assert_eq!(bands.band_of(700.0), 0);
    /// ```
    pub fn band_of(&self, x: f32) -> usize {
        let last = self.len() - 1;
        for (i, pair) in self.cuts.windows(2).enumerate() {
            if x >= pair[0] && x < pair[1] {
                return i;
            }
        }
        if x < self.cuts[0] {
            0
        } else {
            last
        }
    }
}

/// Detect column bands for one page.
///
/// # Arguments
///
/// * `lines` - All lines on the page
/// * `page_width` - Width of the page
/// * `config` - Supplies the minimum column width ratio
///
/// # Returns
///
/// The detected bands; a single full-width band when the gap statistics show
/// no separator.
pub fn detect_columns(lines: &[Line], page_width: f32, config: &SegmenterConfig) -> ColumnBands {
    let mut edges: Vec<f32> = lines.iter().flat_map(|l| [l.x0(), l.x1()]).collect();
    edges.sort_by(|a, b| a.total_cmp(b));

    let gaps: Vec<f32> = edges.windows(2).map(|w| w[1] - w[0]).collect();
    let Some(separator) = separator_width(&gaps) else {
        log::debug!("Column detection: no significant gap, single column");
        return ColumnBands::single(page_width);
    };

    let candidates: Vec<f32> = edges
        .windows(2)
        .filter(|w| round_tenth(w[1] - w[0]) == separator)
        .map(|w| (w[0] + w[1]) / 2.0)
        .collect();

    let min_width = page_width * config.min_column_width_ratio;
    let mut cuts = vec![0.0];
    for cut in candidates {
        let previous = cuts[cuts.len() - 1];
        if cut - previous >= min_width && page_width - cut >= min_width {
            cuts.push(cut);
        } else {
            log::trace!("Column detection: dropping narrow cut at {:.1}", cut);
        }
    }
    cuts.push(page_width);

    log::debug!(
        "Column detection: separator={:.1}, {} band(s), cuts={:?}",
        separator as f32 / 10.0,
        cuts.len() - 1,
        cuts
    );

    ColumnBands { cuts }
}

/// Assign each line the band containing its left edge.
pub fn assign_columns(lines: &mut [Line], bands: &ColumnBands) {
    for line in lines.iter_mut() {
        line.column = bands.band_of(line.x0());
    }
}

/// Most frequent significant gap width, in tenths of a unit.
///
/// A gap is significant when it exceeds the mean gap by more than one
/// population standard deviation. Ties prefer the wider gap.
fn separator_width(gaps: &[f32]) -> Option<i64> {
    if gaps.is_empty() {
        return None;
    }

    let n = gaps.len() as f32;
    let mean = gaps.iter().sum::<f32>() / n;
    let variance = gaps.iter().map(|g| (g - mean).powi(2)).sum::<f32>() / n;
    let threshold = mean + variance.sqrt();

    let mut frequency: BTreeMap<i64, usize> = BTreeMap::new();
    for &gap in gaps.iter().filter(|&&g| g > threshold) {
        *frequency.entry(round_tenth(gap)).or_insert(0) += 1;
    }

    // BTreeMap iterates ascending, so max_by_key keeps the widest on ties.
    frequency
        .into_iter()
        .max_by_key(|&(_, count)| count)
        .map(|(width, _)| width)
}

/// Round to one decimal, kept as an integer count of tenths for exact matching.
fn round_tenth(value: f32) -> i64 {
    (value * 10.0).round() as i64
}
