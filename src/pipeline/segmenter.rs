//! Block segmentation over the reading-ordered line sequence.
//!
//! Segmentation is a fold over the sorted lines carrying the current block
//! id and the previous line. A line opens a new block when it scores at
//! least the active threshold and is visually detached from its
//! predecessor. The threshold itself is found by bisection so the document
//! lands in the configured block range, then the block count is nudged
//! into range by merging or splitting.

use crate::config::SegmenterConfig;
use crate::layout::line::Line;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Outcome of the threshold search.
///
/// A search that never lands in range is still a usable result: it keeps
/// the threshold whose block count came closest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSearch {
    /// Heading-score threshold used for segmentation
    pub threshold: f32,
    /// Blocks produced by that threshold, before merge/split adjustment
    pub block_count: usize,
    /// Bisection iterations performed
    pub iterations: u32,
    /// Whether the block count landed in the configured range
    pub converged: bool,
}

/// Splits a reading-ordered line sequence into numbered blocks.
pub struct BlockSegmenter<'a> {
    config: &'a SegmenterConfig,
}

impl<'a> BlockSegmenter<'a> {
    /// Create a segmenter for a configuration.
    pub fn new(config: &'a SegmenterConfig) -> Self {
        Self { config }
    }

    /// Assign `block` ids to lines that are already in reading order.
    ///
    /// Returns the threshold search outcome; the lines carry the adjusted
    /// block ids afterwards.
    pub fn segment(&self, lines: &mut [Line]) -> ThresholdSearch {
        if lines.is_empty() {
            return ThresholdSearch {
                threshold: self.config.threshold_min,
                block_count: 0,
                iterations: 0,
                converged: false,
            };
        }

        let max_score = max_heading_score(lines);
        let (search, mut ids) = self.search_threshold(lines, max_score);

        merge_oversized(&mut ids, lines, max_score, self.config);
        split_undersized(&mut ids, lines, self.config);

        for (line, id) in lines.iter_mut().zip(ids) {
            line.block = id;
        }

        log::debug!(
            "Segmentation: threshold={:.3} ({} after {} iteration(s), converged={}), {} final block(s)",
            search.threshold,
            search.block_count,
            search.iterations,
            search.converged,
            lines.last().map(|l| l.block).unwrap_or(0)
        );

        search
    }

    /// Bisect the threshold interval for a block count in range.
    fn search_threshold(&self, lines: &[Line], max_score: u32) -> (ThresholdSearch, Vec<usize>) {
        let config = self.config;
        let mut low = config.threshold_min;
        let mut high = config.threshold_max;
        let mut best: Option<(ThresholdSearch, Vec<usize>)> = None;
        let mut iterations = 0;

        while iterations < config.max_search_iterations {
            iterations += 1;
            let threshold = (low + high) / 2.0;
            let ids = assign_block_ids(lines, threshold, max_score, config);
            let count = block_count(&ids);
            let distance = config.distance_from_range(count);

            log::trace!(
                "Threshold search #{}: [{:.3}, {:.3}] -> {:.3} gives {} block(s)",
                iterations,
                low,
                high,
                threshold,
                count
            );

            if best
                .as_ref()
                .is_none_or(|(b, _)| distance < config.distance_from_range(b.block_count))
            {
                let search = ThresholdSearch {
                    threshold,
                    block_count: count,
                    iterations,
                    converged: distance == 0,
                };
                best = Some((search, ids));
            }

            if distance == 0 {
                break;
            }
            if count > config.max_blocks {
                low = threshold;
            } else {
                high = threshold;
            }
        }

        let (mut search, ids) = best.unwrap_or_else(|| {
            let ids = assign_block_ids(lines, config.threshold_min, max_score, config);
            let count = block_count(&ids);
            let search = ThresholdSearch {
                threshold: config.threshold_min,
                block_count: count,
                iterations: 0,
                converged: config.in_block_range(count),
            };
            (search, ids)
        });
        search.iterations = iterations;
        (search, ids)
    }
}

/// Highest heading score in the document.
pub fn max_heading_score(lines: &[Line]) -> u32 {
    lines.iter().map(|l| l.heading_score).max().unwrap_or(0)
}

/// Block ids for one threshold, as a fold over the sorted lines.
///
/// The first line opens block 1; ids never decrease along the sequence.
pub fn assign_block_ids(
    lines: &[Line],
    threshold: f32,
    max_score: u32,
    config: &SegmenterConfig,
) -> Vec<usize> {
    let (ids, _, _) = lines.iter().fold(
        (Vec::with_capacity(lines.len()), 0usize, None::<&Line>),
        |(mut ids, current, previous), line| {
            let current = match previous {
                Some(prev) if !starts_block(prev, line, threshold, max_score, config) => current,
                _ => current + 1,
            };
            ids.push(current);
            (ids, current, Some(line))
        },
    );
    ids
}

/// Boundary rule between two consecutive lines.
///
/// Once inside the continuation of the highest-scoring line (usually the
/// candidate's name), no split happens until another line follows it.
fn starts_block(
    previous: &Line,
    line: &Line,
    threshold: f32,
    max_score: u32,
    config: &SegmenterConfig,
) -> bool {
    if previous.heading_score == max_score || (line.heading_score as f32) < threshold {
        return false;
    }

    let vertical_gap = line.y0() - previous.y1();
    vertical_gap > config.boundary_vertical_gap
        || (line.font_size - previous.font_size).abs() > config.boundary_font_delta
        || line.column != previous.column
        || line.page != previous.page
}

fn block_count(ids: &[usize]) -> usize {
    ids.iter().copied().max().unwrap_or(0)
}

/// Line count per block id, index 0 unused.
fn block_sizes(ids: &[usize], lines: &[Line], skip_score: Option<u32>) -> Vec<usize> {
    let mut sizes = vec![0; block_count(ids) + 1];
    for (line, &id) in lines.iter().zip(ids) {
        if skip_score != Some(line.heading_score) {
            sizes[id] += 1;
        }
    }
    sizes
}

/// Merge the lightest adjacent pair until at most `max_blocks` remain.
///
/// Lines carrying the maximum score are not counted, so a title line does
/// not make its block look heavier than it is.
fn merge_oversized(ids: &mut [usize], lines: &[Line], max_score: u32, config: &SegmenterConfig) {
    while block_count(ids) > config.max_blocks {
        let sizes = block_sizes(ids, lines, Some(max_score));
        let count = sizes.len() - 1;
        let Some(first) = (1..count).min_by_key(|&b| sizes[b] + sizes[b + 1]) else {
            break;
        };

        log::debug!("Merging block {} into {} ({} blocks)", first + 1, first, count);
        for id in ids.iter_mut() {
            if *id > first {
                *id -= 1;
            }
        }
    }
}

/// Split the largest block until `min_blocks` are reached.
///
/// A single-block document is left alone, as is a document whose largest
/// block has no internal line scoring at least `split_min_score`.
fn split_undersized(ids: &mut [usize], lines: &[Line], config: &SegmenterConfig) {
    loop {
        let count = block_count(ids);
        if count <= 1 || count >= config.min_blocks {
            break;
        }

        let sizes = block_sizes(ids, lines, None);
        let Some(largest) = (1..=count).max_by_key(|&b| (sizes[b], Reverse(b))) else {
            break;
        };

        let split_at = (1..ids.len()).find(|&i| {
            ids[i] == largest
                && ids[i - 1] == largest
                && lines[i].heading_score >= config.split_min_score
        });

        let Some(split_at) = split_at else {
            log::debug!("Block {} has no split point; keeping {} block(s)", largest, count);
            break;
        };

        log::debug!("Splitting block {} at line {:?}", largest, lines[split_at].text);
        for id in ids[split_at..].iter_mut() {
            *id += 1;
        }
    }
}
