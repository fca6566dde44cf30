//! Final clean-up of segmented lines.
//!
//! After segmentation every line is attached to a block, blocks too thin to
//! stand as a section are folded into a neighbour, ids are made contiguous,
//! and each block is emitted heading first.

use crate::config::SegmenterConfig;
use crate::geometry::{euclidean_distance, Point};
use crate::layout::line::Line;
use std::collections::{BTreeMap, BTreeSet};

/// Post-processing stage run after [`BlockSegmenter`](super::BlockSegmenter).
pub struct BlockFinalizer<'a> {
    config: &'a SegmenterConfig,
}

impl<'a> BlockFinalizer<'a> {
    /// Create a finalizer for a configuration.
    pub fn new(config: &'a SegmenterConfig) -> Self {
        Self { config }
    }

    /// Run every clean-up step.
    ///
    /// # Arguments
    ///
    /// * `lines` - Segmented lines in reading order
    /// * `threshold` - Threshold the segmenter settled on
    ///
    /// # Returns
    ///
    /// The same lines grouped by block id, each block led by its heading.
    pub fn finalize(&self, mut lines: Vec<Line>, threshold: f32) -> Vec<Line> {
        if lines.is_empty() {
            return lines;
        }

        assign_orphans(&mut lines);
        compact_block_ids(&mut lines);
        merge_small_blocks(&mut lines, self.config.min_block_words);
        heading_first(lines, threshold)
    }
}

/// Attach lines without a block to the nearest block.
///
/// Distance is measured between top-left corners, against the first line of
/// each block in reading order. Ties go to the smaller block id. When no
/// line has a block at all, everything lands in block 1.
pub fn assign_orphans(lines: &mut [Line]) {
    let mut anchors: BTreeMap<usize, Point> = BTreeMap::new();
    for line in lines.iter().filter(|l| l.block != 0) {
        anchors.entry(line.block).or_insert_with(|| line.bbox.top_left());
    }

    for line in lines.iter_mut().filter(|l| l.block == 0) {
        let origin = line.bbox.top_left();
        let mut nearest: Option<(usize, f32)> = None;
        for (&id, anchor) in &anchors {
            let distance = euclidean_distance(&origin, anchor);
            if nearest.is_none_or(|(_, best)| distance < best) {
                nearest = Some((id, distance));
            }
        }

        line.block = nearest.map(|(id, _)| id).unwrap_or(1);
        log::trace!("Orphan {:?} attached to block {}", line.text, line.block);
    }
}

/// Renumber blocks to `1..=K` keeping their relative order.
///
/// Returns `K`.
pub fn compact_block_ids(lines: &mut [Line]) -> usize {
    let ids: BTreeSet<usize> = lines.iter().map(|l| l.block).collect();
    let remap: BTreeMap<usize, usize> = ids
        .into_iter()
        .enumerate()
        .map(|(index, id)| (id, index + 1))
        .collect();

    for line in lines.iter_mut() {
        if let Some(&id) = remap.get(&line.block) {
            line.block = id;
        }
    }
    remap.len()
}

/// Fold blocks with fewer than `min_words` words into a neighbour.
///
/// The preceding block is preferred, then the following one, as long as the
/// neighbour is not itself too small; otherwise whichever neighbour exists
/// is used. A lone block is kept whatever its size.
pub fn merge_small_blocks(lines: &mut [Line], min_words: usize) {
    loop {
        let count = compact_block_ids(lines);
        if count <= 1 {
            break;
        }

        let mut words = vec![0usize; count + 1];
        for line in lines.iter() {
            words[line.block] += line.word_count();
        }
        let is_small = |id: usize| words[id] < min_words;

        let Some(small) = (1..=count).find(|&id| is_small(id)) else {
            break;
        };
        let previous = (small > 1).then(|| small - 1);
        let next = (small < count).then(|| small + 1);
        let Some(target) = previous
            .filter(|&id| !is_small(id))
            .or(next.filter(|&id| !is_small(id)))
            .or(previous)
            .or(next)
        else {
            break;
        };

        log::debug!(
            "Block {} has {} word(s); merging into block {}",
            small,
            words[small],
            target
        );
        for line in lines.iter_mut().filter(|l| l.block == small) {
            line.block = target;
        }
    }
}

/// Group lines by block and move each block's heading to the front.
///
/// The heading is the highest-scoring line, earliest on ties. If that score
/// is below `threshold`, the largest font among the top-scoring lines wins
/// instead. The remaining lines keep their incoming order.
pub fn heading_first(lines: Vec<Line>, threshold: f32) -> Vec<Line> {
    let total = lines.len();
    let mut blocks: BTreeMap<usize, Vec<Line>> = BTreeMap::new();
    for line in lines {
        blocks.entry(line.block).or_default().push(line);
    }

    let mut ordered = Vec::with_capacity(total);
    for (_, mut block) in blocks {
        let heading = block.remove(heading_index(&block, threshold));
        ordered.push(heading);
        ordered.extend(block);
    }
    ordered
}

fn heading_index(block: &[Line], threshold: f32) -> usize {
    let best = block.iter().map(|l| l.heading_score).max().unwrap_or(0);
    if best as f32 >= threshold {
        return block
            .iter()
            .position(|l| l.heading_score == best)
            .unwrap_or(0);
    }

    let mut index = 0;
    let mut size = f32::NEG_INFINITY;
    for (i, line) in block.iter().enumerate() {
        if line.heading_score == best && line.font_size > size {
            index = i;
            size = line.font_size;
        }
    }
    index
}
