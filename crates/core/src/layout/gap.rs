//! Reading-axis gap analysis.
//!
//! Two items can share a baseline and still belong to different runs: table
//! cells, columns set on the same baseline, or boxes placed far apart. The gap
//! between the trailing edge of whichever item comes first along the reading
//! axis and the leading edge of the other decides.

use crate::model::{TextItem, WritingMode};

use super::params::{GAP_THRESHOLD_FLOOR, GAP_THRESHOLD_MULTIPLIER};
use super::placement::{Placement, cross_extent};

/// Whitespace between two items along the reading axis.
///
/// Negative values mean the items overlap. Returns 0 if either item has no
/// placement, so missing data never produces a gap.
pub fn reading_gap(a: &TextItem, b: &TextItem, mode: WritingMode) -> f64 {
    let (Some(pa), Some(pb)) = (Placement::resolve(a), Placement::resolve(b)) else {
        return 0.0;
    };
    let (p1, p2) = (pa.reading_offset(mode), pb.reading_offset(mode));
    if p1 < p2 {
        p2 - (p1 + pa.reading_extent(mode))
    } else {
        p1 - (p2 + pb.reading_extent(mode))
    }
}

/// Gap above which a pair is split, derived from the first item's size.
///
/// `max(GAP_THRESHOLD_FLOOR, cross extent * GAP_THRESHOLD_MULTIPLIER)`; the
/// cross extent is the height for horizontal text and the width for vertical.
pub fn gap_threshold(item: &TextItem, mode: WritingMode) -> f64 {
    GAP_THRESHOLD_FLOOR.max(cross_extent(item, mode) * GAP_THRESHOLD_MULTIPLIER)
}

/// True if the pair is separated by more whitespace than the threshold.
pub fn has_large_reading_gap(a: &TextItem, b: &TextItem, mode: WritingMode) -> bool {
    reading_gap(a, b, mode) > gap_threshold(a, mode)
}
