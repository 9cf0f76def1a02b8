//! Cross-axis position model.
//!
//! A shift perpendicular to the reading direction (a new baseline, or a jump
//! to another column) separates two items into different runs. The tolerance
//! scales with the items' own size so headings and footnotes behave alike.

use crate::model::{TextItem, WritingMode};

use super::params::{AXIS_TOLERANCE_FLOOR, AXIS_TOLERANCE_MULTIPLIER};
use super::placement::Placement;

/// Cross-axis coordinate of an item: y for horizontal text, x for vertical.
pub fn cross_axis_position(item: &TextItem, mode: WritingMode) -> Option<f64> {
    Placement::resolve(item).map(|p| p.cross_offset(mode))
}

/// Largest cross-axis drift tolerated between two consecutive items.
///
/// `max(AXIS_TOLERANCE_FLOOR, larger cross extent * AXIS_TOLERANCE_MULTIPLIER)`.
pub fn axis_break_tolerance(a: &Placement, b: &Placement, mode: WritingMode) -> f64 {
    let size = a.cross_extent(mode).max(b.cross_extent(mode));
    AXIS_TOLERANCE_FLOOR.max(size * AXIS_TOLERANCE_MULTIPLIER)
}

/// Cross-axis distance and tolerance for a pair, if both items are placed.
pub fn cross_axis_drift(a: &TextItem, b: &TextItem, mode: WritingMode) -> Option<(f64, f64)> {
    let pa = Placement::resolve(a)?;
    let pb = Placement::resolve(b)?;
    let delta = (pb.cross_offset(mode) - pa.cross_offset(mode)).abs();
    Some((delta, axis_break_tolerance(&pa, &pb, mode)))
}

/// True if the pair sits on different lines (or columns).
///
/// Pairs where either position is unknown are not comparable and never
/// signal a break here.
pub fn has_cross_axis_jump(a: &TextItem, b: &TextItem, mode: WritingMode) -> bool {
    match cross_axis_drift(a, b, mode) {
        Some((delta, tolerance)) => delta > tolerance,
        None => false,
    }
}
