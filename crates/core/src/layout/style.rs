//! Style signals for the strict break policy.
//!
//! Producers that emit one item per glyph cluster also tell us things the
//! geometry alone does not: a colour switch, a rotated label, a vertical
//! caption next to horizontal body text, or a sudden font-size change. These
//! predicates turn that into extra break signals.

use crate::model::{TextItem, WritingMode};
use crate::utils::normalize_degree;

use super::params::{
    EXTENT_DRIFT_FLOOR, EXTENT_DRIFT_RATIO, ROTATION_DRIFT_LIMIT, SPACER_FLOOR, SPACER_RATIO,
};
use super::placement::{cross_extent, reading_extent};
use super::segment::BreakReason;

/// Rotation of an item in degrees, normalized to (-180, 180].
///
/// Rounded to hundredths. Items without a usable transform are upright.
pub fn text_rotation(item: &TextItem) -> f64 {
    let (a, b) = match item.transform.as_slice() {
        [a, b, ..] if a.is_finite() && b.is_finite() => (*a, *b),
        _ => return 0.0,
    };
    let degree = b.atan2(a).to_degrees();
    if !degree.is_finite() {
        return 0.0;
    }
    normalize_degree((degree * 100.0).round() / 100.0)
}

/// True if the shortest angle between the pair's rotations exceeds the limit.
pub fn has_rotation_drift(a: &TextItem, b: &TextItem) -> bool {
    let drift = (text_rotation(b) - text_rotation(a)).abs();
    let drift = if drift > 180.0 { 360.0 - drift } else { drift };
    drift > ROTATION_DRIFT_LIMIT
}

/// True if the pair reports different fill colours.
pub fn has_color_change(a: &TextItem, b: &TextItem) -> bool {
    a.color != b.color
}

/// True if one item is set vertically and the other is not.
pub fn has_orientation_mismatch(a: &TextItem, b: &TextItem) -> bool {
    let vertical =
        |item: &TextItem| WritingMode::of_item(item).is_some_and(WritingMode::is_vertical);
    vertical(a) != vertical(b)
}

/// True if the pair's cross-axis extents differ too much to share a line.
///
/// Zero-extent items are spacers emitted between glyphs; they only split
/// the run when they are wider than a plausible word space.
pub fn has_extent_drift(a: &TextItem, b: &TextItem, mode: WritingMode) -> bool {
    let current = cross_extent(a, mode);
    let next = cross_extent(b, mode);

    if current == 0.0 && next > 0.0 {
        let threshold = SPACER_FLOOR.max(next * SPACER_RATIO);
        return reading_extent(a, mode) > threshold;
    }

    if next == 0.0 {
        let threshold = SPACER_FLOOR.max(current.max(next) * SPACER_RATIO);
        return reading_extent(b, mode) > threshold;
    }

    let threshold = EXTENT_DRIFT_FLOOR.max(current.max(next) * EXTENT_DRIFT_RATIO);
    (next - current).abs() > threshold
}

/// First style signal that fires for the pair, in evaluation order.
pub fn style_break_reason(a: &TextItem, b: &TextItem, mode: WritingMode) -> Option<BreakReason> {
    if has_color_change(a, b) {
        Some(BreakReason::ColorChange)
    } else if has_rotation_drift(a, b) {
        Some(BreakReason::RotationDrift)
    } else if has_orientation_mismatch(a, b) {
        Some(BreakReason::OrientationMismatch)
    } else if has_extent_drift(a, b, mode) {
        Some(BreakReason::ExtentDrift)
    } else {
        None
    }
}
