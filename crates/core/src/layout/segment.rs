//! Run segmentation.
//!
//! Folds a page's items, in content-stream order, into runs. Each adjacent
//! pair is judged once from local information only: a cross-axis jump or a
//! large reading gap (and, under the strict policy, a style change) closes the
//! current run and opens a new one at the later item.

use std::fmt;

use itertools::Itertools;
use tracing::{debug, trace};

use crate::model::{Run, TextItem};

use super::axis::{cross_axis_drift, has_cross_axis_jump};
use super::gap::{gap_threshold, has_large_reading_gap, reading_gap};
use super::params::{BreakPolicy, SegmentParams};
use super::style::style_break_reason;

/// Signal that split two consecutive items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BreakReason {
    /// Cross-axis positions differ by more than the pair's tolerance.
    CrossAxisJump,
    /// Whitespace along the reading axis exceeds the gap threshold.
    ReadingGap,
    ColorChange,
    RotationDrift,
    OrientationMismatch,
    ExtentDrift,
}

impl BreakReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CrossAxisJump => "cross-axis-jump",
            Self::ReadingGap => "reading-gap",
            Self::ColorChange => "color-change",
            Self::RotationDrift => "rotation-drift",
            Self::OrientationMismatch => "orientation-mismatch",
            Self::ExtentDrift => "extent-drift",
        }
    }
}

impl fmt::Display for BreakReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the first signal that separates `item` from `next`, if any.
///
/// Signals are evaluated in order and short-circuit: cross-axis jump, then
/// reading gap, then (strict policy only) the style signals.
pub fn break_reason(
    params: &SegmentParams,
    item: &TextItem,
    next: &TextItem,
) -> Option<BreakReason> {
    let mode = params.writing_mode;
    if has_cross_axis_jump(item, next, mode) {
        return Some(BreakReason::CrossAxisJump);
    }
    if has_large_reading_gap(item, next, mode) {
        return Some(BreakReason::ReadingGap);
    }
    match params.policy {
        BreakPolicy::Geometry => None,
        BreakPolicy::Strict => style_break_reason(item, next, mode),
    }
}

/// True if `next` must start a new run.
pub fn should_break(params: &SegmentParams, item: &TextItem, next: &TextItem) -> bool {
    break_reason(params, item, next).is_some()
}

/// Groups items into runs.
///
/// The runs partition `items`: concatenating them yields the input in its
/// original order. Empty input yields no runs; no run is ever empty.
pub fn segment_runs<'a>(params: &SegmentParams, items: &'a [TextItem]) -> Vec<Run<'a>> {
    let mut runs = Vec::new();
    let Some(first) = items.first() else {
        return runs;
    };

    let mode = params.writing_mode;
    let mut current = Run::start(first, mode);

    for (index, (item, next)) in items.iter().tuple_windows().enumerate() {
        match break_reason(params, item, next) {
            Some(reason) => {
                trace!(item = index + 1, %reason, "run break");
                runs.push(std::mem::replace(&mut current, Run::start(next, mode)));
            }
            None => current.push(next),
        }
    }
    runs.push(current);

    debug!(
        items = items.len(),
        runs = runs.len(),
        mode = %mode,
        "segmented runs"
    );
    runs
}

/// Signal values computed for one adjacent pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PairDecision {
    /// Index of the later item of the pair.
    pub index: usize,
    /// Absolute cross-axis distance, if both items are placed.
    pub cross_delta: Option<f64>,
    /// Cross-axis tolerance, if both items are placed.
    pub cross_tolerance: Option<f64>,
    /// Reading-axis gap (0 when geometry is missing).
    pub gap: f64,
    pub gap_threshold: f64,
    /// Signal that fired, if the pair was split.
    pub reason: Option<BreakReason>,
}

impl PairDecision {
    pub const fn is_break(&self) -> bool {
        self.reason.is_some()
    }
}

/// Computes every signal for every adjacent pair.
///
/// Produces the same decisions `segment_runs` acts on; intended for
/// diagnostics.
pub fn explain_breaks(params: &SegmentParams, items: &[TextItem]) -> Vec<PairDecision> {
    let mode = params.writing_mode;
    items
        .iter()
        .tuple_windows()
        .enumerate()
        .map(|(index, (item, next))| {
            let drift = cross_axis_drift(item, next, mode);
            PairDecision {
                index: index + 1,
                cross_delta: drift.map(|(delta, _)| delta),
                cross_tolerance: drift.map(|(_, tolerance)| tolerance),
                gap: reading_gap(item, next, mode),
                gap_threshold: gap_threshold(item, mode),
                reason: break_reason(params, item, next),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::params::AXIS_TOLERANCE_MULTIPLIER;
    use crate::model::WritingMode;

    fn texts(runs: &[Run<'_>]) -> Vec<String> {
        runs.iter().map(Run::text).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(segment_runs(&SegmentParams::default(), &[]).is_empty());
        assert!(explain_breaks(&SegmentParams::default(), &[]).is_empty());
    }

    #[test]
    fn test_single_item() {
        let items = [TextItem::at("a", 0.0, 0.0, 10.0, 12.0)];
        let runs = segment_runs(&SegmentParams::default(), &items);
        assert_eq!(texts(&runs), vec!["a"]);
        assert!(explain_breaks(&SegmentParams::default(), &items).is_empty());
    }

    #[test]
    fn test_touching_items_merge() {
        let items = [
            TextItem::at("a", 0.0, 0.0, 10.0, 12.0),
            TextItem::at("b", 10.0, 0.0, 10.0, 12.0),
        ];
        let runs = segment_runs(&SegmentParams::horizontal(), &items);
        assert_eq!(texts(&runs), vec!["ab"]);
    }

    #[test]
    fn test_large_gap_splits() {
        let items = [
            TextItem::at("a", 0.0, 0.0, 10.0, 12.0),
            TextItem::at("b", 40.0, 0.0, 10.0, 12.0),
        ];
        let params = SegmentParams::horizontal();
        assert_eq!(
            break_reason(&params, &items[0], &items[1]),
            Some(BreakReason::ReadingGap)
        );
        assert_eq!(texts(&segment_runs(&params, &items)), vec!["a", "b"]);
    }

    #[test]
    fn test_vertical_overlap_merges() {
        let items = [
            TextItem::at("a", 0.0, 0.0, 12.0, 10.0),
            TextItem::at("b", 0.0, 9.0, 12.0, 10.0),
        ];
        let runs = segment_runs(&SegmentParams::vertical(), &items);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].writing_mode(), WritingMode::Vertical);
    }

    #[test]
    fn test_cross_axis_checked_first() {
        // Tiny gap, but a new baseline 20 units down.
        let items = [
            TextItem::at("a", 0.0, 100.0, 10.0, 12.0),
            TextItem::at("b", 11.0, 80.0, 10.0, 12.0),
        ];
        let params = SegmentParams::horizontal();
        assert!(!has_large_reading_gap(&items[0], &items[1], params.writing_mode));
        assert_eq!(
            break_reason(&params, &items[0], &items[1]),
            Some(BreakReason::CrossAxisJump)
        );
        assert!(should_break(&params, &items[0], &items[1]));
    }

    #[test]
    fn test_strict_policy_adds_style_signals() {
        let items = [
            TextItem::at("a", 0.0, 0.0, 10.0, 12.0).with_color("#000"),
            TextItem::at("b", 10.0, 0.0, 10.0, 12.0).with_color("#f00"),
        ];
        let geometry = SegmentParams::horizontal();
        assert_eq!(segment_runs(&geometry, &items).len(), 1);
        let strict = geometry.strict();
        assert_eq!(
            break_reason(&strict, &items[0], &items[1]),
            Some(BreakReason::ColorChange)
        );
        assert_eq!(segment_runs(&strict, &items).len(), 2);
    }

    #[test]
    fn test_explain_matches_segmentation() {
        let items = [
            TextItem::at("a", 0.0, 0.0, 10.0, 12.0),
            TextItem::at("b", 10.0, 0.0, 10.0, 12.0),
            TextItem::at("c", 60.0, 0.0, 10.0, 12.0),
            TextItem::unplaced("d", 10.0, 12.0),
        ];
        let params = SegmentParams::horizontal();
        let decisions = explain_breaks(&params, &items);
        assert_eq!(decisions.len(), 3);

        assert_eq!(decisions[0].index, 1);
        assert_eq!(decisions[0].cross_delta, Some(0.0));
        assert_eq!(
            decisions[0].cross_tolerance,
            Some(12.0 * AXIS_TOLERANCE_MULTIPLIER)
        );
        assert_eq!(decisions[0].gap, 0.0);
        assert_eq!(decisions[0].gap_threshold, 18.0);
        assert!(!decisions[0].is_break());

        assert_eq!(decisions[1].gap, 40.0);
        assert_eq!(decisions[1].reason, Some(BreakReason::ReadingGap));

        assert_eq!(decisions[2].cross_delta, None);
        assert_eq!(decisions[2].gap, 0.0);
        assert!(!decisions[2].is_break());

        let breaks = decisions.iter().filter(|d| d.is_break()).count();
        assert_eq!(segment_runs(&params, &items).len(), breaks + 1);
    }

    #[test]
    fn test_break_reason_display() {
        assert_eq!(BreakReason::CrossAxisJump.to_string(), "cross-axis-jump");
        assert_eq!(BreakReason::ExtentDrift.to_string(), "extent-drift");
    }
}
