//! Segmentation parameters.
//!
//! Contains SegmentParams for controlling run segmentation, and the fixed
//! thresholds the break signals are built from.

use crate::model::WritingMode;

/// Lower bound of the reading-gap threshold, in page units.
pub const GAP_THRESHOLD_FLOOR: f64 = 8.0;

/// Reading-gap threshold relative to the first item's cross-axis extent.
pub const GAP_THRESHOLD_MULTIPLIER: f64 = 1.5;

/// Lower bound of the cross-axis break tolerance, in page units.
pub const AXIS_TOLERANCE_FLOOR: f64 = 1.0;

/// Cross-axis tolerance relative to the larger cross-axis extent of a pair.
pub const AXIS_TOLERANCE_MULTIPLIER: f64 = 0.6;

/// Items whose transform has `|b| > |a| * VERTICAL_SKEW_RATIO` are vertical.
pub const VERTICAL_SKEW_RATIO: f64 = 1.2;

/// Largest rotation difference (degrees) tolerated within one run.
pub const ROTATION_DRIFT_LIMIT: f64 = 8.0;

/// Lower bound of the extent drift tolerance, in page units.
pub const EXTENT_DRIFT_FLOOR: f64 = 1.0;

/// Extent drift tolerance relative to the larger extent of a pair.
pub const EXTENT_DRIFT_RATIO: f64 = 0.45;

/// Lower bound of the zero-extent spacer threshold, in page units.
pub const SPACER_FLOOR: f64 = 8.0;

/// Spacer threshold relative to the neighbouring glyph's extent.
pub const SPACER_RATIO: f64 = 0.6;

/// Which break signals the segmenter evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BreakPolicy {
    /// Cross-axis jump and reading gap only.
    #[default]
    Geometry,
    /// Geometry plus colour, rotation, orientation and extent drift.
    Strict,
}

/// Parameters for run segmentation.
///
/// The thresholds are crate constants; only the writing mode and the
/// break policy vary per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentParams {
    /// Writing mode of the page or flow being segmented.
    pub writing_mode: WritingMode,

    /// Break signals to evaluate.
    pub policy: BreakPolicy,
}

impl SegmentParams {
    pub const fn new(writing_mode: WritingMode, policy: BreakPolicy) -> Self {
        Self {
            writing_mode,
            policy,
        }
    }

    pub const fn horizontal() -> Self {
        Self::new(WritingMode::Horizontal, BreakPolicy::Geometry)
    }

    pub const fn vertical() -> Self {
        Self::new(WritingMode::Vertical, BreakPolicy::Geometry)
    }

    pub const fn strict(self) -> Self {
        Self::new(self.writing_mode, BreakPolicy::Strict)
    }
}
