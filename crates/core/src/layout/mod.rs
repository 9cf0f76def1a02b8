//! Layout analysis module for text run segmentation.
//!
//! This module contains:
//! - Segmentation parameters and thresholds (SegmentParams)
//! - Transform resolution (Placement)
//! - The cross-axis and reading-gap break signals
//! - Optional style signals for the strict policy
//! - The run segmenter itself

pub mod axis;
pub mod gap;
pub mod params;
pub mod placement;
pub mod segment;
pub mod style;

// Re-export params
pub use params::*;

pub use axis::{axis_break_tolerance, cross_axis_position, has_cross_axis_jump};
pub use gap::{gap_threshold, has_large_reading_gap, reading_gap};
pub use placement::Placement;
pub use segment::{
    BreakReason, PairDecision, break_reason, explain_breaks, segment_runs, should_break,
};
pub use style::text_rotation;
