//! textrun - geometry-driven text run segmentation for PDF text layers.
//!
//! Takes a page's positioned text items, in the order a content-stream
//! interpreter painted them, and groups them into runs: spans of text that
//! sit on one visual line (or column, for vertical writing).

pub mod api;
pub mod converter;
pub mod error;
pub mod layout;
pub mod model;
pub mod utils;

// Re-export high_level for convenience
pub use api::high_level;

pub use error::{Result, RunError};
pub use layout::{BreakPolicy, SegmentParams, segment_runs};
pub use model::{Run, TextItem, WritingMode};
