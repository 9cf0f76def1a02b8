//! High-level API module for text run segmentation.
//!
//! # Example
//!
//! ```ignore
//! use textrun_core::api::{load_document, segment_pages, SegmentOptions};
//!
//! let doc = load_document("page-dump.json")?;
//! for page in segment_pages(&doc, &SegmentOptions::default())? {
//!     for run in &page.runs {
//!         println!("{}", run.text());
//!     }
//! }
//! ```

pub mod high_level;

// Re-export for convenience
pub use high_level::{
    Document, Page, PageRuns, SegmentOptions, load_document, segment_page, segment_pages,
};
