//! Data model types - text items, runs and writing modes.
//!
//! - `item` - positioned text fragments (`TextItem`)
//! - `run` - reconstructed reading lines (`Run`) and `WritingMode`

pub mod item;
pub mod run;

pub use item::TextItem;
pub use run::{Run, WritingMode};
