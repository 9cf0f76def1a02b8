//! Output converters for segmented runs.
//!
//! - TextConverter: Plain text, one run per line, with run offsets
//! - TextIndex: Searchable text plus run spans
//! - JsonConverter: Runs with item indices and bounds

mod json;
mod text;

pub use json::JsonConverter;
pub use text::{RunSpan, TextConverter, TextIndex};
