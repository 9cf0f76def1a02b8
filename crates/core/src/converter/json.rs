//! JSON Converter - outputs runs with item indices and bounds.

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::model::{Run, WritingMode};
use crate::utils::Rect;

#[derive(Debug, Clone, PartialEq, Serialize)]
struct RunRecord {
    text: String,
    /// Indices of the run's items in the page's item list.
    items: Vec<usize>,
    bounds: Option<Rect>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct PageRecord {
    page: usize,
    writing_mode: WritingMode,
    runs: Vec<RunRecord>,
}

#[derive(Serialize)]
struct DocumentRecord<'r> {
    pages: &'r [PageRecord],
}

/// JSON Converter - collects pages and writes one document on `finish`.
pub struct JsonConverter<'a, W: Write> {
    outfp: &'a mut W,
    pretty: bool,
    pages: Vec<PageRecord>,
}

impl<'a, W: Write> JsonConverter<'a, W> {
    pub fn new(outfp: &'a mut W, pretty: bool) -> Self {
        Self {
            outfp,
            pretty,
            pages: Vec::new(),
        }
    }

    /// Record one page's runs.
    ///
    /// Item indices are recovered from run order: runs partition the page,
    /// so the n-th item of the concatenated runs is the page's n-th item.
    pub fn receive_runs(
        &mut self,
        page_index: usize,
        writing_mode: WritingMode,
        runs: &[Run<'_>],
    ) {
        let mut next_index = 0;
        let runs = runs
            .iter()
            .map(|run| {
                let items = (next_index..next_index + run.len()).collect();
                next_index += run.len();
                RunRecord {
                    text: run.text(),
                    items,
                    bounds: run.bounds(),
                }
            })
            .collect();
        self.pages.push(PageRecord {
            page: page_index,
            writing_mode,
            runs,
        });
    }

    /// Write the collected document.
    pub fn finish(self) -> Result<()> {
        let doc = DocumentRecord { pages: &self.pages };
        if self.pretty {
            serde_json::to_writer_pretty(&mut *self.outfp, &doc)?;
        } else {
            serde_json::to_writer(&mut *self.outfp, &doc)?;
        }
        self.outfp.write_all(b"\n")?;
        Ok(())
    }
}
