//! Text Converter - outputs plain text, one run per line.
//!
//! Also records where each run landed in the output so a search index can map
//! hits back to runs.

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::model::Run;

/// Byte range of one run in converted text output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSpan {
    /// Zero-based page index.
    pub page: usize,
    /// Zero-based run index within the page.
    pub run: usize,
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive); the run separator follows.
    pub end: usize,
}

/// Text Converter - outputs plain text.
pub struct TextConverter<'a, W: Write> {
    /// Output writer
    outfp: &'a mut W,
    /// Written after every run
    run_separator: String,
    /// Written after every page
    page_separator: String,
    /// Whether to show page numbers
    showpageno: bool,
    /// Bytes written so far
    offset: usize,
    spans: Vec<RunSpan>,
}

impl<'a, W: Write> TextConverter<'a, W> {
    /// Create a new text converter with newline run and form-feed page separators.
    pub fn new(outfp: &'a mut W, showpageno: bool) -> Self {
        Self {
            outfp,
            run_separator: "\n".to_string(),
            page_separator: "\x0c".to_string(),
            showpageno,
            offset: 0,
            spans: Vec::new(),
        }
    }

    pub fn with_run_separator(mut self, separator: impl Into<String>) -> Self {
        self.run_separator = separator.into();
        self
    }

    pub fn with_page_separator(mut self, separator: impl Into<String>) -> Self {
        self.page_separator = separator.into();
        self
    }

    /// Check if page numbers are shown.
    pub fn show_pageno(&self) -> bool {
        self.showpageno
    }

    /// Write text to output.
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.outfp.write_all(text.as_bytes())?;
        self.offset += text.len();
        Ok(())
    }

    /// Render one page's runs.
    pub fn receive_runs(&mut self, page_index: usize, runs: &[Run<'_>]) -> Result<()> {
        if self.showpageno {
            self.write_text(&format!("Page {}\n", page_index + 1))?;
        }

        for (run_index, run) in runs.iter().enumerate() {
            let start = self.offset;
            self.write_text(&run.text())?;
            self.spans.push(RunSpan {
                page: page_index,
                run: run_index,
                start,
                end: self.offset,
            });
            self.outfp.write_all(self.run_separator.as_bytes())?;
            self.offset += self.run_separator.len();
        }

        self.outfp.write_all(self.page_separator.as_bytes())?;
        self.offset += self.page_separator.len();
        Ok(())
    }

    /// Spans recorded so far.
    pub fn spans(&self) -> &[RunSpan] {
        &self.spans
    }

    pub fn into_spans(self) -> Vec<RunSpan> {
        self.spans
    }
}

/// Searchable text of a document together with its run offsets.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TextIndex {
    pub text: String,
    pub spans: Vec<RunSpan>,
}

impl TextIndex {
    /// Builds the index for `(page_index, runs)` pairs, with a newline after
    /// every run and a form feed after every page.
    pub fn build<'r, 'a: 'r, I>(pages: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, &'r [Run<'a>])>,
    {
        let mut buf = Vec::new();
        let mut converter = TextConverter::new(&mut buf, false);
        for (page_index, runs) in pages {
            converter.receive_runs(page_index, runs)?;
        }
        let spans = converter.into_spans();
        // Only &str slices were written.
        let text = String::from_utf8_lossy(&buf).into_owned();
        Ok(Self { text, spans })
    }

    /// Text of one span.
    pub fn span_text(&self, span: &RunSpan) -> Option<&str> {
        self.text.get(span.start..span.end)
    }

    /// Span containing a byte offset, if the offset falls inside a run.
    pub fn span_at(&self, offset: usize) -> Option<&RunSpan> {
        let idx = self.spans.partition_point(|s| s.end <= offset);
        self.spans
            .get(idx)
            .filter(|s| s.start <= offset && offset < s.end)
    }
}
