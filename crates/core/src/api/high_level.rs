//! High-level segmentation API.
//!
//! Provides the main public entry points:
//! - `load_document()` - Read a JSON page dump from disk
//! - `segment_page()` - Segment one page's items into runs
//! - `segment_pages()` - Segment many pages in parallel

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, RunError};
use crate::layout::{BreakPolicy, SegmentParams, segment_runs};
use crate::model::{Run, TextItem, WritingMode};

pub(crate) fn default_thread_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// One page of positioned text items, in content-stream order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub items: Vec<TextItem>,

    /// Flow direction declared by the producer, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writing_mode: Option<WritingMode>,
}

impl Page {
    pub fn new(items: Vec<TextItem>) -> Self {
        Self {
            items,
            writing_mode: None,
        }
    }

    pub fn with_writing_mode(mut self, mode: WritingMode) -> Self {
        self.writing_mode = Some(mode);
        self
    }

    /// Writing mode to segment this page with.
    ///
    /// An explicit override wins, then the page's declared mode, then a
    /// majority vote over its items.
    pub fn resolve_writing_mode(&self, overridden: Option<WritingMode>) -> WritingMode {
        overridden
            .or(self.writing_mode)
            .unwrap_or_else(|| WritingMode::infer(&self.items))
    }
}

/// A sequence of pages loaded from a JSON dump.
///
/// Accepts `{"pages": [...]}`, a bare array of pages, or a single page
/// object with an `items` key. The shape is chosen from the top-level value,
/// so a malformed page or item is an error rather than a different shape.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Document {
    pub pages: Vec<Page>,
}

#[derive(Deserialize)]
struct Wrapped {
    pages: Vec<Page>,
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let pages = if value.is_array() {
            Vec::<Page>::deserialize(value)
        } else if value.get("pages").is_some() {
            Wrapped::deserialize(value).map(|w| w.pages)
        } else if value.get("items").is_some() {
            Page::deserialize(value).map(|page| vec![page])
        } else if value.is_object() {
            return Err(de::Error::custom(
                "expected a `pages` array, a page array or a page object",
            ));
        } else {
            return Err(de::Error::invalid_type(
                de::Unexpected::Other(json_kind(&value)),
                &"a document object or a page array",
            ));
        };
        pages.map(|pages| Self { pages }).map_err(de::Error::custom)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Document {
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    pub fn from_slice(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Returns the page at a zero-based index.
    pub fn page(&self, index: usize) -> Result<&Page> {
        self.pages.get(index).ok_or(RunError::PageOutOfRange {
            page: index,
            count: self.pages.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Reads a JSON page dump from a file.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Document> {
    let file = File::open(path.as_ref())?;
    let doc = Document::from_reader(BufReader::new(file))?;
    debug!(path = %path.as_ref().display(), pages = doc.len(), "loaded document");
    Ok(doc)
}

/// Options for segmenting a document.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentOptions {
    /// Writing mode for every page. None uses each page's declared mode, or
    /// infers one from its items.
    pub writing_mode: Option<WritingMode>,

    /// Break signals to evaluate.
    pub policy: BreakPolicy,

    /// Zero-indexed page numbers to segment. None means all pages.
    pub page_numbers: Option<Vec<usize>>,

    /// Maximum number of pages to segment. 0 means no limit.
    pub maxpages: usize,

    /// Worker threads for multi-page segmentation. 0 uses available parallelism.
    pub threads: usize,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            writing_mode: None,
            policy: BreakPolicy::Geometry,
            page_numbers: None,
            maxpages: 0,
            threads: 0,
        }
    }
}

impl SegmentOptions {
    /// Segmentation parameters for a given page.
    pub fn params_for(&self, page: &Page) -> SegmentParams {
        SegmentParams::new(page.resolve_writing_mode(self.writing_mode), self.policy)
    }
}

/// Runs of one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRuns<'a> {
    /// Zero-based index of the page in its document.
    pub page_index: usize,
    pub writing_mode: WritingMode,
    pub runs: Vec<Run<'a>>,
}

/// Segments one page.
pub fn segment_page<'a>(page: &'a Page, options: &SegmentOptions) -> Vec<Run<'a>> {
    segment_runs(&options.params_for(page), &page.items)
}

/// Selects pages per `page_numbers` and `maxpages`, in document order.
fn select_pages<'a>(
    doc: &'a Document,
    options: &SegmentOptions,
) -> Result<Vec<(usize, &'a Page)>> {
    if let Some(nums) = &options.page_numbers
        && let Some(&page) = nums.iter().find(|&&n| n >= doc.len())
    {
        return Err(RunError::PageOutOfRange {
            page,
            count: doc.len(),
        });
    }

    let mut selected = Vec::new();
    for (page_idx, page) in doc.pages.iter().enumerate() {
        if let Some(nums) = &options.page_numbers
            && !nums.contains(&page_idx)
        {
            continue;
        }

        if options.maxpages > 0 && selected.len() >= options.maxpages {
            break;
        }

        selected.push((page_idx, page));
    }
    Ok(selected)
}

/// Segments the selected pages of a document in parallel.
///
/// Pages are independent, so each is folded on its own worker; results come
/// back in document order.
pub fn segment_pages<'a>(
    doc: &'a Document,
    options: &SegmentOptions,
) -> Result<Vec<PageRuns<'a>>> {
    let selected = select_pages(doc, options)?;

    let thread_count = if options.threads > 0 {
        options.threads
    } else {
        default_thread_count()
    };
    let pool = ThreadPoolBuilder::new()
        .num_threads(thread_count)
        .build()
        .map_err(|e| RunError::ThreadPool(e.to_string()))?;

    let results: Vec<PageRuns<'a>> = pool.install(|| {
        selected
            .into_par_iter()
            .map(|(page_index, page)| {
                let params = options.params_for(page);
                PageRuns {
                    page_index,
                    writing_mode: params.writing_mode,
                    runs: segment_runs(&params, &page.items),
                }
            })
            .collect()
    });

    debug!(
        pages = results.len(),
        threads = thread_count,
        "segmented document"
    );
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(y: f64, words: &[&str]) -> Vec<TextItem> {
        words
            .iter()
            .enumerate()
            .map(|(i, w)| TextItem::at(*w, i as f64 * 10.0, y, 10.0, 12.0))
            .collect()
    }

    #[test]
    fn test_document_shapes() {
        let wrapped = Document::from_slice(br#"{"pages":[{"items":[]},{"items":[]}]}"#).unwrap();
        assert_eq!(wrapped.len(), 2);

        let bare = Document::from_slice(br#"[{"items":[{"str":"a"}]}]"#).unwrap();
        assert_eq!(bare.len(), 1);
        assert_eq!(bare.pages[0].items[0].text, "a");

        let single =
            Document::from_slice(br#"{"items":[],"writingMode":"vertical"}"#).unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single.pages[0].writing_mode, Some(WritingMode::Vertical));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Document::from_slice(b"{not json"),
            Err(RunError::Json(_))
        ));
    }

    #[test]
    fn test_malformed_document_is_rejected() {
        let cases: [&[u8]; 6] = [
            br#"{"pages":[{"items":[{"str":"a","transform":"bad"}]}]}"#,
            br#"{"pages":{"oops":1}}"#,
            br#"{"oops":1}"#,
            br#"[{"items":[{"width":"wide"}]}]"#,
            br#"{"items":[],"writingMode":"diagonal"}"#,
            b"42",
        ];
        for data in cases {
            assert!(
                matches!(Document::from_slice(data), Err(RunError::Json(_))),
                "{}",
                String::from_utf8_lossy(data)
            );
        }
    }

    #[test]
    fn test_page_out_of_range() {
        let doc = Document::new(vec![Page::default()]);
        assert!(doc.page(0).is_ok());
        assert!(matches!(
            doc.page(3),
            Err(RunError::PageOutOfRange { page: 3, count: 1 })
        ));
    }

    #[test]
    fn test_resolve_writing_mode_precedence() {
        let vertical_items = vec![TextItem::new(
            "v",
            vec![0.0, 1.0, -1.0, 0.0, 0.0, 0.0],
            1.0,
            1.0,
        )];
        let page = Page::new(vertical_items.clone());
        assert_eq!(page.resolve_writing_mode(None), WritingMode::Vertical);

        let declared = Page::new(vertical_items).with_writing_mode(WritingMode::Horizontal);
        assert_eq!(declared.resolve_writing_mode(None), WritingMode::Horizontal);
        assert_eq!(
            declared.resolve_writing_mode(Some(WritingMode::Vertical)),
            WritingMode::Vertical
        );
    }

    #[test]
    fn test_segment_page() {
        let mut items = line(700.0, &["a", "b"]);
        items.extend(line(680.0, &["c"]));
        let page = Page::new(items);
        let runs = segment_page(&page, &SegmentOptions::default());
        let texts: Vec<String> = runs.iter().map(Run::text).collect();
        assert_eq!(texts, vec!["ab", "c"]);
    }

    #[test]
    fn test_segment_pages_selection() {
        let doc = Document::new(vec![
            Page::new(line(700.0, &["p0"])),
            Page::new(line(700.0, &["p1"])),
            Page::new(line(700.0, &["p2"])),
        ]);

        let options = SegmentOptions {
            page_numbers: Some(vec![2, 0]),
            threads: 2,
            ..Default::default()
        };
        let pages = segment_pages(&doc, &options).unwrap();
        let indices: Vec<usize> = pages.iter().map(|p| p.page_index).collect();
        assert_eq!(indices, vec![0, 2]);

        let options = SegmentOptions {
            maxpages: 2,
            ..Default::default()
        };
        assert_eq!(segment_pages(&doc, &options).unwrap().len(), 2);

        let options = SegmentOptions {
            page_numbers: Some(vec![5]),
            ..Default::default()
        };
        assert!(matches!(
            segment_pages(&doc, &options),
            Err(RunError::PageOutOfRange { page: 5, count: 3 })
        ));
    }
}
