//! Runs and writing modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RunError;
use crate::layout::params::VERTICAL_SKEW_RATIO;
use crate::layout::placement::Placement;
use crate::utils::{Rect, union_rects};

use super::item::TextItem;

/// Direction text flows in within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WritingMode {
    /// Reading axis is x; lines stack along y.
    #[default]
    Horizontal,
    /// Reading axis is y; columns stack along x.
    Vertical,
}

impl WritingMode {
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Vertical)
    }

    /// Classifies a single item from the rotation part of its transform.
    ///
    /// An item is vertical when its glyph x-axis points mostly along the
    /// page y-axis (`|b| > |a| * 1.2`). Returns None if `a`/`b` are missing
    /// or not finite.
    pub fn of_item(item: &TextItem) -> Option<Self> {
        let (a, b) = match item.transform.as_slice() {
            [a, b, ..] if a.is_finite() && b.is_finite() => (*a, *b),
            _ => return None,
        };
        if b.abs() > a.abs() * VERTICAL_SKEW_RATIO {
            Some(Self::Vertical)
        } else {
            Some(Self::Horizontal)
        }
    }

    /// Majority vote over the classifiable items of a page.
    ///
    /// Ties and pages with nothing classifiable are horizontal.
    pub fn infer(items: &[TextItem]) -> Self {
        let (mut horizontal, mut vertical) = (0usize, 0usize);
        for mode in items.iter().filter_map(Self::of_item) {
            match mode {
                Self::Horizontal => horizontal += 1,
                Self::Vertical => vertical += 1,
            }
        }
        if vertical > horizontal {
            Self::Vertical
        } else {
            Self::Horizontal
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl fmt::Display for WritingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WritingMode {
    type Err = RunError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "h" | "horizontal-tb" => Ok(Self::Horizontal),
            "vertical" | "v" | "vertical-rl" | "vertical-lr" => Ok(Self::Vertical),
            other => Err(RunError::InvalidWritingMode(other.to_string())),
        }
    }
}

/// A maximal group of consecutive items judged to lie on one reading line.
///
/// Runs only borrow their items. A run is created from a seed item and can
/// only grow, so it is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Run<'a> {
    items: Vec<&'a TextItem>,
    writing_mode: WritingMode,
}

impl<'a> Run<'a> {
    pub(crate) fn start(seed: &'a TextItem, writing_mode: WritingMode) -> Self {
        Self {
            items: vec![seed],
            writing_mode,
        }
    }

    pub(crate) fn push(&mut self, item: &'a TextItem) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[&'a TextItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<&'a TextItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false: runs start from a seed item.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn first(&self) -> &'a TextItem {
        // Seeded on construction.
        self.items[0]
    }

    pub fn last(&self) -> &'a TextItem {
        self.items[self.items.len() - 1]
    }

    pub const fn writing_mode(&self) -> WritingMode {
        self.writing_mode
    }

    /// Concatenated payloads of the run's items.
    pub fn text(&self) -> String {
        let total_len = self.items.iter().map(|i| i.text.len()).sum();
        let mut out = String::with_capacity(total_len);
        for item in &self.items {
            out.push_str(&item.text);
        }
        out
    }

    /// Union of the members' page-space boxes, skipping items without geometry.
    pub fn bounds(&self) -> Option<Rect> {
        union_rects(
            self.items
                .iter()
                .filter_map(|item| Placement::resolve(item))
                .map(|p| p.rect()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_of_item() {
        let vertical = TextItem::new("a", vec![0.0, 1.0, -1.0, 0.0, 10.0, 10.0], 1.0, 1.0);
        let horizontal = TextItem::at("a", 10.0, 10.0, 1.0, 1.0);
        assert_eq!(WritingMode::of_item(&vertical), Some(WritingMode::Vertical));
        assert_eq!(
            WritingMode::of_item(&horizontal),
            Some(WritingMode::Horizontal)
        );
        assert_eq!(WritingMode::of_item(&TextItem::unplaced("a", 1.0, 1.0)), None);
    }

    #[test]
    fn test_of_item_skew_ratio_boundary() {
        // |b| == |a| * 1.2 is not enough.
        let item = TextItem::new("a", vec![1.0, 1.2, 0.0, 1.0, 0.0, 0.0], 1.0, 1.0);
        assert_eq!(WritingMode::of_item(&item), Some(WritingMode::Horizontal));
    }

    #[test]
    fn test_infer_majority() {
        let v = |x: f64| TextItem::new("v", vec![0.0, 1.0, -1.0, 0.0, x, 0.0], 1.0, 1.0);
        let h = |x: f64| TextItem::at("h", x, 0.0, 1.0, 1.0);
        assert_eq!(
            WritingMode::infer(&[v(1.0), v(2.0), h(3.0)]),
            WritingMode::Vertical
        );
        assert_eq!(WritingMode::infer(&[v(1.0), h(2.0)]), WritingMode::Horizontal);
        assert_eq!(WritingMode::infer(&[]), WritingMode::Horizontal);
    }

    #[test]
    fn test_parse_writing_mode() {
        assert_eq!(
            "Vertical".parse::<WritingMode>().unwrap(),
            WritingMode::Vertical
        );
        assert_eq!(
            "horizontal-tb".parse::<WritingMode>().unwrap(),
            WritingMode::Horizontal
        );
        assert!(matches!(
            "diagonal".parse::<WritingMode>(),
            Err(RunError::InvalidWritingMode(_))
        ));
    }

    #[test]
    fn test_run_text_and_bounds() {
        let a = TextItem::at("Hel", 0.0, 0.0, 10.0, 12.0);
        let b = TextItem::unplaced("-", 0.0, 0.0);
        let c = TextItem::at("lo", 10.0, 1.0, 8.0, 12.0);
        let mut run = Run::start(&a, WritingMode::Horizontal);
        run.push(&b);
        run.push(&c);
        assert_eq!(run.text(), "Hel-lo");
        assert_eq!(run.len(), 3);
        assert!(!run.is_empty());
        assert_eq!(run.first().text, "Hel");
        assert_eq!(run.last().text, "lo");
        assert_eq!(run.bounds(), Some((0.0, 0.0, 18.0, 13.0)));
    }

    #[test]
    fn test_run_bounds_without_geometry() {
        let a = TextItem::unplaced("a", 1.0, 1.0);
        let run = Run::start(&a, WritingMode::Vertical);
        assert_eq!(run.bounds(), None);
        assert_eq!(run.writing_mode(), WritingMode::Vertical);
    }
}
