//! Transform resolution.
//!
//! Decodes an item's affine placement into a page-space origin and extents.
//! Items whose transform cannot be decoded have no placement; every signal
//! built on top treats that as "no information", never as a break.

use crate::model::{TextItem, WritingMode};
use crate::utils::{HasBBox, Point, Rect, finite_or_zero, matrix_from_slice};

/// Page-space geometry of a single item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Placement {
    /// Resolves an item's placement.
    ///
    /// Returns None if the transform has fewer than six coefficients or the
    /// translation part is not finite. Non-finite extents read as 0.
    pub fn resolve(item: &TextItem) -> Option<Self> {
        let (_, _, _, _, e, f) = matrix_from_slice(&item.transform)?;
        if !e.is_finite() || !f.is_finite() {
            return None;
        }
        Some(Self {
            x: e,
            y: f,
            width: finite_or_zero(item.width),
            height: finite_or_zero(item.height),
        })
    }

    pub const fn origin(&self) -> Point {
        (self.x, self.y)
    }

    /// Offset along the reading axis.
    pub const fn reading_offset(&self, mode: WritingMode) -> f64 {
        match mode {
            WritingMode::Horizontal => self.x,
            WritingMode::Vertical => self.y,
        }
    }

    /// Offset along the cross axis.
    pub const fn cross_offset(&self, mode: WritingMode) -> f64 {
        match mode {
            WritingMode::Horizontal => self.y,
            WritingMode::Vertical => self.x,
        }
    }

    /// Extent along the reading axis.
    pub const fn reading_extent(&self, mode: WritingMode) -> f64 {
        match mode {
            WritingMode::Horizontal => self.width,
            WritingMode::Vertical => self.height,
        }
    }

    /// Extent along the cross axis; the font-size proxy.
    pub const fn cross_extent(&self, mode: WritingMode) -> f64 {
        match mode {
            WritingMode::Horizontal => self.height,
            WritingMode::Vertical => self.width,
        }
    }

    pub fn rect(&self) -> Rect {
        self.bbox()
    }
}

impl HasBBox for Placement {
    fn x0(&self) -> f64 {
        self.x.min(self.x + self.width)
    }

    fn y0(&self) -> f64 {
        self.y.min(self.y + self.height)
    }

    fn x1(&self) -> f64 {
        self.x.max(self.x + self.width)
    }

    fn y1(&self) -> f64 {
        self.y.max(self.y + self.height)
    }
}

/// Cross-axis extent read straight from an item, without needing a placement.
pub fn cross_extent(item: &TextItem, mode: WritingMode) -> f64 {
    finite_or_zero(match mode {
        WritingMode::Horizontal => item.height,
        WritingMode::Vertical => item.width,
    })
}

/// Reading-axis extent read straight from an item.
pub fn reading_extent(item: &TextItem, mode: WritingMode) -> f64 {
    finite_or_zero(match mode {
        WritingMode::Horizontal => item.width,
        WritingMode::Vertical => item.height,
    })
}
