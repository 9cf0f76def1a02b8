//! Positioned text items as handed over by a content-stream interpreter.

use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::{MATRIX_IDENTITY, Matrix};

/// A positioned, already-shaped text fragment.
///
/// The engine never interprets `text`. The transform is kept as a raw
/// coefficient list so that missing or truncated placements from a sloppy
/// producer still load; they simply carry no geometry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextItem {
    /// Text payload (`str` in pdf.js text content dumps).
    #[serde(alias = "str", default)]
    pub text: String,

    /// Affine placement `[a, b, c, d, e, f]`; `e`/`f` are the page-space origin.
    #[serde(default, deserialize_with = "lenient_coeffs")]
    pub transform: Vec<f64>,

    /// Extent along the item's local horizontal axis.
    #[serde(default, deserialize_with = "lenient_extent")]
    pub width: f64,

    /// Extent along the item's local vertical axis.
    #[serde(default, deserialize_with = "lenient_extent")]
    pub height: f64,

    /// Fill colour, if the producer reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl TextItem {
    pub fn new(
        text: impl Into<String>,
        transform: impl Into<Vec<f64>>,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            text: text.into(),
            transform: transform.into(),
            width,
            height,
            color: None,
        }
    }

    /// Creates an upright item whose origin is at (x, y).
    pub fn at(text: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        let (a, b, c, d, _, _) = MATRIX_IDENTITY;
        Self::new(text, vec![a, b, c, d, x, y], width, height)
    }

    /// Creates an item from a full placement matrix.
    pub fn with_matrix(text: impl Into<String>, m: Matrix, width: f64, height: f64) -> Self {
        let (a, b, c, d, e, f) = m;
        Self::new(text, vec![a, b, c, d, e, f], width, height)
    }

    /// Creates an item with no placement at all.
    pub fn unplaced(text: impl Into<String>, width: f64, height: f64) -> Self {
        Self::new(text, Vec::new(), width, height)
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

// JSON has no NaN, so producers emit null for unknown coefficients.
fn lenient_coeffs<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Option<f64>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|c| c.unwrap_or(f64::NAN))
        .collect())
}

fn lenient_extent<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<f64> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or(0.0))
}
