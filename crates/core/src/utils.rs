//! Miscellaneous geometry routines.
//!
//! Provides the geometric types shared across the crate:
//! - Point, Rect and Matrix tuples
//! - Finite-number helpers for reading producer data
//! - Bounding-box helpers

/// A 2D point (x, y).
pub type Point = (f64, f64);

/// A rectangle defined by (x0, y0, x1, y1) where (x0, y0) is typically bottom-left
/// and (x1, y1) is top-right.
pub type Rect = (f64, f64, f64, f64);

/// A 6-element affine transformation matrix (a, b, c, d, e, f).
/// Transforms point (x, y) to (ax + cy + e, bx + dy + f).
pub type Matrix = (f64, f64, f64, f64, f64, f64);

/// Identity transformation matrix.
pub const MATRIX_IDENTITY: Matrix = (1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

/// Builds a matrix from a coefficient list.
///
/// Returns None if fewer than six coefficients are present. Extra
/// coefficients are ignored.
pub fn matrix_from_slice(coeffs: &[f64]) -> Option<Matrix> {
    match coeffs {
        [a, b, c, d, e, f, ..] => Some((*a, *b, *c, *d, *e, *f)),
        _ => None,
    }
}

/// Returns the value, or 0 if it is NaN or infinite.
#[inline]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Normalizes an angle in degrees into the range (-180, 180].
pub fn normalize_degree(degree: f64) -> f64 {
    let mut value = degree;
    while value > 180.0 {
        value -= 360.0;
    }
    while value <= -180.0 {
        value += 360.0;
    }
    value
}

/// Trait for objects that have a bounding box.
pub trait HasBBox {
    fn x0(&self) -> f64;
    fn y0(&self) -> f64;
    fn x1(&self) -> f64;
    fn y1(&self) -> f64;

    fn bbox(&self) -> Rect {
        (self.x0(), self.y0(), self.x1(), self.y1())
    }

    fn width(&self) -> f64 {
        self.x1() - self.x0()
    }

    fn height(&self) -> f64 {
        self.y1() - self.y0()
    }
}

/// Returns the union of a sequence of rectangles, or None if it is empty.
pub fn union_rects<I: IntoIterator<Item = Rect>>(rects: I) -> Option<Rect> {
    let mut bound: Option<Rect> = None;
    for (x0, y0, x1, y1) in rects {
        bound = Some(match bound {
            None => (x0, y0, x1, y1),
            Some((bx0, by0, bx1, by1)) => (bx0.min(x0), by0.min(y0), bx1.max(x1), by1.max(y1)),
        });
    }
    bound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_from_slice_requires_six() {
        assert_eq!(matrix_from_slice(&[1.0, 0.0, 0.0, 1.0, 5.0]), None);
        assert_eq!(
            matrix_from_slice(&[1.0, 0.0, 0.0, 1.0, 5.0, 6.0, 7.0]),
            Some((1.0, 0.0, 0.0, 1.0, 5.0, 6.0))
        );
    }

    #[test]
    fn test_finite_or_zero() {
        assert_eq!(finite_or_zero(3.5), 3.5);
        assert_eq!(finite_or_zero(f64::NAN), 0.0);
        assert_eq!(finite_or_zero(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_normalize_degree() {
        assert_eq!(normalize_degree(270.0), -90.0);
        assert_eq!(normalize_degree(-180.0), 180.0);
        assert_eq!(normalize_degree(180.0), 180.0);
        assert_eq!(normalize_degree(45.0), 45.0);
    }

    #[test]
    fn test_union_rects() {
        assert_eq!(union_rects(Vec::<Rect>::new()), None);
        assert_eq!(
            union_rects(vec![(0.0, 0.0, 10.0, 12.0), (20.0, -2.0, 30.0, 8.0)]),
            Some((0.0, -2.0, 30.0, 12.0))
        );
    }
}
