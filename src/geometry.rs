//! Geometric primitives in PDF user space (points, origin bottom-left).

use serde::{Deserialize, Serialize};

/// A rectangle given by its lower-left and upper-right corners.
///
/// This is the form PDF uses for `/MediaBox` and `/BBox` arrays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Lower-left x
    pub llx: f64,
    /// Lower-left y
    pub lly: f64,
    /// Upper-right x
    pub urx: f64,
    /// Upper-right y
    pub ury: f64,
}

impl Rect {
    /// Create a rectangle from corner coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_assembly::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 612.0, 792.0);
    /// assert_eq!(rect.width(), 612.0);
    /// assert_eq!(rect.height(), 792.0);
    /// ```
    pub fn new(llx: f64, lly: f64, urx: f64, ury: f64) -> Self {
        Self { llx, lly, urx, ury }
    }

    /// Create a rectangle anchored at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f64 {
        self.urx - self.llx
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f64 {
        self.ury - self.lly
    }

    /// Whether the rectangle has a positive, finite area.
    pub fn is_valid(&self) -> bool {
        let (w, h) = (self.width(), self.height());
        w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0
    }

    /// Affine matrix `[a b c d e f]` that maps this rectangle onto `target`.
    pub fn fit_matrix(&self, target: &Rect) -> [f64; 6] {
        let sx = target.width() / self.width();
        let sy = target.height() / self.height();
        [sx, 0.0, 0.0, sy, target.llx - self.llx * sx, target.lly - self.lly * sy]
    }
}
