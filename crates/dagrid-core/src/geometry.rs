//! Rectangle math shared by the line extractor, the binder and the
//! table assembler.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from two opposite corners in any order.
    pub fn from_corners(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Rect {
            x: x0.min(x1),
            y: y0.min(y1),
            width: (x1 - x0).abs(),
            height: (y1 - y0).abs(),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Mirror the rectangle about the x axis so that y grows down the page.
    pub fn invert_y(&self) -> Rect {
        Rect {
            x: self.x,
            y: -self.bottom(),
            width: self.width,
            height: self.height,
        }
    }
}

/// Area of a rectangle; degenerate rectangles have zero area.
pub fn area(rect: &Rect) -> f64 {
    rect.width.max(0.0) * rect.height.max(0.0)
}

/// Intersection of two rectangles, or `None` when they do not overlap on
/// both axes.
pub fn intersect(a: &Rect, b: &Rect) -> Option<Rect> {
    let x0 = a.x.max(b.x);
    let y0 = a.y.max(b.y);
    let x1 = a.right().min(b.right());
    let y1 = a.bottom().min(b.bottom());
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
}

/// Percentage of `inner`'s area that lies inside `outer`, in `[0, 100]`.
///
/// A zero-area `inner` overlaps nothing.
pub fn overlap_percentage(inner: &Rect, outer: &Rect) -> f64 {
    let inner_area = area(inner);
    if inner_area <= 0.0 {
        return 0.0;
    }
    match intersect(inner, outer) {
        Some(overlap) => (100.0 * area(&overlap) / inner_area).clamp(0.0, 100.0),
        None => 0.0,
    }
}

/// Overlap of the x-spans of two rectangles as a percentage of their
/// combined span, ignoring y entirely.
pub fn horizontal_overlap_percentage(a: &Rect, b: &Rect) -> f64 {
    if a.width <= 0.0 || b.width <= 0.0 {
        return 0.0;
    }
    let overlap = a.right().min(b.right()) - a.x.max(b.x);
    if overlap <= 0.0 {
        return 0.0;
    }
    let span = a.right().max(b.right()) - a.x.min(b.x);
    100.0 * overlap / span
}
