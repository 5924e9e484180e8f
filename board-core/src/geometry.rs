//! Axis-aligned bounding box math for rotated elements.

use serde::{Deserialize, Serialize};

use crate::element::Positionable;

/// An axis-aligned rectangle in document space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The rectangle spanned by two opposite corners, in any order.
    ///
    /// This is how a rubber-band selection dragged in any direction becomes
    /// a proper rectangle.
    #[must_use]
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(x1.min(x2), y1.min(y2), (x2 - x1).abs(), (y2 - y1).abs())
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether the two rectangles overlap. Touching edges do not count.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Convert degrees to radians.
#[must_use]
pub fn deg_to_rad(angle: f64) -> f64 {
    angle / 180.0 * std::f64::consts::PI
}

/// Rotate the point `(pivot_x + dx, pivot_y + dy)` about the pivot.
///
/// `angle` is in radians. Returns the rotated point.
#[must_use]
pub fn rotate_corner(pivot_x: f64, pivot_y: f64, dx: f64, dy: f64, angle: f64) -> (f64, f64) {
    let distance = dx.hypot(dy);
    let angle = angle + dy.atan2(dx);
    (
        pivot_x + distance * angle.cos(),
        pivot_y + distance * angle.sin(),
    )
}

/// Smallest axis-aligned rectangle containing the rotated element.
///
/// All four corners are rotated about the element's top-left corner by its
/// rotation, then the min/max of the rotated corners is taken.
#[must_use]
pub fn client_rect(bounds: &Positionable) -> Rect {
    let angle = deg_to_rad(bounds.rotation);
    let corners = [
        (0.0, 0.0),
        (bounds.width, 0.0),
        (bounds.width, bounds.height),
        (0.0, bounds.height),
    ]
    .map(|(dx, dy)| rotate_corner(bounds.x, bounds.y, dx, dy, angle));

    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for (x, y) in corners {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}
