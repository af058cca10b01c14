//! Point and size types for overlay placement.
//!
//! All values are logical pixels relative to the composition surface.

use serde::{Deserialize, Serialize};

/// A 2D point (or pointer position) in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Per-axis difference `self - origin`.
    pub fn delta_from(&self, origin: Point) -> Point {
        Point {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }

    /// Per-axis sum.
    pub fn offset(&self, delta: Point) -> Point {
        Point {
            x: self.x + delta.x,
            y: self.y + delta.y,
        }
    }

    /// Clamp a top-left position so a box of `size` stays inside `bounds`.
    ///
    /// Matches `max(0, min(v, bound - size))`: when the box is larger than
    /// the bounds the position pins to 0.
    pub fn clamp_within(&self, size: Size, bounds: Size) -> Point {
        Point {
            x: self.x.min(bounds.width - size.width).max(0.0),
            y: self.y.min(bounds.height - size.height).max(0.0),
        }
    }
}

/// Width and height in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Grow or shrink by a pointer delta.
    pub fn grow(&self, delta: Point) -> Size {
        Size {
            width: self.width + delta.x,
            height: self.height + delta.y,
        }
    }

    /// Per-axis lower bound.
    pub fn at_least(&self, min: Size) -> Size {
        Size {
            width: self.width.max(min.width),
            height: self.height.max(min.height),
        }
    }
}

/// Axis-aligned rectangle described by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub origin: Point,
    pub size: Size,
}

impl Bounds {
    pub fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Inclusive hit test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x && p.x <= self.right() && p.y >= self.origin.y && p.y <= self.bottom()
    }

    /// Square of side `side` anchored to the bottom-right corner.
    pub fn bottom_right_square(&self, side: f32) -> Bounds {
        let side = side.min(self.size.width).min(self.size.height).max(0.0);
        Bounds {
            origin: Point::new(self.right() - side, self.bottom() - side),
            size: Size::new(side, side),
        }
    }

    /// Square of side `side` inset by `inset` from the top-right corner.
    pub fn top_right_square(&self, side: f32, inset: f32) -> Bounds {
        Bounds {
            origin: Point::new(self.right() - inset - side, self.origin.y + inset),
            size: Size::new(side, side),
        }
    }
}
