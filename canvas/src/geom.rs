//! Canvas geometry: offsets, sizes, and placed-component boxes.
//!
//! All coordinates are CSS pixels relative to the canvas origin (top-left).

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A top/left offset on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub top: f64,
    pub left: f64,
}

impl Offset {
    #[must_use]
    pub fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions are finite and strictly positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Canvas dimensions. Always positive once accepted by a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Explicit placement of a component in free-position layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    /// Stacking override; ties fall back to sequence order.
    #[serde(default)]
    pub z_index: i64,
}

impl Position {
    #[must_use]
    pub fn new(offset: Offset, size: Size, z_index: i64) -> Self {
        Self { top: offset.top, left: offset.left, width: size.width, height: size.height, z_index }
    }

    #[must_use]
    pub fn offset(&self) -> Offset {
        Offset::new(self.top, self.left)
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Coordinates are non-negative and the box has positive extent.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.top.is_finite() && self.left.is_finite() && self.top >= 0.0 && self.left >= 0.0 && self.size().is_valid()
    }

    /// Whether `point` lies inside the box (edges inclusive on the top/left side).
    #[must_use]
    pub fn contains(&self, point: Offset) -> bool {
        point.left >= self.left
            && point.left < self.left + self.width
            && point.top >= self.top
            && point.top < self.top + self.height
    }

    /// Clamp `offset` for a box of this size on `canvas`.
    ///
    /// Coordinates never go negative. The horizontal axis is kept fully inside
    /// the canvas (a box wider than the canvas pins to `left = 0`); the vertical
    /// axis may overflow the bottom edge because H5 pages scroll.
    #[must_use]
    pub fn clamp_offset(size: Size, offset: Offset, canvas: CanvasSize) -> Offset {
        let max_left = (f64::from(canvas.width) - size.width).max(0.0);
        let left = if offset.left.is_finite() { offset.left.clamp(0.0, max_left) } else { 0.0 };
        let top = if offset.top.is_finite() { offset.top.max(0.0) } else { 0.0 };
        Offset::new(top, left)
    }
}
