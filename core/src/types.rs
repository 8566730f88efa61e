//! Shared primitive types used across the entire simulation.

use serde::{Deserialize, Serialize};

/// A simulation tick. One tick = one synchronous step of every wire.
pub type Tick = u64;

/// Index of a wire within its circuit, assigned in raster discovery order.
pub type WireId = usize;

/// Index of a conductive material within a palette.
pub type Material = u8;

/// A pixel coordinate. Origin is the top-left corner of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// A half-open axis-aligned rectangle: `min` inclusive, `max` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// The 1x1 rectangle covering a single pixel.
    pub fn pixel(p: Point) -> Self {
        Self {
            min: p,
            max: Point::new(p.x + 1, p.y + 1),
        }
    }

    /// Grow the rectangle so it also covers `p`.
    pub fn include(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x + 1);
        self.max.y = self.max.y.max(p.y + 1);
    }

    pub fn width(&self) -> u32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> u32 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }
}
