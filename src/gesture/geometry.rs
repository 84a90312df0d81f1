//! Angle math for the circular control

use serde::{Deserialize, Serialize};

/// A pointer position in the same coordinate space as the dial bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding box of the dial
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DialBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DialBounds {
    /// Square box of edge `size` anchored at the origin
    pub fn square(size: f64) -> Self {
        Self { left: 0.0, top: 0.0, width: size, height: size }
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Angle of `point` around the center in degrees, in (-180, 180]
    pub fn angle_of(&self, point: Point) -> f64 {
        let center = self.center();
        (point.y - center.y).atan2(point.x - center.x).to_degrees()
    }
}

/// Difference between two angles, folded into (-180, 180] so that crossing
/// the ±180° seam reads as a small step.
pub fn angle_delta(from: f64, to: f64) -> f64 {
    let delta = to - from;
    if delta > 180.0 {
        delta - 360.0
    } else if delta <= -180.0 {
        delta + 360.0
    } else {
        delta
    }
}
