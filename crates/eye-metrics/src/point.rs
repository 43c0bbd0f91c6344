//! 2D image-space points

use serde::{Deserialize, Serialize};

/// A 2D point in image coordinates (pixels, f32)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<[f32; 2]> for Point2 {
    fn from(xy: [f32; 2]) -> Self {
        Self { x: xy[0], y: xy[1] }
    }
}
