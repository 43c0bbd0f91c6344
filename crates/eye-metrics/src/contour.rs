//! Six-point eye contours and openness scoring

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::point::Point2;

/// Errors building an eye contour
#[derive(Debug, Clone, Error)]
pub enum ContourError {
    /// Contour must have exactly six points
    #[error("Eye contour requires exactly 6 points, got {0}")]
    WrongPointCount(usize),
}

/// An eye contour: exactly six ordered landmark points.
///
/// Ordering follows the upstream landmark convention: points 0 and 3 are the
/// horizontal corners, pairs (1, 5) and (2, 4) are the upper/lower vertical
/// pairs. The contour is opaque beyond this ordering; which face-mesh indices
/// produced it is the upstream detector's concern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyeContour([Point2; 6]);

impl EyeContour {
    /// Create a contour from six ordered points
    pub fn new(points: [Point2; 6]) -> Self {
        Self(points)
    }

    /// Create a contour from a slice of ordered points
    pub fn from_slice(points: &[Point2]) -> Result<Self, ContourError> {
        let points: [Point2; 6] = points
            .try_into()
            .map_err(|_| ContourError::WrongPointCount(points.len()))?;
        Ok(Self(points))
    }

    /// The six contour points, in order
    pub fn points(&self) -> &[Point2; 6] {
        &self.0
    }

    /// Compute the openness score (eye aspect ratio).
    ///
    /// With A = d(p1, p5), B = d(p2, p4) the vertical openings and
    /// C = d(p0, p3) the horizontal width, the score is (A + B) / (2 * C).
    /// A zero-width contour (coincident corners) yields exactly 0.0; that is
    /// degenerate geometry, not an error.
    pub fn openness(&self) -> f32 {
        let p = &self.0;
        let a = p[1].distance_to(&p[5]);
        let b = p[2].distance_to(&p[4]);
        let c = p[0].distance_to(&p[3]);

        if c == 0.0 {
            return 0.0;
        }

        (a + b) / (2.0 * c)
    }
}

/// Average the two per-eye scores into one per-frame score
pub fn average_openness(left: f32, right: f32) -> f32 {
    (left + right) / 2.0
}
