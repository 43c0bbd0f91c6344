//! Inbound per-frame observation from the landmark detector

use eye_metrics::EyeContour;
use serde::{Deserialize, Serialize};

/// What the external landmark detector reported for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FaceObservation {
    /// Face found, with both eye contours in anatomical order
    Face {
        left_eye: EyeContour,
        right_eye: EyeContour,
    },
    /// No face in this frame
    NotDetected,
}

impl FaceObservation {
    /// Whether a face was detected
    pub fn is_detected(&self) -> bool {
        matches!(self, FaceObservation::Face { .. })
    }
}
