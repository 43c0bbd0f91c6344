//! Landmark scenarios
//!
//! A scenario is the recorded output of the external landmark detector: one
//! entry per frame, each carrying both eye contours or nothing (face not
//! detected). A built-in synthetic drowsy drive stands in when no recording
//! is supplied.

use drowsiness::FaceObservation;
use eye_metrics::{ContourError, EyeContour, Point2};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Scenario loading errors
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Frame {frame}: {source}")]
    BadContour {
        frame: usize,
        #[source]
        source: ContourError,
    },
}

/// One recorded frame: six `[x, y]` pairs per eye, or absent eyes when no
/// face was detected
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioFrame {
    /// Offset from scenario start (milliseconds), informational
    pub t_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_eye: Option<Vec<[f32; 2]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_eye: Option<Vec<[f32; 2]>>,
}

impl ScenarioFrame {
    /// Convert to the pipeline's inbound observation type.
    ///
    /// A frame missing either eye counts as face-not-detected.
    pub fn to_observation(&self, frame: usize) -> Result<FaceObservation, ScenarioError> {
        let (left, right) = match (&self.left_eye, &self.right_eye) {
            (Some(l), Some(r)) => (l, r),
            _ => return Ok(FaceObservation::NotDetected),
        };

        let contour = |raw: &[[f32; 2]]| -> Result<EyeContour, ScenarioError> {
            let points: Vec<Point2> = raw.iter().map(|&xy| Point2::from(xy)).collect();
            EyeContour::from_slice(&points)
                .map_err(|source| ScenarioError::BadContour { frame, source })
        };

        Ok(FaceObservation::Face {
            left_eye: contour(left)?,
            right_eye: contour(right)?,
        })
    }
}

/// A full replay scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub frames: Vec<ScenarioFrame>,
}

impl Scenario {
    /// Load a scenario from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    /// Parse a scenario from JSON text
    pub fn parse(raw: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Synthetic drowsy drive: alert driver, sustained closure long enough
    /// to trip the default monitor, recovery, then a closure streak broken
    /// by a lost-tracking frame.
    pub fn synthetic_drowsy_drive() -> Self {
        let mut frames = Vec::new();
        let mut t_ms = 0u64;

        let mut push = |frames: &mut Vec<ScenarioFrame>, openness: Option<f32>| {
            let eye = openness.map(synthetic_eye);
            frames.push(ScenarioFrame {
                t_ms,
                left_eye: eye.clone(),
                right_eye: eye,
            });
            t_ms += 33;
        };

        // Eyes open, cruising
        for _ in 0..30 {
            push(&mut frames, Some(0.30));
        }
        // Sustained closure, past the default 20-frame debounce
        for _ in 0..28 {
            push(&mut frames, Some(0.12));
        }
        // Recovery
        for _ in 0..15 {
            push(&mut frames, Some(0.32));
        }
        // Closure streak cut short by a lost-tracking frame
        for _ in 0..12 {
            push(&mut frames, Some(0.14));
        }
        push(&mut frames, None);
        for _ in 0..10 {
            push(&mut frames, Some(0.14));
        }
        // Back to normal
        for _ in 0..10 {
            push(&mut frames, Some(0.28));
        }

        Self { frames }
    }
}

/// Build a contour with the given openness: corners span width 4, vertical
/// pairs sit 2 * openness above/below the corner line.
fn synthetic_eye(openness: f32) -> Vec<[f32; 2]> {
    let h = 2.0 * openness;
    vec![
        [100.0, 200.0],
        [101.0, 200.0 - h],
        [103.0, 200.0 - h],
        [104.0, 200.0],
        [103.0, 200.0 + h],
        [101.0, 200.0 + h],
    ]
}
