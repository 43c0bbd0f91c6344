//! Per-frame analysis results

use serde::{Deserialize, Serialize};

use crate::monitor::DrowsinessState;

/// Complete per-frame analysis, consumed by the rendering collaborator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameAnalysis {
    /// Whether a face was detected
    pub face_detected: bool,

    /// Averaged openness score across both eyes (if a face was detected)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openness: Option<f32>,

    /// Uninterrupted sub-threshold frame count after this frame
    pub consecutive_low_frames: u32,

    /// Derived monitor state
    pub state: DrowsinessState,

    /// Whether a new alert action fires on this frame
    pub fire_alert: bool,
}

impl FrameAnalysis {
    /// Whether the drowsiness banner should be shown
    pub fn is_alerting(&self) -> bool {
        self.state == DrowsinessState::Alerting
    }
}
