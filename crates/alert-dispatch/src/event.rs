//! Alert event records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Spoken warning used when no custom message is configured
pub const DEFAULT_ALERT_MESSAGE: &str = "Wake up! Driver drowsiness detected.";

/// One drowsiness alert, with the frame context that triggered it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertEvent {
    /// Unique event id
    pub id: Uuid,
    /// Message to announce
    pub message: String,
    /// Averaged openness score on the triggering frame
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openness: Option<f32>,
    /// Sub-threshold streak length when the alert fired
    pub consecutive_low_frames: u32,
    /// Wall-clock time the alert was raised
    pub raised_at: DateTime<Utc>,
}

impl AlertEvent {
    /// Create an alert with the default message
    pub fn new(openness: Option<f32>, consecutive_low_frames: u32) -> Self {
        Self::with_message(DEFAULT_ALERT_MESSAGE, openness, consecutive_low_frames)
    }

    /// Create an alert with a custom message
    pub fn with_message(
        message: impl Into<String>,
        openness: Option<f32>,
        consecutive_low_frames: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            openness,
            consecutive_low_frames,
            raised_at: Utc::now(),
        }
    }
}
