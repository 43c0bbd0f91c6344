//! Monitor configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::MonitorError;

/// Drowsiness monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Openness score below which an eye counts as closed for the frame
    pub openness_threshold: f32,

    /// Consecutive sub-threshold frames required to declare drowsiness
    pub consecutive_frames: u32,

    /// Minimum interval between successive alert actions (milliseconds)
    pub alert_cooldown_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            openness_threshold: 0.21,
            consecutive_frames: 20,
            alert_cooldown_ms: 3000,
        }
    }
}

impl MonitorConfig {
    /// Create strict config (trips earlier, alerts more often)
    pub fn strict() -> Self {
        Self {
            openness_threshold: 0.24,
            consecutive_frames: 12,
            alert_cooldown_ms: 2000,
        }
    }

    /// Create lenient config (tolerates longer closures)
    pub fn lenient() -> Self {
        Self {
            openness_threshold: 0.18,
            consecutive_frames: 30,
            alert_cooldown_ms: 5000,
        }
    }

    /// Alert cooldown as a duration
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.alert_cooldown_ms)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), MonitorError> {
        if !self.openness_threshold.is_finite() || self.openness_threshold <= 0.0 {
            return Err(MonitorError::Config(format!(
                "openness_threshold must be finite and positive, got {}",
                self.openness_threshold
            )));
        }
        if self.consecutive_frames == 0 {
            return Err(MonitorError::Config(
                "consecutive_frames must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
