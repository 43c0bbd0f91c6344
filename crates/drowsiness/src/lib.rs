//! Drowsiness Monitor
//!
//! Converts a stream of per-frame eye-openness measurements into a debounced,
//! cooldown rate-limited alert signal:
//! - Per-eye openness scoring and averaging (via eye-metrics)
//! - Consecutive low-frame counting with reset on recovery or lost tracking
//! - Alert gating with a configurable cooldown

pub mod analysis;
pub mod config;
pub mod monitor;
pub mod observation;

pub use analysis::FrameAnalysis;
pub use config::MonitorConfig;
pub use monitor::{DrowsinessMonitor, DrowsinessState, FrameResult};
pub use observation::FaceObservation;

use eye_metrics::average_openness;
use metrics::counter;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

/// Monitor error types
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Per-frame processing pipeline
///
/// Owns the monitor and turns a raw [`FaceObservation`] into a
/// [`FrameAnalysis`]: per-eye openness, averaging, state machine update.
pub struct FramePipeline {
    monitor: DrowsinessMonitor,
    last_state: DrowsinessState,
}

impl FramePipeline {
    /// Create a pipeline with a validated configuration
    pub fn new(config: MonitorConfig) -> Result<Self, MonitorError> {
        config.validate()?;
        Ok(Self {
            monitor: DrowsinessMonitor::new(config),
            last_state: DrowsinessState::Normal,
        })
    }

    /// Process one frame's observation at the given time.
    ///
    /// Infallible: detection failures and degenerate contours are ordinary
    /// inputs, not errors.
    pub fn process(&mut self, observation: &FaceObservation, now: Instant) -> FrameAnalysis {
        counter!("frames_processed_total").increment(1);

        let openness = match observation {
            FaceObservation::Face { left_eye, right_eye } => {
                Some(average_openness(left_eye.openness(), right_eye.openness()))
            }
            FaceObservation::NotDetected => {
                counter!("faces_missed_total").increment(1);
                None
            }
        };

        let result = self.monitor.process_frame(openness, now);

        if result.state != self.last_state {
            debug!(from = ?self.last_state, to = ?result.state, "Monitor state changed");
            self.last_state = result.state;
        }
        if result.fire_alert {
            counter!("alerts_fired_total").increment(1);
            info!(
                openness = ?openness,
                consecutive_low_frames = self.monitor.consecutive_low_frames(),
                "Drowsiness alert fired"
            );
        }

        FrameAnalysis {
            face_detected: observation.is_detected(),
            openness,
            consecutive_low_frames: self.monitor.consecutive_low_frames(),
            state: result.state,
            fire_alert: result.fire_alert,
        }
    }

    /// Reset tracked state (on driver change)
    pub fn reset(&mut self) {
        self.monitor.reset();
        self.last_state = DrowsinessState::Normal;
    }
}
