//! Drowsiness state machine
//!
//! Turns a stream of per-frame openness scores into a debounced, cooldown
//! rate-limited alert signal. Time is always injected by the caller, so the
//! monitor never reads a clock.

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::MonitorConfig;

/// Observable monitor state, derived each frame rather than stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DrowsinessState {
    #[default]
    Normal,
    Alerting,
}

/// Per-frame monitor verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameResult {
    /// Current derived state
    pub state: DrowsinessState,
    /// Whether a new alert action should fire this frame
    pub fire_alert: bool,
}

/// Tracked state, owned exclusively by the monitor and never persisted
#[derive(Debug, Default)]
struct MonitorState {
    /// Frames where openness stayed below threshold without interruption
    consecutive_low_frames: u32,
    /// When the last alert action was decided, None = never
    last_alert: Option<Instant>,
}

/// Drowsiness monitor
///
/// `process_frame` is the sole mutator of the tracked state and must be
/// called strictly sequentially, once per video frame.
pub struct DrowsinessMonitor {
    config: MonitorConfig,
    state: MonitorState,
}

impl DrowsinessMonitor {
    /// Create a monitor with the given configuration
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            state: MonitorState::default(),
        }
    }

    /// Process one frame's averaged openness score.
    ///
    /// `openness` is `None` exactly when no face was detected this frame;
    /// that fully cancels progress toward an alert, since losing tracking
    /// must not be mistaken for sustained eye closure. `now` is the caller's
    /// wall clock reading for this frame.
    pub fn process_frame(&mut self, openness: Option<f32>, now: Instant) -> FrameResult {
        match openness {
            None => {
                self.state.consecutive_low_frames = 0;
                return FrameResult {
                    state: DrowsinessState::Normal,
                    fire_alert: false,
                };
            }
            Some(score) if score < self.config.openness_threshold => {
                self.state.consecutive_low_frames =
                    self.state.consecutive_low_frames.saturating_add(1);
            }
            Some(_) => {
                self.state.consecutive_low_frames = 0;
            }
        }

        let state = if self.state.consecutive_low_frames >= self.config.consecutive_frames {
            DrowsinessState::Alerting
        } else {
            DrowsinessState::Normal
        };

        // Strict comparison: an alert exactly cooldown seconds after the
        // previous one is still suppressed. Saturating subtraction keeps a
        // non-monotonic caller from panicking the monitor.
        let cooldown_elapsed = match self.state.last_alert {
            None => true,
            Some(last) => now.saturating_duration_since(last) > self.config.cooldown(),
        };

        let fire_alert = state == DrowsinessState::Alerting && cooldown_elapsed;
        if fire_alert {
            // The decision to attempt an alert defines the cooldown window,
            // not the downstream delivery outcome.
            self.state.last_alert = Some(now);
        }

        FrameResult { state, fire_alert }
    }

    /// Current uninterrupted sub-threshold frame count
    pub fn consecutive_low_frames(&self) -> u32 {
        self.state.consecutive_low_frames
    }

    /// Monitor configuration
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Reset tracked state (on driver change)
    pub fn reset(&mut self) {
        self.state = MonitorState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn monitor(threshold: f32, frames: u32, cooldown_ms: u64) -> DrowsinessMonitor {
        DrowsinessMonitor::new(MonitorConfig {
            openness_threshold: threshold,
            consecutive_frames: frames,
            alert_cooldown_ms: cooldown_ms,
        })
    }

    #[test]
    fn test_no_face_resets_counter() {
        let mut m = monitor(0.21, 3, 0);
        let t0 = Instant::now();

        m.process_frame(Some(0.10), t0);
        m.process_frame(Some(0.10), t0);
        assert_eq!(m.consecutive_low_frames(), 2);

        let result = m.process_frame(None, t0);
        assert_eq!(result.state, DrowsinessState::Normal);
        assert!(!result.fire_alert);
        assert_eq!(m.consecutive_low_frames(), 0);
    }

    #[test]
    fn test_counter_threshold_edge() {
        let mut m = monitor(0.21, 3, 0);
        let t0 = Instant::now();

        // consecutive_frames - 1 low frames: still normal
        for _ in 0..2 {
            let result = m.process_frame(Some(0.10), t0);
            assert_eq!(result.state, DrowsinessState::Normal);
            assert!(!result.fire_alert);
        }

        // One more trips the alert
        let result = m.process_frame(Some(0.10), t0);
        assert_eq!(result.state, DrowsinessState::Alerting);
        assert!(result.fire_alert);
    }

    #[test]
    fn test_high_score_resets_counter() {
        let mut m = monitor(0.21, 3, 0);
        let t0 = Instant::now();

        m.process_frame(Some(0.10), t0);
        m.process_frame(Some(0.10), t0);
        m.process_frame(Some(0.30), t0);
        assert_eq!(m.consecutive_low_frames(), 0);

        // Streak restarts from zero
        m.process_frame(Some(0.10), t0);
        m.process_frame(Some(0.10), t0);
        let result = m.process_frame(Some(0.10), t0);
        assert_eq!(result.state, DrowsinessState::Alerting);
    }

    #[test]
    fn test_threshold_is_strict_less_than() {
        let mut m = monitor(0.21, 1, 0);
        let t0 = Instant::now();

        // Exactly at threshold counts as open
        let result = m.process_frame(Some(0.21), t0);
        assert_eq!(result.state, DrowsinessState::Normal);

        let result = m.process_frame(Some(0.209), t0);
        assert_eq!(result.state, DrowsinessState::Alerting);
    }

    #[test]
    fn test_cooldown_suppresses_second_alert() {
        let mut m = monitor(0.21, 2, 3000);
        let t0 = Instant::now();

        m.process_frame(Some(0.10), t0);
        let first = m.process_frame(Some(0.10), t0 + Duration::from_secs(1));
        assert_eq!(first.state, DrowsinessState::Alerting);
        assert!(first.fire_alert);

        // Still alerting one second later, but inside the cooldown window
        let second = m.process_frame(Some(0.10), t0 + Duration::from_secs(2));
        assert_eq!(second.state, DrowsinessState::Alerting);
        assert!(!second.fire_alert);
    }

    #[test]
    fn test_refire_after_cooldown_elapses() {
        let mut m = monitor(0.21, 2, 3000);
        let t0 = Instant::now();

        m.process_frame(Some(0.10), t0);
        let first = m.process_frame(Some(0.10), t0);
        assert!(first.fire_alert);

        // Counter still at/above threshold once the cooldown has elapsed
        let later = m.process_frame(Some(0.10), t0 + Duration::from_millis(3001));
        assert_eq!(later.state, DrowsinessState::Alerting);
        assert!(later.fire_alert);
    }

    #[test]
    fn test_cooldown_boundary_is_exclusive() {
        let mut m = monitor(0.21, 1, 3000);
        let t0 = Instant::now();

        assert!(m.process_frame(Some(0.10), t0).fire_alert);

        // Exactly cooldown later: suppressed (strict >)
        let at_boundary = m.process_frame(Some(0.10), t0 + Duration::from_millis(3000));
        assert!(!at_boundary.fire_alert);
        assert_eq!(at_boundary.state, DrowsinessState::Alerting);
    }

    #[test]
    fn test_scripted_recovery_sequence() {
        // threshold 0.21, required 3: [0.15, 0.18, 0.19, 0.30] at 1s spacing
        let mut m = monitor(0.21, 3, 3000);
        let t0 = Instant::now();

        let scores = [0.15, 0.18, 0.19, 0.30];
        let expected = [
            DrowsinessState::Normal,
            DrowsinessState::Normal,
            DrowsinessState::Alerting,
            DrowsinessState::Normal,
        ];

        for (i, (&score, &state)) in scores.iter().zip(expected.iter()).enumerate() {
            let result = m.process_frame(Some(score), t0 + Duration::from_secs(i as u64));
            assert_eq!(result.state, state, "frame {}", i);
            assert_eq!(result.fire_alert, i == 2, "frame {}", i);
        }
    }

    #[test]
    fn test_no_face_interrupts_streak() {
        // required 2: [0.10, 0.10, None, 0.10, 0.10]
        let mut m = monitor(0.21, 2, 0);
        let t0 = Instant::now();

        let scores = [Some(0.10), Some(0.10), None, Some(0.10), Some(0.10)];
        let expected = [
            DrowsinessState::Normal,
            DrowsinessState::Alerting,
            DrowsinessState::Normal,
            DrowsinessState::Normal,
            DrowsinessState::Alerting,
        ];

        for (i, (&score, &state)) in scores.iter().zip(expected.iter()).enumerate() {
            let result = m.process_frame(score, t0 + Duration::from_secs(i as u64));
            assert_eq!(result.state, state, "frame {}", i);
        }
    }

    #[test]
    fn test_misordered_timestamps_do_not_panic() {
        let mut m = monitor(0.21, 1, 1000);
        let t0 = Instant::now();

        assert!(m.process_frame(Some(0.10), t0 + Duration::from_secs(10)).fire_alert);

        // Clock stepped backwards: elapsed saturates to zero, stays suppressed
        let result = m.process_frame(Some(0.10), t0);
        assert_eq!(result.state, DrowsinessState::Alerting);
        assert!(!result.fire_alert);
    }

    proptest::proptest! {
        #[test]
        fn prop_fire_implies_alerting(
            scores in proptest::collection::vec(
                proptest::option::of(0.0f32..0.5), 1..200,
            ),
        ) {
            let mut m = monitor(0.21, 5, 100);
            let t0 = Instant::now();

            for (i, &score) in scores.iter().enumerate() {
                let result = m.process_frame(score, t0 + Duration::from_millis(33 * i as u64));
                if result.fire_alert {
                    proptest::prop_assert_eq!(result.state, DrowsinessState::Alerting);
                }
                if score.is_none() {
                    proptest::prop_assert_eq!(result.state, DrowsinessState::Normal);
                    proptest::prop_assert!(!result.fire_alert);
                }
            }
        }
    }

    #[test]
    fn test_reset_clears_streak() {
        let mut m = monitor(0.21, 2, 0);
        let t0 = Instant::now();

        m.process_frame(Some(0.10), t0);
        m.process_frame(Some(0.10), t0);
        assert_eq!(m.consecutive_low_frames(), 2);

        m.reset();
        assert_eq!(m.consecutive_low_frames(), 0);
        let result = m.process_frame(Some(0.10), t0);
        assert_eq!(result.state, DrowsinessState::Normal);
    }
}
