//! Scenario Replay Runner
//!
//! Drives the drowsiness pipeline with a recorded or synthetic landmark
//! scenario at a paced frame rate, logging what the live system would draw
//! on screen and dispatching alerts fire-and-forget.

pub mod scenario;
pub mod settings;

pub use scenario::{Scenario, ScenarioError, ScenarioFrame};
pub use settings::Settings;

use alert_dispatch::{AlertDispatcher, AlertEvent, CommandSink, LogSink};
use anyhow::Context;
use drowsiness::{DrowsinessState, FramePipeline};
use std::time::{Duration, Instant};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Build the alert dispatcher from settings
fn build_dispatcher(settings: &Settings) -> AlertDispatcher {
    match settings
        .announcer_command
        .as_deref()
        .and_then(CommandSink::from_command_line)
    {
        Some(sink) => AlertDispatcher::spawn(sink),
        None => AlertDispatcher::spawn(LogSink),
    }
}

/// Run the replay loop to completion
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let config = settings
        .monitor_config()
        .context("Invalid monitor configuration")?;
    let mut pipeline = FramePipeline::new(config).context("Failed to build frame pipeline")?;

    let scenario = match &settings.scenario_path {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("Failed to load scenario from {}", path))?,
        None => {
            info!("No scenario file configured, using synthetic drowsy drive");
            Scenario::synthetic_drowsy_drive()
        }
    };

    let dispatcher = build_dispatcher(&settings);
    let mut ticker = tokio::time::interval(Duration::from_millis(settings.frame_interval_ms));

    info!("Replaying {} frames", scenario.frames.len());

    for (i, frame) in scenario.frames.iter().enumerate() {
        ticker.tick().await;

        let observation = frame.to_observation(i)?;
        let analysis = pipeline.process(&observation, Instant::now());

        // Mirrors the live overlay: score, streak counter, alert banner
        if let Some(openness) = analysis.openness {
            info!(
                frame = i,
                openness = format!("{:.3}", openness),
                closed_frames = analysis.consecutive_low_frames,
                alerting = analysis.state == DrowsinessState::Alerting,
                "Frame processed"
            );
        } else {
            info!(frame = i, "Face not detected");
        }

        if analysis.fire_alert {
            let queued = dispatcher.dispatch(AlertEvent::new(
                analysis.openness,
                analysis.consecutive_low_frames,
            ));
            if !queued {
                warn!(frame = i, "Alert dropped, dispatch queue unavailable");
            }
        }
    }

    // Joining the worker blocks, so it runs on the blocking pool rather
    // than a runtime thread.
    tokio::task::spawn_blocking(move || dispatcher.shutdown())
        .await
        .context("Alert dispatcher worker panicked")?;

    info!("Replay complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_completes_with_synthetic_scenario() {
        let settings = Settings {
            frame_interval_ms: 1,
            ..Default::default()
        };
        run(settings).await.unwrap();
    }

    #[tokio::test]
    async fn test_run_rejects_unknown_profile() {
        let settings = Settings {
            profile: Some("bogus".to_string()),
            ..Default::default()
        };
        assert!(run(settings).await.is_err());
    }
}
