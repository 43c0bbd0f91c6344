//! Alert delivery sinks
//!
//! The speech/announcer mechanism lives behind [`AlertSink`]; this crate only
//! knows how to hand an event over and degrade gracefully when that fails.

use std::process::Command;
use thiserror::Error;
use tracing::{debug, info};

use crate::event::AlertEvent;

/// Sink delivery errors
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Announcer command failed: {0}")]
    Command(#[from] std::io::Error),

    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Where alert events go
pub trait AlertSink: Send {
    /// Deliver one event. Failures are caught by the dispatch worker and
    /// degraded to a logged fallback; they never reach the frame path.
    fn deliver(&mut self, event: &AlertEvent) -> Result<(), SinkError>;
}

/// Logged fallback sink: announces via the log stream only
#[derive(Debug, Default)]
pub struct LogSink;

impl AlertSink for LogSink {
    fn deliver(&mut self, event: &AlertEvent) -> Result<(), SinkError> {
        info!(
            id = %event.id,
            openness = ?event.openness,
            consecutive_low_frames = event.consecutive_low_frames,
            "ALERT: {}",
            event.message
        );
        Ok(())
    }
}

/// Runs an external announcer command (e.g. a TTS CLI) per alert.
///
/// The message is passed as the final argument. Delivery waits for the
/// command to finish; that blocks only the dispatch worker, never the
/// frame path.
#[derive(Debug)]
pub struct CommandSink {
    program: String,
    args: Vec<String>,
}

impl CommandSink {
    /// Create a sink from a program and fixed leading arguments
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Parse a whitespace-separated command line, e.g. `"espeak -s 150"`
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(String::from);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }
}

impl AlertSink for CommandSink {
    fn deliver(&mut self, event: &AlertEvent) -> Result<(), SinkError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(&event.message)
            .spawn()?;
        debug!(id = %event.id, pid = child.id(), "Announcer command spawned");

        // Waiting reaps the child; leaving it unwaited would accumulate one
        // zombie process per alert.
        let status = child.wait()?;
        if !status.success() {
            return Err(SinkError::Delivery(format!(
                "announcer exited with {}",
                status
            )));
        }
        Ok(())
    }
}
