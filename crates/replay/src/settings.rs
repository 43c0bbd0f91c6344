//! Replay settings
//!
//! Layered configuration: optional TOML file, then `REPLAY_`-prefixed
//! environment variables. Nested keys use `__`, e.g.
//! `REPLAY_MONITOR__OPENNESS_THRESHOLD` sets `monitor.openness_threshold`.

use config::{Config, ConfigError, Environment, File};
use drowsiness::MonitorConfig;
use serde::Deserialize;

fn default_frame_interval() -> u64 {
    33 // ~30 fps, the rate the reference camera ran at
}

/// Replay runner settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Named monitor profile: "default", "strict", or "lenient"
    pub profile: Option<String>,

    /// Explicit monitor configuration; overrides the profile when present
    pub monitor: Option<MonitorConfig>,

    /// Pacing between frames (milliseconds)
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,

    /// Path to a recorded scenario JSON; a synthetic drowsy drive is used
    /// when absent
    pub scenario_path: Option<String>,

    /// External announcer command line (e.g. a TTS CLI); alerts fall back
    /// to the log when absent
    pub announcer_command: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            profile: None,
            monitor: None,
            frame_interval_ms: default_frame_interval(),
            scenario_path: None,
            announcer_command: None,
        }
    }
}

impl Settings {
    /// Load settings from an optional file plus environment overrides
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        builder = match path {
            Some(p) => builder.add_source(File::with_name(p)),
            None => builder.add_source(File::with_name("replay").required(false)),
        };
        builder = builder.add_source(
            Environment::with_prefix("REPLAY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Resolve the effective monitor configuration
    pub fn monitor_config(&self) -> Result<MonitorConfig, ConfigError> {
        if let Some(monitor) = &self.monitor {
            return Ok(monitor.clone());
        }
        match self.profile.as_deref() {
            None | Some("default") => Ok(MonitorConfig::default()),
            Some("strict") => Ok(MonitorConfig::strict()),
            Some("lenient") => Ok(MonitorConfig::lenient()),
            Some(other) => Err(ConfigError::Message(format!(
                "Unknown monitor profile '{}'",
                other
            ))),
        }
    }
}
