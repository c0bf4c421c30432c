//! # Session Configuration
//!
//! Playback and editing defaults for a [`Session`](crate::Session), loadable from YAML.
//!
//! ## Format
//! All keys are optional; missing keys take the defaults shown.
//! ```yaml
//! tempo: 120                # beats per minute
//! beats-per-measure: 4
//! tick-seconds: 0.005       # interval of the external playback clock
//! new-note-duration: 2      # beats given to notes placed with place_note
//! new-note-instrument: 1
//! ```
//!
//! ## Example
//! ```rust
//! use beatgrid::SessionConfig;
//!
//! let config = SessionConfig::from_yaml_str("tempo: 90\nbeats-per-measure: 3\n").unwrap();
//! assert_eq!(config.tempo, 90);
//! assert_eq!(config.beats_per_measure, 3);
//! assert_eq!(config.new_note_duration, 2);
//! ```

use log::info;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::EditError;
use crate::playback::{DEFAULT_BEATS_PER_MEASURE, DEFAULT_TEMPO, DEFAULT_TICK_SECONDS};

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawConfig {
    tempo: Option<i32>,
    beats_per_measure: Option<i32>,
    tick_seconds: Option<f64>,
    new_note_duration: Option<i32>,
    new_note_instrument: Option<i32>,
}

/// Validated session settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub tempo: i32,
    pub beats_per_measure: i32,
    pub tick_seconds: f64,
    pub new_note_duration: i32,
    pub new_note_instrument: i32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tempo: DEFAULT_TEMPO,
            beats_per_measure: DEFAULT_BEATS_PER_MEASURE,
            tick_seconds: DEFAULT_TICK_SECONDS,
            new_note_duration: 2,
            new_note_instrument: 1,
        }
    }
}

impl SessionConfig {
    /// Parse and validate a YAML document. An empty document yields the defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self, EditError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| EditError::Config(e.to_string()))?;

        let defaults = Self::default();
        let config = Self {
            tempo: raw.tempo.unwrap_or(defaults.tempo),
            beats_per_measure: raw.beats_per_measure.unwrap_or(defaults.beats_per_measure),
            tick_seconds: raw.tick_seconds.unwrap_or(defaults.tick_seconds),
            new_note_duration: raw.new_note_duration.unwrap_or(defaults.new_note_duration),
            new_note_instrument: raw
                .new_note_instrument
                .unwrap_or(defaults.new_note_instrument),
        };
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EditError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| EditError::Config(format!("cannot read '{}': {}", path.display(), e)))?;
        let config = Self::from_yaml_str(&content)?;
        info!("loaded session config from {}", path.display());
        Ok(config)
    }

    /// Check every value is in range.
    pub fn validate(&self) -> Result<(), EditError> {
        if self.tempo <= 0 {
            return Err(EditError::Config(format!(
                "tempo must be positive, got {}",
                self.tempo
            )));
        }
        if self.beats_per_measure <= 0 {
            return Err(EditError::Config(format!(
                "beats-per-measure must be positive, got {}",
                self.beats_per_measure
            )));
        }
        if !self.tick_seconds.is_finite() || self.tick_seconds <= 0.0 {
            return Err(EditError::Config(format!(
                "tick-seconds must be positive, got {}",
                self.tick_seconds
            )));
        }
        if self.new_note_duration < 1 {
            return Err(EditError::Config(format!(
                "new-note-duration must be at least 1, got {}",
                self.new_note_duration
            )));
        }
        if self.new_note_instrument < 0 {
            return Err(EditError::Config(format!(
                "new-note-instrument must not be negative, got {}",
                self.new_note_instrument
            )));
        }
        Ok(())
    }
}
