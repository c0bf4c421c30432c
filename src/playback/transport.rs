//! Playback position engine.
//!
//! Tracks the playback clock in seconds together with the current pass number, and
//! resolves link jumps as the clock advances.

use log::{info, trace};

use super::links::{Link, LinkTable};
use crate::error::EditError;

/// Default tempo in beats per minute.
pub const DEFAULT_TEMPO: i32 = 120;

/// Default number of beats in a measure.
pub const DEFAULT_BEATS_PER_MEASURE: i32 = 4;

/// Default interval between driver ticks, in seconds.
pub const DEFAULT_TICK_SECONDS: f64 = 0.005;

/// Playback clock and pass counter.
///
/// The beat for a tick at time `t` is `round(tempo * (t - tick / 2) / 60)`, clamped at 0.
/// Pulling the time back by half a tick makes a beat boundary land on exactly one tick
/// instead of flickering between two adjacent ones. Only tick times get that lead;
/// seeks and jump targets resolve to the beat nearest the time itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Transport {
    time: f64,
    iteration: i32,
    tempo: i32,
    beats_per_measure: i32,
    tick_seconds: f64,
}

impl Default for Transport {
    fn default() -> Self {
        Self {
            time: 0.0,
            iteration: 0,
            tempo: DEFAULT_TEMPO,
            beats_per_measure: DEFAULT_BEATS_PER_MEASURE,
            tick_seconds: DEFAULT_TICK_SECONDS,
        }
    }
}

impl Transport {
    /// # Errors
    /// `InvalidArgument` if `tempo`, `beats_per_measure` or `tick_seconds` is not positive.
    pub fn new(tempo: i32, beats_per_measure: i32, tick_seconds: f64) -> Result<Self, EditError> {
        let mut transport = Self::default();
        transport.set_tempo(tempo)?;
        transport.set_beats_per_measure(beats_per_measure)?;
        check_tick(tick_seconds)?;
        transport.tick_seconds = tick_seconds;
        Ok(transport)
    }

    /// Current playback time in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Current pass number.
    pub fn iteration(&self) -> i32 {
        self.iteration
    }

    pub fn tempo(&self) -> i32 {
        self.tempo
    }

    pub fn beats_per_measure(&self) -> i32 {
        self.beats_per_measure
    }

    pub fn tick_seconds(&self) -> f64 {
        self.tick_seconds
    }

    pub fn set_tempo(&mut self, tempo: i32) -> Result<&mut Self, EditError> {
        if tempo <= 0 {
            return Err(EditError::invalid(format!(
                "tempo must be positive, got {}",
                tempo
            )));
        }
        self.tempo = tempo;
        Ok(self)
    }

    pub fn set_beats_per_measure(&mut self, beats_per_measure: i32) -> Result<&mut Self, EditError> {
        if beats_per_measure <= 0 {
            return Err(EditError::invalid(format!(
                "beats per measure must be positive, got {}",
                beats_per_measure
            )));
        }
        self.beats_per_measure = beats_per_measure;
        Ok(self)
    }

    pub fn set_iteration(&mut self, iteration: i32) -> Result<&mut Self, EditError> {
        if iteration < 0 {
            return Err(EditError::invalid(format!(
                "iteration must not be negative, got {}",
                iteration
            )));
        }
        self.iteration = iteration;
        Ok(self)
    }

    /// Beat sounding at `seconds`.
    pub fn beat_at(&self, seconds: f64) -> i32 {
        let beats = self.tempo as f64 * (seconds - self.tick_seconds / 2.0) / 60.0;
        beats.round().max(0.0) as i32
    }

    /// Beat nearest to `seconds`, without the half-tick lead.
    pub fn nearest_beat(&self, seconds: f64) -> i32 {
        let beats = self.tempo as f64 * seconds / 60.0;
        beats.round().max(0.0) as i32
    }

    /// Beat sounding at the current time, as a tick at that time would see it.
    pub fn current_beat(&self) -> i32 {
        self.beat_at(self.time)
    }

    /// Time in seconds at which `beat` starts.
    pub fn time_of(&self, beat: i32) -> f64 {
        beat as f64 * 60.0 / self.tempo as f64
    }

    /// Zero-based measure containing `beat`.
    pub fn measure_of(&self, beat: i32) -> i32 {
        beat.div_euclid(self.beats_per_measure)
    }

    /// Move the clock to `proposed`, unless a link fires at the beat it lands on.
    ///
    /// Only the first link at that beat whose iteration equals the current pass fires.
    /// It sends the clock to the link's target and starts the next pass. At most one
    /// jump happens per call, even if the target beat carries a link of its own.
    ///
    /// Returns the link that fired, if any.
    ///
    /// # Errors
    /// `InvalidArgument` if `proposed` is negative or not finite.
    pub fn advance(&mut self, proposed: f64, links: &LinkTable) -> Result<Option<Link>, EditError> {
        check_time(proposed)?;
        let beat = self.beat_at(proposed);
        let fired = links
            .links_at(beat)
            .find(|link| link.iteration() == self.iteration)
            .cloned();

        match &fired {
            Some(link) => {
                self.time = self.time_of(link.target());
                self.iteration += 1;
                info!(
                    "jumped from beat {} to beat {}, now on pass {}",
                    beat,
                    link.target(),
                    self.iteration
                );
            }
            None => {
                trace!("advanced to {:.3}s (beat {})", proposed, beat);
                self.time = proposed;
            }
        }
        Ok(fired)
    }

    /// Recompute the pass number after a direct seek.
    ///
    /// Takes the iteration of the first link, in table order, located at or after the
    /// beat nearest the current time. Past every link it becomes one more than the last link's iteration,
    /// so seeking beyond all repeats never re-triggers them; with no links it is 0.
    pub fn reset_iteration(&mut self, links: &LinkTable) {
        let beat = self.nearest_beat(self.time);
        self.iteration = links
            .iter()
            .find(|link| link.location() >= beat)
            .map(Link::iteration)
            .or_else(|| links.all().last().map(|link| link.iteration() + 1))
            .unwrap_or(0);
        trace!("iteration reset to {} at beat {}", self.iteration, beat);
    }

    /// Jump the clock straight to `seconds` and recompute the pass number.
    pub fn seek(&mut self, seconds: f64, links: &LinkTable) -> Result<(), EditError> {
        check_time(seconds)?;
        self.time = seconds;
        self.reset_iteration(links);
        Ok(())
    }
}

fn check_time(seconds: f64) -> Result<(), EditError> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(EditError::invalid(format!(
            "playback time must be a non-negative number of seconds, got {}",
            seconds
        )));
    }
    Ok(())
}

fn check_tick(seconds: f64) -> Result<(), EditError> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(EditError::invalid(format!(
            "tick length must be a positive number of seconds, got {}",
            seconds
        )));
    }
    Ok(())
}
