//! # Event
//!
//! A single note on the timeline: where it starts, how many beats it lasts, its pitch and
//! octave, the instrument that plays it and its volume.
//!
//! Events are plain values. The timeline stores its own copies, so an `Event` held by a
//! caller can be mutated freely without affecting anything already stored.
//!
//! ## Invariants
//! - `start >= 0`
//! - `duration >= 1`
//! - `instrument >= 0`
//! - `start + duration` fits in an `i32`, so every beat of the span is addressable
//!
//! Every setter checks its own invariant and leaves the event untouched on failure.
//!
//! ## Equality and ordering
//! Two events are equal when pitch, octave, start, duration and instrument all match;
//! volume is not part of identity. Ordering between events is by pitch only, see
//! [`Event::compare`].

use serde::Serialize;
use std::cmp::Ordering;
use std::ops::Range;

use crate::error::EditError;
use crate::pitch::{self, Pitch};

/// Volume given to events constructed without an explicit one.
pub const DEFAULT_VOLUME: i32 = 100;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    start: i32,
    duration: i32,
    pitch: Pitch,
    octave: i32,
    instrument: i32,
    volume: i32,
}

impl Event {
    /// Create an event on instrument 0 at the default volume.
    pub fn new(start: i32, duration: i32, pitch: Pitch, octave: i32) -> Result<Self, EditError> {
        check_start(start)?;
        check_duration(duration)?;
        check_span(start, duration)?;
        Ok(Self {
            start,
            duration,
            pitch,
            octave,
            instrument: 0,
            volume: DEFAULT_VOLUME,
        })
    }

    /// Create an event with an explicit instrument and volume.
    pub fn with_voice(
        start: i32,
        duration: i32,
        pitch: Pitch,
        octave: i32,
        instrument: i32,
        volume: i32,
    ) -> Result<Self, EditError> {
        check_instrument(instrument)?;
        let mut event = Self::new(start, duration, pitch, octave)?;
        event.instrument = instrument;
        event.volume = volume;
        Ok(event)
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn duration(&self) -> i32 {
        self.duration
    }

    pub fn pitch(&self) -> Pitch {
        self.pitch
    }

    pub fn octave(&self) -> i32 {
        self.octave
    }

    pub fn instrument(&self) -> i32 {
        self.instrument
    }

    pub fn volume(&self) -> i32 {
        self.volume
    }

    /// First beat after the event stops sounding.
    pub fn end(&self) -> i32 {
        self.start + self.duration
    }

    /// Half-open range of beats this event occupies.
    pub fn span(&self) -> Range<i32> {
        self.start..self.end()
    }

    /// Whether the event is sounding at `beat`.
    pub fn is_active_at(&self, beat: i32) -> bool {
        self.span().contains(&beat)
    }

    /// Position in pitch space (MIDI numbering).
    pub fn key_number(&self) -> i64 {
        pitch::key_number(self.pitch, self.octave)
    }

    pub fn set_start(&mut self, start: i32) -> Result<&mut Self, EditError> {
        check_start(start)?;
        check_span(start, self.duration)?;
        self.start = start;
        Ok(self)
    }

    pub fn set_duration(&mut self, duration: i32) -> Result<&mut Self, EditError> {
        check_duration(duration)?;
        check_span(self.start, duration)?;
        self.duration = duration;
        Ok(self)
    }

    pub fn set_instrument(&mut self, instrument: i32) -> Result<&mut Self, EditError> {
        check_instrument(instrument)?;
        self.instrument = instrument;
        Ok(self)
    }

    pub fn set_pitch(&mut self, pitch: Pitch) -> &mut Self {
        self.pitch = pitch;
        self
    }

    pub fn set_octave(&mut self, octave: i32) -> &mut Self {
        self.octave = octave;
        self
    }

    pub fn set_volume(&mut self, volume: i32) -> &mut Self {
        self.volume = volume;
        self
    }

    /// Move the event up or down by `semitones`, carrying into the octave.
    pub fn transpose(&mut self, semitones: i32) -> Result<&mut Self, EditError> {
        let (pitch, octave) = pitch::transpose(self.pitch, self.octave, semitones)?;
        self.pitch = pitch;
        self.octave = octave;
        Ok(self)
    }

    /// Independent copy of this event.
    pub fn copy(&self) -> Event {
        self.clone()
    }

    /// Signed pitch-space distance from `other` to `self`.
    ///
    /// Positive when `self` sounds higher than `other`, zero for the same pitch and octave
    /// regardless of timing.
    pub fn compare(&self, other: &Event) -> i64 {
        pitch::distance(other.pitch, other.octave, self.pitch, self.octave)
    }

    /// Copy moved by `beats`, validated like any new start.
    pub(crate) fn shifted(&self, beats: i32) -> Result<Event, EditError> {
        let start = self.start.checked_add(beats).ok_or_else(|| {
            EditError::invalid(format!(
                "shifting start beat {} by {} beats overflows",
                self.start, beats
            ))
        })?;
        let mut event = self.clone();
        event.set_start(start)?;
        Ok(event)
    }

    /// [`Event::compare`] as an [`Ordering`].
    pub fn cmp_pitch(&self, other: &Event) -> Ordering {
        self.compare(other).cmp(&0)
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.pitch == other.pitch
            && self.start == other.start
            && self.duration == other.duration
            && self.octave == other.octave
            && self.instrument == other.instrument
    }
}

impl Eq for Event {}

fn check_start(start: i32) -> Result<(), EditError> {
    if start < 0 {
        return Err(EditError::invalid(format!(
            "start beat must not be negative, got {}",
            start
        )));
    }
    Ok(())
}

fn check_duration(duration: i32) -> Result<(), EditError> {
    if duration < 1 {
        return Err(EditError::invalid(format!(
            "duration must be at least 1, got {}",
            duration
        )));
    }
    Ok(())
}

fn check_span(start: i32, duration: i32) -> Result<(), EditError> {
    if start.checked_add(duration).is_none() {
        return Err(EditError::invalid(format!(
            "a note starting at beat {} cannot last {} beats",
            start, duration
        )));
    }
    Ok(())
}

fn check_instrument(instrument: i32) -> Result<(), EditError> {
    if instrument < 0 {
        return Err(EditError::invalid(format!(
            "instrument id must not be negative, got {}",
            instrument
        )));
    }
    Ok(())
}
