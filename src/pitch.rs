//! # Pitch Space
//!
//! The twelve chromatic pitch classes and the linear "key number" they collapse to when
//! combined with an octave.
//!
//! Key numbers follow MIDI numbering: `12 * octave + ordinal + 12`, so C4 is 60 and
//! A4 is 69. Every distance, comparison and transposition in the crate goes through
//! key numbers, which keeps octave wrap-around a plain integer addition. Keys are `i64`
//! so that every `i32` octave has one.
//!
//! ## Negative octaves
//! Key numbers below zero are valid. Converting back uses Euclidean division so the
//! pitch class stays in `0..12` and the octave floors toward negative infinity:
//! key `-1` is B at octave `-2`, not an error and not octave `-1`.
//!
//! ## Example
//! ```rust
//! use beatgrid::pitch::{self, Pitch};
//!
//! assert_eq!(pitch::key_number(Pitch::C, 4), 60);
//! assert_eq!(pitch::distance(Pitch::C, 4, Pitch::E, 4), 4);
//! assert_eq!(pitch::pitch_from_key(-1), Pitch::B);
//! assert_eq!(pitch::octave_from_key(-1), -2);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EditError;

/// Number of pitch classes in an octave.
pub const PITCHES_PER_OCTAVE: i32 = 12;

/// Key number offset so that octave 4's C lands on MIDI 60.
const KEY_OFFSET: i64 = 12;

/// The twelve chromatic pitch classes, in ascending order from C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pitch {
    C,
    #[serde(rename = "C#")]
    Cs,
    D,
    #[serde(rename = "D#")]
    Ds,
    E,
    F,
    #[serde(rename = "F#")]
    Fs,
    G,
    #[serde(rename = "G#")]
    Gs,
    A,
    #[serde(rename = "A#")]
    As,
    B,
}

impl Pitch {
    /// All pitch classes in ascending order.
    pub const ALL: [Pitch; 12] = [
        Pitch::C,
        Pitch::Cs,
        Pitch::D,
        Pitch::Ds,
        Pitch::E,
        Pitch::F,
        Pitch::Fs,
        Pitch::G,
        Pitch::Gs,
        Pitch::A,
        Pitch::As,
        Pitch::B,
    ];

    /// Position of this pitch class within the octave (C = 0, B = 11).
    pub fn ordinal(self) -> i32 {
        self as i32
    }

    /// Pitch class for an ordinal, wrapping cyclically in both directions.
    pub fn from_ordinal(ordinal: i32) -> Pitch {
        Pitch::ALL[ordinal.rem_euclid(PITCHES_PER_OCTAVE) as usize]
    }

    /// Name as printed in labels: sharps use `#`.
    pub fn name(self) -> &'static str {
        match self {
            Pitch::C => "C",
            Pitch::Cs => "C#",
            Pitch::D => "D",
            Pitch::Ds => "D#",
            Pitch::E => "E",
            Pitch::F => "F",
            Pitch::Fs => "F#",
            Pitch::G => "G",
            Pitch::Gs => "G#",
            Pitch::A => "A",
            Pitch::As => "A#",
            Pitch::B => "B",
        }
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pitch {
    type Err = EditError;

    /// Parse a pitch name like "C", "F#" or "Fs" (the `s` spelling stands in for `#`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pitch = match s.trim() {
            "C" => Pitch::C,
            "C#" | "Cs" => Pitch::Cs,
            "D" => Pitch::D,
            "D#" | "Ds" => Pitch::Ds,
            "E" => Pitch::E,
            "F" => Pitch::F,
            "F#" | "Fs" => Pitch::Fs,
            "G" => Pitch::G,
            "G#" | "Gs" => Pitch::Gs,
            "A" => Pitch::A,
            "A#" | "As" => Pitch::As,
            "B" => Pitch::B,
            other => {
                return Err(EditError::invalid(format!("unknown pitch name '{}'", other)));
            }
        };
        Ok(pitch)
    }
}

/// Linear key number for a pitch class and octave.
///
/// Computed in `i64`, so every `i32` octave has an exact key.
pub fn key_number(pitch: Pitch, octave: i32) -> i64 {
    i64::from(PITCHES_PER_OCTAVE) * i64::from(octave) + i64::from(pitch.ordinal()) + KEY_OFFSET
}

/// Pitch class of a key number.
pub fn pitch_from_key(key: i64) -> Pitch {
    // KEY_OFFSET is a whole octave, so it never changes the pitch class.
    Pitch::ALL[key.rem_euclid(i64::from(PITCHES_PER_OCTAVE)) as usize]
}

/// Octave of a key number (floor division, so negative keys land in negative octaves).
pub fn octave_from_key(key: i64) -> i64 {
    key.div_euclid(i64::from(PITCHES_PER_OCTAVE)) - KEY_OFFSET / i64::from(PITCHES_PER_OCTAVE)
}

/// Signed number of semitones from the first pitch to the second.
pub fn distance(p1: Pitch, o1: i32, p2: Pitch, o2: i32) -> i64 {
    key_number(p2, o2) - key_number(p1, o1)
}

/// Shift a pitch/octave pair by `semitones`, carrying across octave boundaries.
///
/// # Errors
/// `InvalidArgument` if the resulting octave does not fit in an `i32`.
pub fn transpose(pitch: Pitch, octave: i32, semitones: i32) -> Result<(Pitch, i32), EditError> {
    let key = key_number(pitch, octave) + i64::from(semitones);
    let octave = i32::try_from(octave_from_key(key)).map_err(|_| {
        EditError::invalid(format!(
            "transposing {}{} by {} semitones leaves the octave range",
            pitch, octave, semitones
        ))
    })?;
    Ok((pitch_from_key(key), octave))
}
