//! # Console Grid
//!
//! Plain-text dump of a timeline: one column per pitch from the lowest to the highest
//! stored note, one row per beat.
//!
//! ```text
//!   C4C#4 D4D#4 E4 F4F#4 G4
//! 0 X           X        X
//! 1 |           |        |
//! ```
//! - `X` marks the beat a note starts on
//! - `|` marks the beats it sustains through
//! - Column labels are right-aligned to three characters (four when the label needs it)
//! - Beat numbers are right-aligned to the number of digits in the timeline length
//!
//! An empty timeline renders as the empty string.

use std::fmt::{self, Write};

use crate::pitch;
use crate::timeline::Timeline;

const ONSET: &str = "X";
const SUSTAIN: &str = "|";

/// Render `timeline` as a pitch-by-beat text grid.
pub fn render_grid(timeline: &Timeline) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_grid(timeline, &mut out);
    out
}

/// Write the grid for `timeline` to `out` one row at a time.
///
/// Only one row of cells is held in memory, so a timeline whose last note sits far in
/// the future costs output, not a full beat-by-pitch matrix.
pub fn write_grid<W: Write>(timeline: &Timeline, out: &mut W) -> fmt::Result {
    let length = timeline.length();
    let (lowest, highest) = match (timeline.lowest(), timeline.highest()) {
        (Some(lowest), Some(highest)) if length > 0 => (lowest, highest),
        _ => return Ok(()),
    };

    let low_key = lowest.key_number();
    let width = (highest.key_number() - low_key + 1) as usize;
    let labels: Vec<String> = (0..width as i64)
        .map(|offset| {
            let key = low_key + offset;
            format!("{}{}", pitch::pitch_from_key(key), pitch::octave_from_key(key))
        })
        .collect();
    let widths: Vec<usize> = labels.iter().map(|label| label.len().max(3)).collect();
    let number_width = length.to_string().len();

    write!(out, "{:w$}", "", w = number_width)?;
    for (label, w) in labels.iter().zip(&widths) {
        write!(out, "{:>w$}", label, w = *w)?;
    }
    writeln!(out)?;

    let mut row: Vec<&str> = vec![""; width];
    for beat in 0..length {
        row.iter_mut().for_each(|cell| *cell = "");
        for note in timeline.notes_at(beat) {
            let cell = &mut row[(note.key_number() - low_key) as usize];
            if *cell != ONSET {
                *cell = if beat == note.start() { ONSET } else { SUSTAIN };
            }
        }

        write!(out, "{:>w$}", beat, w = number_width)?;
        for (cell, w) in row.iter().zip(&widths) {
            write_centered(out, cell, *w)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Pad `text` to `width`, leaning right when the padding is odd.
fn write_centered<W: Write>(out: &mut W, text: &str, width: usize) -> fmt::Result {
    let padding = width.saturating_sub(text.len());
    let trailing = padding / 2;
    let leading = padding - trailing;
    write!(out, "{:leading$}{}{:trailing$}", "", text, "", leading = leading, trailing = trailing)
}
