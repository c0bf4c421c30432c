//! Playback result types handed to renderers and audio drivers.

use serde::Serialize;

use super::links::Link;
use crate::event::Event;

/// Outcome of one playback tick.
///
/// # Fields
/// - `time`: Playback time in seconds after the tick (the jump target's time if a link fired)
/// - `beat`: Beat sounding at `time`
/// - `iteration`: Pass number after the tick
/// - `jumped`: The link that fired during this tick, if any
/// - `sounding`: Copies of the notes sounding at `beat`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tick {
    pub time: f64,
    pub beat: i32,
    pub iteration: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jumped: Option<Link>,
    pub sounding: Vec<Event>,
}

impl Tick {
    /// Notes in `sounding` that begin on this tick's beat (the ones to trigger).
    pub fn onsets(&self) -> impl Iterator<Item = &Event> + '_ {
        self.sounding
            .iter()
            .filter(move |note| note.start() == self.beat)
    }
}
