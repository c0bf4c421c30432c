//! # Editing Session
//!
//! One open composition: its timeline, its links, the playback position, and the
//! editing state around them (selection, a link being drawn, defaults for new notes).
//!
//! A session is always built explicitly and handed to whatever consumes it, whether
//! a renderer or an audio driver. There is no process-wide default session.
//!
//! ## Selection
//! Selected notes are tracked by [`NoteId`], so they survive moves. Removing a note
//! deselects it; moving a note selects it.
//!
//! ## Drawing Links
//! A link is drawn in two steps: [`Session::begin_link`] records the beat it jumps from,
//! [`Session::finish_link`] supplies the target and inserts the link for the pass that
//! is currently playing.
//!
//! ## Example
//! ```rust
//! use beatgrid::{Pitch, Session};
//!
//! let mut session = Session::new();
//! session.place_note(0, Pitch::C, 4).unwrap();
//! session.place_note(6, Pitch::G, 4).unwrap();
//!
//! session.begin_link(8).unwrap();
//! session.finish_link(0).unwrap();
//!
//! let tick = session.advance(4.0).unwrap();
//! assert!(tick.jumped.is_some());
//! assert_eq!(tick.beat, 0);
//! assert_eq!(tick.sounding.len(), 1);
//! ```

use log::debug;

use crate::config::SessionConfig;
use crate::error::EditError;
use crate::event::Event;
use crate::pitch::Pitch;
use crate::playback::{Link, LinkTable, Tick, Transport};
use crate::timeline::{NoteId, Timeline};

#[derive(Debug, Clone)]
pub struct Session {
    timeline: Timeline,
    links: LinkTable,
    transport: Transport,
    selected: Vec<NoteId>,
    link_start: Option<i32>,
    new_note_duration: i32,
    new_note_instrument: i32,
    playing: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            timeline: Timeline::new(),
            links: LinkTable::new(),
            transport: Transport::default(),
            selected: Vec::new(),
            link_start: None,
            new_note_duration: 2,
            new_note_instrument: 1,
            playing: false,
        }
    }
}

impl Session {
    /// Empty session with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty session using `config`.
    pub fn with_config(config: &SessionConfig) -> Result<Self, EditError> {
        Self::from_timeline(Timeline::new(), config)
    }

    /// Session editing an existing timeline, e.g. one filled by a score loader.
    pub fn from_timeline(timeline: Timeline, config: &SessionConfig) -> Result<Self, EditError> {
        config.validate()?;
        Ok(Self {
            timeline,
            transport: Transport::new(
                config.tempo,
                config.beats_per_measure,
                config.tick_seconds,
            )?,
            new_note_duration: config.new_note_duration,
            new_note_instrument: config.new_note_instrument,
            ..Self::default()
        })
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn links(&self) -> &LinkTable {
        &self.links
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    // -------------------------------
    // MARK: Settings
    // -------------------------------

    pub fn tempo(&self) -> i32 {
        self.transport.tempo()
    }

    pub fn set_tempo(&mut self, tempo: i32) -> Result<(), EditError> {
        self.transport.set_tempo(tempo)?;
        Ok(())
    }

    pub fn beats_per_measure(&self) -> i32 {
        self.transport.beats_per_measure()
    }

    pub fn set_beats_per_measure(&mut self, beats_per_measure: i32) -> Result<(), EditError> {
        self.transport.set_beats_per_measure(beats_per_measure)?;
        Ok(())
    }

    pub fn new_note_duration(&self) -> i32 {
        self.new_note_duration
    }

    pub fn set_new_note_duration(&mut self, duration: i32) -> Result<(), EditError> {
        if duration < 1 {
            return Err(EditError::invalid(format!(
                "duration must be at least 1, got {}",
                duration
            )));
        }
        self.new_note_duration = duration;
        Ok(())
    }

    pub fn new_note_instrument(&self) -> i32 {
        self.new_note_instrument
    }

    pub fn set_new_note_instrument(&mut self, instrument: i32) -> Result<(), EditError> {
        if instrument < 0 {
            return Err(EditError::invalid(format!(
                "instrument id must not be negative, got {}",
                instrument
            )));
        }
        self.new_note_instrument = instrument;
        Ok(())
    }

    // -------------------------------
    // MARK: Timeline editing
    // -------------------------------

    pub fn add_note(&mut self, note: &Event) -> NoteId {
        self.timeline.add_note(note)
    }

    /// Add a note using the session's new-note duration and instrument.
    pub fn place_note(&mut self, start: i32, pitch: Pitch, octave: i32) -> Result<NoteId, EditError> {
        let note = Event::with_voice(
            start,
            self.new_note_duration,
            pitch,
            octave,
            self.new_note_instrument,
            crate::event::DEFAULT_VOLUME,
        )?;
        Ok(self.timeline.add_note(&note))
    }

    /// Remove a note and drop it from the selection.
    pub fn remove_note(&mut self, note: &Event) -> Result<bool, EditError> {
        let id = self.timeline.find(note);
        let complete = self.timeline.remove_note(note)?;
        if let Some(id) = id {
            self.selected.retain(|selected| *selected != id);
        }
        Ok(complete)
    }

    /// Move a note and leave it selected.
    pub fn move_note(&mut self, note: &Event, steps: i32) -> Result<NoteId, EditError> {
        let id = self.timeline.move_note(note, steps)?;
        if !self.selected.contains(&id) {
            self.selected.push(id);
        }
        Ok(id)
    }

    pub fn get_notes(&self, beat: i32) -> Result<Vec<Event>, EditError> {
        self.timeline.get_notes(beat)
    }

    pub fn length(&self) -> i32 {
        self.timeline.length()
    }

    pub fn extreme(&self, highest: bool) -> Option<Event> {
        self.timeline.extreme(highest)
    }

    pub fn append(&mut self, other: &Timeline) -> Result<(), EditError> {
        self.timeline.append(other)
    }

    pub fn overlay(&mut self, other: &Timeline) {
        self.timeline.overlay(other);
    }

    // -------------------------------
    // MARK: Selection
    // -------------------------------

    /// Select a stored note.
    ///
    /// # Errors
    /// `NotFound` if no equal note is stored.
    pub fn select(&mut self, note: &Event) -> Result<NoteId, EditError> {
        let id = self.timeline.find(note).ok_or_else(|| {
            EditError::NotFound(format!(
                "note {}{} at beat {}",
                note.pitch(),
                note.octave(),
                note.start()
            ))
        })?;
        if !self.selected.contains(&id) {
            self.selected.push(id);
        }
        Ok(id)
    }

    /// Copies of the selected notes, in selection order.
    pub fn selected(&self) -> Vec<Event> {
        self.selected
            .iter()
            .filter_map(|id| self.timeline.note(*id))
            .cloned()
            .collect()
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    // -------------------------------
    // MARK: Links
    // -------------------------------

    pub fn add_link(&mut self, link: Link) {
        self.links.add(link);
    }

    pub fn remove_link(&mut self, link: &Link) -> Result<Link, EditError> {
        self.links.remove(link)
    }

    pub fn links_at(&self, beat: i32) -> Vec<Link> {
        self.links.links_at(beat).cloned().collect()
    }

    pub fn all_links(&self) -> &[Link] {
        self.links.all()
    }

    /// Start drawing a link that jumps away from `beat`.
    pub fn begin_link(&mut self, beat: i32) -> Result<(), EditError> {
        if beat < 0 {
            return Err(EditError::invalid(format!(
                "link location beat must not be negative, got {}",
                beat
            )));
        }
        debug!("link start set at beat {}", beat);
        self.link_start = Some(beat);
        Ok(())
    }

    /// Beat recorded by [`Session::begin_link`], if a link is being drawn.
    pub fn pending_link_start(&self) -> Option<i32> {
        self.link_start
    }

    /// Finish the link being drawn, jumping to `target` on the current pass.
    ///
    /// # Errors
    /// `NotFound` if no link is being drawn, `InvalidArgument` for a negative target.
    /// The pending start is kept when the target is rejected.
    pub fn finish_link(&mut self, target: i32) -> Result<Link, EditError> {
        let location = self
            .link_start
            .ok_or_else(|| EditError::NotFound("no link is being drawn".to_string()))?;
        let link = Link::new(location, target, self.transport.iteration())?;
        self.link_start = None;
        self.links.add(link.clone());
        Ok(link)
    }

    pub fn cancel_link(&mut self) {
        self.link_start = None;
    }

    // -------------------------------
    // MARK: Playback
    // -------------------------------

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn time(&self) -> f64 {
        self.transport.time()
    }

    pub fn iteration(&self) -> i32 {
        self.transport.iteration()
    }

    /// Advance playback to `proposed` seconds and report what is sounding.
    ///
    /// After a jump the tick reports the link's target beat.
    pub fn advance(&mut self, proposed: f64) -> Result<Tick, EditError> {
        let jumped = self.transport.advance(proposed, &self.links)?;
        let beat = match &jumped {
            Some(link) => link.target(),
            None => self.transport.current_beat(),
        };
        Ok(Tick {
            time: self.transport.time(),
            beat,
            iteration: self.transport.iteration(),
            jumped,
            sounding: self.timeline.get_notes(beat)?,
        })
    }

    pub fn reset_iteration(&mut self) {
        self.transport.reset_iteration(&self.links);
    }

    /// Jump straight to `seconds`, recomputing the pass number.
    pub fn seek(&mut self, seconds: f64) -> Result<(), EditError> {
        self.transport.seek(seconds, &self.links)
    }
}
