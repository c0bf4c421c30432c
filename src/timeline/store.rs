//! Arena-backed timeline storage.

use log::{debug, warn};
use std::collections::BTreeMap;

use crate::error::EditError;
use crate::event::Event;

/// Handle to a note stored in a [`Timeline`].
///
/// Ids stay valid across `move_note` and are recycled after the note is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteId(usize);

/// Beat-indexed store of overlapping notes.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    /// Stored notes; `None` marks a freed slot.
    arena: Vec<Option<Event>>,

    /// Freed arena slots available for reuse.
    free: Vec<usize>,

    /// Beat number -> ids of the notes sounding at that beat, in insertion order.
    beats: BTreeMap<i32, Vec<NoteId>>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a timeline holding copies of the given notes.
    pub fn from_notes<'a>(notes: impl IntoIterator<Item = &'a Event>) -> Self {
        let mut timeline = Self::new();
        for note in notes {
            timeline.add_note(note);
        }
        timeline
    }

    /// Store a copy of `note` at every beat it spans.
    pub fn add_note(&mut self, note: &Event) -> NoteId {
        let id = self.alloc(note.copy());
        for beat in note.span() {
            self.beats.entry(beat).or_default().push(id);
        }
        debug!(
            "added {}{} at beat {} for {} beats",
            note.pitch(),
            note.octave(),
            note.start(),
            note.duration()
        );
        id
    }

    /// The stored note behind `id`, if it is still stored.
    pub fn note(&self, id: NoteId) -> Option<&Event> {
        self.arena.get(id.0).and_then(Option::as_ref)
    }

    /// Copies of every note sounding at `beat`.
    ///
    /// # Errors
    /// `InvalidArgument` if `beat` is negative.
    pub fn get_notes(&self, beat: i32) -> Result<Vec<Event>, EditError> {
        if beat < 0 {
            return Err(EditError::invalid(format!(
                "beat must not be negative, got {}",
                beat
            )));
        }
        Ok(self.notes_at(beat).cloned().collect())
    }

    /// Borrowed view of the notes sounding at `beat`. Empty for absent or negative beats.
    pub(crate) fn notes_at(&self, beat: i32) -> impl Iterator<Item = &Event> + '_ {
        self.beats
            .get(&beat)
            .into_iter()
            .flatten()
            .filter_map(move |id| self.note(*id))
    }

    /// Notes whose span begins exactly at `beat`.
    pub(crate) fn notes_starting_at(&self, beat: i32) -> impl Iterator<Item = &Event> + '_ {
        self.notes_at(beat).filter(move |note| note.start() == beat)
    }

    /// Every stored note exactly once, ordered by start beat and then insertion order.
    pub fn notes(&self) -> impl Iterator<Item = &Event> + '_ {
        self.beats
            .keys()
            .flat_map(move |&beat| self.notes_starting_at(beat))
    }

    /// Number of distinct stored notes.
    pub fn note_count(&self) -> usize {
        self.arena.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.note_count() == 0
    }

    /// Id of the first stored note structurally equal to `note`.
    pub fn find(&self, note: &Event) -> Option<NoteId> {
        self.beats
            .get(&note.start())?
            .iter()
            .copied()
            .find(|id| self.note(*id) == Some(note))
    }

    /// Remove a note equal to `note` from every beat of its span.
    ///
    /// Returns `Ok(true)` when the note was found and removed at every beat, and
    /// `Ok(false)` when some beats of the span no longer held it. Callers that need a
    /// clean removal must check the flag.
    ///
    /// # Errors
    /// `NotFound` when no beat of the span holds an equal note.
    pub fn remove_note(&mut self, note: &Event) -> Result<bool, EditError> {
        let Timeline { arena, beats, .. } = self;
        let mut removed: Vec<NoteId> = Vec::new();
        let mut complete = true;

        for beat in note.span() {
            let hit = beats.get_mut(&beat).and_then(|ids| {
                let pos = ids
                    .iter()
                    .position(|id| arena[id.0].as_ref() == Some(note))?;
                Some(ids.remove(pos))
            });
            match hit {
                Some(id) => {
                    if !removed.contains(&id) {
                        removed.push(id);
                    }
                }
                None => complete = false,
            }
        }

        if removed.is_empty() {
            return Err(EditError::NotFound(describe(note)));
        }

        for id in removed {
            if !self.is_referenced(id) {
                self.release(id);
            }
        }
        self.prune(note.start(), note.end());

        if complete {
            debug!("removed {}", describe(note));
        } else {
            warn!("partially removed {}", describe(note));
        }
        Ok(complete)
    }

    /// Shift a stored note by `steps` beats, keeping its identity.
    ///
    /// # Errors
    /// `InvalidArgument` if no equal note is stored at its declared start, or if the
    /// moved note would start before beat 0 or end past the last addressable beat.
    pub fn move_note(&mut self, note: &Event, steps: i32) -> Result<NoteId, EditError> {
        let not_stored =
            || EditError::invalid(format!("{} is not in the timeline", describe(note)));
        let id = self.find(note).ok_or_else(not_stored)?;
        let moved = self
            .note(id)
            .ok_or_else(not_stored)?
            .shifted(steps)
            .map_err(|e| {
                EditError::invalid(format!(
                    "cannot move {} by {} beats: {}",
                    describe(note),
                    steps,
                    e
                ))
            })?;

        for beat in note.span() {
            if let Some(ids) = self.beats.get_mut(&beat) {
                ids.retain(|other| *other != id);
            }
        }
        self.prune(note.start(), note.end());

        for beat in moved.span() {
            self.beats.entry(beat).or_default().push(id);
        }
        debug!("moved {} to beat {}", describe(note), moved.start());
        self.arena[id.0] = Some(moved);
        Ok(id)
    }

    /// One past the last beat that has a sounding note; 0 when nothing sounds.
    pub fn length(&self) -> i32 {
        self.beats
            .iter()
            .rev()
            .find(|(_, ids)| !ids.is_empty())
            .map(|(beat, _)| beat + 1)
            .unwrap_or(0)
    }

    /// Copy of the highest (`highest = true`) or lowest pitched note.
    ///
    /// Scans beats in order and keeps the first note found at the extreme, so ties go to
    /// the earliest beat and then to insertion order. `None` for an empty timeline.
    pub fn extreme(&self, highest: bool) -> Option<Event> {
        let mut best: Option<&Event> = None;
        for &beat in self.beats.keys() {
            for note in self.notes_at(beat) {
                let better = match best {
                    None => true,
                    Some(current) if highest => note.compare(current) > 0,
                    Some(current) => note.compare(current) < 0,
                };
                if better {
                    best = Some(note);
                }
            }
        }
        best.cloned()
    }

    pub fn highest(&self) -> Option<Event> {
        self.extreme(true)
    }

    pub fn lowest(&self) -> Option<Event> {
        self.extreme(false)
    }

    /// Copy every note of `other` onto the end of this timeline.
    ///
    /// Notes keep their relative timing and are shifted by this timeline's length as it
    /// was before the call.
    ///
    /// # Errors
    /// `InvalidArgument` if a shifted note would end past the last addressable beat.
    /// Nothing is added in that case.
    pub fn append(&mut self, other: &Timeline) -> Result<(), EditError> {
        let offset = self.length();
        let shifted = other
            .notes()
            .map(|note| note.shifted(offset))
            .collect::<Result<Vec<_>, _>>()?;
        for note in &shifted {
            self.add_note(note);
        }
        debug!("appended {} beats at beat {}", other.length(), offset);
        Ok(())
    }

    /// Merge every note of `other` into this timeline at the same beats.
    pub fn overlay(&mut self, other: &Timeline) {
        for note in other.notes() {
            self.add_note(note);
        }
        debug!("overlaid {} beats", other.length());
    }

    fn alloc(&mut self, note: Event) -> NoteId {
        match self.free.pop() {
            Some(slot) => {
                self.arena[slot] = Some(note);
                NoteId(slot)
            }
            None => {
                self.arena.push(Some(note));
                NoteId(self.arena.len() - 1)
            }
        }
    }

    fn release(&mut self, id: NoteId) {
        self.arena[id.0] = None;
        self.free.push(id.0);
    }

    fn is_referenced(&self, id: NoteId) -> bool {
        match self.note(id) {
            Some(note) => note.span().any(|beat| {
                self.beats
                    .get(&beat)
                    .map_or(false, |ids| ids.contains(&id))
            }),
            None => false,
        }
    }

    /// Drop beat slots in `[from, to)` that no longer list any note.
    fn prune(&mut self, from: i32, to: i32) {
        for beat in from..to {
            if self.beats.get(&beat).map_or(false, Vec::is_empty) {
                self.beats.remove(&beat);
            }
        }
    }
}

fn describe(note: &Event) -> String {
    format!(
        "note {}{} at beat {} (duration {}, instrument {})",
        note.pitch(),
        note.octave(),
        note.start(),
        note.duration(),
        note.instrument()
    )
}
