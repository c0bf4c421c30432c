//! # Timeline Module
//!
//! The beat-indexed note store at the heart of the editor.
//!
//! ## Purpose
//! A [`Timeline`] answers one question quickly: which notes are sounding at beat `b`?
//! Notes overlap freely, so a note lasting four beats is listed at each of those four
//! beats. The listing is by identity: the note is stored once and every beat it spans
//! refers to that single stored note, so editing or removing it touches all of them.
//!
//! ## Storage Layout
//! ```text
//! arena:  [ Some(C4 @0 x4) | Some(E4 @1 x2) | None (freed) | ... ]
//!                 ▲                ▲
//! beats:  0 → [0]  1 → [0, 1]  2 → [0, 1]  3 → [0]
//! ```
//! - The arena owns every stored [`Event`]; a [`NoteId`] is an index into it
//! - Each beat slot lists the ids active there, in insertion order
//! - Beat slots are only ever created by writes; reading an empty beat allocates nothing
//!
//! ## Copy Semantics
//! - `add_note` stores a copy; the caller's event is never aliased
//! - `get_notes` returns copies; external readers cannot reach stored notes
//! - `move_note` keeps identity: the returned [`NoteId`] is the id the note had before
//!
//! ## Length
//! The length is one past the last beat with at least one sounding note. Beats emptied
//! by removals or moves never count, even at the end of the piece.
//!
//! ## Example
//! ```rust
//! use beatgrid::{Event, Pitch, Timeline};
//!
//! let mut timeline = Timeline::new();
//! timeline.add_note(&Event::new(0, 4, Pitch::C, 4).unwrap());
//! timeline.add_note(&Event::new(1, 2, Pitch::E, 4).unwrap());
//!
//! assert_eq!(timeline.length(), 4);
//! assert_eq!(timeline.get_notes(1).unwrap().len(), 2);
//! assert_eq!(timeline.highest().unwrap().pitch(), Pitch::E);
//! ```
//!
//! ## Related Modules
//! - `event` - The stored note type
//! - `playback` - Reads sounding notes each tick
//! - `console` - Text grid dump of a timeline

mod store;


pub use store::{NoteId, Timeline};
