//! Beat-indexed note timeline and repeat/jump playback engine for a music
//! composition editor.
//!
//! Rendering, audio output, input handling and score file formats live outside this
//! crate; they drive it through [`Session`] or the individual types below.

pub mod config;
pub mod console;
pub mod error;
pub mod event;
pub mod pitch;
pub mod playback;
pub mod session;
pub mod timeline;

pub use config::SessionConfig;
pub use console::{render_grid, write_grid};
pub use error::*;
pub use event::Event;
pub use pitch::Pitch;
pub use playback::{Link, LinkTable, Tick, Transport};
pub use session::Session;
pub use timeline::{NoteId, Timeline};
