//! # Error Types
//!
//! This module defines all error types for the beatgrid editing core.
//!
//! Every fallible operation validates its arguments before touching any state, so an
//! `Err` always means the timeline, link table and playback position are unchanged.
//!
//! ## Error Types
//! - `InvalidArgument` - Out-of-range start, duration, instrument, tempo, beat or link field
//! - `NotFound` - Operating on a note or link that is not stored
//! - `Config` - Invalid YAML or unreadable session configuration
//!
//! ## Usage
//! ```rust
//! use beatgrid::{EditError, Event, Pitch, Timeline};
//!
//! let mut timeline = Timeline::new();
//! let ghost = Event::new(4, 2, Pitch::C, 4).unwrap();
//!
//! match timeline.remove_note(&ghost) {
//!     Ok(complete) => println!("removed (complete: {})", complete),
//!     Err(EditError::NotFound(what)) => eprintln!("nothing to remove: {}", what),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    /// An argument is outside its allowed range.
    ///
    /// # Example
    /// ```
    /// # use beatgrid::EditError;
    /// let err = EditError::InvalidArgument("duration must be at least 1, got 0".to_string());
    /// assert_eq!(err.to_string(), "Invalid argument: duration must be at least 1, got 0");
    /// ```
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The note or link being operated on is not stored.
    ///
    /// # Example
    /// ```
    /// # use beatgrid::EditError;
    /// let err = EditError::NotFound("link at beat 8 -> 0 (iteration 0)".to_string());
    /// assert_eq!(err.to_string(), "Not found: link at beat 8 -> 0 (iteration 0)");
    /// ```
    #[error("Not found: {0}")]
    NotFound(String),

    /// Session configuration could not be read or contains invalid values.
    #[error("Invalid config: {0}")]
    Config(String),
}

impl EditError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        EditError::InvalidArgument(message.into())
    }
}
