//! # Playback Module
//!
//! Repeat/jump links and the position engine that turns a linear timeline into a
//! multi-pass performance.
//!
//! ## Purpose
//! A timeline is a straight line of beats. Links let that line express repeats and
//! jumps: "the first time playback reaches beat 8, go back to beat 0". The position
//! engine ([`Transport`]) is ticked by an external clock, checks the links at the beat
//! it lands on and either moves forward or jumps.
//!
//! ## Sub-modules
//! - `links` - [`Link`] and the iteration-ordered [`LinkTable`]
//! - `transport` - [`Transport`], the clock + pass counter state machine
//! - `types` - [`Tick`], the per-tick result handed to drivers
//!
//! ## Passes and Iterations
//! Every link fires during exactly one pass, its `iteration`. The transport keeps the
//! current pass; a link at the current beat fires only if its iteration matches, and
//! firing starts the next pass. Adding a link at iteration `i` pushes the existing
//! links at `i` or later one pass back, so existing repeats keep their relative order.
//!
//! ```text
//! beats:   0 1 2 3 4 5 6 7 8
//! link:    8 -> 0 on pass 0
//! pass 0:  0 1 2 3 4 5 6 7 ─┐ jump
//! pass 1:  0 1 2 3 4 5 6 7 8 ...
//! ```
//!
//! ## Simultaneous Links
//! When several links share a location, they are checked in table order (ascending
//! iteration, then insertion order) and the first one matching the current pass fires.
//! A single tick never chains jumps; a link at the target beat is resolved next tick.
//!
//! ## Example
//! ```rust
//! use beatgrid::playback::{Link, LinkTable, Transport};
//!
//! let mut links = LinkTable::new();
//! links.add(Link::new(8, 0, 0).unwrap());
//!
//! let mut transport = Transport::default(); // 120 bpm
//! let fired = transport.advance(4.0, &links).unwrap(); // lands on beat 8
//!
//! assert!(fired.is_some());
//! assert_eq!(transport.time(), 0.0);
//! assert_eq!(transport.iteration(), 1);
//! ```

mod links;
mod transport;
mod types;

#[cfg(test)]
mod tests;

pub use links::{Link, LinkTable};
pub use transport::{Transport, DEFAULT_BEATS_PER_MEASURE, DEFAULT_TEMPO, DEFAULT_TICK_SECONDS};
pub use types::Tick;
