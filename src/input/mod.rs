//! Digital input: key chords, per-tick snapshots and input sources

pub mod chord;
pub mod snapshot;
pub mod source;

pub use chord::{Chord, ChordError, ChordSet};
pub use snapshot::{direction_for, resolve_direction, InputSnapshot};
pub use source::{IdleInput, InputSource, ScriptedInput};
