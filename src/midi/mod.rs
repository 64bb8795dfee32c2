//! MIDI side of the codec
//!
//! This module covers everything on the message-stream side of the conversion:
//! - Delta-timed [`Message`]s and the [`Track`]s that hold them
//! - The [`Timeline`] of absolute-time [`Event`]s built from a track
//! - Standard MIDI File reading and writing via `midly`
//! - Regex-based [`TrackSelector`] for picking tracks by name
//!
mod file;
mod message;
mod select;
mod timeline;

pub use file::{key_name, write_track, write_track_with_length, MidiFile};
pub use message::{Message, MessageKind, Track};
pub use select::TrackSelector;
pub use timeline::{Event, Timeline};
