//! Token grid codec
//!
//! Conversion between delta-timed MIDI messages and fixed-step token grids:
//! - [`quantize`] samples a [`Timeline`](crate::midi::Timeline) into tokens
//! - [`synthesize`] turns tokens back into note-on/note-off messages
//! - [`trim_silence`] and the sentinel functions prepare grids for a model
//!
//! Everything here is pure: no I/O, no state shared between calls.
mod quantize;
mod resolution;
mod synthesize;
mod token;
mod trim;

pub use quantize::{encode_messages, quantize};
pub use resolution::Resolution;
pub use synthesize::{synthesize, DEFAULT_VELOCITY};
pub use token::{from_sentinel, to_sentinel, Token, MAX_PITCH, REST_SENTINEL};
pub use trim::{trim_and_encode, trim_silence};
