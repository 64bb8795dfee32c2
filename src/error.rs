//! Error types for the codec and the file/CLI boundary.

use thiserror::Error;

/// Failures raised by the pure token codec.
///
/// All of these are detected before any output is produced and indicate
/// malformed input, so none of them are worth retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid timing: message {index} has negative delta time {delta}")]
    InvalidTiming { index: usize, delta: i64 },

    #[error("invalid resolution: subdivision must be positive, got {subdivision}")]
    InvalidResolution { subdivision: u32 },

    #[error(
        "degenerate resolution: subdivision {subdivision} with {ticks_per_beat} ticks per beat gives a zero step size"
    )]
    DegenerateResolution { ticks_per_beat: u32, subdivision: u32 },

    #[error("invalid token {value} at position {index}: expected a pitch in 0..=127 or -1")]
    InvalidToken { index: usize, value: i32 },

    #[error("time overflow: absolute time at message {index} does not fit in 64 bits")]
    TimeOverflow { index: usize },
}

/// Errors surfaced by file handling, configuration and the command line.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("MIDI parse error: {0}")]
    MidiParse(String),

    #[error("Unsupported MIDI timing: {0}")]
    UnsupportedTiming(String),

    #[error("Delta time {0} does not fit in a MIDI variable-length quantity")]
    DeltaOverflow(u64),

    #[error("Message {index} has {field} {value}, outside the MIDI data range 0..=127")]
    DataOutOfRange {
        index: usize,
        field: &'static str,
        value: u8,
    },

    #[error("Invalid track pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Token file error: {0}")]
    TokenFormat(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{failed} of {total} files failed to encode")]
    BatchFailed { failed: usize, total: usize },

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl From<midly::Error> for Error {
    fn from(e: midly::Error) -> Self {
        Error::MidiParse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
