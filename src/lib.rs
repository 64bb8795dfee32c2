pub mod analysis;
pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod logging;
pub mod midi;
pub mod pipeline;
pub mod tokens;
pub mod ui;

pub use error::{CodecError, Error, Result};
