//! Terminal output helpers
//!
//! This module provides terminal-based UI components for melodygrid:
//! - A file progress bar for batch encoding
//! - Plain-text summaries of inspected files
//!
//! Progress bars are built with the indicatif library.

mod progress;
mod report;

pub use progress::{create_file_progress, create_hidden_progress};
pub use report::{format_histogram, format_tokens};
