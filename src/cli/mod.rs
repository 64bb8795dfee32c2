use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Read settings from this file instead of ./melodygrid.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to the terminal
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert MIDI files into token sequences
    Encode {
        /// MIDI files to encode
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Pattern matched case-insensitively against track names
        #[arg(short, long)]
        track: Option<String>,

        /// Grid steps per beat
        #[arg(short, long)]
        subdivision: Option<u32>,

        /// Directory for token files and renders
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Keep leading and trailing silence
        #[arg(long)]
        raw: bool,

        /// Also render the encoded grid back to a MIDI file with this name
        #[arg(long, value_name = "NAME")]
        render: Option<String>,

        /// Overwrite existing outputs without asking
        #[arg(short, long)]
        force: bool,
    },

    /// Convert a token sequence into a MIDI file
    Decode {
        /// Token file: a bare JSON array or an encode output
        input: PathBuf,

        /// Name of the MIDI file written into the output directory
        #[arg(long, value_name = "NAME")]
        output: String,

        /// Ticks per beat when the token file does not carry it
        #[arg(long)]
        ticks_per_beat: Option<u32>,

        /// Grid steps per beat when the token file does not carry it
        #[arg(short, long)]
        subdivision: Option<u32>,

        #[arg(short = 'd', long)]
        output_dir: Option<PathBuf>,

        /// Overwrite existing outputs without asking
        #[arg(short, long)]
        force: bool,
    },

    /// Show tracks, key and note statistics of a MIDI file
    Inspect {
        input: PathBuf,

        #[arg(short, long)]
        track: Option<String>,

        #[arg(short, long)]
        subdivision: Option<u32>,
    },
}

/// Token file path for an input MIDI file, e.g. `AutumnLeaves.mid` -> `AutumnLeaves.tokens.json`
pub fn token_output_path(output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tokens".to_string());
    output_dir.join(format!("{}.tokens.json", stem))
}

pub fn validate_output_name(name: &str) -> Result<(), String> {
    let path = Path::new(name);
    if name.is_empty() || path.file_name().map(|f| f != path.as_os_str()).unwrap_or(true) {
        return Err(format!(
            "Error: output name '{}' must be a plain file name; use --output-dir for directories",
            name
        ));
    }
    Ok(())
}
