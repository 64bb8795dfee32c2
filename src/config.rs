// config.rs

use crate::error::Result;
use config::{Config, Environment, File};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_SUBDIVISION: u32 = 6;
pub const DEFAULT_TRACK: &str = "solo";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
/// Resolution assumed when decoding a bare token sequence
pub const DEFAULT_TICKS_PER_BEAT: u32 = 480;

const CONFIG_BASENAME: &str = "melodygrid";
const ENV_PREFIX: &str = "MELODYGRID";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Grid steps per beat; also the trim block size
    pub subdivision: u32,
    /// Case-insensitive pattern matched against track names
    pub track: String,
    pub output_dir: PathBuf,
}

impl Settings {
    /// Layers defaults, a config file and `MELODYGRID_*` environment variables.
    ///
    /// Without an explicit path, `melodygrid.{toml,json,yaml}` in the working
    /// directory is read if present.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let builder = Config::builder()
            .set_default("subdivision", i64::from(DEFAULT_SUBDIVISION))?
            .set_default("track", DEFAULT_TRACK)?
            .set_default("output_dir", DEFAULT_OUTPUT_DIR)?;

        let builder = match config_file {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                builder.add_source(File::from(path))
            }
            None => builder.add_source(File::with_name(CONFIG_BASENAME).required(false)),
        };

        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        debug!("Resolved settings: {:?}", settings);
        Ok(settings)
    }

    /// Applies command-line values on top of the loaded settings
    pub fn with_overrides(
        mut self,
        subdivision: Option<u32>,
        track: Option<String>,
        output_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(subdivision) = subdivision {
            self.subdivision = subdivision;
        }
        if let Some(track) = track {
            self.track = track;
        }
        if let Some(output_dir) = output_dir {
            self.output_dir = output_dir;
        }
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            subdivision: DEFAULT_SUBDIVISION,
            track: DEFAULT_TRACK.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}
