use simplelog::*;
use std::fs::{self, OpenOptions};
use std::io::Error;
use std::path::PathBuf;

/// Directory holding the append-only log file, under the user's home
pub fn log_dir() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("melodygrid")
            .join("logs"),
    )
}

/// Installs a debug-level file logger plus a terminal logger on stderr.
///
/// Without `HOME` only the terminal logger is installed. Fails if a logger
/// is already set.
pub fn init_logger(verbose: bool) -> Result<(), Error> {
    let term_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        term_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if let Some(dir) = log_dir() {
        fs::create_dir_all(&dir)?;
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("melodygrid.log"))?;
        loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), log_file));
    }

    CombinedLogger::init(loggers)
        .map_err(|e| Error::other(format!("Logger initialization failed: {}", e)))
}
