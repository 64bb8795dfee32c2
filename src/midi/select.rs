use crate::error::Result;
use crate::midi::{MidiFile, Track};
use log::debug;
use regex::{Regex, RegexBuilder};

/// Picks tracks whose name contains a case-insensitive pattern match
#[derive(Debug, Clone)]
pub struct TrackSelector {
    pattern: Regex,
}

impl TrackSelector {
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self { pattern })
    }

    pub fn matches(&self, track: &Track) -> bool {
        track
            .name
            .as_deref()
            .is_some_and(|name| self.pattern.is_match(name))
    }

    /// Every matching track, in file order
    pub fn select<'a>(&self, file: &'a MidiFile) -> Vec<&'a Track> {
        let selected: Vec<&Track> = file.tracks.iter().filter(|t| self.matches(t)).collect();
        debug!(
            "Track pattern '{}' matched {} of {} tracks",
            self.pattern.as_str(),
            selected.len(),
            file.tracks.len()
        );
        selected
    }
}
