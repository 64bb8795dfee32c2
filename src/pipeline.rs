//! End-to-end conversion between MIDI files and token sequences.

use crate::codec::{
    encode_messages, from_sentinel, synthesize, to_sentinel, trim_and_encode, Resolution, Token,
};
use crate::error::{CodecError, Result};
use crate::midi::{write_track_with_length, Message, MidiFile, Track, TrackSelector};
use crate::tokens::TokenFile;
use log::{debug, info, warn};
use std::panic;
use std::path::Path;

/// Token grid of every selected track in a file, concatenated in file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFile {
    pub tokens: Vec<Token>,
    pub key: Option<String>,
    pub resolution: Resolution,
    pub matched_tracks: usize,
}

impl EncodedFile {
    /// Model-facing token file; trimmed of block-aligned silence unless `raw`
    pub fn to_token_file(&self, raw: bool) -> Result<TokenFile> {
        let tokens = if raw {
            to_sentinel(&self.tokens)
        } else {
            trim_and_encode(&self.tokens, self.resolution.subdivision())?
        };
        Ok(TokenFile {
            ticks_per_beat: self.resolution.ticks_per_beat(),
            subdivision: self.resolution.subdivision(),
            key: self.key.clone(),
            tokens,
        })
    }
}

pub fn encode_file(
    path: impl AsRef<Path>,
    selector: &TrackSelector,
    subdivision: u32,
) -> Result<EncodedFile> {
    let path = path.as_ref();
    info!("Encoding {}", path.display());
    let file = MidiFile::load(path)?;
    encode_midi(&file, selector, subdivision)
}

/// Selects tracks from `file` and encodes each of them.
///
/// No matching track is not an error: the result is an empty grid.
pub fn encode_midi(
    file: &MidiFile,
    selector: &TrackSelector,
    subdivision: u32,
) -> Result<EncodedFile> {
    let resolution = Resolution::new(file.ticks_per_beat, subdivision)?;
    let selected = selector.select(file);

    if selected.is_empty() {
        warn!(
            "No track matched; available tracks: {:?}",
            file.track_names().collect::<Vec<_>>()
        );
    } else if let Some(key) = &file.key {
        info!("Key signature: {}", key);
    }

    let tokens = encode_selected(&selected, resolution)?;
    debug!(
        "Encoded {} tracks into {} tokens",
        selected.len(),
        tokens.len()
    );

    Ok(EncodedFile {
        tokens,
        key: file.key.clone(),
        resolution,
        matched_tracks: selected.len(),
    })
}

/// Encodes `tracks` and concatenates their grids in the given order
pub fn encode_selected(
    tracks: &[&Track],
    resolution: Resolution,
) -> std::result::Result<Vec<Token>, CodecError> {
    Ok(encode_tracks(tracks, resolution)?
        .into_iter()
        .flatten()
        .collect())
}

/// Encodes each track on its own scoped thread; results keep track order
pub fn encode_tracks(
    tracks: &[&Track],
    resolution: Resolution,
) -> std::result::Result<Vec<Vec<Token>>, CodecError> {
    crossbeam::thread::scope(|s| {
        let handles: Vec<_> = tracks
            .iter()
            .map(|track| {
                let messages = &track.messages;
                s.spawn(move |_| encode_messages(messages, resolution))
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| panic::resume_unwind(e)))
            .collect()
    })
    .unwrap_or_else(|e| panic::resume_unwind(e))
}

/// Maps sentinel-coded model output back to messages
pub fn decode_tokens(
    values: &[i32],
    resolution: Resolution,
) -> std::result::Result<Vec<Message>, CodecError> {
    let tokens = from_sentinel(values)?;
    Ok(synthesize(&tokens, resolution))
}

/// Synthesizes `tokens` and writes them as a MIDI file at `path`.
///
/// The written track lasts exactly `tokens.len() * step_size` ticks, trailing
/// rests included.
pub fn render_tokens(tokens: &[Token], resolution: Resolution, path: impl AsRef<Path>) -> Result<()> {
    let messages = synthesize(tokens, resolution);
    write_track_with_length(
        &messages,
        resolution.ticks_per_beat(),
        resolution.grid_length(tokens.len()),
        path.as_ref(),
    )?;
    info!(
        "Rendered {} tokens to {}",
        tokens.len(),
        path.as_ref().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use Token::{Pitch, Rest};

    fn named(name: &str, messages: Vec<Message>) -> Track {
        Track::new(Some(name.to_string()), messages)
    }

    #[test]
    fn test_selected_tracks_are_concatenated_in_order() {
        let file = MidiFile {
            ticks_per_beat: 480,
            tracks: vec![
                named("Solo A", vec![Message::note_on(60, 100, 0), Message::note_off(60, 80)]),
                named("Piano", vec![Message::note_on(40, 100, 0), Message::note_off(40, 80)]),
                named("solo B", vec![Message::note_on(70, 100, 80), Message::note_off(70, 80)]),
            ],
            key: Some("F".to_string()),
        };
        let selector = TrackSelector::new("solo").unwrap();

        let encoded = encode_midi(&file, &selector, 6).unwrap();
        assert_eq!(encoded.matched_tracks, 2);
        assert_eq!(encoded.tokens, vec![Pitch(60), Rest, Rest, Pitch(70), Rest]);
        assert_eq!(encoded.key.as_deref(), Some("F"));
    }

    #[test]
    fn test_no_matching_track_gives_empty_grid() {
        let file = MidiFile {
            ticks_per_beat: 480,
            tracks: vec![named("Bass", vec![Message::note_on(40, 100, 0)])],
            key: None,
        };
        let encoded = encode_midi(&file, &TrackSelector::new("solo").unwrap(), 6).unwrap();
        assert_eq!(encoded.matched_tracks, 0);
        assert!(encoded.tokens.is_empty());
    }

    #[test]
    fn test_bad_track_fails_whole_file() {
        let file = MidiFile {
            ticks_per_beat: 480,
            tracks: vec![
                named("solo", vec![Message::note_on(60, 100, 0)]),
                named("solo 2", vec![Message::note_on(60, 100, -3)]),
            ],
            key: None,
        };
        let result = encode_midi(&file, &TrackSelector::new("solo").unwrap(), 6);
        assert!(matches!(
            result,
            Err(crate::error::Error::Codec(CodecError::InvalidTiming { .. }))
        ));
    }

    #[test]
    fn test_degenerate_resolution_is_checked_first() {
        let file = MidiFile {
            ticks_per_beat: 4,
            tracks: Vec::new(),
            key: None,
        };
        let result = encode_midi(&file, &TrackSelector::new("solo").unwrap(), 8);
        assert!(matches!(
            result,
            Err(crate::error::Error::Codec(CodecError::DegenerateResolution { .. }))
        ));
    }

    #[test]
    fn test_token_file_trims_unless_raw() {
        let encoded = EncodedFile {
            tokens: vec![Rest, Rest, Rest, Pitch(60), Rest],
            key: None,
            resolution: Resolution::new(480, 2).unwrap(),
            matched_tracks: 1,
        };
        assert_eq!(encoded.to_token_file(false).unwrap().tokens, vec![-1, 60, -1]);
        assert_eq!(
            encoded.to_token_file(true).unwrap().tokens,
            vec![-1, -1, -1, 60, -1]
        );
    }

    #[test]
    fn test_decode_model_output() {
        let messages = decode_tokens(&[-1, -1, 57, 57, 62, 62], Resolution::new(480, 6).unwrap())
            .unwrap();
        assert_eq!(
            messages,
            vec![
                Message::note_on(57, 64, 160),
                Message::note_off(57, 160),
                Message::note_on(62, 64, 0),
                Message::note_off(62, 160),
            ]
        );
    }

    #[test]
    fn test_selected_grid_matches_file_encoding() {
        let file = MidiFile {
            ticks_per_beat: 480,
            tracks: vec![
                named("solo", vec![Message::note_on(62, 100, 0), Message::note_off(62, 160)]),
                named("solo 2", vec![Message::note_on(65, 100, 80), Message::note_off(65, 80)]),
            ],
            key: None,
        };
        let selector = TrackSelector::new("solo").unwrap();
        let resolution = Resolution::new(480, 6).unwrap();

        let tokens = encode_selected(&selector.select(&file), resolution).unwrap();
        assert_eq!(tokens, encode_midi(&file, &selector, 6).unwrap().tokens);
        assert_eq!(
            tokens,
            vec![Pitch(62), Pitch(62), Rest, Rest, Pitch(65), Rest]
        );
    }
}
