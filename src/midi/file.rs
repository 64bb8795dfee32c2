//! MIDI File I/O
//!
//! Standard MIDI File (SMF) parsing and writing using the `midly` crate.
//! Tracks are converted to owned [`Track`]s of delta-timed [`Message`]s so the
//! codec never sees `midly`'s borrowed types.

use crate::error::{CodecError, Error, Result};
use crate::midi::{Message, MessageKind, Track};
use log::debug;
use midly::num::{u15, u28, u4, u7};
use midly::{
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind,
};
use std::fs;
use std::path::Path;

/// Largest delta time a track event can carry (28-bit variable-length quantity)
const MAX_DELTA: u64 = 0x0FFF_FFFF;

/// Largest metrical resolution an SMF header can carry (15 bits)
const MAX_TICKS_PER_BEAT: u32 = 0x7FFF;

const MAX_DATA_BYTE: u8 = 0x7F;

const MAJOR_KEYS: [&str; 15] = [
    "Cb", "Gb", "Db", "Ab", "Eb", "Bb", "F", "C", "G", "D", "A", "E", "B", "F#", "C#",
];
const MINOR_KEYS: [&str; 15] = [
    "Abm", "Ebm", "Bbm", "Fm", "Cm", "Gm", "Dm", "Am", "Em", "Bm", "F#m", "C#m", "G#m", "D#m",
    "A#m",
];

/// A parsed MIDI file with every track converted to owned messages
#[derive(Debug, Clone)]
pub struct MidiFile {
    /// Ticks per quarter note
    pub ticks_per_beat: u32,

    /// Tracks in file order
    pub tracks: Vec<Track>,

    /// Last key signature found in any track, e.g. "Bbm"
    pub key: Option<String>,
}

impl MidiFile {
    /// Load and parse a MIDI file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read(path.as_ref())?;
        Self::parse(&data)
    }

    /// Parse MIDI file from bytes
    pub fn parse(data: &[u8]) -> Result<Self> {
        let smf = Smf::parse(data)?;

        let ticks_per_beat = match smf.header.timing {
            Timing::Metrical(tpb) => u32::from(tpb.as_int()),
            Timing::Timecode(fps, subframe) => {
                return Err(Error::UnsupportedTiming(format!(
                    "timecode at {} fps with {} subframes",
                    fps.as_int(),
                    subframe
                )));
            }
        };

        debug!(
            "Parsing MIDI file: {} tracks, {} ticks per beat",
            smf.tracks.len(),
            ticks_per_beat
        );

        let mut key = None;
        let tracks = smf
            .tracks
            .iter()
            .map(|events| {
                if let Some(found) = find_key(events) {
                    key = Some(found);
                }
                convert_track(events)
            })
            .collect();

        Ok(Self {
            ticks_per_beat,
            tracks,
            key,
        })
    }

    pub fn track_names(&self) -> impl Iterator<Item = Option<&str>> {
        self.tracks.iter().map(|t| t.name.as_deref())
    }
}

fn convert_track(events: &[TrackEvent]) -> Track {
    let mut name = None;
    let messages = events
        .iter()
        .map(|event| {
            if let TrackEventKind::Meta(MetaMessage::TrackName(raw)) = event.kind {
                if name.is_none() {
                    name = Some(String::from_utf8_lossy(raw).into_owned());
                }
            }
            Message {
                delta_time: i64::from(event.delta.as_int()),
                kind: convert_kind(&event.kind),
            }
        })
        .collect();

    Track { name, messages }
}

fn convert_kind(kind: &TrackEventKind) -> MessageKind {
    match kind {
        TrackEventKind::Midi { message, .. } => match message {
            MidiMessage::NoteOn { key, vel } => MessageKind::NoteOn {
                pitch: key.as_int(),
                velocity: vel.as_int(),
            },
            MidiMessage::NoteOff { key, vel } => MessageKind::NoteOff {
                pitch: key.as_int(),
                velocity: vel.as_int(),
            },
            _ => MessageKind::Other,
        },
        _ => MessageKind::Other,
    }
}

fn find_key(events: &[TrackEvent]) -> Option<String> {
    let mut current = None;
    for event in events {
        if let TrackEventKind::Meta(MetaMessage::KeySignature(sharps, minor)) = event.kind {
            let name = key_name(sharps, minor);
            debug!("Key signature changed to {:?}", name);
            if name.is_some() {
                current = name;
            }
        }
    }
    current
}

/// Key name for a key signature given as sharps (positive) or flats (negative)
pub fn key_name(sharps: i8, minor: bool) -> Option<String> {
    let index = usize::try_from(i16::from(sharps) + 7).ok()?;
    let table = if minor { &MINOR_KEYS } else { &MAJOR_KEYS };
    table.get(index).map(|k| k.to_string())
}

/// Writes `messages` as a single-track MIDI file on channel 0.
///
/// Parent directories are created. `Other` messages carry no payload in this
/// representation, so their delta time is folded into the next written event.
pub fn write_track(messages: &[Message], ticks_per_beat: u32, path: impl AsRef<Path>) -> Result<()> {
    write_track_with_length(messages, ticks_per_beat, 0, path)
}

/// Like [`write_track`], but the End-of-Track event is placed no earlier than
/// `length` ticks, so trailing silence survives in the file.
pub fn write_track_with_length(
    messages: &[Message],
    ticks_per_beat: u32,
    length: u64,
    path: impl AsRef<Path>,
) -> Result<()> {
    let smf = build_smf(messages, ticks_per_beat, length)?;

    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    smf.save(path)?;
    debug!(
        "Wrote {} messages at {} ticks per beat to {}",
        messages.len(),
        ticks_per_beat,
        path.display()
    );
    Ok(())
}

fn build_smf(messages: &[Message], ticks_per_beat: u32, length: u64) -> Result<Smf<'static>> {
    if ticks_per_beat == 0 || ticks_per_beat > MAX_TICKS_PER_BEAT {
        return Err(Error::UnsupportedTiming(format!(
            "{} ticks per beat does not fit a metrical header",
            ticks_per_beat
        )));
    }

    let channel = u4::from(0u8);
    let mut events = Vec::with_capacity(messages.len() + 1);
    let mut pending = 0u64;
    let mut elapsed = 0u64;

    for (index, msg) in messages.iter().enumerate() {
        if msg.delta_time < 0 {
            return Err(CodecError::InvalidTiming {
                index,
                delta: msg.delta_time,
            }
            .into());
        }
        pending = pending.saturating_add(msg.delta_time as u64);
        elapsed = elapsed.saturating_add(msg.delta_time as u64);

        let message = match msg.kind {
            MessageKind::NoteOn { pitch, velocity } => MidiMessage::NoteOn {
                key: data_byte(index, "pitch", pitch)?,
                vel: data_byte(index, "velocity", velocity)?,
            },
            MessageKind::NoteOff { pitch, velocity } => MidiMessage::NoteOff {
                key: data_byte(index, "pitch", pitch)?,
                vel: data_byte(index, "velocity", velocity)?,
            },
            MessageKind::Other => continue,
        };

        events.push(TrackEvent {
            delta: to_delta(pending)?,
            kind: TrackEventKind::Midi { channel, message },
        });
        pending = 0;
    }

    pending = pending.saturating_add(length.saturating_sub(elapsed));
    events.push(TrackEvent {
        delta: to_delta(pending)?,
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });

    let header = Header::new(
        Format::SingleTrack,
        Timing::Metrical(u15::from(ticks_per_beat as u16)),
    );
    let mut smf = Smf::new(header);
    smf.tracks.push(events);
    Ok(smf)
}

fn data_byte(index: usize, field: &'static str, value: u8) -> Result<u7> {
    if value > MAX_DATA_BYTE {
        return Err(Error::DataOutOfRange {
            index,
            field,
            value,
        });
    }
    Ok(u7::from(value))
}

fn to_delta(ticks: u64) -> Result<u28> {
    if ticks > MAX_DELTA {
        return Err(Error::DeltaOverflow(ticks));
    }
    Ok(u28::from(ticks as u32))
}
