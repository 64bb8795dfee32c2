/// What a message asks the instrument to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Note On message with pitch and velocity; velocity 0 releases the note
    NoteOn { pitch: u8, velocity: u8 },
    /// Note Off message with pitch and release velocity
    NoteOff { pitch: u8, velocity: u8 },
    /// Anything else (meta events, controllers, sysex); ignored by the codec
    Other,
}

/// A performance instruction with its delta time in ticks.
///
/// The delta is signed so that hand-built or foreign input with a negative
/// delta can be represented and rejected by the timeline builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message {
    pub delta_time: i64,
    pub kind: MessageKind,
}

impl Message {
    pub fn note_on(pitch: u8, velocity: u8, delta_time: i64) -> Self {
        Self {
            delta_time,
            kind: MessageKind::NoteOn { pitch, velocity },
        }
    }

    pub fn note_off(pitch: u8, delta_time: i64) -> Self {
        Self {
            delta_time,
            kind: MessageKind::NoteOff { pitch, velocity: 0 },
        }
    }

    pub fn other(delta_time: i64) -> Self {
        Self {
            delta_time,
            kind: MessageKind::Other,
        }
    }

    /// Pitch started by this message, if it sounds a note
    pub fn started_pitch(&self) -> Option<u8> {
        match self.kind {
            MessageKind::NoteOn { pitch, velocity } if velocity > 0 => Some(pitch),
            _ => None,
        }
    }

    /// Pitch released by this message, treating zero-velocity note-ons as note-offs
    pub fn released_pitch(&self) -> Option<u8> {
        match self.kind {
            MessageKind::NoteOn { pitch, velocity: 0 } => Some(pitch),
            MessageKind::NoteOff { pitch, .. } => Some(pitch),
            _ => None,
        }
    }
}

/// An ordered sequence of messages, as stored in one track of a file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    pub name: Option<String>,
    pub messages: Vec<Message>,
}

impl Track {
    pub fn new(name: Option<String>, messages: Vec<Message>) -> Self {
        Self { name, messages }
    }

    pub fn note_on_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.started_pitch().is_some())
            .count()
    }
}

impl From<Vec<Message>> for Track {
    fn from(messages: Vec<Message>) -> Self {
        Self {
            name: None,
            messages,
        }
    }
}
