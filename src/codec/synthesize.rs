use crate::codec::{Resolution, Token};
use crate::midi::Message;
use log::trace;

/// Velocity given to every synthesized note-on; the grid does not keep velocity
pub const DEFAULT_VELOCITY: u8 = 64;

/// Collapses a token grid into note-on/note-off messages.
///
/// A run of identical tokens becomes a single note, so the output has the
/// fewest messages that reproduce the grid at step granularity. A note still
/// sounding after the last token is closed at `tokens.len() * step_size`.
///
/// The messages end at the last transition; trailing rests add no message.
/// Writers that need the full span of the grid pad the track out to
/// [`Resolution::grid_length`].
pub fn synthesize(tokens: &[Token], resolution: Resolution) -> Vec<Message> {
    let step_size = resolution.step_size();
    let mut messages = Vec::new();
    let mut current_time = 0u64;
    let mut previous = Token::Rest;

    for (i, &token) in tokens.iter().enumerate() {
        if token == previous {
            continue;
        }

        let step_time = i as u64 * step_size;
        let mut delta = (step_time - current_time) as i64;

        if let Token::Pitch(pitch) = previous {
            messages.push(Message::note_off(pitch, delta));
            delta = 0;
        }
        if let Token::Pitch(pitch) = token {
            messages.push(Message::note_on(pitch, DEFAULT_VELOCITY, delta));
        }

        current_time = step_time;
        previous = token;
    }

    if let Token::Pitch(pitch) = previous {
        let end_time = tokens.len() as u64 * step_size;
        messages.push(Message::note_off(pitch, (end_time - current_time) as i64));
    }

    trace!(
        "Synthesized {} tokens into {} messages",
        tokens.len(),
        messages.len()
    );
    messages
}
