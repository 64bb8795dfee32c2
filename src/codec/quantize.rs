use crate::codec::{Resolution, Token};
use crate::error::CodecError;
use crate::midi::{Message, Timeline};
use log::trace;
use std::collections::BTreeMap;

/// Samples `timeline` on the step grid of `resolution`.
///
/// Steps run from time 0 up to and including the first multiple of the step
/// size that is at or past the last event, so notes still sounding at the end
/// are cut off by the final sample. Every event at or before a sample time is
/// applied before that sample is taken. When several notes sound at once the
/// highest pitch wins.
///
/// An empty timeline yields an empty grid.
pub fn quantize(timeline: &Timeline, resolution: Resolution) -> Vec<Token> {
    if timeline.is_empty() {
        return Vec::new();
    }

    let step_size = resolution.step_size();
    let events = timeline.events();
    let steps = timeline.final_time().div_ceil(step_size) + 1;

    let mut tokens = Vec::with_capacity(steps as usize);
    // pitch -> note start time
    let mut active_notes: BTreeMap<u8, u64> = BTreeMap::new();
    let mut cursor = 0;

    for step in 0..steps {
        let t = step * step_size;

        while let Some(event) = events.get(cursor).filter(|e| e.absolute_time <= t) {
            if let Some(pitch) = event.message.started_pitch() {
                active_notes.insert(pitch, event.absolute_time);
            } else if let Some(pitch) = event.message.released_pitch() {
                active_notes.remove(&pitch);
            }
            cursor += 1;
        }

        tokens.push(Token::from(active_notes.keys().next_back().copied()));
    }

    trace!(
        "Quantized {} events into {} steps of {} ticks",
        events.len(),
        tokens.len(),
        step_size
    );
    tokens
}

/// Builds the timeline for `messages` and quantizes it
pub fn encode_messages(messages: &[Message], resolution: Resolution) -> Result<Vec<Token>, CodecError> {
    let timeline = Timeline::from_messages(messages)?;
    Ok(quantize(&timeline, resolution))
}
