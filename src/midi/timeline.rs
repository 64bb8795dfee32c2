use crate::error::CodecError;
use crate::midi::Message;

/// A message paired with its absolute time in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub absolute_time: u64,
    pub message: Message,
}

/// Events with absolute timestamps, in performance order.
///
/// Only constructible from messages, so `absolute_time` is guaranteed to be
/// non-decreasing across the sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    events: Vec<Event>,
}

impl Timeline {
    /// Builds the timeline by running a prefix sum over the delta times.
    ///
    /// Fails on the first negative delta without producing any events, or when
    /// the running time no longer fits in a `u64`.
    pub fn from_messages(messages: &[Message]) -> Result<Self, CodecError> {
        if let Some((index, msg)) = messages
            .iter()
            .enumerate()
            .find(|(_, m)| m.delta_time < 0)
        {
            return Err(CodecError::InvalidTiming {
                index,
                delta: msg.delta_time,
            });
        }

        let mut current_time = 0u64;
        let mut events = Vec::with_capacity(messages.len());
        for (index, message) in messages.iter().enumerate() {
            current_time = current_time
                .checked_add(message.delta_time as u64)
                .ok_or(CodecError::TimeOverflow { index })?;
            events.push(Event {
                absolute_time: current_time,
                message: *message,
            });
        }

        Ok(Self { events })
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Absolute time of the last event, 0 for an empty timeline
    pub fn final_time(&self) -> u64 {
        self.events.last().map(|e| e.absolute_time).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_sum_of_deltas() {
        let timeline = Timeline::from_messages(&[
            Message::note_on(60, 100, 0),
            Message::note_off(60, 160),
            Message::other(0),
            Message::note_on(62, 100, 40),
        ])
        .unwrap();

        let times: Vec<u64> = timeline.events().iter().map(|e| e.absolute_time).collect();
        assert_eq!(times, vec![0, 160, 160, 200]);
        assert_eq!(timeline.final_time(), 200);
    }

    #[test]
    fn test_empty_timeline() {
        let timeline = Timeline::from_messages(&[]).unwrap();
        assert!(timeline.is_empty());
        assert_eq!(timeline.final_time(), 0);
    }

    #[test]
    fn test_negative_delta_is_rejected() {
        let result = Timeline::from_messages(&[
            Message::note_on(60, 100, 0),
            Message::note_off(60, -5),
        ]);
        assert_eq!(
            result,
            Err(CodecError::InvalidTiming {
                index: 1,
                delta: -5
            })
        );
    }

    #[test]
    fn test_running_time_overflow_is_rejected() {
        let result = Timeline::from_messages(&[
            Message::other(i64::MAX),
            Message::other(i64::MAX),
            Message::other(i64::MAX),
        ]);
        assert_eq!(result, Err(CodecError::TimeOverflow { index: 2 }));
    }
}
