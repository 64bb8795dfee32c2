//! Inter-onset note analysis.
//!
//! A lighter view of a melody than the token grid: each note is measured from
//! its onset to the next onset, ignoring note-offs entirely.

use crate::midi::Message;

/// A note and the ticks until the following note started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnsetNote {
    pub pitch: u8,
    pub duration: u64,
}

/// Every note that has a successor, with its inter-onset duration.
///
/// The last note is not emitted since nothing bounds its length. Negative
/// deltas are clamped to zero here; the codec proper rejects them.
pub fn inter_onset_notes(messages: &[Message]) -> Vec<OnsetNote> {
    let mut notes = Vec::new();
    let mut current_time = 0u64;
    let mut current: Option<(u8, u64)> = None;

    for msg in messages {
        current_time += msg.delta_time.max(0) as u64;
        if let Some(pitch) = msg.started_pitch() {
            if let Some((previous, start)) = current {
                notes.push(OnsetNote {
                    pitch: previous,
                    duration: current_time - start,
                });
            }
            current = Some((pitch, current_time));
        }
    }

    notes
}

/// Assigns each note the 1-based bucket `i + 1` whose range
/// `(i * interval, (i + 1) * interval]` holds its duration.
///
/// Notes outside every bucket, including zero-length ones, are dropped.
pub fn bucket_durations(notes: &[OnsetNote], interval: u64, num_buckets: usize) -> Vec<(u8, usize)> {
    if interval == 0 {
        return Vec::new();
    }

    notes
        .iter()
        .filter(|n| n.duration > 0)
        .filter_map(|n| {
            let bucket = n.duration.div_ceil(interval) as usize;
            (bucket <= num_buckets).then_some((n.pitch, bucket))
        })
        .collect()
}

/// Count of notes per bucket, index 0 holding bucket 1
pub fn bucket_histogram(buckets: &[(u8, usize)], num_buckets: usize) -> Vec<usize> {
    let mut counts = vec![0; num_buckets];
    for &(_, bucket) in buckets {
        if let Some(count) = bucket.checked_sub(1).and_then(|i| counts.get_mut(i)) {
            *count += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inter_onset_durations() {
        let notes = inter_onset_notes(&[
            Message::note_on(60, 100, 0),
            Message::note_off(60, 50),
            Message::note_on(62, 100, 10),
            Message::note_on(62, 0, 30),
            Message::note_on(64, 100, 0),
            Message::note_off(64, 100),
        ]);
        assert_eq!(
            notes,
            vec![
                OnsetNote {
                    pitch: 60,
                    duration: 60
                },
                OnsetNote {
                    pitch: 62,
                    duration: 30
                },
            ]
        );
    }

    #[test]
    fn test_single_note_has_no_duration() {
        assert!(inter_onset_notes(&[Message::note_on(60, 100, 0)]).is_empty());
    }

    #[test]
    fn test_bucket_boundaries_are_upper_inclusive() {
        let notes = [30, 31, 60, 240, 241, 0]
            .iter()
            .map(|&duration| OnsetNote {
                pitch: 60,
                duration,
            })
            .collect::<Vec<_>>();
        let buckets = bucket_durations(&notes, 30, 8);
        assert_eq!(buckets, vec![(60, 1), (60, 2), (60, 2), (60, 8)]);
        assert_eq!(bucket_histogram(&buckets, 8), vec![1, 2, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_zero_interval() {
        let notes = [OnsetNote {
            pitch: 60,
            duration: 10,
        }];
        assert!(bucket_durations(&notes, 0, 8).is_empty());
    }
}
