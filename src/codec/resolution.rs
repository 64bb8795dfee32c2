use crate::error::CodecError;
use log::warn;

/// Grid resolution: file ticks per beat and the caller's steps per beat.
///
/// `step_size` is the floor of `ticks_per_beat / subdivision`. When the
/// division is inexact the remainder is dropped and every grid time is a
/// multiple of the truncated step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    ticks_per_beat: u32,
    subdivision: u32,
}

impl Resolution {
    pub fn new(ticks_per_beat: u32, subdivision: u32) -> Result<Self, CodecError> {
        if subdivision == 0 {
            return Err(CodecError::InvalidResolution { subdivision });
        }
        if ticks_per_beat / subdivision == 0 {
            return Err(CodecError::DegenerateResolution {
                ticks_per_beat,
                subdivision,
            });
        }

        let resolution = Self {
            ticks_per_beat,
            subdivision,
        };
        if !resolution.is_exact() {
            warn!(
                "Subdivision {} does not divide {} ticks per beat; step size truncated to {} ticks",
                subdivision,
                ticks_per_beat,
                resolution.step_size()
            );
        }
        Ok(resolution)
    }

    pub fn ticks_per_beat(&self) -> u32 {
        self.ticks_per_beat
    }

    pub fn subdivision(&self) -> u32 {
        self.subdivision
    }

    pub fn step_size(&self) -> u64 {
        u64::from(self.ticks_per_beat / self.subdivision)
    }

    /// Ticks spanned by a grid of `steps` tokens
    pub fn grid_length(&self, steps: usize) -> u64 {
        steps as u64 * self.step_size()
    }

    /// Whether grid times land exactly on the file's beat boundaries
    pub fn is_exact(&self) -> bool {
        self.ticks_per_beat % self.subdivision == 0
    }
}
