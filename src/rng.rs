use std::time::{SystemTime, UNIX_EPOCH};

use crate::constants::{LCG_INCREMENT, LCG_MULTIPLIER};

/// Linear congruential generator driving every reward roll.
///
/// The sequence is fully determined by the seed, so a run can be replayed by
/// constructing a new generator with the same seed and repeating the draws.
#[derive(Clone, Debug)]
pub struct Lcg {
    state: u32,
    draws: u64,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self {
            state: seed,
            draws: 0,
        }
    }

    pub fn from_clock() -> Self {
        Self::new(clock_seed())
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = LCG_MULTIPLIER
            .wrapping_mul(self.state)
            .wrapping_add(LCG_INCREMENT);
        self.draws += 1;
        self.state
    }

    /// Advances the state and reduces it into `[0, bound)`.
    pub fn next_bounded(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0, "bound must be positive");
        self.next_u32() % bound
    }

    pub fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "cannot pick from an empty slice");
        self.next_bounded(len as u32) as usize
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn draws(&self) -> u64 {
        self.draws
    }
}

/// Seed derived from the wall clock as 100ns ticks since the Unix epoch,
/// truncated to 32 bits.
pub fn clock_seed() -> u32 {
    let ticks = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
        / 100;
    ticks as u32
}
