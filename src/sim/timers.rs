//! Timed stick wobble decay
//!
//! A landing bends the live stick. Each `BendDecay` entry is keyed to a stick
//! index and advanced with the tick's elapsed time; it removes itself once the
//! bend is gone or the stick it targets is no longer the live one.

use super::state::Stick;

/// Wait before the first decay step (ms)
pub const BEND_DECAY_DELAY_MS: f32 = 100.0;
/// Interval between decay steps (ms)
pub const BEND_DECAY_INTERVAL_MS: f32 = 50.0;
/// Bend multiplier applied per step
pub const BEND_DECAY_FACTOR: f32 = 0.8;
/// Bends below this snap to zero
pub const BEND_FLOOR: f32 = 1.0;

pub const PERFECT_BEND: f32 = 15.0;
pub const NORMAL_BEND: f32 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BendDecay {
    /// Index into `World::sticks`
    pub stick: usize,
    /// Time until the next step (ms)
    until_next: f32,
}

impl BendDecay {
    pub fn new(stick: usize) -> Self {
        Self {
            stick,
            until_next: BEND_DECAY_DELAY_MS,
        }
    }

    /// Advance by `elapsed_ms`; returns false once the timer should be dropped
    pub fn advance(&mut self, sticks: &mut [Stick], elapsed_ms: f32) -> bool {
        let live = sticks.len().checked_sub(1);
        let Some(stick) = sticks.get_mut(self.stick) else {
            return false;
        };

        if live != Some(self.stick) {
            // A newer stick took over; settle this one immediately
            settle(stick);
            return false;
        }
        if stick.bend <= 0.0 {
            return false;
        }

        self.until_next -= elapsed_ms;
        while self.until_next <= 0.0 {
            stick.bend *= BEND_DECAY_FACTOR;
            if stick.bend < BEND_FLOOR {
                settle(stick);
                return false;
            }
            self.until_next += BEND_DECAY_INTERVAL_MS;
        }
        true
    }
}

fn settle(stick: &mut Stick) {
    stick.bend = 0.0;
    stick.bend_direction = 0.0;
}

/// Advance every bend timer, dropping finished ones
pub fn advance_bend_timers(timers: &mut Vec<BendDecay>, sticks: &mut [Stick], elapsed_ms: f32) {
    timers.retain_mut(|timer| timer.advance(sticks, elapsed_ms));
}
