//! Simulation clock: step index and play/pause state.

use serde::{Deserialize, Serialize};

/// Outcome of advancing the clock by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Moved to the given step.
    Advanced(usize),
    /// Passed the last step and went back to 0.
    Wrapped,
}

/// Step counter for one collection cycle.
///
/// Every change that invalidates a running autoplay timer (play, pause,
/// reset, wrap-around during autoplay) bumps the epoch. A timer started
/// under an older epoch must not touch the clock.
#[derive(Debug, Clone)]
pub struct Clock {
    step: usize,
    phase_count: usize,
    playing: bool,
    epoch: u64,
}

impl Clock {
    /// Create a stopped clock at step 0.
    pub fn new(phase_count: usize) -> Self {
        Self {
            step: 0,
            phase_count: phase_count.max(1),
            playing: false,
            epoch: 0,
        }
    }

    /// Get the current step index.
    pub fn step_index(&self) -> usize {
        self.step
    }

    pub fn phase_count(&self) -> usize {
        self.phase_count
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Start autoplay.
    pub fn play(&mut self) {
        if !self.playing {
            self.playing = true;
            self.epoch += 1;
        }
    }

    /// Pause autoplay.
    pub fn pause(&mut self) {
        if self.playing {
            self.playing = false;
            self.epoch += 1;
        }
    }

    /// Play if paused, pause if playing.
    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Back to step 0, paused.
    pub fn reset(&mut self) {
        self.step = 0;
        self.playing = false;
        self.epoch += 1;
    }

    /// Autoplay tick: advance one step. Passing the last step wraps to 0
    /// and stops playback, so autoplay runs exactly one cycle.
    pub fn tick(&mut self) -> Tick {
        let tick = self.advance();
        if tick == Tick::Wrapped {
            self.pause();
        }
        tick
    }

    /// Manual step: advance one step with wrap-around, playback untouched.
    pub fn step(&mut self) -> Tick {
        self.advance()
    }

    fn advance(&mut self) -> Tick {
        let next = self.step + 1;
        if next >= self.phase_count {
            self.step = 0;
            Tick::Wrapped
        } else {
            self.step = next;
            Tick::Advanced(next)
        }
    }

    /// Progress through the cycle, `(step + 1) / phase_count`.
    pub fn progress(&self) -> f64 {
        (self.step + 1) as f64 / self.phase_count as f64
    }
}

/// Clock status for sending to the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockStatus {
    pub step: usize,
    pub phase_count: usize,
    pub playing: bool,
    pub progress: f64,
    pub epoch: u64,
}

impl From<&Clock> for ClockStatus {
    fn from(clock: &Clock) -> Self {
        Self {
            step: clock.step,
            phase_count: clock.phase_count,
            playing: clock.playing,
            progress: clock.progress(),
            epoch: clock.epoch,
        }
    }
}
