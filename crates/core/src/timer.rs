//! Countdown timer for one cycle
//!
//! The timer counts down from the round length. When it reaches zero the
//! session forces the current chain to resolve. Breaking a run costs a fixed
//! penalty off the remaining time.

/// Millisecond countdown driven by explicit ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownTimer {
    duration_ms: u32,
    remaining_ms: u32,
    running: bool,
}

impl CountdownTimer {
    /// Create a stopped timer with a full countdown of `duration_ms`.
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            remaining_ms: duration_ms,
            running: false,
        }
    }

    /// Refill and start the countdown
    pub fn restart(&mut self) {
        self.remaining_ms = self.duration_ms;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Resume counting from the current remaining time
    pub fn resume(&mut self) {
        self.running = true;
    }

    /// Advance by `elapsed_ms`
    ///
    /// Returns true when a running countdown is at zero after the tick, which
    /// includes a countdown already emptied by a penalty or a resume at zero.
    /// Expiry stops the timer until the next [`restart`](Self::restart).
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.running {
            return false;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        if self.remaining_ms == 0 {
            self.running = false;
            return true;
        }
        false
    }

    /// Take `penalty_ms` off the remaining time.
    pub fn penalize(&mut self, penalty_ms: u32) {
        self.remaining_ms = self.remaining_ms.saturating_sub(penalty_ms);
    }

    pub fn set_remaining_ms(&mut self, remaining_ms: u32) {
        self.remaining_ms = remaining_ms.min(self.duration_ms);
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }

    pub fn remaining_secs(&self) -> f64 {
        f64::from(self.remaining_ms) / 1000.0
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Remaining share of the countdown in `0.0..=1.0` (for a timer bar)
    pub fn fraction(&self) -> f64 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        f64::from(self.remaining_ms) / f64::from(self.duration_ms)
    }

    pub fn finished(&self) -> bool {
        self.remaining_ms == 0
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
