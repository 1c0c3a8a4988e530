//! Retry backoff for misrouted pushes

use rand::Rng;
use std::time::Duration;

/// Counter deciding how long to wait before the next push attempt.
///
/// The step is not a duration: step `n` waits `2^(n + jitter) * base`,
/// with jitter uniform in `[0, 1)`. Step 0 does not wait.
#[derive(Debug, Clone)]
pub struct Backoff {
    step: u32,
    max_steps: u32,
    base: Duration,
}

impl Backoff {
    pub fn new(max_steps: u32, base: Duration) -> Self {
        Self {
            step: 0,
            max_steps,
            base,
        }
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn increase(&mut self) {
        self.step += 1;
    }

    pub fn reset(&mut self) {
        self.step = 0;
    }

    /// Delay before the next attempt, or `None` once the steps are used up.
    /// Giving up resets the counter.
    pub fn next_delay(&mut self) -> Option<Duration> {
        if self.step == 0 {
            return Some(Duration::ZERO);
        }
        if self.step >= self.max_steps {
            self.step = 0;
            return None;
        }
        let jitter: f64 = rand::thread_rng().gen_range(0.0..1.0);
        Some(delay_for(self.step, jitter, self.base))
    }
}

/// `2^(step + jitter) * base`
pub fn delay_for(step: u32, jitter: f64, base: Duration) -> Duration {
    base.mul_f64(2f64.powf(step as f64 + jitter))
}
