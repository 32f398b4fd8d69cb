/// Frame pacing and wall-clock timers.

use std::time::{Duration, Instant};

/// Caps the loop at a fixed rate by sleeping out the rest of each frame.
pub struct FrameLimiter {
    frame: Duration,
    last: Instant,
    frames: u64,
}

impl FrameLimiter {
    pub fn new(fps: u32) -> FrameLimiter {
        FrameLimiter {
            frame: Duration::from_secs(1) / fps.max(1),
            last: Instant::now(),
            frames: 0,
        }
    }

    /// Sleep until the current frame has used its slot, then start the
    /// next one.  Returns the wall-clock time since the previous tick.
    pub fn tick(&mut self) -> Duration {
        let elapsed = self.last.elapsed();
        if elapsed < self.frame {
            std::thread::sleep(self.frame - elapsed);
        }
        let now = Instant::now();
        let dt = now - self.last;
        self.last = now;
        self.frames += 1;
        dt
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// A periodic event driven by elapsed time rather than by a thread.
#[derive(Clone, Copy, Debug)]
pub struct PeriodicTimer {
    period: Duration,
    pending: Duration,
}

impl PeriodicTimer {
    pub fn new(period: Duration) -> PeriodicTimer {
        PeriodicTimer {
            period,
            pending: Duration::ZERO,
        }
    }

    /// Add `dt` and return how many periods completed.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.period.is_zero() {
            return 0;
        }
        self.pending += dt;
        let mut fired = 0;
        while self.pending >= self.period {
            self.pending -= self.period;
            fired += 1;
        }
        fired
    }
}
