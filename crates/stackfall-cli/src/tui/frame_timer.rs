use std::{
    thread,
    time::{Duration, Instant},
};

/// Paces a frame loop at a fixed rate.
///
/// A frame that overruns its slot pushes the schedule back instead of
/// triggering a burst of catch-up frames.
#[derive(Debug)]
pub struct FrameTimer {
    interval: Duration,
    next_frame_at: Instant,
}

impl FrameTimer {
    /// Creates a timer running at `rate` frames per second.
    pub fn with_rate(rate: f64) -> Self {
        Self::with_interval(Duration::from_secs_f64(1.0 / rate))
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            next_frame_at: Instant::now() + interval,
        }
    }

    #[cfg(test)]
    fn interval(&self) -> Duration {
        self.interval
    }

    /// Blocks until the next frame is due.
    pub fn wait(&mut self) {
        let now = Instant::now();
        thread::sleep(self.time_until_next_frame(now));
        self.advance(now);
    }

    fn time_until_next_frame(&self, now: Instant) -> Duration {
        self.next_frame_at.saturating_duration_since(now)
    }

    fn advance(&mut self, now: Instant) {
        self.next_frame_at = (self.next_frame_at + self.interval).max(now + self.interval);
    }
}
