// Copyright (c) 2026 glyphfall contributors

use std::time::{Duration, Instant};

/// Converts the repaint signal (fired at display cadence) into fixed-size
/// logical ticks. Elapsed time accumulates across repaints; once it crosses
/// the step threshold the caller runs one tick-and-render and the
/// accumulator starts over from zero.
#[derive(Debug)]
pub struct FrameScheduler {
    step: Duration,
    last: Option<Instant>,
    accumulated: Duration,
}

impl FrameScheduler {
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            last: None,
            accumulated: Duration::ZERO,
        }
    }

    /// Returns true when a logical step is due. The very first repaint has
    /// no previous timestamp; its delta counts as zero rather than letting
    /// an arbitrarily old epoch flood the accumulator.
    pub fn on_repaint(&mut self, now: Instant) -> bool {
        let delta = match self.last {
            Some(prev) => now.saturating_duration_since(prev),
            None => Duration::ZERO,
        };
        self.last = Some(now);
        self.accumulated += delta;

        if self.accumulated > self.step {
            self.accumulated = Duration::ZERO;
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    fn accumulated(&self) -> Duration {
        self.accumulated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_when_accumulated_time_crosses_threshold() {
        let mut sched = FrameScheduler::new(Duration::from_millis(100));
        let t0 = Instant::now();

        // Signals at t = 0, 30, 60, 90, 120 ms; only the last crosses 100.
        for ms in [0u64, 30, 60, 90] {
            assert!(!sched.on_repaint(t0 + Duration::from_millis(ms)));
        }
        assert!(sched.on_repaint(t0 + Duration::from_millis(120)));
        assert_eq!(sched.accumulated(), Duration::ZERO);
    }

    #[test]
    fn sub_threshold_sequences_never_fire() {
        let mut sched = FrameScheduler::new(Duration::from_millis(100));
        let t0 = Instant::now();
        assert!(!sched.on_repaint(t0));
        assert!(!sched.on_repaint(t0 + Duration::from_millis(50)));
        assert!(!sched.on_repaint(t0 + Duration::from_millis(100)));
        assert_eq!(sched.accumulated(), Duration::from_millis(100));
    }

    #[test]
    fn first_repaint_does_not_count_elapsed_process_time() {
        let mut sched = FrameScheduler::new(Duration::from_millis(100));
        // A timestamp far in the future of scheduler creation: still no tick,
        // because there is no previous frame to measure against.
        assert!(!sched.on_repaint(Instant::now() + Duration::from_secs(3600)));
        assert_eq!(sched.accumulated(), Duration::ZERO);
    }

    #[test]
    fn keeps_firing_on_subsequent_accumulations() {
        let mut sched = FrameScheduler::new(Duration::from_millis(100));
        let t0 = Instant::now();
        sched.on_repaint(t0);
        let mut fired = 0;
        for i in 1..=12 {
            if sched.on_repaint(t0 + Duration::from_millis(33 * i)) {
                fired += 1;
            }
        }
        // 12 frames at 33 ms = 396 ms of accumulated time, 100 ms steps.
        assert_eq!(fired, 3);
    }

    #[test]
    fn out_of_order_timestamp_is_tolerated() {
        let mut sched = FrameScheduler::new(Duration::from_millis(100));
        let t0 = Instant::now();
        sched.on_repaint(t0 + Duration::from_millis(50));
        // Earlier than the previous signal: delta saturates to zero.
        assert!(!sched.on_repaint(t0));
    }
}
