use std::time::{Duration, Instant};

/// Average frame rate over one reporting window.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameRate {
    /// Frames presented during the window.
    pub frames: u32,

    /// Wall time covered by the window.
    pub elapsed: Duration,
}

impl FrameRate {
    pub fn per_second(self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs <= 0.0 {
            return 0.0;
        }
        f64::from(self.frames) / secs
    }
}

/// Counts presented frames and reports the average rate once per interval.
#[derive(Debug, Clone)]
pub struct FrameClock {
    window_start: Instant,
    frames_in_window: u32,
    frame_index: u64,
    report_interval: Duration,
}

impl FrameClock {
    /// Creates a clock that reports once per second.
    pub fn new() -> Self {
        Self::with_report_interval(Duration::from_secs(1))
    }

    pub fn with_report_interval(report_interval: Duration) -> Self {
        Self::starting_at(Instant::now(), report_interval)
    }

    fn starting_at(now: Instant, report_interval: Duration) -> Self {
        Self {
            window_start: now,
            frames_in_window: 0,
            frame_index: 0,
            report_interval,
        }
    }

    /// Number of frames recorded so far.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Records one presented frame.
    ///
    /// Returns the rate for the elapsed window once `report_interval` has
    /// passed, then starts a new window.
    pub fn tick(&mut self) -> Option<FrameRate> {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> Option<FrameRate> {
        self.frame_index = self.frame_index.wrapping_add(1);
        self.frames_in_window = self.frames_in_window.saturating_add(1);

        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < self.report_interval {
            return None;
        }

        let rate = FrameRate {
            frames: self.frames_in_window,
            elapsed,
        };
        self.window_start = now;
        self.frames_in_window = 0;
        Some(rate)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
