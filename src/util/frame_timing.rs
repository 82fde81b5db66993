use web_time::{Duration, Instant};

/// Per-frame clock: delta time for animation plus a smoothed frame rate.
pub struct FrameTiming {
    last_frame: Instant,
    started: Instant,
    frames: u64,
    /// Smoothed FPS (exponential moving average).
    smoothed_fps: f32,
    /// Weight of the newest sample, 0.0-1.0.
    smoothing: f32,
    /// Upper bound on a single delta, so a stall doesn't jump animations.
    max_delta: Duration,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTiming {
    /// Start the clock now.
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            started: now,
            frames: 0,
            smoothed_fps: 60.0,
            smoothing: 0.05,
            max_delta: Duration::from_millis(250),
        }
    }

    /// Mark the end of a frame and return the seconds since the previous
    /// one, capped at 0.25 s.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.record(elapsed)
    }

    fn record(&mut self, elapsed: Duration) -> f32 {
        self.frames += 1;
        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        elapsed.min(self.max_delta).as_secs_f32()
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Frames ticked so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Mean frame time in milliseconds since the clock started.
    #[must_use]
    pub fn average_frame_ms(&self) -> f32 {
        if self.frames == 0 {
            return 0.0;
        }
        self.started.elapsed().as_secs_f32() * 1000.0 / self.frames as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_is_capped() {
        let mut timing = FrameTiming::new();
        let dt = timing.record(Duration::from_secs(3));
        assert!((dt - 0.25).abs() < 1e-6);
        assert_eq!(timing.frames(), 1);
    }

    #[test]
    fn fps_moves_toward_frame_rate() {
        let mut timing = FrameTiming::new();
        for _ in 0..200 {
            let _ = timing.record(Duration::from_millis(10));
        }
        assert!((timing.fps() - 100.0).abs() < 1.0);
    }
}
