use std::time::{Duration, Instant};

/// Frames-per-second meter averaged over a fixed sampling window.
///
/// The reported value only changes when a window closes, so on-screen
/// readouts do not flicker every frame.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window: Duration,
    window_start: Option<Instant>,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::with_window(Duration::from_millis(500))
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            window: window.max(Duration::from_millis(1)),
            window_start: None,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Records one presented frame at `now`.
    pub fn record(&mut self, now: Instant) {
        let Some(start) = self.window_start else {
            self.window_start = Some(now);
            return;
        };
        self.frames += 1;

        let elapsed = now.saturating_duration_since(start);
        if elapsed >= self.window {
            self.fps = self.frames as f32 / elapsed.as_secs_f32();
            self.frames = 0;
            self.window_start = Some(now);
        }
    }

    /// Last completed measurement; `0.0` until the first window closes.
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_zero_before_first_window() {
        let mut fps = FpsCounter::new();
        let t0 = Instant::now();
        fps.record(t0);
        fps.record(t0 + Duration::from_millis(100));
        assert_eq!(fps.fps(), 0.0);
    }

    #[test]
    fn sixty_frames_per_second() {
        let mut fps = FpsCounter::with_window(Duration::from_secs(1));
        let t0 = Instant::now();
        // The first record only opens the window.
        fps.record(t0);
        for i in 1..=60u64 {
            fps.record(t0 + Duration::from_micros(i * 1_000_000 / 60));
        }
        assert!((fps.fps() - 60.0).abs() < 0.01, "fps = {}", fps.fps());
    }

    #[test]
    fn window_restarts_after_measurement() {
        let mut fps = FpsCounter::with_window(Duration::from_millis(500));
        let t0 = Instant::now();
        fps.record(t0);
        fps.record(t0 + Duration::from_millis(500));
        let first = fps.fps();
        fps.record(t0 + Duration::from_millis(600));
        assert_eq!(fps.fps(), first);
    }
}
