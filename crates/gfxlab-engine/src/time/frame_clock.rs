use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

/// Timing of one presented frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous frame, clamped.
    pub dt: f32,
    pub now: Instant,
    /// 0 for the first frame.
    pub frame_index: u64,
}

/// Per-window frame timer.
///
/// A debugger pause or a minimized window would otherwise produce one huge
/// step, so `dt` is held between 0.1 ms and 250 ms.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frames: u64,
    bounds: RangeInclusive<Duration>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            last: Instant::now(),
            frames: 0,
            bounds: Duration::from_micros(100)..=Duration::from_millis(250),
        }
    }
}

impl FrameClock {
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let since = now.saturating_duration_since(std::mem::replace(&mut self.last, now));
        let dt = since.clamp(*self.bounds.start(), *self.bounds.end());
        let frame_index = self.frames;
        self.frames += 1;
        FrameTime { dt: dt.as_secs_f32(), now, frame_index }
    }
}
