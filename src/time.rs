//! Frame clock for the host scheduler.
//!
//! The particle field moves a fixed amount per frame, so this clock only
//! reports timing to whoever drives the host (status bars, frame dumps).

use std::time::Instant;

/// Weight of the newest frame in the smoothed fps estimate.
const FPS_SMOOTHING: f32 = 0.1;

/// Timing for the frame being dispatched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// 1-based frame number.
    pub index: u64,
    /// Seconds since the previous frame.
    pub delta: f32,
    /// Seconds since the first frame.
    pub elapsed: f32,
    pub fps: f32,
}

/// Counts frames and measures the time between them, either from the wall
/// clock or as a fixed step (for deterministic frame dumps).
#[derive(Debug, Default)]
pub struct Time {
    last: Option<Instant>,
    fixed_delta: Option<f32>,
    frame: u64,
    elapsed: f32,
    fps: f32,
}

impl Time {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step the clock by `delta` seconds per frame instead of wall time.
    /// `None` returns to wall time.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }

    /// Start a new frame.
    ///
    /// The first wall-clock frame has a zero delta.
    pub fn tick(&mut self) -> FrameInfo {
        let now = Instant::now();
        let delta = match (self.fixed_delta, self.last) {
            (Some(fixed), _) => fixed,
            (None, Some(last)) => now.duration_since(last).as_secs_f32(),
            (None, None) => 0.0,
        };
        self.last = Some(now);
        self.frame += 1;
        self.elapsed += delta;

        if delta > 0.0 {
            let instant_fps = 1.0 / delta;
            self.fps = if self.fps == 0.0 || self.fixed_delta.is_some() {
                instant_fps
            } else {
                self.fps + (instant_fps - self.fps) * FPS_SMOOTHING
            };
        }

        FrameInfo {
            index: self.frame,
            delta,
            elapsed: self.elapsed,
            fps: self.fps,
        }
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Smoothed frames per second; 0 until two frames have passed.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}
