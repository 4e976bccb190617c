//! Frame clocks

use std::time::{Duration, Instant};

use crate::consts::MAX_FRAME_DT;

/// Supplies the elapsed time since the previous tick
pub trait Clock {
    /// Seconds since the last call; monotonic and never negative
    fn elapsed_secs(&mut self) -> f32;

    /// Block until the next frame is due (no-op for simulated clocks)
    fn wait_for_next_frame(&mut self) {}
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn elapsed_secs(&mut self) -> f32 {
        (**self).elapsed_secs()
    }

    fn wait_for_next_frame(&mut self) {
        (**self).wait_for_next_frame()
    }
}

/// Simulated clock: every frame lasts exactly `step` seconds
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    step: f32,
}

impl FixedClock {
    pub fn new(step: f32) -> Self {
        Self { step: step.max(0.0) }
    }

    pub fn from_fps(fps: u32) -> Self {
        Self::new(1.0 / fps.max(1) as f32)
    }
}

impl Clock for FixedClock {
    fn elapsed_secs(&mut self) -> f32 {
        self.step
    }
}

/// Wall clock paced to a target frame rate
#[derive(Debug, Clone)]
pub struct SystemClock {
    last: Instant,
    frame: Duration,
}

impl SystemClock {
    pub fn new(fps: u32) -> Self {
        Self {
            last: Instant::now(),
            frame: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
        }
    }
}

impl Clock for SystemClock {
    fn elapsed_secs(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        // A stall must not teleport the player through walls
        dt.min(MAX_FRAME_DT)
    }

    fn wait_for_next_frame(&mut self) {
        let since = self.last.elapsed();
        if since < self.frame {
            std::thread::sleep(self.frame - since);
        }
    }
}
