pub mod fade;
pub mod fireworks;
pub mod pulse;

pub use fade::fade_in_opacity;
pub use fireworks::{Fireworks, Particle, ParticleKind};

use std::time::{Duration, Instant};

/// Target frame rate
pub const TARGET_FPS: u32 = 30;

/// Frame duration for target FPS
pub const FRAME_DURATION: Duration = Duration::from_millis(1000 / TARGET_FPS as u64);

/// Longest step fed to simulations after a stall (e.g. a suspended terminal)
pub const MAX_FRAME_DT: f32 = 0.1;

/// Frame pacing for the render loop
pub struct AnimationLoop {
    started: Instant,
    last_frame: Instant,
    frames: u64,
}

impl AnimationLoop {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_frame: now,
            frames: 0,
        }
    }

    /// Check if it's time for a new frame
    pub fn should_render(&self) -> bool {
        self.last_frame.elapsed() >= FRAME_DURATION
    }

    /// Get delta time since last frame, capped
    pub fn delta_time(&self) -> f32 {
        self.last_frame.elapsed().as_secs_f32().min(MAX_FRAME_DT)
    }

    /// Seconds since the loop started, for time-based curves
    pub fn clock(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }

    pub fn frame_rendered(&mut self) {
        self.last_frame = Instant::now();
        self.frames += 1;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Time until next frame
    pub fn time_until_next_frame(&self) -> Duration {
        FRAME_DURATION.saturating_sub(self.last_frame.elapsed())
    }
}

impl Default for AnimationLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_waits_one_interval() {
        let frames = AnimationLoop::new();
        assert!(frames.time_until_next_frame() <= FRAME_DURATION);
        assert_eq!(frames.frames(), 0);
    }

    #[test]
    fn test_delta_time_is_capped() {
        let mut frames = AnimationLoop::new();
        frames.last_frame = Instant::now() - Duration::from_secs(5);
        assert!(frames.should_render());
        assert_eq!(frames.delta_time(), MAX_FRAME_DT);
        assert_eq!(frames.time_until_next_frame(), Duration::ZERO);

        frames.frame_rendered();
        assert_eq!(frames.frames(), 1);
        assert!(!frames.should_render());
    }
}
