use bevy_ecs::prelude::Resource;

/// Default fixed simulation rate, in ticks per second.
pub const DEFAULT_PHYSICS_FPS: u32 = 60;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}

/// Fixed-step accumulator for hosts whose frame rate differs from the
/// simulation rate.
#[derive(Debug, Clone, Copy)]
pub struct FixedStep {
    pub step: f32,
    accumulator: f32,
    /// Upper bound on ticks per frame so a long stall does not spiral.
    pub max_ticks_per_frame: u32,
}

impl FixedStep {
    pub fn from_hz(hz: u32) -> Self {
        Self {
            step: 1.0 / hz.max(1) as f32,
            accumulator: 0.0,
            max_ticks_per_frame: 8,
        }
    }

    /// Add a frame's wall time and return how many fixed ticks to run.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_ticks_per_frame {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == self.max_ticks_per_frame {
            self.accumulator = self.accumulator.min(self.step);
        }
        ticks
    }
}
