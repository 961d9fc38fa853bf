/// Fixed timestep accumulator.
///
/// Converts variable frame deltas into a whole number of fixed steps so
/// tween math advances at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    /// Fixed delta per step.
    dt: f32,
    /// Frame time not yet consumed by a full step.
    accumulator: f32,
    /// Catch-up cap: at most this many steps per frame.
    max_steps: u32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: 8,
        }
    }

    /// Override the catch-up cap (default 8 steps per frame).
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Feed one frame's delta. Returns how many fixed steps to run.
    /// Excess time beyond the catch-up cap is discarded.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt;
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Interpolation alpha between steps, in [0, 1].
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// The fixed delta per step.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}
