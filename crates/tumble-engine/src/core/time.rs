use crate::api::error::ConfigError;

/// Fixed timestep accumulator.
/// Turns variable frame deltas into a count of fixed-size simulation steps.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    /// The fixed delta time per step.
    step: f32,
    /// Largest frame delta ingested per call.
    max_delta: f32,
    /// Simulated time not yet consumed by a full step. Always in `[0, step)`.
    accumulator: f32,
}

impl SimulationClock {
    /// `step` must be positive and finite, and `max_delta` must cover at
    /// least one step, otherwise `advance` could never drain the accumulator.
    pub fn new(step: f32, max_delta: f32) -> Result<Self, ConfigError> {
        if !(step > 0.0 && step.is_finite()) {
            return Err(ConfigError::InvalidStep(step));
        }
        if !(max_delta >= step && max_delta.is_finite()) {
            return Err(ConfigError::MaxDeltaBelowStep { max_delta, step });
        }
        Ok(Self {
            step,
            max_delta,
            accumulator: 0.0,
        })
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    ///
    /// The delta is clamped to `[0, max_delta]` so a stalled frame cannot
    /// trigger an unbounded catch-up burst.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let effective = if frame_dt.is_nan() || frame_dt < 0.0 {
            log::warn!("rejecting frame delta {frame_dt}, treating as 0");
            0.0
        } else {
            frame_dt.min(self.max_delta)
        };

        self.accumulator += effective;
        let mut steps = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            steps += 1;
        }
        steps
    }

    /// Interpolation alpha for rendering between steps (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }

    /// The fixed delta time.
    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }

    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Drop any unconsumed time.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
