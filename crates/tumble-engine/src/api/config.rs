use glam::Vec2;
use serde::Deserialize;

use crate::api::error::ConfigError;

/// Static configuration for a scene loop, provided by the game.
///
/// Every field has a default, so hosts can pass partial JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Fixed simulation step in seconds (default: 1/60).
    pub step: f32,
    /// Largest frame delta the clock ingests per frame (default: 0.25).
    pub max_frame_delta: f32,
    /// Solver velocity iterations per step (default: 6).
    pub velocity_iterations: u32,
    /// Solver position iterations per step (default: 2).
    pub position_iterations: u32,
    /// Gravity in world units per second squared. Y-up.
    pub gravity: Vec2,
    /// Whether resting bodies may sleep.
    pub allow_sleep: bool,
    /// Asset pixels to world units. Shared by sprites and shapes so both stay the same size.
    pub scale: Vec2,
    /// Minimum visible world width; the camera extends the other axis.
    pub min_viewport_width: f32,
    /// Minimum visible world height.
    pub min_viewport_height: f32,
    /// Friction of the regenerated ground.
    pub ground_friction: f32,
    /// Half thickness of the ground box in world units.
    pub ground_half_thickness: f32,
    /// Draw collider outlines after each frame.
    pub debug_overlay: bool,
    /// Initial capacity of the sprite instance buffer.
    pub max_instances: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            step: 1.0 / 60.0,
            max_frame_delta: 0.25,
            velocity_iterations: 6,
            position_iterations: 2,
            gravity: Vec2::new(0.0, -10.0),
            allow_sleep: true,
            scale: Vec2::splat(0.05),
            min_viewport_width: 50.0,
            min_viewport_height: 50.0,
            ground_friction: 1.0,
            ground_half_thickness: 0.01,
            debug_overlay: false,
            max_instances: 512,
        }
    }
}

impl SceneConfig {
    /// Parse a config from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.step > 0.0 && self.step.is_finite()) {
            return Err(ConfigError::InvalidStep(self.step));
        }
        if !(self.max_frame_delta >= self.step) || !self.max_frame_delta.is_finite() {
            return Err(ConfigError::MaxDeltaBelowStep {
                max_delta: self.max_frame_delta,
                step: self.step,
            });
        }
        if self.velocity_iterations == 0 || self.position_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::InvalidGravity(self.gravity.x, self.gravity.y));
        }
        if !(self.scale.x > 0.0 && self.scale.y > 0.0) || !self.scale.is_finite() {
            return Err(ConfigError::InvalidScale(self.scale.x, self.scale.y));
        }
        let viewport = Vec2::new(self.min_viewport_width, self.min_viewport_height);
        if !(viewport.x > 0.0 && viewport.y > 0.0) || !viewport.is_finite() {
            return Err(ConfigError::InvalidViewport(
                self.min_viewport_width,
                self.min_viewport_height,
            ));
        }
        if !(self.ground_friction > 0.0 && self.ground_friction.is_finite()) {
            return Err(ConfigError::InvalidGroundFriction(self.ground_friction));
        }
        if !(self.ground_half_thickness > 0.0 && self.ground_half_thickness.is_finite()) {
            return Err(ConfigError::InvalidGroundThickness(self.ground_half_thickness));
        }
        Ok(())
    }

    /// Upper bound on fixed steps a single frame can trigger.
    pub fn max_steps_per_frame(&self) -> u32 {
        (self.max_frame_delta / self.step).ceil() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SceneConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.velocity_iterations, 6);
        assert_eq!(config.position_iterations, 2);
        assert_eq!(config.max_steps_per_frame(), 15);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SceneConfig::from_json(r#"{ "debug_overlay": true, "gravity": [0.0, -9.8] }"#)
            .unwrap();
        assert!(config.debug_overlay);
        assert_eq!(config.gravity, Vec2::new(0.0, -9.8));
        assert_eq!(config.step, 1.0 / 60.0);
    }

    #[test]
    fn rejects_max_delta_below_step() {
        let config = SceneConfig {
            max_frame_delta: 0.001,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MaxDeltaBelowStep { .. })
        ));
    }

    #[test]
    fn rejects_zero_iterations_and_bad_scale() {
        let config = SceneConfig {
            position_iterations: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroIterations)));

        let config = SceneConfig {
            scale: Vec2::new(0.05, 0.0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidScale(..))));
    }

    #[test]
    fn rejects_non_finite_values() {
        for gravity in [
            Vec2::new(0.0, f32::NAN),
            Vec2::new(f32::INFINITY, -10.0),
            Vec2::new(0.0, f32::NEG_INFINITY),
        ] {
            let config = SceneConfig {
                gravity,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::InvalidGravity(..))));
        }

        let config = SceneConfig {
            min_viewport_width: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidViewport(..))));
        let config = SceneConfig {
            min_viewport_height: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidViewport(..))));

        let config = SceneConfig {
            ground_friction: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidGroundFriction(_))
        ));
        let config = SceneConfig {
            ground_half_thickness: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidGroundThickness(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            SceneConfig::from_json("{ step: }"),
            Err(ConfigError::Parse(_))
        ));
    }
}
