use glam::Vec2;

use crate::api::error::SceneError;
use crate::core::physics::{
    BodyDesc, BodyHandle, ColliderMaterial, FixtureGeometry, FixtureTemplate, PhysicsWorld,
};

/// Keeps a thin static ground body as wide as the visible world.
///
/// Fixtures cannot be reshaped once attached, so every resize destroys the
/// previous ground and builds a new one.
#[derive(Debug)]
pub struct GroundRegenerator {
    friction: f32,
    half_thickness: f32,
    ground: Option<BodyHandle>,
}

impl GroundRegenerator {
    pub fn new(friction: f32, half_thickness: f32) -> Self {
        Self {
            friction,
            half_thickness,
            ground: None,
        }
    }

    /// The current ground body, if one has been built.
    pub fn ground(&self) -> Option<BodyHandle> {
        self.ground
    }

    /// Rebuild the ground for a viewport of `width` x `height` world units.
    ///
    /// The new box spans `[-width, width]` at the origin. If it cannot be
    /// built, the previous ground stays in place and the error is returned.
    pub fn on_viewport_resized(
        &mut self,
        world: &mut PhysicsWorld,
        width: f32,
        height: f32,
    ) -> Result<BodyHandle, SceneError> {
        let fixture = FixtureTemplate::new(
            FixtureGeometry::Box {
                half_extents: Vec2::new(width, self.half_thickness),
            },
            ColliderMaterial {
                friction: self.friction,
                ..Default::default()
            },
        );
        fixture.geometry.validate()?;

        world.destroy_body(self.ground.take());
        let ground = world.create_body(&BodyDesc::fixed(), std::slice::from_ref(&fixture))?;
        self.ground = Some(ground);

        log::debug!("ground rebuilt for {}x{} viewport", width, height);
        Ok(ground)
    }
}
