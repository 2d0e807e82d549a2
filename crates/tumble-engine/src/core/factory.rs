use glam::Vec2;

use crate::api::error::SceneError;
use crate::api::types::Pose;
use crate::assets::shapes::ShapeCatalog;
use crate::core::physics::{BodyDesc, BodyHandle, PhysicsWorld};

/// Builds bodies in a [`PhysicsWorld`] from named shape templates.
pub struct BodyFactory<'a> {
    shapes: &'a ShapeCatalog,
}

impl<'a> BodyFactory<'a> {
    pub fn new(shapes: &'a ShapeCatalog) -> Self {
        Self { shapes }
    }

    /// Create the body named `name`, scaled from asset units into world units,
    /// already placed at `pose`.
    pub fn create_body(
        &self,
        name: &str,
        world: &mut PhysicsWorld,
        scale_x: f32,
        scale_y: f32,
        pose: Pose,
    ) -> Result<BodyHandle, SceneError> {
        let template = self.shapes.lookup(name)?;
        let fixtures = template.scaled_fixtures(Vec2::new(scale_x, scale_y));
        let desc = BodyDesc::new(template.kind).with_pose(pose);

        let body = world
            .create_body(&desc, &fixtures)
            .map_err(|source| SceneError::Template {
                shape: name.to_string(),
                source,
            })?;
        log::debug!(
            "created `{}` at ({}, {}) with {} fixture(s)",
            name,
            pose.position.x,
            pose.position.y,
            fixtures.len()
        );
        Ok(body)
    }
}
