use crate::api::types::{Pose, SpriteId};
use crate::core::physics::BodyHandle;

/// Where a sprite gets its pose from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    /// Follows a physics body; the pose is read fresh every frame.
    Body(BodyHandle),
    /// Stays where it was placed.
    Fixed(Pose),
}

/// One entry of the draw list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneEntity {
    pub sprite: SpriteId,
    pub anchor: Anchor,
}

impl SceneEntity {
    pub fn on_body(sprite: SpriteId, body: BodyHandle) -> Self {
        Self {
            sprite,
            anchor: Anchor::Body(body),
        }
    }

    pub fn fixed(sprite: SpriteId, pose: Pose) -> Self {
        Self {
            sprite,
            anchor: Anchor::Fixed(pose),
        }
    }

    pub fn body(&self) -> Option<BodyHandle> {
        match self.anchor {
            Anchor::Body(body) => Some(body),
            Anchor::Fixed(_) => None,
        }
    }
}

/// Ordered draw list using a flat Vec.
/// Entities are drawn in insertion order, so later entries paint over earlier ones.
pub struct Scene {
    entities: Vec<SceneEntity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(64),
        }
    }

    /// Append an entity to the end of the draw order.
    pub fn push(&mut self, entity: SceneEntity) {
        self.entities.push(entity);
    }

    /// Remove every entity anchored to `body`, keeping the order of the rest.
    /// Returns how many were removed.
    pub fn remove_body(&mut self, body: BodyHandle) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| e.body() != Some(body));
        before - self.entities.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneEntity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
