pub mod api;
pub mod assets;
pub mod core;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::SceneConfig;
pub use api::error::{CatalogError, ConfigError, GeometryError, SceneError};
pub use api::game::Game;
pub use api::types::{Pose, SpriteId};
pub use assets::manifest::{AtlasManifest, ShapeManifest};
pub use assets::registry::{AtlasId, Region, SpriteAsset, SpriteCatalog};
pub use assets::shapes::{ShapeCatalog, ShapeTemplate};
pub use crate::core::factory::BodyFactory;
pub use crate::core::ground::GroundRegenerator;
pub use crate::core::physics::{
    BodyDesc, BodyHandle, BodyKind, BodyState, ColliderMaterial, FixtureGeometry,
    FixtureTemplate, PhysicsWorld,
};
pub use crate::core::scene::{Anchor, Scene, SceneEntity};
pub use crate::core::scene_loop::SceneLoop;
pub use crate::core::time::SimulationClock;
pub use renderer::camera::{Camera2D, CameraUniform};
pub use renderer::instance::{DebugVertex, RenderBuffer, RenderInstance};
pub use renderer::traits::SpriteRenderer;
pub use systems::debug::{debug_outlines, DebugColor, DebugLine};
