use crate::api::config::SceneConfig;
use crate::api::error::SceneError;
use crate::api::types::Pose;
use crate::assets::registry::SpriteCatalog;
use crate::assets::shapes::ShapeCatalog;
use crate::core::factory::BodyFactory;
use crate::core::ground::GroundRegenerator;
use crate::core::physics::{BodyHandle, PhysicsWorld};
use crate::core::scene::{Anchor, Scene, SceneEntity};
use crate::core::time::SimulationClock;
use crate::renderer::camera::Camera2D;
use crate::renderer::traits::SpriteRenderer;
use crate::systems::debug::debug_outlines;

/// Drives one physics world and its draw list, one host frame at a time.
///
/// Each [`on_frame`](Self::on_frame) draws the current poses, then advances
/// the clock and steps the world a bounded number of fixed steps, then
/// optionally overlays collider outlines. What is drawn in a frame is the
/// state left by the previous frame's steps.
pub struct SceneLoop {
    config: SceneConfig,
    world: PhysicsWorld,
    clock: SimulationClock,
    shapes: ShapeCatalog,
    sprites: SpriteCatalog,
    scene: Scene,
    ground: GroundRegenerator,
    camera: Camera2D,
    total_steps: u64,
}

impl SceneLoop {
    pub fn new(
        config: SceneConfig,
        shapes: ShapeCatalog,
        sprites: SpriteCatalog,
    ) -> Result<Self, SceneError> {
        config.validate()?;
        let clock = SimulationClock::new(config.step, config.max_frame_delta)?;

        let mut camera = Camera2D::new(config.min_viewport_width, config.min_viewport_height);
        camera.center_on_view();

        log::info!(
            "scene loop ready: {} shape(s), {} sprite(s), step {}s",
            shapes.len(),
            sprites.len(),
            config.step
        );

        Ok(Self {
            world: PhysicsWorld::with_sleeping(config.gravity, config.allow_sleep),
            clock,
            ground: GroundRegenerator::new(config.ground_friction, config.ground_half_thickness),
            scene: Scene::new(),
            camera,
            shapes,
            sprites,
            config,
            total_steps: 0,
        })
    }

    /// Load both catalogs from their JSON documents and build a loop.
    /// Sprite sizes use the same scale as the shapes.
    pub fn from_json(
        config: SceneConfig,
        atlas_json: &str,
        shapes_json: &str,
    ) -> Result<Self, SceneError> {
        config.validate()?;
        let sprites = SpriteCatalog::from_json(atlas_json, config.scale)?;
        let shapes = ShapeCatalog::from_json(shapes_json)?;
        Self::new(config, shapes, sprites)
    }

    // -- Scene building ------------------------------------------------------

    /// Create the body named `shape` at `pose`, scaled into world units.
    pub fn spawn_body(&mut self, shape: &str, pose: Pose) -> Result<BodyHandle, SceneError> {
        BodyFactory::new(&self.shapes).create_body(
            shape,
            &mut self.world,
            self.config.scale.x,
            self.config.scale.y,
            pose,
        )
    }

    /// Destroy a body and drop the sprites drawn on it.
    pub fn destroy_body(&mut self, body: BodyHandle) -> bool {
        let removed = self.scene.remove_body(body);
        let destroyed = self.world.destroy_body(Some(body));
        if destroyed {
            log::debug!("destroyed body, {} sprite(s) detached", removed);
        }
        destroyed
    }

    /// Draw `sprite` at the body's current pose every frame.
    pub fn draw_body(&mut self, sprite: &str, body: BodyHandle) -> Result<(), SceneError> {
        let id = self.sprites.resolve(sprite)?;
        self.scene.push(SceneEntity::on_body(id, body));
        Ok(())
    }

    /// Draw `sprite` at a fixed pose every frame.
    pub fn draw_fixed(&mut self, sprite: &str, pose: Pose) -> Result<(), SceneError> {
        let id = self.sprites.resolve(sprite)?;
        self.scene.push(SceneEntity::fixed(id, pose));
        Ok(())
    }

    // -- Frame ----------------------------------------------------------------

    /// Run one host frame. Returns the number of physics steps taken.
    pub fn on_frame<R: SpriteRenderer + ?Sized>(&mut self, frame_delta: f32, renderer: &mut R) -> u32 {
        renderer.begin_batch();
        for entity in self.scene.iter() {
            let Some(sprite) = self.sprites.get(entity.sprite) else {
                continue;
            };
            let pose = match entity.anchor {
                Anchor::Fixed(pose) => pose,
                Anchor::Body(body) => match self.world.pose(body) {
                    Some(pose) => pose,
                    None => {
                        log::debug!("skipping `{}`: body no longer exists", sprite.name);
                        continue;
                    }
                },
            };
            renderer.draw_sprite(sprite, pose.position.x, pose.position.y, pose.degrees());
        }
        renderer.end_batch();

        let steps = self.clock.advance(frame_delta);
        for _ in 0..steps {
            self.world.step(
                self.clock.step(),
                self.config.velocity_iterations,
                self.config.position_iterations,
            );
        }
        self.total_steps += u64::from(steps);

        if self.config.debug_overlay {
            let lines = debug_outlines(&self.world);
            renderer.draw_debug(&lines, self.camera.projection_matrix());
        }
        steps
    }

    /// React to a new host surface size (in pixels).
    ///
    /// The camera keeps at least the configured minimum world size visible
    /// with the world origin at the lower-left corner, and the ground is
    /// rebuilt to span the new visible width.
    pub fn on_viewport_resized<R: SpriteRenderer + ?Sized>(
        &mut self,
        surface_width: f32,
        surface_height: f32,
        renderer: &mut R,
    ) -> Result<(), SceneError> {
        // The camera is only committed once the ground accepts its size, so
        // a failed resize leaves camera, ground and projection in agreement.
        let mut camera = self.camera.clone();
        let resized = camera.resize(
            surface_width,
            surface_height,
            self.config.min_viewport_width,
            self.config.min_viewport_height,
        );
        if !resized {
            log::warn!(
                "ignoring empty surface {}x{}, keeping {}x{} world units",
                surface_width,
                surface_height,
                camera.width,
                camera.height
            );
        }
        camera.center_on_view();

        self.ground
            .on_viewport_resized(&mut self.world, camera.width, camera.height)?;
        self.camera = camera;
        renderer.set_projection(self.camera.projection_matrix());
        Ok(())
    }

    // -- Accessors ------------------------------------------------------------

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn set_debug_overlay(&mut self, enabled: bool) {
        self.config.debug_overlay = enabled;
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn sprites(&self) -> &SpriteCatalog {
        &self.sprites
    }

    pub fn shapes(&self) -> &ShapeCatalog {
        &self.shapes
    }

    /// The current ground body, once the first resize has happened.
    pub fn ground(&self) -> Option<BodyHandle> {
        self.ground.ground()
    }

    /// Physics steps taken since the loop was created.
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::{CatalogError, ConfigError, GeometryError};
    use crate::renderer::instance::RenderBuffer;
    use glam::Vec2;

    const ATLAS: &str = r#"{
        "atlases": [ { "name": "main", "path": "main.png", "width": 256, "height": 256 } ],
        "regions": [
            { "name": "crate", "atlas": 0, "x": 0, "y": 0, "width": 100, "height": 100 },
            { "name": "cherries", "atlas": 0, "x": 100, "y": 0, "width": 64, "height": 64 }
        ]
    }"#;

    const SHAPES: &str = r#"{ "bodies": [
        { "name": "crate", "fixtures": [
            { "polygon": [[0, 0], [100, 0], [100, 100], [0, 100]] }
        ] }
    ] }"#;

    fn scene_loop(config: SceneConfig) -> SceneLoop {
        SceneLoop::from_json(config, ATLAS, SHAPES).unwrap()
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SceneConfig {
            velocity_iterations: 0,
            ..Default::default()
        };
        let err = SceneLoop::from_json(config, ATLAS, SHAPES).err().unwrap();
        assert!(matches!(err, SceneError::Config(ConfigError::ZeroIterations)));
    }

    #[test]
    fn sprites_are_scaled_like_shapes() {
        let sl = scene_loop(SceneConfig::default());
        let sprite = sl.sprites().lookup("crate").unwrap();
        assert!((sprite.size - Vec2::splat(5.0)).length() < 1e-5);
    }

    #[test]
    fn frame_draws_before_stepping() {
        let mut sl = scene_loop(SceneConfig::default());
        let body = sl.spawn_body("crate", Pose::new(10.0, 10.0, 0.0)).unwrap();
        sl.draw_body("crate", body).unwrap();

        let mut buf = RenderBuffer::new();
        let steps = sl.on_frame(1.0 / 60.0, &mut buf);
        assert_eq!(steps, 1);
        assert_eq!(buf.instance_count(), 1);
        assert_eq!((buf.instances[0].x, buf.instances[0].y), (10.0, 10.0));
        assert!(sl.world().position(body).unwrap().y < 10.0);

        sl.on_frame(1.0 / 60.0, &mut buf);
        assert!(buf.instances[0].y < 10.0);
        assert_eq!(sl.total_steps(), 2);
    }

    #[test]
    fn unknown_names_are_errors() {
        let mut sl = scene_loop(SceneConfig::default());
        let err = sl.spawn_body("barrel", Pose::IDENTITY).unwrap_err();
        assert!(matches!(err, SceneError::Catalog(CatalogError::UnknownShape(_))));

        let err = sl.draw_fixed("plum", Pose::IDENTITY).unwrap_err();
        assert!(matches!(
            err,
            SceneError::Catalog(CatalogError::UnknownSprite(ref name)) if name == "plum"
        ));
        assert!(sl.scene().is_empty());
    }

    #[test]
    fn destroyed_body_stops_being_drawn() {
        let mut sl = scene_loop(SceneConfig::default());
        let body = sl.spawn_body("crate", Pose::new(10.0, 10.0, 0.0)).unwrap();
        sl.draw_body("crate", body).unwrap();
        sl.draw_fixed("cherries", Pose::new(30.0, 0.0, 0.0)).unwrap();

        // Removed behind the loop's back: the entity stays but is skipped.
        sl.world_mut().destroy_body(Some(body));
        let mut buf = RenderBuffer::new();
        sl.on_frame(0.0, &mut buf);
        assert_eq!(buf.instance_count(), 1);
        assert_eq!(buf.instances[0].x, 30.0);
        assert_eq!(sl.scene().len(), 2);
    }

    #[test]
    fn destroy_body_detaches_sprites() {
        let mut sl = scene_loop(SceneConfig::default());
        let body = sl.spawn_body("crate", Pose::new(10.0, 10.0, 0.0)).unwrap();
        sl.draw_body("crate", body).unwrap();
        assert!(sl.destroy_body(body));
        assert!(sl.scene().is_empty());
        assert!(!sl.destroy_body(body));
    }

    #[test]
    fn debug_overlay_only_when_enabled() {
        let mut sl = scene_loop(SceneConfig::default());
        sl.spawn_body("crate", Pose::new(10.0, 10.0, 0.0)).unwrap();
        let mut buf = RenderBuffer::new();

        sl.on_frame(1.0 / 60.0, &mut buf);
        assert_eq!(buf.debug_vertex_count(), 0);

        sl.set_debug_overlay(true);
        sl.on_frame(1.0 / 60.0, &mut buf);
        // One closed quad: four segments.
        assert_eq!(buf.debug_vertex_count(), 8);
    }

    #[test]
    fn resize_builds_ground_and_projection() {
        let mut sl = scene_loop(SceneConfig::default());
        let mut buf = RenderBuffer::new();
        assert!(sl.ground().is_none());

        sl.on_viewport_resized(800.0, 600.0, &mut buf).unwrap();
        let ground = sl.ground().unwrap();
        assert!(sl.world().contains(ground));
        assert!((sl.camera().height - 50.0).abs() < 1e-4);
        assert_eq!(buf.projection(), sl.camera().projection_matrix());
    }

    #[test]
    fn empty_surface_keeps_camera_and_still_regenerates() {
        let mut sl = scene_loop(SceneConfig::default());
        let mut buf = RenderBuffer::new();
        sl.on_viewport_resized(800.0, 600.0, &mut buf).unwrap();
        let width = sl.camera().width;
        let first = sl.ground().unwrap();

        sl.on_viewport_resized(0.0, 0.0, &mut buf).unwrap();
        assert_eq!(sl.camera().width, width);
        assert_ne!(sl.ground(), Some(first));
        assert_eq!(sl.world().body_count(), 1);
    }

    #[test]
    fn failed_resize_keeps_camera_ground_and_projection_together() {
        let mut sl = scene_loop(SceneConfig::default());
        let mut buf = RenderBuffer::new();
        sl.on_viewport_resized(800.0, 600.0, &mut buf).unwrap();
        let (width, height, center) = (sl.camera().width, sl.camera().height, sl.camera().center);
        let ground = sl.ground().unwrap();

        let err = sl
            .on_viewport_resized(f32::INFINITY, 600.0, &mut buf)
            .unwrap_err();
        assert!(matches!(
            err,
            SceneError::Geometry(GeometryError::InvalidBox(..))
        ));
        assert_eq!(sl.camera().width, width);
        assert_eq!(sl.camera().height, height);
        assert_eq!(sl.camera().center, center);
        assert_eq!(sl.ground(), Some(ground));
        assert_eq!(buf.projection(), sl.camera().projection_matrix());
    }

    #[test]
    fn negative_delta_never_steps() {
        let mut sl = scene_loop(SceneConfig::default());
        let body = sl.spawn_body("crate", Pose::new(10.0, 10.0, 0.0)).unwrap();
        let mut buf = RenderBuffer::new();
        for _ in 0..10 {
            assert_eq!(sl.on_frame(-1.0, &mut buf), 0);
        }
        assert_eq!(sl.world().position(body), Some(Vec2::new(10.0, 10.0)));
    }
}
