use tumble_engine::*;

/// Two crates fall onto the ground; a static crate and a bunch of cherries
/// decorate the scene.
pub struct CrateDrop {
    crates: Vec<BodyHandle>,
}

impl CrateDrop {
    pub fn new() -> Self {
        Self { crates: Vec::new() }
    }

    pub fn crates(&self) -> &[BodyHandle] {
        &self.crates
    }
}

impl Default for CrateDrop {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for CrateDrop {
    fn init(&mut self, scene: &mut SceneLoop) -> Result<(), SceneError> {
        let first = scene.spawn_body("crate", Pose::new(10.0, 10.0, 0.0))?;
        let second = scene.spawn_body("crate", Pose::new(12.0, 15.0, 0.0))?;
        self.crates = vec![first, second];

        // Back to front.
        scene.draw_fixed("crate", Pose::IDENTITY)?;
        scene.draw_body("crate", first)?;
        scene.draw_body("crate", second)?;
        scene.draw_fixed("cherries", Pose::new(30.0, 0.0, 0.0))?;

        log::info!("dropped {} crates", self.crates.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tumble_web::GameRunner;

    const SPRITES: &str = include_str!("../assets/sprites.json");
    const PHYSICS: &str = include_str!("../assets/physics.json");

    fn booted() -> (CrateDrop, SceneLoop) {
        let mut game = CrateDrop::new();
        let mut scene = SceneLoop::from_json(game.config(), SPRITES, PHYSICS).unwrap();
        game.init(&mut scene).unwrap();
        (game, scene)
    }

    #[test]
    fn shipped_assets_load() {
        let (_, scene) = booted();
        let names: Vec<&str> = scene.sprites().names().collect();
        assert_eq!(names, vec!["crate", "cherries"]);
        assert!(scene.shapes().lookup("cherries").is_ok());
        assert_eq!(scene.scene().len(), 4);
    }

    #[test]
    fn first_frame_matches_the_layout() {
        let (_, mut scene) = booted();
        let mut buf = RenderBuffer::new();
        scene.on_viewport_resized(800.0, 600.0, &mut buf).unwrap();
        scene.on_frame(1.0 / 60.0, &mut buf);

        let at: Vec<(f32, f32)> = buf.instances.iter().map(|i| (i.x, i.y)).collect();
        assert_eq!(at, vec![(0.0, 0.0), (10.0, 10.0), (12.0, 15.0), (30.0, 0.0)]);
        assert!((buf.instances[0].width - 5.0).abs() < 1e-5);
    }

    #[test]
    fn crates_land_on_the_ground() {
        let (game, mut scene) = booted();
        let mut buf = RenderBuffer::new();
        scene.on_viewport_resized(800.0, 600.0, &mut buf).unwrap();
        for _ in 0..600 {
            scene.on_frame(1.0 / 60.0, &mut buf);
        }
        for body in game.crates() {
            let pos = scene.world().position(*body).unwrap();
            assert!(pos.y > -0.5, "crate fell through the ground: {:?}", pos);
            assert!(pos.y < 10.0, "crate never fell: {:?}", pos);
        }
    }

    #[test]
    fn runner_boots_from_shipped_assets() {
        let mut runner = GameRunner::new(CrateDrop::new());
        runner.init(SPRITES, PHYSICS).unwrap();
        runner.resize(1280.0, 720.0).unwrap();
        runner.tick(0.11);
        assert_eq!(runner.last_steps(), 6);
        assert_eq!(runner.instance_count(), 4);
        // Two crates and the ground.
        assert_eq!(runner.body_count(), 3);
    }
}
