use crate::api::config::SceneConfig;
use crate::api::error::SceneError;
use crate::core::scene_loop::SceneLoop;

/// The contract a game fulfills to be driven by a host runner.
///
/// The host owns the frame loop; the game only describes its configuration
/// and populates the scene once the catalogs are loaded.
pub trait Game {
    /// Return scene configuration. Called once before init.
    fn config(&self) -> SceneConfig {
        SceneConfig::default()
    }

    /// Spawn bodies and register the sprites to draw, in draw order.
    fn init(&mut self, scene: &mut SceneLoop) -> Result<(), SceneError>;
}
