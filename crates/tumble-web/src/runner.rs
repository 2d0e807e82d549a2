use tumble_engine::{Game, RenderBuffer, SceneError, SceneLoop};

/// Generic game runner that wires a [`Game`] to a scene loop and a
/// recording render buffer.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]` (see [`export_game!`](crate::export_game)),
/// because wasm-bindgen cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    scene: Option<SceneLoop>,
    render_buffer: RenderBuffer,
    last_steps: u32,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let render_buffer = RenderBuffer::with_capacity(game.config().max_instances);
        Self {
            game,
            scene: None,
            render_buffer,
            last_steps: 0,
        }
    }

    /// Load the catalogs and let the game populate the scene.
    /// On failure the runner stays uninitialized.
    pub fn init(&mut self, atlas_json: &str, shapes_json: &str) -> Result<(), SceneError> {
        let config = self.game.config();
        let mut scene = SceneLoop::from_json(config, atlas_json, shapes_json)?;
        self.game.init(&mut scene)?;
        self.scene = Some(scene);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.scene.is_some()
    }

    /// Run one host frame. Does nothing before `init`.
    pub fn tick(&mut self, dt: f32) -> u32 {
        let Some(scene) = self.scene.as_mut() else {
            return 0;
        };
        self.last_steps = scene.on_frame(dt, &mut self.render_buffer);
        self.last_steps
    }

    /// Forward a surface resize (in pixels).
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), SceneError> {
        match self.scene.as_mut() {
            Some(scene) => scene.on_viewport_resized(width, height, &mut self.render_buffer),
            None => Ok(()),
        }
    }

    /// Drop the scene and everything in it.
    pub fn dispose(&mut self) {
        self.scene = None;
        self.render_buffer.clear();
        self.last_steps = 0;
    }

    pub fn scene(&self) -> Option<&SceneLoop> {
        self.scene.as_ref()
    }

    pub fn render_buffer(&self) -> &RenderBuffer {
        &self.render_buffer
    }

    // ---- Pointer accessors for host memory reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn debug_vertices_ptr(&self) -> *const f32 {
        self.render_buffer.debug_vertices_ptr()
    }

    pub fn debug_vertex_count(&self) -> u32 {
        self.render_buffer.debug_vertex_count()
    }

    pub fn projection_ptr(&self) -> *const f32 {
        self.render_buffer.projection_ptr()
    }

    // ---- Scalar accessors ----

    pub fn world_width(&self) -> f32 {
        self.scene.as_ref().map_or(0.0, |s| s.camera().width)
    }

    pub fn world_height(&self) -> f32 {
        self.scene.as_ref().map_or(0.0, |s| s.camera().height)
    }

    pub fn last_steps(&self) -> u32 {
        self.last_steps
    }

    pub fn body_count(&self) -> u32 {
        self.scene.as_ref().map_or(0, |s| s.world().body_count() as u32)
    }
}
