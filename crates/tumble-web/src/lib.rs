pub mod runner;

pub use runner::GameRunner;
pub use tumble_engine;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - The lifecycle exports (`game_init`, `game_tick`, `game_resize`, `game_dispose`)
///   and the buffer accessors the host renderer reads every frame
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::MyGame;
///
/// tumble_web::export_game!(MyGame, "my-game");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game struct type that implements `tumble_engine::Game`
///   and has a `new()` constructor
/// - `$game_name`: A string literal used in log messages
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
        }

        /// Load the atlas and shape catalogs, then build the game's scene.
        #[wasm_bindgen]
        pub fn game_init(atlas_json: &str, shapes_json: &str) -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let mut runner = $crate::GameRunner::new(<$game_type>::new());
            if let Err(err) = runner.init(atlas_json, shapes_json) {
                log::error!("{}: init failed: {}", $game_name, err);
                return Err(JsValue::from_str(&err.to_string()));
            }

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("{}: initialized", $game_name);
            Ok(())
        }

        /// Run one frame. Returns the number of physics steps taken.
        #[wasm_bindgen]
        pub fn game_tick(dt: f32) -> u32 {
            with_runner(|r| r.tick(dt)).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn game_resize(width: f32, height: f32) -> Result<(), JsValue> {
            match with_runner(|r| r.resize(width, height)) {
                Some(Err(err)) => {
                    log::error!("{}: resize failed: {}", $game_name, err);
                    Err(JsValue::from_str(&err.to_string()))
                }
                _ => Ok(()),
            }
        }

        #[wasm_bindgen]
        pub fn game_dispose() {
            RUNNER.with(|cell| {
                if cell.borrow_mut().take().is_some() {
                    log::info!("{}: disposed", $game_name);
                }
            });
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_instance_floats() -> u32 {
            $crate::tumble_engine::RenderInstance::FLOATS as u32
        }

        #[wasm_bindgen]
        pub fn get_debug_vertices_ptr() -> *const f32 {
            with_runner(|r| r.debug_vertices_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_debug_vertex_count() -> u32 {
            with_runner(|r| r.debug_vertex_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_projection_ptr() -> *const f32 {
            with_runner(|r| r.projection_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_world_width() -> f32 {
            with_runner(|r| r.world_width()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_world_height() -> f32 {
            with_runner(|r| r.world_height()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_last_steps() -> u32 {
            with_runner(|r| r.last_steps()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_body_count() -> u32 {
            with_runner(|r| r.body_count()).unwrap_or(0)
        }
    };
}
