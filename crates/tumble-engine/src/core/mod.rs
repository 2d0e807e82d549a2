pub mod factory;
pub mod ground;
pub mod physics;
pub mod scene;
pub mod scene_loop;
pub mod time;
