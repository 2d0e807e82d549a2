pub mod camera;
pub mod instance;
pub mod traits;

// Re-export key types for convenient access
pub use camera::{Camera2D, CameraUniform};
pub use instance::{DebugVertex, RenderBuffer, RenderInstance};
pub use traits::SpriteRenderer;
