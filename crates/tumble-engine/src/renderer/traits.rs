//! Renderer boundary.
//!
//! The scene loop never talks to a GPU. It submits sprites and debug lines
//! through this trait; the host decides what a draw means (WebGPU, Canvas 2D,
//! a test recorder). [`RenderBuffer`](super::instance::RenderBuffer) is the
//! provided recording implementation.

use glam::Mat4;

use crate::assets::registry::SpriteAsset;
use crate::systems::debug::DebugLine;

/// Sprite batch contract for render backends.
///
/// # Example Implementation
///
/// ```ignore
/// struct CanvasBatch { ctx: web_sys::CanvasRenderingContext2d, /* ... */ }
///
/// impl SpriteRenderer for CanvasBatch {
///     fn begin_batch(&mut self) { self.ctx.save(); }
///     fn draw_sprite(&mut self, sprite: &SpriteAsset, x: f32, y: f32, deg: f32) {
///         // translate, rotate around sprite.origin, draw_image from sprite.region...
///     }
///     fn end_batch(&mut self) { self.ctx.restore(); }
/// }
/// ```
pub trait SpriteRenderer {
    /// Start collecting draws for a frame.
    fn begin_batch(&mut self);

    /// Draw `sprite` with its origin at `(x, y)`, rotated counter-clockwise
    /// around its origin by `rotation_degrees`.
    fn draw_sprite(&mut self, sprite: &SpriteAsset, x: f32, y: f32, rotation_degrees: f32);

    /// Submit everything drawn since `begin_batch`.
    fn end_batch(&mut self);

    /// World-to-clip transform, updated on resize.
    fn set_projection(&mut self, _projection: Mat4) {}

    /// Diagnostic collider outlines in world space.
    fn draw_debug(&mut self, _lines: &[DebugLine], _projection: Mat4) {}
}
