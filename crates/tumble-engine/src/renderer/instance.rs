use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::assets::registry::SpriteAsset;
use crate::renderer::camera::CameraUniform;
use crate::renderer::traits::SpriteRenderer;
use crate::systems::debug::DebugLine;

/// Per-sprite draw record, read by the host renderer straight from memory.
/// 12 floats = 48 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// X position of the sprite origin in world space.
    pub x: f32,
    /// Y position of the sprite origin in world space.
    pub y: f32,
    /// Rotation in degrees, counter-clockwise.
    pub rotation: f32,
    /// World-space width.
    pub width: f32,
    /// World-space height.
    pub height: f32,
    /// Rotation pivot, relative to the lower-left corner.
    pub origin_x: f32,
    pub origin_y: f32,
    /// Atlas page index.
    pub atlas: f32,
    /// Source region in atlas pixels.
    pub region_x: f32,
    pub region_y: f32,
    pub region_w: f32,
    pub region_h: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Line-list vertex for the debug overlay: 6 floats (x, y, r, g, b, a).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DebugVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl DebugVertex {
    pub const FLOATS: usize = 6;
}

/// Recording sprite batch: every frame's draws land in flat buffers the host
/// can read without copying.
pub struct RenderBuffer {
    /// Sprite instances in draw order.
    pub instances: Vec<RenderInstance>,
    /// Debug overlay as a line list (two vertices per segment).
    pub debug_vertices: Vec<DebugVertex>,
    camera: CameraUniform,
    drawing: bool,
    frames: u64,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            debug_vertices: Vec::new(),
            camera: CameraUniform::from(Mat4::IDENTITY),
            drawing: false,
            frames: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.debug_vertices.clear();
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Number of batches completed with `end_batch`.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.camera.projection)
    }

    /// Raw pointer to instance data for host reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn debug_vertices_ptr(&self) -> *const f32 {
        self.debug_vertices.as_ptr() as *const f32
    }

    pub fn debug_vertex_count(&self) -> u32 {
        self.debug_vertices.len() as u32
    }

    /// Raw pointer to the 16-float column-major projection matrix.
    pub fn projection_ptr(&self) -> *const f32 {
        self.camera.projection.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteRenderer for RenderBuffer {
    fn begin_batch(&mut self) {
        if self.drawing {
            log::warn!("begin_batch called twice without end_batch");
        }
        self.clear();
        self.drawing = true;
    }

    fn draw_sprite(&mut self, sprite: &SpriteAsset, x: f32, y: f32, rotation_degrees: f32) {
        if !self.drawing {
            log::warn!("draw of `{}` outside a batch ignored", sprite.name);
            return;
        }
        self.instances.push(RenderInstance {
            x,
            y,
            rotation: rotation_degrees,
            width: sprite.size.x,
            height: sprite.size.y,
            origin_x: sprite.origin.x,
            origin_y: sprite.origin.y,
            atlas: sprite.atlas.0 as f32,
            region_x: sprite.region.x as f32,
            region_y: sprite.region.y as f32,
            region_w: sprite.region.width as f32,
            region_h: sprite.region.height as f32,
        });
    }

    fn end_batch(&mut self) {
        if !self.drawing {
            log::warn!("end_batch called without begin_batch");
            return;
        }
        self.drawing = false;
        self.frames += 1;
    }

    fn set_projection(&mut self, projection: Mat4) {
        self.camera = CameraUniform::from(projection);
    }

    fn draw_debug(&mut self, lines: &[DebugLine], _projection: Mat4) {
        self.debug_vertices.clear();
        for line in lines {
            let [r, g, b, a] = line.color.rgba();
            let vertex = |p: [f32; 2]| DebugVertex {
                x: p[0],
                y: p[1],
                r,
                g,
                b,
                a,
            };
            for pair in line.points.windows(2) {
                self.debug_vertices.push(vertex(pair[0]));
                self.debug_vertices.push(vertex(pair[1]));
            }
        }
    }
}
