use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

/// Orthographic camera for 2D rendering.
/// Produces a projection matrix mapping world units to clip space.
#[derive(Debug, Clone)]
pub struct Camera2D {
    /// Visible width in world units.
    pub width: f32,
    /// Visible height in world units.
    pub height: f32,
    /// Camera center position in world space.
    pub center: [f32; 2],
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub projection: [[f32; 4]; 4],
}

impl From<Mat4> for CameraUniform {
    fn from(projection: Mat4) -> Self {
        Self {
            projection: projection.to_cols_array_2d(),
        }
    }
}

impl Camera2D {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            center: [0.0, 0.0],
        }
    }

    /// Build an orthographic projection matrix.
    /// Origin at center, Y-up, Z in [0, 1].
    pub fn projection_matrix(&self) -> Mat4 {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        let left = self.center[0] - half_w;
        let right = self.center[0] + half_w;
        let bottom = self.center[1] - half_h;
        let top = self.center[1] + half_h;
        Mat4::orthographic_rh(left, right, bottom, top, 0.0, 1.0)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform::from(self.projection_matrix())
    }

    /// Resize for a new surface, keeping at least `min_width` x `min_height`
    /// world units visible and extending the other axis to match the surface
    /// aspect ratio. Empty surfaces (minimized windows) are ignored.
    pub fn resize(
        &mut self,
        viewport_width: f32,
        viewport_height: f32,
        min_width: f32,
        min_height: f32,
    ) -> bool {
        if !(viewport_width > 0.0 && viewport_height > 0.0) {
            return false;
        }
        let horiz_ratio = viewport_width / min_width;
        let vert_ratio = viewport_height / min_height;
        let scale = horiz_ratio.min(vert_ratio);
        self.width = viewport_width / scale;
        self.height = viewport_height / scale;
        true
    }

    /// Move camera center to the target position.
    pub fn look_at(&mut self, target: Vec2) {
        self.center = target.to_array();
    }

    /// Place the world origin at the lower-left corner of the view.
    pub fn center_on_view(&mut self) {
        self.look_at(Vec2::new(self.width / 2.0, self.height / 2.0));
    }
}
