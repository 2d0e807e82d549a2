use glam::Vec2;

/// Position plus orientation of a body or sprite.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    /// Position in world units.
    pub position: Vec2,
    /// Rotation in radians, counter-clockwise.
    pub angle: f32,
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec2::ZERO,
        angle: 0.0,
    };

    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            angle,
        }
    }

    /// Orientation in degrees, the unit the sprite batch expects.
    pub fn degrees(&self) -> f32 {
        self.angle.to_degrees()
    }
}

/// Typed handle to a sprite, resolved once from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId(pub u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degrees_conversion() {
        let pose = Pose::new(0.0, 0.0, std::f32::consts::FRAC_PI_2);
        assert!((pose.degrees() - 90.0).abs() < 1e-4);
        assert_eq!(Pose::IDENTITY.degrees(), 0.0);
    }
}
