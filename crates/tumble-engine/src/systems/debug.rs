//! Debug rendering: opt-in collider wireframes.
//!
//! Outlines are rebuilt from the physics world every time they are requested
//! and handed to the renderer after the sprite batch.

use glam::Vec2;

use crate::api::types::Pose;
use crate::core::physics::{BodyKind, BodyState, FixtureGeometry, PhysicsWorld};

const CIRCLE_SEGMENTS: usize = 24;

/// Outline tint, picked from the body's kind and sleep state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugColor {
    Static,
    Kinematic,
    Dynamic,
    Sleeping,
}

impl DebugColor {
    pub fn for_body(state: &BodyState) -> Self {
        match state.kind {
            BodyKind::Fixed => DebugColor::Static,
            BodyKind::Kinematic => DebugColor::Kinematic,
            BodyKind::Dynamic if state.sleeping => DebugColor::Sleeping,
            BodyKind::Dynamic => DebugColor::Dynamic,
        }
    }

    pub fn rgba(self) -> [f32; 4] {
        match self {
            DebugColor::Static => [0.5, 0.9, 0.5, 1.0],
            DebugColor::Kinematic => [0.5, 0.5, 0.9, 1.0],
            DebugColor::Dynamic => [0.9, 0.7, 0.7, 1.0],
            DebugColor::Sleeping => [0.6, 0.6, 0.6, 1.0],
        }
    }
}

/// A world-space polyline. Closed shapes repeat their first point at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugLine {
    pub points: Vec<[f32; 2]>,
    pub color: DebugColor,
}

/// Outline every fixture of every live body.
pub fn debug_outlines(world: &PhysicsWorld) -> Vec<DebugLine> {
    let mut lines = Vec::new();
    for (body, state) in world.bodies() {
        let color = DebugColor::for_body(&state);
        for fixture in world.fixtures(body) {
            lines.push(DebugLine {
                points: fixture_outline(state.pose, &fixture),
                color,
            });
        }
    }
    lines
}

/// Generate outline points for a fixture on a body at `pose`.
fn fixture_outline(pose: Pose, fixture: &FixtureGeometry) -> Vec<[f32; 2]> {
    let (sin_r, cos_r) = pose.angle.sin_cos();
    let to_world = |local: Vec2| -> [f32; 2] {
        [
            pose.position.x + local.x * cos_r - local.y * sin_r,
            pose.position.y + local.x * sin_r + local.y * cos_r,
        ]
    };

    let mut points = match fixture {
        FixtureGeometry::Circle { center, radius } => {
            // Rim turns with the body; the closing spoke shows spin.
            let mut points = Vec::with_capacity(CIRCLE_SEGMENTS + 2);
            for i in 0..CIRCLE_SEGMENTS {
                let angle = (i as f32 / CIRCLE_SEGMENTS as f32) * std::f32::consts::TAU;
                points.push(to_world(*center + Vec2::from_angle(angle) * *radius));
            }
            points
        }
        FixtureGeometry::Box { half_extents } => {
            let (hw, hh) = (half_extents.x, half_extents.y);
            [
                Vec2::new(-hw, -hh),
                Vec2::new(hw, -hh),
                Vec2::new(hw, hh),
                Vec2::new(-hw, hh),
            ]
            .into_iter()
            .map(to_world)
            .collect()
        }
        FixtureGeometry::Polygon(vertices) => vertices.iter().copied().map(to_world).collect(),
    };

    // Close the loop
    if let Some(&first) = points.first() {
        points.push(first);
    }
    if let FixtureGeometry::Circle { center, .. } = fixture {
        points.push(to_world(*center));
    }
    points
}
