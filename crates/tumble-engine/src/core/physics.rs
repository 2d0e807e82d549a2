use std::collections::HashMap;
use std::num::NonZeroUsize;

use glam::Vec2;
use rapier2d::prelude::*;

use crate::api::error::GeometryError;
use crate::api::types::Pose;

// ---------------------------------------------------------------------------
// Conversion helpers (private): glam to nalgebra and back
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> nalgebra::Vector2<f32> {
    nalgebra::Vector2::new(v.x, v.y)
}

fn na_to_vec2(v: &nalgebra::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

fn na_iso_to_pose(iso: &nalgebra::Isometry2<f32>) -> Pose {
    Pose {
        position: na_to_vec2(&iso.translation.vector),
        angle: iso.rotation.angle(),
    }
}

/// Polygons with less doubled area than this are treated as degenerate.
const MIN_DOUBLE_AREA: f32 = 1e-6;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// The kind of rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyKind {
    #[default]
    Dynamic,
    Fixed,
    Kinematic,
}

impl BodyKind {
    fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyKind::Dynamic => RigidBodyType::Dynamic,
            BodyKind::Fixed => RigidBodyType::Fixed,
            BodyKind::Kinematic => RigidBodyType::KinematicPositionBased,
        }
    }

    fn from_rapier(body_type: RigidBodyType) -> Self {
        match body_type {
            RigidBodyType::Dynamic => BodyKind::Dynamic,
            RigidBodyType::Fixed => BodyKind::Fixed,
            RigidBodyType::KinematicPositionBased | RigidBodyType::KinematicVelocityBased => {
                BodyKind::Kinematic
            }
        }
    }
}

/// Collision geometry of one fixture, in body-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureGeometry {
    /// Convex polygon, either winding.
    Polygon(Vec<Vec2>),
    Circle { center: Vec2, radius: f32 },
    /// Axis-aligned box centered on the body origin.
    Box { half_extents: Vec2 },
}

impl FixtureGeometry {
    /// Reject shapes the solver cannot handle.
    pub fn validate(&self) -> Result<(), GeometryError> {
        match self {
            FixtureGeometry::Polygon(vertices) => validate_convex(vertices),
            FixtureGeometry::Circle { center, radius } => {
                if !center.is_finite() {
                    return Err(GeometryError::NonFinite);
                }
                if !(*radius > 0.0 && radius.is_finite()) {
                    return Err(GeometryError::InvalidRadius(*radius));
                }
                Ok(())
            }
            FixtureGeometry::Box { half_extents } => {
                let ok = half_extents.x > 0.0 && half_extents.y > 0.0 && half_extents.is_finite();
                if !ok {
                    return Err(GeometryError::InvalidBox(half_extents.x, half_extents.y));
                }
                Ok(())
            }
        }
    }

    /// Non-uniform scale. Circle radii follow the X factor.
    pub fn scaled(&self, scale: Vec2) -> Self {
        match self {
            FixtureGeometry::Polygon(vertices) => {
                FixtureGeometry::Polygon(vertices.iter().map(|v| *v * scale).collect())
            }
            FixtureGeometry::Circle { center, radius } => FixtureGeometry::Circle {
                center: *center * scale,
                radius: radius * scale.x,
            },
            FixtureGeometry::Box { half_extents } => FixtureGeometry::Box {
                half_extents: *half_extents * scale,
            },
        }
    }

    fn build_collider(&self) -> Result<ColliderBuilder, GeometryError> {
        self.validate()?;
        let builder = match self {
            FixtureGeometry::Polygon(vertices) => {
                let points: Vec<nalgebra::Point2<f32>> = vertices
                    .iter()
                    .map(|v| nalgebra::Point2::new(v.x, v.y))
                    .collect();
                ColliderBuilder::convex_hull(&points).ok_or(GeometryError::ZeroArea)?
            }
            FixtureGeometry::Circle { center, radius } => {
                ColliderBuilder::ball(*radius).translation(vec2_to_na(*center))
            }
            FixtureGeometry::Box { half_extents } => {
                ColliderBuilder::cuboid(half_extents.x, half_extents.y)
            }
        };
        Ok(builder)
    }
}

/// Rejects degenerate and non-convex polygons.
fn validate_convex(vertices: &[Vec2]) -> Result<(), GeometryError> {
    let n = vertices.len();
    if n < 3 {
        return Err(GeometryError::TooFewVertices(n));
    }
    if vertices.iter().any(|v| !v.is_finite()) {
        return Err(GeometryError::NonFinite);
    }

    let double_area: f32 = (0..n)
        .map(|i| vertices[i].perp_dot(vertices[(i + 1) % n]))
        .sum();
    if double_area.abs() <= MIN_DOUBLE_AREA {
        return Err(GeometryError::ZeroArea);
    }

    // Every turn must bend the same way as the overall winding, and the
    // turns must add up to a single revolution (rules out star polygons).
    let winding = double_area.signum();
    let mut turning = 0.0f32;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let c = vertices[(i + 2) % n];
        let e1 = b - a;
        let e2 = c - b;
        let cross = e1.perp_dot(e2);
        if cross * winding < -MIN_DOUBLE_AREA {
            return Err(GeometryError::NotConvex);
        }
        turning += cross.atan2(e1.dot(e2));
    }
    if turning.abs() > std::f32::consts::TAU + 0.01 {
        return Err(GeometryError::NotConvex);
    }
    Ok(())
}

/// Physical material properties for a fixture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderMaterial {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}

impl Default for ColliderMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.3,
            friction: 0.5,
            density: 1.0,
        }
    }
}

/// One fixture: geometry plus material.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureTemplate {
    pub geometry: FixtureGeometry,
    pub material: ColliderMaterial,
}

impl FixtureTemplate {
    pub fn new(geometry: FixtureGeometry, material: ColliderMaterial) -> Self {
        Self { geometry, material }
    }

    fn build(&self) -> Result<Collider, GeometryError> {
        Ok(self
            .geometry
            .build_collider()?
            .restitution(self.material.restitution)
            .friction(self.material.friction)
            .density(self.material.density)
            .build())
    }
}

/// Builder for describing a rigid body before creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    pub kind: BodyKind,
    pub position: Vec2,
    pub rotation: f32,
}

impl BodyDesc {
    pub fn new(kind: BodyKind) -> Self {
        Self {
            kind,
            position: Vec2::ZERO,
            rotation: 0.0,
        }
    }

    /// Create a dynamic body description at the origin.
    pub fn dynamic() -> Self {
        Self::new(BodyKind::Dynamic)
    }

    /// Create a fixed (static) body description at the origin.
    pub fn fixed() -> Self {
        Self::new(BodyKind::Fixed)
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_pose(self, pose: Pose) -> Self {
        self.with_position(pose.position).with_rotation(pose.angle)
    }
}

/// Handle to a live body in a [`PhysicsWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub(crate) RigidBodyHandle);

/// Read-only view of a body, for overlays and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub pose: Pose,
    pub kind: BodyKind,
    pub sleeping: bool,
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Wraps all Rapier2D boilerplate into a single struct.
///
/// The world only advances through [`PhysicsWorld::step`]; callers are
/// expected to pass the same fixed delta every time.
pub struct PhysicsWorld {
    gravity: nalgebra::Vector2<f32>,
    can_sleep: bool,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    /// Angles placed by `create_body`/`set_transform` since the last step.
    /// Rapier keeps rotations as unit complex numbers, so these are what
    /// reads return until the solver moves the body.
    placed_angles: HashMap<RigidBodyHandle, f32>,
}

impl PhysicsWorld {
    /// Create a world where resting bodies may sleep. Y-up: use negative Y for
    /// downward gravity (e.g. `Vec2::new(0.0, -10.0)`).
    pub fn new(gravity: Vec2) -> Self {
        Self::with_sleeping(gravity, true)
    }

    pub fn with_sleeping(gravity: Vec2, can_sleep: bool) -> Self {
        Self {
            gravity: vec2_to_na(gravity),
            can_sleep,
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            placed_angles: HashMap::new(),
        }
    }

    pub fn gravity(&self) -> Vec2 {
        na_to_vec2(&self.gravity)
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = vec2_to_na(gravity);
    }

    /// Advance every body by exactly `dt`.
    ///
    /// Velocity iterations drive the constraint solver iterations; position
    /// iterations drive the internal stabilization passes. Both are at least 1.
    pub fn step(&mut self, dt: f32, velocity_iterations: u32, position_iterations: u32) {
        self.integration_parameters.dt = dt;
        self.integration_parameters.num_solver_iterations =
            NonZeroUsize::new(velocity_iterations as usize).unwrap_or(NonZeroUsize::MIN);
        self.integration_parameters.num_internal_stabilization_iterations =
            position_iterations.max(1) as usize;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
        self.placed_angles.clear();
    }

    /// Create a rigid body with one collider per fixture.
    ///
    /// All fixtures are validated before anything is inserted, so a rejected
    /// template never leaves a partial body in the world.
    pub fn create_body(
        &mut self,
        desc: &BodyDesc,
        fixtures: &[FixtureTemplate],
    ) -> Result<BodyHandle, GeometryError> {
        if fixtures.is_empty() {
            return Err(GeometryError::NoFixtures);
        }
        let colliders = fixtures
            .iter()
            .map(FixtureTemplate::build)
            .collect::<Result<Vec<_>, _>>()?;

        let rb = RigidBodyBuilder::new(desc.kind.to_rapier())
            .translation(vec2_to_na(desc.position))
            .rotation(desc.rotation)
            .can_sleep(self.can_sleep)
            .build();
        let body_handle = self.bodies.insert(rb);
        self.placed_angles.insert(body_handle, desc.rotation);

        for collider in colliders {
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);
        }

        Ok(BodyHandle(body_handle))
    }

    /// Remove a body and all its colliders. `None` or a stale handle is a no-op.
    /// Returns whether a body was removed.
    pub fn destroy_body(&mut self, body: Option<BodyHandle>) -> bool {
        let Some(body) = body else {
            return false;
        };
        self.placed_angles.remove(&body.0);
        self.bodies
            .remove(
                body.0,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    /// Teleport a body. Takes effect immediately for reads, and for the solver on the next step.
    pub fn set_transform(&mut self, body: BodyHandle, position: Vec2, angle: f32) -> bool {
        match self.bodies.get_mut(body.0) {
            Some(rb) => {
                rb.set_position(nalgebra::Isometry2::new(vec2_to_na(position), angle), true);
                self.placed_angles.insert(body.0, angle);
                true
            }
            None => false,
        }
    }

    /// Current position and rotation of a body, if it is still live.
    pub fn pose(&self, body: BodyHandle) -> Option<Pose> {
        self.bodies.get(body.0).map(|rb| self.read_pose(body.0, rb))
    }

    pub fn position(&self, body: BodyHandle) -> Option<Vec2> {
        self.pose(body).map(|p| p.position)
    }

    pub fn angle(&self, body: BodyHandle) -> Option<f32> {
        self.pose(body).map(|p| p.angle)
    }

    pub fn contains(&self, body: BodyHandle) -> bool {
        self.bodies.contains(body.0)
    }

    pub fn body_state(&self, body: BodyHandle) -> Option<BodyState> {
        self.bodies.get(body.0).map(|rb| self.read_state(body.0, rb))
    }

    /// Every live body with its current state.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, BodyState)> + '_ {
        self.bodies
            .iter()
            .map(|(handle, rb)| (BodyHandle(handle), self.read_state(handle, rb)))
    }

    fn read_pose(&self, handle: RigidBodyHandle, rb: &RigidBody) -> Pose {
        let mut pose = na_iso_to_pose(rb.position());
        if let Some(angle) = self.placed_angles.get(&handle) {
            pose.angle = *angle;
        }
        pose
    }

    fn read_state(&self, handle: RigidBodyHandle, rb: &RigidBody) -> BodyState {
        BodyState {
            pose: self.read_pose(handle, rb),
            kind: BodyKind::from_rapier(rb.body_type()),
            sleeping: rb.is_sleeping(),
        }
    }

    /// Number of rigid bodies in the simulation.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of colliders in the simulation.
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Read back a body's fixture geometry in body-local space.
    /// Shapes this world never creates are skipped.
    pub fn fixtures(&self, body: BodyHandle) -> Vec<FixtureGeometry> {
        let Some(rb) = self.bodies.get(body.0) else {
            return Vec::new();
        };
        rb.colliders()
            .iter()
            .filter_map(|handle| self.colliders.get(*handle))
            .filter_map(|collider| {
                let local = collider
                    .position_wrt_parent()
                    .copied()
                    .unwrap_or_else(nalgebra::Isometry2::identity);
                let shape = collider.shape();
                if let Some(ball) = shape.as_ball() {
                    Some(FixtureGeometry::Circle {
                        center: na_to_vec2(&local.translation.vector),
                        radius: ball.radius,
                    })
                } else if let Some(cuboid) = shape.as_cuboid() {
                    Some(FixtureGeometry::Box {
                        half_extents: na_to_vec2(&cuboid.half_extents),
                    })
                } else {
                    shape.as_convex_polygon().map(|poly| {
                        FixtureGeometry::Polygon(
                            poly.points()
                                .iter()
                                .map(|p| {
                                    let p = local * p;
                                    Vec2::new(p.x, p.y)
                                })
                                .collect(),
                        )
                    })
                }
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
