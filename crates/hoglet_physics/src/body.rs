//! Rigid body types for 2D physics simulation

use crate::collision::CollisionFilter;
use crate::fixture::Fixture;
use crate::material::PhysicsMaterial;
use crate::shapes::Shape;
use hoglet_math::Vec2;
use slotmap::new_key_type;

new_key_type! {
    /// Key to a rigid body in the physics world
    ///
    /// Uses generational indexing to prevent the ABA problem where a handle
    /// could point to a reused slot. If a body is removed and its slot
    /// reused, old keys will return None instead of pointing to the wrong
    /// body.
    pub struct BodyKey;
}

/// Whether a body moves under simulation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyType {
    /// Immovable level geometry
    Static,
    /// Subject to gravity, velocity integration, and collision response
    Dynamic,
}

/// A 2D rigid body with position, velocity, and attached fixtures
#[derive(Clone, Debug)]
pub struct RigidBody {
    /// Position in world coordinates (meters)
    pub position: Vec2,
    /// Velocity in meters per second
    pub velocity: Vec2,
    /// Static or dynamic
    pub body_type: BodyType,
    /// Mass of the body (used for push calculations between dynamic bodies)
    pub mass: f32,
    /// Whether this body is affected by gravity
    pub affected_by_gravity: bool,
    /// Fast-moving body: integration is substepped so it cannot tunnel
    /// through thin geometry in a single step
    pub bullet: bool,
    /// Attached fixtures (shape + material + filter + sensor flag)
    pub fixtures: Vec<Fixture>,
}

impl RigidBody {
    /// Create a dynamic body with no fixtures
    pub fn new_dynamic(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            body_type: BodyType::Dynamic,
            mass: 1.0,
            affected_by_gravity: true,
            bullet: false,
            fixtures: Vec::new(),
        }
    }

    /// Create a static body with a single box fixture
    pub fn new_static_aabb(position: Vec2, half_extents: Vec2, material: PhysicsMaterial) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            body_type: BodyType::Static,
            mass: 0.0,
            affected_by_gravity: false,
            bullet: false,
            fixtures: vec![Fixture::solid(
                Shape::aabb(half_extents),
                material,
                CollisionFilter::static_world(),
            )],
        }
    }

    /// Attach a fixture (builder style)
    pub fn with_fixture(mut self, fixture: Fixture) -> Self {
        self.fixtures.push(fixture);
        self
    }

    /// Set the velocity of this body
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the mass of this body
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Set whether this body is affected by gravity
    pub fn with_gravity(mut self, affected: bool) -> Self {
        self.affected_by_gravity = affected;
        self
    }

    /// Mark this body as fast-moving (continuous collision via substepping)
    pub fn with_bullet(mut self, bullet: bool) -> Self {
        self.bullet = bullet;
        self
    }

    /// True for static bodies
    pub fn is_static(&self) -> bool {
        self.body_type == BodyType::Static
    }

    /// Apply a positional correction (e.g. from collision resolution)
    pub fn apply_correction(&mut self, correction: Vec2) {
        self.position += correction;
    }

    /// Smallest half-extent among solid fixtures, used to bound substep
    /// travel distance for bullet bodies
    pub fn min_solid_extent(&self) -> f32 {
        self.fixtures
            .iter()
            .filter(|f| !f.sensor)
            .map(|f| f.shape.min_half_extent())
            .fold(f32::INFINITY, f32::min)
    }
}
