//! Fixtures: shapes attached to rigid bodies

use crate::collision::CollisionFilter;
use crate::contact::{PlayerKey, SensorRole};
use crate::material::PhysicsMaterial;
use crate::shapes::Shape;
use hoglet_math::Vec2;

/// Identifies the player and role a sensor fixture reports to
///
/// Tagged at construction time; the contact router dispatches on this
/// directly instead of inferring the role from sensor geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SensorTag {
    pub player: PlayerKey,
    pub role: SensorRole,
}

/// A shape attached to a rigid body
///
/// The shape is stored in body-local coordinates; world-space queries
/// translate it by the body position. Solid fixtures generate collision
/// response, sensor fixtures only generate begin/end contact events.
#[derive(Clone, Copy, Debug)]
pub struct Fixture {
    /// Collision shape in body-local coordinates
    pub shape: Shape,
    /// Material for collision response
    pub material: PhysicsMaterial,
    /// Layer/mask filter
    pub filter: CollisionFilter,
    /// Sensors detect overlap without collision response
    pub sensor: bool,
    /// Present on every sensor fixture, absent on solid fixtures
    pub tag: Option<SensorTag>,
}

impl Fixture {
    /// Create a solid (non-sensor) fixture
    pub fn solid(shape: Shape, material: PhysicsMaterial, filter: CollisionFilter) -> Self {
        Self {
            shape,
            material,
            filter,
            sensor: false,
            tag: None,
        }
    }

    /// Create a sensor fixture reporting to the given player and role
    pub fn sensor(offset: Vec2, half_extents: Vec2, tag: SensorTag) -> Self {
        Self {
            shape: Shape::aabb_at(offset, half_extents),
            material: PhysicsMaterial::new(0.0, 0.0, 0.0),
            filter: CollisionFilter::sensor(),
            sensor: true,
            tag: Some(tag),
        }
    }

    /// The fixture's shape translated to world space
    pub fn world_shape(&self, body_position: Vec2) -> Shape {
        self.shape.translated(body_position)
    }
}
