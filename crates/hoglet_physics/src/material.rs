//! Physical material properties for collision response

/// Physical material properties for a fixture
///
/// Friction and restitution shape the collision response; density exists for
/// parity with fixture definitions (static geometry uses zero density).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsMaterial {
    /// Density (mass per area); 0.0 for static fixtures
    pub density: f32,
    /// Friction coefficient (0.0 = ice, 1.0 = rubber)
    pub friction: f32,
    /// Restitution/bounciness (0.0 = no bounce, 1.0 = perfect bounce)
    pub restitution: f32,
}

impl Default for PhysicsMaterial {
    fn default() -> Self {
        Self {
            density: 1.0,
            friction: 0.5,
            restitution: 0.0,
        }
    }
}

impl PhysicsMaterial {
    /// Tile geometry: high friction, no bounce, zero density
    pub const TILE: Self = Self {
        density: 0.0,
        friction: 0.9,
        restitution: 0.0,
    };

    /// Projectiles: frictionless and dead on impact
    pub const BULLET: Self = Self {
        density: 1.0,
        friction: 0.0,
        restitution: 0.0,
    };

    /// Player body: frictionless, no bounce. The controller writes the
    /// horizontal velocity every frame; contact friction would fight it.
    pub const PLAYER: Self = Self {
        density: 1.0,
        friction: 0.0,
        restitution: 0.0,
    };

    /// Create a new material with custom friction and restitution
    ///
    /// Friction and restitution are clamped to [0.0, 1.0].
    pub fn new(density: f32, friction: f32, restitution: f32) -> Self {
        Self {
            density: density.max(0.0),
            friction: friction.clamp(0.0, 1.0),
            restitution: restitution.clamp(0.0, 1.0),
        }
    }

    /// Combine two materials for collision response
    ///
    /// Uses geometric mean for friction and maximum for restitution
    /// (most bouncy surface wins).
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            density: self.density,
            friction: (self.friction * other.friction).sqrt(),
            restitution: self.restitution.max(other.restitution),
        }
    }
}
