//! Narrowphase collision detection for 2D shapes
//!
//! Provides collision tests between circles and AABBs, plus collision
//! filtering via layer masks.
//!
//! Normal convention: every test returns a normal pointing from the second
//! shape toward the first, i.e. the direction that pushes the first shape
//! out of the second.

use bitflags::bitflags;

use crate::shapes::{Aabb, Circle};
use hoglet_math::Vec2;

bitflags! {
    /// Collision layers for filtering which objects can collide
    ///
    /// Each layer is a bit in a 32-bit mask. Objects can belong to multiple
    /// layers and define which layers they collide with via a mask.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CollisionLayer: u32 {
        /// Default layer for most objects
        const DEFAULT = 1 << 0;
        /// Player character layer
        const PLAYER = 1 << 1;
        /// Static world geometry (tile rectangles)
        const STATIC = 1 << 2;
        /// Sensor fixtures (detect but don't push)
        const SENSOR = 1 << 3;
        /// Projectiles (bullets)
        const PROJECTILE = 1 << 4;
        /// All layers (collide with everything)
        const ALL = 0xFFFFFFFF;
    }
}

/// Collision filter determining what a fixture collides with
///
/// Two fixtures A and B interact if:
/// - (A.layer & B.mask) != 0, AND
/// - (B.layer & A.mask) != 0
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionFilter {
    /// Which layer(s) this fixture belongs to
    pub layer: CollisionLayer,
    /// Which layer(s) this fixture can collide with
    pub mask: CollisionLayer,
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self {
            layer: CollisionLayer::DEFAULT,
            mask: CollisionLayer::ALL,
        }
    }
}

impl CollisionFilter {
    /// Create a new collision filter with specified layer and mask
    pub fn new(layer: CollisionLayer, mask: CollisionLayer) -> Self {
        Self { layer, mask }
    }

    /// Check if this filter allows interaction with another filter
    pub fn collides_with(&self, other: &Self) -> bool {
        self.layer.intersects(other.mask) && other.layer.intersects(self.mask)
    }

    /// Filter for the player body
    ///
    /// The player collides with everything except projectiles and sensors.
    pub fn player() -> Self {
        Self {
            layer: CollisionLayer::PLAYER,
            mask: CollisionLayer::ALL
                & !CollisionLayer::PROJECTILE
                & !CollisionLayer::SENSOR,
        }
    }

    /// Filter for static world geometry
    ///
    /// Static fixtures are detected by everything.
    pub fn static_world() -> Self {
        Self {
            layer: CollisionLayer::STATIC,
            mask: CollisionLayer::ALL,
        }
    }

    /// Filter for sensor fixtures
    ///
    /// Sensors detect static geometry only; they never push anything.
    pub fn sensor() -> Self {
        Self {
            layer: CollisionLayer::SENSOR,
            mask: CollisionLayer::STATIC,
        }
    }

    /// Filter for player projectiles
    ///
    /// Bullets hit static geometry but not the player that fired them.
    pub fn projectile() -> Self {
        Self {
            layer: CollisionLayer::PROJECTILE,
            mask: CollisionLayer::STATIC,
        }
    }
}

/// Contact information from a collision
#[derive(Clone, Copy, Debug)]
pub struct Contact {
    /// Point of contact
    pub point: Vec2,
    /// Normal pointing from the second shape toward the first
    pub normal: Vec2,
    /// Penetration depth (positive means overlapping)
    pub penetration: f32,
}

impl Contact {
    /// Create a new contact
    pub fn new(point: Vec2, normal: Vec2, penetration: f32) -> Self {
        Self {
            point,
            normal,
            penetration,
        }
    }

    /// Check if this represents an actual collision (positive penetration)
    pub fn is_colliding(&self) -> bool {
        self.penetration > 0.0
    }
}

/// Test AABB vs AABB collision
///
/// Returns a contact if the AABBs are intersecting, with the normal on the
/// axis of least overlap pointing from `b` toward `a`.
pub fn aabb_vs_aabb(a: &Aabb, b: &Aabb) -> Option<Contact> {
    if !a.overlaps(b) {
        return None;
    }

    let overlap_x = (a.max.x.min(b.max.x) - a.min.x.max(b.min.x)).max(0.0);
    let overlap_y = (a.max.y.min(b.max.y) - a.min.y.max(b.min.y)).max(0.0);

    let (penetration, normal) = if overlap_x < overlap_y {
        let normal = if a.center().x < b.center().x {
            -Vec2::X
        } else {
            Vec2::X
        };
        (overlap_x, normal)
    } else {
        let normal = if a.center().y < b.center().y {
            -Vec2::Y
        } else {
            Vec2::Y
        };
        (overlap_y, normal)
    };

    // Contact point at the center of the overlap region
    let overlap_min = a.min.max_components(b.min);
    let overlap_max = a.max.min_components(b.max);
    let point = (overlap_min + overlap_max) * 0.5;

    Some(Contact::new(point, normal, penetration))
}

/// Test circle vs AABB collision
///
/// Returns a contact if the circle is intersecting the AABB, with the normal
/// pointing from the AABB toward the circle.
pub fn circle_vs_aabb(circle: &Circle, aabb: &Aabb) -> Option<Contact> {
    let closest = aabb.closest_point(circle.center);
    let delta = circle.center - closest;
    let dist_squared = delta.length_squared();

    if dist_squared >= circle.radius * circle.radius {
        return None;
    }

    let normal = if dist_squared > 0.0001 * 0.0001 {
        delta.normalized()
    } else {
        // Circle center is inside the AABB - use the shortest escape direction
        let to_min = circle.center - aabb.min;
        let to_max = aabb.max - circle.center;

        let mut min_dist = to_min.x;
        let mut normal = -Vec2::X;
        if to_max.x < min_dist {
            min_dist = to_max.x;
            normal = Vec2::X;
        }
        if to_min.y < min_dist {
            min_dist = to_min.y;
            normal = -Vec2::Y;
        }
        if to_max.y < min_dist {
            normal = Vec2::Y;
        }
        normal
    };

    let dist = dist_squared.sqrt();
    let penetration = circle.radius - dist;

    Some(Contact::new(closest, normal, penetration))
}

/// Test circle vs circle collision
///
/// Returns a contact with the normal pointing from `b` toward `a`.
pub fn circle_vs_circle(a: &Circle, b: &Circle) -> Option<Contact> {
    let delta = a.center - b.center;
    let dist_sq = delta.length_squared();
    let min_dist = a.radius + b.radius;

    if dist_sq < min_dist * min_dist && dist_sq > 0.0001 {
        let dist = dist_sq.sqrt();
        let penetration = min_dist - dist;
        let normal = delta.normalized();
        let point = b.center + normal * b.radius;
        Some(Contact::new(point, normal, penetration))
    } else {
        None
    }
}
