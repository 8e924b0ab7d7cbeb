//! Collision shapes for 2D physics
//!
//! Lightweight primitives used for collision detection. Fixture shapes are
//! stored in body-local coordinates and translated to world space on demand.

use hoglet_math::Vec2;

/// A circle defined by center and radius
#[derive(Clone, Copy, Debug)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    /// Create a new circle at the given center with the given radius
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if a point is inside or on the circle
    pub fn contains(&self, point: Vec2) -> bool {
        (point - self.center).length_squared() <= self.radius * self.radius
    }

    /// Translate the circle by a delta
    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.center + delta, self.radius)
    }
}

/// A 2D axis-aligned bounding box
#[derive(Clone, Copy, Debug)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec2,
    /// Maximum corner
    pub max: Vec2,
}

impl Aabb {
    /// Create a new AABB from min and max corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a position with given half-extents
    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Get the half-extents (half the size in each dimension)
    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    /// Get the full size in each dimension
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Check if a point is inside or on the AABB
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Check if two AABBs overlap (touching edges do not count)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Get the closest point inside or on the AABB to a given point
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp_components(self.min, self.max)
    }

    /// Translate the AABB by a delta
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }
}

/// A collision shape attached to a fixture
#[derive(Clone, Copy, Debug)]
pub enum Shape {
    Circle(Circle),
    Aabb(Aabb),
}

impl Shape {
    /// A circle centered on the body origin
    pub fn circle(radius: f32) -> Self {
        Shape::Circle(Circle::new(Vec2::ZERO, radius))
    }

    /// A box centered on the body origin
    pub fn aabb(half_extents: Vec2) -> Self {
        Shape::Aabb(Aabb::from_center_half_extents(Vec2::ZERO, half_extents))
    }

    /// A box offset from the body origin (used for sensor fixtures)
    pub fn aabb_at(offset: Vec2, half_extents: Vec2) -> Self {
        Shape::Aabb(Aabb::from_center_half_extents(offset, half_extents))
    }

    /// Get the center of this shape
    pub fn center(&self) -> Vec2 {
        match self {
            Shape::Circle(c) => c.center,
            Shape::Aabb(a) => a.center(),
        }
    }

    /// Translate the shape by a delta
    pub fn translated(&self, delta: Vec2) -> Self {
        match self {
            Shape::Circle(c) => Shape::Circle(c.translated(delta)),
            Shape::Aabb(a) => Shape::Aabb(a.translated(delta)),
        }
    }

    /// Smallest half-extent of the shape, used to bound substep travel
    /// for fast bodies
    pub fn min_half_extent(&self) -> f32 {
        match self {
            Shape::Circle(c) => c.radius,
            Shape::Aabb(a) => {
                let he = a.half_extents();
                he.x.min(he.y)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_contains() {
        let circle = Circle::new(Vec2::ZERO, 1.0);
        assert!(circle.contains(Vec2::new(0.5, 0.5)));
        assert!(!circle.contains(Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_aabb_from_center() {
        let aabb = Aabb::from_center_half_extents(Vec2::new(1.0, 2.0), Vec2::new(0.5, 1.0));
        assert_eq!(aabb.min, Vec2::new(0.5, 1.0));
        assert_eq!(aabb.max, Vec2::new(1.5, 3.0));
        assert_eq!(aabb.center(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_aabb_overlaps() {
        let a = Aabb::from_center_half_extents(Vec2::ZERO, Vec2::new(1.0, 1.0));
        let b = Aabb::from_center_half_extents(Vec2::new(1.5, 0.0), Vec2::new(1.0, 1.0));
        let c = Aabb::from_center_half_extents(Vec2::new(3.0, 0.0), Vec2::new(1.0, 1.0));

        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        // Touching edges do not overlap
        let d = Aabb::from_center_half_extents(Vec2::new(2.0, 0.0), Vec2::new(1.0, 1.0));
        assert!(!a.overlaps(&d));
    }

    #[test]
    fn test_aabb_closest_point() {
        let aabb = Aabb::from_center_half_extents(Vec2::ZERO, Vec2::new(1.0, 1.0));
        assert_eq!(aabb.closest_point(Vec2::new(5.0, 0.0)), Vec2::new(1.0, 0.0));
        assert_eq!(aabb.closest_point(Vec2::new(0.5, 0.5)), Vec2::new(0.5, 0.5));
    }

    #[test]
    fn test_shape_translated() {
        let shape = Shape::aabb(Vec2::new(0.5, 0.5));
        let moved = shape.translated(Vec2::new(2.0, 3.0));
        assert_eq!(moved.center(), Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_shape_min_half_extent() {
        assert_eq!(Shape::circle(0.1).min_half_extent(), 0.1);
        assert_eq!(Shape::aabb(Vec2::new(0.5, 0.2)).min_half_extent(), 0.2);
    }
}
