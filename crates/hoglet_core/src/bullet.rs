//! Short-lived projectiles
//!
//! Each bullet owns a small fast-moving physics body and a lifetime clock.
//! The pool prunes bullets whose clock ran out, destroying the physics body
//! before dropping the bookkeeping entry.

use hoglet_math::Vec2;
use hoglet_physics::{
    BodyKey, CollisionFilter, Fixture, PhysicsMaterial, PhysicsWorld, RigidBody, Shape,
};

/// Seconds a bullet lives after spawning
pub const BULLET_LIFETIME: f32 = 2.0;

/// Muzzle speed in meters per second
pub const BULLET_SPEED: f32 = 15.0;

/// Bullet collision radius in meters
pub const BULLET_RADIUS: f32 = 0.1;

/// A live projectile: its physics body and remaining lifetime
#[derive(Clone, Copy, Debug)]
pub struct Bullet {
    pub body: BodyKey,
    pub life: f32,
}

impl Bullet {
    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }
}

/// Owns all live bullets and their lifecycle
#[derive(Default)]
pub struct BulletPool {
    bullets: Vec<Bullet>,
}

impl BulletPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a bullet at `position` moving in `direction`
    ///
    /// The direction is normalized; a zero direction shoots right. The body
    /// is flagged fast-moving so it cannot tunnel through thin walls.
    pub fn spawn(&mut self, world: &mut PhysicsWorld, position: Vec2, direction: Vec2) -> BodyKey {
        let dir = if direction.length() > 0.0 {
            direction.normalized()
        } else {
            Vec2::X
        };

        let body = RigidBody::new_dynamic(position)
            .with_fixture(Fixture::solid(
                Shape::circle(BULLET_RADIUS),
                PhysicsMaterial::BULLET,
                CollisionFilter::projectile(),
            ))
            .with_velocity(dir * BULLET_SPEED)
            .with_bullet(true);

        let key = world.add_body(body);
        self.bullets.push(Bullet {
            body: key,
            life: BULLET_LIFETIME,
        });
        log::trace!("spawned bullet at ({}, {})", position.x, position.y);
        key
    }

    /// Tick lifetimes and destroy expired bullets
    ///
    /// The physics body is removed from the world first, then the entry is
    /// dropped, so no stale body can outlive its bullet.
    pub fn update(&mut self, dt: f32, world: &mut PhysicsWorld) {
        for bullet in &mut self.bullets {
            bullet.life -= dt;
        }
        self.bullets.retain(|bullet| {
            if bullet.is_dead() {
                world.remove_body(bullet.body);
                false
            } else {
                true
            }
        });
    }

    /// Remove every bullet and its body immediately
    pub fn clear(&mut self, world: &mut PhysicsWorld) {
        for bullet in self.bullets.drain(..) {
            world.remove_body(bullet.body);
        }
    }

    pub fn len(&self) -> usize {
        self.bullets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }

    /// Iterate over live bullets
    pub fn iter(&self) -> impl Iterator<Item = &Bullet> {
        self.bullets.iter()
    }
}
