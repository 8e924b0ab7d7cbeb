//! 2D physics simulation for hoglet
//!
//! This crate provides the rigid-body core of the game:
//! - Collision shapes (circles, AABBs)
//! - Narrowphase collision detection and layer filtering
//! - Rigid body dynamics with gravity and fast-body substepping
//! - Sensor fixtures whose begin/end overlap events drive per-player
//!   directional contact counters
//! - The platformer player controller (smoothed acceleration, coyote jump)

pub mod body;
pub mod collision;
pub mod contact;
pub mod fixture;
pub mod material;
pub mod player;
pub mod shapes;
pub mod world;

// Re-export commonly used types
pub use body::{BodyKey, BodyType, RigidBody};
pub use collision::{aabb_vs_aabb, circle_vs_aabb, circle_vs_circle, CollisionFilter, CollisionLayer, Contact};
pub use contact::{ContactRouter, ContactState, PlayerKey, SensorRole};
pub use fixture::{Fixture, SensorTag};
pub use material::PhysicsMaterial;
pub use player::{Facing, PlayerController, PlayerInput, PlayerParams};
pub use shapes::{Aabb, Circle, Shape};
pub use world::{PhysicsConfig, PhysicsWorld};
