//! Core gameplay types for the Hoglet platformer
//!
//! This crate provides the building blocks of the game world:
//!
//! - [`TileGrid`] - Tile map loaded from text, with greedy rectangle merging
//! - [`TileRect`] - A merged run of solid tiles, in tile units
//! - [`BulletPool`] - Short-lived projectiles tied to physics bodies
//! - [`Item`] / [`ItemDb`] - Item definitions loaded from RON
//! - [`Inventory`] - Slot-based inventory with stacking and a hotbar
//! - [`Camera`] - Smoothed follow camera in world coordinates
//! - [`SpriteRenderer`] - Trait the game draws through
//! - [`Game`] - Orchestrator tying the pieces together each frame

mod bullet;
mod camera;
mod game;
mod inventory;
mod item;
mod render;
mod tilemap;

pub use bullet::{Bullet, BulletPool, BULLET_LIFETIME, BULLET_RADIUS, BULLET_SPEED};
pub use camera::Camera;
pub use game::{Game, GameConfig, GameInput};
pub use inventory::{Inventory, InventorySlot, HOTBAR_SLOTS, INVENTORY_SLOTS, SLOTS_PER_ROW};
pub use item::{Item, ItemDb, ItemDbError, ItemId, ItemKind, ItemTemplate};
pub use render::{RecordingRenderer, SpriteDesc, SpriteId, SpriteRenderer};
pub use tilemap::{MapError, TileGrid, TileRect};

// Re-export commonly used types for convenient access through hoglet_core
pub use hoglet_math::Vec2;
pub use hoglet_physics::{BodyKey, PhysicsConfig, PhysicsWorld, PlayerController, PlayerInput};
