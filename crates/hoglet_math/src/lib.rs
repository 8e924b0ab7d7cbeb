//! 2D math types for hoglet

mod vec2;

pub use vec2::Vec2;
