//! Hoglet - a 2D platformer prototype
//!
//! Tile maps merge into static physics geometry, a sensor-driven player
//! controller runs and jumps on it, and an inventory with a hotbar hangs off
//! the game loop. The library surface exists for integration tests and
//! tooling; the binary wires it to a window.

pub mod app;
pub mod config;
