//! Keyboard input handling for the platformer
//!
//! This crate maps raw winit key events to per-frame game input.

mod controller;

pub use controller::InputController;
