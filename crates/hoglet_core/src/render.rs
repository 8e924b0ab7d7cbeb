//! Renderer-facing types
//!
//! The game draws through the [`SpriteRenderer`] trait so gameplay code
//! never touches a graphics API. Positions in [`SpriteDesc`] are in pixels;
//! the game converts from world meters when it emits draws.

use hoglet_math::Vec2;
use serde::{Deserialize, Serialize};

/// Index of a loaded sprite
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpriteId(pub u32);

/// One sprite draw request
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteDesc {
    pub sprite: SpriteId,
    /// Position in pixels, y-up
    pub pos: Vec2,
    pub x_scale: f32,
    pub y_scale: f32,
}

impl SpriteDesc {
    pub fn new(sprite: SpriteId, pos: Vec2) -> Self {
        Self {
            sprite,
            pos,
            x_scale: 1.0,
            y_scale: 1.0,
        }
    }

    pub fn with_scale(mut self, x_scale: f32, y_scale: f32) -> Self {
        self.x_scale = x_scale;
        self.y_scale = y_scale;
        self
    }
}

/// What the game needs from a renderer
pub trait SpriteRenderer {
    fn set_camera(&mut self, pos: Vec2);
    fn draw(&mut self, desc: &SpriteDesc);
}

/// Test renderer that records every draw call
#[derive(Default)]
pub struct RecordingRenderer {
    pub camera: Vec2,
    pub draws: Vec<SpriteDesc>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws of a specific sprite, in submission order
    pub fn draws_of(&self, sprite: SpriteId) -> Vec<&SpriteDesc> {
        self.draws.iter().filter(|d| d.sprite == sprite).collect()
    }

    pub fn clear(&mut self) {
        self.draws.clear();
    }
}

impl SpriteRenderer for RecordingRenderer {
    fn set_camera(&mut self, pos: Vec2) {
        self.camera = pos;
    }

    fn draw(&mut self, desc: &SpriteDesc) {
        self.draws.push(*desc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_renderer_captures_draws() {
        let mut renderer = RecordingRenderer::new();
        renderer.set_camera(Vec2::new(10.0, 20.0));
        renderer.draw(&SpriteDesc::new(SpriteId(1), Vec2::ZERO));
        renderer.draw(&SpriteDesc::new(SpriteId(2), Vec2::X));
        renderer.draw(&SpriteDesc::new(SpriteId(1), Vec2::Y));

        assert_eq!(renderer.camera, Vec2::new(10.0, 20.0));
        assert_eq!(renderer.draws.len(), 3);
        assert_eq!(renderer.draws_of(SpriteId(1)).len(), 2);
    }
}
