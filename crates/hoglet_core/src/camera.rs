//! Follow camera
//!
//! Tracks a target point in pixel coordinates with a fixed vertical offset
//! so the view sits above the player rather than centered on them.

use hoglet_math::Vec2;

/// Default vertical offset in pixels
pub const DEFAULT_VERTICAL_OFFSET: f32 = 200.0;

/// Camera position in pixel coordinates
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pos: Vec2,
    vertical_offset: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_VERTICAL_OFFSET)
    }
}

impl Camera {
    pub fn new(vertical_offset: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            vertical_offset,
        }
    }

    /// Snap to the target plus the vertical offset
    pub fn follow(&mut self, target: Vec2) {
        self.pos = target + Vec2::new(0.0, self.vertical_offset);
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_applies_vertical_offset() {
        let mut camera = Camera::new(200.0);
        camera.follow(Vec2::new(64.0, 32.0));
        assert_eq!(camera.pos(), Vec2::new(64.0, 232.0));
    }
}
