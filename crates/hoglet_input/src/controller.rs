//! Keyboard-to-game-input mapping
//!
//! Controls:
//! - A/D: Run left/right
//! - Space: Jump
//! - J: Attack
//! - F: Shoot
//! - I: Toggle inventory
//! - 1-6: Select hotbar slot
//! - Q: Use hotbar item
//! - Arrows: Move inventory selection (while open)
//! - Enter: Use selected item (while open)
//! - Delete: Drop selected item (while open)
//! - Backspace: Restart
//! - F2: Toggle frame rate display

use hoglet_core::{GameInput, SLOTS_PER_ROW};
use hoglet_physics::PlayerInput;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Accumulates key events and produces one [`GameInput`] per frame
///
/// Held keys (A/D) are level state; everything else is edge-triggered and
/// cleared when the frame input is taken.
#[derive(Default)]
pub struct InputController {
    // Held movement state
    left: bool,
    right: bool,

    // Edge-triggered, consumed per frame
    jump_pressed: bool,
    attack_pressed: bool,
    shoot_pressed: bool,
    toggle_inventory: bool,
    hotbar_select: Option<usize>,
    use_hotbar: bool,
    selection_move: Option<isize>,
    use_selected: bool,
    drop_selected: bool,
    restart: bool,
    toggle_fps: bool,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a keyboard event; returns true if the key is bound
    ///
    /// winit delivers OS key repeats as additional Pressed events, so edge
    /// flags only arm on a transition from released.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState, repeat: bool) -> bool {
        let pressed = state == ElementState::Pressed;
        let edge = pressed && !repeat;

        match key {
            KeyCode::KeyA => {
                self.left = pressed;
                true
            }
            KeyCode::KeyD => {
                self.right = pressed;
                true
            }
            KeyCode::Space => {
                if edge {
                    self.jump_pressed = true;
                }
                true
            }
            KeyCode::KeyJ => {
                if edge {
                    self.attack_pressed = true;
                }
                true
            }
            KeyCode::KeyF => {
                if edge {
                    self.shoot_pressed = true;
                }
                true
            }
            KeyCode::KeyI => {
                if edge {
                    self.toggle_inventory = true;
                }
                true
            }
            KeyCode::KeyQ => {
                if edge {
                    self.use_hotbar = true;
                }
                true
            }
            KeyCode::Digit1
            | KeyCode::Digit2
            | KeyCode::Digit3
            | KeyCode::Digit4
            | KeyCode::Digit5
            | KeyCode::Digit6 => {
                if edge {
                    self.hotbar_select = Some(digit_slot(key));
                }
                true
            }
            KeyCode::ArrowLeft => {
                if edge {
                    self.selection_move = Some(-1);
                }
                true
            }
            KeyCode::ArrowRight => {
                if edge {
                    self.selection_move = Some(1);
                }
                true
            }
            KeyCode::ArrowUp => {
                if edge {
                    self.selection_move = Some(-(SLOTS_PER_ROW as isize));
                }
                true
            }
            KeyCode::ArrowDown => {
                if edge {
                    self.selection_move = Some(SLOTS_PER_ROW as isize);
                }
                true
            }
            KeyCode::Enter => {
                if edge {
                    self.use_selected = true;
                }
                true
            }
            KeyCode::Delete => {
                if edge {
                    self.drop_selected = true;
                }
                true
            }
            KeyCode::Backspace => {
                if edge {
                    self.restart = true;
                }
                true
            }
            KeyCode::F2 => {
                if edge {
                    self.toggle_fps = true;
                }
                true
            }
            _ => false,
        }
    }

    /// Build this frame's input and clear the edge flags
    pub fn take_frame_input(&mut self) -> GameInput {
        let input = GameInput {
            player: PlayerInput {
                left: self.left,
                right: self.right,
                jump_pressed: self.jump_pressed,
                attack_pressed: self.attack_pressed,
                shoot_pressed: self.shoot_pressed,
            },
            toggle_inventory: self.toggle_inventory,
            hotbar_select: self.hotbar_select,
            use_hotbar: self.use_hotbar,
            selection_move: self.selection_move,
            use_selected: self.use_selected,
            drop_selected: self.drop_selected,
        };

        self.jump_pressed = false;
        self.attack_pressed = false;
        self.shoot_pressed = false;
        self.toggle_inventory = false;
        self.hotbar_select = None;
        self.use_hotbar = false;
        self.selection_move = None;
        self.use_selected = false;
        self.drop_selected = false;

        input
    }

    /// Restart was requested this frame (consumes the flag)
    pub fn take_restart(&mut self) -> bool {
        std::mem::take(&mut self.restart)
    }

    /// F2 was pressed this frame (consumes the flag)
    pub fn take_toggle_fps(&mut self) -> bool {
        std::mem::take(&mut self.toggle_fps)
    }
}

fn digit_slot(key: KeyCode) -> usize {
    match key {
        KeyCode::Digit1 => 0,
        KeyCode::Digit2 => 1,
        KeyCode::Digit3 => 2,
        KeyCode::Digit4 => 3,
        KeyCode::Digit5 => 4,
        KeyCode::Digit6 => 5,
        _ => unreachable!("only hotbar digits reach here"),
    }
}
