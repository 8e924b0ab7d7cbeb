//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`HOG_SECTION__KEY`)

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use hoglet_core::{GameConfig, SpriteId, Vec2};
use hoglet_physics::PlayerParams;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// World and asset configuration
    #[serde(default)]
    pub game: GameSection,
    /// Physics configuration
    #[serde(default)]
    pub physics: PhysicsSection,
    /// Player tuning
    #[serde(default)]
    pub player: PlayerSection,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`HOG_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // HOG_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("HOG_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// World-building constants for [`hoglet_core::Game`]
    pub fn to_game_config(&self) -> GameConfig {
        GameConfig {
            tile_size: self.game.tile_size,
            pixels_per_meter: self.game.pixels_per_meter,
            physics: hoglet_physics::PhysicsConfig {
                gravity: self.physics.gravity,
                velocity_iterations: self.physics.velocity_iterations,
                position_iterations: self.physics.position_iterations,
            },
            player_spawn: Vec2::new(self.game.player_spawn[0], self.game.player_spawn[1]),
            camera_offset: self.game.camera_offset,
            tile_sprite: SpriteId(self.game.tile_sprite),
            player_sprite: SpriteId(self.game.player_sprite),
            bullet_sprite: SpriteId(self.game.bullet_sprite),
            player: self.to_player_params(),
        }
    }

    /// Player tuning for the controller
    pub fn to_player_params(&self) -> PlayerParams {
        PlayerParams {
            move_speed: self.player.move_speed,
            accel_rate: self.player.accel_rate,
            jump_speed: self.player.jump_speed,
            coyote_time: self.player.coyote_time,
            ..Default::default()
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Hoglet".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
        }
    }
}

/// World and asset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSection {
    /// Path to the tile map text file
    pub map_path: String,
    /// Path to the item definitions RON file
    pub items_path: String,
    /// Tile edge length in pixels
    pub tile_size: f32,
    /// Pixels per physics meter
    pub pixels_per_meter: f32,
    /// Player spawn position [x, y] in meters
    pub player_spawn: [f32; 2],
    /// Camera height above the player, in pixels
    pub camera_offset: f32,
    /// Sprite indices
    pub tile_sprite: u32,
    pub player_sprite: u32,
    pub bullet_sprite: u32,
}

impl Default for GameSection {
    fn default() -> Self {
        Self {
            map_path: "assets/maps/testmap.txt".to_string(),
            items_path: "assets/items.ron".to_string(),
            tile_size: 32.0,
            pixels_per_meter: 32.0,
            player_spawn: [3.0, 8.0],
            camera_offset: 200.0,
            tile_sprite: 0,
            player_sprite: 1,
            bullet_sprite: 2,
        }
    }
}

/// Physics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsSection {
    /// Gravity (negative = downward)
    pub gravity: f32,
    /// Velocity resolution passes per step
    pub velocity_iterations: u32,
    /// Position resolution passes per step
    pub position_iterations: u32,
}

impl Default for PhysicsSection {
    fn default() -> Self {
        Self {
            gravity: -9.8,
            velocity_iterations: 8,
            position_iterations: 3,
        }
    }
}

/// Player tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSection {
    /// Maximum horizontal speed (m/s)
    pub move_speed: f32,
    /// Exponential blend rate toward the target speed
    pub accel_rate: f32,
    /// Upward launch speed on jump (m/s)
    pub jump_speed: f32,
    /// Jump grace window after leaving the ground (seconds)
    pub coyote_time: f32,
}

impl Default for PlayerSection {
    fn default() -> Self {
        Self {
            move_speed: 6.25,
            accel_rate: 15.0,
            jump_speed: 7.0,
            coyote_time: 0.1,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Show the frame rate in the window title
    pub show_frame_rate: bool,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            show_frame_rate: false,
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
