//! Game orchestrator
//!
//! Owns the physics world, player, bullets, inventory, and camera, and runs
//! one fixed frame order per update: inventory input, bullet lifetimes,
//! pending shots, player control (unless the inventory is open), the physics
//! step, and finally the camera.

use hoglet_math::Vec2;
use hoglet_physics::{PhysicsConfig, PhysicsWorld, PlayerController, PlayerInput, PlayerParams,
    PhysicsMaterial, RigidBody};

use crate::bullet::BulletPool;
use crate::camera::Camera;
use crate::inventory::Inventory;
use crate::item::ItemDb;
use crate::render::{SpriteDesc, SpriteId, SpriteRenderer};
use crate::tilemap::TileGrid;

/// World-building and presentation constants
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Tile edge length in pixels
    pub tile_size: f32,
    /// Pixels per physics meter
    pub pixels_per_meter: f32,
    /// Gravity and solver iteration counts
    pub physics: PhysicsConfig,
    /// Player spawn position in meters
    pub player_spawn: Vec2,
    /// Camera height above the player, in pixels
    pub camera_offset: f32,
    pub tile_sprite: SpriteId,
    pub player_sprite: SpriteId,
    pub bullet_sprite: SpriteId,
    /// Player controller tuning
    pub player: PlayerParams,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_size: 32.0,
            pixels_per_meter: 32.0,
            physics: PhysicsConfig::default(),
            player_spawn: Vec2::new(3.0, 8.0),
            camera_offset: 200.0,
            tile_sprite: SpriteId(0),
            player_sprite: SpriteId(1),
            bullet_sprite: SpriteId(2),
            player: PlayerParams::default(),
        }
    }
}

/// Per-frame input already mapped from raw device state
#[derive(Clone, Copy, Debug, Default)]
pub struct GameInput {
    pub player: PlayerInput,
    /// Toggle the inventory UI
    pub toggle_inventory: bool,
    /// Hotbar slot picked this frame (0-5)
    pub hotbar_select: Option<usize>,
    /// Consume the selected hotbar item (only honored while the UI is closed)
    pub use_hotbar: bool,
    /// Move the inventory grid selection (only honored while the UI is open)
    pub selection_move: Option<isize>,
    /// Consume one of the selected stack (UI open)
    pub use_selected: bool,
    /// Drop the selected stack (UI open)
    pub drop_selected: bool,
}

/// The running game
pub struct Game {
    world: PhysicsWorld,
    grid: TileGrid,
    player: PlayerController,
    bullets: BulletPool,
    inventory: Inventory,
    items: ItemDb,
    camera: Camera,
    config: GameConfig,
}

impl Game {
    /// Build the world from a tile grid and start the player at the
    /// configured spawn
    pub fn new(grid: TileGrid, items: ItemDb, config: GameConfig) -> Self {
        let mut world = PhysicsWorld::with_config(config.physics);
        build_static_geometry(&mut world, &grid, &config);

        let player =
            PlayerController::spawn(&mut world, config.player_spawn, config.player.clone());
        log::info!(
            "game world ready: {} static bodies, player at ({}, {})",
            world.body_count() - 1,
            config.player_spawn.x,
            config.player_spawn.y
        );

        Self {
            world,
            grid,
            player,
            bullets: BulletPool::new(),
            inventory: Inventory::new(),
            items,
            camera: Camera::new(config.camera_offset),
            config,
        }
    }

    /// Advance the game by `dt` seconds
    pub fn update(&mut self, dt: f32, input: &GameInput) {
        self.handle_inventory_input(input);

        self.bullets.update(dt, &mut self.world);

        if self.player.wants_to_shoot() {
            self.spawn_bullet_from_player();
            self.player.clear_shoot_request();
        }

        // The player freezes while rummaging through the inventory
        if !self.inventory.is_open() {
            self.player.update(dt, &input.player, &mut self.world);
        }

        self.world.step(dt);

        if let Some(pos) = self.player.position(&self.world) {
            self.camera.follow(pos * self.config.pixels_per_meter);
        }
    }

    fn handle_inventory_input(&mut self, input: &GameInput) {
        if input.toggle_inventory {
            self.inventory.toggle();
        }
        if let Some(slot) = input.hotbar_select {
            self.inventory.select_hotbar(slot);
        }
        if self.inventory.is_open() {
            if let Some(offset) = input.selection_move {
                self.inventory.move_selection(offset);
            }
            if input.use_selected {
                self.inventory.use_selected();
            }
            if input.drop_selected {
                self.inventory.drop_selected();
            }
        } else if input.use_hotbar {
            self.inventory.use_hotbar_item();
        }
    }

    fn spawn_bullet_from_player(&mut self) {
        let Some(pos) = self.player.position(&self.world) else {
            return;
        };
        let dir = Vec2::new(self.player.facing().sign(), 0.0);
        self.bullets.spawn(&mut self.world, pos, dir);
    }

    /// Emit one frame of sprite draws: tiles, player, bullets
    pub fn draw<R: SpriteRenderer>(&self, renderer: &mut R) {
        renderer.set_camera(self.camera.pos());

        let tile = self.config.tile_size;
        let map_h = self.grid.height() as f32;
        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                if !self.grid.is_solid(x, y) {
                    continue;
                }
                let px = (x as f32 + 0.5) * tile;
                let py = (map_h - y as f32 - 0.5) * tile;
                renderer.draw(&SpriteDesc::new(self.config.tile_sprite, Vec2::new(px, py)));
            }
        }

        let ppm = self.config.pixels_per_meter;
        if let Some(pos) = self.player.position(&self.world) {
            renderer.draw(&SpriteDesc::new(self.config.player_sprite, pos * ppm));
        }

        for bullet in self.bullets.iter() {
            if let Some(body) = self.world.get_body(bullet.body) {
                renderer.draw(&SpriteDesc::new(
                    self.config.bullet_sprite,
                    body.position * ppm,
                ));
            }
        }
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn bullets(&self) -> &BulletPool {
        &self.bullets
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn items(&self) -> &ItemDb {
        &self.items
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }
}

/// Turn merged tile rectangles into static physics boxes
///
/// Tile rows count downward from the top of the map while the physics world
/// is y-up, so the vertical coordinate flips around the map height.
fn build_static_geometry(world: &mut PhysicsWorld, grid: &TileGrid, config: &GameConfig) {
    let tile_m = config.tile_size / config.pixels_per_meter;
    let map_h = grid.height() as f32;

    for rect in grid.solid_rects() {
        let half = Vec2::new(rect.w as f32 * 0.5, rect.h as f32 * 0.5) * tile_m;
        let cx = (rect.x as f32 + rect.w as f32 * 0.5) * tile_m;
        let cy = (map_h - rect.y as f32 - rect.h as f32 * 0.5) * tile_m;

        world.add_body(RigidBody::new_static_aabb(
            Vec2::new(cx, cy),
            half,
            PhysicsMaterial::TILE,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingRenderer;

    const DT: f32 = 1.0 / 60.0;

    fn test_game() -> Game {
        // Flat floor across the bottom, spawn resting on it
        let grid = TileGrid::parse(
            "0000000000\n\
             0000000000\n\
             0000000000\n\
             1111111111\n",
        )
        .unwrap();
        let config = GameConfig {
            player_spawn: Vec2::new(5.0, 1.5),
            ..Default::default()
        };
        Game::new(grid, ItemDb::new(), config)
    }

    #[test]
    fn test_static_geometry_y_flip() {
        let game = test_game();
        // One merged floor rect: x 0..10, bottom row of a 4-row map.
        // Row 3 of 4 maps to world y centered at 0.5m.
        let floor = game
            .world()
            .body_keys()
            .map(|k| game.world().get_body(k).unwrap())
            .find(|b| b.is_static())
            .expect("floor body");
        assert!((floor.position.x - 5.0).abs() < 0.0001);
        assert!((floor.position.y - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_player_lands_and_grounds() {
        let mut game = test_game();
        for _ in 0..60 {
            game.update(DT, &GameInput::default());
        }
        assert!(game.player().grounded(game.world()));
        // Resting on the floor top (y=1) with half height 0.5
        let y = game.player().position(game.world()).unwrap().y;
        assert!((y - 1.5).abs() < 0.05, "player y = {}", y);
    }

    #[test]
    fn test_inventory_open_freezes_player() {
        let mut game = test_game();
        for _ in 0..60 {
            game.update(DT, &GameInput::default());
        }

        let open = GameInput {
            toggle_inventory: true,
            ..Default::default()
        };
        game.update(DT, &open);
        assert!(game.inventory().is_open());

        // Held movement is ignored while the inventory is open
        let run = GameInput {
            player: PlayerInput {
                right: true,
                ..Default::default()
            },
            ..Default::default()
        };
        for _ in 0..30 {
            game.update(DT, &run);
        }
        let vx = game.player().velocity(game.world()).unwrap().x;
        assert!(vx.abs() < 0.0001, "player moved with inventory open: {}", vx);
    }

    #[test]
    fn test_shoot_spawns_bullet_along_facing() {
        let mut game = test_game();
        for _ in 0..60 {
            game.update(DT, &GameInput::default());
        }

        let shoot_left = GameInput {
            player: PlayerInput {
                left: true,
                shoot_pressed: true,
                ..Default::default()
            },
            ..Default::default()
        };
        game.update(DT, &shoot_left);
        // The request raised this frame is consumed on the next
        game.update(DT, &GameInput::default());

        assert_eq!(game.bullets().len(), 1);
        let bullet = game.bullets().iter().next().unwrap();
        let body = game.world().get_body(bullet.body).unwrap();
        assert!(body.velocity.x < 0.0, "bullet should fly left");
    }

    #[test]
    fn test_bullets_expire() {
        let mut game = test_game();
        let shoot = GameInput {
            player: PlayerInput {
                shoot_pressed: true,
                ..Default::default()
            },
            ..Default::default()
        };
        game.update(DT, &shoot);
        game.update(DT, &GameInput::default());
        assert_eq!(game.bullets().len(), 1);

        for _ in 0..180 {
            game.update(DT, &GameInput::default());
        }
        assert!(game.bullets().is_empty());
    }

    #[test]
    fn test_camera_follows_player_with_offset() {
        let mut game = test_game();
        for _ in 0..10 {
            game.update(DT, &GameInput::default());
        }
        let pos = game.player().position(game.world()).unwrap() * 32.0;
        let cam = game.camera().pos();
        assert!((cam.x - pos.x).abs() < 0.0001);
        assert!((cam.y - (pos.y + 200.0)).abs() < 0.0001);
    }

    #[test]
    fn test_draw_emits_tiles_player_and_bullets() {
        let game = test_game();
        let mut renderer = RecordingRenderer::new();
        game.draw(&mut renderer);

        let config = GameConfig::default();
        assert_eq!(renderer.draws_of(config.tile_sprite).len(), 10);
        assert_eq!(renderer.draws_of(config.player_sprite).len(), 1);
        assert!(renderer.draws_of(config.bullet_sprite).is_empty());

        // Bottom-row tiles draw at pixel y 16 (y-flipped)
        let tile_draw = renderer.draws_of(config.tile_sprite)[0];
        assert!((tile_draw.pos.y - 16.0).abs() < 0.0001);
    }
}
