//! Platformer player controller
//!
//! Owns the player's dynamic body and four sensor fixtures (foot, head,
//! left, right). Each frame it reads input, blends the horizontal velocity
//! toward a target speed, applies coyote-time jump logic, and manages the
//! attack cooldown and shoot requests. Vertical velocity is otherwise left
//! to the world's gravity integration.

use crate::body::{BodyKey, RigidBody};
use crate::collision::CollisionFilter;
use crate::contact::{PlayerKey, SensorRole};
use crate::fixture::{Fixture, SensorTag};
use crate::material::PhysicsMaterial;
use crate::shapes::{Aabb, Shape};
use crate::world::PhysicsWorld;
use hoglet_math::Vec2;

/// Default maximum horizontal speed (meters per second)
pub const DEFAULT_MOVE_SPEED: f32 = 6.25;

/// Default upward launch speed on jump (meters per second)
pub const DEFAULT_JUMP_SPEED: f32 = 7.0;

/// Which way the player faces, from the last nonzero horizontal input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// -1.0 for left, +1.0 for right
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Tuning parameters for the player controller
#[derive(Clone, Debug)]
pub struct PlayerParams {
    /// Maximum horizontal speed (m/s)
    pub move_speed: f32,
    /// Exponential blend rate toward the target horizontal speed
    pub accel_rate: f32,
    /// Upward launch speed on jump (m/s)
    pub jump_speed: f32,
    /// Grace window after leaving the ground during which a jump still
    /// succeeds (seconds)
    pub coyote_time: f32,
    /// Seconds between attacks
    pub attack_cooldown: f32,
    /// Horizontal reach of the attack hitbox from the body center (m)
    pub attack_range: f32,
    /// Half-extent of the square attack hitbox (m)
    pub attack_radius: f32,
    /// Starting and maximum health
    pub max_health: u16,
    /// Half-extents of the body's solid box fixture (m)
    pub half_extents: Vec2,
}

impl Default for PlayerParams {
    fn default() -> Self {
        Self {
            move_speed: DEFAULT_MOVE_SPEED,
            accel_rate: 15.0,
            jump_speed: DEFAULT_JUMP_SPEED,
            coyote_time: 0.1,
            attack_cooldown: 0.35,
            attack_range: 0.75,
            attack_radius: 0.4,
            max_health: 100,
            half_extents: Vec2::new(0.45, 0.5),
        }
    }
}

/// Input snapshot consumed by the controller each frame
///
/// `*_pressed` fields are edge-triggered (transitioned to pressed this
/// frame); `left`/`right` are level-triggered (currently held).
#[derive(Clone, Copy, Debug, Default)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub jump_pressed: bool,
    pub attack_pressed: bool,
    pub shoot_pressed: bool,
}

/// The player: a dynamic body, four tagged sensors, and movement state
pub struct PlayerController {
    body: BodyKey,
    player: PlayerKey,
    params: PlayerParams,
    coyote_timer: f32,
    attack_timer: f32,
    attacking: bool,
    shoot_requested: bool,
    facing: Facing,
    health: u16,
}

impl PlayerController {
    /// Spawn the player at the given position
    ///
    /// Registers the player with the world's contact router and creates the
    /// dynamic body: one solid box fixture plus foot/head/left/right sensor
    /// fixtures, each tagged with its role at construction.
    pub fn spawn(world: &mut PhysicsWorld, position: Vec2, params: PlayerParams) -> Self {
        let player = world.contacts_mut().register_player();
        let he = params.half_extents;

        // Sensors sit just outside the box on each side, slightly narrower
        // than the face they cover so corner contacts don't double-report
        let sensor_thickness = 0.1;
        let foot = Fixture::sensor(
            Vec2::new(0.0, -(he.y + sensor_thickness * 0.5)),
            Vec2::new(he.x * 0.9, sensor_thickness),
            SensorTag { player, role: SensorRole::Foot },
        );
        let head = Fixture::sensor(
            Vec2::new(0.0, he.y + sensor_thickness * 0.5),
            Vec2::new(he.x * 0.9, sensor_thickness),
            SensorTag { player, role: SensorRole::Head },
        );
        let left = Fixture::sensor(
            Vec2::new(-(he.x + sensor_thickness * 0.5), 0.0),
            Vec2::new(sensor_thickness, he.y * 0.9),
            SensorTag { player, role: SensorRole::LeftWall },
        );
        let right = Fixture::sensor(
            Vec2::new(he.x + sensor_thickness * 0.5, 0.0),
            Vec2::new(sensor_thickness, he.y * 0.9),
            SensorTag { player, role: SensorRole::RightWall },
        );

        let body = RigidBody::new_dynamic(position)
            .with_fixture(Fixture::solid(
                Shape::aabb(he),
                PhysicsMaterial::PLAYER,
                CollisionFilter::player(),
            ))
            .with_fixture(foot)
            .with_fixture(head)
            .with_fixture(left)
            .with_fixture(right);

        let body = world.add_body(body);
        let health = params.max_health;

        Self {
            body,
            player,
            params,
            coyote_timer: 0.0,
            attack_timer: 0.0,
            attacking: false,
            shoot_requested: false,
            facing: Facing::Right,
            health,
        }
    }

    /// Remove the player's body and contact registration from the world
    pub fn despawn(self, world: &mut PhysicsWorld) {
        world.remove_body(self.body);
        world.contacts_mut().unregister_player(self.player);
    }

    /// Per-frame update: velocity smoothing, attack/shoot timers, coyote
    /// jump, and velocity write-back
    ///
    /// Only the horizontal velocity is written unconditionally; the vertical
    /// component is set solely on jump and otherwise left to gravity.
    pub fn update(&mut self, dt: f32, input: &PlayerInput, world: &mut PhysicsWorld) {
        let grounded = self.grounded(world);

        let Some(body) = world.get_body(self.body) else {
            log::warn!("player body missing from physics world");
            return;
        };
        let mut velocity = body.velocity;

        // Horizontal target from held input, blended exponentially so the
        // player accelerates and decelerates instead of snapping
        let mut target = 0.0;
        if input.left {
            target = -self.params.move_speed;
        }
        if input.right {
            target = self.params.move_speed;
        }
        velocity.x += (target - velocity.x) * self.params.accel_rate * dt;

        if input.left != input.right {
            self.facing = if input.left { Facing::Left } else { Facing::Right };
        }

        // Attack cooldown, clamped at zero
        self.attack_timer = (self.attack_timer - dt).max(0.0);
        if self.attacking && self.attack_timer == 0.0 {
            self.attacking = false;
        }
        if input.attack_pressed && self.attack_timer == 0.0 {
            self.attacking = true;
            self.attack_timer = self.params.attack_cooldown;
        }

        // Shoot intent is recorded here and consumed by the game loop,
        // which owns bullet spawning
        if input.shoot_pressed {
            self.shoot_requested = true;
        }

        // Coyote time: refilled while grounded, depletes linearly in the air
        if grounded {
            self.coyote_timer = self.params.coyote_time;
        } else {
            self.coyote_timer -= dt;
        }

        let mut jumped = false;
        if self.coyote_timer > 0.0 && input.jump_pressed {
            self.coyote_timer = 0.0;
            jumped = true;
        }

        let Some(body) = world.get_body_mut(self.body) else {
            return;
        };
        body.velocity.x = velocity.x;
        if jumped {
            body.velocity.y = self.params.jump_speed;
        }
    }

    /// True if the foot sensor currently overlaps solid geometry
    pub fn grounded(&self, world: &PhysicsWorld) -> bool {
        world
            .contacts()
            .state(self.player)
            .is_some_and(|s| s.grounded())
    }

    /// True if the head sensor currently overlaps solid geometry
    pub fn head_blocked(&self, world: &PhysicsWorld) -> bool {
        world
            .contacts()
            .state(self.player)
            .is_some_and(|s| s.head_blocked())
    }

    /// Current body position in world coordinates
    pub fn position(&self, world: &PhysicsWorld) -> Option<Vec2> {
        world.get_body(self.body).map(|b| b.position)
    }

    /// Current body velocity
    pub fn velocity(&self, world: &PhysicsWorld) -> Option<Vec2> {
        world.get_body(self.body).map(|b| b.velocity)
    }

    /// The attack hitbox, mirrored by facing direction; None while idle
    pub fn attack_aabb(&self, world: &PhysicsWorld) -> Option<Aabb> {
        if !self.attacking {
            return None;
        }
        let position = self.position(world)?;
        let center = position + Vec2::new(self.params.attack_range * self.facing.sign(), 0.0);
        Some(Aabb::from_center_half_extents(
            center,
            Vec2::new(self.params.attack_radius, self.params.attack_radius),
        ))
    }

    /// True while the attack timer runs
    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    /// True if a shoot was requested and not yet consumed
    pub fn wants_to_shoot(&self) -> bool {
        self.shoot_requested
    }

    /// Clear the shoot request after the game loop has spawned the bullet
    pub fn clear_shoot_request(&mut self) {
        self.shoot_requested = false;
    }

    /// Which way the player faces
    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Key of the player's physics body
    pub fn body_key(&self) -> BodyKey {
        self.body
    }

    /// Key of the player's contact registration
    pub fn player_key(&self) -> PlayerKey {
        self.player
    }

    /// Current health
    pub fn health(&self) -> u16 {
        self.health
    }

    /// Reduce health, saturating at zero
    pub fn take_damage(&mut self, damage: u16) {
        self.health = self.health.saturating_sub(damage);
    }

    /// Restore health, capped at the maximum
    pub fn heal(&mut self, amount: u16) {
        self.health = self.health.saturating_add(amount).min(self.params.max_health);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::PhysicsConfig;

    const DT: f32 = 1.0 / 60.0;

    fn world_with_floor() -> PhysicsWorld {
        let mut world = PhysicsWorld::new();
        world.add_body(RigidBody::new_static_aabb(
            Vec2::new(0.0, -0.5),
            Vec2::new(50.0, 0.5),
            PhysicsMaterial::TILE,
        ));
        world
    }

    /// Player standing on the floor (floor top at y=0, body half height 0.5)
    fn spawn_on_floor(world: &mut PhysicsWorld) -> PlayerController {
        let player = PlayerController::spawn(world, Vec2::new(0.0, 0.5), PlayerParams::default());
        // Settle contacts
        world.step(DT);
        player
    }

    #[test]
    fn test_spawn_registers_player() {
        let mut world = world_with_floor();
        let player =
            PlayerController::spawn(&mut world, Vec2::new(0.0, 5.0), PlayerParams::default());
        assert!(world.contacts().state(player.player_key()).is_some());
        assert_eq!(player.health(), 100);
        assert_eq!(player.facing(), Facing::Right);
    }

    #[test]
    fn test_grounded_on_floor() {
        let mut world = world_with_floor();
        let player = spawn_on_floor(&mut world);
        assert!(player.grounded(&world));
    }

    #[test]
    fn test_first_step_velocity_smoothing() {
        // v.x after one update from rest = speed * accel * dt
        let mut world = PhysicsWorld::with_config(PhysicsConfig::new(0.0));
        let mut player = PlayerController::spawn(&mut world, Vec2::ZERO, PlayerParams::default());

        let input = PlayerInput {
            right: true,
            ..Default::default()
        };
        player.update(DT, &input, &mut world);

        let expected = DEFAULT_MOVE_SPEED * 15.0 * DT;
        let vx = player.velocity(&world).unwrap().x;
        assert!((vx - expected).abs() < 0.0001, "vx={vx}, expected={expected}");
    }

    #[test]
    fn test_velocity_approaches_target_without_overshoot() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig::new(0.0));
        let mut player = PlayerController::spawn(&mut world, Vec2::ZERO, PlayerParams::default());

        let input = PlayerInput {
            right: true,
            ..Default::default()
        };

        let mut last = 0.0;
        for _ in 0..300 {
            player.update(DT, &input, &mut world);
            let vx = player.velocity(&world).unwrap().x;
            assert!(vx <= DEFAULT_MOVE_SPEED + 0.0001, "overshoot: {vx}");
            assert!(vx >= last - 0.0001, "not monotonic: {vx} < {last}");
            last = vx;
        }
        assert!((last - DEFAULT_MOVE_SPEED).abs() < 0.01);
    }

    #[test]
    fn test_jump_when_grounded() {
        let mut world = world_with_floor();
        let mut player = spawn_on_floor(&mut world);

        let input = PlayerInput {
            jump_pressed: true,
            ..Default::default()
        };
        player.update(DT, &input, &mut world);

        let vy = player.velocity(&world).unwrap().y;
        assert!((vy - DEFAULT_JUMP_SPEED).abs() < 0.0001);
    }

    #[test]
    fn test_no_jump_in_midair_after_window() {
        let mut world = world_with_floor();
        let mut player = PlayerController::spawn(
            &mut world,
            Vec2::new(0.0, 10.0),
            PlayerParams::default(),
        );
        // Never grounded: deplete any initial coyote allowance
        for _ in 0..30 {
            player.update(DT, &PlayerInput::default(), &mut world);
        }

        let vy_before = player.velocity(&world).unwrap().y;
        let input = PlayerInput {
            jump_pressed: true,
            ..Default::default()
        };
        player.update(DT, &input, &mut world);
        let vy_after = player.velocity(&world).unwrap().y;

        // No launch: vertical velocity unchanged by the controller
        assert!((vy_after - vy_before).abs() < 0.0001);
    }

    #[test]
    fn test_coyote_jump_within_window() {
        let mut world = world_with_floor();
        let mut player = spawn_on_floor(&mut world);

        // Establish grounded, refill coyote timer
        player.update(DT, &PlayerInput::default(), &mut world);
        assert!(player.grounded(&world));

        // Walk off the ledge: teleport clear of the floor, contacts end
        world.get_body_mut(player.body_key()).unwrap().position = Vec2::new(0.0, 5.0);
        world.get_body_mut(player.body_key()).unwrap().velocity = Vec2::ZERO;
        world.step(DT);
        assert!(!player.grounded(&world));

        // 0.05s of airborne updates (within the 0.1s window)
        for _ in 0..3 {
            player.update(DT, &PlayerInput::default(), &mut world);
        }

        let input = PlayerInput {
            jump_pressed: true,
            ..Default::default()
        };
        player.update(DT, &input, &mut world);

        let vy = player.velocity(&world).unwrap().y;
        assert!((vy - DEFAULT_JUMP_SPEED).abs() < 0.0001, "coyote jump failed: vy={vy}");
    }

    #[test]
    fn test_coyote_jump_after_window_fails() {
        let mut world = world_with_floor();
        let mut player = spawn_on_floor(&mut world);

        player.update(DT, &PlayerInput::default(), &mut world);
        world.get_body_mut(player.body_key()).unwrap().position = Vec2::new(0.0, 5.0);
        world.get_body_mut(player.body_key()).unwrap().velocity = Vec2::ZERO;
        world.step(DT);

        // 0.15s airborne: past the 0.1s window
        for _ in 0..9 {
            player.update(DT, &PlayerInput::default(), &mut world);
        }

        let vy_before = player.velocity(&world).unwrap().y;
        let input = PlayerInput {
            jump_pressed: true,
            ..Default::default()
        };
        player.update(DT, &input, &mut world);
        let vy_after = player.velocity(&world).unwrap().y;

        assert!((vy_after - vy_before).abs() < 0.0001, "jump succeeded past coyote window");
    }

    #[test]
    fn test_second_jump_in_window_is_harmless() {
        let mut world = world_with_floor();
        let mut player = spawn_on_floor(&mut world);
        player.update(DT, &PlayerInput::default(), &mut world);

        let input = PlayerInput {
            jump_pressed: true,
            ..Default::default()
        };
        player.update(DT, &input, &mut world);
        let vy_first = player.velocity(&world).unwrap().y;
        assert!((vy_first - DEFAULT_JUMP_SPEED).abs() < 0.0001);

        // Timer was zeroed by the first jump; grounded is still true until
        // the body actually leaves, which refills the timer - so step the
        // world first to lift off
        world.step(DT);

        // Once airborne with the timer spent, further presses do nothing
        world.get_body_mut(player.body_key()).unwrap().position = Vec2::new(0.0, 5.0);
        world.step(DT);
        for _ in 0..9 {
            player.update(DT, &PlayerInput::default(), &mut world);
        }
        let vy_before = player.velocity(&world).unwrap().y;
        player.update(DT, &input, &mut world);
        assert!((player.velocity(&world).unwrap().y - vy_before).abs() < 0.0001);
    }

    #[test]
    fn test_attack_cooldown() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig::new(0.0));
        let mut player = PlayerController::spawn(&mut world, Vec2::ZERO, PlayerParams::default());

        let attack = PlayerInput {
            attack_pressed: true,
            ..Default::default()
        };
        player.update(DT, &attack, &mut world);
        assert!(player.is_attacking());

        // Second press during cooldown is ignored (timer not reset)
        let timer_before = player.attack_timer;
        player.update(DT, &attack, &mut world);
        assert!(player.attack_timer < timer_before);

        // After the cooldown expires the attack state clears
        for _ in 0..30 {
            player.update(DT, &PlayerInput::default(), &mut world);
        }
        assert!(!player.is_attacking());
    }

    #[test]
    fn test_attack_hitbox_mirrors_facing() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig::new(0.0));
        let mut player = PlayerController::spawn(&mut world, Vec2::ZERO, PlayerParams::default());

        let input = PlayerInput {
            left: true,
            attack_pressed: true,
            ..Default::default()
        };
        player.update(DT, &input, &mut world);

        assert_eq!(player.facing(), Facing::Left);
        let aabb = player.attack_aabb(&world).expect("attacking");
        assert!(aabb.center().x < player.position(&world).unwrap().x);
    }

    #[test]
    fn test_shoot_request_lifecycle() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig::new(0.0));
        let mut player = PlayerController::spawn(&mut world, Vec2::ZERO, PlayerParams::default());

        assert!(!player.wants_to_shoot());

        let input = PlayerInput {
            shoot_pressed: true,
            ..Default::default()
        };
        player.update(DT, &input, &mut world);
        assert!(player.wants_to_shoot());

        player.clear_shoot_request();
        assert!(!player.wants_to_shoot());
    }

    #[test]
    fn test_damage_and_heal_saturate() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig::new(0.0));
        let mut player = PlayerController::spawn(&mut world, Vec2::ZERO, PlayerParams::default());

        player.take_damage(30);
        assert_eq!(player.health(), 70);
        player.take_damage(200);
        assert_eq!(player.health(), 0);

        player.heal(50);
        assert_eq!(player.health(), 50);
        player.heal(200);
        assert_eq!(player.health(), 100);
    }

    #[test]
    fn test_despawn_removes_body_and_registration() {
        let mut world = world_with_floor();
        let player = spawn_on_floor(&mut world);
        let body_key = player.body_key();
        let player_key = player.player_key();

        player.despawn(&mut world);
        assert!(world.get_body(body_key).is_none());
        assert!(world.contacts().state(player_key).is_none());
    }
}
