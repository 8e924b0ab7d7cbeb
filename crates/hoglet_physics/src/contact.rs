//! Sensor contact routing
//!
//! The physics world fires begin/end events whenever a sensor fixture starts
//! or stops overlapping solid geometry. Each sensor carries an explicit
//! [`SensorRole`] and the [`PlayerKey`] of its owner, so routing is a direct
//! dispatch with no geometric inference.
//!
//! Per-role overlap state is a counter rather than a boolean: a foot sensor
//! standing on the seam between two tile rectangles overlaps both, and
//! losing one of the two contacts must not clear the grounded state.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Key to a registered player in the contact router
    ///
    /// Sensors reference their owning player through this generational key
    /// instead of a raw back-pointer, so a destroyed player leaves stale
    /// keys inert rather than dangling.
    pub struct PlayerKey;
}

/// Role of a sensor fixture, assigned at construction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SensorRole {
    Foot,
    Head,
    LeftWall,
    RightWall,
}

/// Directional overlap counters for one player
#[derive(Clone, Copy, Debug, Default)]
pub struct ContactState {
    ground: u32,
    head: u32,
    left_wall: u32,
    right_wall: u32,
}

impl ContactState {
    /// True if the foot sensor overlaps at least one solid fixture
    pub fn grounded(&self) -> bool {
        self.ground > 0
    }

    /// True if the head sensor overlaps at least one solid fixture
    pub fn head_blocked(&self) -> bool {
        self.head > 0
    }

    /// True if the left sensor overlaps at least one solid fixture
    pub fn on_left_wall(&self) -> bool {
        self.left_wall > 0
    }

    /// True if the right sensor overlaps at least one solid fixture
    pub fn on_right_wall(&self) -> bool {
        self.right_wall > 0
    }

    fn counter_mut(&mut self, role: SensorRole) -> &mut u32 {
        match role {
            SensorRole::Foot => &mut self.ground,
            SensorRole::Head => &mut self.head,
            SensorRole::LeftWall => &mut self.left_wall,
            SensorRole::RightWall => &mut self.right_wall,
        }
    }
}

/// Routes sensor begin/end contact events to per-player contact state
///
/// Owned by the physics world; events fire inline during the step. The
/// router is the sole mutator of contact counters.
#[derive(Default)]
pub struct ContactRouter {
    players: SlotMap<PlayerKey, ContactState>,
}

impl ContactRouter {
    /// Create an empty router
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a player, returning the key its sensors will carry
    pub fn register_player(&mut self) -> PlayerKey {
        self.players.insert(ContactState::default())
    }

    /// Remove a player's contact state
    pub fn unregister_player(&mut self, key: PlayerKey) {
        self.players.remove(key);
    }

    /// Get a player's contact state
    pub fn state(&self, key: PlayerKey) -> Option<&ContactState> {
        self.players.get(key)
    }

    /// Number of registered players
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// A sensor began overlapping a solid fixture
    pub fn begin_contact(&mut self, player: PlayerKey, role: SensorRole) {
        if let Some(state) = self.players.get_mut(player) {
            *state.counter_mut(role) += 1;
        }
    }

    /// A sensor stopped overlapping a solid fixture
    pub fn end_contact(&mut self, player: PlayerKey, role: SensorRole) {
        if let Some(state) = self.players.get_mut(player) {
            let counter = state.counter_mut(role);
            // Saturating: an end without a matching begin can only happen if
            // a body was removed mid-overlap and its pairs already flushed
            *counter = counter.saturating_sub(1);
        }
    }
}
