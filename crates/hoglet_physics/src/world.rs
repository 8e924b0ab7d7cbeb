//! Physics world and simulation

use std::collections::HashMap;

use crate::body::{BodyKey, RigidBody};
use crate::collision::{aabb_vs_aabb, circle_vs_aabb, circle_vs_circle, CollisionFilter, Contact};
use crate::contact::ContactRouter;
use crate::fixture::SensorTag;
use crate::material::PhysicsMaterial;
use crate::shapes::Shape;
use hoglet_math::Vec2;
use slotmap::SlotMap;

/// Maximum substeps for a bullet body in one step
const MAX_BULLET_SUBSTEPS: u32 = 16;

/// Configuration for the physics simulation
#[derive(Clone, Copy, Debug)]
pub struct PhysicsConfig {
    /// Gravity acceleration (applied to Y-axis, negative = down)
    pub gravity: f32,
    /// Passes over body-body contacts per step
    pub velocity_iterations: u32,
    /// Passes over static penetration resolution per (sub)step
    pub position_iterations: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: -9.8,
            velocity_iterations: 8,
            position_iterations: 3,
        }
    }
}

impl PhysicsConfig {
    /// Create a new physics config with the given gravity
    pub fn new(gravity: f32) -> Self {
        Self {
            gravity,
            ..Self::default()
        }
    }
}

/// One sensor fixture overlapping one solid fixture
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct SensorPair {
    sensor_body: BodyKey,
    sensor_fixture: usize,
    solid_body: BodyKey,
    solid_fixture: usize,
}

/// A static fixture snapshot in world space, collected once per step
#[derive(Clone, Copy)]
struct StaticShape {
    shape: Shape,
    material: PhysicsMaterial,
    filter: CollisionFilter,
}

/// The physics world containing all rigid bodies
///
/// Owns body memory (higher-level wrappers hold [`BodyKey`]s) and the
/// contact router. Contact begin/end events fire inline during
/// [`step`](PhysicsWorld::step).
pub struct PhysicsWorld {
    /// All rigid bodies in the world (using generational keys)
    bodies: SlotMap<BodyKey, RigidBody>,
    /// Sensor contact routing and per-player contact state
    contacts: ContactRouter,
    /// Sensor/solid pairs currently overlapping, with the sensor's tag
    sensor_overlaps: HashMap<SensorPair, SensorTag>,
    /// Physics configuration
    pub config: PhysicsConfig,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            contacts: ContactRouter::new(),
            sensor_overlaps: HashMap::new(),
            config,
        }
    }

    /// Add a body to the world and return its key
    pub fn add_body(&mut self, body: RigidBody) -> BodyKey {
        self.bodies.insert(body)
    }

    /// Remove a body from the world and return it
    ///
    /// Any sensor overlaps involving the body end immediately, so contact
    /// counters stay balanced.
    pub fn remove_body(&mut self, key: BodyKey) -> Option<RigidBody> {
        let mut retained = HashMap::with_capacity(self.sensor_overlaps.len());
        for (pair, tag) in self.sensor_overlaps.drain() {
            if pair.sensor_body == key || pair.solid_body == key {
                self.contacts.end_contact(tag.player, tag.role);
            } else {
                retained.insert(pair, tag);
            }
        }
        self.sensor_overlaps = retained;
        self.bodies.remove(key)
    }

    /// Get an immutable reference to a body by key
    pub fn get_body(&self, key: BodyKey) -> Option<&RigidBody> {
        self.bodies.get(key)
    }

    /// Get a mutable reference to a body by key
    pub fn get_body_mut(&mut self, key: BodyKey) -> Option<&mut RigidBody> {
        self.bodies.get_mut(key)
    }

    /// Get the number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Iterate over all body keys
    pub fn body_keys(&self) -> impl Iterator<Item = BodyKey> + '_ {
        self.bodies.keys()
    }

    /// The contact router (per-player contact state lives here)
    pub fn contacts(&self) -> &ContactRouter {
        &self.contacts
    }

    /// Mutable contact router, for player registration
    pub fn contacts_mut(&mut self) -> &mut ContactRouter {
        &mut self.contacts
    }

    /// Step the simulation forward by dt seconds using the configured
    /// iteration counts
    ///
    /// This performs:
    /// 1. Gravity application and velocity integration (bullet bodies are
    ///    substepped so they cannot tunnel through thin geometry)
    /// 2. Static penetration resolution, iterated `position_iterations`
    ///    times per (sub)step
    /// 3. Body-body collision resolution, up to `velocity_iterations` passes
    /// 4. Sensor overlap diffing, firing begin/end contact events inline
    pub fn step(&mut self, dt: f32) {
        self.step_with(
            dt,
            self.config.velocity_iterations,
            self.config.position_iterations,
        );
    }

    /// Step with explicit solver iteration counts
    pub fn step_with(&mut self, dt: f32, velocity_iterations: u32, position_iterations: u32) {
        let statics = self.collect_statics();
        let gravity = self.config.gravity;

        // Phase 1+2: integrate and resolve against static geometry
        for (_key, body) in &mut self.bodies {
            if body.is_static() {
                continue;
            }

            if body.affected_by_gravity {
                body.velocity.y += gravity * dt;
            }

            let substeps = if body.bullet {
                bullet_substeps(body, dt)
            } else {
                1
            };
            let sub_dt = dt / substeps as f32;

            for _ in 0..substeps {
                body.position += body.velocity * sub_dt;

                for _ in 0..position_iterations.max(1) {
                    if !Self::resolve_against_statics(body, &statics) {
                        break;
                    }
                }
            }
        }

        // Phase 3: body-body collisions
        for _ in 0..velocity_iterations.max(1) {
            if !self.resolve_body_collisions() {
                break;
            }
        }

        // Phase 4: sensor overlap transitions fire contact events
        self.update_sensor_contacts();
    }

    /// Snapshot world-space shapes of all solid fixtures on static bodies
    fn collect_statics(&self) -> Vec<StaticShape> {
        let mut statics = Vec::new();
        for (_key, body) in &self.bodies {
            if !body.is_static() {
                continue;
            }
            for fixture in body.fixtures.iter().filter(|f| !f.sensor) {
                statics.push(StaticShape {
                    shape: fixture.world_shape(body.position),
                    material: fixture.material,
                    filter: fixture.filter,
                });
            }
        }
        statics
    }

    /// Push a dynamic body out of any static fixture it penetrates
    ///
    /// Returns true if any contact was resolved.
    fn resolve_against_statics(body: &mut RigidBody, statics: &[StaticShape]) -> bool {
        let mut any = false;

        for i in 0..body.fixtures.len() {
            let fixture = body.fixtures[i];
            if fixture.sensor {
                continue;
            }

            for st in statics {
                if !fixture.filter.collides_with(&st.filter) {
                    continue;
                }

                let world_shape = fixture.world_shape(body.position);
                let Some(contact) = check_collision(&world_shape, &st.shape) else {
                    continue;
                };
                if !contact.is_colliding() {
                    continue;
                }

                body.apply_correction(contact.normal * contact.penetration);

                let combined = fixture.material.combine(&st.material);
                respond_to_contact(body, &contact, &combined);
                any = true;
            }
        }

        any
    }

    /// Resolve collisions between pairs of dynamic bodies
    ///
    /// Returns true if any contact was resolved.
    fn resolve_body_collisions(&mut self) -> bool {
        let keys: Vec<BodyKey> = self
            .bodies
            .iter()
            .filter(|(_, b)| !b.is_static())
            .map(|(k, _)| k)
            .collect();

        let mut any = false;

        for i in 0..keys.len() {
            for j in (i + 1)..keys.len() {
                if self.resolve_body_pair(keys[i], keys[j]) {
                    any = true;
                }
            }
        }

        any
    }

    /// Resolve the first colliding solid fixture pair between two bodies
    fn resolve_body_pair(&mut self, key_a: BodyKey, key_b: BodyKey) -> bool {
        let contact = {
            let body_a = &self.bodies[key_a];
            let body_b = &self.bodies[key_b];
            find_solid_contact(body_a, body_b)
        };

        let Some((contact, combined)) = contact else {
            return false;
        };

        // Split the correction by mass: the heavier body moves less.
        // Contact normal points from B toward A.
        let (mass_a, mass_b) = (self.bodies[key_a].mass, self.bodies[key_b].mass);
        let total_mass = mass_a + mass_b;
        let ratio_a = mass_b / total_mass;
        let ratio_b = mass_a / total_mass;

        let correction = contact.normal * contact.penetration;
        self.bodies[key_a].apply_correction(correction * ratio_a);
        self.bodies[key_b].apply_correction(-correction * ratio_b);

        // Velocity response for each body along its outward normal
        {
            let body_a = &mut self.bodies[key_a];
            respond_to_contact(body_a, &contact, &combined);
        }
        {
            let body_b = &mut self.bodies[key_b];
            let flipped = Contact::new(contact.point, -contact.normal, contact.penetration);
            respond_to_contact(body_b, &flipped, &combined);
        }

        true
    }

    /// Recompute the sensor/solid overlap set and fire begin/end events for
    /// every transition
    fn update_sensor_contacts(&mut self) {
        let mut current: HashMap<SensorPair, SensorTag> = HashMap::new();

        for (sensor_key, sensor_body) in &self.bodies {
            for (sensor_idx, sensor) in sensor_body.fixtures.iter().enumerate() {
                if !sensor.sensor {
                    continue;
                }
                let Some(tag) = sensor.tag else {
                    // Sensors are always constructed through Fixture::sensor,
                    // which tags them; a missing tag is a construction bug
                    debug_assert!(false, "sensor fixture without a tag");
                    continue;
                };
                let sensor_shape = sensor.world_shape(sensor_body.position);

                for (solid_key, solid_body) in &self.bodies {
                    if solid_key == sensor_key {
                        continue;
                    }
                    for (solid_idx, solid) in solid_body.fixtures.iter().enumerate() {
                        if solid.sensor || !sensor.filter.collides_with(&solid.filter) {
                            continue;
                        }
                        let solid_shape = solid.world_shape(solid_body.position);
                        if shapes_overlap(&sensor_shape, &solid_shape) {
                            current.insert(
                                SensorPair {
                                    sensor_body: sensor_key,
                                    sensor_fixture: sensor_idx,
                                    solid_body: solid_key,
                                    solid_fixture: solid_idx,
                                },
                                tag,
                            );
                        }
                    }
                }
            }
        }

        for (pair, tag) in &current {
            if !self.sensor_overlaps.contains_key(pair) {
                self.contacts.begin_contact(tag.player, tag.role);
            }
        }
        for (pair, tag) in &self.sensor_overlaps {
            if !current.contains_key(pair) {
                self.contacts.end_contact(tag.player, tag.role);
            }
        }

        self.sensor_overlaps = current;
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Substep count so a bullet never travels more than half its smallest
/// solid extent per substep
fn bullet_substeps(body: &RigidBody, dt: f32) -> u32 {
    let travel = body.velocity.length() * dt;
    let max_travel = (body.min_solid_extent() * 0.5).max(1e-4);
    ((travel / max_travel).ceil() as u32).clamp(1, MAX_BULLET_SUBSTEPS)
}

/// Dispatch a shape pair to the right narrowphase test
///
/// The returned normal pushes `a` out of `b`.
fn check_collision(a: &Shape, b: &Shape) -> Option<Contact> {
    match (a, b) {
        (Shape::Aabb(a), Shape::Aabb(b)) => aabb_vs_aabb(a, b),
        (Shape::Circle(c), Shape::Aabb(b)) => circle_vs_aabb(c, b),
        (Shape::Aabb(a), Shape::Circle(c)) => {
            // circle_vs_aabb pushes the circle out; flip for the AABB side
            circle_vs_aabb(c, a).map(|mut contact| {
                contact.normal = -contact.normal;
                contact
            })
        }
        (Shape::Circle(a), Shape::Circle(b)) => circle_vs_circle(a, b),
    }
}

/// Overlap test used for sensor fixtures
fn shapes_overlap(a: &Shape, b: &Shape) -> bool {
    check_collision(a, b).is_some_and(|c| c.is_colliding())
}

/// Kill the into-contact velocity component (with restitution) and apply
/// tangential friction
fn respond_to_contact(body: &mut RigidBody, contact: &Contact, material: &PhysicsMaterial) {
    let velocity_along_normal = body.velocity.dot(contact.normal);
    if velocity_along_normal >= 0.0 {
        return;
    }

    let normal_velocity = contact.normal * velocity_along_normal;
    body.velocity -= normal_velocity * (1.0 + material.restitution);

    let tangent_velocity = body.velocity - contact.normal * body.velocity.dot(contact.normal);
    if tangent_velocity.length() > 0.0001 {
        let friction_factor = 1.0 - material.friction;
        body.velocity =
            contact.normal * body.velocity.dot(contact.normal) + tangent_velocity * friction_factor;
    }
}

/// Find a colliding solid fixture pair between two bodies, along with the
/// combined material
///
/// The returned contact normal points from `b` toward `a`.
fn find_solid_contact(a: &RigidBody, b: &RigidBody) -> Option<(Contact, PhysicsMaterial)> {
    for fa in a.fixtures.iter().filter(|f| !f.sensor) {
        for fb in b.fixtures.iter().filter(|f| !f.sensor) {
            if !fa.filter.collides_with(&fb.filter) {
                continue;
            }
            let shape_a = fa.world_shape(a.position);
            let shape_b = fb.world_shape(b.position);
            if let Some(contact) = check_collision(&shape_a, &shape_b) {
                if contact.is_colliding() {
                    return Some((contact, fa.material.combine(&fb.material)));
                }
            }
        }
    }
    None
}
