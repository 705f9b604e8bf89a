//! The towed payload
//!
//! There is no joint between payload and drone. The "tether" is purely a rule:
//! drift further than `max_dist` from the drone and the run starts failing.

use glam::Vec2;

use super::entity::Entity;
use super::world::{BodyHandle, BoxDef, DynamicBodyDef, PhysicsWorld};
use crate::tuning::PayloadTuning;

#[derive(Debug, Clone)]
pub struct Payload {
    body: BodyHandle,
    spawn: Vec2,
    max_dist: f32,
    /// The drone's body; read only, never destroyed from here
    leader: BodyHandle,
}

impl Payload {
    /// Build the payload body at `spawn` (world coordinates), leashed to `leader`
    pub fn new<W: PhysicsWorld + ?Sized>(
        world: &mut W,
        spawn: Vec2,
        tuning: &PayloadTuning,
        leader: BodyHandle,
    ) -> Self {
        let body = world.create_dynamic_body(DynamicBodyDef {
            position: spawn,
            allow_sleep: false,
            ..Default::default()
        });
        world.add_box_fixture(
            body,
            Vec2::splat(tuning.half_size),
            Vec2::ZERO,
            BoxDef {
                density: tuning.density,
                friction: tuning.friction,
            },
        );
        Self {
            body,
            spawn,
            max_dist: tuning.max_dist,
            leader,
        }
    }

    pub fn max_dist(&self) -> f32 {
        self.max_dist
    }

    /// Squared distance to the drone
    pub fn distance_sq<W: PhysicsWorld + ?Sized>(&self, world: &W) -> f32 {
        world
            .position(self.body)
            .distance_squared(world.position(self.leader))
    }
}

impl Entity for Payload {
    fn handle(&self) -> BodyHandle {
        self.body
    }

    fn spawn(&self) -> Vec2 {
        self.spawn
    }

    fn is_losing<W: PhysicsWorld + ?Sized>(&self, world: &W) -> bool {
        self.distance_sq(world) >= self.max_dist * self.max_dist
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::sandbox::SandboxWorld;

    fn leashed(max_dist: f32) -> (SandboxWorld, BodyHandle, Payload) {
        let mut world = SandboxWorld::new(Vec2::ZERO);
        let leader = world.create_dynamic_body(DynamicBodyDef::default());
        let tuning = PayloadTuning {
            max_dist,
            ..Default::default()
        };
        let payload = Payload::new(&mut world, Vec2::ZERO, &tuning, leader);
        (world, leader, payload)
    }

    #[test]
    fn test_beyond_leash_is_losing() {
        let (mut world, _, payload) = leashed(4.0);
        assert_eq!(payload.max_dist(), 4.0);
        world.set_position(payload.handle(), Vec2::new(4.1, 0.0));
        assert!((payload.distance_sq(&world) - 16.81).abs() < 1e-3);
        assert!(payload.is_losing(&world));
    }

    #[test]
    fn test_exactly_at_leash_is_losing() {
        let (mut world, _, payload) = leashed(4.0);
        world.set_position(payload.handle(), Vec2::new(0.0, -4.0));
        assert!(payload.is_losing(&world));
    }

    #[test]
    fn test_within_leash_is_fine() {
        let (mut world, leader, payload) = leashed(4.0);
        world.set_position(leader, Vec2::new(10.0, 10.0));
        world.set_position(payload.handle(), Vec2::new(12.0, 11.0));
        assert!(!payload.is_losing(&world));
    }

    #[test]
    fn test_reset_leaves_leader_alone() {
        let (mut world, leader, payload) = leashed(4.0);
        world.set_position(leader, Vec2::new(5.0, 5.0));
        world.set_position(payload.handle(), Vec2::new(9.0, 9.0));
        world.set_linear_velocity(payload.handle(), Vec2::new(1.0, 1.0));
        payload.reset(&mut world);
        assert_eq!(payload.position(&world), Vec2::ZERO);
        assert_eq!(world.linear_velocity(payload.handle()), Vec2::ZERO);
        assert_eq!(world.position(leader), Vec2::new(5.0, 5.0));
    }
}
