//! Shared capability of the flying bodies
//!
//! Drone and payload each own their physics handle and a spawn point; the
//! trait only supplies what the game loop needs from both.

use glam::Vec2;

use super::world::{BodyHandle, PhysicsWorld};

pub trait Entity {
    /// The body this entity owns
    fn handle(&self) -> BodyHandle;

    /// Spawn point in world coordinates
    fn spawn(&self) -> Vec2;

    /// Whether this entity is currently in a failing condition
    fn is_losing<W: PhysicsWorld + ?Sized>(&self, world: &W) -> bool;

    /// Put the body back at its spawn, upright and at rest
    fn reset<W: PhysicsWorld + ?Sized>(&self, world: &mut W) {
        let body = self.handle();
        world.set_position(body, self.spawn());
        world.set_angle(body, 0.0);
        world.set_linear_velocity(body, Vec2::ZERO);
        world.set_angular_velocity(body, 0.0);
    }

    fn position<W: PhysicsWorld + ?Sized>(&self, world: &W) -> Vec2 {
        world.position(self.handle())
    }

    fn position_x<W: PhysicsWorld + ?Sized>(&self, world: &W) -> f32 {
        self.position(world).x
    }

    fn position_y<W: PhysicsWorld + ?Sized>(&self, world: &W) -> f32 {
        self.position(world).y
    }
}
