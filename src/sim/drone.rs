//! The player's drone
//!
//! A flat hull with a thruster pod at each end. There is no direct torque
//! control: each button fires one pod along the hull's local up axis, so
//! attitude comes entirely from which side pushes harder.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;

use super::entity::Entity;
use super::world::{BodyHandle, BoxDef, DynamicBodyDef, PhysicsWorld};
use crate::consts::{DRONE_HULL_HALF, DRONE_POD_HALF, DRONE_POD_OFFSET};
use crate::normalize_angle_positive;
use crate::tuning::DroneTuning;

#[derive(Debug, Clone)]
pub struct Drone {
    body: BodyHandle,
    spawn: Vec2,
    thrust: f32,
    /// Local offset of the front pod; the back pod mirrors it in x
    pod_offset: Vec2,
}

impl Drone {
    /// Build the drone body at `spawn` (world coordinates)
    pub fn new<W: PhysicsWorld + ?Sized>(world: &mut W, spawn: Vec2, tuning: &DroneTuning) -> Self {
        let body = world.create_dynamic_body(DynamicBodyDef {
            position: spawn,
            angle: 0.0,
            angular_damping: tuning.angular_damping,
            linear_damping: tuning.linear_damping,
            allow_sleep: false,
        });
        let material = BoxDef {
            density: tuning.density,
            friction: tuning.friction,
        };
        let pod_offset = Vec2::new(DRONE_POD_OFFSET.0, DRONE_POD_OFFSET.1);
        let pod_half = Vec2::new(DRONE_POD_HALF.0, DRONE_POD_HALF.1);

        world.add_box_fixture(
            body,
            Vec2::new(DRONE_HULL_HALF.0, DRONE_HULL_HALF.1),
            Vec2::ZERO,
            material,
        );
        world.add_box_fixture(body, pod_half, pod_offset, material);
        world.add_box_fixture(body, pod_half, pod_offset * Vec2::new(-1.0, 1.0), material);

        Self {
            body,
            spawn,
            thrust: tuning.thrust,
            pod_offset,
        }
    }

    /// Fire the front (`left`) and/or back (`right`) thruster for this tick
    pub fn apply_thrust<W: PhysicsWorld + ?Sized>(&self, world: &mut W, left: bool, right: bool) {
        let impulse = world.world_vector(self.body, Vec2::new(0.0, self.thrust));
        if left {
            let point = world.world_point(self.body, self.pod_offset);
            world.apply_impulse(self.body, impulse, point);
        }
        if right {
            let point = world.world_point(self.body, self.pod_offset * Vec2::new(-1.0, 1.0));
            world.apply_impulse(self.body, impulse, point);
        }
    }

    pub fn angle<W: PhysicsWorld + ?Sized>(&self, world: &W) -> f32 {
        world.angle(self.body)
    }

    pub fn thrust(&self) -> f32 {
        self.thrust
    }
}

/// Tilted more than a quarter turn from upright, either way
pub fn is_tipped(angle: f32) -> bool {
    let a = normalize_angle_positive(angle);
    a > FRAC_PI_2 && a < PI + FRAC_PI_2
}

impl Entity for Drone {
    fn handle(&self) -> BodyHandle {
        self.body
    }

    fn spawn(&self) -> Vec2 {
        self.spawn
    }

    fn is_losing<W: PhysicsWorld + ?Sized>(&self, world: &W) -> bool {
        is_tipped(world.angle(self.body))
    }
}
