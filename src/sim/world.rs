//! Physics collaborator interface
//!
//! The game core never integrates bodies itself. It only needs a world that can
//! build static edge chains and dynamic box compounds, push impulses, and report
//! poses back. Handles are plain ids owned by whoever created the body; using a
//! handle after `destroy_body` is a programmer error and implementations panic.

use glam::Vec2;

/// Opaque body id handed out by a [`PhysicsWorld`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyHandle(pub u32);

/// Material for a static edge fixture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeDef {
    pub density: f32,
    pub restitution: f32,
}

/// Dynamic body settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicBodyDef {
    pub position: Vec2,
    pub angle: f32,
    pub angular_damping: f32,
    pub linear_damping: f32,
    pub allow_sleep: bool,
}

impl Default for DynamicBodyDef {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            angle: 0.0,
            angular_damping: 0.0,
            linear_damping: 0.0,
            allow_sleep: true,
        }
    }
}

/// Material for a box fixture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxDef {
    pub density: f32,
    pub friction: f32,
}

/// Everything the game core asks of the physics simulation
pub trait PhysicsWorld {
    /// Create a static body whose fixtures are expressed relative to `origin`
    fn create_static_body(&mut self, origin: Vec2) -> BodyHandle;
    /// Attach a straight edge (body-local endpoints)
    fn add_edge_fixture(&mut self, body: BodyHandle, a: Vec2, b: Vec2, def: EdgeDef);
    fn create_dynamic_body(&mut self, def: DynamicBodyDef) -> BodyHandle;
    /// Attach an axis-aligned (in body space) box centred at `offset`
    fn add_box_fixture(&mut self, body: BodyHandle, half_extents: Vec2, offset: Vec2, def: BoxDef);
    /// Apply `impulse` (world space) at `point` (world space)
    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec2, point: Vec2);

    fn position(&self, body: BodyHandle) -> Vec2;
    fn angle(&self, body: BodyHandle) -> f32;
    fn linear_velocity(&self, body: BodyHandle) -> Vec2;
    fn angular_velocity(&self, body: BodyHandle) -> f32;

    fn set_position(&mut self, body: BodyHandle, position: Vec2);
    fn set_angle(&mut self, body: BodyHandle, angle: f32);
    fn set_linear_velocity(&mut self, body: BodyHandle, velocity: Vec2);
    fn set_angular_velocity(&mut self, body: BodyHandle, omega: f32);

    fn destroy_body(&mut self, body: BodyHandle);

    /// Body-local direction rotated into world space
    fn world_vector(&self, body: BodyHandle, local: Vec2) -> Vec2 {
        Vec2::from_angle(self.angle(body)).rotate(local)
    }

    /// Body-local point transformed into world space
    fn world_point(&self, body: BodyHandle, local: Vec2) -> Vec2 {
        self.position(body) + self.world_vector(body, local)
    }
}
