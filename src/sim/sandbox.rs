//! Minimal reference physics world
//!
//! Enough rigid-body behaviour to fly the drone headless and to exercise the
//! game core in tests: gravity, damping, impulses with torque, and circle vs
//! edge contact against static walls. Dynamic bodies do not collide with each
//! other, and bodies never sleep.

use std::collections::BTreeMap;

use glam::Vec2;

use super::world::{BodyHandle, BoxDef, DynamicBodyDef, EdgeDef, PhysicsWorld};

/// Mass used for dynamic bodies without dense fixtures
const DEFAULT_MASS: f32 = 1.0;

#[derive(Debug, Clone)]
enum Shape {
    Edge { a: Vec2, b: Vec2, restitution: f32 },
    Box { half: Vec2, offset: Vec2, density: f32 },
}

#[derive(Debug, Clone)]
struct Body {
    dynamic: bool,
    position: Vec2,
    angle: f32,
    velocity: Vec2,
    omega: f32,
    linear_damping: f32,
    angular_damping: f32,
    shapes: Vec<Shape>,
    mass: f32,
    inertia: f32,
    /// Bounding radius used for wall contact
    radius: f32,
}

impl Body {
    fn new(dynamic: bool, position: Vec2) -> Self {
        Self {
            dynamic,
            position,
            angle: 0.0,
            velocity: Vec2::ZERO,
            omega: 0.0,
            linear_damping: 0.0,
            angular_damping: 0.0,
            shapes: Vec::new(),
            mass: DEFAULT_MASS,
            inertia: DEFAULT_MASS,
            radius: 0.0,
        }
    }

    /// Recompute mass, rotational inertia (about the body origin) and bounds
    fn update_mass(&mut self) {
        let mut mass = 0.0;
        let mut inertia = 0.0;
        let mut radius: f32 = 0.0;
        for shape in &self.shapes {
            if let Shape::Box {
                half,
                offset,
                density,
            } = *shape
            {
                let m = density * 4.0 * half.x * half.y;
                mass += m;
                inertia += m * (half.length_squared() * 4.0) / 12.0 + m * offset.length_squared();
                radius = radius.max(offset.length() + half.length());
            }
        }
        if mass > 0.0 {
            self.mass = mass;
            self.inertia = inertia.max(f32::EPSILON);
        } else {
            self.mass = DEFAULT_MASS;
            self.inertia = DEFAULT_MASS;
        }
        self.radius = radius;
    }
}

/// A world edge in world space
#[derive(Debug, Clone, Copy)]
struct WorldEdge {
    a: Vec2,
    b: Vec2,
    restitution: f32,
}

/// Reference implementation of [`PhysicsWorld`]
#[derive(Debug, Clone)]
pub struct SandboxWorld {
    gravity: Vec2,
    /// Keyed by handle id so iteration order is stable
    bodies: BTreeMap<u32, Body>,
    next_id: u32,
}

impl Default for SandboxWorld {
    fn default() -> Self {
        let (gx, gy) = crate::consts::GRAVITY;
        Self::new(Vec2::new(gx, gy))
    }
}

impl SandboxWorld {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity,
            bodies: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Number of live bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Whether `body` is still alive
    pub fn contains(&self, body: BodyHandle) -> bool {
        self.bodies.contains_key(&body.0)
    }

    /// World-space endpoints of every edge fixture on `body`
    pub fn edges(&self, body: BodyHandle) -> Vec<(Vec2, Vec2)> {
        let b = self.body(body);
        let rot = Vec2::from_angle(b.angle);
        b.shapes
            .iter()
            .filter_map(|shape| match *shape {
                Shape::Edge { a, b: end, .. } => {
                    Some((b.position + rot.rotate(a), b.position + rot.rotate(end)))
                }
                Shape::Box { .. } => None,
            })
            .collect()
    }

    /// Mass of a body as computed from its fixtures
    pub fn mass(&self, body: BodyHandle) -> f32 {
        self.body(body).mass
    }

    /// Number of fixtures attached to `body`
    pub fn fixture_count(&self, body: BodyHandle) -> usize {
        self.body(body).shapes.len()
    }

    /// Integrate one step of `dt` seconds
    pub fn step(&mut self, dt: f32) {
        // Walls can't be read while dynamic bodies are borrowed mutably, so
        // flatten them first
        let edges: Vec<WorldEdge> = self
            .bodies
            .values()
            .filter(|b| !b.dynamic)
            .flat_map(|b| {
                let rot = Vec2::from_angle(b.angle);
                let origin = b.position;
                b.shapes.iter().filter_map(move |shape| match *shape {
                    Shape::Edge { a, b, restitution } => Some(WorldEdge {
                        a: origin + rot.rotate(a),
                        b: origin + rot.rotate(b),
                        restitution,
                    }),
                    Shape::Box { .. } => None,
                })
            })
            .collect();

        let gravity = self.gravity;
        for body in self.bodies.values_mut().filter(|b| b.dynamic) {
            body.velocity += gravity * dt;
            body.velocity *= 1.0 / (1.0 + dt * body.linear_damping);
            body.omega *= 1.0 / (1.0 + dt * body.angular_damping);

            body.position += body.velocity * dt;
            body.angle += body.omega * dt;

            if body.radius > 0.0 {
                for edge in &edges {
                    resolve_edge_contact(body, edge);
                }
            }
        }
    }

    fn body(&self, body: BodyHandle) -> &Body {
        self.bodies
            .get(&body.0)
            .unwrap_or_else(|| panic!("physics: unknown body {body:?}"))
    }

    fn body_mut(&mut self, body: BodyHandle) -> &mut Body {
        self.bodies
            .get_mut(&body.0)
            .unwrap_or_else(|| panic!("physics: unknown body {body:?}"))
    }

    fn insert(&mut self, body: Body) -> BodyHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.bodies.insert(id, body);
        BodyHandle(id)
    }
}

/// Closest point to `p` on segment `a`-`b`
fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < 1e-8 {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Push a body's bounding circle out of an edge and reflect its normal velocity
fn resolve_edge_contact(body: &mut Body, edge: &WorldEdge) {
    let closest = closest_point_on_segment(body.position, edge.a, edge.b);
    let offset = body.position - closest;
    let dist = offset.length();
    if dist >= body.radius {
        return;
    }

    let normal = if dist > 1e-6 {
        offset / dist
    } else {
        // Centre on the edge: pick the perpendicular facing back along the motion
        let perp = (edge.b - edge.a).perp().normalize_or_zero();
        if perp.dot(body.velocity) > 0.0 { -perp } else { perp }
    };

    body.position += normal * (body.radius - dist);

    let vn = body.velocity.dot(normal);
    if vn < 0.0 {
        body.velocity -= (1.0 + edge.restitution) * vn * normal;
    }
}

impl PhysicsWorld for SandboxWorld {
    fn create_static_body(&mut self, origin: Vec2) -> BodyHandle {
        self.insert(Body::new(false, origin))
    }

    fn add_edge_fixture(&mut self, body: BodyHandle, a: Vec2, b: Vec2, def: EdgeDef) {
        // Edges never contribute mass, whatever their density
        self.body_mut(body).shapes.push(Shape::Edge {
            a,
            b,
            restitution: def.restitution,
        });
    }

    fn create_dynamic_body(&mut self, def: DynamicBodyDef) -> BodyHandle {
        let mut body = Body::new(true, def.position);
        body.angle = def.angle;
        body.linear_damping = def.linear_damping;
        body.angular_damping = def.angular_damping;
        self.insert(body)
    }

    fn add_box_fixture(&mut self, body: BodyHandle, half_extents: Vec2, offset: Vec2, def: BoxDef) {
        let b = self.body_mut(body);
        b.shapes.push(Shape::Box {
            half: half_extents,
            offset,
            density: def.density,
        });
        b.update_mass();
    }

    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec2, point: Vec2) {
        let b = self.body_mut(body);
        if !b.dynamic {
            return;
        }
        b.velocity += impulse / b.mass;
        b.omega += (point - b.position).perp_dot(impulse) / b.inertia;
    }

    fn position(&self, body: BodyHandle) -> Vec2 {
        self.body(body).position
    }

    fn angle(&self, body: BodyHandle) -> f32 {
        self.body(body).angle
    }

    fn linear_velocity(&self, body: BodyHandle) -> Vec2 {
        self.body(body).velocity
    }

    fn angular_velocity(&self, body: BodyHandle) -> f32 {
        self.body(body).omega
    }

    fn set_position(&mut self, body: BodyHandle, position: Vec2) {
        self.body_mut(body).position = position;
    }

    fn set_angle(&mut self, body: BodyHandle, angle: f32) {
        self.body_mut(body).angle = angle;
    }

    fn set_linear_velocity(&mut self, body: BodyHandle, velocity: Vec2) {
        self.body_mut(body).velocity = velocity;
    }

    fn set_angular_velocity(&mut self, body: BodyHandle, omega: f32) {
        self.body_mut(body).omega = omega;
    }

    fn destroy_body(&mut self, body: BodyHandle) {
        if self.bodies.remove(&body.0).is_none() {
            panic!("physics: destroying unknown body {body:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box(world: &mut SandboxWorld, position: Vec2) -> BodyHandle {
        let body = world.create_dynamic_body(DynamicBodyDef {
            position,
            ..Default::default()
        });
        world.add_box_fixture(
            body,
            Vec2::splat(0.5),
            Vec2::ZERO,
            BoxDef {
                density: 1.0,
                friction: 0.3,
            },
        );
        body
    }

    #[test]
    fn test_box_mass_from_density() {
        let mut world = SandboxWorld::new(Vec2::ZERO);
        let body = unit_box(&mut world, Vec2::ZERO);
        assert!((world.mass(body) - 1.0).abs() < 1e-6);
        assert_eq!(world.fixture_count(body), 1);
    }

    #[test]
    fn test_gravity_pulls_dynamic_bodies_only() {
        let mut world = SandboxWorld::new(Vec2::new(0.0, -10.0));
        let ground = world.create_static_body(Vec2::new(0.0, -100.0));
        let body = unit_box(&mut world, Vec2::ZERO);
        world.step(0.1);
        assert!(world.linear_velocity(body).y < 0.0);
        assert!(world.position(body).y < 0.0);
        assert_eq!(world.position(ground), Vec2::new(0.0, -100.0));
    }

    #[test]
    fn test_off_centre_impulse_spins() {
        let mut world = SandboxWorld::new(Vec2::ZERO);
        let body = unit_box(&mut world, Vec2::ZERO);
        // Upward push on the right side turns the body counter-clockwise
        world.apply_impulse(body, Vec2::new(0.0, 1.0), Vec2::new(0.5, 0.0));
        assert!(world.angular_velocity(body) > 0.0);
        assert!((world.linear_velocity(body) - Vec2::new(0.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_damping_slows_bodies() {
        let mut world = SandboxWorld::new(Vec2::ZERO);
        let body = world.create_dynamic_body(DynamicBodyDef {
            linear_damping: 1.0,
            angular_damping: 1.0,
            ..Default::default()
        });
        world.set_linear_velocity(body, Vec2::new(4.0, 0.0));
        world.set_angular_velocity(body, 2.0);
        world.step(0.5);
        assert!(world.linear_velocity(body).x < 4.0);
        assert!(world.angular_velocity(body) < 2.0);
    }

    #[test]
    fn test_floor_edge_stops_and_bounces() {
        let mut world = SandboxWorld::new(Vec2::new(0.0, -10.0));
        let floor = world.create_static_body(Vec2::ZERO);
        world.add_edge_fixture(
            floor,
            Vec2::new(-10.0, 0.0),
            Vec2::new(10.0, 0.0),
            EdgeDef {
                density: 0.0,
                restitution: 0.5,
            },
        );
        let body = unit_box(&mut world, Vec2::new(0.0, 2.0));
        for _ in 0..240 {
            world.step(1.0 / 60.0);
            assert!(world.position(body).y > 0.0);
        }
        assert_eq!(world.edges(floor).len(), 1);
    }

    #[test]
    fn test_destroy_removes_body() {
        let mut world = SandboxWorld::default();
        let body = unit_box(&mut world, Vec2::ZERO);
        assert!(world.contains(body));
        world.destroy_body(body);
        assert!(!world.contains(body));
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    #[should_panic(expected = "unknown body")]
    fn test_stale_handle_panics() {
        let mut world = SandboxWorld::default();
        let body = unit_box(&mut world, Vec2::ZERO);
        world.destroy_body(body);
        let _ = world.position(body);
    }
}
