//! Procedural corridor generation
//!
//! The corridor is two polylines, floor and ceiling, spanning `0..width` in
//! corridor-local x. The opening between them drifts up and down as a bounded
//! random walk and gets narrower and more erratic towards the far end. Both ends
//! are pinned to the full wall height so the only way through is the tunnel.

use glam::Vec2;

use super::rng::{UniformSource, increasing_rand_default};
use super::world::{BodyHandle, EdgeDef, PhysicsWorld};
use crate::consts::{DRIFT_STEP, MAX_SEGMENTS, WALL_DENSITY, WALL_RESTITUTION};

/// Generated wall geometry, corridor-local coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Corridor {
    pub width: f32,
    pub height: f32,
    pub floor: Vec<Vec2>,
    pub ceiling: Vec<Vec2>,
}

/// Generate a corridor of `segments` wall segments
///
/// `segments` below 1 is treated as 1, which yields a single straight segment
/// on each side and no opening variation. Counts above [`MAX_SEGMENTS`] are capped.
pub fn generate_corridor<R: UniformSource + ?Sized>(
    segments: usize,
    width: f32,
    height: f32,
    rng: &mut R,
) -> Corridor {
    let segments = segments.clamp(1, MAX_SEGMENTS);
    let mut floor = Vec::with_capacity(segments + 1);
    let mut ceiling = Vec::with_capacity(segments + 1);

    floor.push(Vec2::new(0.0, 0.0));
    ceiling.push(Vec2::new(0.0, height));

    // Opening centre drift, -1 (low) to 1 (high)
    let mut center: f32 = 0.0;
    for i in 1..segments {
        let progress = i as f32 / segments as f32;
        let gap = increasing_rand_default(rng, progress) * height / 2.0;
        let center_y = height / 2.0 + center * height / 4.0;
        let x = i as f32 * width / segments as f32;

        floor.push(Vec2::new(x, center_y - gap / 2.0));
        ceiling.push(Vec2::new(x, center_y + gap / 2.0));

        center = (center + rng.next_signed() * DRIFT_STEP).clamp(-1.0, 1.0);
    }

    floor.push(Vec2::new(width, 0.0));
    ceiling.push(Vec2::new(width, height));

    let corridor = Corridor {
        width,
        height,
        floor,
        ceiling,
    };
    log::debug!(
        "Corridor: {} segments, {}x{}, narrowest opening {:.2}",
        segments,
        width,
        height,
        corridor.narrowest_opening()
    );
    corridor
}

impl Corridor {
    /// Number of wall segments per side
    pub fn segment_count(&self) -> usize {
        self.floor.len().saturating_sub(1)
    }

    /// Floor and ceiling height at corridor-local `x` (linear between points)
    pub fn opening_at(&self, x: f32) -> (f32, f32) {
        (interpolate(&self.floor, x), interpolate(&self.ceiling, x))
    }

    /// Smallest interior gap between matching floor and ceiling points
    pub fn narrowest_opening(&self) -> f32 {
        let n = self.floor.len();
        if n <= 2 {
            return self.height;
        }
        self.floor[1..n - 1]
            .iter()
            .zip(&self.ceiling[1..n - 1])
            .map(|(f, c)| c.y - f.y)
            .fold(f32::INFINITY, f32::min)
    }

    /// Register the corridor as four static bodies, shifted left by `width / 2`
    pub fn build<W: PhysicsWorld + ?Sized>(&self, world: &mut W) -> Walls {
        let origin = Vec2::new(-self.width / 2.0, 0.0);
        let def = EdgeDef {
            density: WALL_DENSITY,
            restitution: WALL_RESTITUTION,
        };

        let chain = |world: &mut W, points: &[Vec2]| {
            let body = world.create_static_body(origin);
            for pair in points.windows(2) {
                world.add_edge_fixture(body, pair[0], pair[1], def);
            }
            body
        };
        let floor = chain(&mut *world, &self.floor);
        let ceiling = chain(&mut *world, &self.ceiling);
        let left = chain(
            &mut *world,
            &[Vec2::new(0.0, 0.0), Vec2::new(0.0, self.height)],
        );
        let right = chain(
            world,
            &[Vec2::new(self.width, 0.0), Vec2::new(self.width, self.height)],
        );

        Walls {
            floor,
            ceiling,
            left,
            right,
        }
    }
}

fn interpolate(points: &[Vec2], x: f32) -> f32 {
    let Some(first) = points.first() else {
        return 0.0;
    };
    if x <= first.x {
        return first.y;
    }
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if x <= b.x {
            let span = b.x - a.x;
            if span <= 0.0 {
                return b.y;
            }
            return a.y + (b.y - a.y) * (x - a.x) / span;
        }
    }
    points.last().map_or(0.0, |p| p.y)
}

/// The four static wall bodies of a built corridor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walls {
    pub floor: BodyHandle,
    pub ceiling: BodyHandle,
    pub left: BodyHandle,
    pub right: BodyHandle,
}

impl Walls {
    pub fn handles(&self) -> [BodyHandle; 4] {
        [self.floor, self.ceiling, self.left, self.right]
    }

    /// Destroy all four bodies together
    pub fn destroy<W: PhysicsWorld + ?Sized>(self, world: &mut W) {
        for handle in self.handles() {
            world.destroy_body(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{FixedSequence, seeded_source};
    use crate::sim::sandbox::SandboxWorld;
    use proptest::prelude::*;

    fn check_shape(c: &Corridor, segments: usize) {
        assert_eq!(c.floor.len(), segments + 1);
        assert_eq!(c.ceiling.len(), segments + 1);
        assert_eq!(c.floor[0], Vec2::new(0.0, 0.0));
        assert_eq!(c.ceiling[0], Vec2::new(0.0, c.height));
        assert_eq!(c.floor[segments], Vec2::new(c.width, 0.0));
        assert_eq!(c.ceiling[segments], Vec2::new(c.width, c.height));
        for side in [&c.floor, &c.ceiling] {
            for pair in side.windows(2) {
                assert!(pair[0].x < pair[1].x, "x must strictly increase");
            }
        }
        for (f, ceil) in c.floor.iter().zip(&c.ceiling) {
            assert_eq!(f.x, ceil.x);
            assert!(f.y < ceil.y, "opening collapsed at x={}", f.x);
        }
    }

    #[test]
    fn test_corridor_shape_fixed_rng() {
        let mut rng = FixedSequence::new(vec![0.1, 0.9, 0.4, 0.7, 0.0]);
        let c = generate_corridor(20, 60.0, 40.0, &mut rng);
        check_shape(&c, 20);
    }

    #[test]
    fn test_zero_segments_coerced_to_one() {
        let mut rng = FixedSequence::constant(0.5);
        let c = generate_corridor(0, 10.0, 5.0, &mut rng);
        check_shape(&c, 1);
        assert_eq!(c.segment_count(), 1);
        assert_eq!(c.narrowest_opening(), 5.0);
    }

    #[test]
    fn test_segment_count_is_capped() {
        let mut rng = FixedSequence::constant(0.5);
        let c = generate_corridor(usize::MAX, 10.0, 5.0, &mut rng);
        assert_eq!(c.segment_count(), MAX_SEGMENTS);
        assert_eq!(c.floor[MAX_SEGMENTS], Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_first_interior_point_is_nearly_full_gap() {
        // Zero samples: progress-weighted term vanishes, center walks downward
        let mut rng = FixedSequence::constant(0.0);
        let c = generate_corridor(100, 300.0, 40.0, &mut rng);
        // i = 1: gap = (0.8 * 0.99 + 0.2) * 20, centred at mid-height
        let expected_gap = (0.8 * 0.99 + 0.2) * 20.0;
        assert!((c.ceiling[1].y - c.floor[1].y - expected_gap).abs() < 1e-3);
        assert!(((c.ceiling[1].y + c.floor[1].y) / 2.0 - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_drift_clamps_at_lower_bound() {
        // Every step pushes the centre down by a third; it must stop at -1
        let mut rng = FixedSequence::constant(0.0);
        let c = generate_corridor(50, 150.0, 40.0, &mut rng);
        let last = c.floor.len() - 2;
        let center_y = (c.floor[last].y + c.ceiling[last].y) / 2.0;
        assert!((center_y - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_opening_at_interpolates() {
        let c = Corridor {
            width: 10.0,
            height: 10.0,
            floor: vec![Vec2::new(0.0, 0.0), Vec2::new(5.0, 2.0), Vec2::new(10.0, 0.0)],
            ceiling: vec![
                Vec2::new(0.0, 10.0),
                Vec2::new(5.0, 8.0),
                Vec2::new(10.0, 10.0),
            ],
        };
        let (lo, hi) = c.opening_at(2.5);
        assert!((lo - 1.0).abs() < 1e-6);
        assert!((hi - 9.0).abs() < 1e-6);
        assert_eq!(c.opening_at(-3.0), (0.0, 10.0));
        assert_eq!(c.opening_at(42.0), (0.0, 10.0));
        assert_eq!(c.narrowest_opening(), 6.0);
    }

    #[test]
    fn test_build_registers_four_walls() {
        let mut world = SandboxWorld::default();
        let mut rng = seeded_source(3);
        let c = generate_corridor(10, 30.0, 20.0, &mut rng);
        let walls = c.build(&mut world);
        assert_eq!(world.body_count(), 4);
        assert_eq!(world.edges(walls.floor).len(), 10);
        assert_eq!(world.edges(walls.ceiling).len(), 10);

        // Placement shifts everything left by half the width
        let (a, b) = world.edges(walls.left)[0];
        assert_eq!(a, Vec2::new(-15.0, 0.0));
        assert_eq!(b, Vec2::new(-15.0, 20.0));
        let (a, _) = world.edges(walls.right)[0];
        assert_eq!(a, Vec2::new(15.0, 0.0));

        walls.destroy(&mut world);
        assert_eq!(world.body_count(), 0);
    }

    proptest! {
        #[test]
        fn prop_corridor_is_navigable(
            seed in any::<u64>(),
            segments in 1usize..400,
            width in 3.0f32..2000.0,
            height in 1.0f32..200.0,
        ) {
            let mut rng = seeded_source(seed);
            let c = generate_corridor(segments, width, height, &mut rng);
            prop_assert_eq!(c.floor.len(), segments + 1);
            prop_assert_eq!(c.ceiling.len(), segments + 1);
            prop_assert_eq!(c.floor[0], Vec2::new(0.0, 0.0));
            prop_assert_eq!(c.ceiling[segments], Vec2::new(width, height));
            for pair in c.floor.windows(2) {
                prop_assert!(pair[0].x < pair[1].x);
            }
            for i in 1..segments {
                let (f, top) = (c.floor[i], c.ceiling[i]);
                let gap = top.y - f.y;
                let mid = (top.y + f.y) / 2.0;
                prop_assert!(gap > 0.0);
                prop_assert!(gap >= 0.1 * height - 1e-3 && gap <= 0.5 * height + 1e-3);
                prop_assert!(mid >= height / 4.0 - 1e-3 && mid <= 0.75 * height + 1e-3);
            }
        }
    }
}
