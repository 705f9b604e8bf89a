//! Tunnel Drone - A side-scrolling tunnel flight game core
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (corridor generation, entities, game state machine)
//! - `tuning`: Data-driven game balance
//! - `ui`: Structured status values for the display collaborator
//! - `error`: Configuration errors

pub mod error;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use error::ConfigError;
pub use tuning::Tuning;
pub use ui::{Status, StatusText};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, seconds)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Same timestep in the milliseconds the state machine counts in
    pub const SIM_DT_MS: f32 = 1000.0 / 60.0;

    /// Corridor dimensions (world units)
    pub const CORRIDOR_WIDTH: f32 = 1020.0;
    pub const CORRIDOR_HEIGHT: f32 = 40.0;
    /// One wall segment every this many units of width
    pub const SEGMENT_SPACING: f32 = 3.0;
    /// Upper bound on wall segments per side
    pub const MAX_SEGMENTS: usize = 100_000;
    /// Wall edges bounce but carry no mass
    pub const WALL_RESTITUTION: f32 = 0.4;
    pub const WALL_DENSITY: f32 = 0.0;
    /// Scale of `increasing_rand`; keeps the narrowest gap at `1 - scale`
    pub const GAP_SCALE: f32 = 0.8;
    /// Largest per-segment step of the opening's drift
    pub const DRIFT_STEP: f32 = 1.0 / 3.0;

    /// Drone spawn, corridor-local (x measured from the left cap)
    pub const DRONE_START_X: f32 = 4.0;
    pub const DRONE_START_Y: f32 = CORRIDOR_HEIGHT / 2.0;
    /// Impulse per thruster per tick
    pub const DRONE_THRUST: f32 = 0.1;
    pub const DRONE_ANGULAR_DAMPING: f32 = 2.0;
    pub const DRONE_LINEAR_DAMPING: f32 = 0.5;
    pub const DRONE_DENSITY: f32 = 1.0;
    pub const DRONE_FRICTION: f32 = 0.3;
    /// Central hull half extents
    pub const DRONE_HULL_HALF: (f32, f32) = (1.0, 0.15);
    /// Thruster pod half extents and local offset (mirrored fore/aft)
    pub const DRONE_POD_HALF: (f32, f32) = (0.2, 0.2);
    pub const DRONE_POD_OFFSET: (f32, f32) = (0.9, 0.15);

    /// Payload defaults
    pub const PAYLOAD_START_X: f32 = DRONE_START_X;
    pub const PAYLOAD_START_Y: f32 = DRONE_START_Y - 2.5;
    pub const PAYLOAD_HALF: f32 = 0.4;
    pub const PAYLOAD_DENSITY: f32 = 0.5;
    pub const PAYLOAD_FRICTION: f32 = 0.3;
    pub const PAYLOAD_MAX_DIST: f32 = 6.0;

    /// Failure debounce (milliseconds)
    pub const LOSE_TIMER_MAX: f32 = 5000.0;
    /// Timer value after a reset; absorbs the first wobble after spawn
    pub const INITIAL_GRACE: f32 = -3000.0;
    /// Timer value whenever nothing is failing
    pub const RECOVERY_GRACE: f32 = -1000.0;
    /// The run is won once the score gets within this many units of the width
    pub const WIN_MARGIN: f32 = 20.0;

    /// Gravity used by the sandbox world
    pub const GRAVITY: (f32, f32) = (0.0, -10.0);
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    (angle + PI).rem_euclid(TAU) - PI
}

/// Normalized angle to [0, 2π)
#[inline]
pub fn normalize_angle_positive(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    #[test]
    fn test_normalize_angle_wraps_into_signed_range() {
        assert!((normalize_angle(PI + 0.5) - (-PI + 0.5)).abs() < 1e-5);
        assert!((normalize_angle(-FRAC_PI_2) + FRAC_PI_2).abs() < 1e-5);
        assert!((normalize_angle(3.0 * TAU + 0.25) - 0.25).abs() < 1e-4);
    }

    #[test]
    fn test_normalize_angle_positive() {
        assert_eq!(normalize_angle_positive(0.0), 0.0);
        assert!((normalize_angle_positive(-FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < 1e-5);
        assert!((normalize_angle_positive(TAU + 1.0) - 1.0).abs() < 1e-4);
        assert!(normalize_angle_positive(-1e-9) < TAU);
    }
}
