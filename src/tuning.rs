//! Data-driven game balance
//!
//! Every magic number the state machine and entities depend on lives here so a
//! harness can ship a JSON tuning file instead of recompiling. Missing sections
//! fall back to the defaults in [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Corridor dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorridorTuning {
    pub width: f32,
    pub height: f32,
}

impl Default for CorridorTuning {
    fn default() -> Self {
        Self {
            width: CORRIDOR_WIDTH,
            height: CORRIDOR_HEIGHT,
        }
    }
}

impl CorridorTuning {
    /// Number of wall segments (`round(width / 3)`, between 1 and [`MAX_SEGMENTS`])
    pub fn segment_count(&self) -> usize {
        ((self.width / SEGMENT_SPACING).round() as usize).clamp(1, MAX_SEGMENTS)
    }
}

/// Drone handling and spawn
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DroneTuning {
    /// Spawn point, corridor-local
    pub start: Vec2,
    pub thrust: f32,
    pub angular_damping: f32,
    pub linear_damping: f32,
    pub density: f32,
    pub friction: f32,
}

impl Default for DroneTuning {
    fn default() -> Self {
        Self {
            start: Vec2::new(DRONE_START_X, DRONE_START_Y),
            thrust: DRONE_THRUST,
            angular_damping: DRONE_ANGULAR_DAMPING,
            linear_damping: DRONE_LINEAR_DAMPING,
            density: DRONE_DENSITY,
            friction: DRONE_FRICTION,
        }
    }
}

/// Towed payload (no physical joint, only a distance leash)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PayloadTuning {
    /// Spawn point, corridor-local
    pub start: Vec2,
    pub half_size: f32,
    pub density: f32,
    pub friction: f32,
    pub max_dist: f32,
}

impl Default for PayloadTuning {
    fn default() -> Self {
        Self {
            start: Vec2::new(PAYLOAD_START_X, PAYLOAD_START_Y),
            half_size: PAYLOAD_HALF,
            density: PAYLOAD_DENSITY,
            friction: PAYLOAD_FRICTION,
            max_dist: PAYLOAD_MAX_DIST,
        }
    }
}

/// Failure debounce, all in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerTuning {
    pub lose_timer_max: f32,
    pub initial_grace: f32,
    pub recovery_grace: f32,
    /// Distance short of the far cap that already counts as a win
    pub win_margin: f32,
}

impl Default for TimerTuning {
    fn default() -> Self {
        Self {
            lose_timer_max: LOSE_TIMER_MAX,
            initial_grace: INITIAL_GRACE,
            recovery_grace: RECOVERY_GRACE,
            win_margin: WIN_MARGIN,
        }
    }
}

/// Complete tuning for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub corridor: CorridorTuning,
    pub drone: DroneTuning,
    /// `None` flies without a payload
    pub payload: Option<PayloadTuning>,
    pub timers: TimerTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            corridor: CorridorTuning::default(),
            drone: DroneTuning::default(),
            payload: Some(PayloadTuning::default()),
            timers: TimerTuning::default(),
        }
    }
}

impl Tuning {
    /// Tuning without a payload
    pub fn solo() -> Self {
        Self {
            payload: None,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for dumping the defaults as a starting file)
    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Reject tunings that would produce degenerate geometry or an unplayable game
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.corridor;
        positive("corridor.width", c.width)?;
        positive("corridor.height", c.height)?;
        if (c.width / SEGMENT_SPACING).round() > MAX_SEGMENTS as f32 {
            return Err(ConfigError::CorridorTooLong {
                width: c.width,
                max_segments: MAX_SEGMENTS,
            });
        }

        let d = &self.drone;
        finite("drone.start.x", d.start.x)?;
        finite("drone.start.y", d.start.y)?;
        inside_corridor("drone", d.start, c)?;
        positive("drone.thrust", d.thrust)?;
        positive("drone.density", d.density)?;
        non_negative("drone.angular_damping", d.angular_damping)?;
        non_negative("drone.linear_damping", d.linear_damping)?;
        non_negative("drone.friction", d.friction)?;

        if let Some(p) = &self.payload {
            finite("payload.start.x", p.start.x)?;
            finite("payload.start.y", p.start.y)?;
            inside_corridor("payload", p.start, c)?;
            positive("payload.half_size", p.half_size)?;
            positive("payload.density", p.density)?;
            non_negative("payload.friction", p.friction)?;
            positive("payload.max_dist", p.max_dist)?;
        }

        let t = &self.timers;
        positive("timers.lose_timer_max", t.lose_timer_max)?;
        negative("timers.initial_grace", t.initial_grace)?;
        negative("timers.recovery_grace", t.recovery_grace)?;
        finite("timers.win_margin", t.win_margin)?;
        if t.win_margin >= c.width - d.start.x {
            return Err(ConfigError::WinMarginTooLarge {
                margin: t.win_margin,
                width: c.width,
            });
        }
        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value < 0.0 {
        Ok(())
    } else {
        Err(ConfigError::GraceNotNegative { field, value })
    }
}

fn inside_corridor(
    entity: &'static str,
    start: Vec2,
    corridor: &CorridorTuning,
) -> Result<(), ConfigError> {
    let inside = start.x > 0.0
        && start.x < corridor.width
        && start.y > 0.0
        && start.y < corridor.height;
    if inside {
        Ok(())
    } else {
        Err(ConfigError::SpawnOutsideCorridor {
            entity,
            x: start.x,
            y: start.y,
        })
    }
}
