//! Configuration errors
//!
//! The only recoverable failures in the core are degenerate tunings, rejected
//! before a game is built. Physics handle misuse is a programmer error and panics.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A value that must be finite was NaN or infinite
    NonFinite { field: &'static str },
    /// A value that must be strictly positive was not
    NotPositive { field: &'static str, value: f32 },
    /// Spawn point lies outside the corridor
    SpawnOutsideCorridor { entity: &'static str, x: f32, y: f32 },
    /// Corridor would need more wall segments than the generator allows
    CorridorTooLong { width: f32, max_segments: usize },
    /// Win margin leaves nothing to fly (the run would be won at spawn)
    WinMarginTooLarge { margin: f32, width: f32 },
    /// Grace offsets must sit below zero and below the loss threshold
    GraceNotNegative { field: &'static str, value: f32 },
    /// Tuning document could not be read or parsed
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { field } => write!(f, "{field} must be finite"),
            Self::NotPositive { field, value } => {
                write!(f, "{field} must be positive (got {value})")
            }
            Self::SpawnOutsideCorridor { entity, x, y } => {
                write!(f, "{entity} spawn ({x}, {y}) lies outside the corridor")
            }
            Self::CorridorTooLong {
                width,
                max_segments,
            } => {
                write!(f, "corridor {width} wide needs more than {max_segments} segments")
            }
            Self::WinMarginTooLarge { margin, width } => {
                write!(f, "win margin {margin} leaves no distance in a corridor {width} wide")
            }
            Self::GraceNotNegative { field, value } => {
                write!(f, "{field} must be negative (got {value})")
            }
            Self::Parse(msg) => write!(f, "invalid tuning: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
