//! Status values for the display collaborator
//!
//! The core never renders text itself. It hands out a [`Status`] and the
//! display decides how to draw it; [`Status::text`] is a ready-made default.

use serde::{Deserialize, Serialize};

/// What the on-screen status should currently say
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Flying normally, current distance score
    Playing { score: i64 },
    /// Failure is being debounced; whole seconds until the run is lost
    Counting { seconds_left: i64 },
    /// Run lost, final score
    Lost { score: i64 },
    /// Reached the far end, final score
    Won { score: i64 },
}

/// Two lines of status text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusText {
    pub primary: String,
    pub secondary: String,
}

impl Status {
    /// Whether this status ends the run
    pub fn is_final(&self) -> bool {
        matches!(self, Status::Lost { .. } | Status::Won { .. })
    }

    /// Default two-line rendering
    pub fn text(&self) -> StatusText {
        let (primary, secondary) = match *self {
            Status::Playing { score } => (format!("Score: {score}"), String::new()),
            Status::Counting { seconds_left } => (
                format!("Recover! {seconds_left}"),
                "Level out and stay near the payload".to_string(),
            ),
            Status::Lost { score } => (
                "Game over".to_string(),
                format!("Score: {score} - press Down to restart"),
            ),
            Status::Won { score } => (
                "You made it!".to_string(),
                format!("Score: {score} - press Down to play again"),
            ),
        };
        StatusText { primary, secondary }
    }
}
