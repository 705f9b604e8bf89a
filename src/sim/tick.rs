//! Per-tick game loop
//!
//! The driver calls [`tick`] once per frame, then integrates the physics world.
//! Bodies are therefore only created or destroyed between integration passes.

use super::entity::Entity;
use super::state::{Game, GamePhase};
use super::world::PhysicsWorld;
use crate::normalize_angle;
use crate::ui::Status;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Fire the front thruster
    pub left: bool,
    /// Fire the back thruster
    pub right: bool,
    /// Restart the run (overrides everything else this tick)
    pub down: bool,
    /// Demo mode - fly the drone automatically when no thruster key is held
    pub autopilot: bool,
}

/// Advance the game by one tick of `dt` milliseconds
///
/// Returns the status to show, if it changed this tick. While the run is over
/// the frozen final status is returned every tick.
pub fn tick<W: PhysicsWorld>(game: &mut Game<W>, input: &TickInput, dt: f32) -> Option<Status> {
    if input.down {
        game.reset();
        return None;
    }

    if !game.game_over {
        let (left, right) = if input.autopilot && !input.left && !input.right {
            autopilot(game)
        } else {
            (input.left, input.right)
        };
        if left || right {
            game.drone.apply_thrust(&mut game.world, left, right);
        }
    }

    let status = evaluate(game, dt);
    if status.is_some() {
        game.status = status;
    }
    status
}

/// Debounce the failure predicates and resolve win/loss
fn evaluate<W: PhysicsWorld>(game: &mut Game<W>, dt: f32) -> Option<Status> {
    if game.game_over {
        return game.status;
    }

    let timers = &game.tuning.timers;
    let score = game.score();

    if game.is_failing() {
        game.lose_timer += dt;
        log::trace!("Failing, lose timer {:.0} ms", game.lose_timer);

        if game.lose_timer >= timers.lose_timer_max - 1.0 {
            game.game_over = true;
            game.phase = GamePhase::Lost;
            log::info!("Run lost with score {}", score);
            return Some(Status::Lost { score });
        }

        game.phase = GamePhase::Failing;
        if game.lose_timer > 0.0 {
            let seconds_left = ((timers.lose_timer_max - game.lose_timer) / 1000.0).round() as i64;
            Some(Status::Counting { seconds_left })
        } else {
            None
        }
    } else {
        game.lose_timer = timers.recovery_grace;

        if score as f32 >= game.tuning.corridor.width - timers.win_margin {
            game.game_over = true;
            game.phase = GamePhase::Won;
            log::info!("Run won with score {}", score);
            return Some(Status::Won { score });
        }

        game.phase = GamePhase::Playing;
        Some(Status::Playing { score })
    }
}

/// Lean slightly forward and hold the middle of the opening just ahead
fn autopilot<W: PhysicsWorld>(game: &Game<W>) -> (bool, bool) {
    // Forward lean (clockwise), radians
    let lean = -0.15;
    let deadband = 0.05;
    // Spin anticipation, seconds
    let rate_gain = 0.15;
    let lookahead = 6.0;

    let world = &game.world;
    let pos = game.drone.position(world);
    let vel = world.linear_velocity(game.drone.handle());
    let omega = world.angular_velocity(game.drone.handle());
    let angle = normalize_angle(game.drone.angle(world));

    let error = angle - lean + rate_gain * omega;
    if error > deadband {
        // Back thruster alone turns clockwise
        return (false, true);
    }
    if error < -deadband {
        return (true, false);
    }

    let local_x = pos.x + game.tuning.corridor.width / 2.0;
    let (floor, ceiling) = game.corridor.opening_at(local_x + lookahead);
    let climb = pos.y < (floor + ceiling) / 2.0 || vel.y < -1.0;
    (climb, climb)
}
