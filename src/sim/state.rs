//! Game session state
//!
//! A [`Game`] owns the physics world, the current corridor and its wall bodies,
//! the drone, the optional payload and the failure debounce timer. The per-tick
//! transitions live in [`super::tick`].

use glam::Vec2;

use super::corridor::{Corridor, Walls, generate_corridor};
use super::drone::Drone;
use super::entity::Entity;
use super::payload::Payload;
use super::rng::{UniformSource, entropy_source, seeded_source};
use super::world::PhysicsWorld;
use crate::error::ConfigError;
use crate::tuning::Tuning;
use crate::ui::Status;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Nothing is failing
    Playing,
    /// Tipped over or too far from the payload; the lose timer is running
    Failing,
    /// Failure outlasted the timer (terminal until reset)
    Lost,
    /// Reached the far end (terminal until reset)
    Won,
}

/// One play session
pub struct Game<W: PhysicsWorld> {
    pub(crate) world: W,
    pub(crate) tuning: Tuning,
    pub(crate) rng: Box<dyn UniformSource>,
    pub(crate) corridor: Corridor,
    pub(crate) walls: Walls,
    pub(crate) drone: Drone,
    pub(crate) payload: Option<Payload>,
    /// Failure debounce accumulator (ms); negative values are grace
    pub(crate) lose_timer: f32,
    pub(crate) game_over: bool,
    pub(crate) phase: GamePhase,
    /// Last status handed to the display
    pub(crate) status: Option<Status>,
    pub(crate) resets: u32,
}

impl<W: PhysicsWorld> Game<W> {
    /// Build a session on `world`, drawing corridors from `rng`
    pub fn new(
        mut world: W,
        tuning: Tuning,
        rng: impl UniformSource + 'static,
    ) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let mut rng: Box<dyn UniformSource> = Box::new(rng);

        let c = &tuning.corridor;
        let corridor = generate_corridor(c.segment_count(), c.width, c.height, rng.as_mut());
        let walls = corridor.build(&mut world);

        let drone_spawn = to_world(&tuning, tuning.drone.start);
        let drone = Drone::new(&mut world, drone_spawn, &tuning.drone);
        let payload = tuning.payload.as_ref().map(|p| {
            Payload::new(&mut world, to_world(&tuning, p.start), p, drone.handle())
        });

        log::info!(
            "New game: corridor {}x{} ({} segments), payload: {}",
            c.width,
            c.height,
            c.segment_count(),
            if payload.is_some() { "yes" } else { "no" }
        );

        let lose_timer = tuning.timers.initial_grace;
        Ok(Self {
            world,
            tuning,
            rng,
            corridor,
            walls,
            drone,
            payload,
            lose_timer,
            game_over: false,
            phase: GamePhase::Playing,
            status: None,
            resets: 0,
        })
    }

    /// Build a session with a reproducible corridor sequence
    pub fn with_seed(world: W, tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        log::info!("Game seed: {}", seed);
        Self::new(world, tuning, seeded_source(seed))
    }

    /// Build a session seeded from OS entropy (the seed is logged)
    pub fn with_entropy(world: W, tuning: Tuning) -> Result<Self, ConfigError> {
        let (seed, rng) = entropy_source();
        log::info!("Game seed: {}", seed);
        Self::new(world, tuning, rng)
    }

    /// Throw away the corridor and the run, put everything back at spawn
    pub fn reset(&mut self) {
        self.walls.destroy(&mut self.world);
        let c = &self.tuning.corridor;
        self.corridor = generate_corridor(c.segment_count(), c.width, c.height, self.rng.as_mut());
        self.walls = self.corridor.build(&mut self.world);

        self.drone.reset(&mut self.world);
        if let Some(payload) = &self.payload {
            payload.reset(&mut self.world);
        }

        self.lose_timer = self.tuning.timers.initial_grace;
        self.game_over = false;
        self.phase = GamePhase::Playing;
        self.status = None;
        self.resets += 1;
        log::info!("Game reset (#{})", self.resets);
    }

    /// Distance flown from spawn, rounded to whole units
    pub fn score(&self) -> i64 {
        let x = self.drone.position_x(&self.world);
        (x + self.tuning.corridor.width / 2.0 - self.tuning.drone.start.x).round() as i64
    }

    /// Whether the drone or the payload is currently failing
    pub fn is_failing(&self) -> bool {
        self.drone.is_losing(&self.world)
            || self
                .payload
                .as_ref()
                .is_some_and(|p| p.is_losing(&self.world))
    }

    /// Where the camera should look (drone world position)
    pub fn camera_target(&self) -> Vec2 {
        self.drone.position(&self.world)
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    /// Mutable world access for the driver's integration step
    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn corridor(&self) -> &Corridor {
        &self.corridor
    }

    pub fn walls(&self) -> &Walls {
        &self.walls
    }

    pub fn drone(&self) -> &Drone {
        &self.drone
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    pub fn lose_timer(&self) -> f32 {
        self.lose_timer
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Last status emitted (cleared on reset)
    pub fn status(&self) -> Option<Status> {
        self.status
    }

    /// Number of resets since construction
    pub fn resets(&self) -> u32 {
        self.resets
    }
}

/// Corridor-local point to world space (the corridor is centred on x = 0)
fn to_world(tuning: &Tuning, local: Vec2) -> Vec2 {
    Vec2::new(local.x - tuning.corridor.width / 2.0, local.y)
}
