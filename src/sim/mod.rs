//! Tick-driven simulation module
//!
//! All gameplay logic lives here:
//! - Corridor generation from an injected random source
//! - Drone and payload wrappers over physics bodies
//! - The game state machine (scoring, failure debounce, win/loss)
//!
//! Physics is a collaborator behind [`PhysicsWorld`]; [`SandboxWorld`] is a
//! small reference implementation for headless runs and tests.

pub mod corridor;
pub mod drone;
pub mod entity;
pub mod payload;
pub mod rng;
pub mod sandbox;
pub mod state;
pub mod tick;
pub mod world;

pub use corridor::{Corridor, Walls, generate_corridor};
pub use drone::{Drone, is_tipped};
pub use entity::Entity;
pub use payload::Payload;
pub use rng::{FixedSequence, UniformSource, entropy_source, increasing_rand, seeded_source};
pub use sandbox::SandboxWorld;
pub use state::{Game, GamePhase};
pub use tick::{TickInput, tick};
pub use world::{BodyHandle, BoxDef, DynamicBodyDef, EdgeDef, PhysicsWorld};
