//! Fixed-step physics for zzocker matches.
//!
//! Each tick runs in a fixed order: gather intents, integrate movement,
//! resolve player-ball contacts and kicks, resolve player-player contacts,
//! confine bodies to the pitch, update possession, detect goals, cap speeds,
//! and finally evaluate the end condition. [`Simulation`] owns that sequence;
//! the stage modules are public so hosts and tests can drive them directly.

pub mod collision;
pub mod error;
pub mod events;
pub mod goal;
pub mod movement;
pub mod possession;
pub mod simulation;

pub use error::SimulationError;
pub use events::{MatchEvent, RunStatus, TickOutcome};
pub use simulation::{Simulation, StopHandle};
