//! Turn-based robot battle simulation.
//!
//! Robots live in a generational arena and take part in the game through
//! two handle queues: the active registry (turn rotation) and the revive
//! registry (dead robots with lives left). All state hangs off a single
//! [`Simulation`] value so games are independent and, given a seed,
//! fully deterministic.

#![forbid(unsafe_code)]

mod arena;
mod behavior;
mod board;
mod capability;
mod combat;
pub mod config;
mod error;
mod queue;
mod rng;
mod robot;
mod scheduler;
mod sim;

pub use crate::arena::RobotArena;
pub use crate::behavior::MAX_SHOT_ATTEMPTS;
pub use crate::board::*;
pub use crate::capability::FireOutcome;
pub use crate::combat::KillOutcome;
pub use crate::config::{BoardConfig, ConfigError, GameConfig, RobotEntry};
pub use crate::error::*;
pub use crate::queue::*;
pub use crate::rng::*;
pub use crate::robot::*;
pub use crate::scheduler::TurnReport;
pub use crate::sim::*;

pub use robowar_protocol as protocol;
