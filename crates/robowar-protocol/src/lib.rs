//! Shared value types for the robowar simulation.
//!
//! Everything here is plain data: generational robot handles, grid
//! coordinates, the closed set of robot kinds, and the serializable
//! event/snapshot types the core hands to presentation layers.

mod event;
mod grid;
mod ids;
mod kind;
mod snapshot;

pub use crate::event::*;
pub use crate::grid::*;
pub use crate::ids::*;
pub use crate::kind::*;
pub use crate::snapshot::*;
