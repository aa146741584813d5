//! Per-tick systems that operate on the simulation world.
//!
//! The spawner keeps its own pool bookkeeping; snapshot and outcome are
//! read-only passes over the world.

pub mod fire_spawner;
pub mod outcome;
pub mod snapshot;
