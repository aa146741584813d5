//! Simulation engine for BRIGADE.
//!
//! Owns the hecs world of fires and trucks, the station, the dispatch
//! missions and the fire spawner, and produces `GameStateSnapshot`s for the
//! host. Single-threaded and tick-driven; performs no I/O.

pub mod dispatch;
pub mod draw;
pub mod engine;
pub mod error;
pub mod fire;
pub mod mission;
pub mod scenario;
pub mod station;
pub mod systems;
pub mod truck;

pub use brigade_core as core;
pub use dispatch::{DispatchManager, DispatchReceipt};
pub use engine::{SimConfig, SimulationEngine};
pub use error::{DispatchError, SetupError};
