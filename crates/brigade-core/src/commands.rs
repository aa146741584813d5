//! Host commands sent to the simulation.
//!
//! Commands are queued and processed at the next tick boundary. Dispatching
//! is not a command: it returns a result synchronously, see the engine.

use serde::{Deserialize, Serialize};

/// Control actions that do not need an immediate answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Set time scale (1.0 = normal, 2.0 = double, 0.0 = frozen).
    SetTimeScale { scale: f64 },
    /// Rebuild the world from the same theater and seed.
    Restart,
}
