//! Typed outcomes for expected, recoverable failures.

use thiserror::Error;

/// Why a dispatch request was refused. Nothing changes when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("dispatch needs at least one truck")]
    NoTrucksRequested,
    #[error("requested {requested} trucks but only {available} are available")]
    InsufficientTrucks { requested: u32, available: u32 },
    #[error("no such fire")]
    UnknownFire,
    #[error("fire {0} is already out")]
    FireNotActive(u32),
    #[error("fire {0} already has every truck it needs")]
    FireFullyAssigned(u32),
    #[error("the game is over")]
    GameFinished,
}

/// Why a theater could not be built from the input records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("no fire station within range of the city")]
    NoStation,
    #[error("no fires within range of the city")]
    NoFires,
}
