//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// How easy a fire is to reach. Informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Accessibility {
    #[default]
    Good,
    Medium,
    Poor,
}

/// Mission lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionPhase {
    /// Trucks driving from the station to the fire.
    #[default]
    Traveling,
    /// All trucks on scene, fire being put out.
    Extinguishing,
    /// Fire is out, trucks driving back along the reversed route.
    Returning,
    /// Trucks released to the station. Removed at the end of the tick.
    Done,
}

/// Truck movement state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TruckPhase {
    /// Waiting out the start delay.
    #[default]
    Idle,
    /// Following the route.
    Moving,
    /// Final waypoint reached.
    Arrived,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Active,
    Paused,
    /// Too many fires burning at once.
    GameOver,
    /// Every pool fire spawned and was extinguished.
    Completed,
}

impl Accessibility {
    /// Parse a record label ("good", "medium", "poor"). Unknown labels are Good.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "medium" => Accessibility::Medium,
            "poor" => Accessibility::Poor,
            _ => Accessibility::Good,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Accessibility::Good => "good",
            Accessibility::Medium => "medium",
            Accessibility::Poor => "poor",
        }
    }
}

impl GamePhase {
    /// Whether the game has reached a terminal outcome.
    pub fn is_finished(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Completed)
    }
}
