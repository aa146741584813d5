//! Game state snapshot: the complete visible state handed to the host each tick.
//!
//! Snapshots are owned copies. Collaborators read them and never reach
//! into simulation state.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{GeoPoint, SimTime, WorldPoint};

/// Complete game state returned after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    /// Burning fires, ordered by fire number.
    pub fires: Vec<FireView>,
    pub station: StationView,
    /// Visible trucks that have left the station.
    pub trucks: Vec<TruckView>,
    pub missions: Vec<MissionView>,
    pub counters: FireCounters,
    /// Events produced since the previous snapshot.
    pub events: Vec<SimEvent>,
}

/// A burning fire as shown on the map and in the fire popup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FireView {
    pub number: u32,
    pub id: String,
    pub name: String,
    pub location: GeoPoint,
    pub position: WorldPoint,
    pub severity: u8,
    pub accessibility: Accessibility,
    /// Cosmetic estimate in minutes.
    pub duration_mins: f64,
    pub required_trucks: u32,
    pub assigned_trucks: u32,
    pub remaining_trucks_needed: u32,
    /// Extinguish progress (0.0 - 1.0).
    pub progress: f64,
    /// Seconds left at the current extinguish rate.
    pub remaining_secs: f64,
}

/// Station status for the station popup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StationView {
    pub id: String,
    pub name: String,
    pub location: GeoPoint,
    pub position: WorldPoint,
    pub total_trucks: u32,
    pub available_trucks: u32,
    pub on_mission: u32,
    pub fires_extinguished: u32,
    /// Percentage of the fleet out on missions.
    pub occupancy_pct: f64,
    /// Mean response time in minutes.
    pub average_response_mins: f64,
}

/// A truck on the road.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TruckView {
    pub number: u32,
    pub mission: u32,
    pub fire: u32,
    pub position: WorldPoint,
    /// Direction of travel in radians (atan2 of the movement vector).
    pub heading: f64,
    /// Smoothed sprite rotation in degrees.
    pub rotation_deg: f64,
    pub phase: TruckPhase,
}

/// Mission status for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionView {
    pub mission: u32,
    pub fire: u32,
    pub phase: MissionPhase,
    pub truck_count: u32,
    /// Seconds spent extinguishing so far.
    pub extinguish_secs: f64,
}

/// Aggregate fire counters consumed by win/loss logic and the score label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireCounters {
    pub active: u32,
    pub spawned: u32,
    pub extinguished: u32,
    pub pool_size: u32,
}
