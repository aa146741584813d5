//! Lifecycle events emitted by the simulation for UI, audio and rendering.
//!
//! Events are collected during a tick and drained into the snapshot; the
//! simulation never calls back into its collaborators.

use serde::{Deserialize, Serialize};

/// A simulation lifecycle event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A pool fire started burning.
    FireSpawned {
        fire: u32,
        name: String,
        severity: u8,
    },
    /// The trucks of a mission reached the fire. `truck` is the last to depart.
    TruckArrived {
        mission: u32,
        truck: u32,
        fire: u32,
        truck_count: u32,
    },
    /// Every truck of a mission is on scene; extinguishing starts.
    AllTrucksArrived { mission: u32, fire: u32 },
    /// The fire is out.
    ExtinguishComplete { mission: u32, fire: u32, name: String },
    /// A mission's trucks are back in the station.
    TrucksReturned {
        mission: u32,
        truck_count: u32,
        response_time_mins: f64,
    },
}
