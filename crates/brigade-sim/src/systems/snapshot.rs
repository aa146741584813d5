//! Snapshot system: reads the world and builds a complete GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use brigade_core::enums::GamePhase;
use brigade_core::events::SimEvent;
use brigade_core::state::{FireCounters, FireView, GameStateSnapshot};
use brigade_core::types::SimTime;

use crate::dispatch::DispatchManager;
use crate::fire::Fire;
use crate::systems::fire_spawner::FireSpawner;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    dispatch: &DispatchManager,
    spawner: &FireSpawner,
    events: Vec<SimEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        fires: build_fires(world),
        station: dispatch.station().view(),
        trucks: dispatch.active_trucks(world),
        missions: dispatch.mission_views(),
        counters: build_counters(spawner),
        events,
    }
}

/// Burning fires ordered by fire number.
pub fn build_fires(world: &World) -> Vec<FireView> {
    let mut fires: Vec<FireView> = world
        .query::<&Fire>()
        .iter()
        .filter(|(_, fire)| fire.is_active())
        .map(|(_, fire)| fire.view())
        .collect();
    fires.sort_by_key(|fire| fire.number);
    fires
}

pub fn build_counters(spawner: &FireSpawner) -> FireCounters {
    FireCounters {
        active: spawner.active_count(),
        spawned: spawner.total_spawned(),
        extinguished: spawner.total_extinguished(),
        pool_size: spawner.pool_size(),
    }
}
