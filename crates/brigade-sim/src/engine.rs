//! Simulation engine: the host-facing facade of the game.
//!
//! `SimulationEngine` owns the hecs world, processes player commands, runs
//! the dispatch and spawn systems, and produces `GameStateSnapshot`s.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use brigade_core::commands::PlayerCommand;
use brigade_core::constants::*;
use brigade_core::enums::GamePhase;
use brigade_core::events::SimEvent;
use brigade_core::state::{FireCounters, FireView, GameStateSnapshot, StationView, TruckView};
use brigade_core::types::{GeoPoint, SimTime};
use brigade_geo::{Route, TileProjection};

use crate::dispatch::{capped_request, DispatchManager, DispatchReceipt, DispatchSettings};
use crate::error::DispatchError;
use crate::fire::Fire;
use crate::scenario::Theater;
use crate::station::Station;
use crate::systems;
use crate::systems::fire_spawner::{FireSpawner, SpawnSettings};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    /// Largest frame delta accepted per tick (seconds).
    pub max_frame_dt: f64,
    pub truck_speed: f64,
    pub start_stagger_secs: f64,
    pub scatter_arrivals: bool,
    /// Trucks drive back before rejoining the station. When false they are
    /// released the moment the fire goes out.
    pub return_to_station: bool,
    pub min_spawn_interval_secs: f64,
    pub max_spawn_interval_secs: f64,
    pub max_active_fires: u32,
    pub initial_fires: u32,
    pub fire_pool_size: usize,
    pub nearby_radius_deg: f64,
    pub map_zoom: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            max_frame_dt: MAX_FRAME_DT,
            truck_speed: TRUCK_SPEED,
            start_stagger_secs: TRUCK_START_STAGGER_SECS,
            scatter_arrivals: true,
            return_to_station: true,
            min_spawn_interval_secs: MIN_SPAWN_INTERVAL_SECS,
            max_spawn_interval_secs: MAX_SPAWN_INTERVAL_SECS,
            max_active_fires: MAX_ACTIVE_FIRES,
            initial_fires: INITIAL_FIRES,
            fire_pool_size: FIRE_POOL_SIZE,
            nearby_radius_deg: NEARBY_RADIUS_DEG,
            map_zoom: MAP_ZOOM,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    theater: Theater,
    projection: TileProjection,
    world: World,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<SimEvent>,
    dispatch: DispatchManager,
    spawner: FireSpawner,
}

impl SimulationEngine {
    /// Create an engine for `theater` and light the opening fires.
    pub fn new(config: SimConfig, theater: Theater) -> Self {
        let projection = TileProjection::new(theater.city, config.map_zoom);
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut world = World::new();
        let mut events = Vec::new();

        let station_pos = projection.to_world(GeoPoint::new(theater.station.lat, theater.station.lon));
        let station = Station::from_record(&theater.station, station_pos);
        let dispatch = DispatchManager::new(station, DispatchSettings::from(&config));

        let mut spawner = FireSpawner::new(theater.fire_pool.clone(), SpawnSettings::from(&config), &mut rng);
        spawner.spawn_initial(&mut world, &projection, &mut rng, &mut events);

        info!(
            seed = config.seed,
            station = %theater.station.name,
            pool = spawner.pool_size(),
            "simulation started"
        );

        Self {
            time_scale: config.time_scale,
            config,
            theater,
            projection,
            world,
            time: SimTime::default(),
            phase: GamePhase::Active,
            rng,
            command_queue: VecDeque::new(),
            events,
            dispatch,
            spawner,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one frame of `dt` seconds and return the
    /// resulting snapshot. The frame delta is clamped before time scaling.
    pub fn tick(&mut self, dt: f64) -> GameStateSnapshot {
        self.process_commands();

        let dt = dt.clamp(0.0, self.config.max_frame_dt) * self.time_scale;
        if self.phase == GamePhase::Active && dt > 0.0 {
            self.run_systems(dt);
            self.time.advance(dt);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.dispatch,
            &self.spawner,
            events,
        )
    }

    /// Send up to `requested` trucks to burning fire `fire_number` along
    /// `route` (lat/lon, station first). The request is capped by the free
    /// fleet and by what the fire still needs.
    pub fn dispatch(
        &mut self,
        fire_number: u32,
        requested: u32,
        route: &[GeoPoint],
    ) -> Result<DispatchReceipt, DispatchError> {
        if self.phase.is_finished() {
            return Err(DispatchError::GameFinished);
        }
        if requested == 0 {
            return Err(DispatchError::NoTrucksRequested);
        }

        let fire = self
            .spawner
            .find_active(&self.world, fire_number)
            .ok_or(DispatchError::UnknownFire)?;
        let remaining = self
            .world
            .get::<&Fire>(fire)
            .map(|fire| fire.remaining_trucks_needed())
            .map_err(|_| DispatchError::UnknownFire)?;
        if remaining == 0 {
            return Err(DispatchError::FireFullyAssigned(fire_number));
        }

        let available = self.dispatch.station().available_trucks();
        let count = capped_request(requested, available, remaining);
        if count == 0 {
            return Err(DispatchError::InsufficientTrucks { requested, available });
        }

        let route = Route::from_geo(&self.projection, route);
        self.dispatch
            .dispatch_trucks(&mut self.world, &mut self.rng, fire, &route, count)
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn theater(&self) -> &Theater {
        &self.theater
    }

    pub fn projection(&self) -> &TileProjection {
        &self.projection
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn dispatch_manager(&self) -> &DispatchManager {
        &self.dispatch
    }

    /// Burning fires ordered by fire number.
    pub fn active_fires(&self) -> Vec<FireView> {
        systems::snapshot::build_fires(&self.world)
    }

    pub fn station(&self) -> StationView {
        self.dispatch.station().view()
    }

    /// Trucks on the road with the fire each is bound to.
    pub fn active_trucks(&self) -> Vec<TruckView> {
        self.dispatch.active_trucks(&self.world)
    }

    pub fn counters(&self) -> FireCounters {
        systems::snapshot::build_counters(&self.spawner)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, 4.0);
            }
            PlayerCommand::Restart => {
                let config = SimConfig {
                    time_scale: self.time_scale,
                    ..self.config.clone()
                };
                // Commands queued after the restart apply to the new run.
                let pending = std::mem::take(&mut self.command_queue);
                *self = Self::new(config, self.theater.clone());
                self.command_queue = pending;
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        let first_new = self.events.len();

        // 1. Missions: trucks, phase transitions, extinguishing, cleanup
        self.dispatch.update(&mut self.world, dt, &mut self.events);

        // 2. Spawner bookkeeping for fires that went out this tick
        for event in &self.events[first_new..] {
            if let SimEvent::ExtinguishComplete { fire, .. } = event {
                if let Some(entity) = self.spawner.find_active(&self.world, *fire) {
                    self.spawner.on_extinguished(entity);
                }
            }
        }

        // 3. Fire spawn timer
        self.spawner.run(
            &mut self.world,
            &self.projection,
            &mut self.rng,
            dt,
            &mut self.events,
        );

        // 4. Outcome
        let counters = systems::snapshot::build_counters(&self.spawner);
        let phase = systems::outcome::evaluate(self.phase, &counters, self.config.max_active_fires);
        if phase != self.phase {
            info!(?phase, active = counters.active, extinguished = counters.extinguished, "game finished");
            self.phase = phase;
        }
    }
}
