//! Fire spawner: promotes pool fires to burning fires on a random timer.

use hecs::{Entity, World};
use rand::Rng;
use tracing::{debug, info};

use brigade_core::events::SimEvent;
use brigade_core::records::FireRecord;
use brigade_core::types::GeoPoint;
use brigade_geo::TileProjection;

use crate::draw;
use crate::engine::SimConfig;
use crate::fire::Fire;

/// Spawn pacing taken from [`SimConfig`].
#[derive(Debug, Clone, Copy)]
pub struct SpawnSettings {
    pub min_interval_secs: f64,
    pub max_interval_secs: f64,
    /// Spawning pauses while this many fires burn.
    pub max_active_fires: u32,
    pub initial_fires: u32,
}

impl From<&SimConfig> for SpawnSettings {
    fn from(config: &SimConfig) -> Self {
        Self {
            min_interval_secs: config.min_spawn_interval_secs,
            max_interval_secs: config.max_spawn_interval_secs,
            max_active_fires: config.max_active_fires,
            initial_fires: config.initial_fires,
        }
    }
}

/// Pool of fire candidates in spawn order, and the fires already burning.
pub struct FireSpawner {
    pool: Vec<FireRecord>,
    next_index: usize,
    active: Vec<Entity>,
    extinguished: u32,
    since_last_spawn: f64,
    next_spawn_secs: f64,
    settings: SpawnSettings,
}

impl FireSpawner {
    pub fn new<R: Rng>(pool: Vec<FireRecord>, settings: SpawnSettings, rng: &mut R) -> Self {
        let next_spawn_secs = draw::spawn_interval(rng, settings.min_interval_secs, settings.max_interval_secs);
        Self {
            pool,
            next_index: 0,
            active: Vec::new(),
            extinguished: 0,
            since_last_spawn: 0.0,
            next_spawn_secs,
            settings,
        }
    }

    /// Light the opening fires.
    pub fn spawn_initial<R: Rng>(
        &mut self,
        world: &mut World,
        projection: &TileProjection,
        rng: &mut R,
        events: &mut Vec<SimEvent>,
    ) {
        for _ in 0..self.settings.initial_fires {
            if self.spawn_next(world, projection, rng, events).is_none() {
                break;
            }
        }
    }

    /// Advance the spawn timer. The timer only runs while another fire may
    /// spawn: pool not exhausted and fewer than the maximum burning.
    pub fn run<R: Rng>(
        &mut self,
        world: &mut World,
        projection: &TileProjection,
        rng: &mut R,
        dt: f64,
        events: &mut Vec<SimEvent>,
    ) {
        if self.all_spawned() || self.active_count() >= self.settings.max_active_fires {
            return;
        }

        self.since_last_spawn += dt;
        if self.since_last_spawn >= self.next_spawn_secs {
            self.spawn_next(world, projection, rng, events);
            self.since_last_spawn = 0.0;
            self.next_spawn_secs =
                draw::spawn_interval(rng, self.settings.min_interval_secs, self.settings.max_interval_secs);
            debug!(next_secs = self.next_spawn_secs, "next fire scheduled");
        }
    }

    /// Promote the next pool record to a burning fire.
    pub fn spawn_next<R: Rng>(
        &mut self,
        world: &mut World,
        projection: &TileProjection,
        rng: &mut R,
        events: &mut Vec<SimEvent>,
    ) -> Option<Entity> {
        let record = self.pool.get(self.next_index)?;
        let number = self.next_index as u32;
        let position = projection.to_world(GeoPoint::new(record.lat, record.lon));
        let fire = Fire::create(number, record, position, rng);

        info!(
            fire = number,
            name = %fire.name,
            severity = fire.severity(),
            required = fire.required_trucks(),
            "fire spawned"
        );
        events.push(SimEvent::FireSpawned {
            fire: number,
            name: fire.name.clone(),
            severity: fire.severity(),
        });

        let entity = world.spawn((fire,));
        self.active.push(entity);
        self.next_index += 1;
        Some(entity)
    }

    /// Bookkeeping for a fire that just went out.
    pub fn on_extinguished(&mut self, fire: Entity) {
        if let Some(index) = self.active.iter().position(|&e| e == fire) {
            self.active.remove(index);
            self.extinguished += 1;
        }
    }

    /// Burning fire entities in spawn order.
    pub fn active_fires(&self) -> &[Entity] {
        &self.active
    }

    /// Entity of the burning fire with pool number `number`.
    pub fn find_active(&self, world: &World, number: u32) -> Option<Entity> {
        self.active.iter().copied().find(|&entity| {
            world
                .get::<&Fire>(entity)
                .map(|fire| fire.number == number)
                .unwrap_or(false)
        })
    }

    pub fn active_count(&self) -> u32 {
        self.active.len() as u32
    }

    pub fn total_spawned(&self) -> u32 {
        self.next_index as u32
    }

    pub fn total_extinguished(&self) -> u32 {
        self.extinguished
    }

    pub fn pool_size(&self) -> u32 {
        self.pool.len() as u32
    }

    pub fn all_spawned(&self) -> bool {
        self.next_index >= self.pool.len()
    }

    pub fn all_extinguished(&self) -> bool {
        self.extinguished >= self.pool_size()
    }

    pub fn next_spawn_secs(&self) -> f64 {
        self.next_spawn_secs
    }
}
