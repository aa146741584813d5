//! Dispatch Manager: commits station trucks to fires and drives every
//! mission through travel, extinguish and return.

use hecs::{Entity, World};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use brigade_core::enums::MissionPhase;
use brigade_core::events::SimEvent;
use brigade_core::state::{MissionView, TruckView};
use brigade_geo::Route;

use crate::draw;
use crate::engine::SimConfig;
use crate::error::DispatchError;
use crate::fire::Fire;
use crate::mission::Mission;
use crate::station::Station;
use crate::truck::{Crew, Truck};

/// Dispatch tuning taken from [`SimConfig`].
#[derive(Debug, Clone, Copy)]
pub struct DispatchSettings {
    pub truck_speed: f64,
    pub start_stagger_secs: f64,
    pub scatter_arrivals: bool,
    /// Trucks drive home before the station gets them back.
    pub return_to_station: bool,
}

impl From<&SimConfig> for DispatchSettings {
    fn from(config: &SimConfig) -> Self {
        Self {
            truck_speed: config.truck_speed,
            start_stagger_secs: config.start_stagger_secs,
            scatter_arrivals: config.scatter_arrivals,
            return_to_station: config.return_to_station,
        }
    }
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self::from(&SimConfig::default())
    }
}

/// What a successful dispatch created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReceipt {
    pub mission: u32,
    pub fire: u32,
    pub trucks: u32,
}

/// Trucks to send: the request capped by the free fleet and the fire's
/// outstanding need.
pub fn capped_request(requested: u32, available: u32, remaining_needed: u32) -> u32 {
    requested.min(available).min(remaining_needed)
}

/// Owns the station and every live mission.
pub struct DispatchManager {
    station: Station,
    settings: DispatchSettings,
    missions: Vec<Mission>,
    next_mission_id: u32,
    next_truck_number: u32,
    despawn_buffer: Vec<Entity>,
}

impl DispatchManager {
    pub fn new(station: Station, settings: DispatchSettings) -> Self {
        Self {
            station,
            settings,
            missions: Vec::new(),
            next_mission_id: 0,
            next_truck_number: 0,
            despawn_buffer: Vec::new(),
        }
    }

    /// Commit `count` trucks from the station to `fire` along `route`.
    ///
    /// Refusals leave the station, the fire and the world untouched.
    pub fn dispatch_trucks<R: Rng>(
        &mut self,
        world: &mut World,
        rng: &mut R,
        fire: Entity,
        route: &Route,
        count: u32,
    ) -> Result<DispatchReceipt, DispatchError> {
        if count == 0 {
            debug!("dispatch refused: zero trucks requested");
            return Err(DispatchError::NoTrucksRequested);
        }

        let fire_number = {
            let mut target = world
                .get::<&mut Fire>(fire)
                .map_err(|_| DispatchError::UnknownFire)?;
            if !target.is_active() {
                debug!(fire = target.number, "dispatch refused: fire already out");
                return Err(DispatchError::FireNotActive(target.number));
            }
            if !self.station.dispatch_trucks(count) {
                debug!(
                    requested = count,
                    available = self.station.available_trucks(),
                    "dispatch refused: not enough trucks"
                );
                return Err(DispatchError::InsufficientTrucks {
                    requested: count,
                    available: self.station.available_trucks(),
                });
            }
            target.add_assigned_trucks(count);
            target.number
        };

        let mission_id = self.next_mission_id;
        self.next_mission_id += 1;

        let mut trucks = Vec::with_capacity(count as usize);
        for i in 0..count {
            let mut truck = Truck::new(self.next_truck_number, self.station.position)
                .with_speed(self.settings.truck_speed);
            self.next_truck_number += 1;

            let scatter = if self.settings.scatter_arrivals {
                Some(draw::scatter_offset(rng))
            } else {
                None
            };
            truck.set_route(route, scatter);
            truck.set_start_delay(f64::from(i) * self.settings.start_stagger_secs);

            trucks.push(world.spawn((
                truck,
                Crew {
                    mission: mission_id,
                    fire: fire_number,
                },
            )));
        }

        self.missions
            .push(Mission::new(mission_id, fire, fire_number, trucks, route.clone()));

        info!(
            mission = mission_id,
            fire = fire_number,
            trucks = count,
            available = self.station.available_trucks(),
            "trucks dispatched"
        );

        Ok(DispatchReceipt {
            mission: mission_id,
            fire: fire_number,
            trucks: count,
        })
    }

    /// Advance every mission by `dt` seconds, pushing the resulting events.
    ///
    /// Per mission: trucks move, then the phase transition is checked, then
    /// the fire is advanced. A fire is advanced by at most one mission per
    /// tick. Finished missions are removed after the pass.
    pub fn update(&mut self, world: &mut World, dt: f64, events: &mut Vec<SimEvent>) {
        if dt <= 0.0 {
            return;
        }

        let mut advanced_fires: Vec<Entity> = Vec::new();

        for mission in &mut self.missions {
            mission.update_trucks(world, dt);

            match mission.phase {
                MissionPhase::Traveling => {
                    let fire_active = world
                        .get::<&Fire>(mission.fire_entity)
                        .map(|fire| fire.is_active())
                        .unwrap_or(false);
                    if !fire_active {
                        // Nothing left to fight: turn around where the trucks are.
                        debug!(mission = mission.id, fire = mission.fire_number, "fire out before arrival");
                        release(mission, world, &mut self.station, &self.settings, events);
                        continue;
                    }
                    if mission.all_arrived(world) {
                        events.push(SimEvent::TruckArrived {
                            mission: mission.id,
                            truck: mission.last_truck_number(world),
                            fire: mission.fire_number,
                            truck_count: mission.truck_count(),
                        });
                        events.push(SimEvent::AllTrucksArrived {
                            mission: mission.id,
                            fire: mission.fire_number,
                        });
                        info!(mission = mission.id, fire = mission.fire_number, "all trucks on scene");
                        mission.begin_extinguishing();
                    }
                }
                MissionPhase::Extinguishing => {
                    let fire_active = match world.get::<&Fire>(mission.fire_entity) {
                        Ok(fire) => fire.is_active(),
                        Err(_) => {
                            warn!(mission = mission.id, fire = mission.fire_number, "mission fire missing");
                            false
                        }
                    };
                    if !fire_active {
                        // Put out by another mission: head home without a second completion.
                        release(mission, world, &mut self.station, &self.settings, events);
                        continue;
                    }

                    mission.extinguish_secs += dt;
                    if advanced_fires.contains(&mission.fire_entity) {
                        continue;
                    }
                    advanced_fires.push(mission.fire_entity);

                    let completed = match world.get::<&mut Fire>(mission.fire_entity) {
                        Ok(mut fire) => {
                            if fire.update_extinguishing(dt) {
                                fire.put_out();
                                fire.reset_assigned_trucks();
                                Some(fire.name.clone())
                            } else {
                                None
                            }
                        }
                        Err(_) => None,
                    };

                    if let Some(name) = completed {
                        info!(
                            mission = mission.id,
                            fire = mission.fire_number,
                            secs = mission.extinguish_secs,
                            "fire extinguished"
                        );
                        events.push(SimEvent::ExtinguishComplete {
                            mission: mission.id,
                            fire: mission.fire_number,
                            name,
                        });
                        mission.put_out_fire = true;
                        release(mission, world, &mut self.station, &self.settings, events);
                    }
                }
                MissionPhase::Returning => {
                    if mission.all_arrived(world) {
                        complete(mission, world, &mut self.station, events);
                    }
                }
                MissionPhase::Done => {}
            }
        }

        let despawn_buffer = &mut self.despawn_buffer;
        self.missions.retain(|mission| {
            if mission.phase == MissionPhase::Done {
                despawn_buffer.extend(mission.trucks.iter().copied());
                false
            } else {
                true
            }
        });
        for entity in self.despawn_buffer.drain(..) {
            let _ = world.despawn(entity);
        }
    }

    /// Visible trucks that have left the station, ordered by truck number.
    /// Trucks parked on scene waiting to head home stay listed.
    pub fn active_trucks(&self, world: &World) -> Vec<TruckView> {
        let mut trucks: Vec<TruckView> = world
            .query::<(&Truck, &Crew)>()
            .iter()
            .filter(|(_, (truck, _))| truck.is_visible() && truck.has_departed())
            .map(|(_, (truck, crew))| truck.view(crew))
            .collect();
        trucks.sort_by_key(|truck| truck.number);
        trucks
    }

    pub fn mission_views(&self) -> Vec<MissionView> {
        self.missions.iter().map(Mission::view).collect()
    }

    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }

    pub fn station(&self) -> &Station {
        &self.station
    }

    pub fn settings(&self) -> &DispatchSettings {
        &self.settings
    }
}

/// Leave the fire: drive home, or hand the trucks straight back.
fn release(
    mission: &mut Mission,
    world: &mut World,
    station: &mut Station,
    settings: &DispatchSettings,
    events: &mut Vec<SimEvent>,
) {
    if settings.return_to_station {
        mission.begin_return(world, settings.start_stagger_secs);
        debug!(mission = mission.id, "trucks returning");
    } else {
        complete(mission, world, station, events);
    }
}

/// Give the mission's trucks back to the station, exactly once per mission.
/// Only the mission that put its fire out is credited with the fire and its
/// response time.
fn complete(mission: &mut Mission, world: &mut World, station: &mut Station, events: &mut Vec<SimEvent>) {
    let response_time_mins = mission.extinguish_secs / 60.0;
    if mission.put_out_fire {
        station.return_trucks(mission.truck_count());
        station.add_response_time(response_time_mins);
    } else {
        station.release_trucks(mission.truck_count());
    }
    events.push(SimEvent::TrucksReturned {
        mission: mission.id,
        truck_count: mission.truck_count(),
        response_time_mins,
    });
    info!(
        mission = mission.id,
        trucks = mission.truck_count(),
        available = station.available_trucks(),
        "trucks back in service"
    );
    mission.finish(world);
}
