//! Mission data model: one dispatch batch of trucks bound to one fire.
//!
//! Stored in the Dispatch Manager's mission list, not as ECS entities. The
//! trucks themselves are entities; the mission only holds their handles.

use hecs::{Entity, World};

use brigade_core::enums::MissionPhase;
use brigade_core::state::MissionView;
use brigade_geo::Route;

use crate::truck::Truck;

#[derive(Debug, Clone)]
pub struct Mission {
    pub id: u32,
    /// The hecs entity of the target fire.
    pub fire_entity: Entity,
    /// Pool number of the target fire.
    pub fire_number: u32,
    /// Truck entities, in departure order.
    pub trucks: Vec<Entity>,
    pub phase: MissionPhase,
    /// Seconds spent extinguishing. Reported as the response time.
    pub extinguish_secs: f64,
    /// Outbound route, reversed for the trip home.
    pub outbound_route: Route,
    /// This mission's crews put the fire out.
    pub put_out_fire: bool,
}

impl Mission {
    pub fn new(id: u32, fire_entity: Entity, fire_number: u32, trucks: Vec<Entity>, route: Route) -> Self {
        Self {
            id,
            fire_entity,
            fire_number,
            trucks,
            phase: MissionPhase::Traveling,
            extinguish_secs: 0.0,
            outbound_route: route,
            put_out_fire: false,
        }
    }

    pub fn truck_count(&self) -> u32 {
        self.trucks.len() as u32
    }

    /// Tick every truck of this mission.
    pub fn update_trucks(&self, world: &mut World, dt: f64) {
        for &entity in &self.trucks {
            if let Ok(mut truck) = world.get::<&mut Truck>(entity) {
                truck.update(dt);
            }
        }
    }

    /// True when every truck reports arrived. A truck that no longer exists
    /// does not hold the mission back.
    pub fn all_arrived(&self, world: &World) -> bool {
        self.trucks.iter().all(|&entity| {
            world
                .get::<&Truck>(entity)
                .map(|truck| truck.has_arrived())
                .unwrap_or(true)
        })
    }

    /// Number of the last truck to depart, for the arrival event.
    pub fn last_truck_number(&self, world: &World) -> u32 {
        self.trucks
            .last()
            .and_then(|&entity| world.get::<&Truck>(entity).ok().map(|truck| truck.number))
            .unwrap_or_default()
    }

    pub fn begin_extinguishing(&mut self) {
        self.extinguish_secs = 0.0;
        self.phase = MissionPhase::Extinguishing;
    }

    /// Send every truck home along the reversed route. Trucks parked on
    /// scene leave staggered like the outbound departure; trucks still on
    /// the road turn around at once.
    pub fn begin_return(&mut self, world: &mut World, stagger_secs: f64) {
        for (i, &entity) in self.trucks.iter().enumerate() {
            if let Ok(mut truck) = world.get::<&mut Truck>(entity) {
                let delay = if truck.has_arrived() {
                    i as f64 * stagger_secs
                } else {
                    0.0
                };
                truck.set_return_route(&self.outbound_route);
                truck.set_start_delay(delay);
            }
        }
        self.phase = MissionPhase::Returning;
    }

    /// Hide the trucks and mark the mission for removal.
    pub fn finish(&mut self, world: &mut World) {
        for &entity in &self.trucks {
            if let Ok(mut truck) = world.get::<&mut Truck>(entity) {
                truck.hide();
            }
        }
        self.phase = MissionPhase::Done;
    }

    pub fn view(&self) -> MissionView {
        MissionView {
            mission: self.id,
            fire: self.fire_number,
            phase: self.phase,
            truck_count: self.truck_count(),
            extinguish_secs: self.extinguish_secs,
        }
    }
}
