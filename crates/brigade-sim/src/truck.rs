//! Truck movers: start delay, waypoint following and cosmetic rotation.

use serde::{Deserialize, Serialize};

use brigade_core::constants::{ROTATION_SMOOTHING, TRUCK_SPEED, WAYPOINT_EPSILON};
use brigade_core::enums::TruckPhase;
use brigade_core::state::TruckView;
use brigade_core::types::WorldPoint;
use brigade_geo::Route;

/// A fire truck following a waypoint route at constant speed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Truck {
    pub number: u32,
    pub position: WorldPoint,
    /// Direction of travel in radians.
    pub heading: f64,
    /// Smoothed sprite rotation in degrees.
    pub rotation_deg: f64,
    speed: f64,
    waypoints: Vec<WorldPoint>,
    next_waypoint: usize,
    start_delay: f64,
    arrived: bool,
    /// Set on the first move away from the station, never cleared.
    departed: bool,
    visible: bool,
}

/// Ties a truck entity to its mission and target fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crew {
    pub mission: u32,
    pub fire: u32,
}

impl Truck {
    /// A parked truck at `position`.
    pub fn new(number: u32, position: WorldPoint) -> Self {
        Self {
            number,
            position,
            heading: 0.0,
            rotation_deg: 0.0,
            speed: TRUCK_SPEED,
            waypoints: Vec::new(),
            next_waypoint: 0,
            start_delay: 0.0,
            arrived: false,
            departed: false,
            visible: true,
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Install `route`, placing the truck on its first point. With `scatter`
    /// the route gets a final hop to the offset arrival point. A route with
    /// fewer than two points counts as already driven, and the truck is on
    /// scene at once.
    pub fn set_route(&mut self, route: &Route, scatter: Option<WorldPoint>) {
        self.waypoints = route.points().to_vec();
        if let Some(first) = route.first() {
            self.position = first;
        }
        self.next_waypoint = 1;
        self.arrived = route.is_degenerate();
        self.departed = self.arrived;

        if let (false, Some(offset), Some(last)) = (self.arrived, scatter, route.last()) {
            self.waypoints.push(last + offset);
        }
    }

    /// Drive `outbound` backwards from wherever the truck stands now. A
    /// truck still on the way turns around and retraces only the waypoints
    /// it has passed.
    pub fn set_return_route(&mut self, outbound: &Route) {
        let points = outbound.points();
        let passed = if self.arrived {
            points.len()
        } else {
            self.next_waypoint.min(points.len())
        };
        self.waypoints = points[..passed].iter().rev().copied().collect();
        self.next_waypoint = 0;
        self.arrived = self.waypoints.is_empty();
    }

    pub fn set_start_delay(&mut self, delay: f64) {
        self.start_delay = delay;
    }

    pub fn has_started(&self) -> bool {
        self.start_delay <= 0.0
    }

    /// Whether the truck has ever left the station.
    pub fn has_departed(&self) -> bool {
        self.departed
    }

    pub fn has_arrived(&self) -> bool {
        self.arrived
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn start_delay(&self) -> f64 {
        self.start_delay
    }

    pub fn waypoints(&self) -> &[WorldPoint] {
        &self.waypoints
    }

    /// A departed truck waiting out its return stagger is still parked on
    /// scene, so it reports `Arrived`.
    pub fn phase(&self) -> TruckPhase {
        if self.arrived {
            TruckPhase::Arrived
        } else if !self.departed {
            TruckPhase::Idle
        } else if !self.has_started() {
            TruckPhase::Arrived
        } else {
            TruckPhase::Moving
        }
    }

    /// Advance by `dt` seconds. The delay tick consumes the whole step;
    /// movement left over after reaching a waypoint carries on to the next.
    pub fn update(&mut self, dt: f64) {
        if dt <= 0.0 {
            return;
        }
        if self.start_delay > 0.0 {
            self.start_delay -= dt;
            return;
        }
        if self.arrived {
            return;
        }
        self.departed = true;

        let mut budget = self.speed * dt;
        loop {
            let Some(&target) = self.waypoints.get(self.next_waypoint) else {
                self.arrived = true;
                break;
            };

            let delta = target - self.position;
            let distance = delta.length();
            if distance <= WAYPOINT_EPSILON {
                self.position = target;
                self.next_waypoint += 1;
                continue;
            }

            self.heading = delta.y.atan2(delta.x);
            if budget >= distance {
                self.position = target;
                self.next_waypoint += 1;
                budget -= distance;
                if budget <= 0.0 {
                    self.arrived = self.next_waypoint >= self.waypoints.len();
                    break;
                }
            } else {
                self.position += delta / distance * budget;
                break;
            }
        }

        let target_rotation = self.heading.to_degrees() - 90.0;
        self.rotation_deg = lerp_angle(self.rotation_deg, target_rotation, dt * ROTATION_SMOOTHING);
    }

    pub fn view(&self, crew: &Crew) -> TruckView {
        TruckView {
            number: self.number,
            mission: crew.mission,
            fire: crew.fire,
            position: self.position,
            heading: self.heading,
            rotation_deg: self.rotation_deg,
            phase: self.phase(),
        }
    }
}

/// Interpolate between two angles in degrees along the shorter arc.
fn lerp_angle(from: f64, to: f64, t: f64) -> f64 {
    let diff = (to - from + 180.0).rem_euclid(360.0) - 180.0;
    from + diff * t.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight(len: f64) -> Route {
        Route::direct(WorldPoint::ZERO, WorldPoint::new(len, 0.0))
    }

    #[test]
    fn test_moves_at_constant_speed() {
        let mut truck = Truck::new(0, WorldPoint::ZERO);
        truck.set_route(&straight(10.0), None);
        truck.update(1.0);
        assert!((truck.position.x - TRUCK_SPEED).abs() < 1e-9);
        assert!(!truck.has_arrived());
        assert_eq!(truck.phase(), TruckPhase::Moving);
    }

    #[test]
    fn test_arrives_at_end_of_route() {
        let mut truck = Truck::new(0, WorldPoint::ZERO);
        truck.set_route(&straight(3.0), None);
        for _ in 0..10 {
            truck.update(0.5);
        }
        assert!(truck.has_arrived());
        assert!(truck.position.distance(WorldPoint::new(3.0, 0.0)) < 1e-9);
    }

    #[test]
    fn test_leftover_carries_across_waypoints() {
        let route = Route::new(vec![
            WorldPoint::ZERO,
            WorldPoint::new(1.0, 0.0),
            WorldPoint::new(1.0, 5.0),
        ]);
        let mut truck = Truck::new(0, WorldPoint::ZERO);
        truck.set_route(&route, None);
        truck.update(1.0);
        assert!(truck.position.distance(WorldPoint::new(1.0, 1.0)) < 1e-9);
        assert!((truck.heading - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn test_start_delay_blocks_movement() {
        let mut truck = Truck::new(0, WorldPoint::ZERO);
        truck.set_route(&straight(10.0), None);
        truck.set_start_delay(1.0);
        assert_eq!(truck.phase(), TruckPhase::Idle);
        truck.update(0.5);
        assert_eq!(truck.position, WorldPoint::ZERO);
        truck.update(0.5);
        assert_eq!(truck.position, WorldPoint::ZERO);
        assert!(truck.has_started());
        assert!(!truck.has_departed());
        truck.update(0.5);
        assert!((truck.position.x - 1.0).abs() < 1e-9);
        assert!(truck.has_departed());
    }

    #[test]
    fn test_return_stagger_keeps_truck_departed() {
        let mut truck = Truck::new(0, WorldPoint::ZERO);
        let route = straight(2.0);
        truck.set_route(&route, None);
        truck.update(1.0);
        assert!(truck.has_arrived());

        truck.set_return_route(&route);
        truck.set_start_delay(1.0);
        assert!(truck.has_departed());
        assert_eq!(truck.phase(), TruckPhase::Arrived);
        truck.update(0.5);
        assert!(truck.has_departed());
        assert_eq!(truck.position, WorldPoint::new(2.0, 0.0));
    }

    #[test]
    fn test_turn_back_mid_route() {
        let route = Route::new(vec![
            WorldPoint::ZERO,
            WorldPoint::new(2.0, 0.0),
            WorldPoint::new(2.0, 100.0),
        ]);
        let mut truck = Truck::new(0, WorldPoint::ZERO);
        truck.set_route(&route, None);
        truck.update(1.5);
        assert!(truck.position.distance(WorldPoint::new(2.0, 1.0)) < 1e-9);

        truck.set_return_route(&route);
        assert_eq!(truck.waypoints(), &[WorldPoint::new(2.0, 0.0), WorldPoint::ZERO]);
        truck.update(2.0);
        assert!(truck.has_arrived());
        assert!(truck.position.distance(WorldPoint::ZERO) < 1e-9);
    }

    #[test]
    fn test_turn_back_before_departure() {
        let route = straight(10.0);
        let mut truck = Truck::new(0, WorldPoint::ZERO);
        truck.set_route(&route, None);
        truck.set_start_delay(1.0);

        truck.set_return_route(&route);
        truck.set_start_delay(0.0);
        truck.update(0.1);
        assert!(truck.has_arrived());
        assert_eq!(truck.position, WorldPoint::ZERO);
    }

    #[test]
    fn test_degenerate_routes_arrive_immediately() {
        let mut empty = Truck::new(0, WorldPoint::new(2.0, 2.0));
        empty.set_route(&Route::default(), Some(WorldPoint::new(0.5, 0.0)));
        assert!(empty.has_arrived());
        assert_eq!(empty.position, WorldPoint::new(2.0, 2.0));

        let mut single = Truck::new(1, WorldPoint::ZERO);
        single.set_route(&Route::new(vec![WorldPoint::new(4.0, 1.0)]), None);
        assert!(single.has_arrived());
        assert_eq!(single.position, WorldPoint::new(4.0, 1.0));
    }

    #[test]
    fn test_scatter_appends_offset_arrival() {
        let mut truck = Truck::new(0, WorldPoint::ZERO);
        let offset = WorldPoint::new(0.0, 0.4);
        truck.set_route(&straight(2.0), Some(offset));
        assert_eq!(truck.waypoints().len(), 3);
        for _ in 0..20 {
            truck.update(0.25);
        }
        assert!(truck.has_arrived());
        assert!(truck.position.distance(WorldPoint::new(2.0, 0.4)) < 1e-9);
    }

    #[test]
    fn test_return_route_goes_back_to_start() {
        let mut truck = Truck::new(0, WorldPoint::ZERO);
        let route = straight(4.0);
        truck.set_route(&route, None);
        for _ in 0..4 {
            truck.update(1.0);
        }
        assert!(truck.has_arrived());

        truck.set_return_route(&route);
        assert!(!truck.has_arrived());
        for _ in 0..4 {
            truck.update(1.0);
        }
        assert!(truck.has_arrived());
        assert!(truck.position.distance(WorldPoint::ZERO) < 1e-9);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut truck = Truck::new(0, WorldPoint::ZERO);
        truck.set_route(&straight(4.0), None);
        truck.set_start_delay(0.5);
        for _ in 0..10 {
            truck.update(0.0);
        }
        assert_eq!(truck.start_delay(), 0.5);
        assert_eq!(truck.position, WorldPoint::ZERO);
        assert_eq!(truck.rotation_deg, 0.0);
    }

    #[test]
    fn test_lerp_angle_takes_short_arc() {
        assert!((lerp_angle(170.0, -170.0, 0.5) - 180.0).abs() < 1e-9);
        assert!((lerp_angle(0.0, 90.0, 2.0) - 90.0).abs() < 1e-9);
    }
}
