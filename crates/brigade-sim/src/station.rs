//! Fire station: fleet counters and response statistics.

use serde::{Deserialize, Serialize};

use brigade_core::records::StationRecord;
use brigade_core::state::StationView;
use brigade_core::types::{GeoPoint, WorldPoint};

/// The single station trucks are dispatched from.
///
/// Invariant: `available_trucks + trucks_on_mission == total_trucks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub location: GeoPoint,
    pub position: WorldPoint,
    total_trucks: u32,
    available_trucks: u32,
    trucks_on_mission: u32,
    fires_extinguished: u32,
    /// Summed mission response times in minutes.
    total_response_time: f64,
}

impl Station {
    pub fn new(id: &str, name: &str, location: GeoPoint, position: WorldPoint, total_trucks: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            location,
            position,
            total_trucks,
            available_trucks: total_trucks,
            trucks_on_mission: 0,
            fires_extinguished: 0,
            total_response_time: 0.0,
        }
    }

    pub fn from_record(record: &StationRecord, position: WorldPoint) -> Self {
        Self::new(
            &record.id,
            &record.name,
            GeoPoint::new(record.lat, record.lon),
            position,
            record.total_trucks,
        )
    }

    /// True when `count` trucks are free.
    pub fn can_dispatch(&self, count: u32) -> bool {
        count <= self.available_trucks
    }

    /// Move `count` trucks out on a mission. Leaves the counters untouched
    /// and returns false when the request cannot be met.
    pub fn dispatch_trucks(&mut self, count: u32) -> bool {
        if !self.can_dispatch(count) {
            return false;
        }
        self.available_trucks -= count;
        self.trucks_on_mission += count;
        true
    }

    /// Bring home the mission that put its fire out. Counts one extinguished fire.
    pub fn return_trucks(&mut self, count: u32) {
        self.release_trucks(count);
        self.fires_extinguished += 1;
    }

    /// Put trucks back in service without crediting a fire, for missions
    /// whose fire was put out by another crew.
    pub fn release_trucks(&mut self, count: u32) {
        debug_assert!(
            count <= self.trucks_on_mission,
            "returning more trucks than are on mission: {count} > {}",
            self.trucks_on_mission
        );
        let count = count.min(self.trucks_on_mission);
        self.trucks_on_mission -= count;
        self.available_trucks += count;
    }

    /// Record one mission's response time (minutes).
    pub fn add_response_time(&mut self, minutes: f64) {
        self.total_response_time += minutes;
    }

    /// Percentage of the fleet out on missions.
    pub fn occupancy_percentage(&self) -> f64 {
        if self.total_trucks == 0 {
            return 0.0;
        }
        f64::from(self.trucks_on_mission) / f64::from(self.total_trucks) * 100.0
    }

    /// Mean response time in minutes over completed missions.
    pub fn average_response_time(&self) -> f64 {
        if self.fires_extinguished == 0 {
            return 0.0;
        }
        self.total_response_time / f64::from(self.fires_extinguished)
    }

    pub fn total_trucks(&self) -> u32 {
        self.total_trucks
    }

    pub fn available_trucks(&self) -> u32 {
        self.available_trucks
    }

    pub fn trucks_on_mission(&self) -> u32 {
        self.trucks_on_mission
    }

    pub fn fires_extinguished(&self) -> u32 {
        self.fires_extinguished
    }

    pub fn total_response_time(&self) -> f64 {
        self.total_response_time
    }

    pub fn view(&self) -> StationView {
        StationView {
            id: self.id.clone(),
            name: self.name.clone(),
            location: self.location,
            position: self.position,
            total_trucks: self.total_trucks,
            available_trucks: self.available_trucks,
            on_mission: self.trucks_on_mission,
            fires_extinguished: self.fires_extinguished,
            occupancy_pct: self.occupancy_percentage(),
            average_response_mins: self.average_response_time(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(total: u32) -> Station {
        Station::new("s1", "Central", GeoPoint::default(), WorldPoint::ZERO, total)
    }

    #[test]
    fn test_dispatch_and_return() {
        let mut s = station(5);
        assert!(s.dispatch_trucks(3));
        assert_eq!(s.available_trucks(), 2);
        assert_eq!(s.trucks_on_mission(), 3);
        assert!((s.occupancy_percentage() - 60.0).abs() < 1e-9);

        s.return_trucks(3);
        assert_eq!(s.available_trucks(), 5);
        assert_eq!(s.trucks_on_mission(), 0);
        assert_eq!(s.fires_extinguished(), 1);
    }

    #[test]
    fn test_refused_dispatch_leaves_counters() {
        let mut s = station(5);
        assert!(!s.can_dispatch(6));
        assert!(!s.dispatch_trucks(6));
        assert_eq!(s.available_trucks(), 5);
        assert_eq!(s.trucks_on_mission(), 0);
    }

    #[test]
    fn test_can_dispatch_is_available_at_least_n() {
        let mut s = station(2);
        assert!(s.can_dispatch(0));
        assert!(s.can_dispatch(2));
        assert!(!s.can_dispatch(3));
        assert!(s.dispatch_trucks(2));
        assert!(s.can_dispatch(0));
        assert!(!s.can_dispatch(1));
    }

    #[test]
    fn test_release_does_not_credit_a_fire() {
        let mut s = station(5);
        assert!(s.dispatch_trucks(3));
        s.release_trucks(1);
        s.return_trucks(2);
        assert_eq!(s.available_trucks(), 5);
        assert_eq!(s.fires_extinguished(), 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "returning more trucks than are on mission")]
    fn test_over_return_is_caught() {
        let mut s = station(5);
        assert!(s.dispatch_trucks(2));
        s.return_trucks(4);
    }

    #[test]
    fn test_empty_fleet() {
        let s = station(0);
        assert!(!s.can_dispatch(1));
        assert_eq!(s.occupancy_percentage(), 0.0);
        assert_eq!(s.average_response_time(), 0.0);
    }

    #[test]
    fn test_average_response_time() {
        let mut s = station(5);
        assert!(s.dispatch_trucks(1));
        s.return_trucks(1);
        s.add_response_time(2.0);
        assert!(s.dispatch_trucks(1));
        s.return_trucks(1);
        s.add_response_time(4.0);
        assert!((s.average_response_time() - 3.0).abs() < 1e-9);
    }
}
