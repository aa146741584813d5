//! Fire entity: severity-driven requirements and extinguish progress.
//!
//! A `Fire` is a hecs component. Only the Dispatch Manager changes its
//! assignment; only mission ticks advance its extinguish timer.

use rand::Rng;
use serde::{Deserialize, Serialize};

use brigade_core::constants::*;
use brigade_core::enums::Accessibility;
use brigade_core::records::FireRecord;
use brigade_core::state::FireView;
use brigade_core::types::{GeoPoint, WorldPoint};

use crate::draw;

/// A burning (or extinguished) fire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fire {
    /// Position in the spawn order of the fire pool.
    pub number: u32,
    pub id: String,
    pub name: String,
    pub location: GeoPoint,
    pub position: WorldPoint,
    severity: u8,
    accessibility: Accessibility,
    duration_mins: f64,
    required_trucks: u32,
    assigned_trucks: u32,
    extinguish_time: f64,
    elapsed_extinguish_time: f64,
    /// Completion already reported for the current assignment.
    completion_signaled: bool,
    active: bool,
}

impl Fire {
    /// Create a burning fire from a pool record, rolling its truck requirement
    /// and cosmetic duration.
    pub fn create<R: Rng>(number: u32, record: &FireRecord, position: WorldPoint, rng: &mut R) -> Self {
        let severity = record.severity.clamp(MIN_SEVERITY, MAX_SEVERITY);
        Self {
            number,
            id: record.id.clone(),
            name: record.name.clone(),
            location: GeoPoint::new(record.lat, record.lon),
            position,
            severity,
            accessibility: record.accessibility,
            duration_mins: draw::duration_mins(severity, rng),
            required_trucks: draw::required_trucks(severity, rng),
            assigned_trucks: 0,
            extinguish_time: 0.0,
            elapsed_extinguish_time: 0.0,
            completion_signaled: false,
            active: true,
        }
    }

    /// Fire with a fixed truck requirement, for tests.
    #[cfg(test)]
    pub fn with_requirement(number: u32, severity: u8, required_trucks: u32) -> Self {
        Self {
            number,
            id: format!("fire-{number}"),
            name: format!("Fire {number}"),
            location: GeoPoint::default(),
            position: WorldPoint::ZERO,
            severity: severity.clamp(MIN_SEVERITY, MAX_SEVERITY),
            accessibility: Accessibility::Good,
            duration_mins: BASE_DURATION_MIN_MINS,
            required_trucks,
            assigned_trucks: 0,
            extinguish_time: 0.0,
            elapsed_extinguish_time: 0.0,
            completion_signaled: false,
            active: true,
        }
    }

    /// Commit `count` more trucks. Keeps extinguish progress, only the rate changes.
    pub fn add_assigned_trucks(&mut self, count: u32) {
        self.assigned_trucks += count;
        if self.assigned_trucks > 0 {
            self.extinguish_time = self.scaled_extinguish_time();
        }
    }

    /// Replace the assignment and restart extinguish progress.
    pub fn assign_trucks(&mut self, count: u32) {
        self.assigned_trucks = count;
        self.extinguish_time = self.scaled_extinguish_time();
        self.elapsed_extinguish_time = 0.0;
        self.completion_signaled = false;
    }

    /// Advance extinguishing by `dt` seconds. Returns true on the tick the
    /// elapsed time first reaches the extinguish time, false otherwise.
    pub fn update_extinguishing(&mut self, dt: f64) -> bool {
        if self.assigned_trucks == 0 || !self.active || self.completion_signaled {
            return false;
        }

        self.elapsed_extinguish_time += dt;
        if self.elapsed_extinguish_time >= self.extinguish_time {
            self.elapsed_extinguish_time = self.extinguish_time;
            self.completion_signaled = true;
            return true;
        }
        false
    }

    /// Mark the fire as out. Terminal.
    pub fn put_out(&mut self) {
        self.active = false;
    }

    /// Clear assignment and timers.
    pub fn reset_assigned_trucks(&mut self) {
        self.assigned_trucks = 0;
        self.extinguish_time = 0.0;
        self.elapsed_extinguish_time = 0.0;
        self.completion_signaled = false;
    }

    /// Trucks still missing to reach the optimal count.
    pub fn remaining_trucks_needed(&self) -> u32 {
        self.required_trucks.saturating_sub(self.assigned_trucks)
    }

    /// Extinguish progress (0.0 - 1.0).
    pub fn extinguish_progress(&self) -> f64 {
        if self.extinguish_time <= 0.0 {
            return 0.0;
        }
        (self.elapsed_extinguish_time / self.extinguish_time).min(1.0)
    }

    /// Seconds left at the current rate.
    pub fn remaining_extinguish_time(&self) -> f64 {
        (self.extinguish_time - self.elapsed_extinguish_time).max(0.0)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn severity(&self) -> u8 {
        self.severity
    }

    pub fn accessibility(&self) -> Accessibility {
        self.accessibility
    }

    pub fn duration_mins(&self) -> f64 {
        self.duration_mins
    }

    pub fn required_trucks(&self) -> u32 {
        self.required_trucks
    }

    pub fn assigned_trucks(&self) -> u32 {
        self.assigned_trucks
    }

    pub fn extinguish_time(&self) -> f64 {
        self.extinguish_time
    }

    pub fn elapsed_extinguish_time(&self) -> f64 {
        self.elapsed_extinguish_time
    }

    /// "lat, lon" label for popups.
    pub fn location_label(&self) -> String {
        self.location.label()
    }

    /// Read-only view for the snapshot.
    pub fn view(&self) -> FireView {
        FireView {
            number: self.number,
            id: self.id.clone(),
            name: self.name.clone(),
            location: self.location,
            position: self.position,
            severity: self.severity,
            accessibility: self.accessibility,
            duration_mins: self.duration_mins,
            required_trucks: self.required_trucks,
            assigned_trucks: self.assigned_trucks,
            remaining_trucks_needed: self.remaining_trucks_needed(),
            progress: self.extinguish_progress(),
            remaining_secs: self.remaining_extinguish_time(),
        }
    }

    /// 30 s at the optimal truck count, scaled by assigned/required, never
    /// slower than 5x the baseline.
    fn scaled_extinguish_time(&self) -> f64 {
        let optimal = f64::from(self.required_trucks.max(1));
        let ratio = (f64::from(self.assigned_trucks) / optimal).max(MIN_EXTINGUISH_RATIO);
        BASE_EXTINGUISH_SECS / ratio
    }
}
