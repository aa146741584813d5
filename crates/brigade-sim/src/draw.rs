//! Random draw policy.
//!
//! Every random quantity in the simulation is drawn here from an injected
//! generator, so a seeded `ChaCha8Rng` reproduces a whole game.

use std::f64::consts::TAU;

use rand::seq::SliceRandom;
use rand::Rng;

use brigade_core::constants::*;
use brigade_core::types::WorldPoint;

/// Trucks needed for a 30-second extinguish: `severity` or `severity + 1`.
pub fn required_trucks<R: Rng>(severity: u8, rng: &mut R) -> u32 {
    u32::from(severity) + u32::from(rng.gen_bool(0.5))
}

/// Cosmetic duration estimate in minutes.
/// Severity 1: 2-3 min, severity 2: 3-4 min, severity 3: 4-5 min.
pub fn duration_mins<R: Rng>(severity: u8, rng: &mut R) -> f64 {
    let shift = f64::from(severity.saturating_sub(1));
    let min = BASE_DURATION_MIN_MINS + shift;
    let max = BASE_DURATION_MAX_MINS + shift;
    rng.gen_range(min..max)
}

/// Seconds until the next fire spawn, uniform in `[min, max)`.
pub fn spawn_interval<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..max)
}

/// Random terminal offset so trucks converging on one fire do not stack.
pub fn scatter_offset<R: Rng>(rng: &mut R) -> WorldPoint {
    let angle = rng.gen_range(0.0..TAU);
    let distance = rng.gen_range(SCATTER_MIN_DISTANCE..SCATTER_MAX_DISTANCE);
    WorldPoint::new(angle.cos(), angle.sin()) * distance
}

/// Up to `count` distinct items in random order.
pub fn pick_random<T: Clone, R: Rng>(items: &[T], count: usize, rng: &mut R) -> Vec<T> {
    let mut picked: Vec<T> = items.choose_multiple(rng, count).cloned().collect();
    picked.shuffle(rng);
    picked
}

/// One item chosen uniformly, or `None` when empty.
pub fn pick_one<'a, T, R: Rng>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    items.choose(rng)
}
