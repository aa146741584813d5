//! Theater setup: the city, its station and the fire pool for one game.
//!
//! Candidates outside the configured radius of the city are ignored. The
//! fire pool is a random pick from the rest, shuffled into spawn order.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use brigade_core::records::{FireRecord, StationRecord};
use brigade_core::types::GeoPoint;
use brigade_geo::filter_nearby;

use crate::draw;
use crate::engine::SimConfig;
use crate::error::SetupError;

/// Everything a game needs before the first tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theater {
    pub city: GeoPoint,
    pub station: StationRecord,
    /// Fires in spawn order.
    pub fire_pool: Vec<FireRecord>,
}

/// Build a theater around `city` from all known fires and stations.
pub fn build_theater<R: Rng>(
    fires: &[FireRecord],
    stations: &[StationRecord],
    city: GeoPoint,
    config: &SimConfig,
    rng: &mut R,
) -> Result<Theater, SetupError> {
    let nearby_stations = filter_nearby(stations, city, config.nearby_radius_deg);
    let station = draw::pick_one(&nearby_stations, rng)
        .cloned()
        .ok_or(SetupError::NoStation)?;

    let nearby_fires = filter_nearby(fires, city, config.nearby_radius_deg);
    if nearby_fires.is_empty() {
        return Err(SetupError::NoFires);
    }
    let fire_pool = draw::pick_random(&nearby_fires, config.fire_pool_size, rng);

    info!(
        station = %station.name,
        candidates = nearby_fires.len(),
        pool = fire_pool.len(),
        "theater ready"
    );

    Ok(Theater {
        city,
        station,
        fire_pool,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use brigade_core::enums::Accessibility;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const CITY: GeoPoint = GeoPoint {
        lat: 46.5547,
        lon: 15.6459,
    };

    fn fire(id: &str, lat: f64, lon: f64) -> FireRecord {
        FireRecord {
            id: id.into(),
            name: id.into(),
            lat,
            lon,
            severity: 2,
            accessibility: Accessibility::Good,
        }
    }

    fn station(id: &str, lat: f64, lon: f64) -> StationRecord {
        StationRecord {
            id: id.into(),
            name: id.into(),
            lat,
            lon,
            total_trucks: 5,
        }
    }

    #[test]
    fn test_pool_only_holds_nearby_fires() {
        let mut fires: Vec<FireRecord> = (0..15)
            .map(|i| fire(&format!("near{i}"), CITY.lat + i as f64 * 0.001, CITY.lon))
            .collect();
        fires.push(fire("far", CITY.lat + 1.0, CITY.lon));
        let stations = vec![station("s", CITY.lat, CITY.lon + 0.01)];
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let theater = build_theater(&fires, &stations, CITY, &SimConfig::default(), &mut rng).unwrap();
        assert_eq!(theater.fire_pool.len(), 10);
        assert!(theater.fire_pool.iter().all(|f| f.id.starts_with("near")));
        let mut ids: Vec<&str> = theater.fire_pool.iter().map(|f| f.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_small_candidate_set_is_kept_whole() {
        let fires = vec![fire("a", CITY.lat, CITY.lon), fire("b", CITY.lat, CITY.lon + 0.001)];
        let stations = vec![station("s", CITY.lat, CITY.lon)];
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let theater = build_theater(&fires, &stations, CITY, &SimConfig::default(), &mut rng).unwrap();
        assert_eq!(theater.fire_pool.len(), 2);
    }

    #[test]
    fn test_missing_station_or_fires() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let fires = vec![fire("a", CITY.lat, CITY.lon)];
        let far_station = vec![station("s", 0.0, 0.0)];
        assert_eq!(
            build_theater(&fires, &far_station, CITY, &SimConfig::default(), &mut rng),
            Err(SetupError::NoStation)
        );

        let stations = vec![station("s", CITY.lat, CITY.lon)];
        let far_fires = vec![fire("x", 0.0, 0.0)];
        assert_eq!(
            build_theater(&far_fires, &stations, CITY, &SimConfig::default(), &mut rng),
            Err(SetupError::NoFires)
        );
    }

    #[test]
    fn test_same_seed_same_theater() {
        let fires: Vec<FireRecord> = (0..20)
            .map(|i| fire(&format!("f{i}"), CITY.lat, CITY.lon + i as f64 * 0.001))
            .collect();
        let stations = vec![station("s1", CITY.lat, CITY.lon), station("s2", CITY.lat + 0.01, CITY.lon)];
        let a = build_theater(&fires, &stations, CITY, &SimConfig::default(), &mut ChaCha8Rng::seed_from_u64(8)).unwrap();
        let b = build_theater(&fires, &stations, CITY, &SimConfig::default(), &mut ChaCha8Rng::seed_from_u64(8)).unwrap();
        assert_eq!(a, b);
    }
}
