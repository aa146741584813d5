//! Proximity queries over point records in degree space.
//!
//! Distances here are plain Euclidean distances between (lat, lon) pairs.
//! Good enough for a "within a few kilometres of the city" filter.

use brigade_core::records::Located;
use brigade_core::types::GeoPoint;

/// Euclidean distance between two coordinates, in degrees.
pub fn planar_distance_deg(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = b.lat - a.lat;
    let d_lon = b.lon - a.lon;
    (d_lat * d_lat + d_lon * d_lon).sqrt()
}

/// Records within `radius_deg` of `center`, in input order.
pub fn filter_nearby<T: Located + Clone>(records: &[T], center: GeoPoint, radius_deg: f64) -> Vec<T> {
    records
        .iter()
        .filter(|r| planar_distance_deg(r.location(), center) <= radius_deg)
        .cloned()
        .collect()
}

/// The record closest to `target`. First one wins on ties.
pub fn nearest<T: Located>(records: &[T], target: GeoPoint) -> Option<&T> {
    records.iter().min_by(|a, b| {
        planar_distance_deg(a.location(), target).total_cmp(&planar_distance_deg(b.location(), target))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use brigade_core::records::StationRecord;

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
    fn test_filter_nearby_keeps_order() {
        let center = GeoPoint::new(46.55, 15.64);
        let records = vec![
            station("a", 46.56, 15.64),
            station("far", 46.70, 15.64),
            station("b", 46.55, 15.60),
        ];
        let near = filter_nearby(&records, center, 0.05);
        let ids: Vec<&str> = near.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_nearest() {
        let records = vec![station("a", 46.60, 15.64), station("b", 46.56, 15.64)];
        let found = nearest(&records, GeoPoint::new(46.55, 15.64)).unwrap();
        assert_eq!(found.id, "b");
        assert!(nearest::<StationRecord>(&[], GeoPoint::default()).is_none());
    }
}
