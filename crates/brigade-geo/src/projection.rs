//! Web-Mercator tile projection: converts between lat/lon and world space.
//!
//! World space is measured in map tiles at a fixed zoom level. The origin
//! sits at the lower-left corner of a `GRID_WIDTH` x `GRID_HEIGHT` tile grid
//! centered on the city, with x growing East and y growing North.

use std::f64::consts::PI;

use brigade_core::constants::{GRID_HEIGHT, GRID_WIDTH, MAX_MAP_ZOOM};
use brigade_core::types::{GeoPoint, WorldPoint};

/// Integer slippy-map tile containing the coordinate.
pub fn lat_lon_to_tile(lat: f64, lon: f64, zoom: u32) -> (i64, i64) {
    let tile = lat_lon_to_tile_f64(lat, lon, zoom);
    (tile.x.floor() as i64, tile.y.floor() as i64)
}

/// Fractional tile coordinate (y grows South).
pub fn lat_lon_to_tile_f64(lat: f64, lon: f64, zoom: u32) -> WorldPoint {
    let n = tiles_per_axis(zoom);
    let x = (lon + 180.0) / 360.0 * n;
    let lat_rad = lat.to_radians();
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * n;
    WorldPoint::new(x, y)
}

/// Inverse of [`lat_lon_to_tile_f64`].
pub fn tile_to_lat_lon(tile_x: f64, tile_y: f64, zoom: u32) -> GeoPoint {
    let n = tiles_per_axis(zoom);
    let lon = tile_x / n * 360.0 - 180.0;
    let lat_rad = (PI * (1.0 - 2.0 * tile_y / n)).sinh().atan();
    GeoPoint::new(lat_rad.to_degrees(), lon)
}

/// 2^zoom, without integer shifts that overflow on large zooms.
fn tiles_per_axis(zoom: u32) -> f64 {
    2f64.powf(f64::from(zoom))
}

/// Projection anchored on a city center.
#[derive(Debug, Clone)]
pub struct TileProjection {
    center: GeoPoint,
    zoom: u32,
    start_tile_x: i64,
    start_tile_y: i64,
}

impl TileProjection {
    /// Create a projection whose tile grid is centered on `center`.
    /// Zoom is capped at [`MAX_MAP_ZOOM`].
    pub fn new(center: GeoPoint, zoom: u32) -> Self {
        let zoom = zoom.min(MAX_MAP_ZOOM);
        let (center_x, center_y) = lat_lon_to_tile(center.lat, center.lon, zoom);
        Self {
            center,
            zoom,
            start_tile_x: center_x - i64::from(GRID_WIDTH / 2),
            start_tile_y: center_y - i64::from(GRID_HEIGHT / 2),
        }
    }

    /// Convert lat/lon (degrees) to world space.
    pub fn to_world(&self, point: GeoPoint) -> WorldPoint {
        let tile = lat_lon_to_tile_f64(point.lat, point.lon, self.zoom);
        WorldPoint::new(
            tile.x - self.start_tile_x as f64,
            (self.start_tile_y + i64::from(GRID_HEIGHT)) as f64 - tile.y,
        )
    }

    /// Convert world space back to lat/lon (degrees).
    pub fn to_geo(&self, world: WorldPoint) -> GeoPoint {
        let tile_x = world.x + self.start_tile_x as f64;
        let tile_y = (self.start_tile_y + i64::from(GRID_HEIGHT)) as f64 - world.y;
        tile_to_lat_lon(tile_x, tile_y, self.zoom)
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    /// World-space size of the tile grid.
    pub fn extent(&self) -> WorldPoint {
        WorldPoint::new(f64::from(GRID_WIDTH), f64::from(GRID_HEIGHT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_of_null_island() {
        assert_eq!(lat_lon_to_tile(0.0, 0.0, 1), (1, 1));
        assert_eq!(lat_lon_to_tile(0.0, 0.0, 17), (65_536, 65_536));
        // Just west of the meridian and north of the equator.
        assert_eq!(lat_lon_to_tile(0.001, -0.001, 17), (65_535, 65_535));
    }

    #[test]
    fn test_tile_roundtrip() {
        let tile = lat_lon_to_tile_f64(46.5547, 15.6459, 17);
        let back = tile_to_lat_lon(tile.x, tile.y, 17);
        assert!((back.lat - 46.5547).abs() < 1e-9, "lat: {}", back.lat);
        assert!((back.lon - 15.6459).abs() < 1e-9, "lon: {}", back.lon);
    }

    #[test]
    fn test_world_roundtrip() {
        let proj = TileProjection::new(GeoPoint::new(46.5547, 15.6459), 17);
        let point = GeoPoint::new(46.5601, 15.6312);
        let world = proj.to_world(point);
        let back = proj.to_geo(world);
        assert!((back.lat - point.lat).abs() < 1e-9);
        assert!((back.lon - point.lon).abs() < 1e-9);
    }

    #[test]
    fn test_center_lands_mid_grid() {
        let center = GeoPoint::new(46.5547, 15.6459);
        let proj = TileProjection::new(center, 17);
        let world = proj.to_world(center);
        let half_w = f64::from(GRID_WIDTH / 2);
        let half_h = f64::from(GRID_HEIGHT / 2);
        assert!(world.x >= half_w && world.x < half_w + 1.0, "x = {}", world.x);
        assert!(world.y > half_h - 1.0 && world.y <= half_h, "y = {}", world.y);
    }

    #[test]
    fn test_world_axes_point_north_east() {
        let center = GeoPoint::new(46.5547, 15.6459);
        let proj = TileProjection::new(center, 17);
        let origin = proj.to_world(center);
        let north = proj.to_world(GeoPoint::new(center.lat + 0.001, center.lon));
        let east = proj.to_world(GeoPoint::new(center.lat, center.lon + 0.001));
        assert!(north.y > origin.y, "north should increase y");
        assert!((north.x - origin.x).abs() < 1e-9);
        assert!(east.x > origin.x, "east should increase x");
    }

    #[test]
    fn test_oversized_zoom_is_capped() {
        let center = GeoPoint::new(46.5547, 15.6459);
        let proj = TileProjection::new(center, 40);
        assert_eq!(proj.zoom(), MAX_MAP_ZOOM);
        let world = proj.to_world(center);
        assert!(world.x.is_finite() && world.y.is_finite());

        let tile = lat_lon_to_tile_f64(center.lat, center.lon, 40);
        assert!(tile.x.is_finite() && tile.x > 0.0);
    }
}
