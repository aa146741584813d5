//! Route polylines in world space, and the seam for external routers.
//!
//! Routing services live outside the simulation. They hand over a finished
//! list of lat/lon points which is projected once into a [`Route`].

use serde::{Deserialize, Serialize};

use brigade_core::types::{GeoPoint, WorldPoint};

use crate::projection::TileProjection;

/// An ordered waypoint sequence in world space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    points: Vec<WorldPoint>,
}

impl Route {
    pub fn new(points: Vec<WorldPoint>) -> Self {
        Self { points }
    }

    /// Project a lat/lon polyline into world space.
    pub fn from_geo(projection: &TileProjection, points: &[GeoPoint]) -> Self {
        Self::new(points.iter().map(|p| projection.to_world(*p)).collect())
    }

    /// Two-point route straight from `from` to `to`.
    pub fn direct(from: WorldPoint, to: WorldPoint) -> Self {
        Self::new(vec![from, to])
    }

    /// The same path driven backwards.
    pub fn reversed(&self) -> Self {
        Self::new(self.points.iter().rev().copied().collect())
    }

    pub fn points(&self) -> &[WorldPoint] {
        &self.points
    }

    pub fn first(&self) -> Option<WorldPoint> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<WorldPoint> {
        self.points.last().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Fewer than two points: nothing to drive.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 2
    }

    /// Total polyline length in world units.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .sum()
    }
}

/// Source of road routes between two coordinates.
///
/// Implementations may block (HTTP lookups, caches). They must be called
/// outside the simulation tick.
pub trait RouteSource {
    /// Route from `from` to `to`, or `None` when no route is known.
    fn route(&mut self, from: GeoPoint, to: GeoPoint) -> Option<Vec<GeoPoint>>;
}

/// Straight-line stand-in router that splits the segment evenly.
#[derive(Debug, Clone, Copy)]
pub struct StraightLine {
    pub segments: u32,
}

impl Default for StraightLine {
    fn default() -> Self {
        Self { segments: 8 }
    }
}

impl RouteSource for StraightLine {
    fn route(&mut self, from: GeoPoint, to: GeoPoint) -> Option<Vec<GeoPoint>> {
        let segments = self.segments.max(1);
        let points = (0..=segments)
            .map(|i| {
                let t = f64::from(i) / f64::from(segments);
                GeoPoint::new(
                    from.lat + (to.lat - from.lat) * t,
                    from.lon + (to.lon - from.lon) * t,
                )
            })
            .collect();
        Some(points)
    }
}
