//! Geometry for BRIGADE.
//!
//! Slippy-map projection between lat/lon and world space, route
//! polylines, proximity filtering of point records, and the seam for
//! external routing services.

pub use brigade_core as core;

pub mod projection;
pub mod proximity;
pub mod route;

// Re-export key types for convenience.
pub use projection::TileProjection;
pub use proximity::{filter_nearby, nearest, planar_distance_deg};
pub use route::{Route, RouteSource, StraightLine};
