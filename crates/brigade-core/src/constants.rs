//! Simulation constants and tuning parameters.

/// Nominal host frame rate (Hz).
pub const FRAME_RATE: u32 = 30;

/// Largest frame delta the simulation accepts in one step (seconds).
pub const MAX_FRAME_DT: f64 = 1.0 / FRAME_RATE as f64;

// --- Fires ---

/// Lowest fire severity.
pub const MIN_SEVERITY: u8 = 1;

/// Highest fire severity.
pub const MAX_SEVERITY: u8 = 3;

/// Extinguish time with exactly the required number of trucks (seconds).
pub const BASE_EXTINGUISH_SECS: f64 = 30.0;

/// Lower bound on assigned/required. Caps the slowdown at 5x the baseline.
pub const MIN_EXTINGUISH_RATIO: f64 = 0.2;

/// Cosmetic duration band for severity 1 (minutes). Shifts up one minute per severity step.
pub const BASE_DURATION_MIN_MINS: f64 = 2.0;
pub const BASE_DURATION_MAX_MINS: f64 = 3.0;

// --- Station ---

/// Fleet size for a station record without `totalTrucks`.
pub const DEFAULT_STATION_TRUCKS: u32 = 5;

// --- Trucks ---

/// Truck speed in world units (map tiles) per second.
pub const TRUCK_SPEED: f64 = 2.0;

/// Distance under which a waypoint counts as reached.
pub const WAYPOINT_EPSILON: f64 = 1e-6;

/// Departure spacing between trucks of one mission (seconds).
pub const TRUCK_START_STAGGER_SECS: f64 = 0.5;

/// Terminal scatter offset band so converging trucks do not stack.
pub const SCATTER_MIN_DISTANCE: f64 = 0.3;
pub const SCATTER_MAX_DISTANCE: f64 = 0.6;

/// Sprite rotation smoothing rate (fraction of the gap closed per second).
pub const ROTATION_SMOOTHING: f64 = 10.0;

// --- Spawning ---

/// Spawn interval band between fires (seconds).
pub const MIN_SPAWN_INTERVAL_SECS: f64 = 15.0;
pub const MAX_SPAWN_INTERVAL_SECS: f64 = 30.0;

/// Game over once this many fires burn at the same time.
pub const MAX_ACTIVE_FIRES: u32 = 5;

/// Fires burning at game start.
pub const INITIAL_FIRES: u32 = 3;

/// Number of fires picked from the candidates for one game.
pub const FIRE_POOL_SIZE: usize = 10;

/// Radius around the city for candidate fires and stations (degrees).
pub const NEARBY_RADIUS_DEG: f64 = 0.05;

// --- Map ---

/// Slippy-map zoom level of the world grid.
pub const MAP_ZOOM: u32 = 17;

/// Deepest zoom any tile server serves.
pub const MAX_MAP_ZOOM: u32 = 22;

/// Visible tile grid around the city center.
pub const GRID_WIDTH: u32 = 32;
pub const GRID_HEIGHT: u32 = 18;
