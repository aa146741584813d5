//! brigade-drill: headless drill run of the dispatch simulation.
//!
//! Usage:
//!   brigade-drill --fires fires.json --stations station.json --center 46.5547,15.6459
//!   brigade-drill --fires fires.json --stations station.json --center 46.5547,15.6459 --seed 7 --seconds 300
//!
//! Every burning fire that still needs trucks gets `min(available, needed)`
//! trucks along a straight-line route. Set `RUST_LOG=debug` for the full
//! event trace.

use std::fs;
use std::path::PathBuf;
use std::process;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use brigade_core::constants::FRAME_RATE;
use brigade_core::events::SimEvent;
use brigade_core::records::{parse_fires, parse_stations};
use brigade_core::types::GeoPoint;
use brigade_geo::{RouteSource, StraightLine};
use brigade_sim::scenario::build_theater;
use brigade_sim::{SimConfig, SimulationEngine};

struct DrillArgs {
    fires: PathBuf,
    stations: PathBuf,
    center: GeoPoint,
    seed: u64,
    seconds: f64,
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| matches!(a.as_str(), "help" | "--help" | "-h")) {
        print_usage();
        return;
    }

    let Some(drill) = parse_args(&args[1..]) else {
        print_usage();
        process::exit(1);
    };

    if let Err(message) = run(&drill) {
        eprintln!("Error: {message}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "brigade-drill: run the fire dispatch simulation without a map\n\
         \n\
           --fires <path>      Fire records JSON ({{\"fires\": [...]}})\n\
           --stations <path>   Station records JSON ({{\"station\": ...}} or {{\"stations\": [...]}})\n\
           --center <lat,lon>  City center\n\
           --seed <N>          RNG seed (default: 42)\n\
           --seconds <S>       Simulated seconds to run (default: 600)\n\
           --json              Print the final snapshot as JSON\n\
         \n\
         Example:\n\
         \n\
           brigade-drill --fires data/fires.json --stations data/station.json --center 46.5547,15.6459\n"
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_center(value: &str) -> Option<GeoPoint> {
    let (lat, lon) = value.split_once(',')?;
    Some(GeoPoint::new(lat.trim().parse().ok()?, lon.trim().parse().ok()?))
}

fn parse_args(args: &[String]) -> Option<DrillArgs> {
    let fires = PathBuf::from(flag_value(args, "--fires")?);
    let stations = PathBuf::from(flag_value(args, "--stations")?);
    let center = parse_center(flag_value(args, "--center")?)?;
    let seed = match flag_value(args, "--seed") {
        Some(v) => v.parse().ok()?,
        None => SimConfig::default().seed,
    };
    let seconds = match flag_value(args, "--seconds") {
        Some(v) => v.parse().ok()?,
        None => 600.0,
    };
    Some(DrillArgs {
        fires,
        stations,
        center,
        seed,
        seconds,
        json: args.iter().any(|a| a == "--json"),
    })
}

fn run(drill: &DrillArgs) -> Result<(), String> {
    let fire_json = fs::read_to_string(&drill.fires)
        .map_err(|e| format!("reading {}: {e}", drill.fires.display()))?;
    let station_json = fs::read_to_string(&drill.stations)
        .map_err(|e| format!("reading {}: {e}", drill.stations.display()))?;
    let fires = parse_fires(&fire_json).map_err(|e| e.to_string())?;
    let stations = parse_stations(&station_json).map_err(|e| e.to_string())?;

    let config = SimConfig {
        seed: drill.seed,
        ..Default::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(drill.seed);
    let theater = build_theater(&fires, &stations, drill.center, &config, &mut rng).map_err(|e| e.to_string())?;
    let station_geo = GeoPoint::new(theater.station.lat, theater.station.lon);

    let mut engine = SimulationEngine::new(config, theater);
    let mut router = StraightLine::default();
    let dt = 1.0 / f64::from(FRAME_RATE);
    let frames = (drill.seconds / dt).ceil() as u64;

    let mut snapshot = engine.tick(0.0);
    for _ in 0..frames {
        for fire in &snapshot.fires {
            let available = engine.station().available_trucks;
            if fire.remaining_trucks_needed == 0 || available == 0 {
                continue;
            }
            let Some(route) = router.route(station_geo, fire.location) else {
                warn!(fire = fire.number, "no route to fire");
                continue;
            };
            if let Err(err) = engine.dispatch(fire.number, fire.remaining_trucks_needed, &route) {
                warn!(fire = fire.number, %err, "dispatch refused");
            }
        }

        snapshot = engine.tick(dt);
        for event in &snapshot.events {
            if let SimEvent::TrucksReturned {
                mission,
                response_time_mins,
                ..
            } = event
            {
                info!(mission, response_time_mins, "mission closed");
            }
        }
        if snapshot.phase.is_finished() {
            break;
        }
    }

    if drill.json {
        let json = serde_json::to_string_pretty(&snapshot).map_err(|e| e.to_string())?;
        println!("{json}");
    }

    let counters = snapshot.counters;
    let station = &snapshot.station;
    println!(
        "{:?} after {:.1}s: {} spawned, {} extinguished, {} burning (pool {})",
        snapshot.phase,
        snapshot.time.elapsed_secs,
        counters.spawned,
        counters.extinguished,
        counters.active,
        counters.pool_size
    );
    println!(
        "{}: {}/{} trucks available, average response {:.2} min",
        station.name, station.available_trucks, station.total_trucks, station.average_response_mins
    );
    Ok(())
}
