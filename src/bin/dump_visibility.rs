//! Headless sweep: prints the frame snapshot for one viewpoint as JSON
//!
//! Usage: dump_visibility <x> <y> [config.toml]

use sightlines::config::{Config, ConfigSource, DEFAULT_CONFIG_PATH};
use sightlines::{logging, FrameSnapshot, Vec2};
use std::env;
use std::error::Error;
use tracing::{info, warn};

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        let program = args.first().map(String::as_str).unwrap_or("dump_visibility");
        eprintln!("Usage: {} <x> <y> [config.toml]", program);
        eprintln!("Casts one frame of rays from (x, y) and prints the snapshot as JSON");
        std::process::exit(1);
    }

    let x: f32 = args[1].parse()?;
    let y: f32 = args[2].parse()?;
    let path = args.get(3).map(String::as_str).unwrap_or(DEFAULT_CONFIG_PATH);

    let (config, source) = Config::load_or_default(path);
    logging::init(&config.logging);
    match source {
        ConfigSource::File(path) => info!("Loaded configuration from {}", path.display()),
        ConfigSource::Missing(path) => info!("No {} found, using default configuration", path.display()),
        ConfigSource::Invalid(path, e) => warn!("Failed to parse {}: {}, using defaults", path.display(), e),
    }

    let scene = config.build_scene()?;
    let sweep = config.build_sweep()?;
    let origin = Vec2::new(x, y);
    let rays = sweep.cast(origin, &scene)?;

    let snapshot = FrameSnapshot::capture(origin, sweep.settings(), &scene, &rays);
    info!("{} of {} rays blocked", snapshot.blocked_count(), rays.len());
    println!("{}", snapshot.to_json()?);

    Ok(())
}
