#![allow(dead_code)]

use serde::Deserialize;
use sightlines::{HitStrategy, Scene, Sweep, SweepSettings, Vec2, Wall};
use std::fs;
use std::path::{Path, PathBuf};

/// Tolerance for comparing ray endpoints
pub const TOLERANCE: f32 = 1e-2;

/// A scene, a viewpoint and the expected end of a few sampled rays
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub origin: Vec2,
    pub max_length: f32,
    pub walls: Vec<f32>,
    pub probes: Vec<Probe>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Probe {
    pub angle_deg: f32,
    /// `None` means the ray runs its full length
    pub expected_end: Option<Vec2>,
    pub expected_wall: Option<usize>,
}

pub fn scenario_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data").join("scenarios")
}

pub fn load_scenario(path: &Path) -> Result<Scenario, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    let scenario: Scenario = serde_json::from_str(&contents)?;
    Ok(scenario)
}

/// All scenario files, sorted by name
pub fn load_all_scenarios() -> Vec<Scenario> {
    let mut entries: Vec<_> = fs::read_dir(scenario_dir())
        .expect("test_data/scenarios is missing")
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    entries.sort();

    entries
        .iter()
        .map(|p| load_scenario(p).unwrap_or_else(|e| panic!("failed to load {}: {}", p.display(), e)))
        .collect()
}

pub fn vertical_wall(x: f32, half_height: f32) -> Wall {
    Wall::new(Vec2::new(x, -half_height), Vec2::new(x, half_height)).unwrap()
}

/// One ray at exactly `angle_deg`
pub fn probe_sweep(angle_deg: f32, max_length: f32, strategy: HitStrategy) -> Sweep {
    Sweep::new(SweepSettings {
        ray_count: 1,
        max_length,
        start_angle_deg: angle_deg,
        end_angle_deg: angle_deg + 360.0,
        strategy,
        parallel: false,
    })
    .unwrap()
}

fn mirror(scenario: &Scenario, suffix: &str, flip_x: bool, flip_y: bool) -> Scenario {
    let o = scenario.origin;
    let map = |p: Vec2| {
        Vec2::new(
            if flip_x { 2.0 * o.x - p.x } else { p.x },
            if flip_y { 2.0 * o.y - p.y } else { p.y },
        )
    };
    let map_angle = |a: f32| {
        let a = if flip_x { 180.0 - a } else { a };
        let a = if flip_y { -a } else { a };
        a.rem_euclid(360.0)
    };

    let walls = scenario
        .walls
        .chunks_exact(4)
        .flat_map(|q| {
            let a = map(Vec2::new(q[0], q[1]));
            let b = map(Vec2::new(q[2], q[3]));
            [a.x, a.y, b.x, b.y]
        })
        .collect();

    let probes = scenario
        .probes
        .iter()
        .map(|p| Probe {
            angle_deg: map_angle(p.angle_deg),
            expected_end: p.expected_end.map(map),
            expected_wall: p.expected_wall,
        })
        .collect();

    Scenario {
        name: format!("{}_{}", scenario.name, suffix),
        origin: o,
        max_length: scenario.max_length,
        walls,
        probes,
    }
}

/// Mirror left-right about the viewpoint
pub fn flip_horizontal(scenario: &Scenario) -> Scenario {
    mirror(scenario, "h_flip", true, false)
}

/// Mirror top-bottom about the viewpoint
pub fn flip_vertical(scenario: &Scenario) -> Scenario {
    mirror(scenario, "v_flip", false, true)
}

pub fn flip_both(scenario: &Scenario) -> Scenario {
    mirror(scenario, "hv_flip", true, true)
}

/// Check every probe of one scenario variant; returns a description of the first mismatch
pub fn run_scenario(scenario: &Scenario, strategy: HitStrategy) -> Result<(), String> {
    let scene = Scene::from_flat(&scenario.walls).map_err(|e| e.to_string())?;

    for probe in &scenario.probes {
        let sweep = probe_sweep(probe.angle_deg, scenario.max_length, strategy);
        let rays = sweep.cast(scenario.origin, &scene).map_err(|e| e.to_string())?;
        let ray = rays[0];

        if ray.origin != scenario.origin {
            return Err(format!("ray at {} does not start at the viewpoint", probe.angle_deg));
        }

        match probe.expected_end {
            Some(expected) => {
                if ray.end.distance(expected) > TOLERANCE {
                    return Err(format!(
                        "ray at {} ended at {:?}, expected {:?}",
                        probe.angle_deg, ray.end, expected
                    ));
                }
            }
            None => {
                if (ray.length() - scenario.max_length).abs() > TOLERANCE {
                    return Err(format!(
                        "ray at {} has length {}, expected the full {}",
                        probe.angle_deg,
                        ray.length(),
                        scenario.max_length
                    ));
                }
            }
        }

        if ray.wall != probe.expected_wall {
            return Err(format!(
                "ray at {} stopped at wall {:?}, expected {:?}",
                probe.angle_deg, ray.wall, probe.expected_wall
            ));
        }
    }

    Ok(())
}

/// Run a scenario in all 4 mirror variants (original, h_flip, v_flip, hv_flip)
/// Returns the name of the first failing variant with its message
pub fn run_all_variants(scenario: &Scenario, strategy: HitStrategy) -> Result<(), (String, String)> {
    let variants = [
        scenario.clone(),
        flip_horizontal(scenario),
        flip_vertical(scenario),
        flip_both(scenario),
    ];

    for variant in &variants {
        run_scenario(variant, strategy).map_err(|msg| (variant.name.clone(), msg))?;
    }

    Ok(())
}
