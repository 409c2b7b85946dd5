use crate::error::{ConfigError, SweepError};
use crate::geometry::{direction, intersection_param, segment_intersection, Intersection};
use crate::scene::{Scene, Wall};
use glam::Vec2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How a ray picks the wall it stops at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitStrategy {
    /// Test the full-length ray against every wall and keep the smallest distance
    #[default]
    Nearest,
    /// Walk the walls in list order, re-testing against the already clipped ray
    Progressive,
}

impl HitStrategy {
    pub fn toggled(self) -> Self {
        match self {
            HitStrategy::Nearest => HitStrategy::Progressive,
            HitStrategy::Progressive => HitStrategy::Nearest,
        }
    }
}

/// Angle sampling and ray length for a sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSettings {
    #[serde(default = "default_ray_count")]
    pub ray_count: usize,
    #[serde(default = "default_max_length")]
    pub max_length: f32,
    /// First sampled angle, in degrees
    #[serde(default = "default_start_angle")]
    pub start_angle_deg: f32,
    /// Exclusive upper bound of the sampled range, in degrees
    #[serde(default = "default_end_angle")]
    pub end_angle_deg: f32,
    #[serde(default)]
    pub strategy: HitStrategy,
    #[serde(default)]
    pub parallel: bool,
}

fn default_ray_count() -> usize { 360 }
fn default_max_length() -> f32 { 10000.0 }
fn default_start_angle() -> f32 { 0.0 }
fn default_end_angle() -> f32 { 360.0 }

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            ray_count: default_ray_count(),
            max_length: default_max_length(),
            start_angle_deg: default_start_angle(),
            end_angle_deg: default_end_angle(),
            strategy: HitStrategy::default(),
            parallel: false,
        }
    }
}

impl SweepSettings {
    pub fn new(ray_count: usize, max_length: f32) -> Self {
        Self {
            ray_count,
            max_length,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ray_count == 0 {
            return Err(ConfigError::InvalidSweep("ray_count must be at least 1".to_string()));
        }
        if !self.max_length.is_finite() || self.max_length <= 0.0 {
            return Err(ConfigError::InvalidSweep(format!(
                "max_length must be a positive finite number, got {}",
                self.max_length
            )));
        }
        if !self.start_angle_deg.is_finite() || !self.end_angle_deg.is_finite() {
            return Err(ConfigError::InvalidSweep("angle range must be finite".to_string()));
        }
        let span = self.end_angle_deg - self.start_angle_deg;
        if span <= 0.0 || span > 360.0 {
            return Err(ConfigError::InvalidSweep(format!(
                "angle range [{}, {}) must span (0, 360] degrees",
                self.start_angle_deg, self.end_angle_deg
            )));
        }
        Ok(())
    }

    /// Angle of sample `index`, in degrees
    pub fn angle_at(&self, index: usize) -> f32 {
        let step = (self.end_angle_deg - self.start_angle_deg) / self.ray_count as f32;
        self.start_angle_deg + index as f32 * step
    }
}

/// One clipped ray, from the viewpoint to where it stopped
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaySegment {
    pub origin: Vec2,
    pub end: Vec2,
    pub angle_deg: f32,
    /// Index of the wall that stopped the ray, `None` if it ran its full length
    pub wall: Option<usize>,
}

impl RaySegment {
    pub fn length(&self) -> f32 {
        self.origin.distance(self.end)
    }

    pub fn is_blocked(&self) -> bool {
        self.wall.is_some()
    }
}

/// Validated sweep with a precomputed direction table
#[derive(Debug, Clone)]
pub struct Sweep {
    settings: SweepSettings,
    /// (angle in degrees, unit direction) per sample
    rays: Vec<(f32, Vec2)>,
}

impl Sweep {
    pub fn new(settings: SweepSettings) -> Result<Self, ConfigError> {
        settings.validate()?;

        let rays = (0..settings.ray_count)
            .map(|i| {
                let angle = settings.angle_at(i);
                (angle, direction(angle))
            })
            .collect();

        debug!(
            ray_count = settings.ray_count,
            max_length = settings.max_length,
            start = settings.start_angle_deg,
            end = settings.end_angle_deg,
            strategy = ?settings.strategy,
            "sweep configured"
        );

        Ok(Sweep { settings, rays })
    }

    pub fn settings(&self) -> &SweepSettings {
        &self.settings
    }

    pub fn ray_count(&self) -> usize {
        self.rays.len()
    }

    pub fn set_strategy(&mut self, strategy: HitStrategy) {
        self.settings.strategy = strategy;
    }

    pub fn set_parallel(&mut self, parallel: bool) {
        self.settings.parallel = parallel;
    }

    /// Cast every ray from `origin` against the scene, in increasing angle order
    pub fn cast(&self, origin: Vec2, scene: &Scene) -> Result<Vec<RaySegment>, SweepError> {
        let max_length = self.settings.max_length;
        check_origin(origin, max_length)?;

        let walls = scene.walls();
        let strategy = self.settings.strategy;

        let segments: Vec<RaySegment> = if self.settings.parallel {
            self.rays
                .par_iter()
                .map(|&(angle, dir)| trace_ray(origin, angle, dir, max_length, walls, strategy))
                .collect()
        } else {
            self.rays
                .iter()
                .map(|&(angle, dir)| trace_ray(origin, angle, dir, max_length, walls, strategy))
                .collect()
        };

        Ok(segments)
    }
}

/// Cast `ray_count` evenly spaced rays over `[0, 360)` degrees and clip each at the nearest wall
pub fn cast_visibility(
    origin: Vec2,
    walls: &[Wall],
    ray_count: usize,
    max_length: f32,
) -> Result<Vec<RaySegment>, SweepError> {
    let settings = SweepSettings::new(ray_count, max_length);
    settings
        .validate()
        .map_err(|e| SweepError::InvalidSettings(e.to_string()))?;
    check_origin(origin, max_length)?;

    Ok((0..ray_count)
        .map(|i| {
            let angle = settings.angle_at(i);
            trace_ray(origin, angle, direction(angle), max_length, walls, HitStrategy::Nearest)
        })
        .collect())
}

/// Largest coordinate a full-length ray end may reach. Products of two such
/// coordinates in the intersection test stay finite in f32.
pub const MAX_EXTENT: f32 = 1.0e18;

fn check_origin(origin: Vec2, max_length: f32) -> Result<(), SweepError> {
    if !origin.is_finite() {
        return Err(SweepError::NonFiniteOrigin { x: origin.x, y: origin.y });
    }
    if (origin.abs() + Vec2::splat(max_length)).max_element() > MAX_EXTENT {
        return Err(SweepError::OriginOutOfRange {
            x: origin.x,
            y: origin.y,
            max_length,
        });
    }
    Ok(())
}

#[inline]
fn trace_ray(
    origin: Vec2,
    angle_deg: f32,
    dir: Vec2,
    max_length: f32,
    walls: &[Wall],
    strategy: HitStrategy,
) -> RaySegment {
    let far = origin + max_length * dir;
    let (end, wall) = match strategy {
        HitStrategy::Nearest => nearest_hit(origin, far, walls),
        HitStrategy::Progressive => progressive_hit(origin, far, walls),
    };
    RaySegment {
        origin,
        end,
        angle_deg,
        wall,
    }
}

fn nearest_hit(origin: Vec2, far: Vec2, walls: &[Wall]) -> (Vec2, Option<usize>) {
    let mut best_t = f32::INFINITY;
    let mut best_wall = None;

    for (index, wall) in walls.iter().enumerate() {
        if let Some(t) = intersection_param(origin, far, wall.a(), wall.b()) {
            // Strict comparison keeps the earlier wall on ties
            if t < best_t {
                best_t = t;
                best_wall = Some(index);
            }
        }
    }

    match best_wall {
        Some(_) => (origin + best_t * (far - origin), best_wall),
        None => (far, None),
    }
}

fn progressive_hit(origin: Vec2, far: Vec2, walls: &[Wall]) -> (Vec2, Option<usize>) {
    let mut best = far;
    let mut best_wall = None;

    for (index, wall) in walls.iter().enumerate() {
        if let Intersection::Hit(p) = segment_intersection(origin, best, wall.a(), wall.b()) {
            best = p;
            best_wall = Some(index);
        }
    }

    (best, best_wall)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_wall(x: f32) -> Wall {
        Wall::new(Vec2::new(x, -10.0), Vec2::new(x, 10.0)).unwrap()
    }

    fn single_ray(strategy: HitStrategy) -> Sweep {
        Sweep::new(SweepSettings {
            ray_count: 1,
            max_length: 10000.0,
            strategy,
            ..SweepSettings::default()
        })
        .unwrap()
    }

    #[test]
    fn test_angle_sampling() {
        let settings = SweepSettings::new(4, 1.0);
        assert_eq!(settings.angle_at(0), 0.0);
        assert_eq!(settings.angle_at(1), 90.0);
        assert_eq!(settings.angle_at(3), 270.0);

        // 1..361 reproduces the 1 degree offset sampling
        let shifted = SweepSettings {
            start_angle_deg: 1.0,
            end_angle_deg: 361.0,
            ..SweepSettings::default()
        };
        assert_eq!(shifted.angle_at(0), 1.0);
        assert_eq!(shifted.angle_at(359), 360.0);
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        assert!(SweepSettings::new(0, 100.0).validate().is_err());
        assert!(SweepSettings::new(10, 0.0).validate().is_err());
        assert!(SweepSettings::new(10, f32::INFINITY).validate().is_err());

        let reversed = SweepSettings {
            start_angle_deg: 90.0,
            end_angle_deg: 10.0,
            ..SweepSettings::default()
        };
        assert!(reversed.validate().is_err());

        let too_wide = SweepSettings {
            end_angle_deg: 400.0,
            ..SweepSettings::default()
        };
        assert!(too_wide.validate().is_err());
    }

    #[test]
    fn test_nearest_hit_ignores_wall_order() {
        let sweep = single_ray(HitStrategy::Nearest);
        for walls in [
            vec![vertical_wall(10.0), vertical_wall(20.0)],
            vec![vertical_wall(20.0), vertical_wall(10.0)],
        ] {
            let near_index = walls.iter().position(|w| w.a().x == 10.0);
            let rays = sweep.cast(Vec2::ZERO, &Scene::from_walls(walls)).unwrap();
            assert!(rays[0].end.distance(Vec2::new(10.0, 0.0)) < 1e-3, "got {:?}", rays[0].end);
            assert_eq!(rays[0].wall, near_index);
        }
    }

    #[test]
    fn test_progressive_records_last_clipping_wall() {
        let sweep = single_ray(HitStrategy::Progressive);

        // Far wall first: it clips, then the near wall clips again
        let scene = Scene::from_walls(vec![vertical_wall(20.0), vertical_wall(10.0)]);
        let rays = sweep.cast(Vec2::ZERO, &scene).unwrap();
        assert!(rays[0].end.distance(Vec2::new(10.0, 0.0)) < 1e-3);
        assert_eq!(rays[0].wall, Some(1));

        // Near wall first: the clipped ray no longer reaches the far wall
        let scene = Scene::from_walls(vec![vertical_wall(10.0), vertical_wall(20.0)]);
        let rays = sweep.cast(Vec2::ZERO, &scene).unwrap();
        assert_eq!(rays[0].wall, Some(0));
    }

    #[test]
    fn test_non_finite_origin_rejected() {
        let sweep = single_ray(HitStrategy::Nearest);
        let err = sweep.cast(Vec2::new(f32::NAN, 0.0), &Scene::new()).unwrap_err();
        assert!(matches!(err, SweepError::NonFiniteOrigin { .. }));
    }

    #[test]
    fn test_free_function_matches_sweep() {
        let walls = vec![vertical_wall(10.0), vertical_wall(-30.0)];
        let origin = Vec2::new(1.0, 2.0);
        let sweep = Sweep::new(SweepSettings::new(72, 500.0)).unwrap();

        let expected = sweep.cast(origin, &Scene::from_walls(walls.clone())).unwrap();
        assert_eq!(cast_visibility(origin, &walls, 72, 500.0).unwrap(), expected);
    }

    #[test]
    fn test_free_function_rejects_bad_input() {
        let walls = vec![vertical_wall(10.0)];

        let err = cast_visibility(Vec2::new(f32::NAN, 0.0), &walls, 4, 10000.0).unwrap_err();
        assert!(matches!(err, SweepError::NonFiniteOrigin { .. }));

        for max_length in [f32::NAN, -100.0, 0.0, f32::INFINITY] {
            let err = cast_visibility(Vec2::ZERO, &walls, 4, max_length).unwrap_err();
            assert!(matches!(err, SweepError::InvalidSettings(_)), "accepted {}", max_length);
        }

        let err = cast_visibility(Vec2::ZERO, &walls, 0, 100.0).unwrap_err();
        assert!(matches!(err, SweepError::InvalidSettings(_)));
    }

    #[test]
    fn test_far_out_origin_rejected() {
        let origin = Vec2::new(1.0e38, 0.0);
        let err = single_ray(HitStrategy::Nearest).cast(origin, &Scene::new()).unwrap_err();
        assert!(matches!(err, SweepError::OriginOutOfRange { .. }));

        // Reachable extent counts the ray length too
        let err = cast_visibility(Vec2::new(0.0, -1.0e17), &[], 8, 1.0e18).unwrap_err();
        assert!(matches!(err, SweepError::OriginOutOfRange { .. }));

        assert!(cast_visibility(Vec2::new(1.0e6, -1.0e6), &[], 8, 10000.0).is_ok());
    }
}
