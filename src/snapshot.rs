use crate::error::SnapshotError;
use crate::scene::{Scene, Wall};
use crate::sweep::{RaySegment, SweepSettings};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One frame of the sweep: the viewpoint, the settings used, the walls and the clipped rays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub origin: Vec2,
    pub settings: SweepSettings,
    pub walls: Vec<Wall>,
    pub rays: Vec<RaySegment>,
}

impl FrameSnapshot {
    pub fn capture(origin: Vec2, settings: &SweepSettings, scene: &Scene, rays: &[RaySegment]) -> Self {
        FrameSnapshot {
            origin,
            settings: settings.clone(),
            walls: scene.walls().to_vec(),
            rays: rays.to_vec(),
        }
    }

    /// Number of rays stopped by a wall
    pub fn blocked_count(&self) -> usize {
        self.rays.iter().filter(|r| r.is_blocked()).count()
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Rebuild the scene the snapshot was taken against. Walls were checked when the snapshot was parsed.
    pub fn restore_scene(&self) -> Scene {
        Scene::from_walls(self.walls.clone())
    }
}
