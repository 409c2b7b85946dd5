use crate::error::{ConfigError, SceneError};
use crate::render::{RenderStyle, Rgba};
use crate::scene::Scene;
use crate::sweep::{Sweep, SweepSettings};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub sweep: SweepSettings,
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_window_title")]
    pub title: String,
    #[serde(default = "default_window_width")]
    pub width: i32,
    #[serde(default = "default_window_height")]
    pub height: i32,
}

#[derive(Debug, Deserialize)]
pub struct SceneConfig {
    /// Flat list of wall quadruples: x1, y1, x2, y2, ...
    #[serde(default = "default_walls")]
    pub walls: Vec<f32>,
    /// Close the scene with walls along the window edges
    #[serde(default)]
    pub enclose: bool,
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_background")]
    pub background: Rgba,
    #[serde(default = "default_line_color")]
    pub wall_color: Rgba,
    #[serde(default = "default_thickness")]
    pub wall_thickness: f32,
    #[serde(default = "default_line_color")]
    pub ray_color: Rgba,
    #[serde(default = "default_line_color")]
    pub open_ray_color: Rgba,
    #[serde(default = "default_thickness")]
    pub ray_thickness: f32,
    #[serde(default = "default_show_hud")]
    pub show_hud: bool,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotConfig {
    #[serde(default = "default_snapshot_path")]
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

// Default values
fn default_window_title() -> String { "Sightlines - 2D Ray Casting".to_string() }
fn default_window_width() -> i32 { 1000 }
fn default_window_height() -> i32 { 800 }
fn default_walls() -> Vec<f32> {
    vec![
        100.0, 100.0, 400.0, 400.0,
        600.0, 200.0, 800.0, 700.0,
        400.0, 50.0, 800.0, 50.0,
        300.0, 500.0, 800.0, 500.0,
    ]
}
fn default_background() -> Rgba { Rgba::opaque(14, 14, 14) }
fn default_line_color() -> Rgba { Rgba::WHITE }
fn default_thickness() -> f32 { 1.0 }
fn default_show_hud() -> bool { true }
fn default_snapshot_path() -> String { "snapshot.json".to_string() }
fn default_log_filter() -> String { "info".to_string() }

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_window_title(),
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            walls: default_walls(),
            enclose: false,
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            wall_color: default_line_color(),
            wall_thickness: default_thickness(),
            ray_color: default_line_color(),
            open_ray_color: default_line_color(),
            ray_thickness: default_thickness(),
            show_hud: default_show_hud(),
        }
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: default_snapshot_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl VisualConfig {
    pub fn style(&self) -> RenderStyle {
        RenderStyle {
            wall_color: self.wall_color,
            wall_thickness: self.wall_thickness,
            ray_color: self.ray_color,
            open_ray_color: self.open_ray_color,
            ray_thickness: self.ray_thickness,
        }
    }
}

/// Where a configuration came from
#[derive(Debug)]
pub enum ConfigSource {
    File(PathBuf),
    Missing(PathBuf),
    /// The file exists but could not be used
    Invalid(PathBuf, ConfigError),
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load configuration from file, or use defaults if it is missing or unparsable
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, ConfigSource) {
        let path = path.as_ref().to_path_buf();
        match Self::load(&path) {
            Ok(config) => (config, ConfigSource::File(path)),
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                (Config::default(), ConfigSource::Missing(path))
            }
            Err(e) => (Config::default(), ConfigSource::Invalid(path, e)),
        }
    }

    /// Build the wall list, enclosed by the window edges if configured
    pub fn build_scene(&self) -> Result<Scene, SceneError> {
        let scene = Scene::from_flat(&self.scene.walls)?;
        if self.scene.enclose {
            scene.with_border(self.window.width as f32, self.window.height as f32)
        } else {
            Ok(scene)
        }
    }

    pub fn build_sweep(&self) -> Result<Sweep, ConfigError> {
        Sweep::new(self.sweep.clone())
    }
}
