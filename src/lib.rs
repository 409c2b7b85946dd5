pub mod config;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod render;
pub mod scene;
pub mod snapshot;
pub mod sweep;

pub use config::Config;
pub use error::{ConfigError, SceneError, SnapshotError, SweepError};
pub use geometry::{segment_intersection, Intersection};
pub use glam::Vec2;
pub use render::{draw_frame, InputSource, RenderStyle, RenderSurface, Rgba};
pub use scene::{Scene, Wall};
pub use snapshot::FrameSnapshot;
pub use sweep::{cast_visibility, HitStrategy, RaySegment, Sweep, SweepSettings};
