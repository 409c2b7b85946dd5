use thiserror::Error;

/// Problems with the wall list, reported when the scene is built
#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    #[error("wall list has {0} coordinates, expected a multiple of 4")]
    RaggedWallList(usize),
    #[error("wall {index} has coincident endpoints at ({x}, {y})")]
    DegenerateWall { index: usize, x: f32, y: f32 },
    #[error("wall {index} has a non-finite coordinate")]
    NonFiniteWall { index: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid sweep settings: {0}")]
    InvalidSweep(String),
    #[error("invalid scene: {0}")]
    Scene(#[from] SceneError),
}

#[derive(Debug, Error, PartialEq)]
pub enum SweepError {
    #[error("viewpoint ({x}, {y}) is not finite")]
    NonFiniteOrigin { x: f32, y: f32 },
    #[error("viewpoint ({x}, {y}) is too far out for rays of length {max_length}")]
    OriginOutOfRange { x: f32, y: f32, max_length: f32 },
    #[error("invalid sweep settings: {0}")]
    InvalidSettings(String),
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
