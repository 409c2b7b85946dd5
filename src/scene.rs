use crate::error::SceneError;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque line segment obstacle. Endpoints are finite and distinct.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WallEndpoints", into = "WallEndpoints")]
pub struct Wall {
    a: Vec2,
    b: Vec2,
}

/// Serialized form of a wall, checked on the way back in
#[derive(Serialize, Deserialize)]
struct WallEndpoints {
    a: Vec2,
    b: Vec2,
}

impl TryFrom<WallEndpoints> for Wall {
    type Error = SceneError;

    fn try_from(value: WallEndpoints) -> Result<Self, Self::Error> {
        Wall::new(value.a, value.b)
    }
}

impl From<Wall> for WallEndpoints {
    fn from(wall: Wall) -> Self {
        WallEndpoints { a: wall.a, b: wall.b }
    }
}

impl Wall {
    /// Create a wall, rejecting non-finite or coincident endpoints
    pub fn new(a: Vec2, b: Vec2) -> Result<Self, SceneError> {
        Self::checked(a, b, 0)
    }

    fn checked(a: Vec2, b: Vec2, index: usize) -> Result<Self, SceneError> {
        if !a.is_finite() || !b.is_finite() {
            return Err(SceneError::NonFiniteWall { index });
        }
        if a == b {
            return Err(SceneError::DegenerateWall { index, x: a.x, y: a.y });
        }
        Ok(Wall { a, b })
    }

    pub fn a(&self) -> Vec2 {
        self.a
    }

    pub fn b(&self) -> Vec2 {
        self.b
    }

    pub fn length(&self) -> f32 {
        self.a.distance(self.b)
    }
}

/// Static, insertion-ordered wall list shared read-only by every sweep
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    walls: Vec<Wall>,
}

impl Scene {
    pub fn new() -> Self {
        Scene { walls: Vec::new() }
    }

    pub fn from_walls(walls: Vec<Wall>) -> Self {
        Scene { walls }
    }

    /// Build a scene from flat `x1, y1, x2, y2` quadruples
    pub fn from_flat(coords: &[f32]) -> Result<Self, SceneError> {
        if coords.len() % 4 != 0 {
            return Err(SceneError::RaggedWallList(coords.len()));
        }

        let walls = coords
            .chunks_exact(4)
            .enumerate()
            .map(|(index, q)| Wall::checked(Vec2::new(q[0], q[1]), Vec2::new(q[2], q[3]), index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Scene { walls })
    }

    /// Add the four edges of a `width` x `height` rectangle anchored at the origin
    pub fn with_border(mut self, width: f32, height: f32) -> Result<Self, SceneError> {
        let corners = [
            Vec2::new(0.0, 0.0),
            Vec2::new(width, 0.0),
            Vec2::new(width, height),
            Vec2::new(0.0, height),
        ];
        for i in 0..corners.len() {
            let index = self.walls.len();
            let wall = Wall::checked(corners[i], corners[(i + 1) % corners.len()], index)?;
            self.walls.push(wall);
        }
        Ok(self)
    }

    pub fn push(&mut self, wall: Wall) {
        self.walls.push(wall);
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn len(&self) -> usize {
        self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }
}
