use glam::Vec2;

/// Denominators smaller than this are treated as parallel lines
pub const PARALLEL_EPSILON: f32 = 1e-5;

/// Result of testing a ray segment against a wall segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersection {
    /// The segments cross at this point
    Hit(Vec2),
    /// Parallel, collinear, or the crossing lies outside one of the segments
    Miss,
}

impl Intersection {
    pub fn is_hit(&self) -> bool {
        matches!(self, Intersection::Hit(_))
    }

    /// The hit point, or `fallback` on a miss
    pub fn point_or(self, fallback: Vec2) -> Vec2 {
        match self {
            Intersection::Hit(p) => p,
            Intersection::Miss => fallback,
        }
    }
}

impl From<Intersection> for Option<Vec2> {
    fn from(value: Intersection) -> Self {
        match value {
            Intersection::Hit(p) => Some(p),
            Intersection::Miss => None,
        }
    }
}

/// Parameter `t` along the ray P1->P2 where it crosses the wall P3->P4.
///
/// Solves the 2x2 system
/// ```text
/// denom = (x1-x2)(y3-y4) - (y1-y2)(x3-x4)
/// t     =  ((x1-x3)(y3-y4) - (y1-y3)(x3-x4)) / denom
/// u     = -((x1-x2)(y1-y3) - (y1-y2)(x1-x3)) / denom
/// ```
/// and returns `Some(t)` only when both `t` and `u` lie in `[0, 1]`.
/// Collinear overlap is never reported.
#[inline]
pub fn intersection_param(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Option<f32> {
    let denom = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = ((p1.x - p3.x) * (p3.y - p4.y) - (p1.y - p3.y) * (p3.x - p4.x)) / denom;
    let u = -((p1.x - p2.x) * (p1.y - p3.y) - (p1.y - p2.y) * (p1.x - p3.x)) / denom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(t)
    } else {
        None
    }
}

/// Intersection of the ray segment `origin -> ray_end` with the wall `wall_a -> wall_b`
#[inline]
pub fn segment_intersection(origin: Vec2, ray_end: Vec2, wall_a: Vec2, wall_b: Vec2) -> Intersection {
    match intersection_param(origin, ray_end, wall_a, wall_b) {
        Some(t) => Intersection::Hit(origin + t * (ray_end - origin)),
        None => Intersection::Miss,
    }
}

/// Unit direction for an angle in degrees, measured from +x towards +y
#[inline]
pub fn direction(angle_deg: f32) -> Vec2 {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    Vec2::new(cos, sin)
}
