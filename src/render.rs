use crate::scene::Scene;
use crate::sweep::RaySegment;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 8-bit RGBA colour, written as `[r, g, b, a]` in config files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl Rgba {
    pub const WHITE: Rgba = Rgba(255, 255, 255, 255);

    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Rgba(r, g, b, 255)
    }
}

/// Anything that can draw a coloured line between two points
pub trait RenderSurface {
    fn draw_line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Rgba);
}

/// Supplies the viewpoint, sampled once per frame
pub trait InputSource {
    fn viewpoint(&self) -> Vec2;
}

/// A fixed viewpoint, for headless runs and tests
impl InputSource for Vec2 {
    fn viewpoint(&self) -> Vec2 {
        *self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub wall_color: Rgba,
    pub wall_thickness: f32,
    /// Rays stopped by a wall
    pub ray_color: Rgba,
    /// Rays that ran their full length
    pub open_ray_color: Rgba,
    pub ray_thickness: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            wall_color: Rgba::WHITE,
            wall_thickness: 1.0,
            ray_color: Rgba::WHITE,
            open_ray_color: Rgba::WHITE,
            ray_thickness: 1.0,
        }
    }
}

/// Draw every wall, then every ray in the order given
pub fn draw_frame<S: RenderSurface + ?Sized>(
    surface: &mut S,
    scene: &Scene,
    rays: &[RaySegment],
    style: &RenderStyle,
) {
    for wall in scene.walls() {
        surface.draw_line(wall.a(), wall.b(), style.wall_thickness, style.wall_color);
    }

    for ray in rays {
        let color = if ray.is_blocked() {
            style.ray_color
        } else {
            style.open_ray_color
        };
        surface.draw_line(ray.origin, ray.end, style.ray_thickness, color);
    }
}
