//! Wall projector: ray distances to vertical strips (sky/floor + flat-shaded walls).
use crate::render::casters::{HitSide, RayResult};
use crate::render::framebuffer::{Color, Framebuffer};

/// Lower bound for the fisheye-corrected distance before dividing by it.
pub const MIN_CORRECTED_DISTANCE: f32 = 1e-2;

const CEIL_TOP:   Color = Color::rgb(10, 12, 18);
const CEIL_MID:   Color = Color::rgb(20, 24, 32);
const FLOOR_NEAR: Color = Color::rgb(56, 58, 62);
const FLOOR_FAR:  Color = Color::rgb(26, 28, 30);

const WALL: Color = Color::rgb(200, 200, 200);
/// Shade applied to east/west faces so corners read.
const VERTICAL_SIDE_SHADE: f32 = 0.7;

/// Screen-space projection constants for one session.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    pub screen_width: u32,
    pub screen_height: u32,
    pub fov: f32,
    pub tile_size: f32,
    /// Distance from the eye to the projection plane, in pixels.
    pub plane_dist: f32,
}

impl Projection {
    pub fn new(screen_width: u32, screen_height: u32, fov: f32, tile_size: f32) -> Self {
        let plane_dist = (screen_width as f32 * 0.5) / (fov * 0.5).tan();
        Self { screen_width, screen_height, fov, tile_size, plane_dist }
    }

    /// Distance with the radial (fisheye) component removed, floor-clamped.
    #[inline]
    pub fn corrected_distance(distance: f32, ray_angle: f32, heading: f32) -> f32 {
        (distance * (ray_angle - heading).cos()).max(MIN_CORRECTED_DISTANCE)
    }

    /// Strip height in pixels for an already-corrected distance.
    #[inline]
    pub fn strip_height(&self, corrected: f32) -> f32 {
        (self.tile_size / corrected.max(MIN_CORRECTED_DISTANCE)) * self.plane_dist
    }

    /// Rows `[top, bottom)` covered by a strip, centred and clamped to the screen.
    pub fn strip_span(&self, strip_height: f32) -> (u32, u32) {
        let h = self.screen_height as f32;
        let half = h * 0.5;
        let top = (half - strip_height * 0.5).clamp(0.0, h);
        let bottom = (half + strip_height * 0.5).clamp(0.0, h);
        (top as u32, bottom as u32)
    }
}

fn paint_ceiling_and_floor(fb: &mut Framebuffer) {
    let w = fb.width;
    let h = fb.height;
    let hh = h / 2;
    for y in 0..hh {
        let t = y as f32 / hh.max(1) as f32;
        fb.set_current_color(CEIL_TOP.lerp(CEIL_MID, t));
        fb.fill_rect(0, y, w, y + 1);
    }
    for y in hh..h {
        let t = (y - hh) as f32 / (h - hh).max(1) as f32;
        fb.set_current_color(FLOOR_FAR.lerp(FLOOR_NEAR, t));
        fb.fill_rect(0, y, w, y + 1);
    }
}

/// Overwrites the whole frame: background, then one strip per ray.
/// Ray `i` owns columns `[i·strip_width, (i+1)·strip_width)`; misses leave the background.
pub fn draw_frame(fb: &mut Framebuffer, proj: &Projection, rays: &[RayResult], heading: f32, strip_width: u32) {
    paint_ceiling_and_floor(fb);

    for (i, ray) in rays.iter().enumerate() {
        if !ray.hit {
            continue;
        }
        let corrected = Projection::corrected_distance(ray.distance, ray.angle, heading);
        let (top, bottom) = proj.strip_span(proj.strip_height(corrected));
        let color = match ray.side {
            HitSide::Horizontal => WALL,
            HitSide::Vertical => WALL.scale(VERTICAL_SIDE_SHADE),
        };
        let x0 = i as u32 * strip_width;
        fb.set_current_color(color);
        fb.fill_rect(x0, top, x0 + strip_width, bottom);
    }
}
