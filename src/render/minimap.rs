//! Top-down debug overlay: grid, player and ray fan, scaled into a corner.
use crate::core::maze::{CellKind, GridMap};
use crate::core::player::Pose;
use crate::render::casters::RayResult;
use crate::render::framebuffer::{Color, Framebuffer};

const PLAYER_SIZE: f32 = 4.0;
/// Draw every n-th ray so the fan stays readable.
const RAY_STRIDE: usize = 8;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Minimap {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Default for Minimap {
    fn default() -> Self {
        Self { scale: 0.3, offset_x: 20.0, offset_y: 20.0 }
    }
}

impl Minimap {
    /// World point to screen pixel.
    #[inline]
    pub fn to_screen(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.scale + self.offset_x, y * self.scale + self.offset_y)
    }

    pub fn draw(&self, fb: &mut Framebuffer, map: &GridMap, pose: &Pose, rays: &[RayResult]) {
        self.draw_cells(fb, map);

        let (px, py) = self.to_screen(pose.x, pose.y);
        fb.set_current_color(Color::RED);
        for ray in rays.iter().step_by(RAY_STRIDE).filter(|r| r.hit) {
            let (hx, hy) = self.to_screen(ray.hit_point.x, ray.hit_point.y);
            fb.draw_line(px as i32, py as i32, hx as i32, hy as i32);
        }

        let half = PLAYER_SIZE * 0.5;
        fb.set_current_color(Color::YELLOW);
        fb.fill_rect(
            (px - half).max(0.0) as u32,
            (py - half).max(0.0) as u32,
            (px + half).max(0.0) as u32,
            (py + half).max(0.0) as u32,
        );
    }

    fn draw_cells(&self, fb: &mut Framebuffer, map: &GridMap) {
        let tile = map.tile_size() * self.scale;
        for row in 0..map.rows() {
            for col in 0..map.cols() {
                let color = match map.cell_at(row, col) {
                    Some(CellKind::Wall) => Color::WHITE,
                    _ => Color::BLACK,
                };
                let x0 = col as f32 * tile + self.offset_x;
                let y0 = row as f32 * tile + self.offset_y;
                let (x0, y0, x1, y1) = (x0 as u32, y0 as u32, (x0 + tile) as u32, (y0 + tile) as u32);
                fb.set_current_color(color);
                fb.fill_rect(x0, y0, x1, y1);
                fb.outline_rect(x0, y0, x1, y1, Color::MAP_LINES);
            }
        }
    }
}
