//! Ray casting against the grid lines of the map.
//!
//! Every horizontal and vertical grid line is treated as a segment spanning
//! the whole map and intersected with the ray. Each crossing is attributed to
//! the cell on the far side of the line (as seen from the ray), and the
//! nearest crossing that lands on a wall wins.
use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;

use crate::core::geometry::normalize_angle;
use crate::core::maze::{CellKind, GridMap};
use crate::core::player::Pose;

/// Determinant magnitude below which a ray and a grid line count as parallel.
pub const PARALLEL_EPSILON: f32 = 1e-6;

/// Direction quadrant of a ray (y grows downward).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Facing {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Facing {
    pub fn from_angle(a: f32) -> Self {
        let a = normalize_angle(a);
        let down = a > 0.0 && a < PI;
        let right = a < FRAC_PI_2 || a > 3.0 * FRAC_PI_2;
        Self { up: !down, down, left: !right, right }
    }
}

/// Which family of grid line produced a hit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum HitSide {
    /// Line of constant y (north/south wall face).
    #[default]
    Horizontal,
    /// Line of constant x (east/west wall face).
    Vertical,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayResult {
    pub hit: bool,
    /// Euclidean distance to `hit_point`, `f32::INFINITY` without a hit.
    pub distance: f32,
    pub hit_point: Vec2,
    pub facing: Facing,
    pub side: HitSide,
    /// Absolute ray angle, radians.
    pub angle: f32,
}

impl RayResult {
    pub fn miss(angle: f32) -> Self {
        Self {
            hit: false,
            distance: f32::INFINITY,
            hit_point: Vec2::ZERO,
            facing: Facing::from_angle(angle),
            side: HitSide::default(),
            angle,
        }
    }
}

impl Default for RayResult {
    fn default() -> Self {
        Self::miss(0.0)
    }
}

/// Intersection of the ray `origin + t·dir` (`t ≥ 0`) with segment `a..b`.
/// Returns the intersection point, or `None` when parallel or out of range.
pub fn intersect_segment(origin: Vec2, dir: Vec2, a: Vec2, b: Vec2) -> Option<Vec2> {
    let seg = b - a;
    let det = dir.perp_dot(seg);
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }
    let ao = a - origin;
    let t = ao.perp_dot(seg) / det;
    let u = ao.perp_dot(dir) / det;
    if t < 0.0 || !(0.0..=1.0).contains(&u) {
        return None;
    }
    Some(origin + dir * t)
}

#[inline]
fn cell_index(v: f32, tile: f32) -> Option<usize> {
    let i = (v / tile).floor();
    (i >= 0.0).then_some(i as usize)
}

/// Casts one ray from `origin` at angle `angle`.
pub fn cast_ray(map: &GridMap, origin: Vec2, angle: f32) -> RayResult {
    let angle = normalize_angle(angle);
    let facing = Facing::from_angle(angle);
    let dir = Vec2::from_angle(angle);
    let tile = map.tile_size();
    let (w, h) = (map.world_width(), map.world_height());

    let mut best = RayResult::miss(angle);
    let mut consider = |point: Vec2, row: Option<usize>, col: Option<usize>, side: HitSide| {
        let (Some(row), Some(col)) = (row, col) else { return };
        if map.cell_at(row, col) != Some(CellKind::Wall) {
            return;
        }
        let d = origin.distance(point);
        if d < best.distance {
            best = RayResult { hit: true, distance: d, hit_point: point, facing, side, angle };
        }
    };

    for i in 0..=map.rows() {
        let y = i as f32 * tile;
        let Some(p) = intersect_segment(origin, dir, Vec2::new(0.0, y), Vec2::new(w, y)) else { continue };
        let row = if facing.down { Some(i) } else { i.checked_sub(1) };
        consider(p, row, cell_index(p.x, tile), HitSide::Horizontal);
    }

    for j in 0..=map.cols() {
        let x = j as f32 * tile;
        let Some(p) = intersect_segment(origin, dir, Vec2::new(x, 0.0), Vec2::new(x, h)) else { continue };
        let col = if facing.right { Some(j) } else { j.checked_sub(1) };
        consider(p, cell_index(p.y, tile), col, HitSide::Vertical);
    }

    best
}

/// Casts `rays.len()` rays evenly across `fov`, centred on the pose heading:
/// ray `i` has angle `heading - fov/2 + i·fov/n`.
pub fn cast_fan(map: &GridMap, pose: &Pose, fov: f32, rays: &mut [RayResult]) {
    let n = rays.len();
    if n == 0 {
        return;
    }
    let origin = Vec2::new(pose.x, pose.y);
    let start = pose.heading - fov * 0.5;
    let step = fov / n as f32;
    for (i, ray) in rays.iter_mut().enumerate() {
        *ray = cast_ray(map, origin, start + i as f32 * step);
    }
}
