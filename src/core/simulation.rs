//! Per-frame simulation state: map, pose and the reusable ray buffer.
use crate::core::maze::GridMap;
use crate::core::player::{MotionIntent, MotionParams, Pose, integrate};
use crate::render::casters::{RayResult, cast_fan};

/// Default frame-time cap, seconds.
pub const MAX_FRAME_DT: f32 = 1.0 / 20.0;

pub struct Simulation {
    map: GridMap,
    pose: Pose,
    rays: Vec<RayResult>,
    motion: MotionParams,
    fov: f32,
    max_dt: f32,
}

impl Simulation {
    /// `num_rays` fixes the size of the ray buffer for the session.
    pub fn new(map: GridMap, pose: Pose, motion: MotionParams, fov: f32, num_rays: usize) -> Self {
        Self {
            map,
            pose,
            rays: vec![RayResult::default(); num_rays],
            motion,
            fov,
            max_dt: MAX_FRAME_DT,
        }
    }

    pub fn with_max_dt(mut self, max_dt: f32) -> Self {
        self.max_dt = max_dt.max(0.0);
        self
    }

    #[inline] pub fn map(&self) -> &GridMap { &self.map }
    #[inline] pub fn pose(&self) -> &Pose { &self.pose }
    #[inline] pub fn rays(&self) -> &[RayResult] { &self.rays }
    #[inline] pub fn fov(&self) -> f32 { self.fov }

    /// Clamps `dt` to `[0, max_dt]` (NaN counts as 0).
    #[inline]
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        if dt.is_nan() { 0.0 } else { dt.clamp(0.0, self.max_dt) }
    }

    /// Advances one frame: integrate the pose, then recast every ray.
    pub fn step(&mut self, dt: f32, intent: MotionIntent) -> &[RayResult] {
        let dt = self.clamp_dt(dt);
        self.pose = integrate(self.pose, intent, dt, &self.map, &self.motion);
        cast_fan(&self.map, &self.pose, self.fov, &mut self.rays);
        &self.rays
    }
}
