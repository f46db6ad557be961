//! Settings loaded from an optional TOML file, with built-in defaults.
//!
//! Every key is optional:
//!
//! ```toml
//! fov_degrees = 60.0
//! strip_width = 1
//! walk_speed = 200.0
//! turn_speed_degrees = 150.0
//! half_extent = 10.0
//! max_frame_dt = 0.05
//! collision = "per_axis"   # or "coupled"
//! show_minimap = true
//! minimap_scale = 0.3
//! minimap_offset = [20.0, 20.0]
//! # map_file = "level.txt"
//!
//! [spawn]
//! x = 1.5
//! y = 1.5
//! heading_degrees = 0.0
//! ```
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::maze::{CellKind, GridMap, TILE_SIZE};
use crate::core::player::{CollisionPolicy, MotionParams, Pose};
use crate::core::simulation::{MAX_FRAME_DT, Simulation};
use crate::error::{Error, Result};
use crate::render::minimap::Minimap;
use crate::render::render3d::Projection;

/// Settings file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "raycaster.toml";

/// Spawn point in tile units (cell centres are at `.5`).
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Spawn {
    pub x: f32,
    pub y: f32,
    pub heading_degrees: f32,
}

impl Default for Spawn {
    fn default() -> Self {
        Self { x: 1.5, y: 1.5, heading_degrees: 0.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub tile_size: f32,
    pub fov_degrees: f32,
    /// Screen columns per ray.
    pub strip_width: u32,
    pub walk_speed: f32,
    pub turn_speed_degrees: f32,
    pub half_extent: f32,
    pub max_frame_dt: f32,
    pub collision: CollisionPolicy,
    pub spawn: Spawn,
    /// Text map (see [`GridMap::parse`]); the built-in level when unset.
    pub map_file: Option<PathBuf>,
    pub show_minimap: bool,
    pub minimap_scale: f32,
    pub minimap_offset: [f32; 2],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            fov_degrees: 60.0,
            strip_width: 1,
            walk_speed: 200.0,
            turn_speed_degrees: 150.0,
            half_extent: 10.0,
            max_frame_dt: MAX_FRAME_DT,
            collision: CollisionPolicy::PerAxis,
            spawn: Spawn::default(),
            map_file: None,
            show_minimap: true,
            minimap_scale: 0.3,
            minimap_offset: [20.0, 20.0],
        }
    }
}

impl Settings {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads `path`, or [`DEFAULT_CONFIG_PATH`] when `None`. A missing default
    /// file yields the defaults; an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_default(path, Path::new(DEFAULT_CONFIG_PATH))
    }

    fn load_with_default(path: Option<&Path>, default_path: &Path) -> Result<Self> {
        let settings = match path {
            Some(path) => {
                let settings = Self::from_toml(&fs::read_to_string(path)?)?;
                log::info!("Loaded config from {}", path.display());
                settings
            }
            None => match fs::read_to_string(default_path) {
                Ok(text) => {
                    let settings = Self::from_toml(&text)?;
                    log::info!("Loaded config from {}", default_path.display());
                    settings
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    log::info!("No {}, using defaults", default_path.display());
                    Self::default()
                }
                Err(e) => return Err(e.into()),
            },
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Checks ranges that do not depend on the map.
    pub fn validate(&self) -> Result<()> {
        let bad = |msg: String| Err(Error::InvalidConfig(msg));
        if !(self.tile_size > 0.0) {
            return bad(format!("tile_size must be positive, got {}", self.tile_size));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return bad(format!("fov_degrees must be in (0, 180), got {}", self.fov_degrees));
        }
        if self.strip_width == 0 {
            return bad("strip_width must be at least 1".into());
        }
        if !(self.walk_speed >= 0.0) || !(self.turn_speed_degrees >= 0.0) {
            return bad("walk_speed and turn_speed_degrees must not be negative".into());
        }
        if !(self.half_extent >= 0.0 && self.half_extent < self.tile_size * 0.5) {
            return bad(format!("half_extent must be in [0, tile_size/2), got {}", self.half_extent));
        }
        if !(self.max_frame_dt > 0.0) {
            return bad(format!("max_frame_dt must be positive, got {}", self.max_frame_dt));
        }
        if !(self.minimap_scale > 0.0) {
            return bad(format!("minimap_scale must be positive, got {}", self.minimap_scale));
        }
        Ok(())
    }

    pub fn fov(&self) -> f32 {
        self.fov_degrees.to_radians()
    }

    pub fn motion(&self) -> MotionParams {
        MotionParams {
            walk_speed: self.walk_speed,
            turn_speed: self.turn_speed_degrees.to_radians(),
            half_extent: self.half_extent,
            policy: self.collision,
        }
    }

    pub fn minimap(&self) -> Minimap {
        Minimap {
            scale: self.minimap_scale,
            offset_x: self.minimap_offset[0],
            offset_y: self.minimap_offset[1],
        }
    }

    /// The configured map file, or the built-in level rescaled to `tile_size`.
    pub fn load_map(&self) -> Result<GridMap> {
        match &self.map_file {
            Some(path) => GridMap::load(path, self.tile_size),
            None if self.tile_size == TILE_SIZE => Ok(GridMap::level()),
            None => {
                let level = GridMap::level();
                let rows: Vec<Vec<CellKind>> = (0..level.rows())
                    .map(|r| (0..level.cols()).filter_map(|c| level.cell_at(r, c)).collect())
                    .collect();
                GridMap::new(rows, self.tile_size)
            }
        }
    }

    /// Spawn pose in world units. The actor's whole footprint (centre plus
    /// `half_extent` along each axis) must lie in empty cells, so no ray
    /// starts on a wall face.
    pub fn spawn_pose(&self, map: &GridMap) -> Result<Pose> {
        let t = map.tile_size();
        let (x, y) = (self.spawn.x * t, self.spawn.y * t);
        let r = self.half_extent.max(t * 1e-3);
        let footprint = [(x, y), (x + r, y), (x - r, y), (x, y + r), (x, y - r)];
        if footprint.iter().any(|&(px, py)| map.is_solid_at(px, py)) {
            return Err(Error::InvalidConfig(format!(
                "spawn ({}, {}) is not clear of walls by {}",
                self.spawn.x, self.spawn.y, self.half_extent
            )));
        }
        Ok(Pose::new(x, y, self.spawn.heading_degrees.to_radians()))
    }

    /// Screen is one pixel per world unit: `cols·T × rows·T`.
    pub fn screen_size(&self, map: &GridMap) -> (u32, u32) {
        (map.world_width() as u32, map.world_height() as u32)
    }

    pub fn num_rays(&self, map: &GridMap) -> Result<usize> {
        let (w, _) = self.screen_size(map);
        let n = (w / self.strip_width) as usize;
        if n == 0 {
            return Err(Error::InvalidConfig(format!(
                "strip_width {} is wider than the {w}px screen",
                self.strip_width
            )));
        }
        Ok(n)
    }

    /// Builds the map, simulation and projection described by these settings.
    pub fn build(&self) -> Result<(Simulation, Projection)> {
        let map = self.load_map()?;
        let pose = self.spawn_pose(&map)?;
        let num_rays = self.num_rays(&map)?;
        let (w, h) = self.screen_size(&map);
        let projection = Projection::new(w, h, self.fov(), map.tile_size());
        log::debug!(
            "screen {w}x{h}, {num_rays} rays, fov {:.1}°, collision {:?}",
            self.fov_degrees,
            self.collision
        );
        let sim = Simulation::new(map, pose, self.motion(), self.fov(), num_rays).with_max_dt(self.max_frame_dt);
        Ok((sim, projection))
    }
}
