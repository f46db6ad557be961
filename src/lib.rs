//! Wolfenstein-style raycasting renderer.
//!
//! A fixed wall/empty grid and a player pose are turned into a first-person
//! view by casting one ray per screen column and drawing a wall strip whose
//! height is inversely proportional to the fisheye-corrected hit distance.
//!
//! Layout:
//! - `core`: grid map, pose/motion integration and the per-frame [`Simulation`]
//! - `render`: ray caster, wall projector, framebuffer and minimap overlay
//! - `config`: TOML settings with built-in defaults
//! - `error`: crate error type
//!
//! The raylib window lives in the `wolf3d` binary (feature `window`).

pub mod config;
pub mod core;
pub mod error;
pub mod render;

pub use crate::config::Settings;
pub use crate::core::simulation::Simulation;
pub use crate::error::{Error, Result};
