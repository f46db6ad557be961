//! Core game types and logic (data, motion, per-frame state).
//!
//! Re-exports:
//! - `geometry`: 2D vector and angle normalization
//! - `maze`: Grid map and the built-in level
//! - `player`: Pose, motion intent and collision-checked integration
//! - `simulation`: Owner of map, pose and ray buffer; the per-frame step

pub mod geometry;
pub mod maze;
pub mod player;
pub mod simulation;
