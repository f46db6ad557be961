//! Rendering: ray casting and everything that writes pixels.
//!
//! Re-exports:
//! - `casters`: Grid-line ray caster and the ray fan
//! - `framebuffer`: CPU framebuffer and colour type
//! - `render3d`: Wall projector (strip heights, sky/floor)
//! - `minimap`: Top-down debug overlay

pub mod casters;
pub mod framebuffer;
pub mod render3d;
pub mod minimap;
