//! Player pose and motion integration with grid collision.
use serde::Deserialize;

use crate::core::geometry::normalize_angle;
use crate::core::maze::GridMap;

/// Position in world units and heading in radians, `[0, 2π)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    pub heading: f32,
}

impl Pose {
    pub fn new(x: f32, y: f32, heading: f32) -> Self {
        Self { x, y, heading: normalize_angle(heading) }
    }
}

/// Held-key motion request: `walk` +1 forward / -1 back, `turn` +1 right / -1 left.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MotionIntent {
    pub walk: i8,
    pub turn: i8,
}

impl MotionIntent {
    pub const IDLE: MotionIntent = MotionIntent { walk: 0, turn: 0 };

    /// Opposing keys cancel out.
    pub fn from_keys(forward: bool, back: bool, left: bool, right: bool) -> Self {
        Self {
            walk: forward as i8 - back as i8,
            turn: right as i8 - left as i8,
        }
    }
}

/// How a move into a wall is resolved.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Test the combined target cell; a hit rejects both axes.
    /// Diagonal moves into a corner stick.
    Coupled,
    /// Test and apply X then Y independently, so the actor slides along walls.
    #[default]
    PerAxis,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MotionParams {
    /// World units per second.
    pub walk_speed: f32,
    /// Radians per second.
    pub turn_speed: f32,
    /// Distance from the actor centre to its leading edge.
    pub half_extent: f32,
    pub policy: CollisionPolicy,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            walk_speed: 200.0,
            turn_speed: 150f32.to_radians(),
            half_extent: 10.0,
            policy: CollisionPolicy::PerAxis,
        }
    }
}

#[inline]
fn lead(delta: f32, half_extent: f32) -> f32 {
    if delta > 0.0 {
        half_extent
    } else if delta < 0.0 {
        -half_extent
    } else {
        0.0
    }
}

/// Advances `pose` by `dt` seconds. The heading update always applies; the
/// position update is dropped (per axis or whole, depending on policy) when it
/// would put the actor's leading edge into a wall. `dt` is used as given, the
/// caller caps it.
pub fn integrate(pose: Pose, intent: MotionIntent, dt: f32, map: &GridMap, params: &MotionParams) -> Pose {
    let heading = normalize_angle(pose.heading + params.turn_speed * intent.turn as f32 * dt);
    let step = params.walk_speed * intent.walk as f32 * dt;
    let dx = heading.cos() * step;
    let dy = heading.sin() * step;
    let h = params.half_extent;

    let (mut x, mut y) = (pose.x, pose.y);
    match params.policy {
        CollisionPolicy::Coupled => {
            let (nx, ny) = (x + dx, y + dy);
            if map.is_solid_at(nx + lead(dx, h), ny + lead(dy, h)) {
                log::trace!("move to ({nx:.1}, {ny:.1}) rejected");
            } else {
                x = nx;
                y = ny;
            }
        }
        CollisionPolicy::PerAxis => {
            let nx = x + dx;
            if dx != 0.0 {
                if map.is_solid_at(nx + lead(dx, h), y) {
                    log::trace!("x move to {nx:.1} rejected");
                } else {
                    x = nx;
                }
            }
            let ny = y + dy;
            if dy != 0.0 {
                if map.is_solid_at(x, ny + lead(dy, h)) {
                    log::trace!("y move to {ny:.1} rejected");
                } else {
                    y = ny;
                }
            }
        }
    }

    Pose { x, y, heading }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_4, PI};

    fn room() -> GridMap {
        // 5x5 ring, interior empty, tile 64
        GridMap::parse("11111\n10001\n10001\n10001\n11111\n", 64.0).unwrap()
    }

    fn params(policy: CollisionPolicy) -> MotionParams {
        MotionParams { walk_speed: 100.0, turn_speed: PI, half_extent: 8.0, policy }
    }

    #[test]
    fn test_from_keys() {
        assert_eq!(MotionIntent::from_keys(true, false, false, true), MotionIntent { walk: 1, turn: 1 });
        assert_eq!(MotionIntent::from_keys(true, true, true, true), MotionIntent::IDLE);
        assert_eq!(MotionIntent::from_keys(false, true, true, false), MotionIntent { walk: -1, turn: -1 });
    }

    #[test]
    fn test_walk_forward_free() {
        let map = room();
        let p = integrate(Pose::new(160.0, 160.0, 0.0), MotionIntent { walk: 1, turn: 0 }, 0.1, &map, &params(CollisionPolicy::PerAxis));
        assert_relative_eq!(p.x, 170.0, epsilon = 1e-3);
        assert_relative_eq!(p.y, 160.0, epsilon = 1e-3);
    }

    #[test]
    fn test_turn_wraps() {
        let map = room();
        let p = integrate(Pose::new(160.0, 160.0, 0.1), MotionIntent { walk: 0, turn: -1 }, 0.5, &map, &params(CollisionPolicy::PerAxis));
        assert_relative_eq!(p.heading, 0.1 - PI / 2.0 + 2.0 * PI, epsilon = 1e-4);
    }

    #[test]
    fn test_blocked_move_keeps_position_but_turns() {
        let map = room();
        for policy in [CollisionPolicy::Coupled, CollisionPolicy::PerAxis] {
            // wall faces at x = 256 and y = 256; the leading edge crosses both
            let start = Pose::new(250.0, 250.0, FRAC_PI_4);
            let p = integrate(start, MotionIntent { walk: 1, turn: 1 }, 0.01, &map, &MotionParams { walk_speed: 500.0, ..params(policy) });
            assert_eq!((p.x, p.y), (start.x, start.y), "{policy:?}");
            assert_relative_eq!(p.heading, FRAC_PI_4 + PI * 0.01, epsilon = 1e-5);
        }

        // straight into the right wall
        let start = Pose::new(250.0, 160.0, 0.0);
        let p = integrate(start, MotionIntent { walk: 1, turn: 0 }, 0.01, &map, &params(CollisionPolicy::PerAxis));
        assert_eq!((p.x, p.y), (start.x, start.y));
    }

    #[test]
    fn test_diagonal_into_wall_coupled_sticks_per_axis_slides() {
        let map = room();
        // close to the right wall, heading down-right
        let start = Pose::new(245.0, 160.0, FRAC_PI_4);
        let intent = MotionIntent { walk: 1, turn: 0 };

        let coupled = integrate(start, intent, 0.05, &map, &params(CollisionPolicy::Coupled));
        assert_eq!((coupled.x, coupled.y), (start.x, start.y));

        let slid = integrate(start, intent, 0.05, &map, &params(CollisionPolicy::PerAxis));
        assert_eq!(slid.x, start.x);
        assert!(slid.y > start.y);
    }
}
