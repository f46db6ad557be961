//! End-to-end scenarios through the public API: map -> simulation -> frame.
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, PI, TAU};

use approx::assert_relative_eq;
use glam::Vec2;
use proptest::prelude::*;

use wolf3d_raycaster::core::geometry::normalize_angle;
use wolf3d_raycaster::core::maze::GridMap;
use wolf3d_raycaster::core::player::{CollisionPolicy, MotionIntent, MotionParams, Pose};
use wolf3d_raycaster::render::casters::cast_ray;
use wolf3d_raycaster::render::framebuffer::{Color, Framebuffer};
use wolf3d_raycaster::render::render3d::{Projection, draw_frame};
use wolf3d_raycaster::{Settings, Simulation};

const T: f32 = 64.0;

fn init() {
    env_logger::try_init().ok();
}

fn single_cell() -> GridMap {
    GridMap::parse("111\n101\n111\n", T).unwrap()
}

fn room() -> GridMap {
    GridMap::parse("111111\n100001\n100001\n100001\n100001\n111111\n", T).unwrap()
}

#[test]
fn central_ray_in_single_cell_room() {
    init();
    let fov = FRAC_PI_3;
    let mut sim = Simulation::new(single_cell(), Pose::new(1.5 * T, 1.5 * T, 0.0), MotionParams::default(), fov, 192);
    let rays = sim.step(0.0, MotionIntent::IDLE);

    // even ray count: ray n/2 points straight along the heading
    let central = rays[rays.len() / 2];
    assert!(central.hit);
    // centre of the middle cell to the near face of the right wall
    assert_relative_eq!(central.distance, 0.5 * T, epsilon = 1e-3);
    assert_relative_eq!(central.hit_point.x, 2.0 * T, epsilon = 1e-3);
    assert_relative_eq!(central.hit_point.y, 1.5 * T, epsilon = 1e-3);
    assert!(rays.iter().all(|r| r.hit));
}

#[test]
fn blocked_walk_turns_in_place() {
    init();
    let map = GridMap::level();
    // cell (1, 1), facing the wall at x = 64
    let start = Pose::new(75.0, 96.0, PI);
    let params = MotionParams { walk_speed: 200.0, turn_speed: FRAC_PI_2, half_extent: 10.0, policy: CollisionPolicy::Coupled };
    let mut sim = Simulation::new(map, start, params, FRAC_PI_3, 32);

    sim.step(0.01, MotionIntent { walk: 1, turn: 0 });
    assert_eq!((sim.pose().x, sim.pose().y), (start.x, start.y));

    sim.step(0.02, MotionIntent { walk: 0, turn: 1 });
    assert_relative_eq!(sim.pose().heading, PI + FRAC_PI_2 * 0.02, epsilon = 1e-5);
    assert_eq!((sim.pose().x, sim.pose().y), (start.x, start.y));
}

#[test]
fn walking_toward_a_wall_makes_it_taller() {
    init();
    let (mut sim, proj) = Settings::default().build().unwrap();
    let mut fb = Framebuffer::new(proj.screen_width, proj.screen_height);
    let mid = (proj.screen_width / 2) as usize;

    let column_height = |fb: &Framebuffer| {
        (0..fb.height)
            .filter(|&y| {
                let c = fb.get_pixel(mid as u32, y);
                c.r > 100 && c.r == c.g && c.g == c.b
            })
            .count()
    };

    sim.step(0.0, MotionIntent::IDLE);
    let far = sim.rays()[mid].distance;
    draw_frame(&mut fb, &proj, sim.rays(), sim.pose().heading, 1);
    let h_far = column_height(&fb);

    for _ in 0..20 {
        sim.step(0.05, MotionIntent { walk: 1, turn: 0 });
    }
    let near = sim.rays()[mid].distance;
    draw_frame(&mut fb, &proj, sim.rays(), sim.pose().heading, 1);
    let h_near = column_height(&fb);

    assert!(near < far, "{near} >= {far}");
    assert!(h_near > h_far, "{h_near} <= {h_far}");
}

#[test]
fn frame_is_fully_overwritten() {
    init();
    let (mut sim, proj) = Settings::default().build().unwrap();
    let mut fb = Framebuffer::new(proj.screen_width, proj.screen_height);
    fb.color_buffer.fill(Color::MAGENTA);
    sim.step(0.016, MotionIntent::IDLE);
    draw_frame(&mut fb, &proj, sim.rays(), sim.pose().heading, 1);
    assert!(fb.color_buffer.iter().all(|&c| c != Color::MAGENTA));
}

proptest! {
    #[test]
    fn normalized_angle_in_range(a in -1.0e4f32..1.0e4) {
        let n = normalize_angle(a);
        prop_assert!((0.0..TAU).contains(&n));
    }

    #[test]
    fn enclosed_rays_always_hit(x in 64.5f32..319.5, y in 64.5f32..319.5, a in 0.0f32..TAU) {
        let map = room();
        let origin = Vec2::new(x, y);
        let r = cast_ray(&map, origin, a);
        prop_assert!(r.hit);
        prop_assert!((r.distance - origin.distance(r.hit_point)).abs() < 1e-3);
        // hit lies on a grid line
        let off_x = (r.hit_point.x / T - (r.hit_point.x / T).round()).abs();
        let off_y = (r.hit_point.y / T - (r.hit_point.y / T).round()).abs();
        prop_assert!(off_x < 1e-3 || off_y < 1e-3);
        // and no further than the far corner
        prop_assert!(r.distance <= (2.0f32 * 320.0 * 320.0).sqrt());
    }

    #[test]
    fn strip_height_decreases_with_distance(d in 1.0f32..2000.0, k in 1.01f32..10.0) {
        let proj = Projection::new(640, 480, FRAC_PI_3, T);
        let near = proj.strip_height(Projection::corrected_distance(d, 0.3, 0.3));
        let far = proj.strip_height(Projection::corrected_distance(d * k, 0.3, 0.3));
        prop_assert!(near > far);
        prop_assert!((near / far - k).abs() < 1e-2 * k);
    }
}
