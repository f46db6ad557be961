// main.rs
mod process_events;

use std::fmt::Display;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use raylib::core::texture::RaylibTexture2D;
use raylib::prelude::*;
use wolf3d_raycaster::render::framebuffer::Framebuffer;
use wolf3d_raycaster::render::render3d::draw_frame;
use wolf3d_raycaster::{Error, Result, Settings};

use process_events::{minimap_toggled, read_intent};

/// Logs the first failed texture upload; later failures stay quiet.
fn report_upload<E: Display>(result: std::result::Result<(), E>, warned: &mut bool) {
    if let Err(e) = result {
        if !*warned {
            log::warn!("Texture upload failed: {e}");
            *warned = true;
        }
    }
}

fn run(config_path: Option<PathBuf>) -> Result<()> {
    let settings = Settings::load(config_path.as_deref())?;
    let (mut sim, projection) = settings.build()?;
    let minimap = settings.minimap();
    let mut show_minimap = settings.show_minimap;
    let (width, height) = (projection.screen_width, projection.screen_height);

    let (mut window, raylib_thread) = raylib::init()
        .size(width as i32, height as i32)
        .title("wolf 3d")
        .build();
    window.set_target_fps(60);

    // persistent texture; the framebuffer is uploaded into it every frame
    let image = Image::gen_image_color(width as i32, height as i32, Color::BLACK);
    let mut texture = window
        .load_texture_from_image(&raylib_thread, &image)
        .map_err(|e| Error::Window(e.to_string()))?;
    let mut framebuffer = Framebuffer::new(width, height);

    log::info!("Window {}x{}, {} rays", width, height, sim.rays().len());

    let mut upload_warned = false;
    let mut last = Instant::now();
    while !window.window_should_close() {
        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32();
        last = now;

        if minimap_toggled(&window) {
            show_minimap = !show_minimap;
        }
        let intent = read_intent(&window);

        sim.step(dt, intent);

        draw_frame(&mut framebuffer, &projection, sim.rays(), sim.pose().heading, settings.strip_width);
        if show_minimap {
            minimap.draw(&mut framebuffer, sim.map(), sim.pose(), sim.rays());
        }
        report_upload(texture.update_texture(framebuffer.as_bytes()), &mut upload_warned);

        let mut d = window.begin_drawing(&raylib_thread);
        d.clear_background(Color::BLACK);
        d.draw_texture(&texture, 0, 0, Color::WHITE);
        d.draw_fps(width as i32 - 90, 10);
    }

    log::info!("Window closed");
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    if let Err(e) = run(config_path) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_failure_reported_once() {
        let mut warned = false;
        report_upload::<String>(Ok(()), &mut warned);
        assert!(!warned);
        report_upload(Err("size mismatch".to_string()), &mut warned);
        assert!(warned);
        report_upload(Err("size mismatch".to_string()), &mut warned);
        assert!(warned);
    }
}
