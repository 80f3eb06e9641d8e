//! Facet Engine: painter's-algorithm software 3D rasterizer
//!
//! Renders planar-polygon meshes without a depth buffer:
//! - Back-to-front polygon ordering (painter's algorithm)
//! - Perspective projection onto a configurable near plane
//! - Scanline polygon filling
//! - Flat normal-dot-light shading
//!
//! The viewer binary shows a built-in cube, or a Wavefront-style mesh given
//! as the first argument.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod rasterizer;
mod world;

use std::f64::consts::PI;
use std::path::Path;

use env_logger::Env;
use log::{error, info, warn};
use macroquad::prelude::*;

use config::{load_config, RenderConfig};
use rasterizer::{Color as RasterColor, Framebuffer, Point3, Renderer};
use world::{create_cube, load_obj};

const DEFAULT_LOGGING_LEVEL: &str = "info";
const CONFIG_PATH: &str = "config.ron";

/// Translation per keypress, matching the original viewer
const TRANSLATE_STEP: f64 = 0.15;
/// Auto-spin speed in radians per second
const SPIN_SPEED: f64 = 0.8;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Facet Engine v{}", VERSION),
        window_width: 800,
        window_height: 600,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_LOGGING_LEVEL)).init();

    let config = if Path::new(CONFIG_PATH).exists() {
        match load_config(CONFIG_PATH) {
            Ok(config) => {
                info!("loaded {}", CONFIG_PATH);
                config
            }
            Err(e) => {
                warn!("failed to load {}: {}, using defaults", CONFIG_PATH, e);
                RenderConfig::default()
            }
        }
    } else {
        RenderConfig::default()
    };

    let mut object = match std::env::args().nth(1) {
        Some(path) => load_obj(&path, RasterColor::WHITE).unwrap_or_else(|e| {
            error!("failed to load {}: {}", path, e);
            std::process::exit(1);
        }),
        None => create_cube(2.0, Point3::ORIGIN, RasterColor::WHITE).unwrap_or_else(|e| {
            error!("failed to build cube: {}", e);
            std::process::exit(1);
        }),
    };

    // Push the scene into the camera's forward half-space before the first
    // projection, then face it toward the viewer.
    object.translate(0.0, 0.0, 5.0);
    object.rotate(object.center, Point3::new(1.0, 0.0, 0.0), PI);
    object.rotate(object.center, Point3::new(0.0, 1.0, 0.0), PI / 3.0);

    let light = Point3::new(config.light.0, config.light.1, config.light.2);
    let mut fb = Framebuffer::new(config.image_width as usize, config.image_height as usize);
    let renderer = Renderer::new(config);

    let mut spinning = true;
    let mut wireframe = false;

    info!("controls: arrows/=/- move, space spin, w wireframe, s screenshot, esc quit");

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_pressed(KeyCode::Space) {
            spinning = !spinning;
        }
        if is_key_pressed(KeyCode::W) {
            wireframe = !wireframe;
        }
        if is_key_pressed(KeyCode::Left) {
            object.translate(-TRANSLATE_STEP, 0.0, 0.0);
        }
        if is_key_pressed(KeyCode::Right) {
            object.translate(TRANSLATE_STEP, 0.0, 0.0);
        }
        if is_key_pressed(KeyCode::Up) {
            object.translate(0.0, -TRANSLATE_STEP, 0.0);
        }
        if is_key_pressed(KeyCode::Down) {
            object.translate(0.0, TRANSLATE_STEP, 0.0);
        }
        if is_key_pressed(KeyCode::Equal) {
            object.translate(0.0, 0.0, -TRANSLATE_STEP);
        }
        if is_key_pressed(KeyCode::Minus) {
            object.translate(0.0, 0.0, TRANSLATE_STEP);
        }

        if spinning {
            let angle = SPIN_SPEED * get_frame_time() as f64;
            object.rotate(object.center, Point3::new(0.0, 1.0, 0.0), angle);
        }

        fb.clear(RasterColor::BLACK);
        if wireframe {
            renderer.render_wireframe(&mut fb, &object);
        } else {
            renderer.render(&mut fb, &object, light);
        }

        if is_key_pressed(KeyCode::S) {
            save_screenshot(&fb);
        }

        clear_background(BLACK);
        let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
        texture.set_filter(FilterMode::Nearest);
        let (draw_w, draw_h, draw_x, draw_y) = letterbox(fb.width, fb.height);
        draw_texture_ex(
            &texture,
            draw_x,
            draw_y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(draw_w, draw_h)),
                ..Default::default()
            },
        );

        next_frame().await;
    }
}

/// Fit the framebuffer into the window preserving aspect ratio
fn letterbox(fb_width: usize, fb_height: usize) -> (f32, f32, f32, f32) {
    let fb_aspect = fb_width as f32 / fb_height as f32;
    let screen_w = screen_width();
    let screen_h = screen_height();
    if fb_aspect > screen_w / screen_h {
        let w = screen_w;
        let h = screen_w / fb_aspect;
        (w, h, 0.0, (screen_h - h) / 2.0)
    } else {
        let h = screen_h;
        let w = screen_h * fb_aspect;
        (w, h, (screen_w - w) / 2.0, 0.0)
    }
}

fn save_screenshot(fb: &Framebuffer) {
    let path = "screenshot.png";
    match image::save_buffer(
        path,
        &fb.pixels,
        fb.width as u32,
        fb.height as u32,
        image::ExtendedColorType::Rgba8,
    ) {
        Ok(()) => info!("saved {}", path),
        Err(e) => error!("failed to save {}: {}", path, e),
    }
}
