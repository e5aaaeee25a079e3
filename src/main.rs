//! Marchland Engine: software-rasterized streaming world demo
//!
//! Renders the built-in sample world through the perspective-correct
//! rasterizer while paging map cells around the player:
//! - 640x360 internal framebuffer scaled to the window
//! - Flat directional lighting on a slow day cycle
//! - 3x3 world cell grid reloaded as the player crosses cell borders

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod rasterizer;
mod settings;
mod world;

use macroquad::prelude::*;

use log::{error, info};
use rasterizer::{Framebuffer, FB_HEIGHT, FB_WIDTH};
use settings::load_settings_or_default;
use world::{sample, World, MAP_HEIGHT, MAP_WIDTH};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Marchland Engine v{}", VERSION),
        window_width: FB_WIDTH as i32 * 2,
        window_height: FB_HEIGHT as i32 * 2,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let mut engine_settings = load_settings_or_default("settings.ron");
    info!("settings: {:?}", engine_settings);

    let assets = sample::sample_library();
    let mut player_world = match World::new(&assets, engine_settings.start_x, engine_settings.start_z)
    {
        Ok(w) => w,
        Err(e) => {
            error!("failed to load world: {}", e);
            return;
        }
    };

    let mut fb = Framebuffer::new(FB_WIDTH, FB_HEIGHT);
    let mut player_x = engine_settings.start_x;
    let mut player_z = engine_settings.start_z;
    let mut sun_angle = 0.0f32;

    loop {
        let dt = get_frame_time();

        // WASD moves the player on the ground plane
        let mut dx = 0.0;
        let mut dz = 0.0;
        if is_key_down(KeyCode::W) || is_key_down(KeyCode::Up) {
            dz -= 1.0;
        }
        if is_key_down(KeyCode::S) || is_key_down(KeyCode::Down) {
            dz += 1.0;
        }
        if is_key_down(KeyCode::A) || is_key_down(KeyCode::Left) {
            dx -= 1.0;
        }
        if is_key_down(KeyCode::D) || is_key_down(KeyCode::Right) {
            dx += 1.0;
        }
        player_x += dx * engine_settings.move_speed * dt;
        player_z += dz * engine_settings.move_speed * dt;

        if is_key_pressed(KeyCode::U) {
            engine_settings.show_uvs = !engine_settings.show_uvs;
        }

        sun_angle += engine_settings.day_cycle_speed * dt;
        let raster_settings = engine_settings.raster_settings(sun_angle);

        player_world.update(&assets, player_x, player_z);

        // Cells render relative to the grid center, so the camera
        // targets the player's position within the center cell
        let (cx, cy) = player_world.center();
        let local = rasterizer::Vec3::new(
            player_x - (cx * MAP_WIDTH as i32) as f32,
            0.0,
            player_z - (cy * MAP_HEIGHT as i32) as f32,
        );

        let eye = local + rasterizer::Vec3::new(0.0, 22.0, 16.0);
        let view = rasterizer::Mat4::look_at(eye, local, rasterizer::Vec3::UP);
        let projection = rasterizer::Mat4::perspective(
            60.0f32.to_radians(),
            FB_WIDTH as f32 / FB_HEIGHT as f32,
            0.5,
            300.0,
        );

        fb.clear(rasterizer::Color::new(96, 134, 170));
        let draws = player_world.render(&mut fb, view, projection, &raster_settings);

        // Crosshair at the player
        let (hx, hy) = (FB_WIDTH as i32 / 2, FB_HEIGHT as i32 / 2);
        fb.draw_line(hx - 4, hy, hx + 4, hy, rasterizer::Color::WHITE);
        fb.draw_line(hx, hy - 4, hx, hy + 4, rasterizer::Color::WHITE);

        // Scale the framebuffer to the window, preserving aspect
        let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
        texture.set_filter(FilterMode::Nearest);

        let scale = (screen_width() / FB_WIDTH as f32).min(screen_height() / FB_HEIGHT as f32);
        let draw_w = FB_WIDTH as f32 * scale;
        let draw_h = FB_HEIGHT as f32 * scale;
        clear_background(BLACK);
        draw_texture_ex(
            &texture,
            (screen_width() - draw_w) * 0.5,
            (screen_height() - draw_h) * 0.5,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(draw_w, draw_h)),
                ..Default::default()
            },
        );

        draw_text(
            &format!(
                "FPS {} | cell ({}, {}) | pos ({:.1}, {:.1}) | draws {} | loads {}",
                get_fps(),
                cx,
                cy,
                player_x,
                player_z,
                draws,
                player_world.cell_loads,
            ),
            10.0,
            20.0,
            20.0,
            WHITE,
        );

        next_frame().await
    }
}
