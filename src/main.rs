// Allow unused code for designed-but-not-yet-used APIs
// Remove these as the codebase matures
#![allow(dead_code)]

mod config;
mod display;
mod iso;
mod lighting;
mod map;
mod player;
mod render;
mod timer;
mod util;

use config::Config;
use lighting::Light;
use map::Map;
use player::{InputState, Player};
use render::Renderer;
use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Scancode};
use timer::Timer;
use util::{mix, smoothstep, FpsCounter};

const TAU: f32 = std::f32::consts::TAU;

/// Cool night grade applied when daylight fades
const NIGHT_TINT: [f32; 3] = [0.72, 0.82, 1.05];
/// Warm grade blended in through dawn and dusk
const DUSK_TINT: [f32; 3] = [1.12, 0.95, 0.82];

/// Ambient level and global tint for a moment of the day/night cycle
fn day_night(world_time: f32, day_length_seconds: f32) -> (f32, [f32; 3]) {
    let day_phase = (world_time / day_length_seconds).fract();

    let dawn = smoothstep(0.20, 0.32, day_phase);
    let dusk = smoothstep(0.68, 0.82, day_phase);
    let daylight = (dawn - dusk).clamp(0.0, 1.0);
    let twilight =
        ((dawn * (1.0 - daylight)) + (dusk * (1.0 - daylight))).clamp(0.0, 1.0);

    let ambient = mix(0.11, 0.38, daylight) + 0.06 * twilight;

    let mut tint = [0.0; 3];
    for channel in 0..3 {
        let base = mix(NIGHT_TINT[channel], 1.0, daylight);
        tint[channel] = mix(base, DUSK_TINT[channel], twilight);
    }

    (ambient, tint)
}

fn main() -> Result<(), String> {
    let config = Config::load_or_default("frontier.json");

    let sdl_context = sdl2::init()?;
    let video = sdl_context.video()?;

    // Legacy-profile context: attributes must be set before the window exists
    let gl_attr = video.gl_attr();
    gl_attr.set_context_version(2, 1);
    gl_attr.set_double_buffer(true);

    let window = video
        .window("Frontier", config.window.width, config.window.height)
        .position_centered()
        .opengl()
        .resizable()
        .build()
        .map_err(|e| e.to_string())?;

    let mut renderer = Renderer::initialize(&video, window, config.window.vsync)?;

    let map = Map::load(&config.map_path)?;
    let mut player = Player::new(2.5, 2.5);

    let mut player_light = Light {
        x: player.x(),
        y: player.y(),
        radius: 4.2,
        intensity: 0.88,
        r: 1.00,
        g: 0.78,
        b: 0.52,
        falloff_exponent: 2.3,
    };
    let mut lamp_light = Light {
        x: config.lamp.x,
        y: config.lamp.y,
        radius: 4.0,
        intensity: 0.72,
        r: 1.00,
        g: 0.70,
        b: 0.42,
        falloff_exponent: 1.8,
    };

    println!("=== frontier ===");
    println!("Resolution: {}x{}", config.window.width, config.window.height);
    println!(
        "Lighting: {}",
        if renderer.is_software() { "CPU" } else { "GPU" }
    );
    println!("Controls:");
    println!("  WASD / Arrows - Move");
    println!("  Escape        - Quit");

    let mut event_pump = sdl_context.event_pump()?;
    let mut timer = Timer::default();
    let mut fps_counter = FpsCounter::new(60);
    let mut world_time = 0.0_f32;

    'main: loop {
        let (frame_dt, _avg_fps) = fps_counter.tick();

        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'main,
                _ => {},
            }
        }

        let keys = event_pump.keyboard_state();
        let input = InputState {
            up: keys.is_scancode_pressed(Scancode::W) || keys.is_scancode_pressed(Scancode::Up),
            down: keys.is_scancode_pressed(Scancode::S)
                || keys.is_scancode_pressed(Scancode::Down),
            left: keys.is_scancode_pressed(Scancode::A)
                || keys.is_scancode_pressed(Scancode::Left),
            right: keys.is_scancode_pressed(Scancode::D)
                || keys.is_scancode_pressed(Scancode::Right),
        };

        // Clamp pathological frame spikes so the simulation cannot spiral
        timer.tick(f64::from(frame_dt.min(0.1)));
        while timer.can_step() {
            let dt = timer.delta() as f32;
            world_time += dt;

            player.update(&input, &map, dt);
            player_light.x = player.x();
            player_light.y = player.y();

            let (ambient, tint) = day_night(world_time, config.day_length_seconds);
            renderer.set_ambient(ambient);
            renderer.set_global_tint(tint[0], tint[1], tint[2]);

            let player_flicker = 0.93 + 0.07 * (world_time * 14.0 + 1.1).sin();
            let lamp_flicker =
                0.9 + 0.1 * (world_time * 9.0 + 0.3).sin() * (world_time * 5.0 + 0.8).sin();
            player_light.intensity = 0.82 * player_flicker;
            lamp_light.intensity = 0.66 * lamp_flicker;

            player_light.radius = 3.9 + 0.25 * (world_time * 3.5).sin();
            lamp_light.radius =
                3.6 + 0.45 * (0.5 + 0.5 * (world_time * 2.1 + TAU * 0.25).sin());

            timer.consume_step();
        }

        renderer.render(&map, &player, &player_light, &lamp_light)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_night_ambient_stays_in_renderable_range() {
        for i in 0..720 {
            let t = i as f32 * 0.1;
            let (ambient, tint) = day_night(t, 72.0);
            assert!(ambient >= 0.11 - 1e-6);
            assert!(ambient <= 0.44 + 1e-6);
            for channel in tint {
                assert!(channel > 0.0 && channel < 2.0);
            }
        }
    }

    #[test]
    fn test_midday_is_brighter_than_midnight() {
        // Phase 0.5 is full daylight, phase 0.0 is night
        let (noon_ambient, noon_tint) = day_night(36.0, 72.0);
        let (night_ambient, night_tint) = day_night(0.0, 72.0);
        assert!(noon_ambient > night_ambient);
        // Daylight is neutral, night is graded cool
        assert!((noon_tint[0] - 1.0).abs() < 0.01);
        assert!(night_tint[2] > night_tint[0]);
    }
}
