//! SDL2 frontend: window, frame pacing and keyboard mapping for anything
//! implementing the shared `App` trait.

use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use typed_builder::TypedBuilder;

use invaders_common::app::App;
use invaders_common::key::Key;

pub use sdl2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    RGB24,
}

#[derive(TypedBuilder)]
pub struct SdlInitInfo {
    pub width: u32,
    pub height: u32,
    pub scale: u32,
    pub title: String,
    #[builder(default = PixelFormat::RGB24)]
    pub pixel_format: PixelFormat,
}

/// Bring up SDL2 and drive the app at 60 frames per second until it asks
/// to exit or the window closes.
pub fn run(init: SdlInitInfo, mut app: impl App) -> Result<()> {
    let SdlInitInfo {
        width,
        height,
        scale,
        title,
        pixel_format,
    } = init;

    let sdl_context = sdl2::init().map_err(|e| anyhow!(e))?;
    let video_subsystem = sdl_context.video().map_err(|e| anyhow!(e))?;
    let window = video_subsystem
        .window(&title, width * scale, height * scale)
        .position_centered()
        .build()?;
    let mut canvas = window.into_canvas().present_vsync().build()?;
    canvas
        .set_scale(scale as f32, scale as f32)
        .map_err(|e| anyhow!(e))?;
    let creator = canvas.texture_creator();
    let mut texture = creator.create_texture_target(
        map_pixel_format(pixel_format),
        width,
        height,
    )?;

    let mut event_pump = sdl_context.event_pump().map_err(|e| anyhow!(e))?;
    let color_size = map_pixel_format_size(pixel_format);
    let frame_budget = Duration::from_micros(1_000_000 / 60);
    let mut screen_state = vec![0u8; (width * height * color_size) as usize];

    app.init();
    loop {
        let frame_start = Instant::now();

        if app.should_exit() {
            app.exit();
            break;
        }

        while let Some(event) = event_pump.poll_event() {
            match event {
                Event::Quit { .. } => {
                    app.exit();
                    return Ok(());
                }
                Event::KeyDown {
                    keycode: Some(keycode),
                    ..
                } => app.handle_key_event(map_keycode(keycode), true),
                Event::KeyUp {
                    keycode: Some(keycode),
                    ..
                } => app.handle_key_event(map_keycode(keycode), false),
                _ => {}
            }
        }

        app.update(&mut screen_state);

        texture
            .update(None, &screen_state, (width * color_size) as usize)?;
        canvas
            .copy(&texture, None, None)
            .map_err(|e| anyhow!(e))?;
        canvas.present();

        // Vsync usually paces us; the sleep covers drivers without it.
        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            std::thread::sleep(frame_budget - elapsed);
        }
    }

    Ok(())
}

fn map_pixel_format(pixel_format: PixelFormat) -> PixelFormatEnum {
    match pixel_format {
        PixelFormat::RGB24 => PixelFormatEnum::RGB24,
    }
}

fn map_pixel_format_size(pixel_format: PixelFormat) -> u32 {
    match pixel_format {
        PixelFormat::RGB24 => 3,
    }
}

fn map_keycode(keycode: Keycode) -> Key {
    match keycode {
        Keycode::Num1 => Key::Num1,
        Keycode::Num2 => Key::Num2,
        Keycode::A => Key::A,
        Keycode::C => Key::C,
        Keycode::D => Key::D,
        Keycode::J => Key::J,
        Keycode::K => Key::K,
        Keycode::L => Key::L,
        Keycode::P => Key::P,
        Keycode::S => Key::S,
        Keycode::T => Key::T,
        Keycode::Left => Key::Left,
        Keycode::Right => Key::Right,
        Keycode::Space => Key::Space,
        _ => Key::None,
    }
}
