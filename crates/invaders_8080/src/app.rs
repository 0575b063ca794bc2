use crate::machine::Machine;
use crate::sound::SoundManager;
use crate::{SCREEN_HEIGHT, SCREEN_SCALE, SCREEN_WIDTH};
use invaders_common::app::App;
use invaders_common::color::Color;
use invaders_common::key::Key;

/// Frontend-facing wrapper around the machine.
///
/// Implements the shared `App` trait so the SDL2 frontend can drive the
/// emulator: one `update` call per frame steps the machine, forwards the
/// sound latches, and renders video RAM into the RGB frame buffer.
#[derive(Default)]
pub struct InvadersApp {
    should_exit: bool,
    paused: bool,
    pub machine: Machine,
    sound: Option<SoundManager>,
}

impl InvadersApp {
    pub fn new(machine: Machine) -> Self {
        Self {
            machine,
            ..Self::default()
        }
    }
}

impl App for InvadersApp {
    fn init(&mut self) {
        log::info!("space invaders init");
        // Without audio the game still runs, just silently.
        if self.sound.is_none() {
            self.sound = SoundManager::new();
        }
    }

    fn update(&mut self, screen_state: &mut [u8]) {
        if !self.paused {
            if let Err(e) = self.machine.step_frame() {
                // An execution error means the machine state can no longer
                // be trusted; stop rather than run corrupted.
                log::error!("emulation halted: {e:#}");
                self.should_exit = true;
                return;
            }

            if let Some(sound) = &mut self.sound {
                let (out3, out5) = self.machine.outputs();
                sound.update(out3, out5);
            }
        }

        render_video(self.machine.video_ram(), screen_state);

        if self.paused {
            overlay_pause_banner(screen_state);
        }
    }

    fn handle_key_event(&mut self, key: Key, is_pressed: bool) {
        if is_pressed {
            match key {
                Key::P => {
                    self.paused = !self.paused;
                    return;
                }
                // Any other key unpauses.
                _ if self.paused => {
                    self.paused = false;
                }
                _ => {}
            }
        }

        self.machine.handle_key(key, is_pressed);
    }

    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn exit(&mut self) {
        log::info!("space invaders exit");
    }

    fn width(&self) -> u32 {
        SCREEN_WIDTH as u32
    }

    fn height(&self) -> u32 {
        SCREEN_HEIGHT as u32
    }

    fn scale(&self) -> u32 {
        SCREEN_SCALE
    }

    fn title(&self) -> String {
        "Space Invaders".to_string()
    }
}

/// Rasterize video RAM into the RGB frame buffer.
///
/// The 0x1c00 bytes encode a 256x224 image rotated 90 degrees: each byte
/// holds 8 vertical pixels, 32 bytes per column, 224 columns. Color bands
/// approximate the cellophane overlays of the original cabinet.
fn render_video(vram: &[u8], screen_state: &mut [u8]) {
    let width = SCREEN_WIDTH;
    let height = SCREEN_HEIGHT;

    debug_assert_eq!(vram.len(), 0x1c00);
    debug_assert_eq!(screen_state.len(), width * height * 3);

    let mut i = 0usize;
    for x in 0..width {
        for iy in (0..height).step_by(8) {
            let mut byte = vram[i];
            i += 1;
            for b in 0..8 {
                let pixel_on = (byte & 1) != 0;
                byte >>= 1;

                let screen_y = height - (iy + b) - 1;
                let idx = (screen_y * width + x) * 3;
                let color = if !pixel_on {
                    Color::BLACK
                } else if iy > 200 && iy < 220 {
                    Color::RED
                } else if iy < 80 {
                    Color::GREEN
                } else {
                    Color::WHITE
                };

                screen_state[idx] = color.r;
                screen_state[idx + 1] = color.g;
                screen_state[idx + 2] = color.b;
            }
        }
    }
}

/// Striped band at the top of the screen so a paused emulator is visually
/// obvious.
fn overlay_pause_banner(screen_state: &mut [u8]) {
    let width = SCREEN_WIDTH;
    let height = SCREEN_HEIGHT;
    debug_assert_eq!(screen_state.len(), width * height * 3);

    let banner_height = 12usize.min(height);
    for y in 0..banner_height {
        for x in 0..width {
            let idx = (y * width + x) * 3;
            let color = if y % 2 == 0 { Color::WHITE } else { Color::BLACK };
            screen_state[idx] = color.r;
            screen_state[idx + 1] = color.g;
            screen_state[idx + 2] = color.b;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::render_video;
    use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

    #[test]
    fn render_rotates_the_column_major_vram() {
        let mut vram = [0u8; 0x1c00];
        // Bit 0 of the first byte is the first pixel of column 0, which
        // lands at the bottom-left of the rotated screen.
        vram[0] = 0x01;
        let mut screen = vec![0u8; SCREEN_WIDTH * SCREEN_HEIGHT * 3];
        render_video(&vram, &mut screen);

        let idx = ((SCREEN_HEIGHT - 1) * SCREEN_WIDTH) * 3;
        assert_ne!(screen[idx..idx + 3], [0, 0, 0]);
        // The top-left stays dark.
        assert_eq!(&screen[..3], &[0, 0, 0]);
    }
}
