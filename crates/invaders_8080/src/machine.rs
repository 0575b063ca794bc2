use anyhow::Result;

use crate::cpu;
use crate::interrupt::service_interrupt;
use crate::state::{State8080, MEMORY_SIZE};
use invaders_common::key::Key;

/// Start of video RAM. The hardware maps the frame buffer at 0x2400-0x3fff.
const VRAM_START: usize = 0x2400;
/// Size of video RAM in bytes (0x1c00 = 7168 bytes = 224x256 bits).
const VRAM_SIZE: usize = 0x1c00;

/// 8080 clock and frame timing for Space Invaders.
pub const CPU_CLOCK_HZ: u32 = 2_000_000;
pub const FRAME_RATE_HZ: u32 = 60;

/// The core does not count cycles, so frame pacing uses an instruction
/// budget derived from the clock and an average instruction cost. The
/// figure only needs to be close enough that the game logic keeps up with
/// the two raster interrupts per frame.
const AVG_CYCLES_PER_INSTRUCTION: u32 = 8;
const INSTRUCTIONS_PER_FRAME: u32 =
    CPU_CLOCK_HZ / FRAME_RATE_HZ / AVG_CYCLES_PER_INSTRUCTION;

/// Bit positions for input port 1 (IN 1).
///
/// These constants follow the commonly documented Space Invaders layout.
const IN1_BIT_COIN: u8 = 0;
const IN1_BIT_P2_START: u8 = 1;
const IN1_BIT_P1_START: u8 = 2;
const IN1_BIT_ALWAYS_ONE: u8 = 3;
const IN1_BIT_P1_SHOOT: u8 = 4;
const IN1_BIT_P1_LEFT: u8 = 5;
const IN1_BIT_P1_RIGHT: u8 = 6;

/// Bit positions for input port 2 (IN 2).
///
/// Port 2 carries player 2 controls, tilt, and DIP switch inputs:
///
/// - bits 0-1: number of ships per credit (DIP)
/// - bit 2:    tilt input
/// - bits 4-6: player 2 controls
/// - bit 7:    "display coin info" DIP (0 = show, 1 = hide)
const IN2_BIT_TILT: u8 = 2;
const IN2_BIT_P2_SHOOT: u8 = 4;
const IN2_BIT_P2_LEFT: u8 = 5;
const IN2_BIT_P2_RIGHT: u8 = 6;
const IN2_BIT_COIN_INFO: u8 = 7;

const IN2_MASK_SHIPS_PER_CREDIT: u8 = 0x03;

/// Configuration for the modeled subset of the DIP switches.
///
/// - `ships_per_credit`: number of ships per game (3-6), encoded in
///   bits 0-1 of port 2 as `value - 3`.
/// - `show_coin_info`: whether the attract mode shows the coin/credit info
///   line. The ROM treats bit 7 = 1 as "hide coin info".
#[derive(Clone, Copy, Debug)]
pub struct DipConfig {
    pub ships_per_credit: u8,
    pub show_coin_info: bool,
}

impl Default for DipConfig {
    fn default() -> Self {
        Self {
            ships_per_credit: 3,
            show_coin_info: true,
        }
    }
}

impl DipConfig {
    fn apply_to_port2(&self, port2: &mut u8) {
        *port2 &= !IN2_MASK_SHIPS_PER_CREDIT;
        *port2 &= !(1 << IN2_BIT_COIN_INFO);

        let ships = self.ships_per_credit.clamp(3, 6);
        *port2 |= (ships - 3) & IN2_MASK_SHIPS_PER_CREDIT;

        if !self.show_coin_info {
            *port2 |= 1 << IN2_BIT_COIN_INFO;
        }
    }
}

/// The Space Invaders machine: the 8080 state plus the DIP configuration.
///
/// The state container already carries the board's memory, port latches and
/// shift register; this layer adds ROM loading, frame stepping with the two
/// raster interrupts, and the key-to-port-bit mapping.
pub struct Machine {
    pub state: State8080,
    dip_config: DipConfig,
}

impl Machine {
    /// Construct a machine in a powered-up but reset state.
    pub fn new() -> Self {
        Self::with_dip_config(DipConfig::default())
    }

    /// Construct a machine with an explicit DIP switch configuration.
    pub fn with_dip_config(dip_config: DipConfig) -> Self {
        let mut machine = Self {
            state: State8080::new(),
            dip_config,
        };
        machine.init_ports();
        machine
    }

    fn init_ports(&mut self) {
        // Bit 3 of port 1 reads as 1 on the real board.
        self.state.port1 = 1 << IN1_BIT_ALWAYS_ONE;
        self.dip_config.apply_to_port2(&mut self.state.port2);
    }

    /// Reset to the initial state, preserving ROM and RAM contents.
    pub fn reset(&mut self) {
        let mem = self.state.mem;
        self.state = State8080::new();
        self.state.mem = mem;
        self.init_ports();
    }

    /// Load a combined ROM image starting at 0x0000, where execution also
    /// begins. Oversized images are truncated to the address space.
    pub fn load_rom(&mut self, rom: &[u8]) {
        let len = rom.len().min(MEMORY_SIZE);
        self.state.mem[..len].copy_from_slice(&rom[..len]);
        self.state.pc = 0x0000;
        log::info!("loaded {len} byte ROM image");
    }

    /// Step the machine for one video frame worth of time.
    ///
    /// The arcade raises two raster interrupts per frame at half-frame
    /// intervals, RST 1 mid-screen and RST 2 at vblank; the controller
    /// alternates the vector itself.
    pub fn step_frame(&mut self) -> Result<()> {
        let half_frame = INSTRUCTIONS_PER_FRAME / 2;

        for _ in 0..half_frame {
            cpu::step(&mut self.state)?;
        }
        service_interrupt(&mut self.state);

        for _ in 0..half_frame {
            cpu::step(&mut self.state)?;
        }
        service_interrupt(&mut self.state);

        Ok(())
    }

    /// Handle a logical key event mapped from the frontend.
    ///
    /// - `C`      → insert coin (port 1, bit 0)
    /// - `Num1`   → start 1 player (port 1, bit 2)
    /// - `Num2`   → start 2 players (port 1, bit 1)
    /// - `A`/`Left`  → player 1 moves left (port 1, bit 5)
    /// - `D`/`Right` → player 1 moves right (port 1, bit 6)
    /// - `S`/`Space` → player 1 shoots (port 1, bit 4)
    /// - `T`      → tilt (port 2, bit 2, latched on press)
    ///
    /// Player 2 controls surface on port 2 and only matter when player 2
    /// is active:
    ///
    /// - `J` → left (bit 5), `L` → right (bit 6), `K` → shoot (bit 4)
    pub fn handle_key(&mut self, key: Key, pressed: bool) {
        match key {
            Key::C => set_input_bit(&mut self.state.port1, IN1_BIT_COIN, pressed),
            Key::Num1 => {
                set_input_bit(&mut self.state.port1, IN1_BIT_P1_START, pressed);
            }
            Key::Num2 => {
                set_input_bit(&mut self.state.port1, IN1_BIT_P2_START, pressed);
            }
            Key::A | Key::Left => {
                set_input_bit(&mut self.state.port1, IN1_BIT_P1_LEFT, pressed);
            }
            Key::D | Key::Right => {
                set_input_bit(&mut self.state.port1, IN1_BIT_P1_RIGHT, pressed);
            }
            Key::S | Key::Space => {
                set_input_bit(&mut self.state.port1, IN1_BIT_P1_SHOOT, pressed);
            }
            Key::J => set_input_bit(&mut self.state.port2, IN2_BIT_P2_LEFT, pressed),
            Key::L => {
                set_input_bit(&mut self.state.port2, IN2_BIT_P2_RIGHT, pressed);
            }
            Key::K => {
                set_input_bit(&mut self.state.port2, IN2_BIT_P2_SHOOT, pressed);
            }
            // Tilt latches on press and stays set until reset by the game.
            Key::T if pressed => {
                set_input_bit(&mut self.state.port2, IN2_BIT_TILT, true);
            }
            _ => {}
        }
    }

    /// The raw video RAM window used by the renderer: 0x1c00 bytes starting
    /// at 0x2400.
    pub fn video_ram(&self) -> &[u8] {
        &self.state.mem[VRAM_START..VRAM_START + VRAM_SIZE]
    }

    /// Current values of the sound output latches (OUT 3 and OUT 5), for
    /// the audio layer to edge-detect against.
    pub fn outputs(&self) -> (u8, u8) {
        (self.state.out_port3, self.state.out_port5)
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

fn set_input_bit(port: &mut u8, bit: u8, pressed: bool) {
    let mask = 1 << bit;
    if pressed {
        *port |= mask;
    } else {
        *port &= !mask;
    }
}

#[cfg(test)]
mod tests {
    use super::{DipConfig, Machine};
    use invaders_common::key::Key;

    #[test]
    fn load_rom_copies_the_image_and_starts_at_zero() {
        let mut machine = Machine::new();
        machine.state.pc = 0x1234;
        machine.load_rom(&[0xc3, 0x00, 0x00, 0x42]);
        assert_eq!(machine.state.pc, 0);
        assert_eq!(&machine.state.mem[..4], &[0xc3, 0x00, 0x00, 0x42]);
    }

    #[test]
    fn dip_switches_encode_onto_port_2() {
        let machine = Machine::with_dip_config(DipConfig {
            ships_per_credit: 5,
            show_coin_info: true,
        });
        assert_eq!(machine.state.port2 & 0x03, 2);
        assert_eq!(machine.state.port2 & 0x80, 0);

        let machine = Machine::with_dip_config(DipConfig {
            ships_per_credit: 9, // clamps to 6
            show_coin_info: false,
        });
        assert_eq!(machine.state.port2 & 0x03, 3);
        assert_eq!(machine.state.port2 & 0x80, 0x80);
    }

    #[test]
    fn port_1_bit_3_reads_as_one() {
        let machine = Machine::new();
        assert_eq!(machine.state.port1 & 0x08, 0x08);
    }

    #[test]
    fn key_events_set_and_clear_input_bits() {
        let mut machine = Machine::new();
        machine.handle_key(Key::C, true);
        assert_eq!(machine.state.port1 & 0x01, 0x01);
        machine.handle_key(Key::C, false);
        assert_eq!(machine.state.port1 & 0x01, 0);
        // The fixed bit survives key handling.
        assert_eq!(machine.state.port1 & 0x08, 0x08);

        machine.handle_key(Key::Left, true);
        assert_eq!(machine.state.port1 & 0x20, 0x20);
        machine.handle_key(Key::K, true);
        assert_eq!(machine.state.port2 & 0x10, 0x10);
    }

    #[test]
    fn tilt_latches_on_press_only() {
        let mut machine = Machine::new();
        machine.handle_key(Key::T, true);
        assert_eq!(machine.state.port2 & 0x04, 0x04);
        // Release does not clear the latch.
        machine.handle_key(Key::T, false);
        assert_eq!(machine.state.port2 & 0x04, 0x04);
    }

    #[test]
    fn step_frame_delivers_both_raster_interrupts() {
        let mut machine = Machine::new();
        // LXI SP,0x2400; EI; self: JMP self. Both vectors re-enable
        // interrupts and return.
        machine.load_rom(&[0x31, 0x00, 0x24, 0xfb, 0xc3, 0x04, 0x00]);
        machine.state.mem[0x08] = 0xfb; // EI
        machine.state.mem[0x09] = 0xc9; // RET
        machine.state.mem[0x10] = 0xfb;
        machine.state.mem[0x11] = 0xc9;

        machine.step_frame().unwrap();
        // Both interrupts were taken: the vector toggled twice and the
        // frame ends with control just handed to the second vector.
        assert_eq!(machine.state.interrupt_number, 1);
        assert_eq!(machine.state.pc, 0x10);
        assert_eq!(machine.state.sp, 0x23fe);
    }

    #[test]
    fn video_ram_window_has_the_hardware_size() {
        let mut machine = Machine::new();
        machine.state.mem[0x2400] = 0xff;
        let vram = machine.video_ram();
        assert_eq!(vram.len(), 0x1c00);
        assert_eq!(vram[0], 0xff);
    }
}
