//! Space Invaders arcade emulator: an Intel 8080 core precise enough to
//! run the original ROM, plus the board's shift register, raster
//! interrupts, input ports and discrete sound latches.
//!
//! The CPU core is a plain state container (`State8080`) mutated by free
//! functions: `cpu::step` executes one instruction,
//! `interrupt::service_interrupt` delivers a raster interrupt, and the
//! `io` module bridges the IN/OUT opcodes to the port latches. `Machine`
//! wraps all of that into frame-sized steps for the frontend.

pub mod app;
pub mod cpu;
pub mod disasm;
pub mod flags;
pub mod interrupt;
pub mod io;
pub mod machine;
pub mod sound;
pub mod state;

/// Rotated screen dimensions: the monitor is mounted sideways, so the
/// 256x224 frame buffer displays as 224 wide by 256 tall.
pub const SCREEN_WIDTH: usize = 224;
pub const SCREEN_HEIGHT: usize = 256;
pub const SCREEN_SCALE: u32 = 3;

pub use app::InvadersApp;
pub use machine::{DipConfig, Machine};
pub use state::State8080;
