//! Memory-mapped I/O port bridge.
//!
//! Routes the IN/OUT opcodes to the board's port latches and implements the
//! 16-bit shift-register peripheral on ports 2/3/4. The bridge only latches
//! values; deciding when a sound triggers is the audio collaborator's job,
//! which is why the previous-value shadows are maintained here.

use crate::state::State8080;

/// Handle an `IN port` and return the byte for the accumulator.
pub fn handle_input(state: &mut State8080, port: u8) -> u8 {
    match port {
        // Player input and DIP switches, kept current externally.
        1 => state.port1,
        2 => state.port2,
        // An 8-bit window into the shift register, selected by the offset.
        3 => {
            let v = (u16::from(state.shift1) << 8) | u16::from(state.shift0);
            (v >> (8 - state.shift_offset)) as u8
        }
        _ => 0,
    }
}

/// Handle an `OUT port` with the accumulator value.
pub fn handle_output(state: &mut State8080, port: u8, value: u8) {
    match port {
        2 => {
            state.shift_offset = value & 0x7;
        }
        3 => {
            state.out_port3_prev = state.out_port3;
            state.out_port3 = value;
        }
        // Shift a new byte in; the oldest byte falls off.
        4 => {
            state.shift0 = state.shift1;
            state.shift1 = value;
        }
        5 => {
            state.out_port5_prev = state.out_port5;
            state.out_port5 = value;
        }
        // Port 6 is the watchdog; writes are ignored.
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::{handle_input, handle_output};
    use crate::state::State8080;

    #[test]
    fn input_ports_1_and_2_pass_latches_through() {
        let mut state = State8080::new();
        state.port1 = 0x09;
        state.port2 = 0x83;
        assert_eq!(handle_input(&mut state, 1), 0x09);
        assert_eq!(handle_input(&mut state, 2), 0x83);
        // The bridge never mutates the input latches.
        assert_eq!((state.port1, state.port2), (0x09, 0x83));
    }

    #[test]
    fn shift_register_window_selects_by_offset() {
        let mut state = State8080::new();
        handle_output(&mut state, 4, 0xab);
        handle_output(&mut state, 4, 0xcd);
        assert_eq!((state.shift0, state.shift1), (0xab, 0xcd));

        // Offset 0: only the newest byte is visible.
        handle_output(&mut state, 2, 0);
        assert_eq!(handle_input(&mut state, 3), 0xcd);

        // Offset 4: the middle byte of 0xcdab.
        handle_output(&mut state, 2, 4);
        assert_eq!(handle_input(&mut state, 3), 0xda);
    }

    #[test]
    fn shift_offset_is_masked_to_three_bits() {
        let mut state = State8080::new();
        handle_output(&mut state, 2, 0xff);
        assert_eq!(state.shift_offset, 7);
    }

    #[test]
    fn sound_latches_keep_a_previous_value_shadow() {
        let mut state = State8080::new();
        handle_output(&mut state, 3, 0x01);
        assert_eq!((state.out_port3, state.out_port3_prev), (0x01, 0x00));
        handle_output(&mut state, 3, 0x03);
        assert_eq!((state.out_port3, state.out_port3_prev), (0x03, 0x01));

        handle_output(&mut state, 5, 0x10);
        assert_eq!((state.out_port5, state.out_port5_prev), (0x10, 0x00));
    }

    #[test]
    fn unmapped_ports_read_zero_and_ignore_writes() {
        let mut state = State8080::new();
        handle_output(&mut state, 6, 0xff);
        assert_eq!(handle_input(&mut state, 0), 0);
        assert_eq!(handle_input(&mut state, 7), 0);
    }
}
