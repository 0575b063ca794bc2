//! Single-level interrupt controller.
//!
//! The board raises two raster interrupts per frame (RST 1 mid-frame,
//! RST 2 at vblank). The controller holds no timing of its own; the driving
//! loop calls `service_interrupt` at the cadence it wants.

use crate::state::State8080;

/// Service one externally-raised interrupt.
///
/// No-op while interrupts are disabled. Otherwise this wakes a halted CPU,
/// pushes `pc - 1` as the return address (the dispatcher's trailing
/// increment restores the interrupted instruction on RET), vectors to
/// `8 * interrupt_number`, and toggles the vector for the next call.
pub fn service_interrupt(state: &mut State8080) {
    if !state.int_enable {
        return;
    }
    state.halted = false;

    let ret = state.pc.wrapping_sub(1);
    state.mem[state.sp.wrapping_sub(1) as usize] = (ret >> 8) as u8;
    state.mem[state.sp.wrapping_sub(2) as usize] = ret as u8;
    state.sp = state.sp.wrapping_sub(2);

    state.pc = 8 * u16::from(state.interrupt_number);
    state.interrupt_number = if state.interrupt_number == 1 { 2 } else { 1 };
    state.int_enable = false;
}

#[cfg(test)]
mod tests {
    use super::service_interrupt;
    use crate::cpu::step;
    use crate::state::State8080;

    #[test]
    fn consecutive_interrupts_alternate_between_the_two_vectors() {
        let mut state = State8080::new();
        state.sp = 0x2400;
        state.int_enable = true;
        service_interrupt(&mut state);
        assert_eq!(state.pc, 8);
        assert!(!state.int_enable);

        state.int_enable = true;
        service_interrupt(&mut state);
        assert_eq!(state.pc, 16);

        state.int_enable = true;
        service_interrupt(&mut state);
        assert_eq!(state.pc, 8);
    }

    #[test]
    fn disabled_interrupts_are_ignored() {
        let mut state = State8080::new();
        state.pc = 0x1234;
        state.sp = 0x2400;
        service_interrupt(&mut state);
        assert_eq!(state.pc, 0x1234);
        assert_eq!(state.sp, 0x2400);
        assert_eq!(state.interrupt_number, 1);
    }

    #[test]
    fn service_wakes_a_halted_cpu() {
        let mut state = State8080::new();
        state.halted = true;
        state.int_enable = true;
        state.sp = 0x2400;
        service_interrupt(&mut state);
        assert!(!state.halted);
        assert_eq!(state.pc, 8);
    }

    #[test]
    fn ret_after_service_resumes_the_interrupted_instruction() {
        let mut state = State8080::new();
        state.sp = 0x2400;
        state.int_enable = true;
        state.pc = 0x0150;
        // Vector 1 holds a single RET.
        state.mem[0x0008] = 0xc9;

        service_interrupt(&mut state);
        assert_eq!(state.pc, 0x0008);
        // pc - 1 went on the stack, low byte at the lower address.
        assert_eq!(state.mem[0x23fe], 0x4f);
        assert_eq!(state.mem[0x23ff], 0x01);

        step(&mut state).unwrap();
        assert_eq!(state.pc, 0x0150);
        assert_eq!(state.sp, 0x2400);
    }
}
