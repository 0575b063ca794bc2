//! Opcode dispatcher: the fetch-decode-execute step over all 256 byte
//! values.
//!
//! Program-counter bookkeeping follows one fixed convention: `pc` points at
//! the opcode for the whole of its execution, opcodes that consume operand
//! bytes advance `pc` by the operand width themselves, and every step ends
//! with one unconditional `pc += 1`. Control transfers therefore load their
//! target minus one so the trailing increment lands exactly on it, and CALL
//! pushes the address of its own last byte (RET's trailing increment
//! resumes after the CALL). Breaking either half of this pairing puts every
//! jump target off by one.
//!
//! Flag behavior is reproduced per opcode family, including the documented
//! approximations (aux carry pinned or derived per family, the DAA sign
//! quirk, DAD SP never carrying). See the family helpers below.

use anyhow::{bail, Result};

use crate::disasm;
use crate::flags::{from_result, parity, set_szp};
use crate::io;
use crate::state::{Flags, State8080};

/// Execute one instruction.
///
/// A halted CPU performs no effect at all until an interrupt clears the
/// halt. The error path exists purely as a defect guard: every byte value
/// decodes in a complete table, so an error here means the emulator itself
/// is wrong, with `pc` left pointing at the offending byte.
pub fn step(state: &mut State8080) -> Result<()> {
    if state.halted {
        return Ok(());
    }

    if log::log_enabled!(log::Level::Trace) {
        log::trace!(
            "{:04x}  {}",
            state.pc,
            disasm::disassemble(&state.mem, state.pc)
        );
    }

    let raw = state.mem[state.pc as usize];
    // A handful of byte values alias onto core opcodes in the decode table.
    let opcode = match raw {
        0x08 | 0x10 | 0x18 | 0x20 | 0x28 | 0x30 | 0x38 | 0xfd => 0x00, // NOP
        0xcb => 0xc3,        // JMP
        0xd9 => 0xc9,        // RET
        0xdd | 0xed => 0xcd, // CALL
        _ => raw,
    };

    match opcode {
        0x00 => {} // NOP

        // LXI rp,d16
        0x01 => {
            let v = word_arg(state);
            state.set_bc(v);
            state.pc = state.pc.wrapping_add(2);
        }
        0x11 => {
            let v = word_arg(state);
            state.set_de(v);
            state.pc = state.pc.wrapping_add(2);
        }
        0x21 => {
            let v = word_arg(state);
            state.set_hl(v);
            state.pc = state.pc.wrapping_add(2);
        }
        0x31 => {
            state.sp = word_arg(state);
            state.pc = state.pc.wrapping_add(2);
        }

        // STAX / LDAX
        0x02 => {
            let addr = state.bc();
            state.mem[addr as usize] = state.a;
        }
        0x12 => {
            let addr = state.de();
            state.mem[addr as usize] = state.a;
        }
        0x0a => {
            state.a = state.mem[state.bc() as usize];
        }
        0x1a => {
            state.a = state.mem[state.de() as usize];
        }

        // INX / DCX rp (no flags)
        0x03 => {
            let v = state.bc().wrapping_add(1);
            state.set_bc(v);
        }
        0x13 => {
            let v = state.de().wrapping_add(1);
            state.set_de(v);
        }
        0x23 => {
            let v = state.hl().wrapping_add(1);
            state.set_hl(v);
        }
        0x33 => {
            state.sp = state.sp.wrapping_add(1);
        }
        0x0b => {
            let v = state.bc().wrapping_sub(1);
            state.set_bc(v);
        }
        0x1b => {
            let v = state.de().wrapping_sub(1);
            state.set_de(v);
        }
        0x2b => {
            let v = state.hl().wrapping_sub(1);
            state.set_hl(v);
        }
        0x3b => {
            state.sp = state.sp.wrapping_sub(1);
        }

        // INR / DCR. The flag treatment differs per register and is kept
        // exactly as each form defines it: B and A refresh the whole flag
        // set (clearing carry), C and L pin aux carry, D/E/H derive aux
        // carry from the low nibble, and the memory form leaves sign clear.
        0x04 => {
            state.b = state.b.wrapping_add(1);
            state.flags = from_result(u16::from(state.b));
        }
        0x05 => {
            state.b = state.b.wrapping_sub(1);
            state.flags = from_result(u16::from(state.b));
        }
        0x3c => {
            state.a = state.a.wrapping_add(1);
            state.flags = from_result(u16::from(state.a));
        }
        0x3d => {
            state.a = state.a.wrapping_sub(1);
            state.flags = from_result(u16::from(state.a));
        }
        0x0c => {
            state.c = state.c.wrapping_add(1);
            set_szp(&mut state.flags, state.c);
            state.flags.ac = true;
        }
        0x0d => {
            state.c = state.c.wrapping_sub(1);
            set_szp(&mut state.flags, state.c);
            state.flags.ac = true;
        }
        0x2c => {
            state.l = state.l.wrapping_add(1);
            set_szp(&mut state.flags, state.l);
            state.flags.ac = true;
        }
        0x2d => {
            state.l = state.l.wrapping_sub(1);
            set_szp(&mut state.flags, state.l);
            state.flags.ac = true;
        }
        0x14 => {
            state.d = state.d.wrapping_add(1);
            set_szp(&mut state.flags, state.d);
            state.flags.ac = (state.d & 0x0f) == 0x00;
        }
        0x15 => {
            state.d = state.d.wrapping_sub(1);
            set_szp(&mut state.flags, state.d);
            state.flags.ac = (state.d & 0x0f) == 0x0f;
        }
        0x1c => {
            state.e = state.e.wrapping_add(1);
            set_szp(&mut state.flags, state.e);
            state.flags.ac = (state.e & 0x0f) == 0x00;
        }
        0x1d => {
            state.e = state.e.wrapping_sub(1);
            set_szp(&mut state.flags, state.e);
            state.flags.ac = (state.e & 0x0f) == 0x0f;
        }
        0x24 => {
            state.h = state.h.wrapping_add(1);
            set_szp(&mut state.flags, state.h);
            state.flags.ac = (state.h & 0x0f) == 0x00;
        }
        0x25 => {
            state.h = state.h.wrapping_sub(1);
            set_szp(&mut state.flags, state.h);
            state.flags.ac = (state.h & 0x0f) == 0x0f;
        }
        0x34 => {
            let addr = state.hl() as usize;
            state.mem[addr] = state.mem[addr].wrapping_add(1);
            let r = state.mem[addr];
            state.flags.p = parity(u16::from(r));
            state.flags.z = r == 0;
            // The sign test on the memory form looks above bit 7 of a byte
            // and therefore always clears.
            state.flags.s = false;
            state.flags.ac = true;
        }
        0x35 => {
            let addr = state.hl() as usize;
            state.mem[addr] = state.mem[addr].wrapping_sub(1);
            let r = state.mem[addr];
            state.flags.p = parity(u16::from(r));
            state.flags.z = r == 0;
            state.flags.s = false;
            state.flags.ac = true;
        }

        // MVI r,d8 / MVI M,d8
        0x06 => {
            state.b = byte_arg(state);
            state.pc = state.pc.wrapping_add(1);
        }
        0x0e => {
            state.c = byte_arg(state);
            state.pc = state.pc.wrapping_add(1);
        }
        0x16 => {
            state.d = byte_arg(state);
            state.pc = state.pc.wrapping_add(1);
        }
        0x1e => {
            state.e = byte_arg(state);
            state.pc = state.pc.wrapping_add(1);
        }
        0x26 => {
            state.h = byte_arg(state);
            state.pc = state.pc.wrapping_add(1);
        }
        0x2e => {
            state.l = byte_arg(state);
            state.pc = state.pc.wrapping_add(1);
        }
        0x36 => {
            let v = byte_arg(state);
            state.mem[state.hl() as usize] = v;
            state.pc = state.pc.wrapping_add(1);
        }
        0x3e => {
            state.a = byte_arg(state);
            state.pc = state.pc.wrapping_add(1);
        }

        // Rotates touch carry only.
        0x07 => {
            // RLC
            let bit7 = (state.a & 0x80) != 0;
            state.a <<= 1;
            if bit7 {
                state.a |= 1;
            }
            state.flags.cy = bit7;
        }
        0x0f => {
            // RRC
            let bit0 = (state.a & 0x01) != 0;
            state.a >>= 1;
            if bit0 {
                state.a |= 0x80;
            }
            state.flags.cy = bit0;
        }
        0x17 => {
            // RAL
            let bit7 = (state.a & 0x80) != 0;
            let carry = state.flags.cy;
            state.a <<= 1;
            if carry {
                state.a |= 1;
            }
            state.flags.cy = bit7;
        }
        0x1f => {
            // RAR
            let bit0 = (state.a & 0x01) != 0;
            let carry = state.flags.cy;
            state.a >>= 1;
            if carry {
                state.a |= 0x80;
            }
            state.flags.cy = bit0;
        }

        // DAD rp: 16-bit add into HL, carry from the 17th bit.
        0x09 => {
            let v = state.bc();
            dad(state, v);
        }
        0x19 => {
            let v = state.de();
            dad(state, v);
        }
        0x29 => {
            let v = state.hl();
            dad(state, v);
        }
        0x39 => {
            let result = u32::from(state.hl()) + u32::from(state.sp);
            state.set_hl(result as u16);
            // The SP variant leaves carry cleared.
            state.flags.cy = false;
        }

        // SHLD / LHLD / STA / LDA
        0x22 => {
            let addr = word_arg(state);
            state.mem[addr as usize] = state.l;
            state.mem[addr.wrapping_add(1) as usize] = state.h;
            state.pc = state.pc.wrapping_add(2);
        }
        0x2a => {
            let addr = word_arg(state);
            state.l = state.mem[addr as usize];
            state.h = state.mem[addr.wrapping_add(1) as usize];
            state.pc = state.pc.wrapping_add(2);
        }
        0x32 => {
            let addr = word_arg(state);
            state.mem[addr as usize] = state.a;
            state.pc = state.pc.wrapping_add(2);
        }
        0x3a => {
            let addr = word_arg(state);
            state.a = state.mem[addr as usize];
            state.pc = state.pc.wrapping_add(2);
        }

        0x27 => {
            // DAA: two-stage BCD adjust, low nibble then high nibble.
            let low = state.a & 0x0f;
            if low > 9 || state.flags.ac {
                state.a = state.a.wrapping_add(6);
                state.flags.ac = low > 15;
            }
            let mut high = state.a >> 4;
            let low = state.a & 0x0f;
            if high > 9 || state.flags.cy {
                high = high.wrapping_add(6);
                state.flags.cy = high > 15;
            }
            state.a = (high << 4) | low;
            state.flags.p = parity(u16::from(state.a));
            state.flags.z = state.a == 0;
            // Sign tracks the H register after the adjust.
            state.flags.s = 0x80 == (state.h & 0x80);
        }

        0x2f => {
            // CMA: complement through a 16-bit mask; only the low byte
            // survives the store.
            state.a = (u16::from(state.a) ^ 0xffff) as u8;
        }
        0x37 => {
            state.flags.cy = true; // STC
        }
        0x3f => {
            state.flags.cy = !state.flags.cy; // CMC
        }

        0x76 => {
            // HLT: no further effect until an interrupt clears it.
            state.halted = true;
        }

        // MOV r1,r2 (0x40-0x7f minus HLT), source/destination encoded in
        // the low octal digits, index 6 being memory at HL.
        0x40..=0x7f => {
            let value = read_operand(state, opcode & 0x07);
            write_operand(state, (opcode >> 3) & 0x07, value);
        }

        // Arithmetic/logical register blocks. Each family keeps its own
        // flag policy, applied through one helper per family.
        0x80..=0x87 => {
            let v = read_operand(state, opcode & 0x07);
            add(state, v);
        }
        0x88..=0x8f => {
            let v = read_operand(state, opcode & 0x07);
            adc(state, v);
        }
        0x90..=0x97 => {
            let v = read_operand(state, opcode & 0x07);
            sub(state, v);
        }
        0x98..=0x9f => {
            let v = read_operand(state, opcode & 0x07);
            sbb(state, v);
        }
        0xa0..=0xa7 => {
            let v = read_operand(state, opcode & 0x07);
            ana(state, v);
        }
        0xa8..=0xaf => {
            let v = read_operand(state, opcode & 0x07);
            xra(state, v);
        }
        0xb0..=0xb7 => {
            let v = read_operand(state, opcode & 0x07);
            ora(state, v);
        }
        0xb8..=0xbf => {
            let v = read_operand(state, opcode & 0x07);
            cmp(state, v);
        }

        // Immediate arithmetic/logical forms.
        0xc6 => {
            // ADI
            let v = byte_arg(state);
            add(state, v);
            state.pc = state.pc.wrapping_add(1);
        }
        0xce => {
            // ACI: wide result through the whole-flag-set path.
            let v = byte_arg(state);
            let result = u16::from(state.a)
                + u16::from(v)
                + u16::from(u8::from(state.flags.cy));
            state.flags = from_result(result);
            state.a = result as u8;
            state.pc = state.pc.wrapping_add(1);
        }
        0xd6 => {
            // SUI: a borrow wraps the wide result past 0xff and sets carry.
            let v = byte_arg(state);
            let result = u16::from(state.a).wrapping_sub(u16::from(v));
            state.flags = from_result(result);
            state.a = result as u8;
            state.pc = state.pc.wrapping_add(1);
        }
        0xde => {
            // SBI
            let v = byte_arg(state);
            let operand = u16::from(v) + u16::from(u8::from(state.flags.cy));
            let result = u16::from(state.a).wrapping_sub(operand);
            state.flags = from_result(result);
            state.a = result as u8;
            state.pc = state.pc.wrapping_add(1);
        }
        0xe6 => {
            // ANI clears aux carry, unlike the register AND.
            let v = byte_arg(state);
            state.a &= v;
            set_szp(&mut state.flags, state.a);
            state.flags.cy = false;
            state.flags.ac = false;
            state.pc = state.pc.wrapping_add(1);
        }
        0xee => {
            // XRI
            let v = byte_arg(state);
            xra(state, v);
            state.pc = state.pc.wrapping_add(1);
        }
        0xf6 => {
            // ORI
            let v = byte_arg(state);
            ora(state, v);
            state.pc = state.pc.wrapping_add(1);
        }
        0xfe => {
            // CPI: compare against immediate without touching A.
            let v = byte_arg(state);
            state.flags.z = state.a == v;
            state.flags.cy = v > state.a;
            let result = state.a.wrapping_sub(v);
            state.flags.ac = (result & 0x0f) == 0x0f;
            state.flags.s = (result & 0x80) == 0x80;
            state.flags.p = parity(u16::from(result));
            state.pc = state.pc.wrapping_add(1);
        }

        // Unconditional and conditional jumps.
        0xc3 => {
            let addr = word_arg(state);
            jump(state, addr);
        }
        0xc2 => {
            let take = !state.flags.z;
            cond_jump(state, take);
        }
        0xca => {
            let take = state.flags.z;
            cond_jump(state, take);
        }
        0xd2 => {
            let take = !state.flags.cy;
            cond_jump(state, take);
        }
        0xda => {
            let take = state.flags.cy;
            cond_jump(state, take);
        }
        0xe2 => {
            let take = !state.flags.p;
            cond_jump(state, take);
        }
        0xea => {
            let take = state.flags.p;
            cond_jump(state, take);
        }
        0xf2 => {
            let take = !state.flags.s;
            cond_jump(state, take);
        }
        0xfa => {
            let take = state.flags.s;
            cond_jump(state, take);
        }

        // Calls.
        0xcd => {
            call(state);
        }
        0xc4 => {
            let take = !state.flags.z;
            cond_call(state, take);
        }
        0xcc => {
            let take = state.flags.z;
            cond_call(state, take);
        }
        0xd4 => {
            let take = !state.flags.cy;
            cond_call(state, take);
        }
        0xdc => {
            let take = state.flags.cy;
            cond_call(state, take);
        }
        0xe4 => {
            let take = !state.flags.p;
            cond_call(state, take);
        }
        0xec => {
            let take = state.flags.p;
            cond_call(state, take);
        }
        0xf4 => {
            let take = !state.flags.s;
            cond_call(state, take);
        }
        0xfc => {
            let take = state.flags.s;
            cond_call(state, take);
        }

        // Returns.
        0xc9 => {
            ret(state);
        }
        0xc0 => {
            if !state.flags.z {
                ret(state);
            }
        }
        0xc8 => {
            if state.flags.z {
                ret(state);
            }
        }
        0xd0 => {
            if !state.flags.cy {
                ret(state);
            }
        }
        0xd8 => {
            if state.flags.cy {
                ret(state);
            }
        }
        0xe0 => {
            if !state.flags.p {
                ret(state);
            }
        }
        0xe8 => {
            if state.flags.p {
                ret(state);
            }
        }
        0xf0 => {
            if !state.flags.s {
                ret(state);
            }
        }
        0xf8 => {
            if state.flags.s {
                ret(state);
            }
        }

        // RST n: single-byte call to 8 * n, with the vector loaded minus
        // one. RST 0 relies on the 16-bit wraparound to land on 0x0000.
        0xc7 | 0xcf | 0xd7 | 0xdf | 0xe7 | 0xef | 0xf7 | 0xff => {
            push(state, state.pc);
            let vector = u16::from(opcode & 0x38);
            jump(state, vector);
        }

        // PUSH / POP
        0xc5 => {
            let v = state.bc();
            push(state, v);
        }
        0xd5 => {
            let v = state.de();
            push(state, v);
        }
        0xe5 => {
            let v = state.hl();
            push(state, v);
        }
        0xf5 => {
            let v = (u16::from(state.a) << 8) | u16::from(state.flags.to_psw());
            push(state, v);
        }
        0xc1 => {
            let v = pop(state);
            state.set_bc(v);
        }
        0xd1 => {
            let v = pop(state);
            state.set_de(v);
        }
        0xe1 => {
            let v = pop(state);
            state.set_hl(v);
        }
        0xf1 => {
            let v = pop(state);
            state.a = (v >> 8) as u8;
            state.flags = Flags::from_psw(v as u8);
        }

        0xe3 => {
            // XTHL: HL steps back one before the exchange with the stack
            // top.
            let hl = state.hl().wrapping_sub(1);
            state.set_hl(hl);
            let lo = state.mem[state.sp as usize];
            state.mem[state.sp as usize] = state.l;
            state.l = lo;
            let hi = state.mem[state.sp.wrapping_add(1) as usize];
            state.mem[state.sp.wrapping_add(1) as usize] = state.h;
            state.h = hi;
        }
        0xe9 => {
            // PCHL
            let hl = state.hl();
            jump(state, hl);
        }
        0xeb => {
            // XCHG
            core::mem::swap(&mut state.d, &mut state.h);
            core::mem::swap(&mut state.e, &mut state.l);
        }
        0xf9 => {
            // SPHL
            state.sp = state.hl();
        }

        // IN / OUT route through the port bridge.
        0xdb => {
            let port = byte_arg(state);
            state.a = io::handle_input(state, port);
            state.pc = state.pc.wrapping_add(1);
        }
        0xd3 => {
            let port = byte_arg(state);
            io::handle_output(state, port, state.a);
            state.pc = state.pc.wrapping_add(1);
        }

        0xf3 => {
            state.int_enable = false; // DI
        }
        0xfb => {
            state.int_enable = true; // EI
        }

        op => {
            // Defect guard: unreachable under the full decode table above.
            bail!("unimplemented opcode {op:#04x} at {:#06x}", state.pc);
        }
    }

    state.pc = state.pc.wrapping_add(1);
    Ok(())
}

// Operand access ----------------------------------------------------------

#[inline]
fn byte_arg(state: &State8080) -> u8 {
    state.mem[state.pc.wrapping_add(1) as usize]
}

#[inline]
fn word_arg(state: &State8080) -> u16 {
    let lo = u16::from(state.mem[state.pc.wrapping_add(1) as usize]);
    let hi = u16::from(state.mem[state.pc.wrapping_add(2) as usize]);
    (hi << 8) | lo
}

/// Read the ALU/MOV operand for an octal register index (6 is memory at
/// HL).
fn read_operand(state: &State8080, index: u8) -> u8 {
    match index {
        0 => state.b,
        1 => state.c,
        2 => state.d,
        3 => state.e,
        4 => state.h,
        5 => state.l,
        6 => state.mem[state.hl() as usize],
        _ => state.a,
    }
}

fn write_operand(state: &mut State8080, index: u8, value: u8) {
    match index {
        0 => state.b = value,
        1 => state.c = value,
        2 => state.d = value,
        3 => state.e = value,
        4 => state.h = value,
        5 => state.l = value,
        6 => state.mem[state.hl() as usize] = value,
        _ => state.a = value,
    }
}

// Stack and control transfer ----------------------------------------------

/// Push a word: high byte at sp-1, low byte at sp-2, then sp -= 2.
fn push(state: &mut State8080, value: u16) {
    state.mem[state.sp.wrapping_sub(1) as usize] = (value >> 8) as u8;
    state.mem[state.sp.wrapping_sub(2) as usize] = value as u8;
    state.sp = state.sp.wrapping_sub(2);
}

/// Pop a word: low byte at sp, high byte at sp+1, then sp += 2.
fn pop(state: &mut State8080) -> u16 {
    let lo = u16::from(state.mem[state.sp as usize]);
    let hi = u16::from(state.mem[state.sp.wrapping_add(1) as usize]);
    state.sp = state.sp.wrapping_add(2);
    (hi << 8) | lo
}

/// Load a jump target minus one; the step's trailing increment lands on it.
#[inline]
fn jump(state: &mut State8080, addr: u16) {
    state.pc = addr.wrapping_sub(1);
}

fn cond_jump(state: &mut State8080, take: bool) {
    let addr = word_arg(state);
    if take {
        jump(state, addr);
    } else {
        state.pc = state.pc.wrapping_add(2);
    }
}

/// CALL: push the address of this instruction's last byte; RET's trailing
/// increment resumes after it.
fn call(state: &mut State8080) {
    let addr = word_arg(state);
    let ret = state.pc.wrapping_add(2);
    push(state, ret);
    jump(state, addr);
}

fn cond_call(state: &mut State8080, take: bool) {
    if take {
        call(state);
    } else {
        state.pc = state.pc.wrapping_add(2);
    }
}

fn ret(state: &mut State8080) {
    state.pc = pop(state);
}

// ALU families -------------------------------------------------------------
//
// One helper per family so the flag policy lives in exactly one place; each
// family's auxiliary-carry treatment is its own and is not unified.

/// ADD family: all five flags from the wide sum, aux carry from the low
/// nibbles.
fn add(state: &mut State8080, value: u8) {
    let low_a = state.a & 0x0f;
    let low_v = value & 0x0f;
    let result = u16::from(state.a) + u16::from(value);
    state.flags.z = (result & 0xff) == 0;
    state.flags.s = (result & 0x80) == 0x80;
    state.flags.cy = result > 0xff;
    state.flags.p = parity(result & 0xff);
    state.a = result as u8;
    state.flags.ac = low_a + low_v > 0x0f;
}

/// ADC: as ADD with the incoming carry folded into both the sum and the
/// nibble test.
fn adc(state: &mut State8080, value: u8) {
    let carry = u8::from(state.flags.cy);
    let low_a = state.a & 0x0f;
    let low_v = (value & 0x0f) + carry;
    let result = u16::from(state.a) + u16::from(value) + u16::from(carry);
    state.flags.z = (result & 0xff) == 0;
    state.flags.s = (result & 0x80) == 0x80;
    state.flags.cy = result > 0xff;
    state.flags.p = parity(result & 0xff);
    state.a = result as u8;
    state.flags.ac = low_a + low_v > 0x0f;
}

/// SUB/CMP family flags: two's-complement subtraction over a wide result.
/// The aux-carry nibble test is not borrow-inverted.
fn sub_flags(state: &mut State8080, value: u8) -> u8 {
    let result = u16::from(state.a).wrapping_sub(u16::from(value));
    state.flags.ac = (state.a & 0x0f) + (!value & 0x0f) + 1 > 0x0f;
    state.flags.cy = value > state.a;
    state.flags.s = (result & 0x80) == 0x80;
    state.flags.z = (result & 0xff) == 0;
    state.flags.p = parity(result & 0xff);
    result as u8
}

fn sub(state: &mut State8080, value: u8) {
    state.a = sub_flags(state, value);
}

fn cmp(state: &mut State8080, value: u8) {
    sub_flags(state, value);
}

/// SBB: subtract operand plus incoming carry. Zero compares the operands
/// directly rather than testing the result.
fn sbb(state: &mut State8080, value: u8) {
    let operand = u16::from(value) + u16::from(u8::from(state.flags.cy));
    let result = u16::from(state.a).wrapping_sub(operand);
    state.flags.ac =
        u16::from(state.a & 0x0f) + (operand.wrapping_neg() & 0x0f) > 0x0f;
    state.flags.cy = operand > u16::from(state.a);
    state.flags.s = (result & 0x80) == 0x80;
    state.flags.z = u16::from(state.a) == operand;
    state.flags.p = parity(result & 0xff);
    state.a = result as u8;
}

/// ANA: carry clears, aux carry takes the OR of bit 3 from both operands.
fn ana(state: &mut State8080, value: u8) {
    state.flags.cy = false;
    state.flags.ac = ((state.a | value) & 0x08) != 0;
    state.a &= value;
    set_szp(&mut state.flags, state.a);
}

fn xra(state: &mut State8080, value: u8) {
    state.a ^= value;
    set_szp(&mut state.flags, state.a);
    state.flags.cy = false;
    state.flags.ac = false;
}

fn ora(state: &mut State8080, value: u8) {
    state.a |= value;
    set_szp(&mut state.flags, state.a);
    state.flags.cy = false;
    state.flags.ac = false;
}

/// DAD into HL for the B/D/H variants; carry from the 17th bit.
fn dad(state: &mut State8080, value: u16) {
    let result = u32::from(state.hl()) + u32::from(value);
    state.flags.cy = result > 0xffff;
    state.set_hl(result as u16);
}
