/// Total addressable memory (64 KiB).
pub const MEMORY_SIZE: usize = 0x10000;

/// Intel 8080 condition flags.
///
/// PSW low-byte layout, bit 7 down to bit 0: `s z 0 ac 0 p 1 cy`.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Flags {
    pub z: bool,  // zero
    pub s: bool,  // sign
    pub p: bool,  // parity
    pub cy: bool, // carry
    pub ac: bool, // auxiliary carry
}

impl Flags {
    /// Pack the flags into the PSW byte pushed by PUSH PSW.
    pub fn to_psw(self) -> u8 {
        let mut f = 0u8;
        if self.s {
            f |= 0x80;
        }
        if self.z {
            f |= 0x40;
        }
        if self.ac {
            f |= 0x10;
        }
        if self.p {
            f |= 0x04;
        }
        // Bit 1 is fixed at 1.
        f |= 0x02;
        if self.cy {
            f |= 0x01;
        }
        f
    }

    /// Restore the flags from a PSW byte (POP PSW). Only the five
    /// meaningful bits are read; the fixed bits are ignored.
    pub fn from_psw(v: u8) -> Self {
        Self {
            s: (v & 0x80) != 0,
            z: (v & 0x40) != 0,
            ac: (v & 0x10) != 0,
            p: (v & 0x04) != 0,
            cy: (v & 0x01) != 0,
        }
    }
}

/// Complete machine state for the Space Invaders board: the 8080 register
/// file plus the memory image, interrupt bookkeeping and the I/O port
/// latches of the shift-register peripheral.
///
/// This is a plain data container. The dispatcher (`cpu::step`), the
/// interrupt controller (`interrupt::service_interrupt`) and the port
/// bridge (`io`) all mutate it through `&mut`; the driving loop owns it and
/// must serialize those calls.
pub struct State8080 {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
    pub flags: Flags,
    pub mem: [u8; MEMORY_SIZE],

    /// Set by HLT; cleared only by interrupt service.
    pub halted: bool,
    /// Gates interrupt delivery. EI/DI set and clear it; interrupt service
    /// clears it.
    pub int_enable: bool,

    /// Input latches, kept current by the input collaborator before any
    /// IN executes against them.
    pub port1: u8,
    pub port2: u8,
    /// Output latches for the discrete sound board, with previous-value
    /// shadows for edge detection by the audio collaborator.
    pub out_port3: u8,
    pub out_port3_prev: u8,
    pub out_port5: u8,
    pub out_port5_prev: u8,

    /// The 16-bit shift-register peripheral: two byte halves and a 3-bit
    /// read offset. Internal to the port bridge.
    pub shift0: u8,
    pub shift1: u8,
    pub shift_offset: u8,

    /// Which mid-frame interrupt fires next; alternates 1 and 2.
    pub interrupt_number: u8,
}

impl Default for State8080 {
    fn default() -> Self {
        Self {
            a: 0,
            b: 0,
            c: 0,
            d: 0,
            e: 0,
            h: 0,
            l: 0,
            sp: 0,
            pc: 0,
            flags: Flags::default(),
            mem: [0; MEMORY_SIZE],
            halted: false,
            int_enable: false,
            port1: 0,
            port2: 0,
            out_port3: 0,
            out_port3_prev: 0,
            out_port5: 0,
            out_port5_prev: 0,
            shift0: 0,
            shift1: 0,
            shift_offset: 0,
            interrupt_number: 1,
        }
    }
}

impl State8080 {
    pub fn new() -> Self {
        Self::default()
    }

    // Register pairs are always derived, never stored: value is
    // high << 8 | low, and writing a pair splits it back.

    #[inline]
    pub fn bc(&self) -> u16 {
        (u16::from(self.b) << 8) | u16::from(self.c)
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        self.b = (value >> 8) as u8;
        self.c = value as u8;
    }

    #[inline]
    pub fn de(&self) -> u16 {
        (u16::from(self.d) << 8) | u16::from(self.e)
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        self.d = (value >> 8) as u8;
        self.e = value as u8;
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        (u16::from(self.h) << 8) | u16::from(self.l)
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        self.h = (value >> 8) as u8;
        self.l = value as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::{Flags, State8080};

    #[test]
    fn register_pairs_are_derived_from_the_byte_halves() {
        let mut state = State8080::new();
        state.set_bc(0x1234);
        assert_eq!((state.b, state.c), (0x12, 0x34));
        assert_eq!(state.bc(), 0x1234);

        state.set_de(0xbeef);
        assert_eq!((state.d, state.e), (0xbe, 0xef));
        assert_eq!(state.de(), 0xbeef);

        state.h = 0x24;
        state.l = 0x00;
        assert_eq!(state.hl(), 0x2400);
    }

    #[test]
    fn psw_round_trips_the_five_meaningful_bits() {
        for bits in 0u8..32 {
            let flags = Flags {
                cy: bits & 1 != 0,
                p: bits & 2 != 0,
                ac: bits & 4 != 0,
                z: bits & 8 != 0,
                s: bits & 16 != 0,
            };
            assert_eq!(Flags::from_psw(flags.to_psw()), flags);
        }
    }

    #[test]
    fn psw_fixed_bit_one_is_always_set() {
        assert_eq!(Flags::default().to_psw() & 0x02, 0x02);
        // Bits 3 and 5 stay clear on pack.
        assert_eq!(Flags::default().to_psw() & 0x28, 0);
    }
}
