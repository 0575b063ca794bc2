//! One-instruction disassembler, used by trace logging.
//!
//! Alias byte values render as their canonical mnemonics, matching how the
//! dispatcher decodes them.

use crate::state::MEMORY_SIZE;

fn reg_name(index: u8) -> &'static str {
    match index {
        0 => "B",
        1 => "C",
        2 => "D",
        3 => "E",
        4 => "H",
        5 => "L",
        6 => "M",
        _ => "A",
    }
}

/// Render the instruction at `pc` as `MNEMONIC operands`.
pub fn disassemble(mem: &[u8; MEMORY_SIZE], pc: u16) -> String {
    let op = mem[pc as usize];
    let d8 = || format!("#${:02x}", mem[pc.wrapping_add(1) as usize]);
    let a16 = || {
        format!(
            "${:02x}{:02x}",
            mem[pc.wrapping_add(2) as usize],
            mem[pc.wrapping_add(1) as usize]
        )
    };

    match op {
        0x00 | 0x08 | 0x10 | 0x18 | 0x20 | 0x28 | 0x30 | 0x38 | 0xfd => {
            "NOP".to_string()
        }

        0x01 => format!("LXI    B,{}", a16()),
        0x11 => format!("LXI    D,{}", a16()),
        0x21 => format!("LXI    H,{}", a16()),
        0x31 => format!("LXI    SP,{}", a16()),

        0x02 => "STAX   B".to_string(),
        0x12 => "STAX   D".to_string(),
        0x0a => "LDAX   B".to_string(),
        0x1a => "LDAX   D".to_string(),

        0x03 => "INX    B".to_string(),
        0x13 => "INX    D".to_string(),
        0x23 => "INX    H".to_string(),
        0x33 => "INX    SP".to_string(),
        0x0b => "DCX    B".to_string(),
        0x1b => "DCX    D".to_string(),
        0x2b => "DCX    H".to_string(),
        0x3b => "DCX    SP".to_string(),

        0x04 => "INR    B".to_string(),
        0x0c => "INR    C".to_string(),
        0x14 => "INR    D".to_string(),
        0x1c => "INR    E".to_string(),
        0x24 => "INR    H".to_string(),
        0x2c => "INR    L".to_string(),
        0x34 => "INR    M".to_string(),
        0x3c => "INR    A".to_string(),
        0x05 => "DCR    B".to_string(),
        0x0d => "DCR    C".to_string(),
        0x15 => "DCR    D".to_string(),
        0x1d => "DCR    E".to_string(),
        0x25 => "DCR    H".to_string(),
        0x2d => "DCR    L".to_string(),
        0x35 => "DCR    M".to_string(),
        0x3d => "DCR    A".to_string(),

        0x06 => format!("MVI    B,{}", d8()),
        0x0e => format!("MVI    C,{}", d8()),
        0x16 => format!("MVI    D,{}", d8()),
        0x1e => format!("MVI    E,{}", d8()),
        0x26 => format!("MVI    H,{}", d8()),
        0x2e => format!("MVI    L,{}", d8()),
        0x36 => format!("MVI    M,{}", d8()),
        0x3e => format!("MVI    A,{}", d8()),

        0x07 => "RLC".to_string(),
        0x0f => "RRC".to_string(),
        0x17 => "RAL".to_string(),
        0x1f => "RAR".to_string(),

        0x09 => "DAD    B".to_string(),
        0x19 => "DAD    D".to_string(),
        0x29 => "DAD    H".to_string(),
        0x39 => "DAD    SP".to_string(),

        0x22 => format!("SHLD   {}", a16()),
        0x2a => format!("LHLD   {}", a16()),
        0x32 => format!("STA    {}", a16()),
        0x3a => format!("LDA    {}", a16()),

        0x27 => "DAA".to_string(),
        0x2f => "CMA".to_string(),
        0x37 => "STC".to_string(),
        0x3f => "CMC".to_string(),

        0x76 => "HLT".to_string(),
        0x40..=0x7f => format!(
            "MOV    {},{}",
            reg_name((op >> 3) & 0x07),
            reg_name(op & 0x07)
        ),

        0x80..=0x87 => format!("ADD    {}", reg_name(op & 0x07)),
        0x88..=0x8f => format!("ADC    {}", reg_name(op & 0x07)),
        0x90..=0x97 => format!("SUB    {}", reg_name(op & 0x07)),
        0x98..=0x9f => format!("SBB    {}", reg_name(op & 0x07)),
        0xa0..=0xa7 => format!("ANA    {}", reg_name(op & 0x07)),
        0xa8..=0xaf => format!("XRA    {}", reg_name(op & 0x07)),
        0xb0..=0xb7 => format!("ORA    {}", reg_name(op & 0x07)),
        0xb8..=0xbf => format!("CMP    {}", reg_name(op & 0x07)),

        0xc6 => format!("ADI    {}", d8()),
        0xce => format!("ACI    {}", d8()),
        0xd6 => format!("SUI    {}", d8()),
        0xde => format!("SBI    {}", d8()),
        0xe6 => format!("ANI    {}", d8()),
        0xee => format!("XRI    {}", d8()),
        0xf6 => format!("ORI    {}", d8()),
        0xfe => format!("CPI    {}", d8()),

        0xc3 | 0xcb => format!("JMP    {}", a16()),
        0xc2 => format!("JNZ    {}", a16()),
        0xca => format!("JZ     {}", a16()),
        0xd2 => format!("JNC    {}", a16()),
        0xda => format!("JC     {}", a16()),
        0xe2 => format!("JPO    {}", a16()),
        0xea => format!("JPE    {}", a16()),
        0xf2 => format!("JP     {}", a16()),
        0xfa => format!("JM     {}", a16()),

        0xcd | 0xdd | 0xed => format!("CALL   {}", a16()),
        0xc4 => format!("CNZ    {}", a16()),
        0xcc => format!("CZ     {}", a16()),
        0xd4 => format!("CNC    {}", a16()),
        0xdc => format!("CC     {}", a16()),
        0xe4 => format!("CPO    {}", a16()),
        0xec => format!("CPE    {}", a16()),
        0xf4 => format!("CP     {}", a16()),
        0xfc => format!("CM     {}", a16()),

        0xc9 | 0xd9 => "RET".to_string(),
        0xc0 => "RNZ".to_string(),
        0xc8 => "RZ".to_string(),
        0xd0 => "RNC".to_string(),
        0xd8 => "RC".to_string(),
        0xe0 => "RPO".to_string(),
        0xe8 => "RPE".to_string(),
        0xf0 => "RP".to_string(),
        0xf8 => "RM".to_string(),

        0xc7 | 0xcf | 0xd7 | 0xdf | 0xe7 | 0xef | 0xf7 | 0xff => {
            format!("RST    {}", (op >> 3) & 0x07)
        }

        0xc1 => "POP    B".to_string(),
        0xd1 => "POP    D".to_string(),
        0xe1 => "POP    H".to_string(),
        0xf1 => "POP    PSW".to_string(),
        0xc5 => "PUSH   B".to_string(),
        0xd5 => "PUSH   D".to_string(),
        0xe5 => "PUSH   H".to_string(),
        0xf5 => "PUSH   PSW".to_string(),

        0xe3 => "XTHL".to_string(),
        0xe9 => "PCHL".to_string(),
        0xeb => "XCHG".to_string(),
        0xf9 => "SPHL".to_string(),

        0xd3 => format!("OUT    {}", d8()),
        0xdb => format!("IN     {}", d8()),
        0xf3 => "DI".to_string(),
        0xfb => "EI".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::disassemble;
    use crate::state::MEMORY_SIZE;

    #[test]
    fn renders_operands_little_endian() {
        let mut mem = [0u8; MEMORY_SIZE];
        mem[0] = 0xc3;
        mem[1] = 0x34;
        mem[2] = 0x12;
        assert_eq!(disassemble(&mem, 0), "JMP    $1234");

        mem[3] = 0x3e;
        mem[4] = 0xab;
        assert_eq!(disassemble(&mem, 3), "MVI    A,#$ab");
    }

    #[test]
    fn decodes_mov_and_alu_groups() {
        let mut mem = [0u8; MEMORY_SIZE];
        mem[0] = 0x77; // MOV M,A
        mem[1] = 0x96; // SUB M
        mem[2] = 0x76; // HLT, not a MOV
        assert_eq!(disassemble(&mem, 0), "MOV    M,A");
        assert_eq!(disassemble(&mem, 1), "SUB    M");
        assert_eq!(disassemble(&mem, 2), "HLT");
    }

    #[test]
    fn alias_bytes_render_canonically() {
        let mut mem = [0u8; MEMORY_SIZE];
        mem[0] = 0xcb;
        mem[1] = 0x00;
        mem[2] = 0x10;
        assert_eq!(disassemble(&mem, 0), "JMP    $1000");
        mem[0] = 0xd9;
        assert_eq!(disassemble(&mem, 0), "RET");
        mem[0] = 0x08;
        assert_eq!(disassemble(&mem, 0), "NOP");
    }
}
