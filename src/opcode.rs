use std::fmt;

#[inline(always)]
fn nibble_h(b: u8) -> u8 {
    (b >> 4) & 0xF
}

#[inline(always)]
fn nibble_l(b: u8) -> u8 {
    b & 0xF
}

#[inline(always)]
fn nnn(a: u8, b: u8) -> u16 {
    (((a as u16) << 8) | (b as u16)) & 0xFFF
}

/// A decoded CHIP-8 instruction.
///
/// Register operands are nibbles (0x0 - 0xF), `nn` is the low byte of the
/// instruction, `addr` its low 12 bits and `n` the sprite height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// 00E0
    ClearScreen,
    /// 00EE
    Return,
    /// 1NNN
    Jump { addr: u16 },
    /// 2NNN
    Call { addr: u16 },
    /// 3XNN
    SkipEqImm { x: u8, nn: u8 },
    /// 4XNN
    SkipNeImm { x: u8, nn: u8 },
    /// 5XY0
    SkipEqReg { x: u8, y: u8 },
    /// 6XNN
    LoadImm { x: u8, nn: u8 },
    /// 7XNN
    AddImm { x: u8, nn: u8 },
    /// 8XY0
    Copy { x: u8, y: u8 },
    /// 8XY1
    Or { x: u8, y: u8 },
    /// 8XY2
    And { x: u8, y: u8 },
    /// 8XY3
    Xor { x: u8, y: u8 },
    /// 8XY4
    AddReg { x: u8, y: u8 },
    /// 8XY5
    Sub { x: u8, y: u8 },
    /// 8XY6
    ShiftRight { x: u8, y: u8 },
    /// 8XY7
    SubReverse { x: u8, y: u8 },
    /// 8XYE
    ShiftLeft { x: u8, y: u8 },
    /// 9XY0
    SkipNeReg { x: u8, y: u8 },
    /// ANNN
    LoadAddr { addr: u16 },
    /// BNNN
    JumpOffset { addr: u16 },
    /// CXNN
    Random { x: u8, nn: u8 },
    /// DXYN
    Draw { x: u8, y: u8, n: u8 },
    /// EX9E
    SkipKeyPressed { x: u8 },
    /// EXA1
    SkipKeyNotPressed { x: u8 },
    /// FX07
    LoadDelay { x: u8 },
    /// FX0A
    WaitKey { x: u8 },
    /// FX15
    SetDelay { x: u8 },
    /// FX18
    SetSound { x: u8 },
    /// FX1E
    AddAddr { x: u8 },
    /// FX29
    FontAddr { x: u8 },
    /// FX33
    StoreBcd { x: u8 },
    /// FX55
    Dump { x: u8 },
    /// FX65
    Fill { x: u8 },
}

impl Opcode {
    /// Decode a raw instruction word. Returns `None` for anything outside the
    /// instruction set, including `0NNN` machine code calls.
    pub fn decode(word: u16) -> Option<Opcode> {
        let [a, b] = word.to_be_bytes();
        let x = nibble_l(a);
        let y = nibble_h(b);

        let op = match nibble_h(a) {
            0x0 if a == 0x00 && b == 0xE0 => Opcode::ClearScreen,
            0x0 if a == 0x00 && b == 0xEE => Opcode::Return,
            0x0 => return None,
            0x1 => Opcode::Jump { addr: nnn(a, b) },
            0x2 => Opcode::Call { addr: nnn(a, b) },
            0x3 => Opcode::SkipEqImm { x, nn: b },
            0x4 => Opcode::SkipNeImm { x, nn: b },
            0x5 if nibble_l(b) == 0x0 => Opcode::SkipEqReg { x, y },
            0x6 => Opcode::LoadImm { x, nn: b },
            0x7 => Opcode::AddImm { x, nn: b },
            0x8 => match nibble_l(b) {
                0x0 => Opcode::Copy { x, y },
                0x1 => Opcode::Or { x, y },
                0x2 => Opcode::And { x, y },
                0x3 => Opcode::Xor { x, y },
                0x4 => Opcode::AddReg { x, y },
                0x5 => Opcode::Sub { x, y },
                0x6 => Opcode::ShiftRight { x, y },
                0x7 => Opcode::SubReverse { x, y },
                0xE => Opcode::ShiftLeft { x, y },
                _ => return None,
            },
            0x9 if nibble_l(b) == 0x0 => Opcode::SkipNeReg { x, y },
            0xA => Opcode::LoadAddr { addr: nnn(a, b) },
            0xB => Opcode::JumpOffset { addr: nnn(a, b) },
            0xC => Opcode::Random { x, nn: b },
            0xD => Opcode::Draw {
                x,
                y,
                n: nibble_l(b),
            },
            0xE if b == 0x9E => Opcode::SkipKeyPressed { x },
            0xE if b == 0xA1 => Opcode::SkipKeyNotPressed { x },
            0xF => match b {
                0x07 => Opcode::LoadDelay { x },
                0x0A => Opcode::WaitKey { x },
                0x15 => Opcode::SetDelay { x },
                0x18 => Opcode::SetSound { x },
                0x1E => Opcode::AddAddr { x },
                0x29 => Opcode::FontAddr { x },
                0x33 => Opcode::StoreBcd { x },
                0x55 => Opcode::Dump { x },
                0x65 => Opcode::Fill { x },
                _ => return None,
            },
            _ => return None,
        };

        Some(op)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Opcode::ClearScreen => write!(f, "CLS"),
            Opcode::Return => write!(f, "RET"),
            Opcode::Jump { addr } => write!(f, "JP {:#05X}", addr),
            Opcode::Call { addr } => write!(f, "CALL {:#05X}", addr),
            Opcode::SkipEqImm { x, nn } => write!(f, "SE V{:X}, {:#04X}", x, nn),
            Opcode::SkipNeImm { x, nn } => write!(f, "SNE V{:X}, {:#04X}", x, nn),
            Opcode::SkipEqReg { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            Opcode::LoadImm { x, nn } => write!(f, "LD V{:X}, {:#04X}", x, nn),
            Opcode::AddImm { x, nn } => write!(f, "ADD V{:X}, {:#04X}", x, nn),
            Opcode::Copy { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Opcode::Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            Opcode::And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Opcode::Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            Opcode::AddReg { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Opcode::Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            Opcode::ShiftRight { x, y } => write!(f, "SHR V{:X}, V{:X}", x, y),
            Opcode::SubReverse { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Opcode::ShiftLeft { x, y } => write!(f, "SHL V{:X}, V{:X}", x, y),
            Opcode::SkipNeReg { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            Opcode::LoadAddr { addr } => write!(f, "LD I, {:#05X}", addr),
            Opcode::JumpOffset { addr } => write!(f, "JP V0, {:#05X}", addr),
            Opcode::Random { x, nn } => write!(f, "RND V{:X}, {:#04X}", x, nn),
            Opcode::Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            Opcode::SkipKeyPressed { x } => write!(f, "SKP V{:X}", x),
            Opcode::SkipKeyNotPressed { x } => write!(f, "SKNP V{:X}", x),
            Opcode::LoadDelay { x } => write!(f, "LD V{:X}, DT", x),
            Opcode::WaitKey { x } => write!(f, "LD V{:X}, K", x),
            Opcode::SetDelay { x } => write!(f, "LD DT, V{:X}", x),
            Opcode::SetSound { x } => write!(f, "LD ST, V{:X}", x),
            Opcode::AddAddr { x } => write!(f, "ADD I, V{:X}", x),
            Opcode::FontAddr { x } => write!(f, "LD F, V{:X}", x),
            Opcode::StoreBcd { x } => write!(f, "LD B, V{:X}", x),
            Opcode::Dump { x } => write!(f, "LD [I], V{:X}", x),
            Opcode::Fill { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}

/// Walk a flat program image two bytes at a time, as if it was loaded at
/// `base`. A trailing odd byte is not listed.
pub fn disassemble(
    bytes: &[u8],
    base: u16,
) -> impl Iterator<Item = (u16, u16, Option<Opcode>)> + '_ {
    bytes.chunks_exact(2).enumerate().map(move |(index, pair)| {
        let word = u16::from_be_bytes([pair[0], pair[1]]);
        let addr = base.wrapping_add((index * 2) as u16);
        (addr, word, Opcode::decode(word))
    })
}
