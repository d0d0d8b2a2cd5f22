// start of the free area for user programs
pub const PROGRAM_START: u16 = 0x200;

// number of data registers
pub const NUM_REGISTERS: usize = 16;

// VF doubles as carry, borrow and collision flag
pub const FLAG: usize = 0xF;

/// Data registers V0 - VF, the address register I and the program counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registers {
    v: [u8; NUM_REGISTERS],
    pub i: u16,
    pub pc: u16,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            v: [0u8; NUM_REGISTERS],
            i: 0,
            pc: PROGRAM_START,
        }
    }

    /// Value of `Vx`. Only the low nibble of `x` is used.
    #[inline(always)]
    pub fn get(&self, x: u8) -> u8 {
        self.v[(x & 0xF) as usize]
    }

    #[inline(always)]
    pub fn set(&mut self, x: u8, value: u8) {
        self.v[(x & 0xF) as usize] = value;
    }

    #[inline(always)]
    pub fn flag(&self) -> u8 {
        self.v[FLAG]
    }

    #[inline(always)]
    pub fn set_flag(&mut self, on: bool) {
        self.v[FLAG] = on as u8;
    }

    /// V0 through `Vx`, inclusive.
    pub fn range(&self, x: u8) -> &[u8] {
        &self.v[..=(x & 0xF) as usize]
    }

    pub fn range_mut(&mut self, x: u8) -> &mut [u8] {
        &mut self.v[..=(x & 0xF) as usize]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.v[..]
    }
}
