use crate::error::{Fault, LoadError};

// memory size
pub const MEM_SIZE: usize = 4096;

// start of the sprite data
pub const FONT_START: usize = 0;

// built-in sprites
const FONT_DATA: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// The 4KB address space, with the hex font resident at its base.
#[derive(Clone)]
pub struct Memory {
    cells: [u8; MEM_SIZE],
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory").field("size", &MEM_SIZE).finish()
    }
}

impl Memory {
    /// Zeroed memory with the font table loaded.
    pub fn new() -> Self {
        let mut cells = [0u8; MEM_SIZE];
        cells[FONT_START..FONT_START + FONT_DATA.len()].copy_from_slice(&FONT_DATA[..]);
        Memory { cells }
    }

    pub fn read(&self, addr: usize) -> Result<u8, Fault> {
        self.cells.get(addr).copied().ok_or(Fault::OutOfBounds(addr))
    }

    pub fn write(&mut self, addr: usize, value: u8) -> Result<(), Fault> {
        let cell = self.cells.get_mut(addr).ok_or(Fault::OutOfBounds(addr))?;
        *cell = value;
        Ok(())
    }

    /// Big-endian instruction word at `addr` and `addr + 1`.
    pub fn read_word(&self, addr: usize) -> Result<u16, Fault> {
        let hi = self.read(addr)?;
        let lo = self.read(addr.checked_add(1).ok_or(Fault::OutOfBounds(addr))?)?;
        Ok(u16::from_be_bytes([hi, lo]))
    }

    /// `len` bytes starting at `addr`, or the first address past the end.
    pub fn slice(&self, addr: usize, len: usize) -> Result<&[u8], Fault> {
        self.check_range(addr, len)?;
        Ok(&self.cells[addr..addr + len])
    }

    pub fn slice_mut(&mut self, addr: usize, len: usize) -> Result<&mut [u8], Fault> {
        self.check_range(addr, len)?;
        Ok(&mut self.cells[addr..addr + len])
    }

    fn check_range(&self, addr: usize, len: usize) -> Result<(), Fault> {
        match addr.checked_add(len) {
            Some(end) if end <= MEM_SIZE => Ok(()),
            // report the first cell that does not exist
            _ => Err(Fault::OutOfBounds(addr.max(MEM_SIZE))),
        }
    }

    /// Copy `bytes` into memory starting at `base`. Nothing is written if the
    /// image does not fit.
    pub fn load(&mut self, bytes: &[u8], base: usize) -> Result<(), LoadError> {
        let end = base
            .checked_add(bytes.len())
            .filter(|end| *end <= MEM_SIZE)
            .ok_or(LoadError::TooLarge {
                len: bytes.len(),
                base,
            })?;
        self.cells[base..end].copy_from_slice(bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_is_resident() {
        let mem = Memory::new();
        assert_eq!(mem.slice(0, 5).unwrap(), &[0xF0, 0x90, 0x90, 0x90, 0xF0]);
        assert_eq!(mem.read(79).unwrap(), 0x80);
        assert_eq!(mem.read(80).unwrap(), 0x00);
        assert_eq!(mem.read(0x200).unwrap(), 0x00);
    }

    #[test]
    fn test_read_write_bounds() {
        let mut mem = Memory::new();
        mem.write(0xFFF, 0xAB).unwrap();
        assert_eq!(mem.read(0xFFF).unwrap(), 0xAB);
        assert_eq!(mem.read(0x1000), Err(Fault::OutOfBounds(0x1000)));
        assert_eq!(mem.write(0x1234, 1), Err(Fault::OutOfBounds(0x1234)));
    }

    #[test]
    fn test_read_word_is_big_endian() {
        let mut mem = Memory::new();
        mem.load(&[0x12, 0x34], 0x200).unwrap();
        assert_eq!(mem.read_word(0x200).unwrap(), 0x1234);
        assert_eq!(mem.read_word(0xFFF), Err(Fault::OutOfBounds(0x1000)));
    }

    #[test]
    fn test_slice_bounds() {
        let mut mem = Memory::new();
        assert_eq!(mem.slice(0xFFE, 2).unwrap().len(), 2);
        assert_eq!(mem.slice(0xFFE, 3), Err(Fault::OutOfBounds(0x1000)));
        assert!(mem.slice_mut(0x1000, 0).is_ok());
        assert!(mem.slice_mut(0x1001, 0).is_err());
    }

    #[test]
    fn test_huge_addresses_do_not_wrap() {
        let mut mem = Memory::new();
        assert_eq!(mem.slice(usize::MAX, 1), Err(Fault::OutOfBounds(usize::MAX)));
        assert_eq!(
            mem.slice_mut(usize::MAX - 1, 2).map(|s| s.len()),
            Err(Fault::OutOfBounds(usize::MAX - 1))
        );
        assert_eq!(mem.read_word(usize::MAX), Err(Fault::OutOfBounds(usize::MAX)));

        let err = mem.load(&[1, 2], usize::MAX).unwrap_err();
        assert!(matches!(
            err,
            LoadError::TooLarge {
                len: 2,
                base: usize::MAX
            }
        ));
    }

    #[test]
    fn test_load_small_rom() {
        let mut mem = Memory::new();
        mem.load(&[0xFFu8; 10], 0x200).unwrap();

        for addr in 0x200..0x20A {
            assert_eq!(mem.read(addr).unwrap(), 0xFF);
        }
        assert_eq!(mem.read(0x20A).unwrap(), 0x00);
    }

    #[test]
    fn test_load_exact_fit() {
        let mut mem = Memory::new();
        let rom = [0xEE; MEM_SIZE - 0x200];
        mem.load(&rom[..], 0x200).unwrap();
        assert_eq!(mem.read(0x200).unwrap(), 0xEE);
        assert_eq!(mem.read(0xFFF).unwrap(), 0xEE);
    }

    #[test]
    fn test_load_too_large_writes_nothing() {
        let mut mem = Memory::new();
        let rom = [0xEE; MEM_SIZE - 0x200 + 1];
        let err = mem.load(&rom[..], 0x200).unwrap_err();
        assert!(matches!(
            err,
            LoadError::TooLarge {
                len: 3585,
                base: 0x200
            }
        ));
        assert_eq!(mem.read(0x200).unwrap(), 0x00);
    }
}
