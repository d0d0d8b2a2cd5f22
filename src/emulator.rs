use std::io::Read;

use crate::{
    display::Framebuffer,
    error::{Error, Fault, LoadError},
    memory::Memory,
    opcode::Opcode,
    registers::{Registers, PROGRAM_START},
    stack::CallStack,
};

/// A single CHIP-8 machine: memory, registers, call stack and screen.
///
/// The host drives it by calling [`Emulator::step`] and reads the screen
/// back through [`Emulator::framebuffer`]. After the first fault the machine
/// stays halted and keeps returning that fault until [`Emulator::reset`].
#[derive(Debug, Clone, Default)]
pub struct Emulator {
    memory: Memory,
    registers: Registers,
    stack: CallStack,
    display: Framebuffer,
    fault: Option<Error>,
}

impl Emulator {
    pub fn new() -> Self {
        Emulator {
            memory: Memory::new(),
            registers: Registers::new(),
            stack: CallStack::new(),
            display: Framebuffer::new(),
            fault: None,
        }
    }

    /// Load a chip-8 rom from a reader into the program area.
    pub fn load_rom<T>(mut rom: T) -> Result<Self, LoadError>
    where
        T: Read,
    {
        let mut bytes = Vec::new();
        rom.read_to_end(&mut bytes)?;

        let mut emu = Emulator::new();
        emu.load(&bytes, PROGRAM_START as usize)?;
        Ok(emu)
    }

    /// Copy `bytes` into memory starting at `base`.
    pub fn load(&mut self, bytes: &[u8], base: usize) -> Result<(), LoadError> {
        self.memory.load(bytes, base)?;
        tracing::debug!("loaded {} bytes at {:#05X}", bytes.len(), base);
        Ok(())
    }

    /// Back to power-on state, keeping whatever is loaded in memory.
    pub fn reset(&mut self) {
        self.registers = Registers::new();
        self.stack.clear();
        self.display.clear();
        self.fault = None;
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.display
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn stack(&self) -> &CallStack {
        &self.stack
    }

    pub fn pc(&self) -> u16 {
        self.registers.pc
    }

    /// The fault that halted the machine, if any.
    pub fn fault(&self) -> Option<&Error> {
        self.fault.as_ref()
    }

    /// Fetch, decode and execute a single instruction.
    pub fn step(&mut self) -> Result<(), Error> {
        if let Some(err) = self.fault {
            return Err(err);
        }

        let addr = self.registers.pc;
        let result = match self.memory.read_word(addr as usize) {
            Ok(word) => self.execute(word).map_err(|fault| Error { addr, word, fault }),
            Err(fault) => Err(Error {
                addr,
                word: 0,
                fault,
            }),
        };

        match result {
            Ok(next) => {
                self.registers.pc = next;
                Ok(())
            }
            Err(err) => {
                self.fault = Some(err);
                Err(err)
            }
        }
    }

    /// Step until a fault or until `max_steps` instructions ran. Returns the
    /// number of instructions executed.
    pub fn run(&mut self, max_steps: usize) -> Result<usize, Error> {
        for done in 0..max_steps {
            if let Err(err) = self.step() {
                tracing::debug!("halted after {} steps", done);
                return Err(err);
            }
        }
        Ok(max_steps)
    }

    /// Execute `word` as if it sat at the current program counter and return
    /// the address of the next instruction. Nothing is modified on error.
    fn execute(&mut self, word: u16) -> Result<u16, Fault> {
        let op = Opcode::decode(word).ok_or(Fault::InvalidInstruction)?;

        let pc = self.registers.pc;
        tracing::trace!("pc: {:03x}, word: {:04x}, op: {}", pc, word, op);

        let next = pc.wrapping_add(2);
        let skip = pc.wrapping_add(4);
        let regs = &mut self.registers;

        let target = match op {
            // 00E0 - clear the screen
            Opcode::ClearScreen => {
                self.display.clear();
                next
            }
            // 00EE - return from subroutine
            Opcode::Return => {
                let ret = self.stack.pop()?;
                tracing::debug!("return from {:#05X} to {:#05X}", pc, ret);
                ret
            }
            // 1NNN - jump to address NNN
            Opcode::Jump { addr } => addr,
            // 2NNN - call subroutine at NNN, returning to the next instruction
            Opcode::Call { addr } => {
                self.stack.push(next)?;
                tracing::debug!("call {:#05X} from {:#05X}", addr, pc);
                addr
            }
            // 3XNN - skip next if VX == NN
            Opcode::SkipEqImm { x, nn } => {
                if regs.get(x) == nn {
                    skip
                } else {
                    next
                }
            }
            // 4XNN - skip next if VX != NN
            Opcode::SkipNeImm { x, nn } => {
                if regs.get(x) != nn {
                    skip
                } else {
                    next
                }
            }
            // 5XY0 - skip next if VX == VY
            Opcode::SkipEqReg { x, y } => {
                if regs.get(x) == regs.get(y) {
                    skip
                } else {
                    next
                }
            }
            // 6XNN - set VX to NN
            Opcode::LoadImm { x, nn } => {
                regs.set(x, nn);
                next
            }
            // 7XNN - set VX to VX + NN (ignore VF)
            Opcode::AddImm { x, nn } => {
                regs.set(x, regs.get(x).wrapping_add(nn));
                next
            }
            // 8XY0 - set VX = VY
            Opcode::Copy { x, y } => {
                regs.set(x, regs.get(y));
                next
            }
            // 8XY1 - set VX = VX | VY
            Opcode::Or { x, y } => {
                regs.set(x, regs.get(x) | regs.get(y));
                next
            }
            // 8XY2 - set VX = VX & VY
            Opcode::And { x, y } => {
                regs.set(x, regs.get(x) & regs.get(y));
                next
            }
            // 8XY3 - set VX = VX ^ VY
            Opcode::Xor { x, y } => {
                regs.set(x, regs.get(x) ^ regs.get(y));
                next
            }
            // 8XY4 - set VX = VX + VY, set VF to 1 if carry
            Opcode::AddReg { x, y } => {
                let (result, carry) = regs.get(x).overflowing_add(regs.get(y));
                regs.set(x, result);
                regs.set_flag(carry);
                next
            }
            // 8XY5 - set VX = VX - VY, set VF to 0 if borrow
            Opcode::Sub { x, y } => {
                let (result, borrow) = regs.get(x).overflowing_sub(regs.get(y));
                regs.set(x, result);
                regs.set_flag(!borrow);
                next
            }
            // 8XY6 - set VX = VY >> 1, set VF to the shifted out bit
            Opcode::ShiftRight { x, y } => {
                let src = regs.get(y);
                regs.set(x, src >> 1);
                regs.set_flag(src & 0x01 != 0);
                next
            }
            // 8XY7 - set VX = VY - VX, set VF to 0 if borrow
            Opcode::SubReverse { x, y } => {
                let (result, borrow) = regs.get(y).overflowing_sub(regs.get(x));
                regs.set(x, result);
                regs.set_flag(!borrow);
                next
            }
            // 8XYE - set VX = VY << 1, set VF to the shifted out bit
            Opcode::ShiftLeft { x, y } => {
                let src = regs.get(y);
                regs.set(x, src << 1);
                regs.set_flag(src & 0x80 != 0);
                next
            }
            // 9XY0 - skip next if VX != VY
            Opcode::SkipNeReg { x, y } => {
                if regs.get(x) != regs.get(y) {
                    skip
                } else {
                    next
                }
            }
            // ANNN - set I = NNN
            Opcode::LoadAddr { addr } => {
                regs.i = addr;
                next
            }
            // DXYN - draw N rows at I on (VX, VY), set VF on collision
            Opcode::Draw { x, y, n } => {
                let sprite = self.memory.slice(regs.i as usize, n as usize)?;
                let origin_x = regs.get(x) as usize;
                let origin_y = regs.get(y) as usize;
                let collision = self.display.draw_sprite(origin_x, origin_y, sprite);
                regs.set_flag(collision);
                next
            }
            // FX1E - set I = I + VX
            Opcode::AddAddr { x } => {
                regs.i = regs.i.wrapping_add(regs.get(x) as u16);
                next
            }
            // FX33 - store BCD of VX into I, I+1 and I+2
            Opcode::StoreBcd { x } => {
                let value = regs.get(x);
                let digits = [value / 100, value / 10 % 10, value % 10];
                self.memory
                    .slice_mut(regs.i as usize, digits.len())?
                    .copy_from_slice(&digits);
                next
            }
            // FX55 - store from V0 to VX, starting on I
            // at the end, I will point to the next byte
            Opcode::Dump { x } => {
                let len = x as usize + 1;
                self.memory
                    .slice_mut(regs.i as usize, len)?
                    .copy_from_slice(regs.range(x));
                regs.i = regs.i.wrapping_add(len as u16);
                next
            }
            // FX65 - load from I into V0 -> VX
            // at the end, I will point to the next byte
            Opcode::Fill { x } => {
                let len = x as usize + 1;
                let source = self.memory.slice(regs.i as usize, len)?;
                regs.range_mut(x).copy_from_slice(source);
                regs.i = regs.i.wrapping_add(len as u16);
                next
            }
            // timers, keypad, font lookup, random and offset jumps are
            // decoded but not supported by this core
            Opcode::JumpOffset { .. }
            | Opcode::Random { .. }
            | Opcode::SkipKeyPressed { .. }
            | Opcode::SkipKeyNotPressed { .. }
            | Opcode::LoadDelay { .. }
            | Opcode::WaitKey { .. }
            | Opcode::SetDelay { .. }
            | Opcode::SetSound { .. }
            | Opcode::FontAddr { .. } => return Err(Fault::Unimplemented(op)),
        };

        Ok(target)
    }
}
