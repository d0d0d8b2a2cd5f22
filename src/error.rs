use thiserror::Error;

use crate::opcode::Opcode;

/// What went wrong while executing a single instruction.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    #[error("invalid instruction")]
    InvalidInstruction,
    #[error("unimplemented instruction `{0}`")]
    Unimplemented(Opcode),
    #[error("return with an empty call stack")]
    StackUnderflow,
    #[error("call stack overflow")]
    StackOverflow,
    #[error("memory access out of bounds at {0:#06X}")]
    OutOfBounds(usize),
}

/// A fatal condition raised by `step`. The machine does not run past it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{fault} at address {addr:#05X}: {word:04X}")]
pub struct Error {
    /// address of the failing instruction
    pub addr: u16,
    /// raw instruction word (zero when it could not be fetched)
    pub word: u16,
    pub fault: Fault,
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("program of {len} bytes does not fit in memory at {base:#05X}")]
    TooLarge { len: usize, base: usize },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
