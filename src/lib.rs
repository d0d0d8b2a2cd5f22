//! A CHIP-8 interpreter core.
//!
//! The machine is an [`Emulator`] value: load a program with
//! [`Emulator::load`] (or [`Emulator::load_rom`]), call [`Emulator::step`]
//! once per instruction and present [`Emulator::framebuffer`] whenever a
//! frame is due. Timers, sound and the keypad are left to the host and the
//! instructions that need them stop the machine with [`Fault::Unimplemented`].

pub mod display;
pub mod emulator;
pub mod error;
pub mod memory;
pub mod opcode;
pub mod registers;
pub mod stack;

pub use display::{Framebuffer, DISPLAY_HEIGHT, DISPLAY_WIDTH};
pub use emulator::Emulator;
pub use error::{Error, Fault, LoadError};
pub use memory::{Memory, MEM_SIZE};
pub use opcode::{disassemble, Opcode};
pub use registers::{Registers, FLAG, PROGRAM_START};
pub use stack::{CallStack, STACK_DEPTH};
