use crate::error::Fault;

// maximum subroutine nesting
pub const STACK_DEPTH: usize = 16;

/// Return addresses for subroutine calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallStack {
    frames: Vec<u16>,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack {
            frames: Vec::with_capacity(STACK_DEPTH),
        }
    }

    pub fn push(&mut self, addr: u16) -> Result<(), Fault> {
        if self.frames.len() >= STACK_DEPTH {
            return Err(Fault::StackOverflow);
        }
        self.frames.push(addr);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, Fault> {
        self.frames.pop().ok_or(Fault::StackUnderflow)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
