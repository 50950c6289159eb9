use thiserror::Error;

/// Everything that can go wrong while loading or running a program.
///
/// None of these are fatal to the interpreter; the caller decides whether to halt,
/// skip the offending instruction, or log and carry on.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },

    #[error("unknown opcode {opcode:#06X} at {pc:#05X}")]
    UnknownOpcode { opcode: u16, pc: u16 },

    #[error("stack overflow: call at {pc:#05X} with a full call stack")]
    StackOverflow { pc: u16 },

    #[error("stack underflow: return at {pc:#05X} with an empty call stack")]
    StackUnderflow { pc: u16 },

    #[error("unable to read ROM")]
    Io(#[from] std::io::Error),
}
