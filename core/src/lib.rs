pub use chip8::Chip8;
pub use constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, PIXEL_ON};
pub use error::Chip8Error;
pub use instruction::{InstructionSet, Operation};
pub use keymap::keymap;
pub use quirks::{LoadStoreQuirk, Quirks, ShiftQuirk};
pub use state::{FrameBuffer, State};

mod chip8;
pub mod constants;
mod error;
mod instruction;
mod keymap;
mod opcode;
mod operations;
mod quirks;
pub mod state;
