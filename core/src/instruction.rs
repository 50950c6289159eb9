use rand::RngCore;

use crate::opcode::Opcode;
use crate::operations::{self, *};
use crate::quirks::{LoadStoreQuirk, Quirks, ShiftQuirk};
use crate::state::State;

/// A single instruction's state transition
pub type Operation = fn(op: u16, state: &mut State, rng: &mut dyn RngCore) -> operations::Result;

/// # Instruction Set
/// Maps opcodes to the Operation that executes them.
///
/// The quirks are fixed when the set is built, so decoding never has to look at them again:
/// the ambiguous instructions simply resolve to a different Operation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InstructionSet {
    quirks: Quirks,
}

impl InstructionSet {
    pub fn new(quirks: Quirks) -> Self {
        InstructionSet { quirks }
    }

    pub fn quirks(&self) -> Quirks {
        self.quirks
    }

    /// Selects the correct Operation for a given opcode.
    ///
    /// The family picks the Operation directly, except for the 0x0, 0x8, 0xE and 0xF families which
    /// look again at their low nibble or low byte. Returns None for the opcodes that have nothing
    /// registered in that second lookup.
    pub fn decode(&self, op: u16) -> Option<Operation> {
        match op.family() {
            0x0 => Some(Self::system(op)),
            0x1 => Some(jump),
            0x2 => Some(call),
            0x3 => Some(ske),
            0x4 => Some(skne),
            0x5 => Some(skre),
            0x6 => Some(load),
            0x7 => Some(add),
            0x8 => self.arithmetic(op),
            0x9 => Some(skrne),
            0xA => Some(loadi),
            0xB => Some(jumpi),
            0xC => Some(rand),
            0xD => Some(draw),
            0xE => Self::keyboard(op),
            0xF => self.misc(op),
            _ => None,
        }
    }

    /// `0nnn`: everything but clear and return is a native call
    ///
    /// So zeroed memory runs as a string of no-ops rather than clearing the screen.
    fn system(op: u16) -> Operation {
        match op {
            0x00E0 => clr,
            0x00EE => rts,
            _ => sys,
        }
    }

    /// `8xyn`
    fn arithmetic(&self, op: u16) -> Option<Operation> {
        let operation: Operation = match op.n() {
            0x0 => mv,
            0x1 => or,
            0x2 => and,
            0x3 => xor,
            0x4 => addr,
            0x5 => sub,
            0x6 => match self.quirks.shift {
                ShiftQuirk::ShiftVy => shr,
                ShiftQuirk::ShiftVx => shr_vx,
            },
            0x7 => subn,
            0xE => match self.quirks.shift {
                ShiftQuirk::ShiftVy => shl,
                ShiftQuirk::ShiftVx => shl_vx,
            },
            _ => return None,
        };
        Some(operation)
    }

    /// `Ex9E` and `ExA1`
    fn keyboard(op: u16) -> Option<Operation> {
        match op.n() {
            0xE => Some(skpr),
            0x1 => Some(skup),
            _ => None,
        }
    }

    /// `Fxkk`
    fn misc(&self, op: u16) -> Option<Operation> {
        let operation: Operation = match op.kk() {
            0x07 => moved,
            0x0A => keyd,
            0x15 => loads,
            0x18 => ld,
            0x1E => addi,
            0x29 => ldspr,
            0x33 => bcd,
            0x55 => match self.quirks.load_store {
                LoadStoreQuirk::AdvanceIndex => stor,
                LoadStoreQuirk::KeepIndex => stor_keep_i,
            },
            0x65 => match self.quirks.load_store {
                LoadStoreQuirk::AdvanceIndex => read,
                LoadStoreQuirk::KeepIndex => read_keep_i,
            },
            _ => return None,
        };
        Some(operation)
    }
}
