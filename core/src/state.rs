use crate::constants::{
    ADDRESS_MASK, DISPLAY_HEIGHT, DISPLAY_WIDTH, FLAG, FONT_SET, FONT_START, MEMORY_SIZE,
    PROGRAM_START, STACK_SIZE,
};

/// A snapshot of the interpreter's internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the flag register, clobbered by arithmetic, shifts and draws
/// - (i) a 16-bit index register pointing into memory
///
/// Counter
/// - (pc) a 16-bit program counter, starts at 0x200
///
/// Pointer
/// - (sp) an 8-bit stack pointer, always in 0..=16
///
/// Timers
/// - 2 8-bit timers (delay & sound)
/// - both count down by one per cycle while above 0
///
/// ## Memory
/// - 16 entry stack of return addresses
/// - 4096 bytes of addressable memory
///     - 0x050..0x0A0 holds the font
///     - 0x200..0x1000 holds the ROM
/// - 64x32 frame buffer of fully lit or fully unlit pixels
///
/// ## Input
/// - 16 pressed flags for keys 0..F, written from outside before each cycle
///
/// `opcode` is the instruction currently being executed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_SIZE],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub keypad: [bool; 16],
    pub opcode: u16,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font = usize::from(FONT_START);
        memory[font..font + FONT_SET.len()].copy_from_slice(&FONT_SET);

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_SIZE],
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
            keypad: [false; 16],
            opcode: 0,
        }
    }

    /// Reads a byte, wrapping the address within memory
    pub fn read(&self, addr: u16) -> u8 {
        self.memory[usize::from(addr & ADDRESS_MASK)]
    }

    /// Writes a byte, wrapping the address within memory
    pub fn write(&mut self, addr: u16, byte: u8) {
        self.memory[usize::from(addr & ADDRESS_MASK)] = byte;
    }

    /// Reads the big-endian instruction word at `addr`
    pub fn read_word(&self, addr: u16) -> u16 {
        u16::from(self.read(addr)) << 8 | u16::from(self.read(addr.wrapping_add(1)))
    }

    /// Sets VF to 1 or 0
    pub fn set_flag(&mut self, flag: bool) {
        self.v[FLAG] = u8::from(flag);
    }

    /// Moves the pc past the next instruction
    pub fn skip(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }

    /// Address of the instruction currently being executed
    ///
    /// The pc is bumped on fetch so this is always 2 behind it.
    pub fn current_pc(&self) -> u16 {
        self.pc.wrapping_sub(2)
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// The FrameBuffer is indexed as [y][x]
pub type FrameBuffer = [[u32; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_installs_font() {
        let state = State::new();
        assert_eq!(state.memory[0x050..0x055], [0xF0, 0x90, 0x90, 0x90, 0xF0]);
        assert_eq!(state.memory[0x09B..0x0A0], [0xF0, 0x80, 0xF0, 0x80, 0x80]);
        assert!(state.memory[..0x050].iter().all(|&b| b == 0));
        assert!(state.memory[0x0A0..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_new_starts_at_program() {
        let state = State::new();
        assert_eq!(state.pc, 0x200);
        assert_eq!(state.sp, 0);
        assert_eq!(state.i, 0);
    }

    #[test]
    fn test_addresses_wrap() {
        let mut state = State::new();
        state.write(0x1005, 0xAB);
        assert_eq!(state.memory[0x005], 0xAB);
        assert_eq!(state.read(0xF005), 0xAB);
    }

    #[test]
    fn test_read_word_is_big_endian() {
        let mut state = State::new();
        state.memory[0xFFF] = 0x12;
        state.memory[0x000] = 0x34;
        assert_eq!(state.read_word(0xFFF), 0x1234);
    }
}
