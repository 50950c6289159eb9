use std::collections::VecDeque;
use std::io::{self, Read};

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::constants::{MAX_ROM_SIZE, MAX_SAVED_STATES, PROGRAM_START};
use crate::error::Chip8Error;
use crate::instruction::InstructionSet;
use crate::quirks::Quirks;
use crate::state::{FrameBuffer, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `previous_states` for rewinding
///  - the `instruction_set` built from the quirks of the loaded program
///  - the random number generator used by `Cxkk`
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing and reversing the CPU
/// - inspecting its frame buffer for rendering by some display
///
/// Pacing is up to the caller: every call to `cycle` runs one instruction and ticks both timers
/// once, so the timers count cycles rather than wall-clock time.
pub struct Chip8 {
    state: State,
    previous_states: VecDeque<State>,
    instruction_set: InstructionSet,
    rng: Box<dyn RngCore>,
    rom_size: usize,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_quirks(Quirks::default())
    }

    pub fn with_quirks(quirks: Quirks) -> Self {
        Chip8 {
            state: State::new(),
            previous_states: VecDeque::with_capacity(MAX_SAVED_STATES),
            instruction_set: InstructionSet::new(quirks),
            rng: Box::new(StdRng::from_entropy()),
            rom_size: 0,
        }
    }

    /// Swaps out the random number generator, e.g. for a seeded one
    pub fn with_rng(mut self, rng: impl RngCore + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn quirks(&self) -> Quirks {
        self.instruction_set.quirks()
    }

    /// Copies a rom into memory starting at 0x200.
    ///
    /// A rom that doesn't fit is loaded up to the end of memory and reported as an error.
    ///
    /// # Arguments
    /// * `rom` the raw program bytes
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), Chip8Error> {
        self.copy_rom(rom);
        if rom.len() > MAX_ROM_SIZE {
            return Err(rom_too_large(rom.len()));
        }
        Ok(())
    }

    /// Load a rom from a source file
    ///
    /// Only buffers one byte more than fits in memory; the rest of an oversized source is
    /// counted and thrown away.
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom_from(&mut self, reader: &mut dyn Read) -> Result<(), Chip8Error> {
        let mut rom = Vec::with_capacity(MAX_ROM_SIZE + 1);
        (&mut *reader)
            .take(MAX_ROM_SIZE as u64 + 1)
            .read_to_end(&mut rom)?;
        if rom.len() <= MAX_ROM_SIZE {
            return self.load_rom(&rom);
        }

        let rest = io::copy(reader, &mut io::sink())?;
        self.copy_rom(&rom);
        Err(rom_too_large(rom.len() + rest as usize))
    }

    /// Writes as much of the rom as fits and remembers how much that was
    fn copy_rom(&mut self, rom: &[u8]) {
        let start = usize::from(PROGRAM_START);
        let len = rom.len().min(MAX_ROM_SIZE);
        self.state.memory[start..start + len].copy_from_slice(&rom[..len]);
        self.rom_size = len;
        debug!("loaded {} byte ROM at {:#05X}", len, PROGRAM_START);
    }

    /// The loaded program as it currently sits in memory
    pub fn rom(&self) -> &[u8] {
        let start = usize::from(PROGRAM_START);
        &self.state.memory[start..start + self.rom_size]
    }

    /// The current frame, whether or not it changed
    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Returns the FrameBuffer if the display should be redrawn, and marks it as drawn
    pub fn get_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    /// A read-only view of the machine, for debuggers and tests
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Whether the sound timer is running and a tone should be playing
    pub fn is_beeping(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the hex key 0..F that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.state.keypad[usize::from(key & 0xF)] = true;
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the hex key 0..F that was released
    pub fn key_release(&mut self, key: u8) {
        self.state.keypad[usize::from(key & 0xF)] = false;
    }

    /// Overwrite the whole keypad at once
    pub fn set_keypad(&mut self, keypad: [bool; 16]) {
        self.state.keypad = keypad;
    }

    /// Runs one full cycle: a single instruction followed by a timer tick.
    ///
    /// On error the pc has already moved past the offending instruction and the timers are left
    /// alone; calling `cycle` again skips it.
    pub fn cycle(&mut self) -> Result<(), Chip8Error> {
        self.advance_cpu()?;
        self.advance_timers();
        Ok(())
    }

    /// Advances the CPU by a single instruction
    /// - fetches the opcode at the pc and bumps the pc past it
    /// - decodes and executes it
    fn advance_cpu(&mut self) -> Result<(), Chip8Error> {
        self.save_state();

        let pc = self.state.pc;
        let op = self.state.read_word(pc);
        self.state.opcode = op;
        self.state.pc = pc.wrapping_add(2);
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.state.v,
            self.state.i,
            pc
        );

        let operation = self
            .instruction_set
            .decode(op)
            .ok_or(Chip8Error::UnknownOpcode { opcode: op, pc })?;
        operation(op, &mut self.state, &mut *self.rng)
    }

    /// Decrements each running timer by one
    fn advance_timers(&mut self) {
        if self.state.delay_timer > 0 {
            self.state.delay_timer -= 1;
        }

        if self.state.sound_timer > 0 {
            self.state.sound_timer -= 1;
        }
    }

    /// Reverses the CPU by a single cycle if possible
    /// - if there are previous_states, pops the last one and restores it
    /// - the keypad belongs to whoever is pressing keys so it stays as it is
    pub fn reverse_cpu(&mut self) {
        if let Some(state) = self.previous_states.pop_front() {
            debug!("rewound to pc {:#05X}", state.pc);
            let keypad = self.state.keypad;
            self.state = state;
            self.state.keypad = keypad;
        }
    }

    /// Puts the current state in previous_states
    /// - if there are already MAX_SAVED_STATES saved then the oldest is dropped
    fn save_state(&mut self) {
        if self.previous_states.len() == MAX_SAVED_STATES {
            self.previous_states.pop_back();
        }
        self.previous_states.push_front(self.state);
    }
}

fn rom_too_large(size: usize) -> Chip8Error {
    warn!("ROM truncated to {} of {} bytes", MAX_ROM_SIZE, size);
    Chip8Error::RomTooLarge {
        size,
        max_size: MAX_ROM_SIZE,
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
