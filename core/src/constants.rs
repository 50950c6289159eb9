/// The display is 64 pixels wide
pub const DISPLAY_WIDTH: usize = 64;
/// The display is 32 pixels tall
pub const DISPLAY_HEIGHT: usize = 32;

/// A lit pixel has every bit set; an unlit pixel is 0
pub const PIXEL_ON: u32 = 0xFFFF_FFFF;

/// 4KiB of addressable memory
pub const MEMORY_SIZE: usize = 4096;
/// Addresses wrap within memory
pub const ADDRESS_MASK: u16 = 0x0FFF;

/// Where ROMs are loaded and execution begins
pub const PROGRAM_START: u16 = 0x200;
/// The largest ROM that fits between PROGRAM_START and the end of memory
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Where the font sprites live
pub const FONT_START: u16 = 0x050;
/// Each font sprite is 5 bytes tall
pub const FONT_SPRITE_HEIGHT: u16 = 5;

/// Depth of the return address stack
pub const STACK_SIZE: usize = 16;

/// The flag register VF
pub const FLAG: usize = 0xF;

/// How many past states are kept around for rewinding
pub const MAX_SAVED_STATES: usize = 256;

/// # Font
/// Sprites for the hexadecimal digits 0..F, each 4 pixels wide and 5 tall.
///
/// ```text
/// 0xF0  ****
/// 0x90  *  *
/// 0x90  *  *
/// 0x90  *  *
/// 0xF0  ****
/// ```
pub const FONT_SET: [u8; 80] = [
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
