/// Width of the display in pixels
pub const DISPLAY_WIDTH: usize = 64;
/// Height of the display in pixels
pub const DISPLAY_HEIGHT: usize = 32;

/// Number of addressable bytes
pub const MEMORY_SIZE: usize = 4096;
/// Where ROMs are loaded into memory and where execution starts
pub const PROGRAM_START: u16 = 0x200;
/// The last addressable byte
pub const PROGRAM_END: u16 = 0xFFF;

/// Maximum number of nested subroutine calls
pub const STACK_DEPTH: usize = 16;
/// Number of general purpose registers
pub const REGISTER_COUNT: usize = 16;
/// Index of the flag register (VF)
pub const FLAG_REGISTER: u8 = 0xF;
/// Number of keys on the hexadecimal keypad
pub const KEY_COUNT: usize = 16;

/// Nanoseconds per CPU cycle (500Hz)
pub const CLOCK_SPEED: u64 = 2_000_000;
/// The timers decrement at 60Hz; approximated as once every 8 CPU cycles
pub const CPU_CYCLES_PER_TIMER_CYCLE: u8 = 8;

/// Rows in a single font glyph
pub const FONT_GLYPH_SIZE: u16 = 5;

/// # Sprite Sheet
/// Hexadecimal digits 0..F, each 5 rows of 4 pixels stored in the high nibble.
/// Loaded at address 0x000 so the glyph for digit `d` starts at `d * 5`.
pub const SPRITE_SHEET: [u8; 80] = [
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
