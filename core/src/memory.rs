use crate::constants::{
    FONT_GLYPH_SIZE, MEMORY_SIZE, PROGRAM_END, PROGRAM_START, SPRITE_SHEET,
};
use crate::error::{Error, Result};

/// # Memory
/// 4096 bytes of addressable memory.
///
/// - `0x000..0x050` the font sprite sheet
/// - `0x050..0x200` reserved for the interpreter
/// - `0x200..=0xFFF` the loaded program and its scratch data
///
/// Only the program area is writable once the machine is built.
#[derive(Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Creates zeroed memory with the font sprite sheet preloaded
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        bytes[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    /// Reads the byte at `address`
    pub fn read(&self, address: usize) -> Result<u8> {
        self.bytes
            .get(address)
            .copied()
            .ok_or(Error::AddressOutOfRange { address })
    }

    /// Reads the big-endian word at `address`
    pub fn read_word(&self, address: usize) -> Result<u16> {
        let high = u16::from(self.read(address)?);
        let low = u16::from(self.read(address + 1)?);
        Ok(high << 8 | low)
    }

    /// Stores `value` at `address` and returns it.
    /// Fails if `address` lies outside the program area.
    pub fn write(&mut self, address: usize, value: u8) -> Result<u8> {
        if address < PROGRAM_START as usize || address > PROGRAM_END as usize {
            return Err(Error::AddressOutOfRange { address });
        }
        self.bytes[address] = value;
        Ok(value)
    }

    /// Returns the base address of the glyph for hexadecimal `digit`
    pub fn font_sprite_address(digit: u8) -> Result<u16> {
        if digit > 0xF {
            return Err(Error::InvalidFontDigit(digit));
        }
        Ok(u16::from(digit) * FONT_GLYPH_SIZE)
    }

    /// Copies `program` into memory starting at the load origin
    ///
    /// # Arguments
    /// * `program` a raw ROM image; no header, no checksum
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        let start = PROGRAM_START as usize;
        let max = MEMORY_SIZE - start;
        if program.len() > max {
            return Err(Error::ProgramTooLarge {
                size: program.len(),
                max,
            });
        }
        self.bytes[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    /// A read-only view of `len` bytes starting at `address`
    pub fn slice(&self, address: usize, len: usize) -> Result<&[u8]> {
        self.bytes
            .get(address..address + len)
            .ok_or_else(|| Error::AddressOutOfRange {
                address: (address + len).saturating_sub(1),
            })
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
