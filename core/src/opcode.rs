/// # Opcode fields
///
/// Every instruction is a big-endian 16-bit word split into four nibbles.
/// The first nibble picks the instruction family; the rest are operands or,
/// for the `0`, `5`, `8`, `9`, `E` and `F` families, a sub-operation selector.
///
/// ```text
/// |f|x|y|n|
/// | |nnn  |   12-bit address
/// |   |kk |   8-bit immediate
/// ```
pub trait Opcode {
    /// `(f, x, y, n)`
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// Register index in the second nibble
    fn x(&self) -> u8;

    /// Register index in the third nibble
    fn y(&self) -> u8;

    /// Fourth nibble; a sprite height for `Dxyn`
    fn n(&self) -> u8;

    /// Low byte immediate
    fn kk(&self) -> u8;

    /// Low 12 bits
    fn addr(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        ((self >> 12) as u8, self.x(), self.y(), self.n())
    }

    fn x(&self) -> u8 {
        ((self >> 8) & 0xF) as u8
    }

    fn y(&self) -> u8 {
        ((self >> 4) & 0xF) as u8
    }

    fn n(&self) -> u8 {
        (self & 0xF) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0xFF) as u8
    }

    fn addr(&self) -> u16 {
        self & 0xFFF
    }
}
