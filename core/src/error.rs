/// Faults raised while loading or stepping the machine.
///
/// Every fault is local to the step that raised it. The interpreter never
/// retries or repairs the program counter; the driver decides what happens next.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unrecognized instruction {opcode:#06X}")]
    Decode { opcode: u16 },

    #[error("stack overflow: call at {pc:#05X} with all 16 frames in use")]
    StackOverflow { pc: u16 },

    #[error("stack underflow: return at {pc:#05X} with an empty call stack")]
    StackUnderflow { pc: u16 },

    #[error("memory address {address:#06X} is out of range")]
    AddressOutOfRange { address: usize },

    #[error("program is too large ({size} bytes), max size is {max} bytes")]
    ProgramTooLarge { size: usize, max: usize },

    #[error("register index {0:#X} out of bounds")]
    InvalidRegisterIndex(u8),

    #[error("no font glyph for digit {0:#X}")]
    InvalidFontDigit(u8),

    #[error("no key with value {0:#X}")]
    InvalidKey(u8),
}

pub type Result<T> = std::result::Result<T, Error>;
