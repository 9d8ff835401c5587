use crate::constants::{FLAG_REGISTER, REGISTER_COUNT};
use crate::error::{Error, Result};

/// # Registers
/// 16 primary 8-bit registers (V0..VF)
/// - the first 15 (V0..VE) are general purpose registers
/// - the 16th (VF) is the flag register; arithmetic, shift and draw
///   instructions clobber it
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Registers([u8; REGISTER_COUNT]);

impl Registers {
    pub fn new() -> Self {
        Registers([0; REGISTER_COUNT])
    }

    pub fn get(&self, index: u8) -> Result<u8> {
        self.0
            .get(index as usize)
            .copied()
            .ok_or(Error::InvalidRegisterIndex(index))
    }

    pub fn set(&mut self, index: u8, value: u8) -> Result<()> {
        let register = self
            .0
            .get_mut(index as usize)
            .ok_or(Error::InvalidRegisterIndex(index))?;
        *register = value;
        Ok(())
    }

    /// VF = 1 if `flag` else 0
    pub fn set_flag(&mut self, flag: bool) {
        self.0[FLAG_REGISTER as usize] = u8::from(flag);
    }

    pub fn flag(&self) -> u8 {
        self.0[FLAG_REGISTER as usize]
    }

    /// V0..=Vx
    pub fn range(&self, x: u8) -> Result<&[u8]> {
        self.0
            .get(..=x as usize)
            .ok_or(Error::InvalidRegisterIndex(x))
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let mut v = Registers::new();
        v.set(0xA, 0x42).unwrap();
        assert_eq!(v.get(0xA), Ok(0x42));
    }

    #[test]
    fn test_invalid_index() {
        let mut v = Registers::new();
        assert_eq!(v.get(0x10), Err(Error::InvalidRegisterIndex(0x10)));
        assert_eq!(v.set(0x10, 1), Err(Error::InvalidRegisterIndex(0x10)));
        assert_eq!(v.range(0x10), Err(Error::InvalidRegisterIndex(0x10)));
    }

    #[test]
    fn test_flag() {
        let mut v = Registers::new();
        v.set_flag(true);
        assert_eq!(v.get(0xF), Ok(1));
        v.set_flag(false);
        assert_eq!(v.flag(), 0);
    }

    #[test]
    fn test_range_is_inclusive() {
        let mut v = Registers::new();
        v.set(0x0, 1).unwrap();
        v.set(0x1, 2).unwrap();
        v.set(0x2, 3).unwrap();
        assert_eq!(v.range(0x2), Ok(&[1, 2, 3][..]));
        assert_eq!(v.range(0x0), Ok(&[1][..]));
    }
}
