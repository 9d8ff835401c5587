use rand::RngCore;

/// Source of the random bytes consumed by `Cxkk`
pub trait RandomSource {
    fn next_byte(&mut self) -> u8;
}

impl<R: RngCore> RandomSource for R {
    fn next_byte(&mut self) -> u8 {
        self.next_u32() as u8
    }
}
