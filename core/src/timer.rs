/// # Timer
/// An 8-bit countdown register.
///
/// Instructions only read or overwrite the value. Decrementing is driven
/// from outside the interpreter at 60Hz via `tick`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Timer {
    value: u8,
}

impl Timer {
    pub fn new() -> Self {
        Timer { value: 0 }
    }

    pub fn get(&self) -> u8 {
        self.value
    }

    pub fn set(&mut self, value: u8) {
        self.value = value;
    }

    /// Decrements the timer unless it has already run out
    pub fn tick(&mut self) {
        self.value = self.value.saturating_sub(1);
    }

    /// A sound timer above zero means the buzzer should sound
    pub fn is_active(&self) -> bool {
        self.value > 0
    }
}
