use crate::constants::KEY_COUNT;
use crate::error::{Error, Result};

/// # Keypad
/// Chip-8 input is generated with a hexadecimal keypad:
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
/// The interpreter only asks whether a key is down, and polls for a press
/// while it is suspended on a key wait.
pub trait Keypad {
    /// Whether `key` (0..=F) is currently held down
    fn is_down(&self, key: u8) -> bool;

    /// Takes the first key press since the last poll or clear
    fn poll_press(&mut self) -> Option<u8>;

    /// Forgets any press not yet polled; called when a key wait begins
    fn clear_presses(&mut self);
}

/// A keypad fed by the driver's event loop
#[derive(Clone, Debug, Default)]
pub struct HexKeypad {
    pressed_keys: [bool; KEY_COUNT],
    pending_press: Option<u8>,
}

impl HexKeypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pressed status of key.
    /// Only the first press since the last poll is kept for a key wait.
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) -> Result<()> {
        *self.slot(key)? = true;
        self.pending_press.get_or_insert(key);
        Ok(())
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) -> Result<()> {
        *self.slot(key)? = false;
        Ok(())
    }

    fn slot(&mut self, key: u8) -> Result<&mut bool> {
        self.pressed_keys
            .get_mut(key as usize)
            .ok_or(Error::InvalidKey(key))
    }
}

impl Keypad for HexKeypad {
    fn is_down(&self, key: u8) -> bool {
        self.pressed_keys
            .get(key as usize)
            .copied()
            .unwrap_or(false)
    }

    fn poll_press(&mut self) -> Option<u8> {
        self.pending_press.take()
    }

    fn clear_presses(&mut self) {
        self.pending_press = None;
    }
}
