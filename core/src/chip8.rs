use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::CPU_CYCLES_PER_TIMER_CYCLE;
use crate::error::Result;
use crate::framebuffer::FrameBuffer;
use crate::interpreter::{Interpreter, RunState};
use crate::keypad::HexKeypad;
use crate::random::RandomSource;

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - the `interpreter` and the keypad it reads
///  - the loaded `rom` so the machine can be reset
///  - a `delay_counter` that paces the timers against CPU cycles
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8<R = StdRng> {
    interpreter: Interpreter<HexKeypad, R>,
    rom: Vec<u8>,
    delay_counter: u8,
}

impl Chip8<StdRng> {
    /// A machine whose random source is seeded from the OS
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// A machine whose `Cxkk` results replay for the same `seed`
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for Chip8<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> Chip8<R> {
    pub fn with_rng(rng: R) -> Self {
        Chip8 {
            interpreter: Interpreter::new(HexKeypad::new(), rng),
            rom: Vec::new(),
            delay_counter: 0,
        }
    }

    /// Load a rom image
    ///
    /// # Arguments
    /// * `rom` the raw bytes of a ROM file
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        self.interpreter.load_program(rom)?;
        self.rom = rom.to_vec();
        Ok(())
    }

    /// Returns the FrameBuffer if the display should be redrawn
    pub fn get_frame(&mut self) -> Option<FrameBuffer> {
        if self.interpreter.take_draw_flag() {
            Some(*self.interpreter.frame_buffer())
        } else {
            None
        }
    }

    /// Set the pressed status of key; a pending key wait picks it up on the next cycle
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) -> Result<()> {
        self.interpreter.keypad_mut().key_press(key)
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) -> Result<()> {
        self.interpreter.keypad_mut().key_release(key)
    }

    /// Advances the CPU by a single cycle
    /// - only polls the keypad while awaiting a keypress
    /// - otherwise gets and executes the next opcode
    pub fn advance_cpu(&mut self) -> Result<RunState> {
        self.interpreter.step()
    }

    /// Handles delay counter and timers
    /// - decrements the delay counter
    /// - decrements timers when the counter hits 0 and resets the counter to `CPU_CYCLES_PER_TIMER_CYCLE`
    pub fn advance_timers(&mut self) {
        if self.delay_counter == 0 {
            self.delay_counter = CPU_CYCLES_PER_TIMER_CYCLE;
            self.interpreter.delay_timer_mut().tick();
            self.interpreter.sound_timer_mut().tick();
        } else {
            self.delay_counter -= 1;
        }
    }

    /// Whether the sound timer is running
    pub fn buzzer_active(&self) -> bool {
        self.interpreter.sound_timer().is_active()
    }

    /// Restores the power-on state and reloads the last rom
    pub fn reset(&mut self) -> Result<()> {
        self.interpreter.reset();
        self.interpreter.load_program(&self.rom)?;
        self.delay_counter = 0;
        debug!("machine reset with {} byte rom", self.rom.len());
        Ok(())
    }

    pub fn interpreter(&self) -> &Interpreter<HexKeypad, R> {
        &self.interpreter
    }
}
