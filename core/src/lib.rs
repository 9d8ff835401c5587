pub use chip8::Chip8;
pub use constants::CLOCK_SPEED;
pub use error::{Error, Result};
pub use framebuffer::FrameBuffer;
pub use instruction::Instruction;
pub use interpreter::{Interpreter, RunState};
pub use keypad::{HexKeypad, Keypad};
pub use memory::Memory;
pub use random::RandomSource;
pub use registers::Registers;
pub use timer::Timer;

mod chip8;
pub mod constants;
mod error;
mod framebuffer;
mod instruction;
mod interpreter;
mod keypad;
mod memory;
pub mod opcode;
mod random;
mod registers;
mod timer;
