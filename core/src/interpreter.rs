use log::{debug, trace};

use crate::constants::{PROGRAM_START, STACK_DEPTH};
use crate::error::{Error, Result};
use crate::framebuffer::FrameBuffer;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::random::RandomSource;
use crate::registers::Registers;
use crate::timer::Timer;

mod operations;

/// Whether the interpreter can fetch the next instruction
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Suspended by `Fx0A` until a key press is stored in `register`
    AwaitingKey { register: u8 },
}

/// How the program counter moves once an instruction has executed
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Advance {
    /// pc += 2
    Next,
    /// pc += 4
    Skip,
    /// pc = address
    Jump(u16),
    /// pc stays on the current instruction
    Hold,
}

/// # Interpreter
/// The fetch-decode-execute engine.
///
/// ## CPU
/// - (v) 16 8-bit registers, VF doubling as the flag register
/// - (i) the 12-bit address register
/// - (pc) a 16-bit program counter starting at 0x200
/// - (stack, sp) 16 return addresses and the index of the topmost one
/// - delay and sound timers, decremented from outside at 60Hz
///
/// ## Memory
/// - 4096 bytes with the font at 0x000 and the program at 0x200
/// - a 64x32 frame buffer
///
/// ## Collaborators
/// - a `Keypad` queried by `Ex9E`/`ExA1` and polled while awaiting a key
/// - a `RandomSource` for `Cxkk`
pub struct Interpreter<K, R> {
    v: Registers,
    i: u16,
    pc: u16,
    stack: [u16; STACK_DEPTH],
    sp: Option<usize>,
    delay_timer: Timer,
    sound_timer: Timer,
    memory: Memory,
    frame_buffer: FrameBuffer,
    draw_flag: bool,
    run_state: RunState,
    keypad: K,
    rng: R,
}

impl<K: Keypad, R: RandomSource> Interpreter<K, R> {
    pub fn new(keypad: K, rng: R) -> Self {
        Interpreter {
            v: Registers::new(),
            i: 0,
            pc: PROGRAM_START,
            stack: [0; STACK_DEPTH],
            sp: None,
            delay_timer: Timer::new(),
            sound_timer: Timer::new(),
            memory: Memory::new(),
            frame_buffer: FrameBuffer::new(),
            draw_flag: false,
            run_state: RunState::Running,
            keypad,
            rng,
        }
    }

    /// Copies a ROM image into memory at 0x200
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        self.memory.load_program(program)?;
        debug!("loaded {} byte program at {:#05X}", program.len(), PROGRAM_START);
        Ok(())
    }

    /// Restores the power-on state. The program area is cleared, so the
    /// program has to be loaded again. Keypad and random source are kept.
    pub fn reset(&mut self) {
        self.v = Registers::new();
        self.i = 0;
        self.pc = PROGRAM_START;
        self.stack = [0; STACK_DEPTH];
        self.sp = None;
        self.delay_timer = Timer::new();
        self.sound_timer = Timer::new();
        self.memory = Memory::new();
        self.frame_buffer.clear();
        self.draw_flag = true;
        self.run_state = RunState::Running;
        debug!("reset");
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn fetch(&self) -> Result<u16> {
        self.memory.read_word(self.pc as usize)
    }

    /// Decodes and executes a single opcode, then moves the pc.
    /// On error the pc is left on the faulting instruction.
    pub fn execute(&mut self, op: u16) -> Result<()> {
        let instruction = Instruction::decode(op)?;
        trace!(
            "{:04X} {:04X} {} v{:02X?} i{:04X}",
            self.pc,
            op,
            instruction,
            self.v.as_slice(),
            self.i
        );
        self.pc = match self.dispatch(instruction)? {
            Advance::Next => self.pc.wrapping_add(2),
            Advance::Skip => self.pc.wrapping_add(4),
            Advance::Jump(address) => address,
            Advance::Hold => self.pc,
        };
        Ok(())
    }

    /// Runs a single driver tick
    /// - while awaiting a key, polls the keypad once and resumes on a press
    /// - otherwise fetches and executes the next opcode
    pub fn step(&mut self) -> Result<RunState> {
        match self.run_state {
            RunState::AwaitingKey { register } => {
                if let Some(key) = self.keypad.poll_press() {
                    self.resume(register, key)?;
                }
            }
            RunState::Running => {
                let op = self.fetch()?;
                self.execute(op)?;
            }
        }
        Ok(self.run_state)
    }

    fn resume(&mut self, register: u8, key: u8) -> Result<()> {
        if key > 0xF {
            return Err(Error::InvalidKey(key));
        }
        self.v.set(register, key)?;
        self.pc = self.pc.wrapping_add(2);
        self.run_state = RunState::Running;
        debug!("key {:X} stored in V{:X}, resuming at {:#05X}", key, register, self.pc);
        Ok(())
    }

    fn dispatch(&mut self, instruction: Instruction) -> Result<Advance> {
        use Instruction::*;
        match instruction {
            Clear => self.clr(),
            Return => self.rts(),
            Sys { .. } => Ok(Advance::Next),
            Jump { addr } => Ok(Advance::Jump(addr)),
            Call { addr } => self.call(addr),
            SkipEqualByte { x, kk } => self.ske(x, kk),
            SkipNotEqualByte { x, kk } => self.skne(x, kk),
            SkipEqualRegister { x, y } => self.skre(x, y),
            LoadByte { x, kk } => self.load(x, kk),
            AddByte { x, kk } => self.add(x, kk),
            Move { x, y } => self.mv(x, y),
            Or { x, y } => self.or(x, y),
            And { x, y } => self.and(x, y),
            Xor { x, y } => self.xor(x, y),
            AddRegister { x, y } => self.addr(x, y),
            Sub { x, y } => self.sub(x, y),
            ShiftRight { x } => self.shr(x),
            SubNegated { x, y } => self.subn(x, y),
            ShiftLeft { x } => self.shl(x),
            SkipNotEqualRegister { x, y } => self.skrne(x, y),
            LoadAddress { addr } => self.loadi(addr),
            JumpOffset { addr } => self.jumpi(addr),
            Random { x, kk } => self.rand(x, kk),
            Draw { x, y, n } => self.draw(x, y, n),
            SkipPressed { x } => self.skpr(x),
            SkipNotPressed { x } => self.skup(x),
            LoadDelay { x } => self.moved(x),
            WaitKey { x } => self.keyd(x),
            SetDelay { x } => self.loads(x),
            SetSound { x } => self.ld(x),
            AddAddress { x } => self.addi(x),
            LoadFont { x } => self.ldspr(x),
            StoreBcd { x } => self.bcd(x),
            StoreRegisters { x } => self.stor(x),
            LoadRegisters { x } => self.read(x),
        }
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn i(&self) -> u16 {
        self.i
    }

    /// Value of register `index`
    pub fn v(&self, index: u8) -> Result<u8> {
        self.v.get(index)
    }

    pub fn registers(&self) -> &Registers {
        &self.v
    }

    /// Index of the topmost return address; `None` when no call is active
    pub fn stack_pointer(&self) -> Option<usize> {
        self.sp
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    /// Whether the frame changed since the flag was last taken; unsets it
    pub fn take_draw_flag(&mut self) -> bool {
        std::mem::replace(&mut self.draw_flag, false)
    }

    pub fn delay_timer(&self) -> &Timer {
        &self.delay_timer
    }

    pub fn delay_timer_mut(&mut self) -> &mut Timer {
        &mut self.delay_timer
    }

    pub fn sound_timer(&self) -> &Timer {
        &self.sound_timer
    }

    pub fn sound_timer_mut(&mut self) -> &mut Timer {
        &mut self.sound_timer
    }

    pub fn keypad(&self) -> &K {
        &self.keypad
    }

    pub fn keypad_mut(&mut self) -> &mut K {
        &mut self.keypad
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::keypad::HexKeypad;
    use rand::rngs::mock::StepRng;

    pub(crate) type TestInterpreter = Interpreter<HexKeypad, StepRng>;

    /// An interpreter whose random source always yields 0xAB
    pub(crate) fn interpreter() -> TestInterpreter {
        Interpreter::new(HexKeypad::new(), StepRng::new(0xAB, 0))
    }

    /// An interpreter with `words` loaded at 0x200
    pub(crate) fn with_program(words: &[u16]) -> TestInterpreter {
        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_be_bytes()).collect();
        let mut interpreter = interpreter();
        interpreter.load_program(&bytes).unwrap();
        interpreter
    }

    fn run(interpreter: &mut TestInterpreter, steps: usize) {
        for _ in 0..steps {
            interpreter.step().unwrap();
        }
    }

    #[test]
    fn test_fetch_is_big_endian() {
        let interpreter = with_program(&[0xAABB]);
        assert_eq!(interpreter.fetch(), Ok(0xAABB));
        // fetching does not move the pc
        assert_eq!(interpreter.pc(), 0x200);
    }

    #[test]
    fn test_fetch_past_end_of_memory() {
        let mut interpreter = with_program(&[0x1FFF]);
        run(&mut interpreter, 1);
        assert_eq!(
            interpreter.fetch(),
            Err(Error::AddressOutOfRange { address: 0x1000 })
        );
    }

    #[test]
    fn test_add_with_carry_program() {
        let mut interpreter = with_program(&[0x6005, 0x6103, 0x8014]);
        run(&mut interpreter, 3);
        assert_eq!(interpreter.v(0x0), Ok(8));
        assert_eq!(interpreter.v(0xF), Ok(0));
        assert_eq!(interpreter.pc(), 0x206);
    }

    #[test]
    fn test_load_then_add_immediate() {
        for x in 0..0xF {
            let mut interpreter = interpreter();
            interpreter.v.set_flag(true);
            interpreter.execute(0x6000 | u16::from(x) << 8 | 0xF0).unwrap();
            interpreter.execute(0x7000 | u16::from(x) << 8 | 0x20).unwrap();
            assert_eq!(interpreter.v(x), Ok(0x10));
            assert_eq!(interpreter.v(0xF), Ok(1));
        }
    }

    #[test]
    fn test_call_return_round_trip() {
        // 0x200: CALL 0x206; 0x202: JP 0x202; 0x206: RET
        let mut interpreter = with_program(&[0x2206, 0x1202, 0x0000, 0x00EE]);
        run(&mut interpreter, 1);
        assert_eq!(interpreter.pc(), 0x206);
        assert_eq!(interpreter.stack_pointer(), Some(0));
        run(&mut interpreter, 1);
        assert_eq!(interpreter.pc(), 0x202);
        assert_eq!(interpreter.stack_pointer(), None);
    }

    #[test]
    fn test_recursion_overflows_on_seventeenth_call() {
        // 0x200: CALL 0x200
        let mut interpreter = with_program(&[0x2200]);
        run(&mut interpreter, 16);
        assert_eq!(interpreter.stack_pointer(), Some(15));
        assert_eq!(
            interpreter.step(),
            Err(Error::StackOverflow { pc: 0x200 })
        );
        assert_eq!(interpreter.stack_pointer(), Some(15));
        assert_eq!(interpreter.pc(), 0x200);
    }

    #[test]
    fn test_decode_error_leaves_pc() {
        let mut interpreter = with_program(&[0x6001, 0x8128]);
        run(&mut interpreter, 1);
        assert_eq!(interpreter.step(), Err(Error::Decode { opcode: 0x8128 }));
        assert_eq!(interpreter.pc(), 0x202);
    }

    #[test]
    fn test_doesnt_cycle_while_awaiting_key() {
        let mut interpreter = with_program(&[0xF30A, 0x6001]);
        assert_eq!(
            interpreter.step(),
            Ok(RunState::AwaitingKey { register: 0x3 })
        );
        run(&mut interpreter, 5);
        assert_eq!(interpreter.pc(), 0x200);
        assert_eq!(interpreter.v(0x0), Ok(0));
    }

    #[test]
    fn test_press_before_wait_doesnt_resume() {
        let mut interpreter = with_program(&[0xF30A, 0x6001]);
        interpreter.keypad_mut().key_press(0x0).unwrap();
        interpreter.keypad_mut().key_release(0x0).unwrap();
        for _ in 0..1000 {
            interpreter.keypad_mut().key_press(0x5).unwrap();
            interpreter.keypad_mut().key_release(0x5).unwrap();
        }
        assert_eq!(
            interpreter.step(),
            Ok(RunState::AwaitingKey { register: 0x3 })
        );
        assert_eq!(
            interpreter.step(),
            Ok(RunState::AwaitingKey { register: 0x3 })
        );
        assert_eq!(interpreter.pc(), 0x200);
        interpreter.keypad_mut().key_press(0x9).unwrap();
        assert_eq!(interpreter.step(), Ok(RunState::Running));
        assert_eq!(interpreter.v(0x3), Ok(0x9));
    }

    #[test]
    fn test_resumes_exactly_once_on_key_press() {
        let mut interpreter = with_program(&[0xF30A, 0x6001]);
        run(&mut interpreter, 1);
        interpreter.keypad_mut().key_press(0xE).unwrap();
        interpreter.keypad_mut().key_press(0x7).unwrap();
        assert_eq!(interpreter.step(), Ok(RunState::Running));
        assert_eq!(interpreter.v(0x3), Ok(0xE));
        assert_eq!(interpreter.pc(), 0x202);
        // the next tick executes the following instruction
        run(&mut interpreter, 1);
        assert_eq!(interpreter.v(0x0), Ok(1));
        assert_eq!(interpreter.v(0x3), Ok(0xE));
    }

    #[test]
    fn test_jumps_skip_the_default_advance() {
        let mut interpreter = interpreter();
        interpreter.execute(0x1ABC).unwrap();
        assert_eq!(interpreter.pc(), 0xABC);
        interpreter.v.set(0x0, 0x2).unwrap();
        interpreter.execute(0xB300).unwrap();
        assert_eq!(interpreter.pc(), 0x302);
    }

    #[test]
    fn test_timers_are_only_read_and_written() {
        let mut interpreter = with_program(&[0x6A09, 0xFA15, 0xFA18, 0xFB07]);
        run(&mut interpreter, 4);
        assert_eq!(interpreter.delay_timer().get(), 9);
        assert_eq!(interpreter.sound_timer().get(), 9);
        assert_eq!(interpreter.v(0xB), Ok(9));
        interpreter.delay_timer_mut().tick();
        assert_eq!(interpreter.delay_timer().get(), 8);
    }

    #[test]
    fn test_reset() {
        let mut interpreter = with_program(&[0x6A09, 0x2300]);
        run(&mut interpreter, 2);
        interpreter.reset();
        assert_eq!(interpreter.pc(), 0x200);
        assert_eq!(interpreter.v(0xA), Ok(0));
        assert_eq!(interpreter.stack_pointer(), None);
        assert_eq!(interpreter.fetch(), Ok(0x0000));
        assert_eq!(interpreter.memory().read(0x0), Ok(0xF0));
    }
}
