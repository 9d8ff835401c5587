use log::debug;

use super::{Advance, Interpreter, RunState};
use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, MEMORY_SIZE, STACK_DEPTH};
use crate::error::{Error, Result};
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::random::RandomSource;

fn skip_if(condition: bool) -> Advance {
    if condition {
        Advance::Skip
    } else {
        Advance::Next
    }
}

impl<K: Keypad, R: RandomSource> Interpreter<K, R> {
    /// clear
    pub(super) fn clr(&mut self) -> Result<Advance> {
        self.frame_buffer.clear();
        self.draw_flag = true;
        Ok(Advance::Next)
    }

    /// PC = STACK.pop() + 2
    pub(super) fn rts(&mut self) -> Result<Advance> {
        let top = self.sp.ok_or(Error::StackUnderflow { pc: self.pc })?;
        self.sp = top.checked_sub(1);
        Ok(Advance::Jump(self.stack[top].wrapping_add(2)))
    }

    /// STACK.push(PC); PC = addr
    pub(super) fn call(&mut self, addr: u16) -> Result<Advance> {
        let top = self.sp.map_or(0, |sp| sp + 1);
        if top >= STACK_DEPTH {
            return Err(Error::StackOverflow { pc: self.pc });
        }
        self.stack[top] = self.pc;
        self.sp = Some(top);
        Ok(Advance::Jump(addr))
    }

    /// if Vx == kk then pc += 2
    pub(super) fn ske(&mut self, x: u8, kk: u8) -> Result<Advance> {
        Ok(skip_if(self.v.get(x)? == kk))
    }

    /// if Vx != kk then pc += 2
    pub(super) fn skne(&mut self, x: u8, kk: u8) -> Result<Advance> {
        Ok(skip_if(self.v.get(x)? != kk))
    }

    /// if Vx == Vy then pc += 2
    pub(super) fn skre(&mut self, x: u8, y: u8) -> Result<Advance> {
        Ok(skip_if(self.v.get(x)? == self.v.get(y)?))
    }

    /// Vx = kk
    pub(super) fn load(&mut self, x: u8, kk: u8) -> Result<Advance> {
        self.v.set(x, kk)?;
        Ok(Advance::Next)
    }

    /// Vx += kk
    /// Add kk to Vx; allow for overflow but implicitly drop it. VF is untouched.
    pub(super) fn add(&mut self, x: u8, kk: u8) -> Result<Advance> {
        self.v.set(x, self.v.get(x)?.wrapping_add(kk))?;
        Ok(Advance::Next)
    }

    /// Vx = Vy
    pub(super) fn mv(&mut self, x: u8, y: u8) -> Result<Advance> {
        self.v.set(x, self.v.get(y)?)?;
        Ok(Advance::Next)
    }

    /// Vx |= Vy
    pub(super) fn or(&mut self, x: u8, y: u8) -> Result<Advance> {
        self.v.set(x, self.v.get(x)? | self.v.get(y)?)?;
        Ok(Advance::Next)
    }

    /// Vx &= Vy
    pub(super) fn and(&mut self, x: u8, y: u8) -> Result<Advance> {
        self.v.set(x, self.v.get(x)? & self.v.get(y)?)?;
        Ok(Advance::Next)
    }

    /// Vx ^= Vy
    pub(super) fn xor(&mut self, x: u8, y: u8) -> Result<Advance> {
        self.v.set(x, self.v.get(x)? ^ self.v.get(y)?)?;
        Ok(Advance::Next)
    }

    /// Vx += Vy; VF = carry
    pub(super) fn addr(&mut self, x: u8, y: u8) -> Result<Advance> {
        let (res, over) = self.v.get(x)?.overflowing_add(self.v.get(y)?);
        self.v.set_flag(over);
        self.v.set(x, res)?;
        Ok(Advance::Next)
    }

    /// Vx -= Vy; VF = Vx > Vy
    pub(super) fn sub(&mut self, x: u8, y: u8) -> Result<Advance> {
        let (vx, vy) = (self.v.get(x)?, self.v.get(y)?);
        self.v.set_flag(vx > vy);
        self.v.set(x, vx.wrapping_sub(vy))?;
        Ok(Advance::Next)
    }

    /// Vx >>= 1; VF = the bit shifted out
    pub(super) fn shr(&mut self, x: u8) -> Result<Advance> {
        let vx = self.v.get(x)?;
        self.v.set_flag(vx & 0x1 == 0x1);
        self.v.set(x, vx >> 1)?;
        Ok(Advance::Next)
    }

    /// Vx = Vy - Vx; VF = Vy > Vx
    pub(super) fn subn(&mut self, x: u8, y: u8) -> Result<Advance> {
        let (vx, vy) = (self.v.get(x)?, self.v.get(y)?);
        self.v.set_flag(vy > vx);
        self.v.set(x, vy.wrapping_sub(vx))?;
        Ok(Advance::Next)
    }

    /// Vx <<= 1; VF = the bit shifted out
    pub(super) fn shl(&mut self, x: u8) -> Result<Advance> {
        let vx = self.v.get(x)?;
        self.v.set_flag(vx & 0x80 == 0x80);
        self.v.set(x, vx << 1)?;
        Ok(Advance::Next)
    }

    /// if Vx != Vy then pc += 2
    pub(super) fn skrne(&mut self, x: u8, y: u8) -> Result<Advance> {
        Ok(skip_if(self.v.get(x)? != self.v.get(y)?))
    }

    /// I = addr
    pub(super) fn loadi(&mut self, addr: u16) -> Result<Advance> {
        self.i = addr;
        Ok(Advance::Next)
    }

    /// PC = V0 + addr
    pub(super) fn jumpi(&mut self, addr: u16) -> Result<Advance> {
        Ok(Advance::Jump(addr + u16::from(self.v.get(0x0)?)))
    }

    /// Vx = rand_byte & kk
    pub(super) fn rand(&mut self, x: u8, kk: u8) -> Result<Advance> {
        let rand_byte = self.rng.next_byte();
        self.v.set(x, rand_byte & kk)?;
        Ok(Advance::Next)
    }

    /// draw_sprite(x=Vx y=Vy size=n)
    /// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer with wrapping.
    /// Sets VF if any pixels were erased
    pub(super) fn draw(&mut self, x: u8, y: u8, n: u8) -> Result<Advance> {
        let origin_x = self.v.get(x)? as usize % DISPLAY_WIDTH;
        let origin_y = self.v.get(y)? as usize % DISPLAY_HEIGHT;
        let sprite = self.memory.slice(self.i as usize, n as usize)?;

        let mut collision = false;
        for (row, byte) in sprite.iter().enumerate() {
            let py = (origin_y + row) % DISPLAY_HEIGHT;
            for bit in 0..8 {
                let px = (origin_x + bit) % DISPLAY_WIDTH;
                let old = self.frame_buffer.get(px, py);
                let new = old ^ ((byte >> (7 - bit)) & 1 == 1);
                collision |= old && !new;
                self.frame_buffer.set(px, py, new);
            }
        }

        self.v.set_flag(collision);
        self.draw_flag = true;
        Ok(Advance::Next)
    }

    /// if Vx.pressed then pc += 2
    pub(super) fn skpr(&mut self, x: u8) -> Result<Advance> {
        let key = self.key_in(x)?;
        Ok(skip_if(self.keypad.is_down(key)))
    }

    /// if !Vx.pressed then pc += 2
    pub(super) fn skup(&mut self, x: u8) -> Result<Advance> {
        let key = self.key_in(x)?;
        Ok(skip_if(!self.keypad.is_down(key)))
    }

    fn key_in(&self, x: u8) -> Result<u8> {
        match self.v.get(x)? {
            key if key <= 0xF => Ok(key),
            key => Err(Error::InvalidKey(key)),
        }
    }

    /// Vx = DT
    pub(super) fn moved(&mut self, x: u8) -> Result<Advance> {
        self.v.set(x, self.delay_timer.get())?;
        Ok(Advance::Next)
    }

    /// await keypress for Vx
    /// The pc is held here until `step` sees a press made after this point
    pub(super) fn keyd(&mut self, x: u8) -> Result<Advance> {
        self.v.get(x)?;
        self.keypad.clear_presses();
        self.run_state = RunState::AwaitingKey { register: x };
        debug!("awaiting key for V{:X} at {:#05X}", x, self.pc);
        Ok(Advance::Hold)
    }

    /// DT = Vx
    pub(super) fn loads(&mut self, x: u8) -> Result<Advance> {
        self.delay_timer.set(self.v.get(x)?);
        Ok(Advance::Next)
    }

    /// ST = Vx
    pub(super) fn ld(&mut self, x: u8) -> Result<Advance> {
        self.sound_timer.set(self.v.get(x)?);
        Ok(Advance::Next)
    }

    /// I += Vx, wrapping at 4096
    pub(super) fn addi(&mut self, x: u8) -> Result<Advance> {
        self.i = (self.i + u16::from(self.v.get(x)?)) % MEMORY_SIZE as u16;
        Ok(Advance::Next)
    }

    /// I = Vx * 5
    /// Set I to the memory address of the font glyph for Vx
    pub(super) fn ldspr(&mut self, x: u8) -> Result<Advance> {
        self.i = Memory::font_sprite_address(self.v.get(x)?)?;
        Ok(Advance::Next)
    }

    /// mem[I..I+3] = bcd(Vx)
    /// Store BCD repr of Vx in memory starting at address i
    pub(super) fn bcd(&mut self, x: u8) -> Result<Advance> {
        let vx = self.v.get(x)?;
        let start = self.block(3)?;
        for (offset, digit) in [vx / 100, vx / 10 % 10, vx % 10].iter().enumerate() {
            self.memory.write(start + offset, *digit)?;
        }
        Ok(Advance::Next)
    }

    /// mem[I..=I+x] = V0..=Vx
    pub(super) fn stor(&mut self, x: u8) -> Result<Advance> {
        let start = self.block(x as usize + 1)?;
        for (offset, value) in self.v.range(x)?.iter().enumerate() {
            self.memory.write(start + offset, *value)?;
        }
        Ok(Advance::Next)
    }

    /// V0..=Vx = mem[I..=I+x]
    pub(super) fn read(&mut self, x: u8) -> Result<Advance> {
        let start = self.block(x as usize + 1)?;
        for index in 0..=x {
            let value = self.memory.read(start + index as usize)?;
            self.v.set(index, value)?;
        }
        Ok(Advance::Next)
    }

    /// The start of a `len` byte block at I, if all of it is addressable
    fn block(&self, len: usize) -> Result<usize> {
        let start = self.i as usize;
        let end = start + len - 1;
        if end >= MEMORY_SIZE {
            return Err(Error::AddressOutOfRange { address: end });
        }
        Ok(start)
    }
}
