use crate::{
    definitions::{cpu, display, memory},
    opcode::{ChipOpcodes, Opcode, OpcodeTrait, Operation, ProgramCounterStep},
    ProcessError,
};

use super::ChipSet;

impl ChipOpcodes for ChipSet {
    fn zero(&mut self, opcode: Opcode) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        log::debug!("opcode {:#06X}", opcode);
        match opcode {
            0x00E0 => {
                // 00E0
                // clear display
                for pixel in self.framebuffer.iter_mut() {
                    *pixel = 0;
                }
                Ok((ProgramCounterStep::Next, Operation::Draw))
            }
            0x00EE => {
                // 00EE
                // Return from sub routine => pop from stack
                // the popped address is already the next instruction, no
                // extra advance
                let pc = self.pop_stack()?;
                Ok((ProgramCounterStep::Jump(pc), Operation::None))
            }
            _ => {
                // 0NNN
                // machine code routines are not emulated
                log::warn!("ignoring machine code routine {:#06X}", opcode);
                Ok((ProgramCounterStep::Next, Operation::None))
            }
        }
    }

    fn one(&self, opcode: Opcode) -> Result<ProgramCounterStep, ProcessError> {
        // 1NNN
        // Jumps to address NNN.
        Ok(ProgramCounterStep::Jump(opcode.nnn()))
    }

    fn two(&mut self, opcode: Opcode) -> Result<ProgramCounterStep, ProcessError> {
        // 2NNN
        // Calls subroutine at NNN, the pushed return address is the
        // instruction following the call
        self.push_stack(self.program_counter + ProgramCounterStep::Next.step())?;
        Ok(ProgramCounterStep::Jump(opcode.nnn()))
    }

    fn three(&self, opcode: Opcode) -> Result<ProgramCounterStep, ProcessError> {
        // 3XNN
        // Skips the next instruction if VX equals NN.
        let (x, nn) = opcode.xnn();
        Ok(ProgramCounterStep::cond(self.registers[x] == nn))
    }

    fn four(&self, opcode: Opcode) -> Result<ProgramCounterStep, ProcessError> {
        // 4XNN
        // Skips the next instruction if VX doesn't equal NN.
        let (x, nn) = opcode.xnn();
        Ok(ProgramCounterStep::cond(self.registers[x] != nn))
    }

    fn five(&self, opcode: Opcode) -> Result<ProgramCounterStep, ProcessError> {
        // 5XY0
        // Skips the next instruction if VX equals VY.
        match opcode.xyn() {
            (x, y, 0) => Ok(ProgramCounterStep::cond(
                self.registers[x] == self.registers[y],
            )),
            _ => {
                log::warn!("ignoring unassigned opcode {:#06X}", opcode);
                Ok(ProgramCounterStep::Next)
            }
        }
    }

    fn six(&mut self, opcode: Opcode) -> Result<ProgramCounterStep, ProcessError> {
        // 6XNN
        // Sets VX to NN.
        let (x, nn) = opcode.xnn();
        self.registers[x] = nn;
        Ok(ProgramCounterStep::Next)
    }

    fn seven(&mut self, opcode: Opcode) -> Result<ProgramCounterStep, ProcessError> {
        // 7XNN
        // Adds NN to VX. (Carry flag is not changed)
        let (x, nn) = opcode.xnn();
        // let VX overflow, but ignore carry
        self.registers[x] = self.registers[x].wrapping_add(nn);
        Ok(ProgramCounterStep::Next)
    }

    fn eight(&mut self, opcode: Opcode) -> Result<ProgramCounterStep, ProcessError> {
        let (x, y, n) = opcode.xyn();
        match n {
            0x0 => {
                // 8XY0
                // Sets VX to the value of VY.
                self.registers[x] = self.registers[y];
            }
            0x1 => {
                // 8XY1
                // Sets VX to VX or VY. (Bitwise OR operation)
                self.registers[x] |= self.registers[y];
            }
            0x2 => {
                // 8XY2
                // Sets VX to VX and VY. (Bitwise AND operation)
                self.registers[x] &= self.registers[y];
            }
            0x3 => {
                // 8XY3
                // Sets VX to VX xor VY.
                self.registers[x] ^= self.registers[y];
            }
            0x4 => {
                // 8XY4
                // Adds VY to VX. VF is set to 1 when there's a carry, and
                // explicitly to 0 when there isn't.
                let (res, carry) = self.registers[x].overflowing_add(self.registers[y]);
                self.registers[x] = res;
                self.registers[cpu::register::LAST] = carry as u8;
            }
            0x5 => {
                // 8XY5
                // VY is subtracted from VX. VF is set to 0 when there's a
                // borrow, and to 1 when there isn't.
                let no_borrow = self.registers[x] > self.registers[y];
                self.registers[x] = self.registers[x].wrapping_sub(self.registers[y]);
                self.registers[cpu::register::LAST] = no_borrow as u8;
            }
            0x6 => {
                // 8XY6
                // Shifts VY right by one into VX, VF takes the low bit of VY
                // before the shift. (legacy semantics, VY is the operand)
                let vy = self.registers[y];
                self.registers[x] = vy >> 1;
                self.registers[cpu::register::LAST] = vy & 1;
            }
            0x7 => {
                // 8XY7
                // Sets VX to VY minus VX. VF is set to 0 when there's a
                // borrow, and to 1 when there isn't.
                let no_borrow = self.registers[y] > self.registers[x];
                self.registers[x] = self.registers[y].wrapping_sub(self.registers[x]);
                self.registers[cpu::register::LAST] = no_borrow as u8;
            }
            0xE => {
                // 8XYE
                // Shifts VY left by one into VX, VF takes the high bit of VY
                // before the shift. (legacy semantics, VY is the operand)
                let vy = self.registers[y];
                self.registers[x] = vy << 1;
                self.registers[cpu::register::LAST] = vy >> 7;
            }
            _ => {
                log::warn!("ignoring unassigned opcode {:#06X}", opcode);
            }
        }
        Ok(ProgramCounterStep::Next)
    }

    fn nine(&self, opcode: Opcode) -> Result<ProgramCounterStep, ProcessError> {
        // 9XY0
        // Skips the next instruction if VX doesn't equal VY.
        match opcode.xyn() {
            (x, y, 0) => Ok(ProgramCounterStep::cond(
                self.registers[x] != self.registers[y],
            )),
            _ => {
                log::warn!("ignoring unassigned opcode {:#06X}", opcode);
                Ok(ProgramCounterStep::Next)
            }
        }
    }

    fn a(&mut self, opcode: Opcode) -> Result<ProgramCounterStep, ProcessError> {
        // ANNN
        // Sets I to the address NNN.
        self.index_register = opcode.nnn() & memory::ADDRESS_MASK;
        Ok(ProgramCounterStep::Next)
    }

    fn b(&self, opcode: Opcode) -> Result<ProgramCounterStep, ProcessError> {
        // BNNN
        // Jumps to the address NNN plus V0.
        let v0 = self.registers[0] as usize;
        Ok(ProgramCounterStep::Jump(v0 + opcode.nnn()))
    }

    fn c(&mut self, opcode: Opcode) -> Result<ProgramCounterStep, ProcessError> {
        // CXNN
        // Sets VX to a random byte masked with NN.
        let (x, nn) = opcode.xnn();
        // using a fill bytes call here, as the trait RngCore does not
        // support random u8.
        let mut rand: [u8; 1] = [0];
        self.rng.fill_bytes(&mut rand);
        self.registers[x] = nn & rand[0];
        Ok(ProgramCounterStep::Next)
    }

    fn d(&mut self, opcode: Opcode) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        // DXYN
        // Draws the N byte sprite at memory location I at (VX, VY). Every
        // set sprite bit is xored into the framebuffer, VF records whether
        // any set pixel was turned off by that. The x and y coordinates
        // wrap around their own axis for every pixel.
        let (x, y, n) = opcode.xyn();

        let index = self.index_register;
        let origin_x = self.registers[x] as usize;
        let origin_y = self.registers[y] as usize;

        self.registers[cpu::register::LAST] = 0;

        // sprite reads stop at the end of ram
        let end = (index + n).min(self.memory.len());

        const SPRITE_WIDTH: usize = 8;

        for (row, sprite_byte) in self.memory[index..end].iter().enumerate() {
            let py = (origin_y + row) % display::HEIGHT;

            for bit in 0..SPRITE_WIDTH {
                let mask = 0x80 >> bit;
                if sprite_byte & mask == 0 {
                    continue;
                }

                let px = (origin_x + bit) % display::WIDTH;
                let pixel = &mut self.framebuffer[px + display::WIDTH * py];

                if *pixel == 1 {
                    self.registers[cpu::register::LAST] = 1;
                }
                *pixel ^= 1;
            }
        }

        Ok((ProgramCounterStep::Next, Operation::Draw))
    }

    fn e(&self, opcode: Opcode) -> Result<ProgramCounterStep, ProcessError> {
        let (x, nn) = opcode.xnn();
        let key = self.registers[x] as usize;
        let step = match nn {
            0x9E => {
                // EX9E
                // Skips the next instruction if the key stored in VX is pressed.
                ProgramCounterStep::cond(self.keypad.is_pressed(key))
            }
            0xA1 => {
                // EXA1
                // Skips the next instruction if the key stored in VX isn't pressed.
                ProgramCounterStep::cond(!self.keypad.is_pressed(key))
            }
            _ => {
                log::warn!("ignoring unassigned opcode {:#06X}", opcode);
                ProgramCounterStep::Next
            }
        };
        Ok(step)
    }

    fn f(&mut self, opcode: Opcode) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        let (x, nn) = opcode.xnn();
        let mut operation = Operation::None;
        let mut step = ProgramCounterStep::Next;
        match nn {
            0x07 => {
                // FX07
                // Sets VX to the value of the delay timer.
                self.registers[x] = self.delay_timer;
            }
            0x0A => {
                // FX0A
                // Stalls until a key is pressed, then stores the lowest
                // pressed key in VX. The stall is expressed by not moving
                // the program counter, so the instruction reexecutes on
                // the next cycle with no other state change.
                match self.keypad.first_pressed() {
                    Some(key) => {
                        self.registers[x] = key as u8;
                    }
                    None => {
                        step = ProgramCounterStep::None;
                        operation = Operation::Wait;
                    }
                }
            }
            0x15 => {
                // FX15
                // Sets the delay timer to VX.
                self.delay_timer = self.registers[x];
            }
            0x18 => {
                // FX18
                // Sets the sound timer to VX.
                self.sound_timer = self.registers[x];
            }
            0x1E => {
                // FX1E
                // Adds VX to I. VF is not affected.
                let xi = self.registers[x] as usize;
                self.index_register = (self.index_register + xi) & memory::ADDRESS_MASK;
            }
            0x29 => {
                // FX29
                // Sets I to the address of the 5 byte font glyph for the
                // digit in VX.
                let val = self.registers[x] as usize;
                self.index_register =
                    display::fontset::LOCATION + display::fontset::GLYPH_SIZE * val;
            }
            0x33 => {
                // FX33
                // Stores the binary-coded decimal representation of VX,
                // hundreds at I, tens at I + 1, units at I + 2.
                let i = self.index_register;
                let r = self.registers[x];

                let digits = [
                    r / 100,     // 246u8 / 100 => 2
                    r / 10 % 10, // 246u8 / 10 => 24 % 10 => 4
                    r % 10,      // 246u8 % 10 => 6
                ];
                // stores stop at the end of ram
                let end = (i + digits.len()).min(self.memory.len());
                self.memory[i..end].copy_from_slice(&digits[..end - i]);
            }
            0x55 => {
                // FX55
                // Stores V0 to VX (including VX) in memory starting at
                // address I, the writes stop at the end of ram. I is left
                // pointing past the last byte, masked back into the
                // 12-bit range.
                let index = self.index_register;
                let end = (index + x + 1).min(self.memory.len());
                self.memory[index..end].copy_from_slice(&self.registers[..end - index]);
                self.index_register = (index + x + 1) & memory::ADDRESS_MASK;
            }
            0x65 => {
                // FX65
                // Fills V0 to VX (including VX) from memory starting at
                // address I, the reads stop at the end of ram. I is left
                // pointing past the last byte, masked back into the
                // 12-bit range.
                let index = self.index_register;
                let end = (index + x + 1).min(self.memory.len());
                self.registers[..end - index].copy_from_slice(&self.memory[index..end]);
                self.index_register = (index + x + 1) & memory::ADDRESS_MASK;
            }
            _ => {
                log::warn!("ignoring unassigned opcode {:#06X}", opcode);
            }
        }
        Ok((step, operation))
    }
}
