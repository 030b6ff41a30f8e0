use crate::{
    definitions::{cpu, display, keyboard, memory},
    devices::Keypad,
    opcode::{self, ChipOpcodes, Opcode, Operation, ProgramCounter, ProgramCounterStep},
    resources::Rom,
    ProcessError, StackError,
};

use rand::RngCore;

/// A read-only diagnostic view over the interpreter, the last executed
/// opcode and the sixteen data registers. Made for debugger style
/// consumers, mutating the copy has no effect on the chipset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    /// the opcode last fetched and executed
    pub opcode: Opcode,
    /// the values of `V0` to `VF`
    pub registers: [u8; cpu::register::SIZE],
}

/// The ChipSet struct represents the current state
/// of the system, it contains all the structures
/// needed for emulating an instant on the
/// Chip8 CPU.
pub struct ChipSet {
    /// name of the loaded rom
    pub(super) name: String,
    /// all two bytes long and stored big-endian
    pub(super) opcode: Opcode,
    /// - `0x000-0x1FF` - Chip 8 interpreter (contains the font set)
    /// - `0x200-0xFFF` - Program ROM and work RAM
    pub(super) memory: Vec<u8>,
    /// `8-bit` data registers named `V0` to `VF`. The `VF` register doubles as a flag for some
    /// instructions; thus, it should be avoided by programs. In an addition operation, `VF` is
    /// the carry flag, while in subtraction, it is the "no borrow" flag. In the draw instruction
    /// `VF` is set upon pixel collision.
    pub(super) registers: [u8; cpu::register::SIZE],
    /// The index for the register, this is a special register entry
    /// called index `I`
    pub(super) index_register: usize,
    /// The program counter is a CPU register in the computer processor which has the address of the
    /// next instruction to be executed from memory.
    pub(super) program_counter: usize,
    /// The stack is only used to store return addresses when subroutines are called. A call
    /// while all sixteen nesting entries are in use, or a return with none, is a fatal
    /// condition and halts the cycle.
    pub(super) stack: Vec<usize>,
    /// Delay timer: This timer is intended to be used for timing the events of games. Its value
    /// can be set and read. Counts down by one per cycle, until it reaches 0.
    pub(super) delay_timer: u8,
    /// Sound timer: This timer is used for sound effects. When its value is nonzero, a beeping
    /// sound should be made by the host. Counts down by one per cycle, until it reaches 0.
    pub(super) sound_timer: u8,
    /// The graphics of the Chip 8 are black and white and the screen has a total of `2048` pixels
    /// `(64 x 32)`, stored row-major as one `0`/`1` byte per pixel.
    pub(super) framebuffer: Vec<u8>,
    /// Input is done with a hex keypad that has 16 keys ranging `0-F`.
    pub(super) keypad: Keypad,
    /// This stores the random number generator, used by the chipset.
    /// It is stored into the chipset, so as to enable simple mocking
    /// of the given type.
    pub(super) rng: Box<dyn RngCore + Send>,
}

impl ChipSet {
    /// will create a new chipset object with the rom loaded at `0x200`
    pub fn new(rom: Rom) -> Self {
        // initialize all the memory with 0
        let mut ram = vec![0; memory::SIZE];

        // load fonts
        ram[display::fontset::LOCATION
            ..(display::fontset::LOCATION + display::fontset::FONTSET.len())]
            .copy_from_slice(&display::fontset::FONTSET);

        // write the rom data into memory
        ram[cpu::PROGRAM_COUNTER..(cpu::PROGRAM_COUNTER + rom.get_data().len())]
            .copy_from_slice(rom.get_data());

        Self {
            name: rom.get_name().to_string(),
            opcode: 0,
            memory: ram,
            registers: [0; cpu::register::SIZE],
            index_register: 0,
            program_counter: cpu::PROGRAM_COUNTER,
            stack: Vec::with_capacity(cpu::stack::SIZE),
            delay_timer: 0,
            sound_timer: 0,
            framebuffer: vec![0; display::RESOLUTION],
            keypad: Keypad::new(),
            rng: Box::new(rand::rngs::OsRng),
        }
    }

    /// Will overwrite the program area of memory with the given rom.
    ///
    /// Doing so mid-run leaves the rest of the chipset state untouched and
    /// is the caller's responsibility.
    pub fn load_rom(&mut self, rom: &Rom) {
        let program = &mut self.memory[cpu::PROGRAM_COUNTER..];
        program[..rom.get_data().len()].copy_from_slice(rom.get_data());
        self.name = rom.get_name().to_string();
    }

    /// will advance the program by a single fetch-decode-execute cycle
    ///
    /// The timers are decremented once per cycle after the instruction ran,
    /// even while the wait-for-key instruction stalls the program counter.
    pub fn cycle(&mut self) -> Result<Operation, ProcessError> {
        self.opcode = opcode::build_opcode(&self.memory, self.program_counter)?;
        let operation = self.calc(self.opcode)?;
        self.tick_timers();
        Ok(operation)
    }

    fn tick_timers(&mut self) {
        if self.delay_timer > 0 {
            self.delay_timer -= 1;
        }
        if self.sound_timer > 0 {
            self.sound_timer -= 1;
        }
    }

    /// Will set the given keypad flag, out of range keys are a no-op
    pub fn set_key(&mut self, key: usize) {
        self.keypad.set_key(key, true);
    }

    /// Will clear the given keypad flag, out of range keys are a no-op
    pub fn clear_key(&mut self, key: usize) {
        self.keypad.set_key(key, false);
    }

    /// Will overwrite the whole keypad state at once
    pub fn set_keys(&mut self, keys: &[bool; keyboard::SIZE]) {
        self.keypad.set_keys(keys);
    }

    /// Will get the current state of the keypad
    pub fn keys(&self) -> &[bool] {
        self.keypad.keys()
    }

    /// will return the sound timer
    pub fn get_sound_timer(&self) -> u8 {
        self.sound_timer
    }

    /// will return the delay timer
    pub fn get_delay_timer(&self) -> u8 {
        self.delay_timer
    }

    /// Will return an immutable view of the framebuffer, one `0`/`1` byte
    /// per pixel, row-major with [`display::WIDTH`](crate::definitions::display::WIDTH)
    /// pixels per row
    pub fn framebuffer(&self) -> &[u8] {
        &self.framebuffer
    }

    /// will return the name of the loaded rom
    pub fn rom_name(&self) -> &str {
        &self.name
    }

    /// Will return the diagnostic view of the chipset
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            opcode: self.opcode,
            registers: self.registers,
        }
    }

    /// Will push the given return address to the stack, a full
    /// stack is a fatal condition
    pub(super) fn push_stack(&mut self, pointer: usize) -> Result<(), StackError> {
        if self.stack.len() == cpu::stack::SIZE {
            Err(StackError::Full)
        } else {
            self.stack.push(pointer);
            Ok(())
        }
    }

    /// Will pop the last return address from the stack, an empty
    /// stack is a fatal condition
    pub(super) fn pop_stack(&mut self) -> Result<usize, StackError> {
        self.stack.pop().ok_or(StackError::Empty)
    }
}

impl ProgramCounter for ChipSet {
    fn step(&mut self, step: ProgramCounterStep) {
        self.program_counter = if let ProgramCounterStep::Jump(_) = step {
            step.step()
        } else {
            self.program_counter + step.step()
        }
    }
}
