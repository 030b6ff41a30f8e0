//! The chip8 interpreter core: a fetch-decode-execute cycle over the
//! 35 instruction set, with the framebuffer, keypad and timer state
//! exposed to external collaborators through a small public surface.
pub mod chip8;
pub mod definitions;
pub mod devices;
pub mod opcode;
pub mod resources;

mod error;
mod runner;

// reexporting for convinience
pub use error::*;
pub use runner::*;
