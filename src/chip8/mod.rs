//! The full implementation of the chip8 interpreter, the chipset state
//! and the instruction semantics over it.
mod chipset;
mod opcodes;

/// reexport chipset structs and data for simpler usage
pub use chipset::*;
