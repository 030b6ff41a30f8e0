use thiserror::Error;

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum ProcessError {
    #[error("Invalid stack state '{0}'.")]
    Stack(#[from] StackError),
    #[error("Pointer location invalid there can not be an opcode at {pointer}, if data len is {len}")]
    Fetch { pointer: usize, len: usize },
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum StackError {
    #[error("Stack is full!")]
    Full,
    #[error("Stack is empty!")]
    Empty,
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum RomError {
    #[error("ROM of {size} bytes does not fit into the {max} bytes of program memory.")]
    TooLarge { size: usize, max: usize },
}
