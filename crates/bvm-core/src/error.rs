//! BVM Error Types
//!
//! Two families of failure exist and they are kept apart:
//! - [`BvmError`] is raised while a chunk is being *built* (allocation
//!   failure, constant pool exhaustion).
//! - [`Fault`] is raised while a chunk is being *executed*. It always carries
//!   the byte offset of the offending instruction and, when the line table
//!   has an entry for it, the originating source line.

use thiserror::Error;

/// Reason the dispatch loop halted abnormally.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FaultKind {
    #[error("invalid opcode 0x{0:02X}")]
    InvalidOpcode(u8),

    #[error("stack underflow")]
    StackUnderflow,

    #[error("stack overflow")]
    StackOverflow,

    #[error("invalid constant index {0}")]
    InvalidConstant(usize),

    #[error("instruction operands run past the end of the code")]
    TruncatedInstruction,

    #[error("reached end of code without a return")]
    UnexpectedEndOfCode,
}

/// Runtime fault reported by [`crate::VirtualMachine::run`].
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at offset {offset:04}{}", line_suffix(.line))]
pub struct Fault {
    pub offset: usize,
    pub line: Option<usize>,
    pub kind: FaultKind,
}

impl Fault {
    pub fn new(offset: usize, line: Option<usize>, kind: FaultKind) -> Self {
        Fault { offset, line, kind }
    }
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!(" (line {line})"),
        None => String::new(),
    }
}

#[derive(Debug, Error)]
pub enum BvmError {
    /// A dynamic buffer could not grow to `requested` slots.
    #[error("out of memory: cannot grow buffer to {requested} elements")]
    OutOfMemory { requested: usize },

    /// The constant pool is larger than the widest constant operand can address.
    #[error("too many constants in one chunk (limit {limit})")]
    TooManyConstants { limit: usize },

    #[error(transparent)]
    Fault(#[from] Fault),
}

pub type BvmResult<T> = Result<T, BvmError>;
