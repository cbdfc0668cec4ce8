pub mod chunk;
pub mod instruction;
pub mod opcode;

pub use chunk::Chunk;
pub use instruction::{DecodeError, Instruction};
pub use opcode::OpCode;
