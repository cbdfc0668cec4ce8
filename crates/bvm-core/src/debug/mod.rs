pub mod disassembler;

pub use disassembler::{disassemble_chunk, DisassembledInstruction, Disassembler};
