//! Bytecode Virtual Machine - Core Library
//!
//! Public API surface: chunk construction, the instruction set,
//! disassembly and the execution engine.

pub mod error;
pub mod config;
pub mod memory;
pub mod bytecode;
pub mod debug;
pub mod vm;

// Re-export commonly used types
pub use error::{BvmError, BvmResult, Fault, FaultKind};
pub use config::VmConfig;
pub use bytecode::{Chunk, OpCode};
pub use debug::{disassemble_chunk, Disassembler};
pub use vm::{Value, VirtualMachine};
