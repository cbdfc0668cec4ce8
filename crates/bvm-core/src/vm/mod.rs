pub mod stack;
pub mod value;
pub mod vm;

pub use vm::VirtualMachine;
pub use value::Value;
