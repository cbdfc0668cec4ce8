pub mod buffer;
pub mod constants;

pub use buffer::DynamicBuffer;
pub use constants::ConstantPool;
