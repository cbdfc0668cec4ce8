//! Constant Pool
//!
//! Append-only table of values referenced by index from the instruction
//! stream. An index never changes once handed out.

use crate::error::BvmResult;
use crate::vm::value::Value;

use super::buffer::DynamicBuffer;

/// Constant pool owned by a single chunk
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstantPool {
    values: DynamicBuffer<Value>,
}

impl ConstantPool {
    pub fn new() -> Self {
        ConstantPool {
            values: DynamicBuffer::new(),
        }
    }

    /// Add a value and return its index
    pub fn add(&mut self, value: Value) -> BvmResult<usize> {
        self.values.append(value)
    }

    /// Make room for one more constant without adding it
    pub fn reserve_one(&mut self) -> BvmResult<()> {
        self.values.reserve_one()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.values.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.values.count()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[Value] {
        self.values.as_slice()
    }

    pub fn free(&mut self) {
        self.values.free();
    }
}
