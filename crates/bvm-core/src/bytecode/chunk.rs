//! Chunk
//!
//! A compiled unit: instruction bytes, one source line per byte, and the
//! constant pool those instructions index into. Chunks are grown by a
//! producer and then handed to the VM by shared reference.

use crate::error::{BvmError, BvmResult};
use crate::memory::{ConstantPool, DynamicBuffer};
use crate::vm::value::Value;

use super::opcode::OpCode;

/// Highest pool index addressable by `OpCode::Constant`
pub const MAX_SHORT_CONSTANT: usize = u8::MAX as usize;

/// Highest pool index addressable by `OpCode::ConstantLong` (24-bit operand)
pub const MAX_LONG_CONSTANT: usize = (1 << 24) - 1;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chunk {
    code: DynamicBuffer<u8>,
    lines: DynamicBuffer<usize>,
    constants: ConstantPool,
}

impl Chunk {
    pub fn new() -> Self {
        Chunk {
            code: DynamicBuffer::new(),
            lines: DynamicBuffer::new(),
            constants: ConstantPool::new(),
        }
    }

    /// Append one byte and the source line it came from.
    ///
    /// Both buffers are grown before either is written, so a failed
    /// allocation never leaves `code` and `lines` out of step.
    pub fn write(&mut self, byte: u8, line: usize) -> BvmResult<()> {
        self.code.reserve_one()?;
        self.lines.reserve_one()?;
        self.code.append(byte)?;
        self.lines.append(line)?;
        Ok(())
    }

    pub fn write_opcode(&mut self, opcode: OpCode, line: usize) -> BvmResult<()> {
        self.write(opcode as u8, line)
    }

    /// Add a value to the constant pool, returning its index.
    ///
    /// The caller emits the index as an operand with [`Chunk::write`].
    pub fn add_constant(&mut self, value: Value) -> BvmResult<usize> {
        self.constants.add(value)
    }

    /// Add a constant and emit the instruction that loads it.
    ///
    /// Uses `Constant` while the index fits one byte, `ConstantLong`
    /// (three little-endian bytes) after that. Every slot is reserved up
    /// front, so on error neither the pool nor the code has changed.
    pub fn write_constant(&mut self, value: Value, line: usize) -> BvmResult<usize> {
        self.write_constant_within(value, line, MAX_LONG_CONSTANT)
    }

    fn write_constant_within(&mut self, value: Value, line: usize, max_index: usize) -> BvmResult<usize> {
        let index = self.constants.len();
        if index > max_index {
            return Err(BvmError::TooManyConstants {
                limit: max_index + 1,
            });
        }

        let [b0, b1, b2, _] = (index as u32).to_le_bytes();
        let long_form = [OpCode::ConstantLong as u8, b0, b1, b2];
        let short_form = [OpCode::Constant as u8, b0];
        let encoded: &[u8] = if index <= MAX_SHORT_CONSTANT {
            &short_form
        } else {
            &long_form
        };

        self.constants.reserve_one()?;
        self.code.reserve(encoded.len())?;
        self.lines.reserve(encoded.len())?;

        // cannot fail: room was reserved above
        self.constants.add(value)?;
        for byte in encoded {
            self.code.append(*byte)?;
            self.lines.append(line)?;
        }
        Ok(index)
    }

    /// Source line recorded for the byte at `offset`
    pub fn line_at(&self, offset: usize) -> Option<usize> {
        self.lines.get(offset).copied()
    }

    pub fn code(&self) -> &[u8] {
        self.code.as_slice()
    }

    pub fn lines(&self) -> &[usize] {
        self.lines.as_slice()
    }

    pub fn constants(&self) -> &ConstantPool {
        &self.constants
    }

    /// Number of instruction bytes
    pub fn len(&self) -> usize {
        self.code.count()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Release all three buffers; the chunk is empty afterwards.
    pub fn free(&mut self) {
        self.code.free();
        self.lines.free();
        self.constants.free();
    }
}
