//! Bytecode Instruction Representation
//!
//! Decodes one instruction (opcode plus operands) from a byte stream.
//! This layer contains no execution semantics. Operand widths come from
//! [`OpCode::operand_len`], the same table the VM reads operands by.

use super::opcode::OpCode;

/// Decoded bytecode instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: OpCode,
    pub operand: Option<u32>,
}

/// Why an instruction could not be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Byte is not an assigned opcode
    Unknown(u8),
    /// Opcode is valid but its operands run past the end of the stream
    Truncated(OpCode),
    /// Offset is at or past the end of the stream
    EndOfCode,
}

impl Instruction {
    /// Create an instruction with no operand
    pub fn new(opcode: OpCode) -> Self {
        Instruction {
            opcode,
            operand: None,
        }
    }

    /// Create an instruction with a single operand
    pub fn with_operand(opcode: OpCode, operand: u32) -> Self {
        Instruction {
            opcode,
            operand: Some(operand),
        }
    }

    /// Total encoded width in bytes
    pub fn width(&self) -> usize {
        1 + self.opcode.operand_len()
    }

    /// Decode the instruction starting at `offset`.
    ///
    /// Multi-byte operands are little-endian.
    pub fn decode(code: &[u8], offset: usize) -> Result<Instruction, DecodeError> {
        let byte = *code.get(offset).ok_or(DecodeError::EndOfCode)?;
        let opcode = OpCode::from_u8(byte).ok_or(DecodeError::Unknown(byte))?;

        let width = opcode.operand_len();
        if width == 0 {
            return Ok(Instruction::new(opcode));
        }

        let operands = code
            .get(offset + 1..offset + 1 + width)
            .ok_or(DecodeError::Truncated(opcode))?;
        Ok(Instruction::with_operand(opcode, read_le(operands)))
    }
}

/// Assemble a little-endian operand of up to four bytes
pub fn read_le(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .rev()
        .fold(0u32, |acc, b| (acc << 8) | *b as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_short_and_long_constants() {
        let code = [
            OpCode::Constant as u8,
            7,
            OpCode::ConstantLong as u8,
            0x01,
            0x02,
            0x03,
            OpCode::Return as u8,
        ];

        let first = Instruction::decode(&code, 0).unwrap();
        assert_eq!(first, Instruction::with_operand(OpCode::Constant, 7));
        assert_eq!(first.width(), 2);

        let second = Instruction::decode(&code, 2).unwrap();
        assert_eq!(second, Instruction::with_operand(OpCode::ConstantLong, 0x030201));
        assert_eq!(second.width(), 4);

        let third = Instruction::decode(&code, 6).unwrap();
        assert_eq!(third, Instruction::new(OpCode::Return));
    }

    #[test]
    fn reports_unknown_and_truncated() {
        assert_eq!(Instruction::decode(&[0xEE], 0), Err(DecodeError::Unknown(0xEE)));
        assert_eq!(
            Instruction::decode(&[OpCode::ConstantLong as u8, 1], 0),
            Err(DecodeError::Truncated(OpCode::ConstantLong))
        );
        assert_eq!(Instruction::decode(&[], 0), Err(DecodeError::EndOfCode));
    }
}
