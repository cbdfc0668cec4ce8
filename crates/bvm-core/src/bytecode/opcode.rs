//! Bytecode Opcode Definitions
//!
//! Defines the raw opcode set and its operand encodings.
//! This file contains no execution semantics.
//! Opcode values are an eternal contract: new opcodes take new values.

/// Bytecode opcodes
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    // Constants
    Constant     = 0x00,
    Return       = 0x01,
    ConstantLong = 0x02,

    // Arithmetic
    Negate   = 0x03,
    Add      = 0x04,
    Subtract = 0x05,
    Multiply = 0x06,
    Divide   = 0x07,
}

impl OpCode {
    /// Convert raw byte to opcode
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(OpCode::Constant),
            0x01 => Some(OpCode::Return),
            0x02 => Some(OpCode::ConstantLong),

            0x03 => Some(OpCode::Negate),
            0x04 => Some(OpCode::Add),
            0x05 => Some(OpCode::Subtract),
            0x06 => Some(OpCode::Multiply),
            0x07 => Some(OpCode::Divide),

            _ => None,
        }
    }

    /// Number of operand bytes following the opcode byte
    pub fn operand_len(self) -> usize {
        match self {
            OpCode::Constant => 1,
            OpCode::ConstantLong => 3,
            OpCode::Return
            | OpCode::Negate
            | OpCode::Add
            | OpCode::Subtract
            | OpCode::Multiply
            | OpCode::Divide => 0,
        }
    }

    /// Values popped and pushed by the instruction
    pub fn stack_effect(self) -> (usize, usize) {
        match self {
            OpCode::Constant | OpCode::ConstantLong => (0, 1),
            OpCode::Return => (0, 0),
            OpCode::Negate => (1, 1),
            OpCode::Add | OpCode::Subtract | OpCode::Multiply | OpCode::Divide => (2, 1),
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            OpCode::Constant => "OP_CONSTANT",
            OpCode::Return => "OP_RETURN",
            OpCode::ConstantLong => "OP_CONSTANT_LONG",
            OpCode::Negate => "OP_NEGATE",
            OpCode::Add => "OP_ADD",
            OpCode::Subtract => "OP_SUBTRACT",
            OpCode::Multiply => "OP_MULTIPLY",
            OpCode::Divide => "OP_DIVIDE",
        }
    }
}

impl From<OpCode> for u8 {
    fn from(op: OpCode) -> Self {
        op as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcode_values_are_fixed() {
        assert_eq!(OpCode::Constant as u8, 0x00);
        assert_eq!(OpCode::Return as u8, 0x01);
        assert_eq!(OpCode::ConstantLong as u8, 0x02);
    }

    #[test]
    fn from_u8_round_trips_every_assigned_value() {
        for byte in 0x00..=0x07u8 {
            let op = OpCode::from_u8(byte).expect("assigned opcode");
            assert_eq!(u8::from(op), byte);
        }
        assert_eq!(OpCode::from_u8(0x08), None);
        assert_eq!(OpCode::from_u8(0xFF), None);
    }
}
