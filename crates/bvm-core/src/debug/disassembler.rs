//! Chunk disassembly for diagnostics.
//!
//! Read-only traversal: produces one [`DisassembledInstruction`] per
//! instruction offset, lazily. Decoding goes through
//! [`Instruction::decode`], so operand widths always match what the VM reads.

use std::fmt::{self, Display, Write};

use crate::bytecode::{Chunk, DecodeError, Instruction, OpCode};
use crate::vm::value::Value;

/// Source line column of a disassembly row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMarker {
    Line(usize),
    /// Same line as the previous instruction
    Continuation,
    /// No line recorded for this offset
    Unknown,
}

/// What was found at an offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decoded {
    Simple(OpCode),
    Constant {
        opcode: OpCode,
        index: usize,
        value: Option<Value>,
    },
    Truncated(OpCode),
    Unknown(u8),
}

/// A single row of disassembly output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisassembledInstruction {
    pub offset: usize,
    pub line: LineMarker,
    pub decoded: Decoded,
    /// Offset of the following instruction
    pub next_offset: usize,
}

impl DisassembledInstruction {
    /// Decode the instruction at `offset` without regard to the previous row.
    ///
    /// Returns `None` when `offset` is past the end of the code.
    pub fn at(chunk: &Chunk, offset: usize) -> Option<Self> {
        let line = match chunk.line_at(offset) {
            Some(line) => LineMarker::Line(line),
            None => LineMarker::Unknown,
        };
        let code = chunk.code();

        let (decoded, next_offset) = match Instruction::decode(code, offset) {
            Ok(instruction) => {
                let next = offset + instruction.width();
                let decoded = match instruction.operand {
                    Some(operand) => {
                        let index = operand as usize;
                        Decoded::Constant {
                            opcode: instruction.opcode,
                            index,
                            value: chunk.constants().get(index),
                        }
                    }
                    None => Decoded::Simple(instruction.opcode),
                };
                (decoded, next)
            }
            Err(DecodeError::Unknown(byte)) => (Decoded::Unknown(byte), offset + 1),
            Err(DecodeError::Truncated(opcode)) => (Decoded::Truncated(opcode), code.len()),
            Err(DecodeError::EndOfCode) => return None,
        };

        Some(DisassembledInstruction {
            offset,
            line,
            decoded,
            next_offset,
        })
    }
}

impl Display for DisassembledInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04} ", self.offset)?;
        match self.line {
            LineMarker::Line(line) => write!(f, "{:>4} ", line)?,
            LineMarker::Continuation => write!(f, "   | ")?,
            LineMarker::Unknown => write!(f, "   ? ")?,
        }

        match self.decoded {
            Decoded::Simple(opcode) => write!(f, "{}", opcode.mnemonic()),
            Decoded::Constant { opcode, index, value } => {
                write!(f, "{:<16} {:>4} ", opcode.mnemonic(), index)?;
                match value {
                    Some(value) => write!(f, "'{}'", value),
                    None => write!(f, "<out of range>"),
                }
            }
            Decoded::Truncated(opcode) => write!(f, "{} <truncated>", opcode.mnemonic()),
            Decoded::Unknown(byte) => write!(f, "Unknown opcode 0x{:02X}", byte),
        }
    }
}

/// Lazy iterator over every instruction in a chunk
pub struct Disassembler<'a> {
    chunk: &'a Chunk,
    offset: usize,
    previous_line: Option<usize>,
}

impl<'a> Disassembler<'a> {
    pub fn new(chunk: &'a Chunk) -> Self {
        Disassembler {
            chunk,
            offset: 0,
            previous_line: None,
        }
    }
}

impl Iterator for Disassembler<'_> {
    type Item = DisassembledInstruction;

    fn next(&mut self) -> Option<Self::Item> {
        let mut row = DisassembledInstruction::at(self.chunk, self.offset)?;

        let line = self.chunk.line_at(self.offset);
        if line.is_some() && line == self.previous_line {
            row.line = LineMarker::Continuation;
        }
        self.previous_line = line;
        self.offset = row.next_offset;

        Some(row)
    }
}

/// Render a whole chunk under a `== name ==` header.
pub fn disassemble_chunk(chunk: &Chunk, name: &str) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = writeln!(out, "== {} ==", name);
    for row in Disassembler::new(chunk) {
        let _ = writeln!(out, "{}", row);
    }
    out
}
