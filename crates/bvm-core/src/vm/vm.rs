//! Virtual Machine Core
//!
//! Fetch-decode-dispatch loop over a borrowed [`Chunk`]. The VM owns its
//! operand stack and instruction pointer; the chunk is only read.

use tracing::{debug, trace};

use crate::bytecode::instruction::read_le;
use crate::bytecode::{Chunk, OpCode};
use crate::config::VmConfig;
use crate::debug::DisassembledInstruction;
use crate::error::{Fault, FaultKind};

use super::stack::Stack;
use super::value::Value;

/// Bytecode Virtual Machine
#[derive(Debug)]
pub struct VirtualMachine {
    config: VmConfig,
    stack: Stack,
    ip: usize,
    halted: bool,
}

impl VirtualMachine {
    /// Create a new VM instance
    pub fn new(config: VmConfig) -> Self {
        VirtualMachine {
            stack: Stack::new(config.max_stack_size),
            ip: 0,
            halted: false,
            config,
        }
    }

    /// Execute `chunk` from offset 0 until `Return` or a fault.
    ///
    /// The stack is reset before execution. On success it is left as the
    /// program left it; on a fault it is cleared.
    pub fn run(&mut self, chunk: &Chunk) -> Result<(), Fault> {
        self.ip = 0;
        self.halted = false;
        self.stack.clear();

        debug!(
            code_len = chunk.len(),
            constants = chunk.constants().len(),
            "run started"
        );

        match self.execute(chunk) {
            Ok(()) => {
                debug!(stack_depth = self.stack.size(), "run finished");
                Ok(())
            }
            Err(fault) => {
                self.halted = true;
                self.stack.clear();
                debug!(
                    offset = fault.offset,
                    line = ?fault.line,
                    kind = %fault.kind,
                    "run faulted"
                );
                Err(fault)
            }
        }
    }

    /// Operand stack, bottom to top
    pub fn stack(&self) -> &[Value] {
        self.stack.as_slice()
    }

    /// Value on top of the operand stack, if any
    pub fn peek_top(&self) -> Option<Value> {
        self.stack.peek().ok().copied()
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Byte offset of the next instruction to fetch
    pub fn ip(&self) -> usize {
        self.ip
    }

    pub fn config(&self) -> &VmConfig {
        &self.config
    }

    fn execute(&mut self, chunk: &Chunk) -> Result<(), Fault> {
        while !self.halted {
            let start = self.ip;
            if self.config.trace_execution {
                self.trace_instruction(chunk, start);
            }

            self.step(chunk).map_err(|kind| {
                // past-the-end faults report the last recorded line
                let line = chunk
                    .line_at(start)
                    .or_else(|| chunk.lines().last().copied());
                Fault::new(start, line, kind)
            })?;
        }
        Ok(())
    }

    /// Execute a single instruction
    fn step(&mut self, chunk: &Chunk) -> Result<(), FaultKind> {
        let opcode_byte = self
            .read_u8(chunk)
            .ok_or(FaultKind::UnexpectedEndOfCode)?;
        let opcode = OpCode::from_u8(opcode_byte)
            .ok_or(FaultKind::InvalidOpcode(opcode_byte))?;
        let operand = self.read_operand(chunk, opcode)?;

        match opcode {
            OpCode::Constant | OpCode::ConstantLong => {
                let index = operand as usize;
                let value = chunk
                    .constants()
                    .get(index)
                    .ok_or(FaultKind::InvalidConstant(index))?;
                self.stack.push(value)
            }
            OpCode::Return => {
                self.halted = true;
                Ok(())
            }

            // Arithmetic
            OpCode::Negate => {
                let value = self.stack.pop()?;
                self.stack.push(Value::Number(-value.as_number()))
            }
            OpCode::Add => self.binary_op(|a, b| a + b),
            OpCode::Subtract => self.binary_op(|a, b| a - b),
            OpCode::Multiply => self.binary_op(|a, b| a * b),
            OpCode::Divide => self.binary_op(|a, b| a / b),
        }
    }

    /// Pop `b` then `a`, push `op(a, b)`
    fn binary_op(&mut self, op: fn(f64, f64) -> f64) -> Result<(), FaultKind> {
        let b = self.stack.pop()?;
        let a = self.stack.pop()?;
        self.stack.push(Value::Number(op(a.as_number(), b.as_number())))
    }

    /// Read next byte from instruction stream
    fn read_u8(&mut self, chunk: &Chunk) -> Option<u8> {
        let byte = *chunk.code().get(self.ip)?;
        self.ip += 1;
        Some(byte)
    }

    /// Read the operand bytes `opcode` carries (0 when it has none)
    fn read_operand(&mut self, chunk: &Chunk, opcode: OpCode) -> Result<u32, FaultKind> {
        let width = opcode.operand_len();
        let bytes = chunk
            .code()
            .get(self.ip..self.ip + width)
            .ok_or(FaultKind::TruncatedInstruction)?;
        self.ip += width;
        Ok(read_le(bytes))
    }

    fn trace_instruction(&self, chunk: &Chunk, offset: usize) {
        if let Some(row) = DisassembledInstruction::at(chunk, offset) {
            trace!(stack = ?self.stack.as_slice(), "{}", row);
        }
    }
}
