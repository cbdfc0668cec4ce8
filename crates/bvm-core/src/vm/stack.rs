//! VM Stack Implementation
//!
//! Bounded operand stack for VM execution.
//! No execution semantics.

use crate::error::FaultKind;
use super::value::Value;

/// Slots allocated up front; deeper stacks grow on demand
const INITIAL_CAPACITY: usize = 256;

/// VM operand stack
#[derive(Debug)]
pub struct Stack {
    values: Vec<Value>,
    max_size: usize,
}

impl Stack {
    /// Create new stack with maximum size
    pub fn new(max_size: usize) -> Self {
        Stack {
            values: Vec::with_capacity(max_size.min(INITIAL_CAPACITY)),
            max_size,
        }
    }

    /// Push value onto stack
    pub fn push(&mut self, value: Value) -> Result<(), FaultKind> {
        if self.values.len() >= self.max_size {
            return Err(FaultKind::StackOverflow);
        }
        // an allocation the host cannot satisfy ends the run the same way
        self.values
            .try_reserve(1)
            .map_err(|_| FaultKind::StackOverflow)?;
        self.values.push(value);
        Ok(())
    }

    /// Pop value from stack
    pub fn pop(&mut self) -> Result<Value, FaultKind> {
        self.values.pop().ok_or(FaultKind::StackUnderflow)
    }

    /// Peek at top of stack without removing
    pub fn peek(&self) -> Result<&Value, FaultKind> {
        self.values.last().ok_or(FaultKind::StackUnderflow)
    }

    /// Get current stack size
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Check if stack is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bottom-to-top view of the live values
    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    /// Clear stack
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_respects_max_size() {
        let mut stack = Stack::new(2);
        stack.push(Value::Number(1.0)).unwrap();
        stack.push(Value::Number(2.0)).unwrap();
        assert_eq!(stack.push(Value::Number(3.0)), Err(FaultKind::StackOverflow));
        assert_eq!(stack.size(), 2);
    }

    #[test]
    fn unbounded_limit_allocates_lazily() {
        let mut stack = Stack::new(usize::MAX);
        for i in 0..300 {
            stack.push(Value::Number(i as f64)).unwrap();
        }
        assert_eq!(stack.size(), 300);
        assert_eq!(stack.peek(), Ok(&Value::Number(299.0)));
    }

    #[test]
    fn pop_on_empty_is_underflow() {
        let mut stack = Stack::new(4);
        assert_eq!(stack.pop(), Err(FaultKind::StackUnderflow));
        assert_eq!(stack.peek(), Err(FaultKind::StackUnderflow));

        stack.push(Value::Number(5.0)).unwrap();
        assert_eq!(stack.peek(), Ok(&Value::Number(5.0)));
        assert_eq!(stack.pop(), Ok(Value::Number(5.0)));
        assert!(stack.is_empty());
    }
}
