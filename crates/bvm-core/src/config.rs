//! VM Configuration
//!
//! Runtime limits and diagnostics switches for the virtual machine.
//! Configuration specifies constraints only; enforcement is handled by the VM.

/// Default operand stack depth
pub const DEFAULT_STACK_SIZE: usize = 256;

/// VM Configuration
#[derive(Debug, Clone)]
pub struct VmConfig {
    /// Maximum operand stack depth
    pub max_stack_size: usize,

    /// Emit a TRACE event with the stack and disassembly before each instruction
    pub trace_execution: bool,
}

impl Default for VmConfig {
    fn default() -> Self {
        VmConfig {
            max_stack_size: DEFAULT_STACK_SIZE,
            trace_execution: false,
        }
    }
}

impl VmConfig {
    /// Create a new configuration with default limits
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_stack_size(mut self, max_stack_size: usize) -> Self {
        self.max_stack_size = max_stack_size;
        self
    }

    pub fn with_trace_execution(mut self, enabled: bool) -> Self {
        self.trace_execution = enabled;
        self
    }
}
