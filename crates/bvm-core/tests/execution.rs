use bvm_core::{disassemble_chunk, Chunk, FaultKind, OpCode, Value, VirtualMachine, VmConfig};

// Demo chunk: one constant, then return.
fn test_chunk(line: usize) -> Chunk {
    let mut chunk = Chunk::new();
    let constant = chunk.add_constant(Value::Number(1.2)).expect("add constant");
    assert_eq!(constant, 0);
    chunk.write_opcode(OpCode::Constant, line).unwrap();
    chunk.write(constant as u8, line).unwrap();
    chunk.write_opcode(OpCode::Return, line).unwrap();
    chunk
}

#[test]
fn constant_round_trip() {
    let chunk = test_chunk(123);
    let mut vm = VirtualMachine::new(VmConfig::new());

    vm.run(&chunk).expect("execution failed");
    assert_eq!(vm.stack(), &[Value::Number(1.2)]);
}

#[test]
fn unrecognized_opcode_faults_cleanly() {
    let mut chunk = Chunk::new();
    chunk.write(0xC8, 1).unwrap();

    let mut vm = VirtualMachine::new(VmConfig::new());
    let fault = vm.run(&chunk).expect_err("expected a decode fault");
    assert_eq!(fault.offset, 0);
    assert_eq!(fault.line, Some(1));
    assert_eq!(fault.kind, FaultKind::InvalidOpcode(0xC8));
    assert!(vm.stack().is_empty());
}

#[test]
fn negate_on_empty_stack_is_a_fault() {
    let mut chunk = Chunk::new();
    chunk.write_opcode(OpCode::Negate, 1).unwrap();

    let mut vm = VirtualMachine::new(VmConfig::new());
    let fault = vm.run(&chunk).expect_err("expected underflow");
    assert_eq!(fault.offset, 0);
    assert_eq!(fault.kind, FaultKind::StackUnderflow);
}

#[test]
fn fault_does_not_leak_into_next_run() {
    let mut bad = Chunk::new();
    bad.write_constant(Value::Number(9.0), 1).unwrap();
    bad.write(0xAA, 2).unwrap();

    let mut vm = VirtualMachine::new(VmConfig::new());
    assert!(vm.run(&bad).is_err());
    assert!(vm.stack().is_empty());

    vm.run(&test_chunk(1)).unwrap();
    assert_eq!(vm.stack(), &[Value::Number(1.2)]);
}

#[test]
fn evaluates_nested_arithmetic() {
    // -((1.2 + 3.4) / 5.6)
    let mut chunk = Chunk::new();
    chunk.write_constant(Value::Number(1.2), 123).unwrap();
    chunk.write_constant(Value::Number(3.4), 123).unwrap();
    chunk.write_opcode(OpCode::Add, 123).unwrap();
    chunk.write_constant(Value::Number(5.6), 123).unwrap();
    chunk.write_opcode(OpCode::Divide, 123).unwrap();
    chunk.write_opcode(OpCode::Negate, 123).unwrap();
    chunk.write_opcode(OpCode::Return, 123).unwrap();

    let mut vm = VirtualMachine::new(VmConfig::new());
    vm.run(&chunk).unwrap();
    assert_eq!(vm.stack(), &[Value::Number(-((1.2 + 3.4) / 5.6))]);
}

#[test]
fn long_constants_execute() {
    let mut chunk = Chunk::new();
    for i in 0..300 {
        chunk.add_constant(Value::Number(i as f64)).unwrap();
    }
    let index = chunk.write_constant(Value::Number(42.5), 7).unwrap();
    assert_eq!(index, 300);
    chunk.write_opcode(OpCode::Return, 7).unwrap();

    let mut vm = VirtualMachine::new(VmConfig::new());
    vm.run(&chunk).unwrap();
    assert_eq!(vm.peek_top(), Some(Value::Number(42.5)));
}

#[test]
fn running_does_not_change_disassembly() {
    let chunk = test_chunk(5);
    let before = disassemble_chunk(&chunk, "test chunk");

    let mut vm = VirtualMachine::new(VmConfig::new().with_trace_execution(true));
    vm.run(&chunk).unwrap();

    assert_eq!(disassemble_chunk(&chunk, "test chunk"), before);
}
