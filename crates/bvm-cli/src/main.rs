//! Bytecode Virtual Machine - CLI
//!
//! Builds a demo chunk, prints its disassembly and runs it.
//! Flags: --program constant|arithmetic, --trace, --stack-size N

use std::env;
use std::process;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bvm_core::{disassemble_chunk, BvmResult, Chunk, OpCode, Value, VirtualMachine, VmConfig};

struct Options {
    program: String,
    trace: bool,
    stack_size: Option<usize>,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let program_name = args.first().map(String::as_str).unwrap_or("bvm-cli");

    let options = match parse_args(args.get(1..).unwrap_or(&[])) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            print_usage(program_name);
            process::exit(2);
        }
    };

    init_logging(options.trace);

    let chunk = match build_program(&options.program) {
        Some(Ok(chunk)) => chunk,
        Some(Err(e)) => {
            error!(error = %e, "failed to build chunk");
            process::exit(1);
        }
        None => {
            eprintln!("Error: unknown program '{}'", options.program);
            print_usage(program_name);
            process::exit(2);
        }
    };

    print!("{}", disassemble_chunk(&chunk, &options.program));

    let mut config = VmConfig::new().with_trace_execution(options.trace);
    if let Some(size) = options.stack_size {
        config = config.with_max_stack_size(size);
    }
    let mut vm = VirtualMachine::new(config);

    if let Err(fault) = vm.run(&chunk) {
        eprintln!("Runtime error: {}", fault);
        process::exit(1);
    }

    match vm.peek_top() {
        Some(value) => println!("{}", value),
        None => info!("program returned with an empty stack"),
    }
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        program: "constant".to_string(),
        trace: false,
        stack_size: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--trace" => options.trace = true,
            "--program" => {
                i += 1;
                options.program = args
                    .get(i)
                    .ok_or("--program needs a name")?
                    .clone();
            }
            "--stack-size" => {
                i += 1;
                let raw = args.get(i).ok_or("--stack-size needs a number")?;
                let size = raw
                    .parse::<usize>()
                    .map_err(|_| format!("invalid stack size '{}'", raw))?;
                options.stack_size = Some(size);
            }
            other => return Err(format!("unrecognized argument '{}'", other)),
        }
        i += 1;
    }

    Ok(options)
}

/// RUST_LOG wins when set; otherwise `info`, or `trace` with --trace.
fn init_logging(trace: bool) {
    let default = if trace { "trace" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_program(name: &str) -> Option<BvmResult<Chunk>> {
    match name {
        "constant" => Some(constant_program()),
        "arithmetic" => Some(arithmetic_program()),
        _ => None,
    }
}

/// `1.2`, returned
fn constant_program() -> BvmResult<Chunk> {
    let mut chunk = Chunk::new();
    let constant = chunk.add_constant(Value::Number(1.2))?;
    chunk.write_opcode(OpCode::Constant, 123)?;
    chunk.write(constant as u8, 123)?;
    chunk.write_opcode(OpCode::Return, 123)?;
    Ok(chunk)
}

/// `-((1.2 + 3.4) / 5.6)`, returned
fn arithmetic_program() -> BvmResult<Chunk> {
    let mut chunk = Chunk::new();
    chunk.write_constant(Value::Number(1.2), 123)?;
    chunk.write_constant(Value::Number(3.4), 123)?;
    chunk.write_opcode(OpCode::Add, 123)?;
    chunk.write_constant(Value::Number(5.6), 123)?;
    chunk.write_opcode(OpCode::Divide, 123)?;
    chunk.write_opcode(OpCode::Negate, 123)?;
    chunk.write_opcode(OpCode::Return, 123)?;
    Ok(chunk)
}

fn print_usage(program: &str) {
    eprintln!("Bytecode Virtual Machine (BVM)");
    eprintln!(
        "Usage: {} [--program constant|arithmetic] [--trace] [--stack-size N]",
        program
    );
}
