extern crate ansi_term;
extern crate ctrlc;
use crate::lang::Error;
use crate::mach::{Event, Machine, Program, Runtime, MEMORY_SIZE, STACK_SIZE};
use ansi_term::Style;
use clap::{Parser, Subcommand};
use std::io::{IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

mod input;
use input::Input;

/// Largest `--memory-size` accepted. Memory is allocated up front.
const MEMORY_LIMIT: u64 = 1 << 24;

#[derive(Parser, Debug)]
#[command(name = "charless", version)]
#[command(about = "Run Charless bytecode on a bounded stack machine")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Execute a bytecode file
    Run {
        /// Bytecode file, `-` reads it from stdin
        file: PathBuf,

        /// Operand stack slots
        #[arg(long, default_value_t = STACK_SIZE)]
        stack_size: usize,

        /// Memory cells
        #[arg(
            long,
            default_value_t = MEMORY_SIZE,
            value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(0..=MEMORY_LIMIT)
        )]
        memory_size: usize,

        /// Instructions executed between Ctrl-C checks
        #[arg(long, default_value_t = 5000)]
        cycles: usize,
    },
    /// Print the disassembly of a bytecode file
    List {
        /// Bytecode file, `-` reads it from stdin
        file: PathBuf,
    },
}

/// Use `RUST_LOG` to override the default `warn` filter.
/// Logs go to stderr so stdout only carries program output.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

pub fn main() {
    init_logging();
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(error) => {
            let _ = error.print();
            std::process::exit(if error.use_stderr() { 1 } else { 0 });
        }
    };
    let code = match main_loop(args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{}", error);
            1
        }
    };
    std::process::exit(code);
}

fn main_loop(args: Args) -> std::io::Result<i32> {
    match args.command {
        Command::Run {
            file,
            stack_size,
            memory_size,
            cycles,
        } => {
            let interrupted = Arc::new(AtomicBool::new(false));
            let int_moved = interrupted.clone();
            ctrlc::set_handler(move || {
                int_moved.store(true, Ordering::SeqCst);
            })
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            let program = match compile(&file)? {
                Ok(program) => program,
                Err(error) => return Ok(report(&error)),
            };
            let machine = Machine::with_capacity(stack_size, memory_size);
            let mut runtime = Runtime::with_machine(program, machine);
            let mut input = if is_stdin(&file) {
                Input::Closed
            } else {
                Input::open(interrupted.clone())?
            };
            run(&mut runtime, &mut input, cycles.max(1), &interrupted)
        }
        Command::List { file } => {
            let program = match compile(&file)? {
                Ok(program) => program,
                Err(error) => return Ok(report(&error)),
            };
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            write!(out, "{}", program.listing())?;
            out.flush()?;
            Ok(0)
        }
    }
}

fn run(
    runtime: &mut Runtime,
    input: &mut Input,
    cycles: usize,
    interrupted: &AtomicBool,
) -> std::io::Result<i32> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    loop {
        if interrupted.swap(false, Ordering::SeqCst) {
            runtime.interrupt();
        }
        match runtime.execute(cycles) {
            Event::Running => {}
            Event::Print(s) => out.write_all(s.as_bytes())?,
            Event::PrintByte(b) => out.write_all(&[b])?,
            Event::Input => {
                out.flush()?;
                match input.read_line()? {
                    Some(line) => runtime.enter(&line),
                    None => runtime.close_input(),
                }
            }
            Event::Stopped => {
                out.flush()?;
                debug!("program stopped");
                return Ok(0);
            }
            Event::Error(error) => {
                out.flush()?;
                return Ok(report(&error));
            }
        }
    }
}

fn is_stdin(file: &Path) -> bool {
    file.as_os_str() == "-"
}

fn compile(file: &Path) -> std::io::Result<Result<Program, Error>> {
    let source = if is_stdin(file) {
        let mut s = String::new();
        std::io::stdin().read_to_string(&mut s)?;
        s
    } else {
        std::fs::read_to_string(file)?
    };
    let program = Program::compile(&source);
    if let Ok(program) = &program {
        debug!(file = %file.display(), ops = program.len(), "loaded");
    }
    Ok(program)
}

/// Writes the diagnostic to stderr and gives the exit code.
fn report(error: &Error) -> i32 {
    let stderr = std::io::stderr();
    if stderr.is_terminal() {
        eprintln!("{}", Style::new().bold().paint(error.to_string()));
    } else {
        eprintln!("{}", error);
    }
    1
}
