use super::{Machine, Opcode, Operation, Program};
use crate::error;
use crate::lang::Error;
use std::collections::VecDeque;
use tracing::trace;

type Result<T> = std::result::Result<T, Error>;

/// ## Dispatch loop
///
/// Runs a linked program against its own machine. The driver calls
/// `execute` repeatedly and reacts to each `Event`.

pub struct Runtime {
    program: Program,
    machine: Machine,
    pc: usize,
    input: VecDeque<u8>,
    input_closed: bool,
    interrupted: bool,
    stopped: bool,
}

/// Returned by `Runtime::execute`.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Program ended normally. Further calls keep returning this.
    Stopped,
    /// Cycle budget used up; call `execute` again.
    Running,
    Print(String),
    /// One raw byte, written unchanged.
    PrintByte(u8),
    /// An input instruction is waiting. Supply a line with `enter`
    /// or signal end of input with `close_input`.
    Input,
    /// Fatal error. The runtime is stopped afterwards.
    Error(Error),
}

impl Runtime {
    pub fn new(program: Program) -> Runtime {
        Runtime::with_machine(program, Machine::default())
    }

    pub fn with_machine(program: Program, machine: Machine) -> Runtime {
        Runtime {
            program,
            machine,
            pc: 0,
            input: VecDeque::new(),
            input_closed: false,
            interrupted: false,
            stopped: false,
        }
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Queue one line of input as bytes. A newline is appended.
    pub fn enter(&mut self, line: &str) {
        self.input.extend(line.bytes());
        self.input.push_back(b'\n');
    }

    /// No more input will arrive. Character reads see -1 from now on.
    pub fn close_input(&mut self) {
        self.input_closed = true;
    }

    pub fn interrupt(&mut self) {
        self.interrupted = true;
    }

    /// Start over with an empty stack, zeroed memory and no input.
    pub fn reset(&mut self) {
        self.machine.clear();
        self.pc = 0;
        self.input.clear();
        self.input_closed = false;
        self.interrupted = false;
        self.stopped = false;
    }

    pub fn execute(&mut self, cycles: usize) -> Event {
        if self.stopped {
            return Event::Stopped;
        }
        if self.interrupted {
            self.interrupted = false;
            self.stopped = true;
            return Event::Error(error!(Interrupted, self.program.address(self.pc)));
        }
        for _ in 0..cycles {
            let index = self.pc;
            match self.step() {
                Ok(None) => continue,
                Ok(Some(event)) => {
                    if event == Event::Stopped {
                        self.stopped = true;
                    }
                    return event;
                }
                Err(error) => {
                    self.stopped = true;
                    return Event::Error(error.at_address(self.program.address(index)));
                }
            }
        }
        Event::Running
    }

    fn step(&mut self) -> Result<Option<Event>> {
        let index = self.pc;
        let op = match self.program.op(index) {
            Some(op) => op.clone(),
            None => return Ok(Some(Event::Stopped)),
        };
        trace!(address = self.program.address(index), op = %op);
        self.pc += 1;
        match op {
            Opcode::Halt => return Ok(Some(Event::Stopped)),

            Opcode::PrintStr(s) => return Ok(Some(Event::Print(s))),
            Opcode::PrintNum => {
                let val = self.machine.pop()?;
                return Ok(Some(Event::Print(val.to_string())));
            }
            Opcode::PrintChar => {
                let val = self.machine.pop()?;
                return Ok(Some(Event::PrintByte(val as u8)));
            }
            Opcode::PrintNewline => return Ok(Some(Event::Print("\n".to_string()))),

            Opcode::InputChar => match self.input.pop_front() {
                Some(byte) => self.machine.push(byte as i64)?,
                None if self.input_closed => self.machine.push(-1)?,
                None => {
                    self.pc = index;
                    return Ok(Some(Event::Input));
                }
            },
            Opcode::InputNum => match self.read_number() {
                Some(n) => self.machine.push(n)?,
                None if self.input_closed => self.machine.push(0)?,
                None => {
                    self.pc = index;
                    return Ok(Some(Event::Input));
                }
            },

            Opcode::Push(val) => self.machine.push(val)?,
            Opcode::Pop => {
                self.machine.pop()?;
            }
            Opcode::Store => {
                let addr = self.machine.pop()?;
                let val = self.machine.pop()?;
                self.machine.store(addr, val);
            }
            Opcode::Load => {
                let addr = self.machine.pop()?;
                let val = self.machine.load(addr);
                self.machine.push(val)?;
            }

            Opcode::Add => self.binary(|a, b| Ok(Operation::sum(a, b)))?,
            Opcode::Sub => self.binary(|a, b| Ok(Operation::subtract(a, b)))?,
            Opcode::Mul => self.binary(|a, b| Ok(Operation::multiply(a, b)))?,
            Opcode::Div => self.binary(Operation::divide)?,
            Opcode::Mod => self.binary(Operation::remainder)?,

            Opcode::Jump(target) => self.jump(target)?,
            Opcode::JumpIfZero(target) => {
                let flag = self.machine.pop()?;
                if Machine::branch_if_zero(flag) {
                    self.jump(target)?;
                }
            }
            Opcode::JumpIfNotZero(target) => {
                let flag = self.machine.pop()?;
                if !Machine::branch_if_zero(flag) {
                    self.jump(target)?;
                }
            }

            Opcode::Eq => self.compare(Machine::compare_equal)?,
            Opcode::Gt => self.compare(Machine::compare_greater)?,
            Opcode::Lt => self.compare(Machine::compare_less)?,
            Opcode::GtEq => self.compare(Machine::compare_greater_or_equal)?,
            Opcode::LtEq => self.compare(Machine::compare_less_or_equal)?,
        }
        Ok(None)
    }

    fn binary(&mut self, f: impl Fn(i64, i64) -> Result<i64>) -> Result<()> {
        let (a, b) = self.machine.pop_2()?;
        self.machine.push(f(a, b)?)
    }

    fn compare(&mut self, f: fn(i64, i64) -> bool) -> Result<()> {
        let (a, b) = self.machine.pop_2()?;
        self.machine.push(Operation::truth(f(a, b)))
    }

    fn jump(&mut self, target: usize) -> Result<()> {
        match self.program.resolve(target) {
            Some(index) => {
                self.pc = index;
                Ok(())
            }
            None => Err(error!(UndefinedLabel)),
        }
    }

    /// Reads an optionally signed integer after skipping whitespace.
    /// `None` means the buffer ran dry first. Unparsable input throws
    /// away the rest of its line and reads as 0.
    fn read_number(&mut self) -> Option<i64> {
        while let Some(byte) = self.input.front() {
            if byte.is_ascii_whitespace() {
                self.input.pop_front();
            } else {
                break;
            }
        }
        if self.input.is_empty() {
            return None;
        }
        let mut s = String::new();
        if let Some(&byte) = self.input.front() {
            if byte == b'-' || byte == b'+' {
                s.push(byte as char);
                self.input.pop_front();
            }
        }
        while let Some(&byte) = self.input.front() {
            if !byte.is_ascii_digit() {
                break;
            }
            s.push(byte as char);
            self.input.pop_front();
        }
        match s.parse() {
            Ok(n) => Some(n),
            Err(_) => {
                while let Some(byte) = self.input.pop_front() {
                    if byte == b'\n' {
                        break;
                    }
                }
                Some(0)
            }
        }
    }
}
