use super::{Listing, Opcode};
use crate::error;
use crate::lang::{lex, Address, Error};
use std::collections::HashMap;
use tracing::debug;

type Result<T> = std::result::Result<T, Error>;

/// ## Linked instruction array
///
/// Each instruction keeps the byte offset it was decoded from. Those
/// offsets are the labels jumps refer to. The end of the code is also
/// a label and means "fall off the end".

#[derive(Debug, Default)]
pub struct Program {
    ops: Vec<Opcode>,
    addrs: Vec<Address>,
    labels: HashMap<Address, usize>,
    end: Address,
}

impl Program {
    pub fn new(end: Address) -> Program {
        Program {
            end,
            ..Program::default()
        }
    }

    /// Decode and link Charless bytecode.
    pub fn compile(code: &str) -> Result<Program> {
        let mut program = Program::new(code.trim().len());
        for (addr, op) in lex(code)? {
            program.push(addr, op);
        }
        program.link()?;
        Ok(program)
    }

    pub fn push(&mut self, addr: Address, op: Opcode) {
        debug_assert!(addr < self.end);
        self.labels.insert(addr, self.ops.len());
        self.addrs.push(addr);
        self.ops.push(op);
    }

    /// Verify every jump lands on an instruction or the end of the code.
    pub fn link(&self) -> Result<()> {
        for (addr, op) in self.iter() {
            if let Some(target) = op.target() {
                if self.resolve(target).is_none() {
                    return Err(error!(UndefinedLabel, addr));
                }
            }
        }
        debug!(ops = self.ops.len(), bytes = self.end, "program linked");
        Ok(())
    }

    /// Instruction index for a label.
    pub fn resolve(&self, target: Address) -> Option<usize> {
        if target == self.end {
            Some(self.ops.len())
        } else {
            self.labels.get(&target).copied()
        }
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn op(&self, index: usize) -> Option<&Opcode> {
        self.ops.get(index)
    }

    /// Byte offset of an instruction, or the end of the code past the last one.
    pub fn address(&self, index: usize) -> Address {
        self.addrs.get(index).copied().unwrap_or(self.end)
    }

    pub fn end(&self) -> Address {
        self.end
    }

    pub fn iter(&self) -> impl Iterator<Item = (Address, &Opcode)> {
        self.addrs.iter().copied().zip(self.ops.iter())
    }

    pub fn listing(&self) -> Listing<'_> {
        Listing::new(self)
    }
}
