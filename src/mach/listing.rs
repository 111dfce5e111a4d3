use super::Program;

/// Disassembly of a linked program, one instruction per line:
/// byte offset, numeric opcode, mnemonic.
#[derive(Debug, Clone, Copy)]
pub struct Listing<'a> {
    program: &'a Program,
}

impl<'a> Listing<'a> {
    pub fn new(program: &'a Program) -> Listing<'a> {
        Listing { program }
    }
}

impl std::fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (addr, op) in self.program.iter() {
            writeln!(f, "{:>6}  {:03}  {}", addr, op.code(), op)?;
        }
        writeln!(f, "{:>6}  END", self.program.end())
    }
}
