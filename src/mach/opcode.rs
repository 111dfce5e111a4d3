use super::Address;

/// ## Virtual machine instruction set
///
/// The Charless machine has no registers.
/// Every operation is performed on the operand stack,
/// with `Store` and `Load` moving values to and from memory.
///
/// For example: `memory[0] = 10` is `[Push(10), Push(0), Store]`
///
/// Jump targets are byte offsets into the bytecode text,
/// resolved to instruction indices when the program is linked.

#[derive(Clone, PartialEq)]
pub enum Opcode {
    // *** Control
    /// Stop the program normally.
    Halt,

    // *** Output
    /// Print literal text carried by the instruction.
    PrintStr(String),
    /// Pop and print as a decimal integer.
    PrintNum,
    /// Pop and print the low byte as a character.
    PrintChar,
    PrintNewline,

    // *** Input
    /// Push the next input character code, or -1 at end of input.
    InputChar,
    /// Read an integer from input and push it.
    InputNum,

    // *** Stack and memory
    Push(i64),
    Pop,
    /// Pop address, pop value, write memory. Out of range is ignored.
    Store,
    /// Pop address, push memory value. Out of range reads 0.
    Load,

    // *** Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // *** Branch control
    Jump(Address),
    /// Pop stack and branch to Address if zero.
    JumpIfZero(Address),
    /// Pop stack and branch to Address if not zero.
    JumpIfNotZero(Address),

    // *** Comparison, pushes 1 or 0
    Eq,
    Gt,
    Lt,
    GtEq,
    LtEq,
}

impl Opcode {
    /// Decode a numeric opcode that takes no inline operand.
    pub fn from_code(code: u16) -> Option<Opcode> {
        use Opcode::*;
        Some(match code {
            0 => Halt,
            20 => PrintNum,
            40 => PrintChar,
            100 => InputChar,
            101 => InputNum,
            210 => PrintNewline,
            501 => Pop,
            510 => Store,
            511 => Load,
            600 => Add,
            601 => Sub,
            602 => Mul,
            603 => Div,
            604 => Mod,
            801 => Eq,
            802 => Gt,
            803 => Lt,
            804 => GtEq,
            805 => LtEq,
            _ => return None,
        })
    }

    pub fn code(&self) -> u16 {
        use Opcode::*;
        match self {
            Halt => 0,
            PrintStr(_) => 10,
            PrintNum => 20,
            PrintChar => 40,
            InputChar => 100,
            InputNum => 101,
            PrintNewline => 210,
            Push(_) => 500,
            Pop => 501,
            Store => 510,
            Load => 511,
            Add => 600,
            Sub => 601,
            Mul => 602,
            Div => 603,
            Mod => 604,
            Jump(_) => 700,
            JumpIfZero(_) => 701,
            JumpIfNotZero(_) => 702,
            Eq => 801,
            Gt => 802,
            Lt => 803,
            GtEq => 804,
            LtEq => 805,
        }
    }

    pub fn target(&self) -> Option<Address> {
        match self {
            Opcode::Jump(a) | Opcode::JumpIfZero(a) | Opcode::JumpIfNotZero(a) => Some(*a),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string())
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Opcode::*;
        match self {
            Halt => write!(f, "HALT"),

            PrintStr(s) => write!(f, "PRINT_STR({:?})", s),
            PrintNum => write!(f, "PRINT_NUM"),
            PrintChar => write!(f, "PRINT_CHAR"),
            PrintNewline => write!(f, "PRINT_NEWLINE"),

            InputChar => write!(f, "INPUT_CHAR"),
            InputNum => write!(f, "INPUT_NUM"),

            Push(v) => write!(f, "PUSH({})", v),
            Pop => write!(f, "POP"),
            Store => write!(f, "STORE"),
            Load => write!(f, "LOAD"),

            Add => write!(f, "ADD"),
            Sub => write!(f, "SUB"),
            Mul => write!(f, "MUL"),
            Div => write!(f, "DIV"),
            Mod => write!(f, "MOD"),

            Jump(a) => write!(f, "JUMP({})", a),
            JumpIfZero(a) => write!(f, "JZ({})", a),
            JumpIfNotZero(a) => write!(f, "JNZ({})", a),

            Eq => write!(f, "EQ"),
            Gt => write!(f, "GT"),
            Lt => write!(f, "LT"),
            GtEq => write!(f, "GTE"),
            LtEq => write!(f, "LTE"),
        }
    }
}
