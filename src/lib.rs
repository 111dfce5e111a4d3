//! # Charless
//!
//! A bounds-checked integer stack machine with a flat load/store memory,
//! and a runtime for the digit-only Charless bytecode that drives it.
//!
//! Run a program with `charless run hello.cless` or list its
//! instructions with `charless list hello.cless`.
//! ```text
//! $ charless run hello.cless
//! Hello, World!
//! ```
//!
//! The machine can also be driven directly:
//! ```
//! use charless::mach::Machine;
//!
//! let mut m = Machine::new();
//! m.push(10).unwrap();
//! m.push(0).unwrap();
//! let addr = m.pop().unwrap();
//! let val = m.pop().unwrap();
//! m.store(addr, val);
//! assert_eq!(m.load(0), 10);
//! assert_eq!(m.load(-1), 0);
//! ```

pub mod lang;
pub mod mach;
pub mod term;
