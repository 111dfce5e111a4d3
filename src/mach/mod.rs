/*!
## Rust Machine Module

This Rust module is the stack machine and the runtime that drives it.

*/

mod listing;
mod machine;
mod memory;
mod opcode;
mod operation;
mod program;
mod runtime;
mod stack;

pub use listing::Listing;
pub use machine::Machine;
pub use machine::{MEMORY_SIZE, STACK_SIZE};
pub use memory::Memory;
pub use opcode::Opcode;
pub use operation::Operation;
pub use program::Program;
pub use runtime::Event;
pub use runtime::Runtime;
pub use stack::Stack;

pub use crate::lang::Address;

#[cfg(test)]
mod tests;
