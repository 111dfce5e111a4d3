/*!
# Rust Language Module

This Rust module decodes Charless bytecode text into machine instructions.

*/

/// Byte offset into the trimmed bytecode text.
pub type Address = usize;

#[macro_use]
mod error;
mod lex;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::lex;
