//! # Charless
//!
//! Command line driver for the Charless stack machine.
//!

fn main() {
    charless::term::main();
}
