//! # stepbasic
//!
//! Runs a line-numbered BASIC program from a file.
//!

mod term;

fn main() {
    term::main()
}
