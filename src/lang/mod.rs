/*!
# Rust Language Module

This Rust module provides lexical analysis of the BASIC language.
Lexing is positional: the tokenizer works directly on the program
text and can be moved to any offset in it.

*/

#[macro_use]
mod error;
mod lex;

pub mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::Tokenizer;
pub use lex::MAX_NUMBER_LEN;

/// A line number, or `None` before the first numbered line is reached.
pub type LineNumber = Option<u16>;
