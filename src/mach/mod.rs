/*!
## Rust Machine Module

This Rust module evaluates expressions and executes statements
directly from the program text. Nothing is compiled ahead of time.

*/

mod array;
mod config;
mod console;
mod evaluator;
mod function;
mod operation;
mod runtime;
mod stack;
mod val;
mod var;

pub use array::Array;
pub use config::Config;
pub use console::advance_hpos;
pub use console::Console;
pub use evaluator::Evaluator;
pub use evaluator::FunctionDef;
pub use evaluator::Target;
pub use evaluator::INITIAL_SEED;
pub use function::Function;
pub use operation::Operation;
pub use runtime::Runtime;
pub use stack::Stack;
pub use val::format_number;
pub use val::Val;
pub use var::Var;

#[cfg(test)]
mod tests;
