//! # stepbasic
//!
//! A line-numbered BASIC that executes straight from the program text,
//! one line per step.
//!
//! ```text
//! 10 FOR I=1 TO 3
//! 20 PRINT I*I
//! 30 NEXT I
//! ```
//!
//! The host supplies a [`mach::Console`] and drives a [`mach::Runtime`]:
//!
//! ```ignore
//! let mut runtime = Runtime::new(&source, console);
//! runtime.init(0)?;
//! while !runtime.is_finished() {
//!     runtime.run()?;
//! }
//! ```

#[path = "doc/introduction.rs"]
#[allow(non_snake_case)]
pub mod _Introduction;

#[path = "doc/appendix_a.rs"]
#[allow(non_snake_case)]
pub mod ___Appendix_A;

pub mod lang;
pub mod mach;
