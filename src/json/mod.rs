//! Purpose: JSON parse and scan engines that the pools recycle.
//! Exports: `Parser`, `Scanner`.
//! Role: Owns all decoding semantics; pooling code never inspects values or errors.
//! Invariants: Engines are plain `Default + Send` values with no hidden global state.

mod parse;
mod scan;

pub use parse::Parser;
pub use scan::Scanner;
