//! Error types for the analyzer.
//!
//! There is exactly one error, [`errors::SyntaxError`]. It carries:
//!
//! - The line of the offending lookahead token
//! - A location phrase (`at end` or `at '<lexeme>'`)
//! - The reason, as a `thiserror` enum with a human readable message
//! - An optional suggestion for the diagnostic printer

pub mod errors;
