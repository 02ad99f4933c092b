//! Recursive-descent parser for the Jack grammar.
//!
//! This module turns a token stream into a parse trace. It has one function
//! per nonterminal and handles:
//!
//! - Class, field and subroutine declarations (`decl`)
//! - Statements (`stmt`)
//! - Expressions, terms and subroutine calls (`expr`)
//! - The token-kind sets used at branch points (`lookups`)
//!
//! Decisions use at most the current token and one token of lookahead. The
//! first syntax error aborts the parse.

pub mod decl;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
