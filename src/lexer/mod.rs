//! Lexical analysis for Jack source text.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization using anchored regex patterns
//! - Recognition of keywords, identifiers, integer and string constants, symbols
//! - Line tracking for diagnostics
//! - Line and block comments, whitespace
//!
//! The parser only sees the [`source::TokenSource`] trait, so any producer of
//! tokens can stand in for the lexer.

pub mod lexer;
pub mod source;
pub mod tokens;
