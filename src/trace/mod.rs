//! Parse trace produced by the parser.
//!
//! The trace is the ordered record of a derivation:
//!
//! - `Enter`/`Exit` markers around every nonterminal that was recognised
//! - `Terminal` entries for every token that was consumed
//!
//! Entries are only ever appended, in recognition order. The module also
//! renders the trace as the nand2tetris-style XML tag stream.

pub mod trace;
