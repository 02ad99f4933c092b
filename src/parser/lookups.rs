//! Closed token-kind sets used at the grammar's branch points.
//!
//! Every structural decision is a membership test against one of these sets,
//! never a comparison of lexeme text.

use crate::lexer::tokens::TokenKind;

pub const CLASS_VAR_KINDS: &[TokenKind] = &[TokenKind::Static, TokenKind::Field];

pub const SUBROUTINE_KINDS: &[TokenKind] = &[
    TokenKind::Constructor,
    TokenKind::Function,
    TokenKind::Method,
];

/// `int`, `char`, `boolean` or a class name.
pub const TYPE_KINDS: &[TokenKind] = &[
    TokenKind::Int,
    TokenKind::Char,
    TokenKind::Boolean,
    TokenKind::Identifier,
];

pub const RETURN_TYPE_KINDS: &[TokenKind] = &[
    TokenKind::Void,
    TokenKind::Int,
    TokenKind::Char,
    TokenKind::Boolean,
    TokenKind::Identifier,
];

pub const STATEMENT_KINDS: &[TokenKind] = &[
    TokenKind::Let,
    TokenKind::If,
    TokenKind::While,
    TokenKind::Do,
    TokenKind::Return,
];

pub const KEYWORD_CONSTANTS: &[TokenKind] = &[
    TokenKind::True,
    TokenKind::False,
    TokenKind::Null,
    TokenKind::This,
];

// Binary operators all share one precedence level. `~` is also unary when it
// leads a term.
pub const OPERATORS: &[TokenKind] = &[
    TokenKind::Plus,
    TokenKind::Dash,
    TokenKind::Star,
    TokenKind::Slash,
    TokenKind::And,
    TokenKind::Or,
    TokenKind::Less,
    TokenKind::Greater,
    TokenKind::Equals,
    TokenKind::Tilde,
];

pub const UNARY_OPERATORS: &[TokenKind] = &[TokenKind::Dash, TokenKind::Tilde];
