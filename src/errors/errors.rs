use std::fmt::Display;

use thiserror::Error;

use crate::lexer::tokens::{Token, TokenKind};

/// Where in the token stream a syntax error was detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    AtEnd,
    At(String),
}

impl Location {
    pub fn of(token: &Token) -> Self {
        if token.kind == TokenKind::EOF {
            Location::AtEnd
        } else {
            Location::At(token.value.clone())
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::AtEnd => write!(f, "at end"),
            Location::At(lexeme) => write!(f, "at '{}'", lexeme),
        }
    }
}

/// The single error the analyzer raises. Parsing stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    internal_error: ErrorImpl,
    line: u32,
    column: u32,
    location: Location,
}

impl SyntaxError {
    /// Builds an error pointing at `token`, which is always the offending
    /// lookahead, never the last token that matched.
    pub fn new(error_impl: ErrorImpl, token: &Token) -> Self {
        SyntaxError {
            internal_error: error_impl,
            line: token.line,
            column: token.column,
            location: Location::of(token),
        }
    }

    pub fn get_line(&self) -> u32 {
        self.line
    }

    pub fn get_column(&self) -> u32 {
        self.column
    }

    pub fn get_location(&self) -> &Location {
        &self.location
    }

    pub fn get_reason(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::Expected { .. } => "Expected",
            ErrorImpl::TermExpected => "TermExpected",
            ErrorImpl::StatementExpected => "StatementExpected",
            ErrorImpl::TrailingInput => "TrailingInput",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::Expected { expected } if expected.contains(&TokenKind::Semicolon) => {
                ErrorTip::Suggestion(String::from("did you miss a semicolon?"))
            }
            ErrorImpl::Expected { .. } => ErrorTip::None,
            ErrorImpl::TermExpected => ErrorTip::Suggestion(String::from(
                "a term is a constant, a variable, a call, a parenthesized expression or a unary operation",
            )),
            ErrorImpl::StatementExpected => ErrorTip::Suggestion(String::from(
                "statements start with let, if, while, do or return",
            )),
            ErrorImpl::TrailingInput => ErrorTip::Suggestion(String::from(
                "a source file holds exactly one class",
            )),
            ErrorImpl::NestingTooDeep { limit } => ErrorTip::Suggestion(format!(
                "raise the nesting limit above {} or flatten the expression",
                limit
            )),
        }
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[line {}] Error {}: {}",
            self.line, self.location, self.internal_error
        )
    }
}

impl std::error::Error for SyntaxError {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("{}", describe_expected(.expected))]
    Expected { expected: Vec<TokenKind> },
    #[error("term expected")]
    TermExpected,
    #[error("expected a statement")]
    StatementExpected,
    #[error("expected end of input")]
    TrailingInput,
    #[error("nesting too deep (limit {limit})")]
    NestingTooDeep { limit: usize },
}

fn describe_expected(expected: &[TokenKind]) -> String {
    match expected {
        [single] => format!("expected {}", single),
        kinds => {
            let names: Vec<String> = kinds.iter().map(|k| k.to_string()).collect();
            format!("expected one of {}", names.join(", "))
        }
    }
}
