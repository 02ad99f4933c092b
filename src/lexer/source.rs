use std::collections::VecDeque;

use super::tokens::{Token, TokenKind};

/// Anything that can feed the parser one token at a time.
///
/// Implementations must never fail and must keep returning an EOF token once
/// the input is exhausted, so the parser's lookahead never runs dry.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

/// A token source over an already scanned list of tokens.
pub struct TokenStream {
    tokens: VecDeque<Token>,
    last_line: u32,
    last_column: u32,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenStream {
            tokens: tokens.into(),
            last_line: 1,
            last_column: 1,
        }
    }
}

impl TokenSource for TokenStream {
    fn next_token(&mut self) -> Token {
        match self.tokens.pop_front() {
            Some(token) if token.kind == TokenKind::EOF => {
                // Keep the EOF around so every later call sees it too.
                self.tokens.push_front(token.clone());
                token
            }
            Some(token) => {
                self.last_line = token.line;
                self.last_column = token.column + token.value.chars().count() as u32;
                token
            }
            None => Token::eof(self.last_line, self.last_column),
        }
    }
}
