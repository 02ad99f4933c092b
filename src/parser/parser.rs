//! Parser implementation for the Jack grammar.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! The parser keeps a two-token window over its token source:
//!
//! - `current`: the token most recently accepted
//! - `lookahead`: the next token, not yet consumed
//!
//! Grammar rules live in `decl`, `stmt` and `expr` as free functions over
//! `&mut Parser`. They consume tokens exclusively through [`Parser::expect_next`],
//! which also records every consumed token in the trace.

use tracing::{debug, trace};

use crate::{
    errors::errors::{ErrorImpl, SyntaxError},
    lexer::{
        lexer::Lexer,
        source::TokenSource,
        tokens::{Token, TokenKind},
    },
    trace::trace::{Rule, Trace},
};

use super::decl::parse_class;

/// Default bound on nested expressions, terms and statement blocks.
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Deepest nesting of expressions, terms and statement blocks accepted
    /// before the parse is rejected.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// The class being parsed. Created once the class header is read and passed
/// down to every rule that qualifies subroutine names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassContext {
    pub name: String,
}

impl ClassContext {
    pub fn new(name: String) -> Self {
        ClassContext { name }
    }

    /// `Class.subroutine`
    pub fn qualify(&self, subroutine: &str) -> String {
        format!("{}.{}", self.name, subroutine)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubroutineKind {
    Constructor,
    Function,
    Method,
}

impl SubroutineKind {
    /// Maps a subroutine keyword to its kind. Every kind in
    /// `SUBROUTINE_KINDS` maps to `Some`.
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Constructor => Some(SubroutineKind::Constructor),
            TokenKind::Function => Some(SubroutineKind::Function),
            TokenKind::Method => Some(SubroutineKind::Method),
            _ => None,
        }
    }
}

/// A subroutine declaration as seen by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubroutineSignature {
    /// Qualified with the enclosing class, e.g. `Main.main`.
    pub name: String,
    pub kind: SubroutineKind,
    pub return_type: String,
    pub parameters: usize,
    /// Number of names declared by `var` statements in the body.
    pub locals: usize,
    pub line: u32,
}

/// A subroutine call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// `Class.sub` for same-class calls, `receiver.sub` otherwise. Whether the
    /// receiver is a class or a variable is not decided here.
    pub target: String,
    /// Expressions written in the argument list.
    pub arguments: usize,
    /// Set for bare `name(...)` calls, which pass the current object as a
    /// hidden first argument.
    pub implicit_this: bool,
    pub line: u32,
}

impl CallSite {
    /// Arguments passed at run time, counting the hidden `this`.
    pub fn argument_count(&self) -> usize {
        self.arguments + usize::from(self.implicit_this)
    }
}

/// Everything a successful parse produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedClass {
    pub name: String,
    pub trace: Trace,
    pub subroutines: Vec<SubroutineSignature>,
    pub calls: Vec<CallSite>,
}

/// The parser state: the token window plus what has been recognised so far.
pub struct Parser<'a> {
    /// Where tokens come from
    tokens: Box<dyn TokenSource + 'a>,
    /// The token most recently accepted, `None` before the first one
    current: Option<Token>,
    /// The next token, not yet consumed
    lookahead: Token,
    /// Recognition record
    trace: Trace,
    subroutines: Vec<SubroutineSignature>,
    calls: Vec<CallSite>,
    /// Current nesting of expressions, terms and statement blocks
    depth: usize,
    config: ParserConfig,
}

impl<'a> Parser<'a> {
    /// Creates a parser and primes the lookahead with the first token.
    pub fn new(mut tokens: Box<dyn TokenSource + 'a>, config: ParserConfig) -> Self {
        let lookahead = tokens.next_token();

        Parser {
            tokens,
            current: None,
            lookahead,
            trace: Trace::new(),
            subroutines: vec![],
            calls: vec![],
            depth: 0,
            config,
        }
    }

    /// Shifts the lookahead into `current` and pulls a fresh lookahead.
    pub fn advance(&mut self) {
        let next = self.tokens.next_token();
        self.current = Some(std::mem::replace(&mut self.lookahead, next));
    }

    pub fn current_token(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    pub fn lookahead(&self) -> &Token {
        &self.lookahead
    }

    pub fn peek_kind(&self) -> TokenKind {
        self.lookahead.kind
    }

    pub fn peek_is(&self, kind: TokenKind) -> bool {
        self.lookahead.kind == kind
    }

    pub fn peek_is_one_of(&self, kinds: &[TokenKind]) -> bool {
        self.lookahead.is_one_of_many(kinds)
    }

    pub fn current_is(&self, kind: TokenKind) -> bool {
        self.current.as_ref().is_some_and(|token| token.kind == kind)
    }

    /// Consumes the lookahead if its kind is one of `kinds`, recording it in
    /// the trace and returning it. Anything else is a syntax error reported
    /// at the lookahead.
    pub fn expect_next(&mut self, kinds: &[TokenKind]) -> Result<Token, SyntaxError> {
        if !self.peek_is_one_of(kinds) {
            return Err(self.error_at_lookahead(ErrorImpl::Expected {
                expected: kinds.to_vec(),
            }));
        }

        let token = self.lookahead.clone();
        self.advance();
        trace!(kind = ?token.kind, value = %token.value, line = token.line, "matched");
        self.trace.terminal(token.clone());

        Ok(token)
    }

    pub fn error_at_lookahead(&self, error: ErrorImpl) -> SyntaxError {
        SyntaxError::new(error, &self.lookahead)
    }

    pub fn enter(&mut self, rule: Rule) {
        self.trace.enter(rule);
    }

    pub fn exit(&mut self, rule: Rule) {
        self.trace.exit(rule);
    }

    /// Steps one level deeper into a recursive rule, failing once the
    /// configured limit is exceeded.
    pub fn descend(&mut self) -> Result<(), SyntaxError> {
        self.depth += 1;
        if self.depth > self.config.max_depth {
            return Err(self.error_at_lookahead(ErrorImpl::NestingTooDeep {
                limit: self.config.max_depth,
            }));
        }

        Ok(())
    }

    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn record_subroutine(&mut self, signature: SubroutineSignature) {
        debug!(
            name = %signature.name,
            kind = ?signature.kind,
            parameters = signature.parameters,
            locals = signature.locals,
            "parsed subroutine"
        );
        self.subroutines.push(signature);
    }

    pub fn record_call(&mut self, call: CallSite) {
        self.calls.push(call);
    }

    fn finish(self, context: ClassContext) -> ParsedClass {
        ParsedClass {
            name: context.name,
            trace: self.trace,
            subroutines: self.subroutines,
            calls: self.calls,
        }
    }
}

/// Parses one class from a token source.
///
/// This is the single entry point of the parser. The source must hold exactly
/// one class followed by the end of input. The first syntax error aborts the
/// whole parse; nothing recognised before it is returned.
///
/// # Arguments
///
/// * `tokens` - The token source, owned by the parser for the whole parse
/// * `config` - Parser limits
///
/// # Returns
///
/// The parsed class with its trace, or the first SyntaxError.
pub fn parse<'a, S: TokenSource + 'a>(
    tokens: S,
    config: ParserConfig,
) -> Result<ParsedClass, SyntaxError> {
    let mut parser = Parser::new(Box::new(tokens), config);

    let context = parse_class(&mut parser)?;

    if !parser.peek_is(TokenKind::EOF) {
        return Err(parser.error_at_lookahead(ErrorImpl::TrailingInput));
    }

    debug!(
        class = %context.name,
        entries = parser.trace.len(),
        subroutines = parser.subroutines.len(),
        "parsed class"
    );

    Ok(parser.finish(context))
}

/// Scans and parses Jack source text.
pub fn parse_source(source: &str, config: ParserConfig) -> Result<ParsedClass, SyntaxError> {
    parse(Lexer::new(source.to_string()), config)
}
