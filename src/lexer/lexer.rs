use lazy_static::lazy_static;
use regex::Regex;

use crate::{MK_DEFAULT_HANDLER, MK_TOKEN};

use super::{
    source::TokenSource,
    tokens::{Token, TokenKind, RESERVED_LOOKUP},
};

/// Builds a token from the matched text, or `None` when the match is skipped.
pub type RegexHandler = fn(&Lexer, &str) -> Option<Token>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^\\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^//[^\\n]*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("(?s)^/\\*.*?\\*/").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("(?s)^/\\*.*").unwrap(), handler: unterminated_handler },
        RegexPattern { regex: Regex::new("^[0-9]+").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^\"[^\"\\n]*\"").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new("^\"[^\"\\n]*").unwrap(), handler: unterminated_handler },
        RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^\\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
        RegexPattern { regex: Regex::new("^\\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
        RegexPattern { regex: Regex::new("^\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new("^\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("^\\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new("^&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::And, "&") },
        RegexPattern { regex: Regex::new("^\\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Or, "|") },
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "=") },
        RegexPattern { regex: Regex::new("^~").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Tilde, "~") },
    ];
}

/// Forward-only scanner over Jack source text.
///
/// Tokens are produced one at a time through [`TokenSource::next_token`].
/// Input the patterns do not recognise comes out as [`TokenKind::Illegal`]
/// tokens, so scanning itself never fails; rejecting them is the parser's job.
pub struct Lexer {
    source: String,
    pos: usize,
    line_start: usize,
    pub line: u32,
}

impl Lexer {
    pub fn new(source: String) -> Lexer {
        Lexer {
            source,
            pos: 0,
            line_start: 0,
            line: 1,
        }
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Column of the next unscanned character on the current line.
    pub fn column(&self) -> u32 {
        self.source[self.line_start..self.pos].chars().count() as u32 + 1
    }

    fn advance_past(&mut self, matched: &str) {
        if let Some(last_newline) = matched.rfind('\n') {
            self.line += matched.matches('\n').count() as u32;
            self.line_start = self.pos + last_newline + 1;
        }
        self.pos += matched.len();
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Token {
        while !self.at_eof() {
            let found = PATTERNS.iter().find_map(|pattern| {
                pattern
                    .regex
                    .find(self.remainder())
                    .map(|m| (pattern.handler, m.end()))
            });

            let token = match found {
                Some((handler, end)) => {
                    let matched = self.remainder()[..end].to_string();
                    let token = handler(self, &matched);
                    self.advance_past(&matched);
                    token
                }
                None => {
                    let illegal = self.remainder().chars().next().map(String::from).unwrap_or_default();
                    let token = MK_TOKEN!(TokenKind::Illegal, illegal.clone(), self.line, self.column());
                    self.advance_past(&illegal);
                    Some(token)
                }
            };

            if let Some(token) = token {
                return token;
            }
        }

        Token::eof(self.line, self.column())
    }
}

fn skip_handler(_lexer: &Lexer, _matched: &str) -> Option<Token> {
    None
}

fn unterminated_handler(lexer: &Lexer, matched: &str) -> Option<Token> {
    let opener = if matched.starts_with('"') { "\"" } else { "/*" };
    Some(MK_TOKEN!(TokenKind::Illegal, String::from(opener), lexer.line, lexer.column()))
}

fn number_handler(lexer: &Lexer, matched: &str) -> Option<Token> {
    Some(MK_TOKEN!(TokenKind::Number, String::from(matched), lexer.line, lexer.column()))
}

fn string_handler(lexer: &Lexer, matched: &str) -> Option<Token> {
    let literal = &matched[1..matched.len() - 1];
    Some(MK_TOKEN!(TokenKind::String, String::from(literal), lexer.line, lexer.column()))
}

fn symbol_handler(lexer: &Lexer, matched: &str) -> Option<Token> {
    let kind = RESERVED_LOOKUP
        .get(matched)
        .copied()
        .unwrap_or(TokenKind::Identifier);

    Some(MK_TOKEN!(kind, String::from(matched), lexer.line, lexer.column()))
}

/// Scans the whole source, including the trailing EOF token.
pub fn tokenize(source: String) -> Vec<Token> {
    let mut lex = Lexer::new(source);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            return tokens;
        }
    }
}

/// Renders a flat `<tokens>` listing, one terminal per line. EOF is omitted.
pub fn tokens_xml(tokens: &[Token]) -> String {
    let mut xml = String::from("<tokens>\n");
    for token in tokens.iter().filter(|t| t.kind != TokenKind::EOF) {
        xml.push_str(&format!("{}\n", token));
    }
    xml.push_str("</tokens>\n");
    xml
}
