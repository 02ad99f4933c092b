use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("class", TokenKind::Class);
        map.insert("constructor", TokenKind::Constructor);
        map.insert("function", TokenKind::Function);
        map.insert("method", TokenKind::Method);
        map.insert("field", TokenKind::Field);
        map.insert("static", TokenKind::Static);
        map.insert("var", TokenKind::Var);
        map.insert("int", TokenKind::Int);
        map.insert("char", TokenKind::Char);
        map.insert("boolean", TokenKind::Boolean);
        map.insert("void", TokenKind::Void);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("null", TokenKind::Null);
        map.insert("this", TokenKind::This);
        map.insert("let", TokenKind::Let);
        map.insert("do", TokenKind::Do);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("return", TokenKind::Return);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Illegal,
    Number,
    String,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Dot,
    Comma,
    Semicolon,

    Plus,
    Dash,
    Star,
    Slash,
    And,
    Or,
    Less,
    Greater,
    Equals,
    Tilde,

    // Reserved
    Class,
    Constructor,
    Function,
    Method,
    Field,
    Static,
    Var,
    Int,
    Char,
    Boolean,
    Void,
    True,
    False,
    Null,
    This,
    Let,
    Do,
    If,
    Else,
    While,
    Return,
}

impl TokenKind {
    /// The fixed spelling of a keyword or symbol, `None` for the open classes.
    pub fn spelling(&self) -> Option<&'static str> {
        let text = match self {
            TokenKind::EOF
            | TokenKind::Illegal
            | TokenKind::Number
            | TokenKind::String
            | TokenKind::Identifier => return None,

            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::Dot => ".",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Plus => "+",
            TokenKind::Dash => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::And => "&",
            TokenKind::Or => "|",
            TokenKind::Less => "<",
            TokenKind::Greater => ">",
            TokenKind::Equals => "=",
            TokenKind::Tilde => "~",

            TokenKind::Class => "class",
            TokenKind::Constructor => "constructor",
            TokenKind::Function => "function",
            TokenKind::Method => "method",
            TokenKind::Field => "field",
            TokenKind::Static => "static",
            TokenKind::Var => "var",
            TokenKind::Int => "int",
            TokenKind::Char => "char",
            TokenKind::Boolean => "boolean",
            TokenKind::Void => "void",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            TokenKind::This => "this",
            TokenKind::Let => "let",
            TokenKind::Do => "do",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::Return => "return",
        };

        Some(text)
    }

    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Class
                | TokenKind::Constructor
                | TokenKind::Function
                | TokenKind::Method
                | TokenKind::Field
                | TokenKind::Static
                | TokenKind::Var
                | TokenKind::Int
                | TokenKind::Char
                | TokenKind::Boolean
                | TokenKind::Void
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
                | TokenKind::This
                | TokenKind::Let
                | TokenKind::Do
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::While
                | TokenKind::Return
        )
    }

    pub fn is_symbol(&self) -> bool {
        !self.is_keyword() && self.spelling().is_some()
    }

    /// The XML element used for a terminal of this kind.
    pub fn xml_tag(&self) -> &'static str {
        match self {
            TokenKind::Number => "integerConstant",
            TokenKind::String => "stringConstant",
            TokenKind::Identifier => "identifier",
            TokenKind::EOF | TokenKind::Illegal => "unknown",
            kind if kind.is_keyword() => "keyword",
            _ => "symbol",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::EOF => write!(f, "end of input"),
            TokenKind::Illegal => write!(f, "illegal character"),
            TokenKind::Number => write!(f, "integer constant"),
            TokenKind::String => write!(f, "string constant"),
            TokenKind::Identifier => write!(f, "identifier"),
            kind => write!(f, "'{}'", kind.spelling().unwrap_or_default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: u32,
    /// 1-based, counted in characters from the start of `line`.
    pub column: u32,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = self.kind.xml_tag();
        write!(f, "<{}> {} </{}>", tag, escape_xml(&self.value), tag)
    }
}

impl Token {
    pub fn eof(line: u32, column: u32) -> Self {
        Token {
            kind: TokenKind::EOF,
            value: String::new(),
            line,
            column,
        }
    }

    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }
}

pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
