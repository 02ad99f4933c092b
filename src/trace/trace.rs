use std::fmt::Display;

use crate::lexer::tokens::Token;

/// Names of the grammar rules that appear in a trace.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Rule {
    Class,
    ClassVarDec,
    SubroutineDec,
    ParameterList,
    SubroutineBody,
    VarDec,
    Statements,
    LetStatement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ReturnStatement,
    Expression,
    Term,
    ExpressionList,
}

impl Rule {
    pub fn tag(&self) -> &'static str {
        match self {
            Rule::Class => "class",
            Rule::ClassVarDec => "classVarDec",
            Rule::SubroutineDec => "subroutineDec",
            Rule::ParameterList => "parameterList",
            Rule::SubroutineBody => "subroutineBody",
            Rule::VarDec => "varDec",
            Rule::Statements => "statements",
            Rule::LetStatement => "letStatement",
            Rule::IfStatement => "ifStatement",
            Rule::WhileStatement => "whileStatement",
            Rule::DoStatement => "doStatement",
            Rule::ReturnStatement => "returnStatement",
            Rule::Expression => "expression",
            Rule::Term => "term",
            Rule::ExpressionList => "expressionList",
        }
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEntry {
    Enter(Rule),
    Exit(Rule),
    Terminal(Token),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    pub fn new() -> Self {
        Trace::default()
    }

    pub fn enter(&mut self, rule: Rule) {
        self.entries.push(TraceEntry::Enter(rule));
    }

    pub fn exit(&mut self, rule: Rule) {
        self.entries.push(TraceEntry::Exit(rule));
    }

    pub fn terminal(&mut self, token: Token) {
        self.entries.push(TraceEntry::Terminal(token));
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every exit closes the most recent open enter, nothing is left open and
    /// no terminal sits outside the outermost rule.
    pub fn is_well_nested(&self) -> bool {
        let mut open: Vec<Rule> = vec![];

        for entry in &self.entries {
            match entry {
                TraceEntry::Enter(rule) => open.push(*rule),
                TraceEntry::Exit(rule) => {
                    if open.pop() != Some(*rule) {
                        return false;
                    }
                }
                TraceEntry::Terminal(_) => {
                    if open.is_empty() {
                        return false;
                    }
                }
            }
        }

        open.is_empty()
    }

    /// Renders the trace as indented XML, two spaces per nesting level.
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        let mut depth = 0usize;

        for entry in &self.entries {
            match entry {
                TraceEntry::Enter(rule) => {
                    xml.push_str(&format!("{}<{}>\n", "  ".repeat(depth), rule));
                    depth += 1;
                }
                TraceEntry::Exit(rule) => {
                    depth = depth.saturating_sub(1);
                    xml.push_str(&format!("{}</{}>\n", "  ".repeat(depth), rule));
                }
                TraceEntry::Terminal(token) => {
                    xml.push_str(&format!("{}{}\n", "  ".repeat(depth), token));
                }
            }
        }

        xml
    }

    /// Compact single-line rendering, handy for asserting on shapes:
    /// rules as `(rule ...)`, terminals as their bare lexeme.
    pub fn to_sexpr(&self) -> String {
        let mut parts: Vec<String> = vec![];

        for entry in &self.entries {
            match entry {
                TraceEntry::Enter(rule) => parts.push(format!("({}", rule)),
                TraceEntry::Exit(_) => parts.push(String::from(")")),
                TraceEntry::Terminal(token) => parts.push(token.value.clone()),
            }
        }

        parts.join(" ").replace(" )", ")")
    }
}
