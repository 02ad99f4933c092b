//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the Jack grammar including:
//! - Class, field and subroutine declarations
//! - Statements
//! - Flat expressions, terms and subroutine calls
//! - Syntax errors and where they are reported
//! - The lookahead primitives

use crate::{
    errors::errors::{ErrorImpl, Location, SyntaxError},
    lexer::{lexer::Lexer, source::TokenStream, tokens::TokenKind},
    trace::trace::{Rule, Trace, TraceEntry},
};

use super::{
    lookups::SUBROUTINE_KINDS,
    parser::{parse, parse_source, CallSite, ClassContext, ParsedClass, Parser, ParserConfig, SubroutineKind},
    stmt::parse_statement,
};

fn in_main(body: &str) -> String {
    format!("class Main {{ function void main() {{ {} }} }}", body)
}

fn parse_ok(source: &str) -> ParsedClass {
    match parse_source(source, ParserConfig::default()) {
        Ok(parsed) => parsed,
        Err(error) => panic!("unexpected error: {}", error),
    }
}

fn parse_err(source: &str) -> SyntaxError {
    match parse_source(source, ParserConfig::default()) {
        Ok(_) => panic!("expected a syntax error for {:?}", source),
        Err(error) => error,
    }
}

/// Flattens a trace into `<rule>`, `</rule>` and bare lexemes.
fn shape(trace: &Trace) -> Vec<String> {
    trace
        .entries()
        .iter()
        .map(|entry| match entry {
            TraceEntry::Enter(rule) => format!("<{}>", rule),
            TraceEntry::Exit(rule) => format!("</{}>", rule),
            TraceEntry::Terminal(token) => token.value.clone(),
        })
        .collect()
}

/// The shape of the first occurrence of `rule`, from its enter to its exit.
fn first_rule(trace: &Trace, rule: Rule) -> Vec<String> {
    let entries = trace.entries();
    let start = entries
        .iter()
        .position(|e| *e == TraceEntry::Enter(rule))
        .expect("rule not in trace");

    let mut depth = 0;
    let mut end = start;
    for (i, entry) in entries.iter().enumerate().skip(start) {
        match entry {
            TraceEntry::Enter(_) => depth += 1,
            TraceEntry::Exit(_) => depth -= 1,
            TraceEntry::Terminal(_) => {}
        }
        if depth == 0 {
            end = i;
            break;
        }
    }

    let full = shape(trace);
    full[start..=end].to_vec()
}

fn strs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_parse_do_with_qualified_call() {
    let parsed = parse_ok("class Main { function void main() { do Output.printInt(1+2); return; } }");

    assert_eq!(parsed.name, "Main");
    assert!(parsed.trace.is_well_nested());
    assert_eq!(
        first_rule(&parsed.trace, Rule::DoStatement),
        strs(&[
            "<doStatement>",
            "do",
            "Output",
            ".",
            "printInt",
            "(",
            "<expressionList>",
            "<expression>",
            "<term>",
            "1",
            "</term>",
            "+",
            "<term>",
            "2",
            "</term>",
            "</expression>",
            "</expressionList>",
            ")",
            ";",
            "</doStatement>",
        ])
    );
    assert_eq!(
        parsed.calls,
        vec![CallSite {
            target: "Output.printInt".to_string(),
            arguments: 1,
            implicit_this: false,
            line: 1,
        }]
    );
}

#[test]
fn test_whole_class_shape() {
    let parsed = parse_ok("class Main { function void main() { return; } }");

    assert_eq!(
        shape(&parsed.trace),
        strs(&[
            "<class>",
            "class",
            "Main",
            "{",
            "<subroutineDec>",
            "function",
            "void",
            "main",
            "(",
            "<parameterList>",
            "</parameterList>",
            ")",
            "<subroutineBody>",
            "{",
            "<statements>",
            "<returnStatement>",
            "return",
            ";",
            "</returnStatement>",
            "</statements>",
            "}",
            "</subroutineBody>",
            "</subroutineDec>",
            "}",
            "</class>",
        ])
    );
}

#[test]
fn test_expressions_are_flat_left_to_right() {
    let parsed = parse_ok(&in_main("let x = 1-2-3; return;"));

    assert_eq!(
        first_rule(&parsed.trace, Rule::Expression),
        strs(&[
            "<expression>",
            "<term>",
            "1",
            "</term>",
            "-",
            "<term>",
            "2",
            "</term>",
            "-",
            "<term>",
            "3",
            "</term>",
            "</expression>",
        ])
    );
}

#[test]
fn test_every_binary_operator() {
    let parsed = parse_ok(&in_main("let x = a+b-c*d/e&f|g<h>i=j~k; return;"));

    let expression = first_rule(&parsed.trace, Rule::Expression);
    let operators: Vec<&String> = expression
        .iter()
        .filter(|s| ["+", "-", "*", "/", "&", "|", "<", ">", "=", "~"].contains(&s.as_str()))
        .collect();
    assert_eq!(operators.len(), 10);
}

#[test]
fn test_tilde_as_binary_operator() {
    let parsed = parse_ok(&in_main("let x = a ~ b; return;"));

    assert_eq!(
        first_rule(&parsed.trace, Rule::Expression),
        strs(&["<expression>", "<term>", "a", "</term>", "~", "<term>", "b", "</term>", "</expression>"])
    );
}

#[test]
fn test_tilde_binary_then_unary() {
    let parsed = parse_ok(&in_main("let x = a ~ ~b; return;"));

    assert_eq!(
        first_rule(&parsed.trace, Rule::Expression),
        strs(&[
            "<expression>", "<term>", "a", "</term>", "~",
            "<term>", "~", "<term>", "b", "</term>", "</term>",
            "</expression>",
        ])
    );
}

#[test]
fn test_let_without_term_fails_at_semicolon() {
    let error = parse_err(&in_main("let x = ;"));

    assert_eq!(error.get_reason(), &ErrorImpl::TermExpected);
    assert_eq!(error.get_location(), &Location::At(";".to_string()));
    assert_eq!(error.to_string(), "[line 1] Error at ';': term expected");
}

#[test]
fn test_end_of_input_mid_statement() {
    let error = parse_err("class Main { function void main() { if (x");

    assert_eq!(error.get_location(), &Location::AtEnd);
    assert_eq!(
        error.get_reason(),
        &ErrorImpl::Expected {
            expected: vec![TokenKind::CloseParen]
        }
    );
    assert_eq!(error.to_string(), "[line 1] Error at end: expected ')'");
}

#[test]
fn test_empty_parameter_list() {
    let parsed = parse_ok("class Main { function void f() { return; } }");

    assert_eq!(
        first_rule(&parsed.trace, Rule::ParameterList),
        strs(&["<parameterList>", "</parameterList>"])
    );
    assert_eq!(parsed.subroutines[0].parameters, 0);
}

#[test]
fn test_subroutine_signatures() {
    let source = "class Point {
        constructor Point new(int ax, int ay) { var int a, b; var char c; return this; }
        method boolean equals(Point other) { return true; }
        function void reset() { return; }
    }";
    let parsed = parse_ok(source);

    let names: Vec<&str> = parsed.subroutines.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Point.new", "Point.equals", "Point.reset"]);

    let new = &parsed.subroutines[0];
    assert_eq!(new.kind, SubroutineKind::Constructor);
    assert_eq!(new.return_type, "Point");
    assert_eq!(new.parameters, 2);
    assert_eq!(new.locals, 3);
    assert_eq!(new.line, 2);

    assert_eq!(parsed.subroutines[1].kind, SubroutineKind::Method);
    assert_eq!(parsed.subroutines[1].parameters, 1);
    assert_eq!(parsed.subroutines[2].kind, SubroutineKind::Function);
    assert_eq!(parsed.subroutines[2].return_type, "void");
}

#[test]
fn test_every_subroutine_keyword_has_a_kind() {
    for &keyword in SUBROUTINE_KINDS {
        assert!(SubroutineKind::from_token_kind(keyword).is_some(), "{:?}", keyword);
    }
    assert_eq!(SubroutineKind::from_token_kind(TokenKind::Var), None);
}

#[test]
fn test_every_subroutine_is_recorded() {
    let parsed = parse_ok(
        "class A { constructor A new() { return this; } method void m() { return; } function int f() { return 0; } }",
    );

    let kinds: Vec<SubroutineKind> = parsed.subroutines.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![SubroutineKind::Constructor, SubroutineKind::Method, SubroutineKind::Function]
    );
}

#[test]
fn test_class_var_decs() {
    let parsed = parse_ok("class Game { static int count; field Array a, b; field boolean done; }");

    let decs = parsed
        .trace
        .entries()
        .iter()
        .filter(|e| **e == TraceEntry::Enter(Rule::ClassVarDec))
        .count();
    assert_eq!(decs, 3);
    assert_eq!(
        first_rule(&parsed.trace, Rule::ClassVarDec),
        strs(&["<classVarDec>", "static", "int", "count", ";", "</classVarDec>"])
    );
    assert!(parsed.subroutines.is_empty());
}

#[test]
fn test_same_class_calls_are_qualified() {
    let source = "class Square {
        method void draw(int x, int y) { return; }
        method int size() { return 1; }
        method void run() { var int s; do draw(1, 2); let s = size(); return; }
    }";
    let parsed = parse_ok(source);

    assert_eq!(
        parsed.calls,
        vec![
            CallSite {
                target: "Square.draw".to_string(),
                arguments: 2,
                implicit_this: true,
                line: 4,
            },
            CallSite {
                target: "Square.size".to_string(),
                arguments: 0,
                implicit_this: true,
                line: 4,
            },
        ]
    );
}

#[test]
fn test_call_through_variable() {
    let parsed = parse_ok(&in_main("var Game game; do game.run(); return;"));

    assert_eq!(parsed.calls[0].target, "game.run");
    assert_eq!(parsed.calls[0].arguments, 0);
    assert!(!parsed.calls[0].implicit_this);
}

#[test]
fn test_same_class_calls_count_hidden_this() {
    let parsed = parse_ok(&in_main("do draw(1, 2); do Screen.clear(); return;"));

    assert_eq!(parsed.calls[0].target, "Main.draw");
    assert_eq!(parsed.calls[0].arguments, 2);
    assert_eq!(parsed.calls[0].argument_count(), 3);

    assert_eq!(parsed.calls[1].target, "Screen.clear");
    assert_eq!(parsed.calls[1].argument_count(), 0);
}

#[test]
fn test_call_in_expression() {
    let parsed = parse_ok(&in_main("let x = Math.max(a, b) + 1; return;"));

    assert_eq!(
        first_rule(&parsed.trace, Rule::Term),
        strs(&[
            "<term>",
            "Math",
            ".",
            "max",
            "(",
            "<expressionList>",
            "<expression>",
            "<term>",
            "a",
            "</term>",
            "</expression>",
            ",",
            "<expression>",
            "<term>",
            "b",
            "</term>",
            "</expression>",
            "</expressionList>",
            ")",
            "</term>",
        ])
    );
}

#[test]
fn test_array_access() {
    let parsed = parse_ok(&in_main("let a[i] = b[j+1]; return;"));

    assert_eq!(
        first_rule(&parsed.trace, Rule::LetStatement),
        strs(&[
            "<letStatement>",
            "let",
            "a",
            "[",
            "<expression>",
            "<term>",
            "i",
            "</term>",
            "</expression>",
            "]",
            "=",
            "<expression>",
            "<term>",
            "b",
            "[",
            "<expression>",
            "<term>",
            "j",
            "</term>",
            "+",
            "<term>",
            "1",
            "</term>",
            "</expression>",
            "]",
            "</term>",
            "</expression>",
            ";",
            "</letStatement>",
        ])
    );
}

#[test]
fn test_unary_operators_nest_terms() {
    let parsed = parse_ok(&in_main("let x = -~y; return;"));

    assert_eq!(
        first_rule(&parsed.trace, Rule::Term),
        strs(&["<term>", "-", "<term>", "~", "<term>", "y", "</term>", "</term>", "</term>"])
    );
}

#[test]
fn test_parenthesized_term() {
    let parsed = parse_ok(&in_main("let x = (a + b) * c; return;"));

    assert_eq!(
        first_rule(&parsed.trace, Rule::Term),
        strs(&[
            "<term>",
            "(",
            "<expression>",
            "<term>",
            "a",
            "</term>",
            "+",
            "<term>",
            "b",
            "</term>",
            "</expression>",
            ")",
            "</term>",
        ])
    );
}

#[test]
fn test_constants() {
    let parsed = parse_ok(&in_main(
        "let a = true; let b = false; let c = null; let d = this; let e = \"hi there\"; let f = 32767; return;",
    ));

    let terminals: Vec<String> = parsed
        .trace
        .entries()
        .iter()
        .filter_map(|e| match e {
            TraceEntry::Terminal(t) if t.kind == TokenKind::String => Some(t.value.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(terminals, vec!["hi there".to_string()]);
    assert!(parsed.trace.is_well_nested());
}

#[test]
fn test_control_flow_statements() {
    let source = in_main(
        "var int i;
         let i = 0;
         while (i < 10) {
             if (i = 5) { do Output.printInt(i); } else { let i = i + 1; }
             if (~(i > 3)) { }
         }
         return i;",
    );
    let parsed = parse_ok(&source);

    assert!(parsed.trace.is_well_nested());
    assert_eq!(
        first_rule(&parsed.trace, Rule::IfStatement)[..6].to_vec(),
        strs(&["<ifStatement>", "if", "(", "<expression>", "<term>", "i"])
    );

    let ifs = parsed
        .trace
        .entries()
        .iter()
        .filter(|e| **e == TraceEntry::Enter(Rule::IfStatement))
        .count();
    assert_eq!(ifs, 2);

    // An empty block still records its statements rule.
    let shape = shape(&parsed.trace);
    let empty_block = shape
        .windows(4)
        .any(|w| w == strs(&["{", "<statements>", "</statements>", "}"]).as_slice());
    assert!(empty_block);
}

#[test]
fn test_return_forms() {
    let parsed = parse_ok(&in_main("return;"));
    assert_eq!(
        first_rule(&parsed.trace, Rule::ReturnStatement),
        strs(&["<returnStatement>", "return", ";", "</returnStatement>"])
    );

    let parsed = parse_ok(&in_main("return x;"));
    assert_eq!(
        first_rule(&parsed.trace, Rule::ReturnStatement),
        strs(&[
            "<returnStatement>",
            "return",
            "<expression>",
            "<term>",
            "x",
            "</term>",
            "</expression>",
            ";",
            "</returnStatement>",
        ])
    );
}

#[test]
fn test_error_reported_at_lookahead() {
    let source = "class Main {\n  function void main() {\n    let x = 1 2;\n  }\n}";
    let error = parse_err(source);

    assert_eq!(error.get_line(), 3);
    assert_eq!(error.get_location(), &Location::At("2".to_string()));
    assert_eq!(
        error.get_reason(),
        &ErrorImpl::Expected {
            expected: vec![TokenKind::Semicolon]
        }
    );
}

#[test]
fn test_error_path_is_repeatable() {
    let source = in_main("while (x { }");

    let first = parse_err(&source);
    let second = parse_err(&source);
    assert_eq!(first, second);
    assert_eq!(first.to_string(), "[line 1] Error at '{': expected ')'");
}

#[test]
fn test_illegal_character_is_rejected() {
    let error = parse_err(&in_main("let x = #;"));

    assert_eq!(error.get_reason(), &ErrorImpl::TermExpected);
    assert_eq!(error.get_location(), &Location::At("#".to_string()));
}

#[test]
fn test_missing_class_keyword() {
    let error = parse_err("Main { }");

    assert_eq!(error.to_string(), "[line 1] Error at 'Main': expected 'class'");
}

#[test]
fn test_empty_input() {
    let error = parse_err("");

    assert_eq!(error.to_string(), "[line 1] Error at end: expected 'class'");
}

#[test]
fn test_trailing_input_after_class() {
    let error = parse_err("class A { }\nclass B { }");

    assert_eq!(error.get_reason(), &ErrorImpl::TrailingInput);
    assert_eq!(error.get_line(), 2);
    assert_eq!(error.get_location(), &Location::At("class".to_string()));
}

#[test]
fn test_bad_return_type() {
    let error = parse_err("class Main { function 5 f() { return; } }");

    assert_eq!(
        error.to_string(),
        "[line 1] Error at '5': expected one of 'void', 'int', 'char', 'boolean', identifier"
    );
}

#[test]
fn test_do_requires_a_call() {
    let error = parse_err(&in_main("do x;"));

    assert_eq!(error.to_string(), "[line 1] Error at ';': expected one of '(', '.'");
}

#[test]
fn test_var_after_statements_is_rejected() {
    let error = parse_err(&in_main("let x = 1; var int y;"));

    assert_eq!(error.to_string(), "[line 1] Error at 'var': expected '}'");
}

#[test]
fn test_class_var_after_subroutine_is_rejected() {
    let error = parse_err("class Main { function void f() { return; } field int x; }");

    assert_eq!(error.to_string(), "[line 1] Error at 'field': expected '}'");
}

#[test]
fn test_nesting_limit() {
    let nested = format!("{}1{}", "(".repeat(20), ")".repeat(20));
    let source = in_main(&format!("let x = {}; return;", nested));

    let error = match parse_source(&source, ParserConfig { max_depth: 10 }) {
        Ok(_) => panic!("expected the nesting limit to trip"),
        Err(error) => error,
    };
    assert_eq!(error.get_reason(), &ErrorImpl::NestingTooDeep { limit: 10 });

    let nested = format!("{}1{}", "(".repeat(50), ")".repeat(50));
    let parsed = parse_ok(&in_main(&format!("let x = {}; return;", nested)));
    assert!(parsed.trace.is_well_nested());
}

#[test]
fn test_parse_from_token_stream() {
    let tokens = crate::lexer::lexer::tokenize("class Empty { }".to_string());
    let parsed = parse(TokenStream::new(tokens), ParserConfig::default()).unwrap();

    assert_eq!(parsed.name, "Empty");
    assert_eq!(
        shape(&parsed.trace),
        strs(&["<class>", "class", "Empty", "{", "}", "</class>"])
    );
}

#[test]
fn test_lookahead_primitives() {
    let mut parser = Parser::new(Box::new(Lexer::new("let x".to_string())), ParserConfig::default());

    assert!(parser.current_token().is_none());
    assert!(parser.peek_is(TokenKind::Let));
    assert!(!parser.current_is(TokenKind::Let));

    let token = parser.expect_next(&[TokenKind::Let]).unwrap();
    assert_eq!(token.value, "let");
    assert!(parser.current_is(TokenKind::Let));
    assert!(parser.peek_is(TokenKind::Identifier));

    let error = parser.expect_next(&[TokenKind::Semicolon]).unwrap_err();
    assert_eq!(error.get_location(), &Location::At("x".to_string()));
    // A failed expectation consumes nothing.
    assert!(parser.current_is(TokenKind::Let));

    parser.advance();
    assert!(parser.current_is(TokenKind::Identifier));
    assert!(parser.peek_is(TokenKind::EOF));
    parser.advance();
    assert!(parser.current_is(TokenKind::EOF));
    assert!(parser.peek_is(TokenKind::EOF));
}

#[test]
fn test_statement_dispatch_rejects_non_statements() {
    let mut parser = Parser::new(Box::new(Lexer::new("x = 1;".to_string())), ParserConfig::default());
    let context = ClassContext::new("Main".to_string());

    let error = parse_statement(&mut parser, &context).unwrap_err();
    assert_eq!(error.get_reason(), &ErrorImpl::StatementExpected);
    assert_eq!(error.to_string(), "[line 1] Error at 'x': expected a statement");
}

#[test]
fn test_class_context_qualify() {
    let context = ClassContext::new("Main".to_string());
    assert_eq!(context.qualify("main"), "Main.main");
}
