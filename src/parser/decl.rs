//! Class and declaration rules.
//!
//! These are structural validators only: names are not checked for
//! duplicates, scope or type compatibility.

use tracing::debug;

use crate::{
    errors::errors::{ErrorImpl, SyntaxError},
    lexer::tokens::{Token, TokenKind},
    trace::trace::Rule,
};

use super::{
    lookups::{CLASS_VAR_KINDS, RETURN_TYPE_KINDS, SUBROUTINE_KINDS, TYPE_KINDS},
    parser::{ClassContext, Parser, SubroutineKind, SubroutineSignature},
    stmt::parse_statements,
};

// class -> 'class' className '{' classVarDec* subroutineDec* '}'
pub fn parse_class(parser: &mut Parser) -> Result<ClassContext, SyntaxError> {
    parser.enter(Rule::Class);
    parser.expect_next(&[TokenKind::Class])?;

    let name = parser.expect_next(&[TokenKind::Identifier])?;
    let context = ClassContext::new(name.value);
    debug!(class = %context.name, line = name.line, "parsing class");

    parser.expect_next(&[TokenKind::OpenCurly])?;

    while parser.peek_is_one_of(CLASS_VAR_KINDS) {
        parse_class_var_dec(parser)?;
    }

    while parser.peek_is_one_of(SUBROUTINE_KINDS) {
        parse_subroutine_dec(parser, &context)?;
    }

    parser.expect_next(&[TokenKind::CloseCurly])?;
    parser.exit(Rule::Class);

    Ok(context)
}

// classVarDec -> ('static' | 'field') type varName (',' varName)* ';'
pub fn parse_class_var_dec(parser: &mut Parser) -> Result<(), SyntaxError> {
    parser.enter(Rule::ClassVarDec);
    parser.expect_next(CLASS_VAR_KINDS)?;
    parse_type(parser)?;
    parse_name_list(parser)?;
    parser.expect_next(&[TokenKind::Semicolon])?;
    parser.exit(Rule::ClassVarDec);

    Ok(())
}

// subroutineDec -> ('constructor' | 'function' | 'method') ('void' | type)
//                  subroutineName '(' parameterList ')' subroutineBody
pub fn parse_subroutine_dec(parser: &mut Parser, context: &ClassContext) -> Result<(), SyntaxError> {
    parser.enter(Rule::SubroutineDec);

    let keyword = parser.expect_next(SUBROUTINE_KINDS)?;
    let kind = SubroutineKind::from_token_kind(keyword.kind).ok_or_else(|| {
        SyntaxError::new(
            ErrorImpl::Expected {
                expected: SUBROUTINE_KINDS.to_vec(),
            },
            &keyword,
        )
    })?;
    let return_type = parser.expect_next(RETURN_TYPE_KINDS)?;
    let name = parser.expect_next(&[TokenKind::Identifier])?;

    parser.expect_next(&[TokenKind::OpenParen])?;
    let parameters = parse_parameter_list(parser)?;
    parser.expect_next(&[TokenKind::CloseParen])?;

    let locals = parse_subroutine_body(parser, context)?;
    parser.exit(Rule::SubroutineDec);

    parser.record_subroutine(SubroutineSignature {
        name: context.qualify(&name.value),
        kind,
        return_type: return_type.value,
        parameters,
        locals,
        line: name.line,
    });

    Ok(())
}

/// parameterList -> ((type varName) (',' type varName)*)?
///
/// Returns the number of parameters.
pub fn parse_parameter_list(parser: &mut Parser) -> Result<usize, SyntaxError> {
    parser.enter(Rule::ParameterList);

    let mut count = 0;
    if !parser.peek_is(TokenKind::CloseParen) {
        parse_type(parser)?;
        parser.expect_next(&[TokenKind::Identifier])?;
        count = 1;

        while parser.peek_is(TokenKind::Comma) {
            parser.expect_next(&[TokenKind::Comma])?;
            parse_type(parser)?;
            parser.expect_next(&[TokenKind::Identifier])?;
            count += 1;
        }
    }

    parser.exit(Rule::ParameterList);
    Ok(count)
}

/// subroutineBody -> '{' varDec* statements '}'
///
/// Returns the number of local variable names declared.
pub fn parse_subroutine_body(parser: &mut Parser, context: &ClassContext) -> Result<usize, SyntaxError> {
    parser.enter(Rule::SubroutineBody);
    parser.expect_next(&[TokenKind::OpenCurly])?;

    let mut locals = 0;
    while parser.peek_is(TokenKind::Var) {
        locals += parse_var_dec(parser)?;
    }

    parse_statements(parser, context)?;

    parser.expect_next(&[TokenKind::CloseCurly])?;
    parser.exit(Rule::SubroutineBody);

    Ok(locals)
}

// varDec -> 'var' type varName (',' varName)* ';'
pub fn parse_var_dec(parser: &mut Parser) -> Result<usize, SyntaxError> {
    parser.enter(Rule::VarDec);
    parser.expect_next(&[TokenKind::Var])?;
    parse_type(parser)?;
    let names = parse_name_list(parser)?;
    parser.expect_next(&[TokenKind::Semicolon])?;
    parser.exit(Rule::VarDec);

    Ok(names)
}

/// type -> 'int' | 'char' | 'boolean' | className
///
/// Types have no nonterminal of their own in the trace; the token is recorded
/// as a plain terminal.
pub fn parse_type(parser: &mut Parser) -> Result<Token, SyntaxError> {
    parser.expect_next(TYPE_KINDS)
}

// varName (',' varName)*
fn parse_name_list(parser: &mut Parser) -> Result<usize, SyntaxError> {
    parser.expect_next(&[TokenKind::Identifier])?;

    let mut count = 1;
    while parser.peek_is(TokenKind::Comma) {
        parser.expect_next(&[TokenKind::Comma])?;
        parser.expect_next(&[TokenKind::Identifier])?;
        count += 1;
    }

    Ok(count)
}
