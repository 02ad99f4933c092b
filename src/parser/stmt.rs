use crate::{
    errors::errors::{ErrorImpl, SyntaxError},
    lexer::tokens::TokenKind,
    trace::trace::Rule,
};

use super::{
    expr::{parse_expression, parse_subroutine_call},
    lookups::STATEMENT_KINDS,
    parser::{ClassContext, Parser},
};

/// statements -> statement*
///
/// Stops at the first token that cannot start a statement; the caller owns
/// the closing `}`.
pub fn parse_statements(parser: &mut Parser, context: &ClassContext) -> Result<(), SyntaxError> {
    parser.descend()?;
    parser.enter(Rule::Statements);

    while parser.peek_is_one_of(STATEMENT_KINDS) {
        parse_statement(parser, context)?;
    }

    parser.exit(Rule::Statements);
    parser.ascend();

    Ok(())
}

pub fn parse_statement(parser: &mut Parser, context: &ClassContext) -> Result<(), SyntaxError> {
    match parser.peek_kind() {
        TokenKind::Let => parse_let_stmt(parser, context),
        TokenKind::If => parse_if_stmt(parser, context),
        TokenKind::While => parse_while_stmt(parser, context),
        TokenKind::Do => parse_do_stmt(parser, context),
        TokenKind::Return => parse_return_stmt(parser, context),
        _ => Err(parser.error_at_lookahead(ErrorImpl::StatementExpected)),
    }
}

// 'let' varName ('[' expression ']')? '=' expression ';'
pub fn parse_let_stmt(parser: &mut Parser, context: &ClassContext) -> Result<(), SyntaxError> {
    parser.enter(Rule::LetStatement);
    parser.expect_next(&[TokenKind::Let])?;
    parser.expect_next(&[TokenKind::Identifier])?;

    if parser.peek_is(TokenKind::OpenBracket) {
        parser.expect_next(&[TokenKind::OpenBracket])?;
        parse_expression(parser, context)?;
        parser.expect_next(&[TokenKind::CloseBracket])?;
    }

    parser.expect_next(&[TokenKind::Equals])?;
    parse_expression(parser, context)?;
    parser.expect_next(&[TokenKind::Semicolon])?;
    parser.exit(Rule::LetStatement);

    Ok(())
}

// 'if' '(' expression ')' '{' statements '}' ('else' '{' statements '}')?
pub fn parse_if_stmt(parser: &mut Parser, context: &ClassContext) -> Result<(), SyntaxError> {
    parser.enter(Rule::IfStatement);
    parser.expect_next(&[TokenKind::If])?;
    parse_condition(parser, context)?;
    parse_block(parser, context)?;

    if parser.peek_is(TokenKind::Else) {
        parser.expect_next(&[TokenKind::Else])?;
        parse_block(parser, context)?;
    }

    parser.exit(Rule::IfStatement);
    Ok(())
}

// 'while' '(' expression ')' '{' statements '}'
pub fn parse_while_stmt(parser: &mut Parser, context: &ClassContext) -> Result<(), SyntaxError> {
    parser.enter(Rule::WhileStatement);
    parser.expect_next(&[TokenKind::While])?;
    parse_condition(parser, context)?;
    parse_block(parser, context)?;
    parser.exit(Rule::WhileStatement);

    Ok(())
}

// 'do' subroutineCall ';'
pub fn parse_do_stmt(parser: &mut Parser, context: &ClassContext) -> Result<(), SyntaxError> {
    parser.enter(Rule::DoStatement);
    parser.expect_next(&[TokenKind::Do])?;

    let name = parser.expect_next(&[TokenKind::Identifier])?;
    parse_subroutine_call(parser, context, name)?;

    parser.expect_next(&[TokenKind::Semicolon])?;
    parser.exit(Rule::DoStatement);

    Ok(())
}

// 'return' expression? ';'
pub fn parse_return_stmt(parser: &mut Parser, context: &ClassContext) -> Result<(), SyntaxError> {
    parser.enter(Rule::ReturnStatement);
    parser.expect_next(&[TokenKind::Return])?;

    if !parser.peek_is(TokenKind::Semicolon) {
        parse_expression(parser, context)?;
    }

    parser.expect_next(&[TokenKind::Semicolon])?;
    parser.exit(Rule::ReturnStatement);

    Ok(())
}

// '(' expression ')'
fn parse_condition(parser: &mut Parser, context: &ClassContext) -> Result<(), SyntaxError> {
    parser.expect_next(&[TokenKind::OpenParen])?;
    parse_expression(parser, context)?;
    parser.expect_next(&[TokenKind::CloseParen])?;

    Ok(())
}

// '{' statements '}'
fn parse_block(parser: &mut Parser, context: &ClassContext) -> Result<(), SyntaxError> {
    parser.expect_next(&[TokenKind::OpenCurly])?;
    parse_statements(parser, context)?;
    parser.expect_next(&[TokenKind::CloseCurly])?;

    Ok(())
}
