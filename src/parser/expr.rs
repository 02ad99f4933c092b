//! Expression, term and subroutine-call rules.
//!
//! Jack has no operator precedence: `expression` is a flat, left-to-right
//! sequence of terms separated by operators, so `1-2-3` is recorded as
//! `term - term - term` with no grouping.

use crate::{
    errors::errors::{ErrorImpl, SyntaxError},
    lexer::tokens::{Token, TokenKind},
    trace::trace::Rule,
};

use super::{
    lookups::{KEYWORD_CONSTANTS, OPERATORS, UNARY_OPERATORS},
    parser::{CallSite, ClassContext, Parser},
};

// expression -> term (op term)*
pub fn parse_expression(parser: &mut Parser, context: &ClassContext) -> Result<(), SyntaxError> {
    parser.descend()?;
    parser.enter(Rule::Expression);

    parse_term(parser, context)?;
    while parser.peek_is_one_of(OPERATORS) {
        parser.expect_next(OPERATORS)?;
        parse_term(parser, context)?;
    }

    parser.exit(Rule::Expression);
    parser.ascend();

    Ok(())
}

// term -> integerConstant | stringConstant | keywordConstant | varName
//       | varName '[' expression ']' | subroutineCall | '(' expression ')'
//       | unaryOp term
pub fn parse_term(parser: &mut Parser, context: &ClassContext) -> Result<(), SyntaxError> {
    parser.descend()?;
    parser.enter(Rule::Term);

    match parser.peek_kind() {
        kind @ (TokenKind::Number | TokenKind::String) => {
            parser.expect_next(&[kind])?;
        }
        kind if KEYWORD_CONSTANTS.contains(&kind) => {
            parser.expect_next(KEYWORD_CONSTANTS)?;
        }
        TokenKind::Identifier => {
            let name = parser.expect_next(&[TokenKind::Identifier])?;

            if parser.peek_is_one_of(&[TokenKind::OpenParen, TokenKind::Dot]) {
                parse_subroutine_call(parser, context, name)?;
            } else if parser.peek_is(TokenKind::OpenBracket) {
                parser.expect_next(&[TokenKind::OpenBracket])?;
                parse_expression(parser, context)?;
                parser.expect_next(&[TokenKind::CloseBracket])?;
            }
        }
        TokenKind::OpenParen => {
            parser.expect_next(&[TokenKind::OpenParen])?;
            parse_expression(parser, context)?;
            parser.expect_next(&[TokenKind::CloseParen])?;
        }
        kind if UNARY_OPERATORS.contains(&kind) => {
            parser.expect_next(UNARY_OPERATORS)?;
            parse_term(parser, context)?;
        }
        _ => return Err(parser.error_at_lookahead(ErrorImpl::TermExpected)),
    }

    parser.exit(Rule::Term);
    parser.ascend();

    Ok(())
}

/// subroutineCall -> subroutineName '(' expressionList ')'
///                 | (className | varName) '.' subroutineName '(' expressionList ')'
///
/// `name` is the leading identifier, already consumed by the caller. A bare
/// `name(...)` is qualified with the enclosing class.
pub fn parse_subroutine_call(
    parser: &mut Parser,
    context: &ClassContext,
    name: Token,
) -> Result<CallSite, SyntaxError> {
    let separator = parser.expect_next(&[TokenKind::OpenParen, TokenKind::Dot])?;

    let implicit_this = separator.kind == TokenKind::OpenParen;
    let target = if separator.kind == TokenKind::Dot {
        let subroutine = parser.expect_next(&[TokenKind::Identifier])?;
        parser.expect_next(&[TokenKind::OpenParen])?;
        format!("{}.{}", name.value, subroutine.value)
    } else {
        context.qualify(&name.value)
    };

    let arguments = parse_expression_list(parser, context)?;
    parser.expect_next(&[TokenKind::CloseParen])?;

    let call = CallSite {
        target,
        arguments,
        implicit_this,
        line: name.line,
    };
    parser.record_call(call.clone());

    Ok(call)
}

/// expressionList -> (expression (',' expression)*)?
///
/// Returns the number of expressions; an immediate `)` gives zero.
pub fn parse_expression_list(parser: &mut Parser, context: &ClassContext) -> Result<usize, SyntaxError> {
    parser.enter(Rule::ExpressionList);

    let mut count = 0;
    if !parser.peek_is(TokenKind::CloseParen) {
        parse_expression(parser, context)?;
        count = 1;

        while parser.peek_is(TokenKind::Comma) {
            parser.expect_next(&[TokenKind::Comma])?;
            parse_expression(parser, context)?;
            count += 1;
        }
    }

    parser.exit(Rule::ExpressionList);
    Ok(count)
}
