//! Expression handlers (nud and led).

use crate::error::ParseError;
use crate::parser::Parser;
use crate::precedence::BindingPower;
use berd_ast::{
    to_pretty_json, AssignmentExpression, BinaryExpression, CallExpression, Expression,
    MemberExpression, PrefixExpression, Reference, StateExpression, Token, TokenKind,
};
use berd_core::text::TextSpan;

const STATE_KEYWORDS: &[&str] = &["previous", "next", "current"];

impl Parser {
    // ========================================================================
    // Prefix (nud)
    // ========================================================================

    pub(crate) fn parse_primary_expression(&mut self) -> Result<Expression, ParseError> {
        let token = self.expect(&[TokenKind::Number, TokenKind::String, TokenKind::Identifier])?;
        match token.kind {
            TokenKind::Number => match token.value.parse::<f64>() {
                Ok(value) => Ok(Expression::number(value)),
                Err(_) => Err(ParseError::InvalidNumber { token }),
            },
            TokenKind::String => Ok(Expression::string(token.value)),
            _ => Ok(Expression::symbol(token.value)),
        }
    }

    pub(crate) fn parse_grouping_expression(&mut self) -> Result<Expression, ParseError> {
        self.expect(&[TokenKind::OpenParen])?;
        let expression = self.parse_expression(BindingPower::DefaultBp)?;
        self.expect(&[TokenKind::CloseParen])?;
        Ok(expression)
    }

    /// `-x`, `;x` or `~x`.
    pub(crate) fn parse_prefix_expression(&mut self) -> Result<Expression, ParseError> {
        let prefix = self.expect(&[
            TokenKind::Subtract,
            TokenKind::LogicalNot,
            TokenKind::BitwiseNot,
        ])?;
        let right = self.parse_expression(BindingPower::Prefix)?;
        Ok(Expression::Prefix(PrefixExpression {
            prefix,
            right: Box::new(right),
        }))
    }

    /// `++x`, `--x`, `previous x`, `next x` or `current x`, where `x` is a
    /// symbol or a member access.
    pub(crate) fn parse_state_expression(&mut self) -> Result<Expression, ParseError> {
        let operator = if self.check_identifier(STATE_KEYWORDS) {
            self.expect_identifier(STATE_KEYWORDS)?
        } else {
            self.expect(&[TokenKind::PlusPlus, TokenKind::MinusMinus])?
        };

        let argument = self.parse_expression(BindingPower::Prefix)?;
        let argument = into_reference(
            argument,
            operator.span,
            "Expected a variable expression but instead got",
        )?;

        Ok(Expression::State(StateExpression {
            operator,
            argument: Box::new(argument),
        }))
    }

    // ========================================================================
    // Infix (led)
    // ========================================================================

    /// The cursor is on the operator.
    pub(crate) fn parse_binary_expression(
        &mut self,
        left: Expression,
        binding_power: BindingPower,
    ) -> Result<Expression, ParseError> {
        let operator = self.advance(1);
        let right = self.parse_expression(binding_power)?;
        Ok(Expression::Binary(BinaryExpression {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    /// `target = value` or `target op= value`. A combined assignment is
    /// rewritten to `target = target op value`.
    pub(crate) fn parse_assignment_expression(
        &mut self,
        left: Expression,
        _binding_power: BindingPower,
    ) -> Result<Expression, ParseError> {
        let assignee = into_reference(
            left,
            self.current().span,
            "Expected a variable expression to assign to but instead got",
        )?;

        let assignment = self.expect(&[TokenKind::CombinedAssignment, TokenKind::EqualSign])?;
        let mut value = self.parse_expression(BindingPower::Assignment)?;

        if let Some(operation) = assignment.operation {
            value = Expression::Binary(BinaryExpression {
                left: Box::new(assignee.clone().into_expression()),
                operator: operator_of(&assignment, operation),
                right: Box::new(value),
            });
        }

        Ok(Expression::Assignment(AssignmentExpression {
            assignee: Box::new(assignee),
            assigned_value: Box::new(value),
        }))
    }

    /// `object.property` or `object[expression]`.
    pub(crate) fn parse_member_expression(
        &mut self,
        left: Expression,
        binding_power: BindingPower,
    ) -> Result<Expression, ParseError> {
        let (property, computed) = match self.current().kind {
            TokenKind::Dot => {
                let dot = self.expect(&[TokenKind::Dot])?;
                let property = self.parse_expression(binding_power)?;
                if !matches!(property, Expression::Symbol(_) | Expression::Number(_)) {
                    return Err(invalid_shape(
                        format!(
                            "When parsing memberExpression, expected SymbolExpression or NumberExpression but got {} instead",
                            property.kind_name()
                        ),
                        &property,
                        dot.span,
                    ));
                }
                (property, false)
            }
            _ => {
                self.expect(&[TokenKind::OpenBracket])?;
                let property = self.parse_expression(BindingPower::DefaultBp)?;
                self.expect(&[TokenKind::CloseBracket])?;
                (property, true)
            }
        };

        Ok(Expression::Member(MemberExpression {
            object: Box::new(left),
            property: Box::new(property),
            computed,
        }))
    }

    /// `callee(a, b)`. No trailing comma.
    pub(crate) fn parse_call_expression(
        &mut self,
        left: Expression,
        _binding_power: BindingPower,
    ) -> Result<Expression, ParseError> {
        self.expect(&[TokenKind::OpenParen])?;

        let mut arguments = Vec::new();
        loop {
            self.skip_ignorable();
            if self.current().kind == TokenKind::CloseParen {
                break;
            }
            if !arguments.is_empty() {
                self.expect(&[TokenKind::Comma])?;
            }
            arguments.push(self.parse_expression(BindingPower::DefaultBp)?);
        }
        self.expect(&[TokenKind::CloseParen])?;

        Ok(Expression::Call(CallExpression {
            callee: Box::new(left),
            arguments,
        }))
    }
}

/// Narrow `expression` to a symbol or member reference.
fn into_reference(
    expression: Expression,
    span: TextSpan,
    message: &str,
) -> Result<Reference, ParseError> {
    Reference::try_from(expression).map_err(|expression| {
        invalid_shape(
            format!("{} {}", message, expression.kind_name()),
            &expression,
            span,
        )
    })
}

fn invalid_shape(message: String, node: &Expression, span: TextSpan) -> ParseError {
    ParseError::InvalidShape {
        message,
        node: to_pretty_json(node),
        span,
    }
}

/// The plain operator token bundled in a combined assignment: `+=` gives `+`.
fn operator_of(assignment: &Token, operation: TokenKind) -> Token {
    let value = assignment
        .value
        .strip_suffix('=')
        .unwrap_or(&assignment.value)
        .to_string();
    let span = TextSpan::new(assignment.span.start, value.len() as u32);
    Token::new(operation, value, span, assignment.line)
}
