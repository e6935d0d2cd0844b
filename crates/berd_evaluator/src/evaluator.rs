//! The evaluation dispatch table and the evaluation functions behind it.

use crate::error::EvalError;
use crate::scope::Scope;
use crate::value::RuntimeValue;
use berd_ast::{
    BlockStatement, ElseBranch, Expression, IfStatement, Node, NodeKind, Reference, Statement,
    Token, TokenKind,
};
use berd_diagnostics::{messages, Diagnostic, DiagnosticCollection};
use log::{debug, trace};
use rustc_hash::FxHashMap;

/// Evaluates one node against a scope.
pub type EvalFn = fn(&mut Evaluator, Node<'_>, &Scope<'_>) -> Result<RuntimeValue, EvalError>;

/// Walks a program, dispatching on each node's kind.
///
/// The table is built once per evaluator, so independent evaluators never
/// share state.
pub struct Evaluator {
    table: FxHashMap<NodeKind, EvalFn>,
    diagnostics: DiagnosticCollection,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        let mut evaluator = Self {
            table: FxHashMap::default(),
            diagnostics: DiagnosticCollection::new(),
        };

        // Statements
        evaluator.register(NodeKind::ExpressionStatement, eval_expression_statement);
        evaluator.register(NodeKind::BlockStatement, eval_block_statement);
        evaluator.register(NodeKind::VariableDeclarationStatement, eval_variable_declaration);
        evaluator.register(NodeKind::FunctionDeclarationStatement, under_construction);
        evaluator.register(NodeKind::ReturnStatement, under_construction);
        evaluator.register(NodeKind::IfStatement, eval_if_statement);
        evaluator.register(NodeKind::WhenStatement, under_construction);

        // Expressions
        evaluator.register(NodeKind::AssignmentExpression, eval_assignment_expression);
        evaluator.register(NodeKind::PrefixExpression, eval_prefix_expression);
        evaluator.register(NodeKind::StateExpression, under_construction);
        evaluator.register(NodeKind::BinaryExpression, eval_binary_expression);
        evaluator.register(NodeKind::NumberExpression, eval_number_expression);
        evaluator.register(NodeKind::StringExpression, eval_string_expression);
        evaluator.register(NodeKind::SymbolExpression, eval_symbol_expression);
        evaluator.register(NodeKind::CallExpression, under_construction);

        // Sentinels
        evaluator.register(NodeKind::EofStatement, under_construction);
        evaluator.register(NodeKind::EndOfBlockStatement, under_construction);

        evaluator
    }

    /// Install or replace the function for `kind`.
    pub fn register(&mut self, kind: NodeKind, function: EvalFn) {
        self.table.insert(kind, function);
    }

    pub fn is_registered(&self, kind: NodeKind) -> bool {
        self.table.contains_key(&kind)
    }

    /// Diagnostics reported so far.
    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    /// Evaluate any node. A kind without a table entry is an error.
    pub fn evaluate<'n>(
        &mut self,
        node: impl Into<Node<'n>>,
        scope: &Scope<'_>,
    ) -> Result<RuntimeValue, EvalError> {
        let node = node.into();
        let kind = node.kind();
        let Some(function) = self.table.get(&kind).copied() else {
            return Err(EvalError::Unhandled { kind });
        };
        trace!(target: "evaluator", "evaluate {}", kind);
        function(self, node, scope)
    }

    /// Evaluate the top-level block of a program in `scope`.
    pub fn evaluate_program(
        &mut self,
        program: &BlockStatement,
        scope: &Scope<'_>,
    ) -> Result<RuntimeValue, EvalError> {
        let value = self.evaluate_block(program, scope)?;
        debug!(target: "evaluator", "program evaluated to {}", value);
        Ok(value)
    }

    /// Evaluate each statement in order, in `scope`. The value is that of the
    /// last statement, or null for an empty block.
    pub fn evaluate_block(
        &mut self,
        block: &BlockStatement,
        scope: &Scope<'_>,
    ) -> Result<RuntimeValue, EvalError> {
        let mut last = RuntimeValue::Null;
        for statement in &block.body {
            last = self.evaluate(statement, scope)?;
        }
        Ok(last)
    }

    fn evaluate_if(
        &mut self,
        statement: &IfStatement,
        scope: &Scope<'_>,
    ) -> Result<RuntimeValue, EvalError> {
        if self.evaluate(&statement.test, scope)?.is_truthy() {
            return self.evaluate_block(&statement.consequent, scope);
        }
        match &statement.alternate {
            Some(ElseBranch::If(alternate)) => self.evaluate_if(alternate, scope),
            Some(ElseBranch::Block(alternate)) => self.evaluate_block(alternate, scope),
            None => Ok(RuntimeValue::Null),
        }
    }

    /// Record that `kind` is not supported yet.
    fn report_under_construction(&mut self, kind: NodeKind) {
        debug!(target: "evaluator", "{} is under construction", kind);
        self.diagnostics.add(Diagnostic::new(
            &messages::NODE_0_UNDER_CONSTRUCTION,
            &[kind.name()],
        ));
    }
}

fn mismatch(expected: NodeKind, node: Node<'_>) -> EvalError {
    EvalError::Mismatch {
        expected,
        found: node.kind(),
    }
}

// ============================================================================
// Statements
// ============================================================================

fn eval_expression_statement(
    evaluator: &mut Evaluator,
    node: Node<'_>,
    scope: &Scope<'_>,
) -> Result<RuntimeValue, EvalError> {
    let Node::Statement(Statement::Expression(statement)) = node else {
        return Err(mismatch(NodeKind::ExpressionStatement, node));
    };
    evaluator.evaluate(&statement.expression, scope)
}

fn eval_block_statement(
    evaluator: &mut Evaluator,
    node: Node<'_>,
    scope: &Scope<'_>,
) -> Result<RuntimeValue, EvalError> {
    let Node::Statement(Statement::Block(block)) = node else {
        return Err(mismatch(NodeKind::BlockStatement, node));
    };
    evaluator.evaluate_block(block, scope)
}

fn eval_variable_declaration(
    evaluator: &mut Evaluator,
    node: Node<'_>,
    scope: &Scope<'_>,
) -> Result<RuntimeValue, EvalError> {
    let Node::Statement(Statement::VariableDeclaration(declaration)) = node else {
        return Err(mismatch(NodeKind::VariableDeclarationStatement, node));
    };
    let value = match &declaration.value {
        Some(value) => evaluator.evaluate(value, scope)?,
        None => RuntimeValue::Undefined,
    };
    scope.declare(
        &declaration.identifier,
        value,
        declaration.modifiers,
        declaration.lifetime,
    )
}

fn eval_if_statement(
    evaluator: &mut Evaluator,
    node: Node<'_>,
    scope: &Scope<'_>,
) -> Result<RuntimeValue, EvalError> {
    let Node::Statement(Statement::If(statement)) = node else {
        return Err(mismatch(NodeKind::IfStatement, node));
    };
    evaluator.evaluate_if(statement, scope)
}

/// Registered kinds whose semantics are not implemented: report and yield
/// null.
fn under_construction(
    evaluator: &mut Evaluator,
    node: Node<'_>,
    _scope: &Scope<'_>,
) -> Result<RuntimeValue, EvalError> {
    evaluator.report_under_construction(node.kind());
    Ok(RuntimeValue::Null)
}

// ============================================================================
// Expressions
// ============================================================================

fn eval_assignment_expression(
    evaluator: &mut Evaluator,
    node: Node<'_>,
    scope: &Scope<'_>,
) -> Result<RuntimeValue, EvalError> {
    let Node::Expression(Expression::Assignment(assignment)) = node else {
        return Err(mismatch(NodeKind::AssignmentExpression, node));
    };
    let value = evaluator.evaluate(assignment.assigned_value.as_ref(), scope)?;
    match assignment.assignee.as_ref() {
        Reference::Symbol(symbol) => scope.assign(&symbol.symbol, value),
        // Member targets need object values; the right side still runs.
        Reference::Member(_) => {
            evaluator.report_under_construction(NodeKind::MemberExpression);
            Ok(RuntimeValue::Null)
        }
    }
}

fn eval_prefix_expression(
    evaluator: &mut Evaluator,
    node: Node<'_>,
    scope: &Scope<'_>,
) -> Result<RuntimeValue, EvalError> {
    let Node::Expression(Expression::Prefix(prefix)) = node else {
        return Err(mismatch(NodeKind::PrefixExpression, node));
    };
    let operand = evaluator.evaluate(prefix.right.as_ref(), scope)?;
    if operand.is_nullish() {
        return Ok(RuntimeValue::Null);
    }
    Ok(match prefix.prefix.kind {
        TokenKind::Subtract => RuntimeValue::Number(-operand.to_number()),
        TokenKind::LogicalNot => RuntimeValue::Boolean(!operand.is_truthy()),
        TokenKind::BitwiseNot => RuntimeValue::Number(f64::from(!operand.to_int32())),
        _ => RuntimeValue::Null,
    })
}

fn eval_binary_expression(
    evaluator: &mut Evaluator,
    node: Node<'_>,
    scope: &Scope<'_>,
) -> Result<RuntimeValue, EvalError> {
    let Node::Expression(Expression::Binary(binary)) = node else {
        return Err(mismatch(NodeKind::BinaryExpression, node));
    };
    // Both sides always run, logical operators included.
    let left = evaluator.evaluate(binary.left.as_ref(), scope)?;
    let right = evaluator.evaluate(binary.right.as_ref(), scope)?;
    Ok(binary_operation(&left, &binary.operator, &right))
}

fn eval_number_expression(
    _evaluator: &mut Evaluator,
    node: Node<'_>,
    _scope: &Scope<'_>,
) -> Result<RuntimeValue, EvalError> {
    match node {
        Node::Expression(Expression::Number(number)) => Ok(RuntimeValue::Number(number.value)),
        _ => Err(mismatch(NodeKind::NumberExpression, node)),
    }
}

fn eval_string_expression(
    _evaluator: &mut Evaluator,
    node: Node<'_>,
    _scope: &Scope<'_>,
) -> Result<RuntimeValue, EvalError> {
    match node {
        Node::Expression(Expression::String(string)) => Ok(RuntimeValue::string(&string.value)),
        _ => Err(mismatch(NodeKind::StringExpression, node)),
    }
}

fn eval_symbol_expression(
    _evaluator: &mut Evaluator,
    node: Node<'_>,
    scope: &Scope<'_>,
) -> Result<RuntimeValue, EvalError> {
    match node {
        Node::Expression(Expression::Symbol(symbol)) => scope.lookup(&symbol.symbol),
        _ => Err(mismatch(NodeKind::SymbolExpression, node)),
    }
}

/// Combine two evaluated operands. Operators without a defined result
/// (`=`, `====`, `;===`) yield null.
fn binary_operation(left: &RuntimeValue, operator: &Token, right: &RuntimeValue) -> RuntimeValue {
    use RuntimeValue::{Boolean, Number};

    match operator.kind {
        // Comparison
        TokenKind::Smaller => Boolean(compare(left, right, |a, b| a < b, |a, b| a < b)),
        TokenKind::Greater => Boolean(compare(left, right, |a, b| a > b, |a, b| a > b)),
        TokenKind::SmallerEq => Boolean(compare(left, right, |a, b| a <= b, |a, b| a <= b)),
        TokenKind::GreaterEq => Boolean(compare(left, right, |a, b| a >= b, |a, b| a >= b)),
        TokenKind::Equals => Boolean(left.loose_equals(right)),
        TokenKind::NotEq => Boolean(!left.loose_equals(right)),
        TokenKind::StrongEq => Boolean(left.strict_equals(right)),
        TokenKind::StrongNotEq => Boolean(!left.strict_equals(right)),

        // Arithmetic
        TokenKind::Add => match (left, right) {
            (RuntimeValue::String(_), _) | (_, RuntimeValue::String(_)) => {
                RuntimeValue::String(format!("{}{}", left, right))
            }
            _ => Number(left.to_number() + right.to_number()),
        },
        TokenKind::Subtract => Number(left.to_number() - right.to_number()),
        TokenKind::Multiply => Number(left.to_number() * right.to_number()),
        TokenKind::Divide => Number(left.to_number() / right.to_number()),
        TokenKind::Modulo => Number(left.to_number() % right.to_number()),
        TokenKind::Exponent => Number(power(left.to_number(), right.to_number())),

        // Logical
        TokenKind::LogicalAnd => Boolean(left.is_truthy() && right.is_truthy()),
        TokenKind::LogicalOr => Boolean(left.is_truthy() || right.is_truthy()),

        // Bitwise
        TokenKind::BitwiseAnd => Number(f64::from(left.to_int32() & right.to_int32())),
        TokenKind::BitwiseOr => Number(f64::from(left.to_int32() | right.to_int32())),
        TokenKind::BitwiseXor => Number(f64::from(left.to_int32() ^ right.to_int32())),
        TokenKind::BitShiftLeft | TokenKind::BitShiftUnsignedLeft => {
            Number(f64::from(left.to_int32().wrapping_shl(shift_count(right))))
        }
        TokenKind::BitShiftRight => {
            Number(f64::from(left.to_int32().wrapping_shr(shift_count(right))))
        }
        TokenKind::BitShiftUnsignedRight => {
            Number(f64::from(left.to_uint32().wrapping_shr(shift_count(right))))
        }

        _ => RuntimeValue::Null,
    }
}

/// Relational comparison: text order when both sides are strings, numeric
/// order otherwise.
fn compare(
    left: &RuntimeValue,
    right: &RuntimeValue,
    text: fn(&str, &str) -> bool,
    number: fn(f64, f64) -> bool,
) -> bool {
    match (left, right) {
        (RuntimeValue::String(a), RuntimeValue::String(b)) => text(a, b),
        _ => number(left.to_number(), right.to_number()),
    }
}

fn shift_count(value: &RuntimeValue) -> u32 {
    value.to_uint32() & 0x1f
}

fn power(base: f64, exponent: f64) -> f64 {
    if exponent.is_nan() || (base.abs() == 1.0 && exponent.is_infinite()) {
        return f64::NAN;
    }
    base.powf(exponent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use berd_core::text::TextSpan;

    fn apply(left: RuntimeValue, kind: TokenKind, right: RuntimeValue) -> RuntimeValue {
        let operator = Token::new(kind, kind.text().unwrap_or(""), TextSpan::empty(0), 1);
        binary_operation(&left, &operator, &right)
    }

    #[test]
    fn test_shifts() {
        let n = RuntimeValue::Number;
        assert_eq!(apply(n(1.0), TokenKind::BitShiftLeft, n(33.0)), n(2.0));
        assert_eq!(apply(n(1.0), TokenKind::BitShiftUnsignedLeft, n(3.0)), n(8.0));
        assert_eq!(apply(n(-8.0), TokenKind::BitShiftRight, n(1.0)), n(-4.0));
        assert_eq!(
            apply(n(-1.0), TokenKind::BitShiftUnsignedRight, n(0.0)),
            n(4_294_967_295.0)
        );
    }

    #[test]
    fn test_power_edge_cases() {
        assert_eq!(power(2.0, 10.0), 1024.0);
        assert!(power(1.0, f64::NAN).is_nan());
        assert!(power(-1.0, f64::INFINITY).is_nan());
    }

    #[test]
    fn test_string_comparison_is_lexicographic() {
        assert_eq!(
            apply("10".into(), TokenKind::Smaller, "9".into()),
            RuntimeValue::Boolean(true)
        );
        assert_eq!(
            apply("10".into(), TokenKind::Smaller, RuntimeValue::Number(9.0)),
            RuntimeValue::Boolean(false)
        );
    }
}
