//! berd_evaluator: Tree-walking evaluation of berd programs.
//!
//! The [`Evaluator`] owns a dispatch table from [`berd_ast::NodeKind`] to an
//! evaluation function and walks a parsed program against a chain of
//! [`Scope`]s, producing a [`RuntimeValue`].

mod error;
mod evaluator;
mod scope;
mod value;

pub use error::EvalError;
pub use evaluator::{EvalFn, Evaluator};
pub use scope::{Binding, Scope};
pub use value::RuntimeValue;

use berd_ast::BlockStatement;
use berd_diagnostics::DiagnosticCollection;

/// Evaluate `program` against a fresh global scope.
///
/// Returns the program's value along with the diagnostics reported for
/// constructs the evaluator does not support yet.
pub fn evaluate(program: &BlockStatement) -> Result<(RuntimeValue, DiagnosticCollection), EvalError> {
    let scope = Scope::new();
    let mut evaluator = Evaluator::new();
    let value = evaluator.evaluate_program(program, &scope)?;
    Ok((value, evaluator.take_diagnostics()))
}
