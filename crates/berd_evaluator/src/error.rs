use berd_ast::NodeKind;
use berd_diagnostics::{messages, Diagnostic};
use thiserror::Error;

/// A fatal evaluation error. Evaluation stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// No evaluation function is registered for this node kind.
    #[error("This AST node type ({kind}) has not yet been setup for interpretation.")]
    Unhandled { kind: NodeKind },

    #[error("Cannot declare variable {name} as it's already defined.")]
    AlreadyDeclared { name: String },

    #[error("Cannot resolve {name} as it doesn't exist.")]
    Unresolved { name: String },

    /// A table entry was handed a node of another kind.
    #[error("Evaluation function for {expected} was called with a {found}")]
    Mismatch { expected: NodeKind, found: NodeKind },
}

impl EvalError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            EvalError::Unhandled { kind } => {
                Diagnostic::new(&messages::NODE_0_NOT_SET_UP, &[kind.name()])
            }
            EvalError::AlreadyDeclared { name } => {
                Diagnostic::new(&messages::CANNOT_REDECLARE_0, &[name.as_str()])
            }
            EvalError::Unresolved { name } => Diagnostic::new(&messages::CANNOT_FIND_NAME_0, &[name.as_str()]),
            EvalError::Mismatch { found, .. } => {
                Diagnostic::new(&messages::NODE_0_NOT_SET_UP, &[found.name()])
            }
        }
    }
}
