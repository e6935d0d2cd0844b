//! The token record produced by the scanner.

use crate::token_kind::TokenKind;
use berd_core::text::TextSpan;
use serde::Serialize;
use std::fmt;

/// A scanned token. Tokens are immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// The source text of the token; for whitespace runs, the run length.
    pub value: String,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    /// For [`TokenKind::CombinedAssignment`], the operator bundled with `=`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<TokenKind>,
    #[serde(skip)]
    pub span: TextSpan,
    /// 1-based line the token starts on.
    #[serde(skip)]
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, span: TextSpan, line: u32) -> Self {
        Self {
            value: value.into(),
            kind,
            operation: None,
            span,
            line,
        }
    }

    /// A combined-assignment token such as `+=`, carrying `operation` as its
    /// base operator.
    pub fn combined_assignment(
        operation: TokenKind,
        value: impl Into<String>,
        span: TextSpan,
        line: u32,
    ) -> Self {
        Self {
            value: value.into(),
            kind: TokenKind::CombinedAssignment,
            operation: Some(operation),
            span,
            line,
        }
    }

    /// Whether this is an identifier spelled exactly `word`.
    pub fn is_identifier(&self, word: &str) -> bool {
        self.kind == TokenKind::Identifier && self.value == word
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.operation) {
            (TokenKind::CombinedAssignment, Some(operation)) => {
                write!(f, "{}<{}>({})", self.kind, operation, self.value)
            }
            (TokenKind::Identifier | TokenKind::Number | TokenKind::String, _) => {
                write!(f, "{}({})", self.kind, self.value)
            }
            _ => write!(f, "{}()", self.kind),
        }
    }
}
