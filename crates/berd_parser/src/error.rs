use berd_ast::token_kind::kind_list;
use berd_ast::{Token, TokenKind};
use berd_core::text::TextSpan;
use berd_diagnostics::{messages, Diagnostic};
use berd_scanner::ScanError;
use thiserror::Error;

/// A fatal parse error. Parsing stops at the first one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// No prefix handler is registered for a token that has to start an
    /// expression.
    #[error("Expected NUD handler for token {token} at token {position}")]
    MissingPrefixHandler { token: Token, position: usize },

    /// A parsed node does not have the shape its context requires.
    #[error("{message}\n{node}")]
    InvalidShape {
        message: String,
        /// Pretty JSON dump of the offending node.
        node: String,
        span: TextSpan,
    },

    #[error("Expected {} but received {} instead", kind_list(.expected), .found.kind)]
    UnexpectedToken {
        expected: Vec<TokenKind>,
        found: Token,
    },

    #[error(
        "Expected identifier in {} but received {} with value '{}' instead",
        .expected.join(","),
        .found.kind,
        .found.value
    )]
    UnexpectedKeyword { expected: Vec<String>, found: Token },

    #[error("Unexpected '}}' outside of any block")]
    UnexpectedCloseBrace { token: Token },

    #[error("Invalid numeric literal '{}'", .token.value)]
    InvalidNumber { token: Token },
}

impl ParseError {
    pub fn span(&self) -> TextSpan {
        match self {
            ParseError::Scan(err) => err.span(),
            ParseError::MissingPrefixHandler { token, .. }
            | ParseError::UnexpectedCloseBrace { token }
            | ParseError::InvalidNumber { token } => token.span,
            ParseError::UnexpectedToken { found, .. }
            | ParseError::UnexpectedKeyword { found, .. } => found.span,
            ParseError::InvalidShape { span, .. } => *span,
        }
    }

    /// The 1-based line the error was found on, when known.
    pub fn line(&self) -> Option<u32> {
        match self {
            ParseError::Scan(ScanError::UnrecognizedCharacter { line, .. }) => Some(*line),
            ParseError::MissingPrefixHandler { token, .. }
            | ParseError::UnexpectedCloseBrace { token }
            | ParseError::InvalidNumber { token } => Some(token.line),
            ParseError::UnexpectedToken { found, .. }
            | ParseError::UnexpectedKeyword { found, .. } => Some(found.line),
            ParseError::InvalidShape { .. } => None,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let span = self.span();
        match self {
            ParseError::Scan(err) => err.to_diagnostic(),
            ParseError::MissingPrefixHandler { .. } => {
                Diagnostic::with_span(span, &messages::EXPRESSION_EXPECTED, &[])
            }
            ParseError::InvalidShape { message, .. } => {
                Diagnostic::with_span(span, &messages::INVALID_SHAPE, &[message])
            }
            ParseError::UnexpectedToken { expected, .. } => {
                let spellings: Vec<String> = expected
                    .iter()
                    .map(|kind| kind.text().map(str::to_string).unwrap_or_else(|| kind.to_string()))
                    .collect();
                Diagnostic::with_span(span, &messages::_0_EXPECTED, &[&spellings.join("' or '")])
            }
            ParseError::UnexpectedKeyword { expected, .. } => {
                Diagnostic::with_span(span, &messages::KEYWORD_0_EXPECTED, &[&expected.join(", ")])
            }
            ParseError::UnexpectedCloseBrace { .. } => {
                Diagnostic::with_span(span, &messages::DECLARATION_OR_STATEMENT_EXPECTED, &[])
            }
            ParseError::InvalidNumber { token } => {
                Diagnostic::with_span(span, &messages::INVALID_NUMERIC_LITERAL, &[&token.value])
            }
        }
    }
}
