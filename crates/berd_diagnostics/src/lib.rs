//! berd_diagnostics: Diagnostic messages and their catalogue.
//!
//! Non-fatal findings of every stage (scanner warnings, evaluator coverage
//! notes) are collected as [`Diagnostic`]s. Fatal errors are typed error enums
//! in their own crates and convert into diagnostics for plain-text output.

use berd_core::text::TextSpan;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

impl DiagnosticCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        }
    }
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalogue entry: numeric code, category and a message template whose
/// `{0}`, `{1}`, ... placeholders are filled when the diagnostic is raised.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// A raised diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Set once the diagnostic is attributed to a source file.
    pub file: Option<String>,
    pub span: Option<TextSpan>,
    pub message_text: String,
    pub code: u32,
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            span: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    pub fn with_span(span: TextSpan, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            span: Some(span),
            ..Self::new(message, args)
        }
    }

    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// `file(offset): category BDcode: text`, without the location part when the
/// diagnostic has no file.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            f.write_str(file)?;
            if let Some(span) = self.span {
                write!(f, "({})", span.start)?;
            }
            f.write_str(": ")?;
        }
        write!(f, "{} BD{}: {}", self.category, self.code, self.message_text)
    }
}

/// Fill `{0}`, `{1}`, ... in `template`.
pub fn format_message(template: &str, args: &[&str]) -> String {
    args.iter()
        .enumerate()
        .fold(template.to_string(), |text, (i, arg)| {
            text.replace(&format!("{{{}}}", i), arg)
        })
}

/// Diagnostics in the order they were raised.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// How many diagnostics have `category`.
    pub fn count(&self, category: DiagnosticCategory) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.category == category)
            .count()
    }
}

/// The diagnostic catalogue, grouped by the stage that raises each entry.
pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, $category:ident, $msg:expr) => {
            DiagnosticMessage {
                code: $code,
                category: DiagnosticCategory::$category,
                message: $msg,
            }
        };
    }

    // Scanner (1000-1099, 1127-1129)
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1002, Warning, "Unterminated string literal.");
    pub const ASTERISK_SLASH_EXPECTED: DiagnosticMessage = diag!(1010, Warning, "'*/' expected.");
    pub const INVALID_CHARACTER: DiagnosticMessage = diag!(1127, Error, "Invalid character '{0}' (code {1}).");
    pub const NON_STANDARD_CHARACTER: DiagnosticMessage = diag!(1129, Warning, "Non-standard character '{0}' (U+{1}) treated as part of an identifier.");

    // Parser (1005-1128)
    pub const _0_EXPECTED: DiagnosticMessage = diag!(1005, Error, "'{0}' expected.");
    pub const KEYWORD_0_EXPECTED: DiagnosticMessage = diag!(1006, Error, "One of {0} expected.");
    pub const EXPRESSION_EXPECTED: DiagnosticMessage = diag!(1109, Error, "Expression expected.");
    pub const INVALID_SHAPE: DiagnosticMessage = diag!(1110, Error, "{0}");
    pub const INVALID_NUMERIC_LITERAL: DiagnosticMessage = diag!(1125, Error, "Invalid numeric literal '{0}'.");
    pub const DECLARATION_OR_STATEMENT_EXPECTED: DiagnosticMessage = diag!(1128, Error, "Declaration or statement expected.");

    // Evaluator (2000-2999)
    pub const CANNOT_FIND_NAME_0: DiagnosticMessage = diag!(2304, Error, "Cannot find name '{0}'.");
    pub const CANNOT_REDECLARE_0: DiagnosticMessage = diag!(2451, Error, "Cannot redeclare variable '{0}'.");
    pub const NODE_0_NOT_SET_UP: DiagnosticMessage = diag!(2800, Error, "This AST node type ({0}) has not yet been set up for interpretation.");

    // Evaluator coverage (9000+)
    pub const NODE_0_UNDER_CONSTRUCTION: DiagnosticMessage = diag!(9001, Message, "This AST node type ({0}) is under construction.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        assert_eq!(
            format_message("'{0}' expected, found '{1}'.", &["}", "!"]),
            "'}' expected, found '!'."
        );
        assert_eq!(format_message("Expression expected.", &[]), "Expression expected.");
    }

    #[test]
    fn test_display() {
        let diag = Diagnostic::with_span(TextSpan::new(4, 1), &messages::_0_EXPECTED, &["!"]);
        assert_eq!(diag.to_string(), "error BD1005: '!' expected.");
        assert_eq!(
            diag.in_file("main.bd").to_string(),
            "main.bd(4): error BD1005: '!' expected."
        );
    }

    #[test]
    fn test_count_by_category() {
        let mut collection = DiagnosticCollection::new();
        collection.add(Diagnostic::new(&messages::NODE_0_UNDER_CONSTRUCTION, &["WhenStatement"]));
        collection.add(Diagnostic::new(&messages::UNTERMINATED_STRING_LITERAL, &[]));
        collection.add(Diagnostic::new(&messages::NODE_0_UNDER_CONSTRUCTION, &["CallExpression"]));
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.count(DiagnosticCategory::Message), 2);
        assert_eq!(collection.count(DiagnosticCategory::Error), 0);
    }
}
