use berd_core::text::TextSpan;
use berd_diagnostics::{messages, Diagnostic};
use thiserror::Error;

/// A fatal tokenizer error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// A character that starts no token and is not an ignorable control code.
    #[error("Unrecognized character found in source: {code} at position {offset}")]
    UnrecognizedCharacter {
        character: char,
        code: u32,
        /// Byte offset into the source.
        offset: usize,
        line: u32,
    },
}

impl ScanError {
    pub fn span(&self) -> TextSpan {
        match self {
            ScanError::UnrecognizedCharacter {
                character, offset, ..
            } => TextSpan::new(*offset as u32, character.len_utf8() as u32),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ScanError::UnrecognizedCharacter {
                character, code, ..
            } => Diagnostic::with_span(
                self.span(),
                &messages::INVALID_CHARACTER,
                &[&character.escape_debug().to_string(), &code.to_string()],
            ),
        }
    }
}
