//! berd_scanner: Tokenizer for berd source text.
//!
//! The scanner is context-free: every word is an [`Identifier`] token and
//! keywords only gain meaning in the parser's grammar table. It produces
//! the whole token sequence up front, always terminated by an end-of-input
//! token.
//!
//! [`Identifier`]: berd_ast::TokenKind::Identifier

mod char_codes;
mod error;
mod operators;
mod scanner;

pub use error::ScanError;
pub use scanner::{tokenize, Scanner};
