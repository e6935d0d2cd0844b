//! berd_ast: Token and Abstract Syntax Tree definitions.
//!
//! Defines the closed set of lexical categories ([`TokenKind`]), the token
//! record ([`Token`]), and the tagged-union AST the parser produces and the
//! evaluator walks. Every node reports a [`NodeKind`] discriminant and a
//! display name; serialization names the variant through a `kindName` field
//! and never writes the numeric discriminant.

pub mod node;
pub mod node_kind;
pub mod token;
pub mod token_kind;

pub use node::*;
pub use node_kind::NodeKind;
pub use token::Token;
pub use token_kind::TokenKind;

/// Render any AST fragment as pretty-printed JSON.
///
/// Used for AST dumps and for shape-violation diagnostics.
pub fn to_pretty_json<T: serde::Serialize + std::fmt::Debug>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| format!("{:#?}", value))
}
