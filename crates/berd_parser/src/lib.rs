//! berd_parser: Pratt parser for berd.
//!
//! Grammar rules are not hard-coded in a recursive-descent cascade: every
//! construct is a handler registered in [`Lookups`] against a token category
//! and, for identifiers, a keyword spelling. The [`Parser`] looks handlers
//! up as it walks the token sequence and climbs binding powers to build
//! expressions.

mod error;
mod expressions;
mod lookups;
mod parser;
mod precedence;
mod statements;

pub use error::ParseError;
pub use lookups::{LedHandler, Lookups, NudHandler, StmtHandler};
pub use parser::{ExpectOptions, Expected, Parser, DEFAULT_IGNORED};
pub use precedence::BindingPower;

use berd_ast::BlockStatement;

/// Tokenize and parse `source` into the program block.
pub fn parse(source: &str) -> Result<BlockStatement, ParseError> {
    let tokens = berd_scanner::tokenize(source)?;
    Parser::new(tokens).parse_program()
}
