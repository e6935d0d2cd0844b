//! The grammar table.
//!
//! Three registries map a token category to an ordered list of handlers.
//! Registration prepends, so the newest entry for a category wins. Entries
//! registered with a keyword only apply to identifier tokens spelled exactly
//! that way; an identifier with no keyword entry falls back to the entries
//! registered without one.

use crate::error::ParseError;
use crate::parser::Parser;
use crate::precedence::BindingPower;
use berd_ast::{Expression, Statement, Token, TokenKind};
use rustc_hash::FxHashMap;

pub type StmtHandler = fn(&mut Parser) -> Result<Statement, ParseError>;
pub type NudHandler = fn(&mut Parser) -> Result<Expression, ParseError>;
pub type LedHandler = fn(&mut Parser, Expression, BindingPower) -> Result<Expression, ParseError>;

#[derive(Clone, Copy)]
struct Entry<H> {
    handler: H,
    binding_power: BindingPower,
    /// Empty for entries that are not keyword specific.
    keyword: &'static str,
}

type Registry<H> = FxHashMap<TokenKind, Vec<Entry<H>>>;

/// Statement, prefix (nud) and infix (led) handler registries.
pub struct Lookups {
    stmt: Registry<StmtHandler>,
    nud: Registry<NudHandler>,
    led: Registry<LedHandler>,
}

impl Lookups {
    /// An empty table.
    pub fn empty() -> Self {
        Self {
            stmt: FxHashMap::default(),
            nud: FxHashMap::default(),
            led: FxHashMap::default(),
        }
    }

    /// The berd grammar.
    pub fn new() -> Self {
        use BindingPower as Bp;
        use TokenKind::*;

        let mut lookups = Self::empty();

        // Prefix expressions
        lookups.nud(Subtract, Bp::Prefix, Parser::parse_prefix_expression);
        lookups.nud(LogicalNot, Bp::Prefix, Parser::parse_prefix_expression);
        lookups.nud(BitwiseNot, Bp::Prefix, Parser::parse_prefix_expression);

        lookups.nud(PlusPlus, Bp::Prefix, Parser::parse_state_expression);
        lookups.nud(MinusMinus, Bp::Prefix, Parser::parse_state_expression);

        // Operators
        lookups.led(LogicalOr, Bp::LogicalOr, Parser::parse_binary_expression);
        lookups.led(LogicalAnd, Bp::LogicalAnd, Parser::parse_binary_expression);
        lookups.led(BitwiseOr, Bp::BitwiseOr, Parser::parse_binary_expression);
        lookups.led(BitwiseXor, Bp::BitwiseXor, Parser::parse_binary_expression);
        lookups.led(BitwiseAnd, Bp::BitwiseAnd, Parser::parse_binary_expression);

        for kind in [Equals, NotEq, StrongEq, StrongNotEq, StrongestEq, StrongestNotEq] {
            lookups.led(kind, Bp::Equality, Parser::parse_binary_expression);
        }
        for kind in [Smaller, Greater, SmallerEq, GreaterEq] {
            lookups.led(kind, Bp::Relational, Parser::parse_binary_expression);
        }
        for kind in [BitShiftLeft, BitShiftRight, BitShiftUnsignedLeft, BitShiftUnsignedRight] {
            lookups.led(kind, Bp::BitwiseShift, Parser::parse_binary_expression);
        }

        lookups.led(Add, Bp::Additive, Parser::parse_binary_expression);
        lookups.led(Subtract, Bp::Additive, Parser::parse_binary_expression);

        lookups.led(Multiply, Bp::Multiplicative, Parser::parse_binary_expression);
        lookups.led(Divide, Bp::Multiplicative, Parser::parse_binary_expression);
        lookups.led(Modulo, Bp::Multiplicative, Parser::parse_binary_expression);

        lookups.led(Exponent, Bp::Exponentiation, Parser::parse_binary_expression);

        // Primary
        lookups.nud(Number, Bp::Primary, Parser::parse_primary_expression);
        lookups.nud(String, Bp::Primary, Parser::parse_primary_expression);
        lookups.nud(Identifier, Bp::Primary, Parser::parse_primary_expression);

        // Grouping, member access and calls
        lookups.nud(OpenParen, Bp::Grouping, Parser::parse_grouping_expression);
        lookups.led(Dot, Bp::AccessCallNew, Parser::parse_member_expression);
        lookups.led(OpenBracket, Bp::AccessCallNew, Parser::parse_member_expression);
        lookups.led(OpenParen, Bp::AccessCallNew, Parser::parse_call_expression);

        for keyword in ["previous", "next", "current"] {
            lookups.nud_keyword(keyword, Bp::Prefix, Parser::parse_state_expression);
        }

        // Assignment
        lookups.led(EqualSign, Bp::Assignment, Parser::parse_assignment_expression);
        lookups.led(CombinedAssignment, Bp::Assignment, Parser::parse_assignment_expression);

        // Statements
        lookups.stmt_keyword("const", Parser::parse_variable_declaration_statement);
        lookups.stmt_keyword("var", Parser::parse_variable_declaration_statement);
        lookups.stmt_keyword("function", Parser::parse_function_declaration_statement);
        lookups.stmt_keyword("async", Parser::parse_function_declaration_statement);
        lookups.stmt_keyword("return", Parser::parse_return_statement);
        lookups.stmt_keyword("if", Parser::parse_if_statement);
        lookups.stmt_keyword("when", Parser::parse_when_statement);

        lookups.stmt(OpenCurly, |parser| parser.parse_block_statement().map(Statement::Block));
        lookups.stmt(EndOfFile, Parser::parse_end_of_file_statement);

        lookups
    }

    // ========================================================================
    // Registration
    // ========================================================================

    pub fn stmt(&mut self, kind: TokenKind, handler: StmtHandler) {
        register(&mut self.stmt, kind, "", BindingPower::DefaultBp, handler);
    }

    pub fn stmt_keyword(&mut self, keyword: &'static str, handler: StmtHandler) {
        register(&mut self.stmt, TokenKind::Identifier, keyword, BindingPower::DefaultBp, handler);
    }

    pub fn nud(&mut self, kind: TokenKind, binding_power: BindingPower, handler: NudHandler) {
        register(&mut self.nud, kind, "", binding_power, handler);
    }

    pub fn nud_keyword(
        &mut self,
        keyword: &'static str,
        binding_power: BindingPower,
        handler: NudHandler,
    ) {
        register(&mut self.nud, TokenKind::Identifier, keyword, binding_power, handler);
    }

    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, handler: LedHandler) {
        register(&mut self.led, kind, "", binding_power, handler);
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// The statement handler for `token`, if any.
    pub fn get_stmt(&self, token: &Token) -> Option<StmtHandler> {
        resolve(&self.stmt, token).map(|entry| entry.handler)
    }

    /// The prefix handler for `token` and its binding power, if any.
    pub fn get_nud(&self, token: &Token) -> Option<(NudHandler, BindingPower)> {
        resolve(&self.nud, token).map(|entry| (entry.handler, entry.binding_power))
    }

    /// The infix handler for `token` and its binding power, if any.
    pub fn get_led(&self, token: &Token) -> Option<(LedHandler, BindingPower)> {
        resolve(&self.led, token).map(|entry| (entry.handler, entry.binding_power))
    }
}

impl Default for Lookups {
    fn default() -> Self {
        Self::new()
    }
}

fn register<H>(
    registry: &mut Registry<H>,
    kind: TokenKind,
    keyword: &'static str,
    binding_power: BindingPower,
    handler: H,
) {
    let entries = registry.entry(kind).or_default();
    entries.insert(
        0,
        Entry {
            handler,
            binding_power,
            keyword,
        },
    );
}

/// Identifiers match keyword entries by exact spelling first and fall back to
/// generic entries. Other categories ignore the keyword field.
fn resolve<'r, H>(registry: &'r Registry<H>, token: &Token) -> Option<&'r Entry<H>> {
    let entries = registry.get(&token.kind)?;
    if token.kind != TokenKind::Identifier {
        return entries.first();
    }
    entries
        .iter()
        .find(|entry| entry.keyword == token.value)
        .or_else(|| entries.iter().find(|entry| entry.keyword.is_empty()))
}
