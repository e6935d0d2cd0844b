//! Operator spellings, matched longest first.

use berd_ast::TokenKind;

/// Every operator the scanner recognizes after the fixed single-character
/// and state tokens, across the arithmetic, logical, bitwise and comparison
/// families. Sorted by descending length so the first hit is the longest.
pub const OPERATORS: &[(&str, TokenKind)] = &[
    // 4
    ("====", TokenKind::StrongestEq),
    (";===", TokenKind::StrongestNotEq),
    // 3
    ("===", TokenKind::StrongEq),
    (";==", TokenKind::StrongNotEq),
    ("<<<", TokenKind::BitShiftUnsignedLeft),
    (">>>", TokenKind::BitShiftUnsignedRight),
    // 2
    ("==", TokenKind::Equals),
    (";=", TokenKind::NotEq),
    ("<=", TokenKind::SmallerEq),
    (">=", TokenKind::GreaterEq),
    ("<<", TokenKind::BitShiftLeft),
    (">>", TokenKind::BitShiftRight),
    ("&&", TokenKind::LogicalAnd),
    ("||", TokenKind::LogicalOr),
    ("**", TokenKind::BitwiseXor),
    // 1
    ("=", TokenKind::EqualSign),
    ("<", TokenKind::Smaller),
    (">", TokenKind::Greater),
    ("+", TokenKind::Add),
    ("-", TokenKind::Subtract),
    ("*", TokenKind::Multiply),
    ("/", TokenKind::Divide),
    ("%", TokenKind::Modulo),
    ("^", TokenKind::Exponent),
    ("&", TokenKind::BitwiseAnd),
    ("|", TokenKind::BitwiseOr),
    (";", TokenKind::LogicalNot),
    ("~", TokenKind::BitwiseNot),
];

/// Find the longest operator spelling at the start of `rest`.
pub fn match_operator(rest: &str) -> Option<(&'static str, TokenKind)> {
    OPERATORS
        .iter()
        .find(|(spelling, _)| rest.starts_with(spelling))
        .copied()
}
