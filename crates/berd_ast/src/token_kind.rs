//! TokenKind enum - every lexical category the scanner can produce.

use serde::Serialize;
use std::fmt;

/// The lexical category of a token.
///
/// Keywords are deliberately absent: `const`, `if`, `previous` and friends are
/// plain [`TokenKind::Identifier`] tokens and only gain meaning in the
/// parser's grammar table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u8)]
pub enum TokenKind {
    EndOfFile,

    // Literals
    Number,
    String,
    Identifier,

    // Grouping
    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Arrow,

    // State operators
    PlusPlus,
    MinusMinus,

    // Assignment
    EqualSign,
    CombinedAssignment,

    // Comparison
    Smaller,
    Greater,
    SmallerEq,
    GreaterEq,
    Equals,
    NotEq,
    StrongEq,
    StrongNotEq,
    StrongestEq,
    StrongestNotEq,

    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Exponent,

    // Logical
    LogicalAnd,
    LogicalOr,
    LogicalNot,

    // Bitwise (`**` is xor so that `^` stays free for exponentiation)
    BitwiseNot,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    BitShiftLeft,
    BitShiftRight,
    BitShiftUnsignedLeft,
    BitShiftUnsignedRight,

    // Symbols
    Dot,
    Colon,
    Comma,
    WhiteSpace,
    LineBreak,

    // End of statement
    Exclamation,
    InvertedExclamation,
    Question,
}

impl TokenKind {
    /// The fixed spelling of this token kind, if it has exactly one.
    pub fn text(self) -> Option<&'static str> {
        use TokenKind::*;
        let text = match self {
            OpenBracket => "[",
            CloseBracket => "]",
            OpenCurly => "{",
            CloseCurly => "}",
            OpenParen => "(",
            CloseParen => ")",
            Arrow => "=>",
            PlusPlus => "++",
            MinusMinus => "--",
            EqualSign => "=",
            Smaller => "<",
            Greater => ">",
            SmallerEq => "<=",
            GreaterEq => ">=",
            Equals => "==",
            NotEq => ";=",
            StrongEq => "===",
            StrongNotEq => ";==",
            StrongestEq => "====",
            StrongestNotEq => ";===",
            Add => "+",
            Subtract => "-",
            Multiply => "*",
            Divide => "/",
            Modulo => "%",
            Exponent => "^",
            LogicalAnd => "&&",
            LogicalOr => "||",
            LogicalNot => ";",
            BitwiseNot => "~",
            BitwiseAnd => "&",
            BitwiseOr => "|",
            BitwiseXor => "**",
            BitShiftLeft => "<<",
            BitShiftRight => ">>",
            BitShiftUnsignedLeft => "<<<",
            BitShiftUnsignedRight => ">>>",
            Dot => ".",
            Colon => ":",
            Comma => ",",
            Exclamation => "!",
            InvertedExclamation => "¡",
            Question => "?",
            EndOfFile | Number | String | Identifier | CombinedAssignment | WhiteSpace
            | LineBreak => return None,
        };
        Some(text)
    }

    /// Whether this token ends a statement.
    pub fn is_terminator(self) -> bool {
        matches!(
            self,
            TokenKind::Exclamation | TokenKind::InvertedExclamation | TokenKind::Question
        )
    }

    /// Whether the parser skips this token by default.
    pub fn is_ignorable(self) -> bool {
        matches!(self, TokenKind::WhiteSpace | TokenKind::LineBreak)
    }

    pub fn is_comparison(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            EqualSign
                | Smaller
                | Greater
                | SmallerEq
                | GreaterEq
                | Equals
                | NotEq
                | StrongEq
                | StrongNotEq
                | StrongestEq
                | StrongestNotEq
        )
    }

    pub fn is_arithmetic(self) -> bool {
        use TokenKind::*;
        matches!(self, Add | Subtract | Multiply | Divide | Modulo | Exponent)
    }

    /// Binary logical operators. Logical not is a prefix operator and is not
    /// part of this family.
    pub fn is_logical(self) -> bool {
        matches!(self, TokenKind::LogicalAnd | TokenKind::LogicalOr)
    }

    /// Binary bitwise operators.
    pub fn is_bitwise(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            BitwiseAnd
                | BitwiseOr
                | BitwiseXor
                | BitShiftLeft
                | BitShiftRight
                | BitShiftUnsignedLeft
                | BitShiftUnsignedRight
        )
    }

    /// Whether this operator may be bundled with a trailing `=` into a
    /// combined assignment.
    pub fn combines_with_assignment(self) -> bool {
        self.is_arithmetic() || self.is_logical() || self.is_bitwise()
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Render a list of kinds the way expectation errors print them.
pub fn kind_list(kinds: &[TokenKind]) -> String {
    kinds
        .iter()
        .map(|kind| kind.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
