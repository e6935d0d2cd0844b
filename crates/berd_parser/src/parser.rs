//! The parser engine: token cursor, expect primitives and precedence
//! climbing. Grammar handlers live in `statements.rs` and `expressions.rs`.

use crate::error::ParseError;
use crate::lookups::Lookups;
use crate::precedence::BindingPower;
use berd_ast::{Expression, Token, TokenKind};
use berd_core::text::TextSpan;
use log::{debug, trace};

/// Token kinds skipped by `expect` unless the caller says otherwise.
pub const DEFAULT_IGNORED: &[TokenKind] = &[TokenKind::WhiteSpace, TokenKind::LineBreak];

/// The three statement terminators.
pub(crate) const END_OF_LINE: &[TokenKind] = &[
    TokenKind::Exclamation,
    TokenKind::InvertedExclamation,
    TokenKind::Question,
];

/// What an `expect` call requires of the next significant token.
#[derive(Debug, Clone, Copy)]
pub enum Expected<'e> {
    /// One of these categories.
    Kinds(&'e [TokenKind]),
    /// An identifier spelled as one of these words.
    Keywords(&'e [&'e str]),
}

impl Expected<'_> {
    fn matches(&self, token: &Token) -> bool {
        match self {
            Expected::Kinds(kinds) => kinds.contains(&token.kind),
            Expected::Keywords(words) => {
                token.kind == TokenKind::Identifier && words.contains(&token.value.as_str())
            }
        }
    }

    fn mismatch(&self, found: &Token) -> ParseError {
        match self {
            Expected::Kinds(kinds) => ParseError::UnexpectedToken {
                expected: kinds.to_vec(),
                found: found.clone(),
            },
            Expected::Keywords(words) => ParseError::UnexpectedKeyword {
                expected: words.iter().map(|word| word.to_string()).collect(),
                found: found.clone(),
            },
        }
    }
}

/// How an `expect` call behaves.
#[derive(Debug, Clone, Copy)]
pub struct ExpectOptions {
    /// Kinds skipped before the significant token.
    pub ignored: &'static [TokenKind],
    /// Move the cursor past the significant token.
    pub advance: bool,
    /// Fail on a mismatch instead of logging it and reporting `false`.
    pub fatal: bool,
}

impl ExpectOptions {
    /// A non-consuming, non-fatal lookahead for optional grammar.
    pub const PROBE: Self = Self {
        ignored: DEFAULT_IGNORED,
        advance: false,
        fatal: false,
    };
}

impl Default for ExpectOptions {
    fn default() -> Self {
        Self {
            ignored: DEFAULT_IGNORED,
            advance: true,
            fatal: true,
        }
    }
}

/// Parses a token sequence into a program.
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    lookups: Lookups,
}

impl Parser {
    /// Create a parser over `tokens` with the berd grammar.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_lookups(tokens, Lookups::new())
    }

    /// Create a parser with a custom grammar table.
    pub fn with_lookups(mut tokens: Vec<Token>, lookups: Lookups) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EndOfFile) {
            let end = tokens.last().map(|token| token.span.end()).unwrap_or(0);
            let line = tokens.last().map(|token| token.line).unwrap_or(1);
            tokens.push(Token::new(TokenKind::EndOfFile, "EOF", TextSpan::empty(end), line));
        }
        Self {
            tokens,
            position: 0,
            lookups,
        }
    }

    pub fn lookups(&self) -> &Lookups {
        &self.lookups
    }

    // ========================================================================
    // Cursor
    // ========================================================================

    /// Index of the current token.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The current token. Past the end this is the end-of-input token.
    pub fn current(&self) -> &Token {
        self.at_offset(0)
    }

    /// The token `offset` places from the current one, clamped to the
    /// sequence.
    pub fn at_offset(&self, offset: isize) -> &Token {
        let last = self.tokens.len() - 1;
        let index = (self.position as isize + offset).clamp(0, last as isize) as usize;
        &self.tokens[index]
    }

    /// Return the current token and move by `offset` (negative to rewind).
    pub fn advance(&mut self, offset: isize) -> Token {
        let token = self.current().clone();
        self.position = (self.position as isize + offset).max(0) as usize;
        token
    }

    /// Tokens left, counting the current one.
    pub fn remaining_len(&self) -> usize {
        self.tokens.len().saturating_sub(self.position)
    }

    /// Whether a token other than end-of-input is left.
    pub fn has_token(&self) -> bool {
        self.position < self.tokens.len() && self.current().kind != TokenKind::EndOfFile
    }

    /// Move past whitespace and line breaks.
    pub fn skip_ignorable(&mut self) {
        while self.current().kind.is_ignorable() {
            self.position += 1;
        }
    }

    // ========================================================================
    // Expect
    // ========================================================================

    /// Check the first token outside `options.ignored` against `expected`.
    ///
    /// Returns whether it matched along with the token. End-of-input is
    /// always significant.
    pub fn expect_with(
        &mut self,
        expected: Expected<'_>,
        options: ExpectOptions,
    ) -> Result<(bool, Token), ParseError> {
        let mut offset = 0;
        loop {
            let kind = self.at_offset(offset).kind;
            if kind == TokenKind::EndOfFile || !options.ignored.contains(&kind) {
                break;
            }
            offset += 1;
        }

        let token = self.at_offset(offset).clone();
        let found = expected.matches(&token);
        if !found {
            let error = expected.mismatch(&token);
            if options.fatal {
                return Err(error);
            }
            debug!(target: "parser", "{} (line {})", error, token.line);
        }

        if options.advance {
            self.position += offset as usize + 1;
        }
        Ok((found, token))
    }

    /// Consume the next significant token, which must be one of `kinds`.
    pub fn expect(&mut self, kinds: &[TokenKind]) -> Result<Token, ParseError> {
        self.expect_with(Expected::Kinds(kinds), ExpectOptions::default())
            .map(|(_, token)| token)
    }

    /// Consume the next significant token, which must be an identifier spelled
    /// as one of `words`.
    pub fn expect_identifier(&mut self, words: &[&str]) -> Result<Token, ParseError> {
        self.expect_with(Expected::Keywords(words), ExpectOptions::default())
            .map(|(_, token)| token)
    }

    /// Whether the next significant token is one of `kinds`. Never consumes.
    pub fn check(&mut self, kinds: &[TokenKind]) -> bool {
        matches!(
            self.expect_with(Expected::Kinds(kinds), ExpectOptions::PROBE),
            Ok((true, _))
        )
    }

    /// Whether the next significant token is an identifier spelled as one of
    /// `words`. Never consumes.
    pub fn check_identifier(&mut self, words: &[&str]) -> bool {
        matches!(
            self.expect_with(Expected::Keywords(words), ExpectOptions::PROBE),
            Ok((true, _))
        )
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// Parse an expression whose infix operators all bind tighter than
    /// `binding_power`.
    pub fn parse_expression(
        &mut self,
        binding_power: BindingPower,
    ) -> Result<Expression, ParseError> {
        self.skip_ignorable();
        let Some((nud, _)) = self.lookups.get_nud(self.current()) else {
            return Err(ParseError::MissingPrefixHandler {
                token: self.current().clone(),
                position: self.position,
            });
        };
        trace!(target: "parser", "nud {} at {}", self.current(), self.position);
        let mut left = nud(self)?;

        loop {
            self.skip_ignorable();
            match self.lookups.get_led(self.current()) {
                Some((led, led_power)) if led_power > binding_power => {
                    trace!(target: "parser", "led {} at {}", self.current(), self.position);
                    left = led(self, left, led_power)?;
                }
                _ => break,
            }
        }
        Ok(left)
    }
}
