//! The berd scanner.
//!
//! Converts source text into the full token sequence the parser consumes.
//! Positions are byte offsets into the source.

use crate::char_codes::*;
use crate::error::ScanError;
use crate::operators::match_operator;
use berd_ast::{Token, TokenKind};
use berd_core::text::TextSpan;
use berd_diagnostics::{messages, Diagnostic, DiagnosticCollection};
use log::{debug, trace, warn};
use memchr::memmem;

/// Tokenize `text`, discarding non-fatal diagnostics.
pub fn tokenize(text: &str) -> Result<Vec<Token>, ScanError> {
    Scanner::new(text).tokenize()
}

/// Converts berd source text into tokens.
pub struct Scanner<'a> {
    text: &'a str,
    /// Current byte position in the text.
    pos: usize,
    /// 1-based line of `pos`.
    line: u32,
    tokens: Vec<Token>,
    diagnostics: DiagnosticCollection,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            line: 1,
            tokens: Vec::new(),
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Get the accumulated diagnostics.
    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    /// Take the accumulated diagnostics, leaving an empty collection.
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    /// The line the scanner has reached.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Scan the whole text. The returned sequence always ends with an
    /// end-of-input token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, ScanError> {
        while let Some(ch) = self.current_char() {
            self.scan_token(ch)?;
        }
        let end = self.pos;
        self.push(TokenKind::EndOfFile, "EOF", end);
        debug!(target: "scanner", "scanned {} tokens over {} lines", self.tokens.len(), self.line);
        Ok(std::mem::take(&mut self.tokens))
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    #[inline]
    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    #[inline]
    fn current_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    #[inline]
    fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    fn push(&mut self, kind: TokenKind, value: impl Into<String>, start: usize) {
        let token = Token::new(kind, value, self.span_from(start), self.line);
        trace!(target: "scanner", "{}", token);
        self.tokens.push(token);
    }

    fn span_from(&self, start: usize) -> TextSpan {
        TextSpan::from_bounds(start as u32, self.pos as u32)
    }

    /// Consume one fixed spelling and emit it as `kind`.
    fn scan_fixed(&mut self, spelling: &'static str, kind: TokenKind) {
        let start = self.pos;
        self.pos += spelling.len();
        self.push(kind, spelling, start);
    }

    /// Scan one token (or one piece of skipped text) starting with `ch`.
    fn scan_token(&mut self, ch: char) -> Result<(), ScanError> {
        if self.starts_with("//") {
            self.skip_line_comment();
            return Ok(());
        }
        if self.starts_with("/*") {
            self.skip_block_comment();
            return Ok(());
        }

        match ch {
            '(' => self.scan_fixed("(", TokenKind::OpenParen),
            ')' => self.scan_fixed(")", TokenKind::CloseParen),
            '{' => self.scan_fixed("{", TokenKind::OpenCurly),
            '}' => self.scan_fixed("}", TokenKind::CloseCurly),
            '[' => self.scan_fixed("[", TokenKind::OpenBracket),
            ']' => self.scan_fixed("]", TokenKind::CloseBracket),
            // `=>` before any operator: `=` alone is a token too.
            '=' if self.starts_with("=>") => self.scan_fixed("=>", TokenKind::Arrow),
            '!' => self.scan_fixed("!", TokenKind::Exclamation),
            '?' => self.scan_fixed("?", TokenKind::Question),
            INVERTED_EXCLAMATION => self.scan_fixed("¡", TokenKind::InvertedExclamation),
            SINGLE_QUOTE | DOUBLE_QUOTE => self.scan_string(ch),
            '+' if self.starts_with("++") => self.scan_fixed("++", TokenKind::PlusPlus),
            // Decrement shares the increment category; the parser tells the
            // two apart by spelling.
            '-' if self.starts_with("--") => self.scan_fixed("--", TokenKind::PlusPlus),
            _ if is_digit(ch) => self.scan_number(),
            _ => return self.scan_symbol(ch),
        }
        Ok(())
    }

    /// Everything after the literal and state tokens: operators, structural
    /// symbols, whitespace, line breaks and identifiers.
    fn scan_symbol(&mut self, ch: char) -> Result<(), ScanError> {
        if self.scan_operator() {
            return Ok(());
        }
        match ch {
            ':' => self.scan_fixed(":", TokenKind::Colon),
            ',' => self.scan_fixed(",", TokenKind::Comma),
            '.' => self.scan_fixed(".", TokenKind::Dot),
            SPACE => self.scan_white_space(),
            CARRIAGE_RETURN => self.scan_line_break(),
            _ if is_identifier_char(ch) => self.scan_identifier(),
            _ if is_ignored_control(ch) => {
                if ch == LINE_FEED {
                    self.line += 1;
                }
                self.pos += 1;
            }
            _ => {
                return Err(ScanError::UnrecognizedCharacter {
                    character: ch,
                    code: ch as u32,
                    offset: self.pos,
                    line: self.line,
                })
            }
        }
        Ok(())
    }

    /// `//` up to and including the next CR, LF or CRLF.
    fn skip_line_comment(&mut self) {
        let rest = self.rest().as_bytes();
        match memchr::memchr2(b'\r', b'\n', rest) {
            Some(index) => {
                self.pos += index + 1;
                if rest[index] == b'\r' && self.starts_with("\n") {
                    self.pos += 1;
                }
                self.line += 1;
            }
            None => self.pos = self.text.len(),
        }
    }

    /// `/*` up to and including the next `*/`.
    fn skip_block_comment(&mut self) {
        let text = self.text;
        let start = self.pos;
        let body_start = self.pos + 2;
        let body = &text.as_bytes()[body_start..];
        let (body_end, end) = match memmem::find(body, b"*/") {
            Some(index) => (body_start + index, body_start + index + 2),
            None => {
                self.diagnostics.add(Diagnostic::with_span(
                    TextSpan::from_bounds(start as u32, text.len() as u32),
                    &messages::ASTERISK_SLASH_EXPECTED,
                    &[],
                ));
                (text.len(), text.len())
            }
        };
        self.line += count_line_breaks(&text.as_bytes()[body_start..body_end]);
        self.pos = end;
    }

    /// A greedy run of decimal digits.
    fn scan_number(&mut self) {
        let text = self.text;
        let start = self.pos;
        let length = self
            .rest()
            .bytes()
            .take_while(|byte| byte.is_ascii_digit())
            .count();
        self.pos += length;
        let value = &text[start..self.pos];
        self.push(TokenKind::Number, value, start);
    }

    /// A quoted string. There are no escapes; an unterminated string runs to
    /// the end of the input.
    fn scan_string(&mut self, quote: char) {
        let text = self.text;
        let start = self.pos;
        let contents_start = self.pos + quote.len_utf8();
        let contents = &text[contents_start..];
        let value = match contents.find(quote) {
            Some(index) => {
                self.pos = contents_start + index + quote.len_utf8();
                &contents[..index]
            }
            None => {
                self.pos = text.len();
                self.diagnostics.add(Diagnostic::with_span(
                    self.span_from(start),
                    &messages::UNTERMINATED_STRING_LITERAL,
                    &[],
                ));
                contents
            }
        };
        self.line += count_line_breaks(value.as_bytes());
        self.push(TokenKind::String, value, start);
    }

    /// Operators of every family, longest spelling first. A base operator
    /// that may combine with `=` and is directly followed by one becomes a
    /// single combined-assignment token.
    fn scan_operator(&mut self) -> bool {
        let Some((spelling, kind)) = match_operator(self.rest()) else {
            return false;
        };
        let text = self.text;
        let start = self.pos;
        self.pos += spelling.len();

        if kind.combines_with_assignment() && self.starts_with("=") {
            self.pos += 1;
            let value = &text[start..self.pos];
            let token = Token::combined_assignment(kind, value, self.span_from(start), self.line);
            trace!(target: "scanner", "{}", token);
            self.tokens.push(token);
        } else {
            self.push(kind, spelling, start);
        }
        true
    }

    /// A run of spaces, collapsed into one token whose value is the run length.
    fn scan_white_space(&mut self) {
        let start = self.pos;
        let count = self.rest().bytes().take_while(|&byte| byte == b' ').count();
        self.pos += count;
        self.push(TokenKind::WhiteSpace, count.to_string(), start);
    }

    /// CR, absorbing a directly following LF.
    fn scan_line_break(&mut self) {
        let start = self.pos;
        self.pos += 1;
        if self.starts_with("\n") {
            self.pos += 1;
        }
        self.line += 1;
        self.push(TokenKind::LineBreak, "\n", start);
    }

    fn scan_identifier(&mut self) {
        let text = self.text;
        let start = self.pos;
        while let Some(ch) = self.current_char() {
            if !is_identifier_char(ch) {
                break;
            }
            if is_non_standard_identifier_char(ch) {
                warn!(target: "scanner", "Weird character found, code: {} at position {}", ch as u32, self.pos);
                let span = TextSpan::new(self.pos as u32, ch.len_utf8() as u32);
                self.diagnostics.add(Diagnostic::with_span(
                    span,
                    &messages::NON_STANDARD_CHARACTER,
                    &[&ch.to_string(), &format!("{:04X}", ch as u32)],
                ));
            }
            self.pos += ch.len_utf8();
        }
        let value = &text[start..self.pos];
        self.push(TokenKind::Identifier, value, start);
    }
}

/// Count line endings in `bytes`, treating CRLF as one.
fn count_line_breaks(bytes: &[u8]) -> u32 {
    let mut count = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                count += 1;
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
            }
            b'\n' => count += 1,
            _ => {}
        }
        i += 1;
    }
    count
}
