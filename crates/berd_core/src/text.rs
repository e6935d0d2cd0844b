//! Byte spans into berd source and their line/column locations.

use std::fmt;
use std::ops::Range;

/// A byte offset into the source.
pub type TextPos = u32;

/// `length` bytes of source starting at `start`.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct TextSpan {
    pub start: TextPos,
    pub length: TextPos,
}

impl TextSpan {
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }

    /// The span from `start` up to, not including, `end`.
    #[inline]
    pub fn from_bounds(start: TextPos, end: TextPos) -> Self {
        Self {
            start,
            length: end.saturating_sub(start),
        }
    }

    /// A zero-length span, used for the end-of-input token.
    #[inline]
    pub fn empty(pos: TextPos) -> Self {
        Self::new(pos, 0)
    }

    #[inline]
    pub fn end(&self) -> TextPos {
        self.start + self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The span as a byte range, clamped to a source of `len` bytes.
    pub fn clamped_range(&self, len: usize) -> Range<usize> {
        let start = (self.start as usize).min(len);
        let end = (self.end() as usize).clamp(start, len);
        start..end
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

/// A 1-based line and column. Columns count characters, not bytes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LineAndColumn {
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for LineAndColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.line, self.column)
    }
}

/// Resolves byte offsets of one source to lines and columns.
///
/// CR LF, a lone CR and a lone LF each end a line, matching how the scanner
/// counts lines.
#[derive(Debug, Clone)]
pub struct LineMap<'a> {
    text: &'a str,
    line_starts: Vec<TextPos>,
}

impl<'a> LineMap<'a> {
    pub fn new(text: &'a str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = vec![0];
        let mut i = 0;
        while i < bytes.len() {
            let ends_line = match bytes[i] {
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                    i += 1;
                    true
                }
                b'\r' | b'\n' => true,
                _ => false,
            };
            i += 1;
            if ends_line {
                line_starts.push(i as TextPos);
            }
        }
        Self { text, line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// The 1-based location of `pos`. Offsets past the end resolve to the
    /// end of the source.
    pub fn location(&self, pos: TextPos) -> LineAndColumn {
        let pos = pos.min(self.text.len() as TextPos);
        let line = self.line_starts.partition_point(|&start| start <= pos) - 1;
        let line_start = self.line_starts[line] as usize;
        let column = match self.text.get(line_start..pos as usize) {
            Some(prefix) => prefix.chars().count(),
            None => pos as usize - line_start,
        };
        LineAndColumn {
            line: line as u32 + 1,
            column: column as u32 + 1,
        }
    }
}
