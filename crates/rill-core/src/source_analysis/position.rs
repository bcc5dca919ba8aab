// Copyright 2026 Rill Contributors
// SPDX-License-Identifier: Apache-2.0

//! Source location tracking.
//!
//! Every token and AST node carries a [`Span`]: a half-open pair of
//! [`Position`]s bounding it in source text. Positions are cheap `Copy`
//! values, so each holder owns its own immutable snapshot of the cursor
//! rather than aliasing the lexer's live state.

use ecow::EcoString;

/// A cursor into source text: character index plus line/column.
///
/// The index counts characters, not bytes, and increases by exactly one per
/// [`advance`](Position::advance). Lines and columns are 0-based; diagnostic
/// rendering converts to 1-based line numbers for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    index: u32,
    line: u32,
    col: u32,
}

impl Position {
    /// Creates a position from raw index/line/column values.
    #[must_use]
    pub const fn new(index: u32, line: u32, col: u32) -> Self {
        Self { index, line, col }
    }

    /// Returns the character index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Returns the 0-based line number.
    #[must_use]
    pub const fn line(self) -> u32 {
        self.line
    }

    /// Returns the 0-based column number.
    #[must_use]
    pub const fn col(self) -> u32 {
        self.col
    }

    /// Advances past `current_char`, returning the new position.
    ///
    /// Index and column grow by one; moving past a newline starts a fresh
    /// line with column 0.
    #[must_use]
    pub fn advance(mut self, current_char: Option<char>) -> Self {
        self.index += 1;
        self.col += 1;
        if current_char == Some('\n') {
            self.line += 1;
            self.col = 0;
        }
        self
    }
}

/// A half-open `[start, end)` span of source text.
///
/// `end` is exclusive and strictly after `start` for every token except the
/// zero-width end-of-input sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: Position,
    end: Position,
}

impl Span {
    /// Creates a new span from start and end positions.
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Returns the start position.
    #[must_use]
    pub const fn start(self) -> Position {
        self.start
    }

    /// Returns the end position (exclusive).
    #[must_use]
    pub const fn end(self) -> Position {
        self.end
    }

    /// Returns the length of the span in characters.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.end.index - self.start.index
    }

    /// Returns true if the span is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start.index == self.end.index
    }

    /// Returns true if `other` is fully contained within `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.start.index <= other.start.index && other.end.index <= self.end.index
    }

    /// Creates a span that covers both `self` and `other`.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        let start = if self.start.index < other.start.index {
            self.start
        } else {
            other.start
        };
        let end = if self.end.index > other.end.index {
            self.end
        } else {
            other.end
        };
        Self { start, end }
    }

    /// Converts to a byte-offset [`miette::SourceSpan`] against `text`.
    ///
    /// Positions count characters, so the conversion walks `text` to find
    /// the matching byte offsets.
    #[must_use]
    pub fn to_source_span(self, text: &str) -> miette::SourceSpan {
        let byte_at = |char_index: u32| {
            text.char_indices()
                .nth(char_index as usize)
                .map_or(text.len(), |(byte, _)| byte)
        };
        let start = byte_at(self.start.index);
        let end = byte_at(self.end.index);
        (start, end.saturating_sub(start)).into()
    }
}

/// A named piece of source text.
///
/// Tokens and diagnostics refer back to the source they came from; cloning
/// is cheap ([`EcoString`] is reference-counted), so every diagnostic owns
/// its own handle and can render an excerpt with no live aliasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    name: EcoString,
    text: EcoString,
}

impl SourceText {
    /// Creates a new source from a name (file path or `<stdin>`) and text.
    #[must_use]
    pub fn new(name: impl Into<EcoString>, text: impl Into<EcoString>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Returns the source name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the source text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the 0-based `line` of the source, without its newline.
    #[must_use]
    pub fn line(&self, line: u32) -> Option<&str> {
        self.text
            .split('\n')
            .nth(line as usize)
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_moves_index_and_col() {
        let pos = Position::default().advance(Some('a'));
        assert_eq!(pos.index(), 1);
        assert_eq!(pos.line(), 0);
        assert_eq!(pos.col(), 1);
    }

    #[test]
    fn advance_past_newline_resets_col() {
        let pos = Position::new(4, 0, 4).advance(Some('\n'));
        assert_eq!(pos.index(), 5);
        assert_eq!(pos.line(), 1);
        assert_eq!(pos.col(), 0);
    }

    #[test]
    fn span_len_and_empty() {
        let span = Span::new(Position::new(2, 0, 2), Position::new(5, 0, 5));
        assert_eq!(span.len(), 3);
        assert!(!span.is_empty());

        let eof = Span::new(Position::new(5, 0, 5), Position::new(5, 0, 5));
        assert!(eof.is_empty());
    }

    #[test]
    fn span_merge_and_contains() {
        let a = Span::new(Position::new(0, 0, 0), Position::new(3, 0, 3));
        let b = Span::new(Position::new(5, 0, 5), Position::new(9, 0, 9));
        let merged = a.merge(b);
        assert_eq!(merged.start().index(), 0);
        assert_eq!(merged.end().index(), 9);
        assert!(merged.contains(a));
        assert!(merged.contains(b));
        assert!(!a.contains(b));
    }

    #[test]
    fn span_to_source_span_counts_bytes() {
        // 'é' is two bytes; char indices 2..3 cover the 'c'.
        let text = "aéc";
        let span = Span::new(Position::new(2, 0, 2), Position::new(3, 0, 3));
        let source_span = span.to_source_span(text);
        assert_eq!(source_span.offset(), 3);
        assert_eq!(source_span.len(), 1);
    }

    #[test]
    fn source_text_line_lookup() {
        let source = SourceText::new("test", "first\nsecond\r\nthird");
        assert_eq!(source.line(0), Some("first"));
        assert_eq!(source.line(1), Some("second"));
        assert_eq!(source.line(2), Some("third"));
        assert_eq!(source.line(3), None);
    }
}
