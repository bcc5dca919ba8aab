// Copyright 2026 Rill Contributors
// SPDX-License-Identifier: Apache-2.0

//! Span-located diagnostics.
//!
//! Every lexing or parsing failure produces exactly one [`Diagnostic`],
//! constructed at the point of failure and propagated unchanged to the
//! caller. There is no warning tier and no recovery: the first diagnostic
//! terminates the parse.
//!
//! [`Diagnostic::as_string`] renders the classic pointer-annotated excerpt:
//!
//! ```text
//! Illegal Character: '&'
//!  File <stdin>, line 1
//!
//! 5 & 3
//!   ^
//! ```

use ecow::EcoString;
use thiserror::Error;

use super::{SourceText, Span};

/// The kind of failure a diagnostic reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    /// The lexer met a character outside the grammar.
    #[error("Illegal Character")]
    IllegalCharacter,

    /// The lexer expected a specific follow-up character.
    #[error("Expected Character")]
    ExpectedCharacter,

    /// The parser expected a specific token, keyword, or expression form.
    #[error("Invalid Syntax")]
    InvalidSyntax,
}

/// A terminal, span-located error.
///
/// Owns a cheap handle to its [`SourceText`] so it can render an excerpt
/// long after the lexer and parser are gone.
///
/// The field is `source_text`, not `source`: thiserror reserves a field
/// named `source` for an underlying `std::error::Error` cause, which a
/// [`SourceText`] is not.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct Diagnostic {
    kind: ErrorKind,
    message: EcoString,
    span: Span,
    source_text: SourceText,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    #[must_use]
    pub fn new(
        kind: ErrorKind,
        message: impl Into<EcoString>,
        span: Span,
        source: SourceText,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            source_text: source,
        }
    }

    /// Creates an illegal-character diagnostic for `c`.
    #[must_use]
    pub fn illegal_character(c: char, span: Span, source: SourceText) -> Self {
        Self::new(ErrorKind::IllegalCharacter, format!("'{c}'"), span, source)
    }

    /// Creates an expected-character diagnostic.
    #[must_use]
    pub fn expected_character(message: impl Into<EcoString>, span: Span, source: SourceText) -> Self {
        Self::new(ErrorKind::ExpectedCharacter, message, span, source)
    }

    /// Creates an invalid-syntax diagnostic.
    #[must_use]
    pub fn invalid_syntax(message: impl Into<EcoString>, span: Span, source: SourceText) -> Self {
        Self::new(ErrorKind::InvalidSyntax, message, span, source)
    }

    /// Returns the kind of this diagnostic.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human-readable detail message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending span.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Returns the source this diagnostic points into.
    #[must_use]
    pub const fn source(&self) -> &SourceText {
        &self.source_text
    }

    /// Renders the diagnostic with a caret-underlined source excerpt.
    ///
    /// Line numbers are 1-based in the output. Multi-line spans underline
    /// each covered line; the underline is never zero-width, so even an
    /// end-of-input diagnostic points at something.
    #[must_use]
    pub fn as_string(&self) -> String {
        let mut result = format!(
            "{}: {}\n File {}, line {}\n\n",
            self.kind,
            self.message,
            self.source_text.name(),
            self.span.start().line() + 1
        );
        result.push_str(&self.excerpt());
        result
    }

    /// The underlined source lines covered by the span.
    fn excerpt(&self) -> String {
        let first_line = self.span.start().line();
        let end = self.span.end();
        // A half-open span ending at column 0 of a later line stops at the
        // preceding newline; that line itself is not covered.
        let last_line = if end.col() == 0 && end.line() > first_line {
            end.line() - 1
        } else {
            end.line()
        };
        let mut result = String::new();

        for line_no in first_line..=last_line {
            let line = self.source_text.line(line_no).unwrap_or("");
            let line_width = line.chars().count() as u32;

            let col_start = if line_no == first_line {
                self.span.start().col().min(line_width)
            } else {
                0
            };
            let col_end = if line_no == end.line() {
                end.col().clamp(col_start, line_width.max(1))
            } else {
                line_width
            };
            // Never emit an invisible underline.
            let carets = (col_end.max(col_start + 1) - col_start) as usize;

            // Tabs would desynchronise the caret column; render them as spaces.
            for c in line.chars() {
                result.push(if c == '\t' { ' ' } else { c });
            }
            result.push('\n');
            result.push_str(&" ".repeat(col_start as usize));
            result.push_str(&"^".repeat(carets));
            if line_no != last_line {
                result.push('\n');
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_analysis::Position;

    fn span(start: (u32, u32, u32), end: (u32, u32, u32)) -> Span {
        Span::new(
            Position::new(start.0, start.1, start.2),
            Position::new(end.0, end.1, end.2),
        )
    }

    #[test]
    fn diagnostic_display() {
        let source = SourceText::new("<stdin>", "5 & 3");
        let diagnostic = Diagnostic::illegal_character('&', span((2, 0, 2), (3, 0, 3)), source);
        assert_eq!(diagnostic.to_string(), "Illegal Character: '&'");
    }

    #[test]
    fn diagnostic_is_a_plain_error_with_no_cause() {
        let source = SourceText::new("<stdin>", "5 & 3");
        let diagnostic = Diagnostic::illegal_character('&', span((2, 0, 2), (3, 0, 3)), source);
        // The owned source text is rendering context, not an error cause.
        let as_error: &dyn std::error::Error = &diagnostic;
        assert!(as_error.source().is_none());
        assert_eq!(as_error.to_string(), "Illegal Character: '&'");
    }

    #[test]
    fn as_string_points_at_offending_char() {
        let source = SourceText::new("<stdin>", "5 & 3");
        let diagnostic = Diagnostic::illegal_character('&', span((2, 0, 2), (3, 0, 3)), source);
        assert_eq!(
            diagnostic.as_string(),
            "Illegal Character: '&'\n File <stdin>, line 1\n\n5 & 3\n  ^"
        );
    }

    #[test]
    fn as_string_reports_one_based_line_numbers() {
        let source = SourceText::new("prog.rill", "1 + 1\n2 @ 2");
        let diagnostic = Diagnostic::illegal_character('@', span((8, 1, 2), (9, 1, 3)), source);
        let rendered = diagnostic.as_string();
        assert!(rendered.contains(" File prog.rill, line 2"));
        assert!(rendered.ends_with("2 @ 2\n  ^"));
    }

    #[test]
    fn as_string_underlines_every_covered_line() {
        let source = SourceText::new("<stdin>", "\"ab\ncd");
        let diagnostic = Diagnostic::expected_character(
            "'\"' (end of string)",
            span((0, 0, 0), (6, 1, 2)),
            source,
        );
        assert_eq!(
            diagnostic.as_string(),
            "Expected Character: '\"' (end of string)\n File <stdin>, line 1\n\n\"ab\n^^^\ncd\n^^"
        );
    }

    #[test]
    fn span_ending_at_start_of_a_line_does_not_underline_it() {
        // Unterminated string whose last covered character is the newline:
        // the span ends at column 0 of line 2, which holds none of it.
        let source = SourceText::new("<stdin>", "\"ab\n");
        let diagnostic = Diagnostic::expected_character(
            "'\"' (end of string)",
            span((0, 0, 0), (4, 1, 0)),
            source,
        );
        assert_eq!(
            diagnostic.as_string(),
            "Expected Character: '\"' (end of string)\n File <stdin>, line 1\n\n\"ab\n^^^"
        );
    }

    #[test]
    fn zero_width_span_still_underlines() {
        let source = SourceText::new("<stdin>", "1 +");
        let diagnostic = Diagnostic::invalid_syntax(
            "Expected an integer, a float, an identifier, or '+', '-' or '('",
            span((3, 0, 3), (3, 0, 3)),
            source,
        );
        assert!(diagnostic.as_string().ends_with("1 +\n   ^"));
    }
}
