// Copyright 2026 Rill Contributors
// SPDX-License-Identifier: Apache-2.0

//! Token types for Rill lexical analysis.
//!
//! Each token pairs a [`TokenKind`] with the [`Span`] it occupies in source.
//! Literal payloads live inside the kind (integers and floats already
//! converted, strings with escapes resolved), so the parser never re-reads
//! source text.

use ecow::EcoString;

use super::Span;

/// The reserved words of the language.
///
/// The set is fixed at compile time; [`Keyword::lookup`] consults an
/// immutable static table, never shared mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Var,
    And,
    Or,
    Not,
    If,
    Then,
    Elif,
    Else,
    For,
    To,
    Step,
    While,
    Fun,
    Return,
    Continue,
    Break,
    End,
}

/// Keyword spellings, in declaration order.
const KEYWORDS: &[(&str, Keyword)] = &[
    ("VAR", Keyword::Var),
    ("AND", Keyword::And),
    ("OR", Keyword::Or),
    ("NOT", Keyword::Not),
    ("IF", Keyword::If),
    ("THEN", Keyword::Then),
    ("ELIF", Keyword::Elif),
    ("ELSE", Keyword::Else),
    ("FOR", Keyword::For),
    ("TO", Keyword::To),
    ("STEP", Keyword::Step),
    ("WHILE", Keyword::While),
    ("FUN", Keyword::Fun),
    ("RETURN", Keyword::Return),
    ("CONTINUE", Keyword::Continue),
    ("BREAK", Keyword::Break),
    ("END", Keyword::End),
];

impl Keyword {
    /// Looks up an identifier in the keyword table.
    #[must_use]
    pub fn lookup(text: &str) -> Option<Self> {
        KEYWORDS
            .iter()
            .find(|(spelling, _)| *spelling == text)
            .map(|&(_, keyword)| keyword)
    }

    /// Returns the source spelling of this keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Var => "VAR",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::If => "IF",
            Self::Then => "THEN",
            Self::Elif => "ELIF",
            Self::Else => "ELSE",
            Self::For => "FOR",
            Self::To => "TO",
            Self::Step => "STEP",
            Self::While => "WHILE",
            Self::Fun => "FUN",
            Self::Return => "RETURN",
            Self::Continue => "CONTINUE",
            Self::Break => "BREAK",
            Self::End => "END",
        }
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of token, not including source location.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // === Literals ===
    /// An integer literal: `42`
    Int(i64),

    /// A floating-point literal: `3.14`
    Float(f64),

    /// A double-quoted string literal, escapes already resolved.
    Str(EcoString),

    /// An identifier: `x`, `counter_2`
    Identifier(EcoString),

    /// A reserved word: `VAR`, `IF`, `NOT`, ...
    Keyword(Keyword),

    // === Operators ===
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `^`
    Caret,
    /// `=` (assignment)
    Eq,
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEq,
    /// `>=`
    GreaterEq,

    // === Punctuation ===
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `,`
    Comma,
    /// `->` (reserved for function syntax)
    Arrow,
    /// Statement separator: `;` or a literal newline
    Newline,

    // === Special ===
    /// End of input (zero-width)
    Eof,
}

impl TokenKind {
    /// Returns `true` if this token is a literal value.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_) | Self::Str(_))
    }

    /// Returns `true` if this is the end-of-input marker.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }

    /// Returns `true` if this token is the given keyword.
    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self, Self::Keyword(k) if *k == keyword)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Str(text) => write!(f, "\"{text}\""),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::Keyword(keyword) => write!(f, "{keyword}"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Caret => write!(f, "^"),
            Self::Eq => write!(f, "="),
            Self::EqEq => write!(f, "=="),
            Self::NotEq => write!(f, "!="),
            Self::Less => write!(f, "<"),
            Self::Greater => write!(f, ">"),
            Self::LessEq => write!(f, "<="),
            Self::GreaterEq => write!(f, ">="),
            Self::LeftParen => write!(f, "("),
            Self::RightParen => write!(f, ")"),
            Self::Comma => write!(f, ","),
            Self::Arrow => write!(f, "->"),
            Self::Newline => write!(f, ";"),
            Self::Eof => write!(f, "<eof>"),
        }
    }
}

/// A token with its source location.
///
/// Tokens are created once by the lexer and immutable thereafter; the
/// parser only ever reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    kind: TokenKind,
    span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns the kind of this token.
    #[must_use]
    pub const fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// Consumes the token and returns its kind.
    #[must_use]
    pub fn into_kind(self) -> TokenKind {
        self.kind
    }

    /// Returns the source span of this token.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_analysis::Position;

    #[test]
    fn keyword_table_round_trips() {
        assert_eq!(Keyword::lookup("VAR"), Some(Keyword::Var));
        assert_eq!(Keyword::lookup("WHILE"), Some(Keyword::While));
        assert_eq!(Keyword::lookup("var"), None);
        assert_eq!(Keyword::lookup("banana"), None);

        for &(spelling, keyword) in KEYWORDS {
            assert_eq!(keyword.as_str(), spelling);
            assert_eq!(Keyword::lookup(spelling), Some(keyword));
        }
    }

    #[test]
    fn token_kind_display() {
        assert_eq!(TokenKind::Int(42).to_string(), "42");
        assert_eq!(TokenKind::Float(3.5).to_string(), "3.5");
        assert_eq!(TokenKind::Str("hi".into()).to_string(), "\"hi\"");
        assert_eq!(TokenKind::Identifier("x".into()).to_string(), "x");
        assert_eq!(TokenKind::Keyword(Keyword::Elif).to_string(), "ELIF");
        assert_eq!(TokenKind::Arrow.to_string(), "->");
        assert_eq!(TokenKind::GreaterEq.to_string(), ">=");
        assert_eq!(TokenKind::Eof.to_string(), "<eof>");
    }

    #[test]
    fn token_kind_predicates() {
        assert!(TokenKind::Int(1).is_literal());
        assert!(TokenKind::Str("s".into()).is_literal());
        assert!(!TokenKind::Identifier("x".into()).is_literal());

        assert!(TokenKind::Eof.is_eof());
        assert!(!TokenKind::Newline.is_eof());

        assert!(TokenKind::Keyword(Keyword::If).is_keyword(Keyword::If));
        assert!(!TokenKind::Keyword(Keyword::If).is_keyword(Keyword::Then));
        assert!(!TokenKind::Identifier("IF".into()).is_keyword(Keyword::If));
    }

    #[test]
    fn token_accessors() {
        let span = Span::new(Position::new(0, 0, 0), Position::new(2, 0, 2));
        let token = Token::new(TokenKind::Int(42), span);
        assert_eq!(token.span().len(), 2);
        assert!(matches!(token.kind(), TokenKind::Int(42)));
        assert!(matches!(token.into_kind(), TokenKind::Int(42)));
    }
}
