// Copyright 2026 Rill Contributors
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for Rill source code.
//!
//! The lexer is a hand-written left-to-right scanner with one character of
//! lookahead. Characters are never re-scanned once consumed; the two-glyph
//! operators (`->`, `==`, `!=`, `<=`, `>=`) peek ahead without backtracking.
//!
//! Unlike the parser's token-level lookahead, lexing is fail-fast at the
//! character level: the first illegal character or malformed operator stops
//! the scan and returns a [`Diagnostic`].
//!
//! # Example
//!
//! ```
//! use rill_core::source_analysis::{tokenize, SourceText};
//!
//! let tokens = tokenize(&SourceText::new("<stdin>", "1 + 2")).unwrap();
//! assert_eq!(tokens.len(), 4); // 1, +, 2, <eof>
//! assert!(tokens[3].kind().is_eof());
//! ```

use ecow::EcoString;

use super::{Diagnostic, Keyword, Position, SourceText, Span, Token, TokenKind};

/// Scans `source` into a token sequence ending with a zero-width EOF token.
pub fn tokenize(source: &SourceText) -> Result<Vec<Token>, Diagnostic> {
    Lexer::new(source).tokenize()
}

/// A lexer over one piece of source text.
pub struct Lexer<'src> {
    source: &'src SourceText,
    /// Source characters; [`Position::index`] addresses into this.
    chars: Vec<char>,
    pos: Position,
    current: Option<char>,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    #[must_use]
    pub fn new(source: &'src SourceText) -> Self {
        let chars: Vec<char> = source.text().chars().collect();
        let current = chars.first().copied();
        Self {
            source,
            chars,
            pos: Position::default(),
            current,
        }
    }

    /// Moves the cursor one character forward.
    fn advance(&mut self) {
        self.pos = self.pos.advance(self.current);
        self.current = self.chars.get(self.pos.index() as usize).copied();
    }

    /// Scans the whole input. Returns the first failure, if any.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Diagnostic> {
        let mut tokens = Vec::new();

        while let Some(c) = self.current {
            match c {
                ' ' | '\t' | '\r' => self.advance(),
                ';' | '\n' => tokens.push(self.single(TokenKind::Newline)),
                '0'..='9' => tokens.push(self.lex_number()?),
                'a'..='z' | 'A'..='Z' => tokens.push(self.lex_identifier()),
                '"' => tokens.push(self.lex_string()?),
                '+' => tokens.push(self.single(TokenKind::Plus)),
                '*' => tokens.push(self.single(TokenKind::Star)),
                '/' => tokens.push(self.single(TokenKind::Slash)),
                '^' => tokens.push(self.single(TokenKind::Caret)),
                '(' => tokens.push(self.single(TokenKind::LeftParen)),
                ')' => tokens.push(self.single(TokenKind::RightParen)),
                ',' => tokens.push(self.single(TokenKind::Comma)),
                '-' => tokens.push(self.pair('>', TokenKind::Arrow, TokenKind::Minus)),
                '=' => tokens.push(self.pair('=', TokenKind::EqEq, TokenKind::Eq)),
                '<' => tokens.push(self.pair('=', TokenKind::LessEq, TokenKind::Less)),
                '>' => tokens.push(self.pair('=', TokenKind::GreaterEq, TokenKind::Greater)),
                '!' => tokens.push(self.lex_not_equals()?),
                _ => {
                    let start = self.pos;
                    self.advance();
                    return Err(Diagnostic::illegal_character(
                        c,
                        Span::new(start, self.pos),
                        self.source.clone(),
                    ));
                }
            }
        }

        tokens.push(Token::new(TokenKind::Eof, Span::new(self.pos, self.pos)));
        Ok(tokens)
    }

    /// Emits a single-character token.
    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.pos;
        self.advance();
        Token::new(kind, Span::new(start, self.pos))
    }

    /// Emits `double` if the next character is `follow`, else `single`.
    fn pair(&mut self, follow: char, double: TokenKind, single: TokenKind) -> Token {
        let start = self.pos;
        self.advance();
        if self.current == Some(follow) {
            self.advance();
            Token::new(double, Span::new(start, self.pos))
        } else {
            Token::new(single, Span::new(start, self.pos))
        }
    }

    /// `!` must be followed by `=`; there is no standalone lexical NOT.
    fn lex_not_equals(&mut self) -> Result<Token, Diagnostic> {
        let start = self.pos;
        self.advance();
        if self.current == Some('=') {
            self.advance();
            Ok(Token::new(TokenKind::NotEq, Span::new(start, self.pos)))
        } else {
            Err(Diagnostic::expected_character(
                "'=' (after '!')",
                Span::new(start, self.pos),
                self.source.clone(),
            ))
        }
    }

    /// A maximal run of digits with at most one `.`.
    ///
    /// A second dot ends the number early, so `1.2.3` lexes as `1.2`
    /// followed by whatever the stray `.` turns out to be (an illegal
    /// character). Conversion uses the standard library's decimal parsing.
    fn lex_number(&mut self) -> Result<Token, Diagnostic> {
        let start = self.pos;
        let mut text = String::new();
        let mut seen_dot = false;

        while let Some(c) = self.current {
            match c {
                '0'..='9' => text.push(c),
                '.' if !seen_dot => {
                    seen_dot = true;
                    text.push('.');
                }
                _ => break,
            }
            self.advance();
        }

        let span = Span::new(start, self.pos);
        let kind = if seen_dot {
            let value: f64 = text.parse().map_err(|_| {
                Diagnostic::new(
                    super::ErrorKind::IllegalCharacter,
                    "malformed float literal",
                    span,
                    self.source.clone(),
                )
            })?;
            TokenKind::Float(value)
        } else {
            let value: i64 = text.parse().map_err(|_| {
                Diagnostic::new(
                    super::ErrorKind::IllegalCharacter,
                    "integer literal too large",
                    span,
                    self.source.clone(),
                )
            })?;
            TokenKind::Int(value)
        };
        Ok(Token::new(kind, span))
    }

    /// A letter followed by letters, digits, and underscores; classified
    /// against the keyword table.
    fn lex_identifier(&mut self) -> Token {
        let start = self.pos;
        let mut text = String::new();

        while let Some(c) = self.current {
            if c.is_ascii_alphanumeric() || c == '_' {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }

        let kind = match Keyword::lookup(&text) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Identifier(EcoString::from(text)),
        };
        Token::new(kind, Span::new(start, self.pos))
    }

    /// A double-quoted string with `\n`, `\t`, and pass-through escapes.
    ///
    /// Reaching end-of-input before the closing quote is an error; the
    /// span runs from the opening quote to wherever the input gave out.
    fn lex_string(&mut self) -> Result<Token, Diagnostic> {
        let start = self.pos;
        let mut text = String::new();
        self.advance(); // opening quote

        loop {
            match self.current {
                None => {
                    return Err(Diagnostic::expected_character(
                        "'\"' (end of string)",
                        Span::new(start, self.pos),
                        self.source.clone(),
                    ));
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.current {
                        None => {
                            return Err(Diagnostic::expected_character(
                                "'\"' (end of string)",
                                Span::new(start, self.pos),
                                self.source.clone(),
                            ));
                        }
                        Some('n') => text.push('\n'),
                        Some('t') => text.push('\t'),
                        Some(c) => text.push(c),
                    }
                    self.advance();
                }
                Some(c) => {
                    text.push(c);
                    self.advance();
                }
            }
        }

        Ok(Token::new(
            TokenKind::Str(EcoString::from(text)),
            Span::new(start, self.pos),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_analysis::ErrorKind;

    fn lex(text: &str) -> Result<Vec<Token>, Diagnostic> {
        tokenize(&SourceText::new("<test>", text))
    }

    fn kinds(text: &str) -> Vec<TokenKind> {
        lex(text)
            .expect("input should lex")
            .into_iter()
            .map(Token::into_kind)
            .collect()
    }

    #[test]
    fn empty_input_is_just_eof() {
        let tokens = lex("").expect("empty input lexes");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].kind().is_eof());
        assert!(tokens[0].span().is_empty());
    }

    #[test]
    fn numbers_classify_as_int_or_float() {
        assert_eq!(
            kinds("7 3.5 10"),
            vec![
                TokenKind::Int(7),
                TokenKind::Float(3.5),
                TokenKind::Int(10),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn second_dot_ends_the_number() {
        // `1.2` then a stray `.` which is an illegal character.
        let err = lex("1.2.3").expect_err("stray dot is illegal");
        assert_eq!(err.kind(), ErrorKind::IllegalCharacter);
        assert_eq!(err.message(), "'.'");
        assert_eq!(err.span().start().index(), 3);
        assert_eq!(err.span().len(), 1);
    }

    #[test]
    fn trailing_dot_is_part_of_the_float() {
        assert_eq!(kinds("2."), vec![TokenKind::Float(2.0), TokenKind::Eof]);
    }

    #[test]
    fn oversized_integer_is_rejected() {
        let err = lex("99999999999999999999").expect_err("does not fit i64");
        assert_eq!(err.kind(), ErrorKind::IllegalCharacter);
        assert_eq!(err.message(), "integer literal too large");
        assert_eq!(err.span().len(), 20);
    }

    #[test]
    fn identifiers_and_keywords() {
        assert_eq!(
            kinds("VAR counter_2 WHILEx"),
            vec![
                TokenKind::Keyword(Keyword::Var),
                TokenKind::Identifier("counter_2".into()),
                TokenKind::Identifier("WHILEx".into()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn operators_lex_with_lookahead() {
        assert_eq!(
            kinds("+ - -> = == != < <= > >= ^ * / ( ) ,"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Arrow,
                TokenKind::Eq,
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::Less,
                TokenKind::LessEq,
                TokenKind::Greater,
                TokenKind::GreaterEq,
                TokenKind::Caret,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::Comma,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn adjacent_equals_pair_up_greedily() {
        // `===` is `==` then `=`: no backtracking once consumed.
        assert_eq!(
            kinds("==="),
            vec![TokenKind::EqEq, TokenKind::Eq, TokenKind::Eof]
        );
    }

    #[test]
    fn bang_without_equals_is_an_error() {
        let err = lex("5 ! 3").expect_err("standalone '!' is rejected");
        assert_eq!(err.kind(), ErrorKind::ExpectedCharacter);
        assert_eq!(err.message(), "'=' (after '!')");
        assert_eq!(err.span().start().col(), 2);
    }

    #[test]
    fn illegal_character_spans_exactly_one_char() {
        let err = lex("5 & 3").expect_err("'&' is not in the grammar");
        assert_eq!(err.kind(), ErrorKind::IllegalCharacter);
        assert_eq!(err.message(), "'&'");
        assert_eq!(err.span().start().index(), 2);
        assert_eq!(err.span().end().index(), 3);
    }

    #[test]
    fn string_escapes_resolve() {
        assert_eq!(
            kinds(r#""a\nb\tc\\d\"e""#),
            vec![TokenKind::Str("a\nb\tc\\d\"e".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn unknown_escape_passes_through() {
        assert_eq!(
            kinds(r#""\x""#),
            vec![TokenKind::Str("x".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = lex("\"abc").expect_err("missing closing quote");
        assert_eq!(err.kind(), ErrorKind::ExpectedCharacter);
        assert_eq!(err.message(), "'\"' (end of string)");
        assert_eq!(err.span().start().index(), 0);
        assert_eq!(err.span().end().index(), 4);
    }

    #[test]
    fn trailing_backslash_in_string_is_an_error() {
        let err = lex("\"abc\\").expect_err("escape with nothing to escape");
        assert_eq!(err.kind(), ErrorKind::ExpectedCharacter);
    }

    #[test]
    fn statement_separators() {
        assert_eq!(
            kinds("1;2\n3"),
            vec![
                TokenKind::Int(1),
                TokenKind::Newline,
                TokenKind::Int(2),
                TokenKind::Newline,
                TokenKind::Int(3),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn positions_track_lines_and_columns() {
        let tokens = lex("1 +\n 22").expect("input lexes");
        // `22` starts at line 1, col 1, char index 5.
        let span = tokens[3].span();
        assert_eq!(span.start().index(), 5);
        assert_eq!(span.start().line(), 1);
        assert_eq!(span.start().col(), 1);
        assert_eq!(span.end().col(), 3);
    }

    #[test]
    fn eof_token_sits_at_end_of_text() {
        let tokens = lex("ab").expect("input lexes");
        let eof = tokens.last().expect("eof token");
        assert!(eof.kind().is_eof());
        assert!(eof.span().is_empty());
        assert_eq!(eof.span().start().index(), 2);
    }

    #[test]
    fn relexing_reconstructed_source_preserves_kinds() {
        let first = lex("VAR x = 1 + 2.5 * (3 - 4) ^ 5 == 6 != 7 <= 8 AND NOT y ; z -> w")
            .expect("input lexes");
        let reconstructed = first
            .iter()
            .take(first.len() - 1) // drop <eof>
            .map(|t| t.kind().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let second = lex(&reconstructed).expect("reconstruction lexes");
        let first_kinds: Vec<_> = first.into_iter().map(Token::into_kind).collect();
        let second_kinds: Vec<_> = second.into_iter().map(Token::into_kind).collect();
        assert_eq!(first_kinds, second_kinds);
    }
}
