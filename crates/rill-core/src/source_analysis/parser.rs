// Copyright 2026 Rill Contributors
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent parser for Rill source code.
//!
//! Each grammar rule is one method, and operator binding strength falls out
//! of the call order (precedence climbing):
//!
//! | Rule | Operators | Associativity |
//! |------|-----------|---------------|
//! | `expression` | `AND` `OR` (or a `VAR` binding) | Left (binding nests right) |
//! | `comparison` | `==` `!=` `<` `>` `<=` `>=` (or leading `NOT`) | Left |
//! | `arithmetic` | `+` `-` | Left |
//! | `term` | `*` `/` | Left |
//! | `factor` | leading unary `+`/`-`, bare identifiers | Right (unary) |
//! | `power` | `^` | Right, via the factor rule on its right operand |
//! | `atom` | literals, `( ... )`, `IF`, `FOR`, `WHILE` | — |
//!
//! The parser is fail-fast: the first diagnostic aborts the whole parse and
//! is propagated to the caller unchanged. There is no recovery and no
//! partial AST on failure.

use ecow::EcoString;

use crate::ast::{BinaryOp, Expr, IfCase, Number, UnaryOp};
use crate::source_analysis::{
    tokenize, Diagnostic, Keyword, Position, SourceText, Span, Token, TokenKind,
};

/// Lexes and parses `text` in one step.
///
/// # Examples
///
/// ```
/// use rill_core::source_analysis::parse_source;
///
/// let ast = parse_source("<stdin>", "1 + 2 * 3").unwrap();
/// assert_eq!(ast.to_string(), "(1 + (2 * 3))");
/// ```
pub fn parse_source(
    name: impl Into<EcoString>,
    text: impl Into<EcoString>,
) -> Result<Expr, Diagnostic> {
    let source = SourceText::new(name, text);
    let tokens = tokenize(&source)?;
    Parser::new(&source, tokens).parse()
}

/// Operator table entry: a token kind and the AST operator it maps to.
type OpEntry = (TokenKind, BinaryOp);

/// `^`
const POWER_OPS: &[OpEntry] = &[(TokenKind::Caret, BinaryOp::Pow)];

/// `*` `/`
const TERM_OPS: &[OpEntry] = &[
    (TokenKind::Star, BinaryOp::Mul),
    (TokenKind::Slash, BinaryOp::Div),
];

/// `+` `-`
const ARITHMETIC_OPS: &[OpEntry] = &[
    (TokenKind::Plus, BinaryOp::Add),
    (TokenKind::Minus, BinaryOp::Sub),
];

/// `==` `!=` `<` `>` `<=` `>=`
const COMPARISON_OPS: &[OpEntry] = &[
    (TokenKind::EqEq, BinaryOp::Eq),
    (TokenKind::NotEq, BinaryOp::NotEq),
    (TokenKind::Less, BinaryOp::Less),
    (TokenKind::Greater, BinaryOp::Greater),
    (TokenKind::LessEq, BinaryOp::LessEq),
    (TokenKind::GreaterEq, BinaryOp::GreaterEq),
];

/// `AND` `OR`
const LOGIC_OPS: &[OpEntry] = &[
    (TokenKind::Keyword(Keyword::And), BinaryOp::And),
    (TokenKind::Keyword(Keyword::Or), BinaryOp::Or),
];

/// Maps the current token to an operator if it appears in `ops`.
fn lookup_op(ops: &[OpEntry], kind: &TokenKind) -> Option<BinaryOp> {
    ops.iter()
        .find(|(token_kind, _)| token_kind == kind)
        .map(|&(_, op)| op)
}

type ParseResult = Result<Expr, Diagnostic>;

/// Maximum nesting depth for expressions before the parser bails out.
///
/// Prevents stack overflow on deeply nested input (e.g. `(((((...)))))`).
/// Each nesting level uses multiple stack frames through the rule call
/// chain. 64 is generous enough for any realistic program while staying
/// safe. As a second line of defence, `stacker::maybe_grow` extends the
/// stack on the heap at the `expression` entry point.
const MAX_NESTING_DEPTH: usize = 64;

/// The parser state: a read-only token sequence and a cursor.
pub struct Parser<'src> {
    source: &'src SourceText,
    tokens: Vec<Token>,
    current: usize,
    /// Current expression nesting depth (guards against stack overflow).
    nesting_depth: usize,
}

impl<'src> Parser<'src> {
    /// Creates a parser over a token sequence produced by the lexer.
    ///
    /// The sequence is expected to end with an EOF token; [`tokenize`]
    /// always provides one.
    #[must_use]
    pub fn new(source: &'src SourceText, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            current: 0,
            nesting_depth: 0,
        }
    }

    /// Parses the token sequence into a single expression.
    ///
    /// Statement separators may surround the expression; any other token
    /// left before EOF is a syntax error.
    pub fn parse(mut self) -> ParseResult {
        self.skip_separators();
        let expr = self.expression()?;
        self.skip_separators();
        if !self.is_at_end() {
            return Err(self.invalid_syntax(
                "Expected '+', '-', '*' or '/'",
                self.current_token().span(),
            ));
        }
        Ok(expr)
    }

    // ========================================================================
    // Token management
    // ========================================================================

    /// Returns the current token.
    ///
    /// The cursor never moves past the trailing EOF token, so for any
    /// lexer-produced sequence the index is in bounds; an empty sequence
    /// falls back to a synthetic EOF at the origin.
    fn current_token(&self) -> &Token {
        static EOF: Token = Token::new(
            TokenKind::Eof,
            Span::new(Position::new(0, 0, 0), Position::new(0, 0, 0)),
        );
        self.tokens.get(self.current).unwrap_or(&EOF)
    }

    /// Returns the current token kind.
    fn current_kind(&self) -> &TokenKind {
        self.current_token().kind()
    }

    /// Checks if we're at the end of input.
    fn is_at_end(&self) -> bool {
        self.current_kind().is_eof()
    }

    /// Advances to the next token and returns the previous one.
    fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    /// Skips any run of statement separators.
    fn skip_separators(&mut self) {
        while matches!(self.current_kind(), TokenKind::Newline) {
            self.advance();
        }
    }

    /// Consumes the given keyword or fails with `message`.
    fn expect_keyword(&mut self, keyword: Keyword, message: &str) -> Result<Token, Diagnostic> {
        if self.current_kind().is_keyword(keyword) {
            Ok(self.advance())
        } else {
            Err(self.invalid_syntax(message, self.current_token().span()))
        }
    }

    /// Consumes an identifier or fails.
    fn expect_identifier(&mut self) -> Result<(EcoString, Span), Diagnostic> {
        if let TokenKind::Identifier(name) = self.current_kind() {
            let name = name.clone();
            let token = self.advance();
            Ok((name, token.span()))
        } else {
            Err(self.invalid_syntax("Expected identifier", self.current_token().span()))
        }
    }

    /// Builds an invalid-syntax diagnostic at `span`.
    fn invalid_syntax(&self, message: &str, span: Span) -> Diagnostic {
        Diagnostic::invalid_syntax(message, span, self.source.clone())
    }

    /// Runs `rule` one nesting level deeper, failing past the depth cap.
    ///
    /// Every self-recursive rule goes through here, so recursion depth is
    /// bounded by [`MAX_NESTING_DEPTH`] regardless of input.
    fn descend(&mut self, rule: fn(&mut Self) -> ParseResult) -> ParseResult {
        self.nesting_depth += 1;
        if self.nesting_depth > MAX_NESTING_DEPTH {
            self.nesting_depth -= 1;
            return Err(self.invalid_syntax(
                &format!("Expression nesting is too deep (maximum {MAX_NESTING_DEPTH} levels)"),
                self.current_token().span(),
            ));
        }
        let result = rule(self);
        debug_assert!(self.nesting_depth > 0, "descend depth underflow");
        self.nesting_depth = self.nesting_depth.saturating_sub(1);
        result
    }

    // ========================================================================
    // Grammar rules, lowest precedence first
    // ========================================================================

    /// `expression := VAR IDENTIFIER = expression | comparison ((AND|OR) comparison)*`
    ///
    /// The bound value recurses through this rule, so assignment is
    /// right-associative and binds loosest of all.
    ///
    /// Entry point for all nested expression positions (parens, bound
    /// values, conditions, loop bodies). `stacker::maybe_grow` extends the
    /// stack on the heap when remaining space falls below 32 KiB; the
    /// segment stays small because [`descend`](Self::descend) caps
    /// recursion depth anyway.
    fn expression(&mut self) -> ParseResult {
        stacker::maybe_grow(32 * 1024, 256 * 1024, || {
            self.descend(Self::expression_inner)
        })
    }

    fn expression_inner(&mut self) -> ParseResult {
        if self.current_kind().is_keyword(Keyword::Var) {
            let var_token = self.advance();
            let (name, _) = self.expect_identifier()?;
            if !matches!(self.current_kind(), TokenKind::Eq) {
                return Err(self.invalid_syntax("Expected '='", self.current_token().span()));
            }
            self.advance();
            let value = self.expression()?;
            let span = var_token.span().merge(value.span());
            return Ok(Expr::VarAssign {
                name,
                value: Box::new(value),
                span,
            });
        }

        self.binary_chain(Self::comparison_expression, LOGIC_OPS, Self::comparison_expression)
    }

    /// `comparison := NOT comparison | arithmetic ((==|!=|<|>|<=|>=) arithmetic)*`
    fn comparison_expression(&mut self) -> ParseResult {
        if self.current_kind().is_keyword(Keyword::Not) {
            let not_token = self.advance();
            let operand = self.descend(Self::comparison_expression)?;
            let span = not_token.span().merge(operand.span());
            return Ok(Expr::Unary {
                op: UnaryOp::Not,
                operand: Box::new(operand),
                span,
            });
        }

        self.binary_chain(
            Self::arithmetic_expression,
            COMPARISON_OPS,
            Self::arithmetic_expression,
        )
    }

    /// `arithmetic := term ((+|-) term)*`
    fn arithmetic_expression(&mut self) -> ParseResult {
        self.binary_chain(Self::term, ARITHMETIC_OPS, Self::term)
    }

    /// `term := factor ((*|/) factor)*`
    fn term(&mut self) -> ParseResult {
        self.binary_chain(Self::factor, TERM_OPS, Self::factor)
    }

    /// `factor := (+|-) factor | IDENTIFIER | power`
    ///
    /// Unary recurses through this rule, so `--5` is a double negation.
    fn factor(&mut self) -> ParseResult {
        match self.current_kind() {
            TokenKind::Plus | TokenKind::Minus => {
                let op = if matches!(self.current_kind(), TokenKind::Plus) {
                    UnaryOp::Plus
                } else {
                    UnaryOp::Neg
                };
                let op_token = self.advance();
                let operand = self.descend(Self::factor)?;
                let span = op_token.span().merge(operand.span());
                Ok(Expr::Unary {
                    op,
                    operand: Box::new(operand),
                    span,
                })
            }
            TokenKind::Identifier(name) => {
                let name = name.clone();
                let token = self.advance();
                Ok(Expr::VarAccess {
                    name,
                    span: token.span(),
                })
            }
            _ => self.power(),
        }
    }

    /// `power := atom (^ factor)*`
    ///
    /// The right operand goes back through `factor`, not `power`; the unary
    /// layer underneath makes `^` right-associative (`2 ^ 3 ^ 2` groups as
    /// `2 ^ (3 ^ 2)`).
    fn power(&mut self) -> ParseResult {
        self.binary_chain(Self::atom, POWER_OPS, Self::factor)
    }

    /// `atom := INT | FLOAT | ( expression ) | if-chain | for-loop | while-loop`
    fn atom(&mut self) -> ParseResult {
        let span = self.current_token().span();
        match self.current_kind() {
            TokenKind::Int(value) => {
                let value = *value;
                self.advance();
                Ok(Expr::Number {
                    value: Number::Int(value),
                    span,
                })
            }
            TokenKind::Float(value) => {
                let value = *value;
                self.advance();
                Ok(Expr::Number {
                    value: Number::Float(value),
                    span,
                })
            }
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.expression()?;
                if matches!(self.current_kind(), TokenKind::RightParen) {
                    self.advance();
                    Ok(expr)
                } else {
                    Err(self.invalid_syntax("Expected ')'", self.current_token().span()))
                }
            }
            TokenKind::Keyword(Keyword::If) => self.if_expression(),
            TokenKind::Keyword(Keyword::For) => self.for_expression(),
            TokenKind::Keyword(Keyword::While) => self.while_expression(),
            _ => Err(self.invalid_syntax(
                "Expected an integer, a float, an identifier, or '+', '-' or '('",
                span,
            )),
        }
    }

    /// Left-folds `operand (op right_operand)*` over the permitted `ops`.
    ///
    /// All four chain layers share this helper; left associativity falls
    /// out of the fold.
    fn binary_chain(
        &mut self,
        operand: fn(&mut Self) -> ParseResult,
        ops: &[OpEntry],
        right_operand: fn(&mut Self) -> ParseResult,
    ) -> ParseResult {
        let mut left = operand(self)?;

        while let Some(op) = lookup_op(ops, self.current_kind()) {
            self.advance();
            let right = right_operand(self)?;
            let span = left.span().merge(right.span());
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                span,
            };
        }

        Ok(left)
    }

    // ========================================================================
    // Compound constructs
    // ========================================================================

    /// `IF cond THEN expr (ELIF cond THEN expr)* (ELSE expr)?`
    ///
    /// The chain stops consuming after its last clause; trailing tokens are
    /// the top-level expected-EOF check's problem, not this rule's.
    fn if_expression(&mut self) -> ParseResult {
        let if_token = self.advance();
        let mut cases = Vec::new();

        let condition = self.expression()?;
        self.expect_keyword(Keyword::Then, "Expected 'THEN'")?;
        let body = self.expression()?;
        cases.push(IfCase { condition, body });

        while self.current_kind().is_keyword(Keyword::Elif) {
            self.advance();
            let condition = self.expression()?;
            self.expect_keyword(Keyword::Then, "Expected 'THEN'")?;
            let body = self.expression()?;
            cases.push(IfCase { condition, body });
        }

        let else_branch = if self.current_kind().is_keyword(Keyword::Else) {
            self.advance();
            Some(Box::new(self.expression()?))
        } else {
            None
        };

        let end_span = else_branch.as_ref().map_or_else(
            || cases.last().map_or(if_token.span(), |case| case.body.span()),
            |else_branch| else_branch.span(),
        );
        let span = if_token.span().merge(end_span);
        Ok(Expr::If {
            cases,
            else_branch,
            span,
        })
    }

    /// `FOR IDENTIFIER = start TO end (STEP step)? THEN body`
    fn for_expression(&mut self) -> ParseResult {
        let for_token = self.advance();
        let (var, _) = self.expect_identifier()?;

        if !matches!(self.current_kind(), TokenKind::Eq) {
            return Err(self.invalid_syntax("Expected '='", self.current_token().span()));
        }
        self.advance();

        let start = self.expression()?;
        self.expect_keyword(Keyword::To, "Expected 'TO'")?;
        let end = self.expression()?;

        let step = if self.current_kind().is_keyword(Keyword::Step) {
            self.advance();
            Some(Box::new(self.expression()?))
        } else {
            None
        };

        self.expect_keyword(Keyword::Then, "Expected 'THEN'")?;
        let body = self.expression()?;

        let span = for_token.span().merge(body.span());
        Ok(Expr::For {
            var,
            start: Box::new(start),
            end: Box::new(end),
            step,
            body: Box::new(body),
            span,
        })
    }

    /// `WHILE cond THEN body`
    fn while_expression(&mut self) -> ParseResult {
        let while_token = self.advance();
        let condition = self.expression()?;
        self.expect_keyword(Keyword::Then, "Expected 'THEN'")?;
        let body = self.expression()?;

        let span = while_token.span().merge(body.span());
        Ok(Expr::While {
            condition: Box::new(condition),
            body: Box::new(body),
            span,
        })
    }
}
