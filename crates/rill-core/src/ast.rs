// Copyright 2026 Rill Contributors
// SPDX-License-Identifier: Apache-2.0

//! Abstract syntax tree definitions for Rill.
//!
//! The AST is a single sum type, [`Expr`], over the eight node kinds the
//! grammar can produce. Every variant carries a [`Span`] computed from its
//! constituent sub-spans, and a parent's span always fully encloses every
//! child's span. Children are boxed and exclusively owned: the tree has no
//! cycles and no sharing, and is immutable once the parser hands it over.
//!
//! [`Expr`]'s `Display` form is the fully parenthesised rendering used by
//! the REPL and the parser tests:
//!
//! ```
//! use rill_core::source_analysis::parse_source;
//!
//! let ast = parse_source("<stdin>", "5 + 3 * 2").unwrap();
//! assert_eq!(ast.to_string(), "(5 + (3 * 2))");
//! ```

use ecow::EcoString;

use crate::source_analysis::Span;

/// A unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `+x` (identity)
    Plus,
    /// `-x` (negation)
    Neg,
    /// `NOT x` (logical negation)
    Not,
}

impl std::fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plus => write!(f, "+"),
            Self::Neg => write!(f, "-"),
            Self::Not => write!(f, "NOT"),
        }
    }
}

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `^`
    Pow,
    /// `==`
    Eq,
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
    /// `AND`
    And,
    /// `OR`
    Or,
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEq => "<=",
            Self::GreaterEq => ">=",
            Self::And => "AND",
            Self::Or => "OR",
        };
        f.write_str(text)
    }
}

/// A numeric literal value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// An integer literal: `42`
    Int(i64),
    /// A floating-point literal: `3.14`
    Float(f64),
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

/// One `condition THEN body` clause of a conditional chain.
#[derive(Debug, Clone, PartialEq)]
pub struct IfCase {
    /// The guarding condition.
    pub condition: Expr,
    /// The expression evaluated when the condition holds.
    pub body: Expr,
}

/// A Rill expression.
///
/// Everything is an expression: assignments, conditionals, and loops all
/// produce values in the (out-of-scope) evaluator, so they all live in the
/// same sum type.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal.
    Number {
        /// The literal value.
        value: Number,
        /// Source location of the literal.
        span: Span,
    },

    /// A variable read: `x`.
    VarAccess {
        /// The variable name.
        name: EcoString,
        /// Source location of the name.
        span: Span,
    },

    /// A variable binding: `VAR x = value`.
    VarAssign {
        /// The variable name.
        name: EcoString,
        /// The bound value; recurses through the full expression rule, so
        /// `VAR x = VAR y = 5` nests right.
        value: Box<Expr>,
        /// Source location from the `VAR` keyword to the value.
        span: Span,
    },

    /// A unary operation: `-x`, `+x`, `NOT x`.
    Unary {
        /// The operator.
        op: UnaryOp,
        /// The operand.
        operand: Box<Expr>,
        /// Source location from the operator to the operand.
        span: Span,
    },

    /// A binary operation: `a + b`.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// The left operand.
        left: Box<Expr>,
        /// The right operand.
        right: Box<Expr>,
        /// Source location covering both operands.
        span: Span,
    },

    /// A conditional chain: `IF c THEN e (ELIF c THEN e)* (ELSE e)?`.
    If {
        /// The ordered `(condition, body)` clauses; never empty.
        cases: Vec<IfCase>,
        /// The optional `ELSE` expression.
        else_branch: Option<Box<Expr>>,
        /// Source location of the whole chain.
        span: Span,
    },

    /// A counted loop: `FOR i = start TO end (STEP step)? THEN body`.
    For {
        /// The loop variable name.
        var: EcoString,
        /// The initial value.
        start: Box<Expr>,
        /// The bound value.
        end: Box<Expr>,
        /// The optional increment; `None` leaves the default (an increment
        /// of one) to the evaluator.
        step: Option<Box<Expr>>,
        /// The loop body.
        body: Box<Expr>,
        /// Source location of the whole loop.
        span: Span,
    },

    /// A pre-test loop: `WHILE condition THEN body`.
    While {
        /// The loop condition.
        condition: Box<Expr>,
        /// The loop body.
        body: Box<Expr>,
        /// Source location of the whole loop.
        span: Span,
    },
}

impl Expr {
    /// Returns the span of this expression.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Number { span, .. }
            | Self::VarAccess { span, .. }
            | Self::VarAssign { span, .. }
            | Self::Unary { span, .. }
            | Self::Binary { span, .. }
            | Self::If { span, .. }
            | Self::For { span, .. }
            | Self::While { span, .. } => *span,
        }
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number { value, .. } => write!(f, "{value}"),
            Self::VarAccess { name, .. } => write!(f, "{name}"),
            Self::VarAssign { name, value, .. } => write!(f, "VAR {name} = {value}"),
            Self::Unary { op, operand, .. } => match op {
                UnaryOp::Not => write!(f, "(NOT {operand})"),
                _ => write!(f, "({op}{operand})"),
            },
            Self::Binary {
                op, left, right, ..
            } => write!(f, "({left} {op} {right})"),
            Self::If {
                cases, else_branch, ..
            } => {
                for (i, case) in cases.iter().enumerate() {
                    let lead = if i == 0 { "IF" } else { " ELIF" };
                    write!(f, "{lead} {} THEN {}", case.condition, case.body)?;
                }
                if let Some(else_branch) = else_branch {
                    write!(f, " ELSE {else_branch}")?;
                }
                Ok(())
            }
            Self::For {
                var,
                start,
                end,
                step,
                body,
                ..
            } => {
                write!(f, "FOR {var} = {start} TO {end}")?;
                if let Some(step) = step {
                    write!(f, " STEP {step}")?;
                }
                write!(f, " THEN {body}")
            }
            Self::While {
                condition, body, ..
            } => write!(f, "WHILE {condition} THEN {body}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_analysis::Position;

    fn span(start: u32, end: u32) -> Span {
        Span::new(Position::new(start, 0, start), Position::new(end, 0, end))
    }

    fn int(value: i64, start: u32, end: u32) -> Expr {
        Expr::Number {
            value: Number::Int(value),
            span: span(start, end),
        }
    }

    #[test]
    fn display_is_fully_parenthesised() {
        let sum = Expr::Binary {
            op: BinaryOp::Add,
            left: Box::new(int(5, 0, 1)),
            right: Box::new(int(3, 4, 5)),
            span: span(0, 5),
        };
        assert_eq!(sum.to_string(), "(5 + 3)");

        let negated = Expr::Unary {
            op: UnaryOp::Neg,
            operand: Box::new(int(5, 1, 2)),
            span: span(0, 2),
        };
        assert_eq!(negated.to_string(), "(-5)");

        let not = Expr::Unary {
            op: UnaryOp::Not,
            operand: Box::new(int(1, 4, 5)),
            span: span(0, 5),
        };
        assert_eq!(not.to_string(), "(NOT 1)");
    }

    #[test]
    fn display_of_compound_constructs() {
        let chain = Expr::If {
            cases: vec![IfCase {
                condition: int(1, 3, 4),
                body: int(2, 10, 11),
            }],
            else_branch: Some(Box::new(int(3, 17, 18))),
            span: span(0, 18),
        };
        assert_eq!(chain.to_string(), "IF 1 THEN 2 ELSE 3");

        let loop_expr = Expr::For {
            var: "i".into(),
            start: Box::new(int(1, 8, 9)),
            end: Box::new(int(9, 13, 14)),
            step: None,
            body: Box::new(int(0, 20, 21)),
            span: span(0, 21),
        };
        assert_eq!(loop_expr.to_string(), "FOR i = 1 TO 9 THEN 0");
    }

    #[test]
    fn expr_span_accessor() {
        let expr = Expr::VarAccess {
            name: "x".into(),
            span: span(2, 3),
        };
        assert_eq!(expr.span(), span(2, 3));
    }

    #[test]
    fn number_display() {
        assert_eq!(Number::Int(42).to_string(), "42");
        assert_eq!(Number::Float(2.5).to_string(), "2.5");
    }
}
