// Copyright 2026 Rill Contributors
// SPDX-License-Identifier: Apache-2.0

//! Source code analysis for Rill: lexing, parsing, and positional
//! diagnostics.
//!
//! The pipeline has two stages. [`tokenize`] turns source text into a flat
//! token sequence, and [`Parser`] turns that sequence into an
//! [`Expr`](crate::ast::Expr) tree.
//! [`parse_source`] runs both. Every stage is fail-fast: the first
//! [`Diagnostic`] wins and carries everything needed to render a caret
//! excerpt without going back to the caller for context.

mod error;
mod lexer;
mod parser;
mod position;
mod token;


pub use error::{Diagnostic, ErrorKind};
pub use lexer::tokenize;
pub use parser::{parse_source, Parser};
pub use position::{Position, SourceText, Span};
pub use token::{Keyword, Token, TokenKind};
