// Copyright 2026 Rill Contributors
// SPDX-License-Identifier: Apache-2.0

//! Rill language front end.
//!
//! This crate contains the front-end pipeline for the Rill expression
//! language:
//! - Lexical analysis (tokenization)
//! - Parsing (AST construction)
//! - Positional diagnostics (caret-underlined error excerpts)
//!
//! The pipeline is fail-fast: the first error at any stage aborts the
//! run and is reported to the caller with full source context.

#![doc = include_str!("../../../README.md")]

pub mod ast;
pub mod source_analysis;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::ast::{BinaryOp, Expr, Number, UnaryOp};
    pub use crate::source_analysis::{parse_source, Diagnostic, SourceText, Span};
}
