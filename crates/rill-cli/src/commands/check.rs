// Copyright 2026 Rill Contributors
// SPDX-License-Identifier: Apache-2.0

//! File-oriented commands: `check`, `tokens`, and `ast`.
//!
//! All three read a source file and run it through the front end. Failures
//! come back as miette reports, so a bad file gets the fancy caret
//! rendering against the on-disk source.

use camino::Utf8Path;
use miette::{Context, IntoDiagnostic, Result};
use rill_core::ast::Expr;
use rill_core::source_analysis::{parse_source, tokenize, SourceText};
use tracing::{debug, instrument};

use crate::diagnostic::ParseDiagnostic;

/// Check a source file for errors.
#[instrument(skip_all, fields(path = %path))]
pub fn check(path: &Utf8Path) -> Result<()> {
    let expr = parse_file(path)?;
    debug!(%expr, "parse succeeded");
    println!("{path}: syntax OK");
    Ok(())
}

/// Print a source file's token sequence, one token per line.
#[instrument(skip_all, fields(path = %path))]
pub fn tokens(path: &Utf8Path) -> Result<()> {
    let source = read_source(path)?;
    let tokens =
        tokenize(&source).map_err(|diag| ParseDiagnostic::from_core_diagnostic(&diag))?;
    debug!(count = tokens.len(), "tokenized");

    for token in &tokens {
        let span = token.span();
        println!(
            "{}:{}..{}:{}\t{}",
            span.start().line() + 1,
            span.start().col() + 1,
            span.end().line() + 1,
            span.end().col() + 1,
            token.kind(),
        );
    }
    Ok(())
}

/// Print a source file's parse tree in fully parenthesised form.
#[instrument(skip_all, fields(path = %path))]
pub fn ast(path: &Utf8Path) -> Result<()> {
    let expr = parse_file(path)?;
    println!("{expr}");
    Ok(())
}

fn parse_file(path: &Utf8Path) -> Result<Expr> {
    let source = read_source(path)?;
    parse_source(source.name(), source.text())
        .map_err(|diag| ParseDiagnostic::from_core_diagnostic(&diag).into())
}

fn read_source(path: &Utf8Path) -> Result<SourceText> {
    let text = std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read '{path}'"))?;
    Ok(SourceText::new(path.as_str(), text))
}
