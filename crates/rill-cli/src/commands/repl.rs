// Copyright 2026 Rill Contributors
// SPDX-License-Identifier: Apache-2.0

//! Interactive REPL.
//!
//! Reads one expression per line, parses it, and prints the fully
//! parenthesised tree. Parse failures print the plain-text caret excerpt
//! rather than a miette report; the source is the line just typed, so the
//! compact form reads better at the prompt.

use miette::{IntoDiagnostic, Result};
use rill_core::source_analysis::parse_source;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

const PROMPT: &str = "rill> ";

/// Run the REPL until end-of-file, interrupt, or `:exit`.
pub fn run() -> Result<()> {
    println!("Rill {} (:exit to quit)", env!("CARGO_PKG_VERSION"));

    let mut rl = DefaultEditor::new().into_diagnostic()?;

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                match line {
                    ":exit" | ":quit" | ":q" => break,
                    _ => evaluate(line),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e).into_diagnostic(),
        }
    }

    Ok(())
}

/// Parse one line and print the result or the error excerpt.
fn evaluate(line: &str) {
    match parse_source("<stdin>", line) {
        Ok(expr) => println!("{expr}"),
        Err(diag) => {
            debug!(kind = %diag.kind(), "parse failed");
            eprintln!("{}", diag.as_string());
        }
    }
}
