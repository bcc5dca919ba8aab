// Copyright 2026 Rill Contributors
// SPDX-License-Identifier: Apache-2.0

//! Rill command-line interface.
//!
//! This is the main entry point for the `rill` command.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use miette::Result;

mod commands;
mod diagnostic;

/// Rill: a small expression language with friendly errors
#[derive(Debug, Parser)]
#[command(name = "rill")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start an interactive REPL (the default)
    Repl,

    /// Check a source file for errors
    Check {
        /// Source file to check
        path: Utf8PathBuf,
    },

    /// Print the token sequence of a source file
    Tokens {
        /// Source file to tokenize
        path: Utf8PathBuf,
    },

    /// Print the parse tree of a source file
    Ast {
        /// Source file to parse
        path: Utf8PathBuf,
    },
}

/// Initialize logging, filtered by `RUST_LOG`.
fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();
}

fn main() -> Result<()> {
    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    init_logging();

    let cli = Cli::parse();

    let result = match cli.command {
        None | Some(Command::Repl) => commands::repl::run(),
        Some(Command::Check { path }) => commands::check::check(&path),
        Some(Command::Tokens { path }) => commands::check::tokens(&path),
        Some(Command::Ast { path }) => commands::check::ast(&path),
    };

    // Exit with appropriate code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("{e:?}");
            std::process::exit(1);
        }
    }
}
