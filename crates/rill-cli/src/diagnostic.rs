// Copyright 2026 Rill Contributors
// SPDX-License-Identifier: Apache-2.0

//! Rich error diagnostics using miette.
//!
//! Converts rill-core diagnostics into miette-formatted errors with:
//! - Source code context
//! - Arrows pointing to the error location
//! - Diagnostic codes for easy reference

use miette::{Diagnostic, SourceSpan};
use rill_core::source_analysis::{Diagnostic as CoreDiagnostic, ErrorKind};

/// A parse diagnostic with rich formatting.
#[derive(Debug, Diagnostic, thiserror::Error)]
#[error("{kind}: {message}")]
#[diagnostic(code(rill::parse))]
pub struct ParseDiagnostic {
    /// Which stage of the pipeline rejected the input.
    pub kind: ErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Source code for context.
    #[source_code]
    pub src: miette::NamedSource<String>,
    /// Location of the error, in byte offsets.
    #[label("here")]
    pub span: SourceSpan,
}

impl ParseDiagnostic {
    /// Creates a new diagnostic from a rill-core diagnostic.
    ///
    /// The core span is measured in characters; miette wants bytes, so the
    /// conversion walks the source text it already carries.
    pub fn from_core_diagnostic(diagnostic: &CoreDiagnostic) -> Self {
        let source = diagnostic.source();
        Self {
            kind: diagnostic.kind(),
            message: diagnostic.message().to_string(),
            src: miette::NamedSource::new(source.name(), source.text().to_string()),
            span: diagnostic.span().to_source_span(source.text()),
        }
    }
}
