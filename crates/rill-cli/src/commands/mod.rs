// Copyright 2026 Rill Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI command implementations.

pub mod check;
pub mod repl;
