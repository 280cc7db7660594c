// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Parser for Xenon source code.
//!
//! Transforms a lexeme sequence into an Abstract Syntax Tree (AST).
//!
//! ## Structure
//!
//! - `cursor` - Forward-only cursor over scanned lexemes
//! - `parser` - Main recursive descent parser implementation
//!
//! ## Documentation Submodules
//!
//! The following submodules provide documentation and additional tests
//! for specific parsing areas:
//!
//! - `statements` - Statement parsing and error recovery
//! - `expressions` - The precedence ladder, tuples and lambdas
//!
//! ## Usage
//!
//! ```rust
//! use xenon_core::parser::Parser;
//!
//! let root = Parser::from_source("fn add(a, b) { a + b }")
//!     .expect("Should scan")
//!     .parse()
//!     .expect("Should parse");
//! assert_eq!(root.statements.len(), 1);
//! ```
//!
//! Collecting every diagnostic instead of failing:
//!
//! ```rust
//! use xenon_core::parser::Parser;
//!
//! let (root, errors) = Parser::from_source("a = ; b = 1")
//!     .expect("Should scan")
//!     .parse_recovering();
//! assert_eq!(root.statements.len(), 1);
//! assert_eq!(errors.len(), 1);
//! ```

mod cursor;
#[allow(clippy::module_inception)]
mod parser;

// Documentation and test submodules
pub mod expressions;
pub mod statements;

pub use cursor::Cursor;
pub use parser::{Parser, DEFAULT_MAX_ERRORS};

use crate::ast::AstRoot;
use crate::error::Result;

/// Scans and parses `source`, failing on the first lexical error or on
/// any grammar violation.
pub fn parse(source: &str) -> Result<AstRoot> {
    Parser::from_source(source)?.parse()
}
