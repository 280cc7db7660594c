// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Lexical analysis (tokenization) for Xenon source code.
//!
//! The lexer transforms source text into an ordered sequence of lexemes
//! that is handed to the parser in one piece.
//!
//! ## Structure
//!
//! - `scanner.rs` - Main `Scanner` struct that produces lexemes
//! - `token.rs` - `Lexeme`, `TokenClass`, `Keyword` and `SourceLocation`
//!
//! ## Documentation Submodules
//!
//! - `operators` - Maximal-munch operator scanning
//! - `literals` - Number, string, and identifier literals
//!
//! ## Usage
//!
//! ```rust
//! use xenon_core::lexer::{scan, TokenClass};
//!
//! let lexemes = scan("a = 0x10").unwrap();
//! assert_eq!(lexemes[2].class, TokenClass::IntLiteral);
//! assert_eq!(lexemes[2].literal, "16");
//! ```

mod scanner;
mod token;

// Documentation and test submodules
pub mod literals;
pub mod operators;

pub use scanner::{Scanner, OPERATOR_CHARS};
pub use token::{Keyword, Lexeme, SourceLocation, TokenClass, OPERATOR_WORDS};

use crate::error::LexError;

/// Scans `source` into lexemes.
pub fn scan(source: &str) -> Result<Vec<Lexeme>, LexError> {
    Scanner::new(source).scan()
}
