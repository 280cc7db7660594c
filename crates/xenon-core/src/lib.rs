// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # xenon-core
//!
//! The front-end of the Xenon scripting language, implemented in Rust.
//!
//! ## Overview
//!
//! This crate turns Xenon source text into bytecode modules:
//! - Lexer producing located, classified lexemes
//! - Recursive-descent parser with error resynchronization
//! - Semantic analysis building a scoped symbol table
//! - Code generator emitting stack-machine bytecode with a deduplicated
//!   constant pool
//! - Disassembler and AST printer for inspection
//!
//! ## Quick Start
//!
//! ```rust
//! use xenon_core::{compile, OpCode};
//!
//! let compilation = compile("x = 1 + 2")?;
//! let ops: Vec<OpCode> = compilation
//!     .module
//!     .initializer()
//!     .instructions()
//!     .iter()
//!     .map(|i| i.opcode)
//!     .collect();
//! assert_eq!(ops[2], OpCode::Add);
//! # Ok::<(), xenon_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod compiler;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod session;

#[cfg(feature = "parallel")]
pub mod parallel;

// Re-exports for convenience
pub use compiler::{disassemble, Constant, Module, OpCode};
pub use error::{Diagnostic, Error, Result, Severity};
pub use lexer::{scan, Lexeme, SourceLocation, TokenClass};
pub use parser::parse;
pub use session::{compile, Compilation, CompileOptions, NamePolicy, Session};

#[cfg(feature = "parallel")]
pub use parallel::{compile_parallel, ParallelCompiler};
