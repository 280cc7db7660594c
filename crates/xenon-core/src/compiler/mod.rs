// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Bytecode compiler for Xenon.
//!
//! Transforms an AST into a [`Module`]: a constant pool plus the
//! instructions of the module initializer.
//!
//! # Module Structure
//!
//! - `analyzer`: Semantic analysis, builds the symbol table
//! - `scope`: Scopes, symbols and slots
//! - `bytecode`: Opcodes, instructions and method flags
//! - `emitter`: Instruction buffers and jump labels
//! - `module`: Constant pool and compiled modules
//! - `codegen`: Code generation from AST
//! - `disasm`: Human-readable listings

pub mod analyzer;
pub mod bytecode;
pub mod codegen;
pub mod disasm;
pub mod emitter;
pub mod module;
pub mod scope;

pub use analyzer::Analyzer;
pub use bytecode::{Bytecode, Instruction, MethodFlags, OpCode};
pub use codegen::{Compiler, CompilerContext};
pub use disasm::disassemble;
pub use emitter::{Emitter, Label, LabelGenerator};
pub use module::{Constant, ConstantPool, Module};
pub use scope::{Scope, Symbol, SymbolTable};
