// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Compilation sessions.
//!
//! A [`Session`] owns the state shared by every compilation it runs: the
//! options and the label generator, so label ids stay unique across all
//! modules a session produces.

use std::str::FromStr;

use xenon_macros::str_enum;

use crate::ast::AstRoot;
use crate::compiler::{Compiler, LabelGenerator, Module, SymbolTable};
use crate::error::{Diagnostic, Result};
use crate::parser::{Parser, DEFAULT_MAX_ERRORS};

str_enum! {
    /// What the code generator does with a name that resolves nowhere.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub enum NamePolicy {
        /// Load it as a global without comment
        Allow => "allow",
        /// Load it as a global and record a warning
        #[default]
        Warn => "warn",
        /// Fail compilation, listing every such name
        Deny => "deny",
    }
}

impl FromStr for NamePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| {
            format!(
                "unknown name policy '{}' (expected one of: allow, warn, deny)",
                s
            )
        })
    }
}

/// Options controlling one compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Handling of unresolved names
    pub undefined_names: NamePolicy,
    /// Parse errors collected before the parser gives up
    pub max_errors: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            undefined_names: NamePolicy::default(),
            max_errors: DEFAULT_MAX_ERRORS,
        }
    }
}

/// The output of a successful compilation.
#[derive(Debug, Clone)]
pub struct Compilation {
    /// The compiled module
    pub module: Module,
    /// The symbol table built by analysis
    pub symbols: SymbolTable,
    /// Warnings from analysis and code generation
    pub diagnostics: Vec<Diagnostic>,
}

/// Compiles source texts with shared options and label numbering.
#[derive(Debug, Default)]
pub struct Session {
    options: CompileOptions,
    labels: LabelGenerator,
    diagnostics: Vec<Diagnostic>,
}

impl Session {
    /// Creates a session with the given options.
    pub fn new(options: CompileOptions) -> Self {
        Self {
            options,
            labels: LabelGenerator::new(),
            diagnostics: Vec::new(),
        }
    }

    /// The session's options.
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Scans, parses and compiles `source`.
    pub fn compile(&mut self, source: &str) -> Result<Compilation> {
        let root = Parser::from_source(source)?
            .with_max_errors(self.options.max_errors)
            .parse()?;
        self.compile_ast(&root)
    }

    /// Compiles an already parsed tree.
    pub fn compile_ast(&mut self, root: &AstRoot) -> Result<Compilation> {
        let compilation = Compiler::new(&mut self.labels, &self.options).compile(root)?;
        self.diagnostics
            .extend(compilation.diagnostics.iter().cloned());
        Ok(compilation)
    }

    /// Every diagnostic produced by this session so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of labels handed out so far.
    pub fn label_count(&self) -> u32 {
        self.labels.count()
    }
}

/// Compiles `source` with default options.
pub fn compile(source: &str) -> Result<Compilation> {
    Session::default().compile(source)
}
