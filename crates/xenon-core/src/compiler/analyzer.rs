// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Semantic analysis.
//!
//! Builds the [`SymbolTable`] the code generator resolves names against.
//! Every scope the code generator later re-enters is created here, in the
//! same traversal order.

use super::scope::SymbolTable;
use crate::ast::visit::{self, Visitor};
use crate::ast::*;
use crate::error::{Diagnostic, Error, Result};

/// Walks an AST and records declarations.
#[derive(Debug, Default)]
pub struct Analyzer {
    symbols: SymbolTable,
    diagnostics: Vec<Diagnostic>,
}

impl Analyzer {
    /// Creates an analyzer with an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzes `root`, returning the finished table and any warnings.
    pub fn analyze(mut self, root: &AstRoot) -> Result<(SymbolTable, Vec<Diagnostic>)> {
        self.visit_root(root)?;
        tracing::debug!(
            scopes = self.symbols.scopes().len(),
            slots = self.symbols.slot_count(),
            "analysis complete"
        );
        Ok((self.symbols, self.diagnostics))
    }

    fn apply_hint(&mut self, hint: &AnalysisHint) {
        match hint.action.as_str() {
            "global" => {
                self.symbols.add_global_symbol(&hint.name);
            }
            other => {
                tracing::warn!(action = other, "unknown analysis action");
                self.diagnostics.push(Diagnostic::warning(
                    hint.location,
                    format!("unknown analysis action '{}'", other),
                ));
            }
        }
    }

    fn add_parameters(&mut self, parameters: &[NamedParameter]) {
        for parameter in parameters {
            self.symbols.add_symbol(&parameter.name.value);
        }
    }
}

impl Visitor for Analyzer {
    type Error = Error;

    fn visit_root(&mut self, root: &AstRoot) -> Result<()> {
        for hint in &root.hints {
            self.apply_hint(hint);
        }
        visit::walk_root(self, root)
    }

    fn visit_function(&mut self, decl: &FunctionDeclaration) -> Result<()> {
        // The name goes into the enclosing scope so the body can recurse.
        self.symbols.add_symbol(&decl.name.value);
        self.symbols.push_scope();
        self.add_parameters(&decl.parameters);
        visit::walk_function(self, decl)?;
        self.symbols.pop_scope()
    }

    fn visit_code_block(&mut self, block: &CodeBlock) -> Result<()> {
        self.symbols.push_scope();
        visit::walk_code_block(self, block)?;
        self.symbols.pop_scope()
    }

    fn visit_binary(&mut self, expr: &BinaryExpression) -> Result<()> {
        visit::walk_binary(self, expr)?;
        if expr.operation == BinaryOperation::Assign {
            if let Some(target) = expr.left.as_name() {
                if self.symbols.find_symbol(&target.value).is_none() {
                    self.symbols.add_symbol(&target.value);
                }
            }
        }
        Ok(())
    }

    fn visit_lambda(&mut self, lambda: &LambdaExpression) -> Result<()> {
        self.symbols.push_scope();
        self.add_parameters(&lambda.parameters);
        visit::walk_lambda(self, lambda)?;
        self.symbols.pop_scope()
    }
}
