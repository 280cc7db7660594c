// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Code generation from AST to bytecode.
//!
//! This module contains the `Compiler`, which runs semantic analysis and
//! then walks the AST once more, emitting instructions into a stack of
//! [`CompilerContext`] frames: one for the module initializer and one per
//! function body being compiled.

pub mod expressions;


use super::analyzer::Analyzer;
use super::bytecode::{MethodFlags, OpCode};
use super::emitter::{Emitter, Label, LabelGenerator};
use super::module::{Constant, Module};
use super::scope::SymbolTable;
use crate::ast::*;
use crate::error::{Diagnostic, Error, Result};
use crate::session::{Compilation, CompileOptions, NamePolicy};

/// Name of the bytecode produced for lambdas.
pub const LAMBDA_NAME: &str = "<lambda>";

/// The state of one compilation unit being emitted.
#[derive(Debug, Default)]
pub struct CompilerContext {
    /// Where instructions go
    pub emitter: Emitter,
    /// Unresolved names load as attributes of the enclosing instance
    pub within_class: bool,
}

impl CompilerContext {
    /// Creates a context with a fresh emitter.
    pub fn new(within_class: bool) -> Self {
        Self {
            emitter: Emitter::new(),
            within_class,
        }
    }
}

/// Compiles an AST into a [`Module`].
pub struct Compiler<'s> {
    labels: &'s mut LabelGenerator,
    options: &'s CompileOptions,
    symbols: SymbolTable,
    module: Module,
    contexts: Vec<CompilerContext>,
    diagnostics: Vec<Diagnostic>,
    undefined: Vec<Diagnostic>,
}

impl<'s> Compiler<'s> {
    /// Creates a compiler drawing label ids from `labels`.
    pub fn new(labels: &'s mut LabelGenerator, options: &'s CompileOptions) -> Self {
        Self {
            labels,
            options,
            symbols: SymbolTable::new(),
            module: Module::new(),
            contexts: Vec::new(),
            diagnostics: Vec::new(),
            undefined: Vec::new(),
        }
    }

    /// Analyzes and compiles `root`.
    pub fn compile(mut self, root: &AstRoot) -> Result<Compilation> {
        let (mut symbols, diagnostics) = Analyzer::new().analyze(root)?;
        symbols.reset_cursor();
        self.symbols = symbols;
        self.diagnostics = diagnostics;

        self.contexts.push(CompilerContext::new(false));
        for stmt in &root.statements {
            self.compile_statement(stmt)?;
        }
        let mut context = self.pop_context()?;
        if !self.contexts.is_empty() {
            return Err(Error::internal("compiler context stack is unbalanced"));
        }
        context.emitter.resolve()?;
        self.module.initializer = context.emitter;

        if self.options.undefined_names == NamePolicy::Deny && !self.undefined.is_empty() {
            return Err(Error::UndefinedNames(self.undefined));
        }
        self.diagnostics.extend(self.undefined);

        tracing::debug!(
            constants = self.module.constants().len(),
            instructions = self.module.initializer().len(),
            "compilation complete"
        );
        Ok(Compilation {
            module: self.module,
            symbols: self.symbols,
            diagnostics: self.diagnostics,
        })
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn compile_statement(&mut self, stmt: &Statement) -> Result<()> {
        match stmt {
            Statement::FunctionDeclaration(decl) => self.compile_function(decl),
            Statement::CodeBlock(block) => self.compile_code_block(block),
            Statement::Expression(expr) => {
                self.compile_expression(expr)?;
                self.emit(OpCode::Pop)?;
                Ok(())
            }
        }
    }

    fn compile_code_block(&mut self, block: &CodeBlock) -> Result<()> {
        self.symbols.enter_scope()?;
        for stmt in &block.statements {
            self.compile_statement(stmt)?;
        }
        self.symbols.leave_scope()
    }

    fn compile_function(&mut self, decl: &FunctionDeclaration) -> Result<()> {
        self.symbols.declare(&decl.name.value);

        self.symbols.enter_scope()?;
        let code = self.compile_body(&decl.name.value, &decl.parameters, |this| {
            this.compile_code_block(&decl.body)
        })?;
        self.symbols.leave_scope()?;

        self.emit_function(&decl.parameters, code)?;
        self.store_name(&decl.name)
    }

    /// Compiles a function body in a fresh context and returns its
    /// resolved bytecode. The caller has already entered the body scope.
    fn compile_body(
        &mut self,
        name: &str,
        parameters: &[NamedParameter],
        body: impl FnOnce(&mut Self) -> Result<()>,
    ) -> Result<Constant> {
        self.contexts.push(CompilerContext::new(false));

        for parameter in parameters {
            self.symbols.declare(&parameter.name.value);
            if let Some(hint) = &parameter.type_hint {
                self.compile_name(hint)?;
                let constant = self.name_constant(&parameter.name.value);
                self.emit_with(OpCode::CastLocal, constant)?;
            }
        }

        body(self)?;

        let mut context = self.pop_context()?;
        context.emitter.resolve()?;
        Ok(Constant::Code(context.emitter.into_bytecode(name)?))
    }

    /// Emits the instructions that build a function from compiled code,
    /// leaving it on the stack.
    fn emit_function(&mut self, parameters: &[NamedParameter], code: Constant) -> Result<()> {
        let mut flags = MethodFlags::empty();
        if parameters.iter().any(|p| p.type_hint.is_some()) {
            flags.insert(MethodFlags::HAS_TYPE_HINTED_PARAMETERS);
        }

        for parameter in parameters {
            let constant = self.constant(Constant::String(parameter.name.value.clone()));
            self.emit_with(OpCode::LoadConst, constant)?;
        }
        self.emit_with(OpCode::BuildTuple, parameters.len() as u32)?;

        let constant = self.constant(code);
        self.emit_with(OpCode::LoadConst, constant)?;
        self.emit_with(OpCode::BuildFunction, flags.bits())?;
        Ok(())
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn compile_expression(&mut self, expr: &Expression) -> Result<()> {
        match expr {
            Expression::Name(name) => self.compile_name(name),
            Expression::Integer(int) => {
                self.load_constant(Constant::Integer(int.value.clone()))
            }
            Expression::Float(float) => self.load_constant(Constant::Float(float.value)),
            Expression::String(string) => {
                let constant = match string.kind {
                    StringKind::Binary => Constant::Bytes(string.value.as_bytes().to_vec()),
                    StringKind::Plain | StringKind::Template => {
                        Constant::String(string.value.clone())
                    }
                };
                self.load_constant(constant)
            }
            Expression::Boolean(boolean) => {
                self.emit(if boolean.value {
                    OpCode::LoadTrue
                } else {
                    OpCode::LoadFalse
                })?;
                Ok(())
            }
            Expression::Null(_) => {
                self.emit(OpCode::LoadNull)?;
                Ok(())
            }
            Expression::List(list) => {
                self.compile_all(&list.elements)?;
                self.emit_with(OpCode::BuildList, list.elements.len() as u32)?;
                Ok(())
            }
            Expression::Tuple(tuple) => {
                self.compile_all(&tuple.elements)?;
                self.emit_with(OpCode::BuildTuple, tuple.elements.len() as u32)?;
                Ok(())
            }
            Expression::Binary(binary) => self.compile_binary(binary),
            Expression::Unary(unary) => {
                self.compile_expression(&unary.operand)?;
                self.emit(unary_opcode(unary.operation))?;
                Ok(())
            }
            Expression::Ternary(ternary) => self.compile_ternary(ternary),
            Expression::Call(call) => {
                self.compile_expression(&call.target)?;
                self.compile_all(&call.arguments.arguments)?;
                self.emit_with(OpCode::Invoke, call.arguments.len() as u32)?;
                Ok(())
            }
            Expression::Member(member) => {
                self.compile_expression(&member.target)?;
                let constant = self.name_constant(&member.member.value);
                let opcode = if member.or_null {
                    OpCode::LoadMemberOrNull
                } else {
                    OpCode::LoadMember
                };
                self.emit_with(opcode, constant)?;
                Ok(())
            }
            Expression::Lambda(lambda) => self.compile_lambda(lambda),
        }
    }

    fn compile_all(&mut self, exprs: &[Expression]) -> Result<()> {
        for expr in exprs {
            self.compile_expression(expr)?;
        }
        Ok(())
    }

    /// Loads a name: local if any active scope declares it, attribute
    /// inside a class body, global otherwise.
    fn compile_name(&mut self, name: &NameExpression) -> Result<()> {
        let constant = self.name_constant(&name.value);
        let opcode = if self.symbols.find_symbol(&name.value).is_some() {
            OpCode::LoadLocal
        } else if self.context()?.within_class {
            OpCode::LoadAttribute
        } else {
            self.report_undefined(name);
            OpCode::LoadGlobal
        };
        self.emit_with(opcode, constant)?;
        Ok(())
    }

    /// Stores the top of the stack into a name, following the same
    /// resolution order as loads.
    fn store_name(&mut self, name: &NameExpression) -> Result<()> {
        let constant = self.name_constant(&name.value);
        let opcode = if self.symbols.find_symbol(&name.value).is_some() {
            OpCode::StoreLocal
        } else if self.context()?.within_class {
            OpCode::StoreAttribute
        } else {
            OpCode::StoreGlobal
        };
        self.emit_with(opcode, constant)?;
        Ok(())
    }

    fn report_undefined(&mut self, name: &NameExpression) {
        let message = format!("undefined name '{}'", name.value);
        match self.options.undefined_names {
            NamePolicy::Allow => {}
            NamePolicy::Warn => {
                tracing::warn!(name = %name.value, location = %name.location, "undefined name");
                self.undefined.push(Diagnostic::warning(name.location, message));
            }
            NamePolicy::Deny => {
                self.undefined.push(Diagnostic::error(name.location, message));
            }
        }
    }

    fn compile_binary(&mut self, binary: &BinaryExpression) -> Result<()> {
        let opcode = match binary.operation {
            BinaryOperation::Assign => return self.compile_assignment(binary),
            BinaryOperation::LogicalAnd => OpCode::JumpIfFalse,
            BinaryOperation::LogicalOr => OpCode::JumpIfTrue,
            BinaryOperation::NullCoalesce => OpCode::JumpIfNotNull,
            operation => {
                self.compile_expression(&binary.left)?;
                self.compile_expression(&binary.right)?;
                self.emit(binary_opcode(operation)?)?;
                return Ok(());
            }
        };

        // left; dup; jump end; pop; right; end:
        let end = self.labels.next_label();
        self.compile_expression(&binary.left)?;
        self.emit(OpCode::Dup)?;
        self.emit_label(opcode, end)?;
        self.emit(OpCode::Pop)?;
        self.compile_expression(&binary.right)?;
        self.mark(end)
    }

    fn compile_assignment(&mut self, binary: &BinaryExpression) -> Result<()> {
        let target = binary
            .left
            .as_name()
            .ok_or_else(|| Error::internal("assignment target is not a name"))?;
        self.compile_expression(&binary.right)?;
        self.emit(OpCode::Dup)?;
        self.store_name(target)
    }

    fn compile_ternary(&mut self, ternary: &TernaryExpression) -> Result<()> {
        let otherwise = self.labels.next_label();
        let end = self.labels.next_label();

        self.compile_expression(&ternary.condition)?;
        self.emit_label(OpCode::JumpIfFalse, otherwise)?;
        self.compile_expression(&ternary.true_value)?;
        self.emit_label(OpCode::Jump, end)?;
        self.mark(otherwise)?;
        self.compile_expression(&ternary.false_value)?;
        self.mark(end)
    }

    fn compile_lambda(&mut self, lambda: &LambdaExpression) -> Result<()> {
        self.symbols.enter_scope()?;
        let code = self.compile_body(LAMBDA_NAME, &lambda.parameters, |this| {
            match &lambda.body {
                LambdaBody::Block(block) => this.compile_code_block(block),
                LambdaBody::Expression(expr) => {
                    this.compile_expression(expr)?;
                    this.emit(OpCode::Return)?;
                    Ok(())
                }
            }
        })?;
        self.symbols.leave_scope()?;
        self.emit_function(&lambda.parameters, code)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn context(&mut self) -> Result<&mut CompilerContext> {
        self.contexts
            .last_mut()
            .ok_or_else(|| Error::internal("no compiler context"))
    }

    fn pop_context(&mut self) -> Result<CompilerContext> {
        self.contexts
            .pop()
            .ok_or_else(|| Error::internal("compiler context stack is empty"))
    }

    fn emit(&mut self, opcode: OpCode) -> Result<usize> {
        Ok(self.context()?.emitter.emit(opcode))
    }

    fn emit_with(&mut self, opcode: OpCode, operand: u32) -> Result<usize> {
        Ok(self.context()?.emitter.emit_with(opcode, operand))
    }

    fn emit_label(&mut self, opcode: OpCode, label: Label) -> Result<usize> {
        Ok(self.context()?.emitter.emit_label(opcode, label))
    }

    fn mark(&mut self, label: Label) -> Result<()> {
        self.context()?.emitter.set_label_position(label);
        Ok(())
    }

    fn constant(&mut self, constant: Constant) -> u32 {
        self.module.define_constant(constant) as u32
    }

    fn name_constant(&mut self, name: &str) -> u32 {
        self.constant(Constant::Name(name.to_string()))
    }

    fn load_constant(&mut self, constant: Constant) -> Result<()> {
        let index = self.constant(constant);
        self.emit_with(OpCode::LoadConst, index)?;
        Ok(())
    }
}

/// Maps an eagerly evaluated binary operation to its opcode.
fn binary_opcode(operation: BinaryOperation) -> Result<OpCode> {
    Ok(match operation {
        BinaryOperation::Add => OpCode::Add,
        BinaryOperation::Subtract => OpCode::Subtract,
        BinaryOperation::Multiply => OpCode::Multiply,
        BinaryOperation::Divide => OpCode::Divide,
        BinaryOperation::Modulo => OpCode::Modulo,
        BinaryOperation::ShiftLeft => OpCode::ShiftLeft,
        BinaryOperation::ShiftRight => OpCode::ShiftRight,
        BinaryOperation::BitwiseAnd => OpCode::BitwiseAnd,
        BinaryOperation::BitwiseOr => OpCode::BitwiseOr,
        BinaryOperation::BitwiseXor => OpCode::BitwiseXor,
        BinaryOperation::Equals => OpCode::Equals,
        BinaryOperation::NotEquals => OpCode::NotEquals,
        BinaryOperation::GreaterThan => OpCode::GreaterThan,
        BinaryOperation::GreaterThanOrEqual => OpCode::GreaterThanOrEqual,
        BinaryOperation::LessThan => OpCode::LessThan,
        BinaryOperation::LessThanOrEqual => OpCode::LessThanOrEqual,
        BinaryOperation::IsCompatible => OpCode::IsCompatible,
        BinaryOperation::IsNotCompatible => OpCode::IsNotCompatible,
        BinaryOperation::InclusiveRange => OpCode::InclusiveRange,
        BinaryOperation::ExclusiveRange => OpCode::ExclusiveRange,
        BinaryOperation::Assign
        | BinaryOperation::LogicalAnd
        | BinaryOperation::LogicalOr
        | BinaryOperation::NullCoalesce => {
            return Err(Error::internal(format!(
                "'{}' has no single opcode",
                operation
            )));
        }
    })
}

fn unary_opcode(operation: UnaryOperation) -> OpCode {
    match operation {
        UnaryOperation::Negate => OpCode::Negate,
        UnaryOperation::BitwiseNot => OpCode::BitwiseNot,
        UnaryOperation::LogicalNot => OpCode::LogicalNot,
    }
}
