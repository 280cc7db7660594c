// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Abstract Syntax Tree (AST) definitions for Xenon.
//!
//! Every node owns its children and records the location it was parsed
//! from. Traversal goes through [`visit::Visitor`], whose default methods
//! walk children in evaluation order.

use num_bigint::BigInt;
use xenon_macros::str_enum;

use crate::lexer::SourceLocation;

pub mod printer;
pub mod visit;

/// A complete Xenon source unit.
#[derive(Debug, Clone, PartialEq)]
pub struct AstRoot {
    /// Top-level statements
    pub statements: Vec<Statement>,
    /// `# analysis` hints, in source order
    pub hints: Vec<AnalysisHint>,
    /// Location of the first lexeme
    pub location: SourceLocation,
}

impl AstRoot {
    /// Creates an empty root.
    pub fn new(location: SourceLocation) -> Self {
        Self {
            statements: Vec::new(),
            hints: Vec::new(),
            location,
        }
    }
}

/// A `# analysis <action> <name>` comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisHint {
    /// What to do with the name
    pub action: String,
    /// The name the action applies to
    pub name: String,
    /// Where the comment started
    pub location: SourceLocation,
}

/// A Xenon statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `fn name(params) { ... }`
    FunctionDeclaration(FunctionDeclaration),
    /// `{ ... }`
    CodeBlock(CodeBlock),
    /// Expression statement
    Expression(Expression),
}

impl Statement {
    /// Returns the location of the statement.
    pub fn location(&self) -> SourceLocation {
        match self {
            Statement::FunctionDeclaration(decl) => decl.location,
            Statement::CodeBlock(block) => block.location,
            Statement::Expression(expr) => expr.location(),
        }
    }
}

/// A braced statement list with its own scope.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    /// The statements in the block
    pub statements: Vec<Statement>,
    /// Location of the opening brace
    pub location: SourceLocation,
}

/// A function declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    /// The function name
    pub name: NameExpression,
    /// The parameters
    pub parameters: Vec<NamedParameter>,
    /// The function body
    pub body: CodeBlock,
    /// Location of `fn`
    pub location: SourceLocation,
}

impl FunctionDeclaration {
    /// Returns true if any parameter carries a type hint.
    pub fn has_type_hints(&self) -> bool {
        self.parameters.iter().any(|p| p.type_hint.is_some())
    }
}

/// A parameter with an optional type hint.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedParameter {
    /// The parameter name
    pub name: NameExpression,
    /// The hinted type, as a name
    pub type_hint: Option<NameExpression>,
}

/// A Xenon expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Identifier reference
    Name(NameExpression),
    /// Integer literal
    Integer(IntegerExpression),
    /// Float literal
    Float(FloatExpression),
    /// String literal of any flavour
    String(StringExpression),
    /// `true` or `false`
    Boolean(BooleanExpression),
    /// `null`
    Null(NullExpression),
    /// `[a, b]`
    List(ListExpression),
    /// `(a, b)`
    Tuple(TupleExpression),
    /// Binary operation, including assignment
    Binary(BinaryExpression),
    /// Prefix operation
    Unary(UnaryExpression),
    /// `a when cond else b`
    Ternary(TernaryExpression),
    /// `target(args)`
    Call(CallExpression),
    /// `target.name` or `target.?name`
    Member(MemberExpression),
    /// `(params) => body`
    Lambda(LambdaExpression),
}

impl Expression {
    /// Returns the location of the expression.
    pub fn location(&self) -> SourceLocation {
        match self {
            Expression::Name(e) => e.location,
            Expression::Integer(e) => e.location,
            Expression::Float(e) => e.location,
            Expression::String(e) => e.location,
            Expression::Boolean(e) => e.location,
            Expression::Null(e) => e.location,
            Expression::List(e) => e.location,
            Expression::Tuple(e) => e.location,
            Expression::Binary(e) => e.location,
            Expression::Unary(e) => e.location,
            Expression::Ternary(e) => e.location,
            Expression::Call(e) => e.location,
            Expression::Member(e) => e.location,
            Expression::Lambda(e) => e.location,
        }
    }

    /// Returns the name if this is a bare identifier.
    pub fn as_name(&self) -> Option<&NameExpression> {
        match self {
            Expression::Name(name) => Some(name),
            _ => None,
        }
    }
}

/// An identifier reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameExpression {
    /// The identifier text
    pub value: String,
    /// Where it appeared
    pub location: SourceLocation,
}

impl NameExpression {
    /// Creates a name node.
    pub fn new(value: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            value: value.into(),
            location,
        }
    }
}

/// An arbitrary-precision integer literal.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerExpression {
    /// The value
    pub value: BigInt,
    /// Where it appeared
    pub location: SourceLocation,
}

/// A float literal.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatExpression {
    /// The value
    pub value: f64,
    /// Where it appeared
    pub location: SourceLocation,
}

/// The flavour of a string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringKind {
    /// `'...'` or `"..."`
    Plain,
    /// `b'...'`
    Binary,
    /// `` `...` ``
    Template,
}

/// A string literal with escapes already decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct StringExpression {
    /// The decoded contents
    pub value: String,
    /// Which delimiter introduced it
    pub kind: StringKind,
    /// Where it appeared
    pub location: SourceLocation,
}

/// `true` or `false`.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanExpression {
    /// The value
    pub value: bool,
    /// Where it appeared
    pub location: SourceLocation,
}

/// `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct NullExpression {
    /// Where it appeared
    pub location: SourceLocation,
}

/// A list literal.
#[derive(Debug, Clone, PartialEq)]
pub struct ListExpression {
    /// The elements
    pub elements: Vec<Expression>,
    /// Location of `[`
    pub location: SourceLocation,
}

/// A tuple literal.
#[derive(Debug, Clone, PartialEq)]
pub struct TupleExpression {
    /// The elements
    pub elements: Vec<Expression>,
    /// Location of `(`
    pub location: SourceLocation,
}

/// The arguments of a call.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentList {
    /// The argument expressions
    pub arguments: Vec<Expression>,
    /// Location of `(`
    pub location: SourceLocation,
}

impl ArgumentList {
    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    /// Returns true for `()`.
    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }
}

/// A binary expression.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    /// The operation
    pub operation: BinaryOperation,
    /// The left operand
    pub left: Box<Expression>,
    /// The right operand
    pub right: Box<Expression>,
    /// Location of the operator
    pub location: SourceLocation,
}

str_enum! {
    /// Binary operations, spelled as they appear in source.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum BinaryOperation {
        /// Assignment, including desugared compound forms
        Assign => "=",
        // arithmetic
        /// Addition
        Add => "+",
        /// Subtraction
        Subtract => "-",
        /// Multiplication
        Multiply => "*",
        /// Division
        Divide => "/",
        /// Remainder
        Modulo => "%",
        // bitwise
        /// Left shift
        ShiftLeft => "<<",
        /// Right shift
        ShiftRight => ">>",
        /// Bitwise and
        BitwiseAnd => "&",
        /// Bitwise or
        BitwiseOr => "|",
        /// Bitwise xor
        BitwiseXor => "^",
        // logical
        /// Short-circuit and
        LogicalAnd => "and",
        /// Short-circuit or
        LogicalOr => "or",
        /// Right operand if the left is null
        NullCoalesce => "??",
        // comparison
        /// Equality
        Equals => "==",
        /// Inequality
        NotEquals => "!=",
        /// Greater than
        GreaterThan => ">",
        /// Greater than or equal
        GreaterThanOrEqual => ">=",
        /// Less than
        LessThan => "<",
        /// Less than or equal
        LessThanOrEqual => "<=",
        /// Type compatibility
        IsCompatible => "is",
        /// Type incompatibility
        IsNotCompatible => "isnot",
        // ranges
        /// Range including the upper bound
        InclusiveRange => "...",
        /// Range excluding the upper bound
        ExclusiveRange => "..",
    }
}

impl BinaryOperation {
    /// Returns true for operations that short-circuit their right operand.
    pub fn is_short_circuit(&self) -> bool {
        matches!(
            self,
            BinaryOperation::LogicalAnd | BinaryOperation::LogicalOr | BinaryOperation::NullCoalesce
        )
    }
}

/// A prefix expression.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    /// The operation
    pub operation: UnaryOperation,
    /// The operand
    pub operand: Box<Expression>,
    /// Location of the operator
    pub location: SourceLocation,
}

str_enum! {
    /// Prefix operations.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum UnaryOperation {
        /// Arithmetic negation
        Negate => "-",
        /// Bitwise complement
        BitwiseNot => "~",
        /// Logical negation
        LogicalNot => "!",
    }
}

/// `true_value when condition else false_value`.
#[derive(Debug, Clone, PartialEq)]
pub struct TernaryExpression {
    /// The condition
    pub condition: Box<Expression>,
    /// Value when the condition holds
    pub true_value: Box<Expression>,
    /// Value otherwise
    pub false_value: Box<Expression>,
    /// Location of `when`
    pub location: SourceLocation,
}

/// A call expression.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    /// The callee
    pub target: Box<Expression>,
    /// The arguments
    pub arguments: ArgumentList,
    /// Location of the callee
    pub location: SourceLocation,
}

/// A member access expression.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpression {
    /// The object
    pub target: Box<Expression>,
    /// The member name
    pub member: NameExpression,
    /// `.?` access, yielding null for a missing member
    pub or_null: bool,
    /// Location of the access operator
    pub location: SourceLocation,
}

/// An anonymous function.
#[derive(Debug, Clone, PartialEq)]
pub struct LambdaExpression {
    /// The parameters
    pub parameters: Vec<NamedParameter>,
    /// The body
    pub body: LambdaBody,
    /// Location of `(`
    pub location: SourceLocation,
}

/// Lambda body.
#[derive(Debug, Clone, PartialEq)]
pub enum LambdaBody {
    /// `=> { ... }`
    Block(CodeBlock),
    /// `=> expr`
    Expression(Box<Expression>),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(column: u32) -> SourceLocation {
        SourceLocation::new(1, column)
    }

    #[test]
    fn test_binary_operation_spelling() {
        assert_eq!(BinaryOperation::lookup("isnot"), Some(BinaryOperation::IsNotCompatible));
        assert_eq!(BinaryOperation::lookup("..."), Some(BinaryOperation::InclusiveRange));
        assert_eq!(BinaryOperation::lookup("&&"), None);
        assert_eq!(BinaryOperation::ShiftLeft.to_string(), "<<");
    }

    #[test]
    fn test_short_circuit_operations() {
        assert!(BinaryOperation::NullCoalesce.is_short_circuit());
        assert!(!BinaryOperation::BitwiseAnd.is_short_circuit());
    }

    #[test]
    fn test_expression_location() {
        let expr = Expression::Binary(BinaryExpression {
            operation: BinaryOperation::Add,
            left: Box::new(Expression::Name(NameExpression::new("a", loc(0)))),
            right: Box::new(Expression::Null(NullExpression { location: loc(4) })),
            location: loc(2),
        });
        assert_eq!(expr.location(), loc(2));
        assert!(expr.as_name().is_none());
    }

    #[test]
    fn test_function_type_hints() {
        let param = |name: &str, hint: Option<&str>| NamedParameter {
            name: NameExpression::new(name, loc(0)),
            type_hint: hint.map(|h| NameExpression::new(h, loc(0))),
        };
        let mut decl = FunctionDeclaration {
            name: NameExpression::new("f", loc(3)),
            parameters: vec![param("a", None)],
            body: CodeBlock {
                statements: Vec::new(),
                location: loc(7),
            },
            location: loc(0),
        };
        assert!(!decl.has_type_hints());
        decl.parameters.push(param("b", Some("Int")));
        assert!(decl.has_type_hints());
    }
}
