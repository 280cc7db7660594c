// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! AST traversal.
//!
//! A [`Visitor`] overrides the nodes it cares about and calls the matching
//! `walk_*` function to continue into children. Children are visited in
//! evaluation order, which is also the order the code generator emits
//! them in.

use super::*;

/// A fallible AST visitor.
pub trait Visitor {
    /// The error that aborts a traversal.
    type Error;

    /// Visits the root.
    fn visit_root(&mut self, root: &AstRoot) -> Result<(), Self::Error> {
        walk_root(self, root)
    }

    /// Visits a statement.
    fn visit_statement(&mut self, stmt: &Statement) -> Result<(), Self::Error> {
        walk_statement(self, stmt)
    }

    /// Visits a function declaration.
    fn visit_function(&mut self, decl: &FunctionDeclaration) -> Result<(), Self::Error> {
        walk_function(self, decl)
    }

    /// Visits a code block.
    fn visit_code_block(&mut self, block: &CodeBlock) -> Result<(), Self::Error> {
        walk_code_block(self, block)
    }

    /// Visits an expression.
    fn visit_expression(&mut self, expr: &Expression) -> Result<(), Self::Error> {
        walk_expression(self, expr)
    }

    /// Visits a name reference.
    fn visit_name(&mut self, _name: &NameExpression) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Visits a binary expression.
    fn visit_binary(&mut self, expr: &BinaryExpression) -> Result<(), Self::Error> {
        walk_binary(self, expr)
    }

    /// Visits a lambda.
    fn visit_lambda(&mut self, lambda: &LambdaExpression) -> Result<(), Self::Error> {
        walk_lambda(self, lambda)
    }
}

/// Visits every top-level statement.
pub fn walk_root<V: Visitor + ?Sized>(visitor: &mut V, root: &AstRoot) -> Result<(), V::Error> {
    for stmt in &root.statements {
        visitor.visit_statement(stmt)?;
    }
    Ok(())
}

/// Dispatches on the statement kind.
pub fn walk_statement<V: Visitor + ?Sized>(
    visitor: &mut V,
    stmt: &Statement,
) -> Result<(), V::Error> {
    match stmt {
        Statement::FunctionDeclaration(decl) => visitor.visit_function(decl),
        Statement::CodeBlock(block) => visitor.visit_code_block(block),
        Statement::Expression(expr) => visitor.visit_expression(expr),
    }
}

/// Visits the parameter hints, then the body.
pub fn walk_function<V: Visitor + ?Sized>(
    visitor: &mut V,
    decl: &FunctionDeclaration,
) -> Result<(), V::Error> {
    walk_parameters(visitor, &decl.parameters)?;
    visitor.visit_code_block(&decl.body)
}

/// Visits the statements of a block.
pub fn walk_code_block<V: Visitor + ?Sized>(
    visitor: &mut V,
    block: &CodeBlock,
) -> Result<(), V::Error> {
    for stmt in &block.statements {
        visitor.visit_statement(stmt)?;
    }
    Ok(())
}

/// Visits the type hints of a parameter list.
pub fn walk_parameters<V: Visitor + ?Sized>(
    visitor: &mut V,
    parameters: &[NamedParameter],
) -> Result<(), V::Error> {
    for hint in parameters.iter().filter_map(|p| p.type_hint.as_ref()) {
        visitor.visit_name(hint)?;
    }
    Ok(())
}

/// Dispatches on the expression kind and visits children.
pub fn walk_expression<V: Visitor + ?Sized>(
    visitor: &mut V,
    expr: &Expression,
) -> Result<(), V::Error> {
    match expr {
        Expression::Name(name) => visitor.visit_name(name),
        Expression::Integer(_)
        | Expression::Float(_)
        | Expression::String(_)
        | Expression::Boolean(_)
        | Expression::Null(_) => Ok(()),
        Expression::List(list) => walk_all(visitor, &list.elements),
        Expression::Tuple(tuple) => walk_all(visitor, &tuple.elements),
        Expression::Binary(binary) => visitor.visit_binary(binary),
        Expression::Unary(unary) => visitor.visit_expression(&unary.operand),
        Expression::Ternary(ternary) => {
            visitor.visit_expression(&ternary.condition)?;
            visitor.visit_expression(&ternary.true_value)?;
            visitor.visit_expression(&ternary.false_value)
        }
        Expression::Call(call) => {
            visitor.visit_expression(&call.target)?;
            walk_all(visitor, &call.arguments.arguments)
        }
        Expression::Member(member) => visitor.visit_expression(&member.target),
        Expression::Lambda(lambda) => visitor.visit_lambda(lambda),
    }
}

/// Visits the operands of a binary expression. Assignment visits the
/// value before the target.
pub fn walk_binary<V: Visitor + ?Sized>(
    visitor: &mut V,
    expr: &BinaryExpression,
) -> Result<(), V::Error> {
    if expr.operation == BinaryOperation::Assign {
        visitor.visit_expression(&expr.right)?;
        visitor.visit_expression(&expr.left)
    } else {
        visitor.visit_expression(&expr.left)?;
        visitor.visit_expression(&expr.right)
    }
}

/// Visits the parameter hints, then the body.
pub fn walk_lambda<V: Visitor + ?Sized>(
    visitor: &mut V,
    lambda: &LambdaExpression,
) -> Result<(), V::Error> {
    walk_parameters(visitor, &lambda.parameters)?;
    match &lambda.body {
        LambdaBody::Block(block) => visitor.visit_code_block(block),
        LambdaBody::Expression(expr) => visitor.visit_expression(expr),
    }
}

fn walk_all<V: Visitor + ?Sized>(visitor: &mut V, exprs: &[Expression]) -> Result<(), V::Error> {
    for expr in exprs {
        visitor.visit_expression(expr)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use crate::parser;

    use super::*;

    #[derive(Default)]
    struct NameCollector {
        names: Vec<String>,
    }

    impl Visitor for NameCollector {
        type Error = Infallible;

        fn visit_name(&mut self, name: &NameExpression) -> Result<(), Infallible> {
            self.names.push(name.value.clone());
            Ok(())
        }
    }

    fn names(source: &str) -> Vec<String> {
        let root = parser::parse(source).unwrap();
        let mut collector = NameCollector::default();
        collector.visit_root(&root).unwrap();
        collector.names
    }

    #[test]
    fn test_ternary_order() {
        assert_eq!(names("a when c else b"), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_call_order() {
        assert_eq!(names("f(x, y.z)"), vec!["f", "x", "y"]);
    }

    #[test]
    fn test_assignment_visits_value_first() {
        assert_eq!(names("x = y"), vec!["y", "x"]);
    }

    #[test]
    fn test_function_hints_then_body() {
        assert_eq!(names("fn f(a: Int) { a }"), vec!["Int", "a"]);
    }
}
