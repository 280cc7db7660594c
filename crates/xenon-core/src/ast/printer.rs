// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Indented tree rendering of an AST.
//!
//! ```text
//! Root
//!   Function f(a, b: Int)
//!     Block
//!       Binary =
//!         Name x
//!         Name a
//! ```

use std::fmt::Write;

use super::*;

const INDENT: &str = "  ";

/// Renders `root` as an indented tree, one node per line.
pub fn print(root: &AstRoot) -> String {
    let mut printer = Printer::default();
    printer.root(root);
    printer.out
}

/// Renders a single expression.
pub fn print_expression(expr: &Expression) -> String {
    let mut printer = Printer::default();
    printer.expression(expr);
    printer.out
}

#[derive(Default)]
struct Printer {
    out: String,
    depth: usize,
}

impl Printer {
    fn line(&mut self, args: std::fmt::Arguments<'_>) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        let _ = self.out.write_fmt(args);
        self.out.push('\n');
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self)) {
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }

    fn root(&mut self, root: &AstRoot) {
        self.line(format_args!("Root"));
        self.nested(|p| {
            for hint in &root.hints {
                p.line(format_args!("Hint {} {}", hint.action, hint.name));
            }
            for stmt in &root.statements {
                p.statement(stmt);
            }
        });
    }

    fn statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::FunctionDeclaration(decl) => {
                self.line(format_args!(
                    "Function {}({})",
                    decl.name.value,
                    parameters(&decl.parameters)
                ));
                self.nested(|p| p.block(&decl.body));
            }
            Statement::CodeBlock(block) => self.block(block),
            Statement::Expression(expr) => self.expression(expr),
        }
    }

    fn block(&mut self, block: &CodeBlock) {
        self.line(format_args!("Block"));
        self.nested(|p| {
            for stmt in &block.statements {
                p.statement(stmt);
            }
        });
    }

    fn expressions(&mut self, exprs: &[Expression]) {
        for expr in exprs {
            self.expression(expr);
        }
    }

    fn expression(&mut self, expr: &Expression) {
        match expr {
            Expression::Name(name) => self.line(format_args!("Name {}", name.value)),
            Expression::Integer(int) => self.line(format_args!("Integer {}", int.value)),
            Expression::Float(float) => self.line(format_args!("Float {:?}", float.value)),
            Expression::String(string) => {
                let label = match string.kind {
                    StringKind::Plain => "String",
                    StringKind::Binary => "BinaryString",
                    StringKind::Template => "TemplateString",
                };
                self.line(format_args!("{} {:?}", label, string.value));
            }
            Expression::Boolean(boolean) => self.line(format_args!("Boolean {}", boolean.value)),
            Expression::Null(_) => self.line(format_args!("Null")),
            Expression::List(list) => {
                self.line(format_args!("List"));
                self.nested(|p| p.expressions(&list.elements));
            }
            Expression::Tuple(tuple) => {
                self.line(format_args!("Tuple"));
                self.nested(|p| p.expressions(&tuple.elements));
            }
            Expression::Binary(binary) => {
                self.line(format_args!("Binary {}", binary.operation));
                self.nested(|p| {
                    p.expression(&binary.left);
                    p.expression(&binary.right);
                });
            }
            Expression::Unary(unary) => {
                self.line(format_args!("Unary {}", unary.operation));
                self.nested(|p| p.expression(&unary.operand));
            }
            Expression::Ternary(ternary) => {
                self.line(format_args!("Ternary"));
                self.nested(|p| {
                    p.expression(&ternary.condition);
                    p.expression(&ternary.true_value);
                    p.expression(&ternary.false_value);
                });
            }
            Expression::Call(call) => {
                self.line(format_args!("Call ({} args)", call.arguments.len()));
                self.nested(|p| {
                    p.expression(&call.target);
                    p.expressions(&call.arguments.arguments);
                });
            }
            Expression::Member(member) => {
                let access = if member.or_null { ".?" } else { "." };
                self.line(format_args!("Member {}{}", access, member.member.value));
                self.nested(|p| p.expression(&member.target));
            }
            Expression::Lambda(lambda) => {
                self.line(format_args!("Lambda({})", parameters(&lambda.parameters)));
                self.nested(|p| match &lambda.body {
                    LambdaBody::Block(block) => p.block(block),
                    LambdaBody::Expression(expr) => p.expression(expr),
                });
            }
        }
    }
}

fn parameters(parameters: &[NamedParameter]) -> String {
    parameters
        .iter()
        .map(|param| match &param.type_hint {
            Some(hint) => format!("{}: {}", param.name.value, hint.value),
            None => param.name.value.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    fn render(src: &str) -> String {
        print(&parser::parse(src).unwrap())
    }

    #[test]
    fn test_function_tree() {
        assert_eq!(
            render("fn f(a, b: Int) { x = a }"),
            "Root\n  Function f(a, b: Int)\n    Block\n      Binary =\n        Name x\n        Name a\n"
        );
    }

    #[test]
    fn test_hints_come_first() {
        assert_eq!(
            render("# analysis global print\nprint('hi')"),
            "Root\n  Hint global print\n  Call (1 args)\n    Name print\n    String \"hi\"\n"
        );
    }

    #[test]
    fn test_lambda_and_member() {
        assert_eq!(
            render("(x) => x.?y"),
            "Root\n  Lambda(x)\n    Member .?y\n      Name x\n"
        );
    }

    #[test]
    fn test_ternary_children_order() {
        let root = parser::parse("a when c else b").unwrap();
        let Statement::Expression(expr) = &root.statements[0] else {
            panic!("expected an expression statement");
        };
        assert_eq!(
            print_expression(expr),
            "Ternary\n  Name c\n  Name a\n  Name b\n"
        );
    }
}
