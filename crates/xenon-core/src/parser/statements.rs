// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Statement parsing documentation.
//!
//! This module documents the statement parsing logic found in `parser.rs`.
//!
//! ## Statement Types
//!
//! | Statement | Method |
//! |-----------|--------|
//! | Function | `parse_function_declaration` |
//! | Block | `parse_code_block` |
//! | Expression | `parse_expression` |
//!
//! ## Grammar Overview
//!
//! ```text
//! Statement :
//!     'fn' Identifier '(' Parameters ')' CodeBlock
//!     CodeBlock
//!     Expression
//!
//! Parameters :
//!     [ Identifier [ ':' Identifier ] { ',' Identifier [ ':' Identifier ] } ]
//!
//! CodeBlock :
//!     '{' { Statement [ ';' ] } '}'
//! ```
//!
//! A `;` after a statement is optional.
//!
//! ## Error Recovery
//!
//! When a top-level statement fails to parse, the parser records the
//! diagnostic, skips lexemes up to and including the next `;`, `]` or
//! `}`, and resumes. Inside a `{ }` block a broken statement is skipped
//! up to the next `;` at the same depth or up to the block's own `}`, so
//! the rest of the block stays in the block. Parsing stops early once the
//! configured number of diagnostics has been collected.

// This module serves as documentation. The actual implementation is in parser.rs.

#[cfg(test)]
mod tests {
    use crate::ast::{BinaryOperation, Expression, Statement};
    use crate::parser::Parser;

    fn parse_ok(src: &str) -> Vec<Statement> {
        Parser::from_source(src).unwrap().parse().unwrap().statements
    }

    #[test]
    fn test_nested_functions() {
        let stmts = parse_ok("fn outer() { fn inner(x) { x } inner(1) }");
        match &stmts[0] {
            Statement::FunctionDeclaration(outer) => {
                assert!(matches!(
                    outer.body.statements[0],
                    Statement::FunctionDeclaration(_)
                ));
                assert!(matches!(
                    outer.body.statements[1],
                    Statement::Expression(Expression::Call(_))
                ));
            }
            other => panic!("expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_function() {
        match &parse_ok("fn nop() {}")[0] {
            Statement::FunctionDeclaration(decl) => {
                assert!(decl.parameters.is_empty());
                assert!(decl.body.statements.is_empty());
            }
            other => panic!("expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_function_requires_name() {
        let (_, errors) = Parser::from_source("fn (a) {}").unwrap().parse_recovering();
        assert_eq!(errors[0].solutions().collect::<Vec<_>>(), vec!["Expected a name"]);
    }

    #[test]
    fn test_parameter_hint_requires_name() {
        let (_, errors) = Parser::from_source("fn f(a: 1) {}").unwrap().parse_recovering();
        assert!(errors[0]
            .descriptions()
            .any(|d| d == "Unexpected token: '1' (IntLiteral)"));
    }

    #[test]
    fn test_statements_without_separators() {
        assert_eq!(parse_ok("a b\nc").len(), 3);
    }

    #[test]
    fn test_statement_after_broken_function() {
        let (root, errors) = Parser::from_source("fn f( { } g()").unwrap().parse_recovering();
        assert_eq!(errors.len(), 1);
        assert_eq!(root.statements.len(), 1);
    }

    #[test]
    fn test_recovery_stays_inside_block() {
        let (root, errors) = Parser::from_source("fn f() { a = ; b = 1 }\nc = 2")
            .unwrap()
            .parse_recovering();
        assert_eq!(errors.len(), 1);
        assert_eq!(root.statements.len(), 2);
        match &root.statements[0] {
            Statement::FunctionDeclaration(decl) => {
                assert_eq!(decl.body.statements.len(), 1);
                match &decl.body.statements[0] {
                    Statement::Expression(Expression::Binary(assign)) => {
                        assert_eq!(assign.operation, BinaryOperation::Assign);
                    }
                    other => panic!("expected assignment, got {:?}", other),
                }
            }
            other => panic!("expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_broken_statement_before_closing_brace() {
        let (root, errors) = Parser::from_source("{ x = } y").unwrap().parse_recovering();
        assert_eq!(errors.len(), 1);
        assert_eq!(root.statements.len(), 2);
    }

    #[test]
    fn test_errors_in_nested_blocks_are_all_reported() {
        let (root, errors) = Parser::from_source("{ a = ; { b = ; c } d = ) }")
            .unwrap()
            .parse_recovering();
        assert_eq!(errors.len(), 3);
        assert_eq!(root.statements.len(), 1);
    }

    #[test]
    fn test_block_errors_respect_max_errors() {
        let (_, errors) = Parser::from_source("{ a = ; b = ; c = ; d = ; }")
            .unwrap()
            .with_max_errors(2)
            .parse_recovering();
        assert_eq!(errors.len(), 2);
    }
}
