// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! The main parser implementation.

use num_bigint::BigInt;

use super::Cursor;
use crate::ast::*;
use crate::error::{Error, LexError, ParseError, ParseErrors};
use crate::lexer::{Keyword, Lexeme, Scanner, SourceLocation, TokenClass};

type PResult<T> = std::result::Result<T, ParseError>;

/// Default bound on the diagnostics collected by one parse.
pub const DEFAULT_MAX_ERRORS: usize = 32;

const COMPOUND_ASSIGNMENTS: &[(&str, BinaryOperation)] = &[
    ("+=", BinaryOperation::Add),
    ("-=", BinaryOperation::Subtract),
    ("*=", BinaryOperation::Multiply),
    ("/=", BinaryOperation::Divide),
    ("%=", BinaryOperation::Modulo),
    ("^=", BinaryOperation::BitwiseXor),
    ("&=", BinaryOperation::BitwiseAnd),
    ("|=", BinaryOperation::BitwiseOr),
    ("<<=", BinaryOperation::ShiftLeft),
    (">>=", BinaryOperation::ShiftRight),
];

/// A recursive descent parser for Xenon.
pub struct Parser {
    cursor: Cursor,
    hints: Vec<AnalysisHint>,
    errors: Vec<ParseError>,
    max_errors: usize,
}

impl Parser {
    /// Creates a parser over scanned lexemes.
    ///
    /// Analysis hints are lifted out of the sequence here and end up on
    /// the root; the grammar never sees them.
    pub fn new(lexemes: Vec<Lexeme>) -> Self {
        let (hints, lexemes): (Vec<_>, Vec<_>) = lexemes
            .into_iter()
            .partition(|l| l.is(TokenClass::SourceAnalysisHint));

        let hints = hints
            .into_iter()
            .filter_map(|l| {
                let (action, name) = l.text.split_once(':')?;
                Some(AnalysisHint {
                    action: action.to_string(),
                    name: name.to_string(),
                    location: l.location,
                })
            })
            .collect();

        Self {
            cursor: Cursor::new(lexemes),
            hints,
            errors: Vec::new(),
            max_errors: DEFAULT_MAX_ERRORS,
        }
    }

    /// Scans `source` and creates a parser over the result.
    pub fn from_source(source: &str) -> Result<Self, LexError> {
        Ok(Self::new(Scanner::new(source).scan()?))
    }

    /// Sets how many diagnostics are collected before parsing stops.
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors.max(1);
        self
    }

    /// Parses the whole sequence, failing if any diagnostic was recorded.
    pub fn parse(self) -> Result<AstRoot, Error> {
        let (root, errors) = self.parse_recovering();
        if errors.is_empty() {
            Ok(root)
        } else {
            Err(Error::Syntax(ParseErrors::new(errors)))
        }
    }

    /// Parses the whole sequence, resynchronizing after each malformed
    /// statement. Returns the statements that parsed along with every
    /// diagnostic.
    pub fn parse_recovering(mut self) -> (AstRoot, Vec<ParseError>) {
        let mut root = AstRoot::new(self.cursor.location());
        root.hints = std::mem::take(&mut self.hints);

        while !self.cursor.is_at_end() {
            if self.cursor.eat(TokenClass::Semicolon) {
                continue;
            }

            match self.parse_statement() {
                Ok(stmt) => {
                    root.statements.push(stmt);
                    self.cursor.eat(TokenClass::Semicolon);
                }
                Err(err) => {
                    tracing::debug!(location = %err.location(), "resynchronizing after parse error");
                    self.synchronize();
                    self.errors.push(err);
                    if self.errors.len() >= self.max_errors {
                        break;
                    }
                }
            }
        }

        tracing::debug!(
            statements = root.statements.len(),
            errors = self.errors.len(),
            "parse complete"
        );
        (root, self.errors)
    }

    /// Parses a single statement.
    pub fn parse_statement(&mut self) -> PResult<Statement> {
        if self.check_keyword(Keyword::Fn) {
            return self.parse_function_declaration();
        }

        if self.cursor.check(TokenClass::OpenBrace) {
            return Ok(Statement::CodeBlock(self.parse_code_block()?));
        }

        Ok(Statement::Expression(self.parse_expression()?))
    }

    fn parse_function_declaration(&mut self) -> PResult<Statement> {
        let location = self.cursor.location();
        self.cursor.advance(); // consume 'fn'

        let name = self.expect_name()?;
        let parameters = self.parse_parameters()?;
        let body = self.parse_code_block()?;

        Ok(Statement::FunctionDeclaration(FunctionDeclaration {
            name,
            parameters,
            body,
            location,
        }))
    }

    fn parse_parameters(&mut self) -> PResult<Vec<NamedParameter>> {
        self.expect(TokenClass::OpenParen, "(")?;
        let mut parameters = Vec::new();

        if !self.cursor.check(TokenClass::CloseParen) {
            loop {
                let name = self.expect_name()?;
                let type_hint = if self.cursor.eat(TokenClass::Colon) {
                    Some(self.expect_name()?)
                } else {
                    None
                };
                parameters.push(NamedParameter { name, type_hint });

                if !self.cursor.eat(TokenClass::Comma) {
                    break;
                }
            }
        }

        self.expect(TokenClass::CloseParen, ")")?;
        Ok(parameters)
    }

    fn parse_code_block(&mut self) -> PResult<CodeBlock> {
        let location = self.cursor.location();
        self.expect(TokenClass::OpenBrace, "{")?;
        let mut statements = Vec::new();

        loop {
            if self.cursor.eat(TokenClass::CloseBrace) {
                break;
            }
            if self.cursor.is_at_end() {
                return Err(self
                    .unexpected()
                    .solution("Close the block with '}'"));
            }
            if self.cursor.eat(TokenClass::Semicolon) {
                continue;
            }
            match self.parse_statement() {
                Ok(stmt) => {
                    statements.push(stmt);
                    self.cursor.eat(TokenClass::Semicolon);
                }
                // The last allowed error unwinds to the top-level loop.
                Err(err) if self.errors.len() + 1 < self.max_errors => {
                    tracing::debug!(location = %err.location(), "resynchronizing inside block");
                    self.synchronize_in_block();
                    self.errors.push(err);
                }
                Err(err) => return Err(err),
            }
        }

        Ok(CodeBlock {
            statements,
            location,
        })
    }

    /// Parses an expression.
    pub fn parse_expression(&mut self) -> PResult<Expression> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> PResult<Expression> {
        let target = self.parse_ternary()?;

        let Some(lexeme) = self.cursor.current().filter(|l| l.is(TokenClass::Operator)) else {
            return Ok(target);
        };
        let location = lexeme.location;
        let compound = match lexeme.text.as_str() {
            "=" => None,
            text => match COMPOUND_ASSIGNMENTS.iter().find(|(op, _)| *op == text) {
                Some((_, operation)) => Some(*operation),
                None => return Ok(target),
            },
        };
        self.cursor.advance();

        if target.as_name().is_none() {
            return Err(ParseError::new(location)
                .describe("Invalid assignment target")
                .solution("Only names can be assigned to"));
        }

        let value = self.parse_assignment()?;
        let value = match compound {
            Some(operation) => Expression::Binary(BinaryExpression {
                operation,
                left: Box::new(target.clone()),
                right: Box::new(value),
                location,
            }),
            None => value,
        };

        Ok(Expression::Binary(BinaryExpression {
            operation: BinaryOperation::Assign,
            left: Box::new(target),
            right: Box::new(value),
            location,
        }))
    }

    /// Parse `value when condition else other`
    fn parse_ternary(&mut self) -> PResult<Expression> {
        let true_value = self.parse_range()?;

        if !self.cursor.check_exact(TokenClass::Identifier, "when") {
            return Ok(true_value);
        }
        let location = self.cursor.location();
        self.cursor.advance(); // consume 'when'

        let condition = self.parse_expression()?;
        if !self.check_keyword(Keyword::Else) {
            return Err(self.unexpected().solution("Add an 'else' branch"));
        }
        self.cursor.advance(); // consume 'else'
        let false_value = self.parse_ternary()?;

        Ok(Expression::Ternary(TernaryExpression {
            condition: Box::new(condition),
            true_value: Box::new(true_value),
            false_value: Box::new(false_value),
            location,
        }))
    }

    fn parse_range(&mut self) -> PResult<Expression> {
        self.parse_left_assoc(
            &[BinaryOperation::ExclusiveRange, BinaryOperation::InclusiveRange],
            Self::parse_logical_or,
        )
    }

    fn parse_logical_or(&mut self) -> PResult<Expression> {
        self.parse_left_assoc(
            &[BinaryOperation::LogicalOr, BinaryOperation::NullCoalesce],
            Self::parse_logical_and,
        )
    }

    fn parse_logical_and(&mut self) -> PResult<Expression> {
        self.parse_left_assoc(&[BinaryOperation::LogicalAnd], Self::parse_bitwise_or)
    }

    fn parse_bitwise_or(&mut self) -> PResult<Expression> {
        self.parse_left_assoc(&[BinaryOperation::BitwiseOr], Self::parse_bitwise_xor)
    }

    fn parse_bitwise_xor(&mut self) -> PResult<Expression> {
        self.parse_left_assoc(&[BinaryOperation::BitwiseXor], Self::parse_bitwise_and)
    }

    fn parse_bitwise_and(&mut self) -> PResult<Expression> {
        self.parse_left_assoc(&[BinaryOperation::BitwiseAnd], Self::parse_equality)
    }

    fn parse_equality(&mut self) -> PResult<Expression> {
        self.parse_left_assoc(
            &[BinaryOperation::Equals, BinaryOperation::NotEquals],
            Self::parse_relational,
        )
    }

    fn parse_relational(&mut self) -> PResult<Expression> {
        self.parse_left_assoc(
            &[
                BinaryOperation::GreaterThan,
                BinaryOperation::LessThan,
                BinaryOperation::GreaterThanOrEqual,
                BinaryOperation::LessThanOrEqual,
                BinaryOperation::IsCompatible,
                BinaryOperation::IsNotCompatible,
            ],
            Self::parse_shift,
        )
    }

    fn parse_shift(&mut self) -> PResult<Expression> {
        self.parse_left_assoc(
            &[BinaryOperation::ShiftLeft, BinaryOperation::ShiftRight],
            Self::parse_additive,
        )
    }

    fn parse_additive(&mut self) -> PResult<Expression> {
        self.parse_left_assoc(
            &[BinaryOperation::Add, BinaryOperation::Subtract],
            Self::parse_multiplicative,
        )
    }

    fn parse_multiplicative(&mut self) -> PResult<Expression> {
        self.parse_left_assoc(
            &[
                BinaryOperation::Multiply,
                BinaryOperation::Divide,
                BinaryOperation::Modulo,
            ],
            Self::parse_unary,
        )
    }

    /// Parses one left-associative precedence tier.
    fn parse_left_assoc(
        &mut self,
        operations: &[BinaryOperation],
        operand: fn(&mut Self) -> PResult<Expression>,
    ) -> PResult<Expression> {
        let mut left = operand(self)?;

        while let Some(operation) = self.match_operation(operations) {
            let location = self.cursor.location();
            self.cursor.advance();
            let right = operand(self)?;
            left = Expression::Binary(BinaryExpression {
                operation,
                left: Box::new(left),
                right: Box::new(right),
                location,
            });
        }

        Ok(left)
    }

    fn match_operation(&self, operations: &[BinaryOperation]) -> Option<BinaryOperation> {
        let lexeme = self.cursor.current().filter(|l| l.is(TokenClass::Operator))?;
        BinaryOperation::lookup(&lexeme.text).filter(|op| operations.contains(op))
    }

    fn parse_unary(&mut self) -> PResult<Expression> {
        let operation = self
            .cursor
            .current()
            .filter(|l| l.is(TokenClass::Operator))
            .and_then(|l| UnaryOperation::lookup(&l.text));

        if let Some(operation) = operation {
            let location = self.cursor.location();
            self.cursor.advance();
            let operand = self.parse_unary()?;
            return Ok(Expression::Unary(UnaryExpression {
                operation,
                operand: Box::new(operand),
                location,
            }));
        }

        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> PResult<Expression> {
        let mut expr = self.parse_primary()?;

        loop {
            if self.cursor.check(TokenClass::OpenParen) {
                let location = expr.location();
                let arguments = self.parse_arguments()?;
                expr = Expression::Call(CallExpression {
                    target: Box::new(expr),
                    arguments,
                    location,
                });
            } else if self.cursor.check(TokenClass::MemberAccess)
                || self.cursor.check(TokenClass::MemberDefaultAccess)
            {
                let location = self.cursor.location();
                let or_null = self.cursor.check(TokenClass::MemberDefaultAccess);
                self.cursor.advance();
                let member = self.expect_name()?;
                expr = Expression::Member(MemberExpression {
                    target: Box::new(expr),
                    member,
                    or_null,
                    location,
                });
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn parse_arguments(&mut self) -> PResult<ArgumentList> {
        let location = self.cursor.location();
        self.expect(TokenClass::OpenParen, "(")?;
        let arguments = self.parse_sequence(TokenClass::CloseParen, ")")?;
        Ok(ArgumentList {
            arguments,
            location,
        })
    }

    /// Parses comma-separated expressions up to and including `close`.
    /// A trailing comma is allowed.
    fn parse_sequence(&mut self, close: TokenClass, text: &str) -> PResult<Vec<Expression>> {
        let mut elements = Vec::new();

        while !self.cursor.check(close) {
            elements.push(self.parse_expression()?);
            if !self.cursor.eat(TokenClass::Comma) {
                break;
            }
        }

        self.expect(close, text)?;
        Ok(elements)
    }

    fn parse_primary(&mut self) -> PResult<Expression> {
        let Some(lexeme) = self.cursor.current() else {
            return Err(self.unexpected());
        };
        let location = lexeme.location;

        match lexeme.class {
            TokenClass::Identifier => {
                let name = NameExpression::new(lexeme.text.clone(), location);
                self.cursor.advance();
                Ok(Expression::Name(name))
            }
            TokenClass::IntLiteral => {
                let value = lexeme.literal.parse::<BigInt>().map_err(|_| {
                    ParseError::new(location).describe(format!(
                        "Invalid integer literal '{}'",
                        lexeme.text
                    ))
                })?;
                self.cursor.advance();
                Ok(Expression::Integer(IntegerExpression { value, location }))
            }
            TokenClass::FloatLiteral => {
                let value = lexeme.literal.parse::<f64>().map_err(|_| {
                    ParseError::new(location)
                        .describe(format!("Invalid float literal '{}'", lexeme.text))
                })?;
                self.cursor.advance();
                Ok(Expression::Float(FloatExpression { value, location }))
            }
            TokenClass::StringLiteral
            | TokenClass::BinaryStringLiteral
            | TokenClass::TemplateStringLiteral => {
                let kind = match lexeme.class {
                    TokenClass::BinaryStringLiteral => StringKind::Binary,
                    TokenClass::TemplateStringLiteral => StringKind::Template,
                    _ => StringKind::Plain,
                };
                let value = lexeme.literal.clone();
                self.cursor.advance();
                Ok(Expression::String(StringExpression {
                    value,
                    kind,
                    location,
                }))
            }
            TokenClass::Keyword => {
                let expr = match lexeme.keyword() {
                    Some(Keyword::True) => Expression::Boolean(BooleanExpression {
                        value: true,
                        location,
                    }),
                    Some(Keyword::False) => Expression::Boolean(BooleanExpression {
                        value: false,
                        location,
                    }),
                    Some(Keyword::Null) => Expression::Null(NullExpression { location }),
                    _ => return Err(self.unexpected()),
                };
                self.cursor.advance();
                Ok(expr)
            }
            TokenClass::OpenBracket => {
                self.cursor.advance();
                let elements = self.parse_sequence(TokenClass::CloseBracket, "]")?;
                Ok(Expression::List(ListExpression { elements, location }))
            }
            TokenClass::OpenParen => self.parse_parenthesized(),
            _ => Err(self.unexpected()),
        }
    }

    /// Parses a grouping, a tuple, or a lambda.
    ///
    /// `(x)` is a grouping, `()`, `(x,)` and `(x, y)` are tuples, and any
    /// of them followed by `=>` is a lambda parameter list.
    fn parse_parenthesized(&mut self) -> PResult<Expression> {
        let location = self.cursor.location();
        self.cursor.advance(); // consume '('

        let mut elements = Vec::new();
        let mut is_tuple = true;

        if !self.cursor.check(TokenClass::CloseParen) {
            elements.push(self.parse_expression()?);
            if self.cursor.eat(TokenClass::Comma) {
                while !self.cursor.check(TokenClass::CloseParen) {
                    elements.push(self.parse_expression()?);
                    if !self.cursor.eat(TokenClass::Comma) {
                        break;
                    }
                }
            } else {
                is_tuple = false;
            }
        }

        self.expect(TokenClass::CloseParen, ")")?;

        if self.cursor.check_exact(TokenClass::Operator, "=>") {
            self.cursor.advance();
            return self.parse_lambda(elements, location);
        }

        match elements.pop() {
            Some(expr) if !is_tuple => Ok(expr),
            last => {
                elements.extend(last);
                Ok(Expression::Tuple(TupleExpression { elements, location }))
            }
        }
    }

    fn parse_lambda(
        &mut self,
        elements: Vec<Expression>,
        location: SourceLocation,
    ) -> PResult<Expression> {
        let parameters = elements
            .into_iter()
            .map(|element| match element {
                Expression::Name(name) => Ok(NamedParameter {
                    name,
                    type_hint: None,
                }),
                other => Err(ParseError::new(other.location())
                    .describe("Lambda parameters must be names")),
            })
            .collect::<PResult<Vec<_>>>()?;

        let body = if self.cursor.check(TokenClass::OpenBrace) {
            LambdaBody::Block(self.parse_code_block()?)
        } else {
            LambdaBody::Expression(Box::new(self.parse_expression()?))
        };

        Ok(Expression::Lambda(LambdaExpression {
            parameters,
            body,
            location,
        }))
    }

    // Helper methods

    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.cursor
            .current()
            .is_some_and(|l| l.keyword() == Some(keyword))
    }

    fn expect(&mut self, class: TokenClass, text: &str) -> PResult<()> {
        if self.cursor.eat(class) {
            Ok(())
        } else {
            Err(self.unexpected().solution(format!("Expected '{}'", text)))
        }
    }

    fn expect_name(&mut self) -> PResult<NameExpression> {
        match self.cursor.current() {
            Some(lexeme) if lexeme.is(TokenClass::Identifier) => {
                let name = NameExpression::new(lexeme.text.clone(), lexeme.location);
                self.cursor.advance();
                Ok(name)
            }
            _ => Err(self.unexpected().solution("Expected a name")),
        }
    }

    /// Builds the standard error for the lexeme under the cursor.
    fn unexpected(&self) -> ParseError {
        match self.cursor.current() {
            Some(lexeme) => ParseError::new(lexeme.location).describe(format!(
                "Unexpected token: '{}' ({})",
                lexeme.text, lexeme.class
            )),
            None => ParseError::new(self.cursor.location()).describe("Unexpected end of file."),
        }
    }

    /// Skips to the end of a broken statement inside a block: past the
    /// next `;` at the same nesting, or up to (not past) the block's `}`.
    fn synchronize_in_block(&mut self) {
        let mut depth = 0usize;
        while let Some(lexeme) = self.cursor.current() {
            match lexeme.class {
                TokenClass::OpenBrace => depth += 1,
                TokenClass::CloseBrace if depth == 0 => return,
                TokenClass::CloseBrace => depth -= 1,
                TokenClass::Semicolon if depth == 0 => {
                    self.cursor.advance();
                    return;
                }
                _ => {}
            }
            self.cursor.advance();
        }
    }

    /// Skips lexemes up to and including the next `;`, `]` or `}`.
    fn synchronize(&mut self) {
        while let Some(lexeme) = self.cursor.advance() {
            if matches!(
                lexeme.class,
                TokenClass::Semicolon | TokenClass::CloseBracket | TokenClass::CloseBrace
            ) {
                return;
            }
        }
    }
}
