// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! The scanner that produces lexemes from source text.

use num_bigint::BigUint;
use num_traits::Num;

use super::{Lexeme, SourceLocation, TokenClass, OPERATOR_WORDS};
use crate::error::{LexError, LexErrorKind};
use crate::lexer::token::Keyword;

/// Characters that start an operator.
pub const OPERATOR_CHARS: &str = "+-*/=<>~!&^|%@?.";

const THREE_CHAR_OPERATORS: &[&str] = &["<<=", ">>=", "..."];

const TWO_CHAR_OPERATORS: &[&str] = &[
    ">>", "<<", "&&", "||", "==", "!=", "=>", "<=", ">=", "+=", "-=", "*=", "/=", "%=", "&=",
    "^=", "|=", "??", "..", ".?", "/*",
];

/// A scanner that tokenizes Xenon source code.
pub struct Scanner<'a> {
    source: &'a str,
    offset: usize,
    line: u32,
    column: u32,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 0,
        }
    }

    /// Scans the whole source.
    pub fn scan(mut self) -> Result<Vec<Lexeme>, LexError> {
        let mut lexemes = Vec::new();
        while let Some(lexeme) = self.next_lexeme()? {
            tracing::trace!(class = %lexeme.class, text = %lexeme.text, "lexeme");
            lexemes.push(lexeme);
        }
        tracing::debug!(count = lexemes.len(), "scan complete");
        Ok(lexemes)
    }

    /// Returns the next lexeme, or `None` at the end of input.
    pub fn next_lexeme(&mut self) -> Result<Option<Lexeme>, LexError> {
        loop {
            self.skip_whitespace();

            let start = self.offset;
            let location = self.location();

            let Some(ch) = self.peek() else {
                return Ok(None);
            };

            let lexeme = match ch {
                '0' if self.peek_next() == Some('x') => self.scan_hex_number(start, location)?,
                '0'..='9' => self.scan_number(start, location)?,

                _ if OPERATOR_CHARS.contains(ch) => match self.scan_operator(start, location)? {
                    Some(lexeme) => lexeme,
                    None => continue,
                },

                '{' => self.single(TokenClass::OpenBrace, location),
                '}' => self.single(TokenClass::CloseBrace, location),
                '(' => self.single(TokenClass::OpenParen, location),
                ')' => self.single(TokenClass::CloseParen, location),
                '[' => self.single(TokenClass::OpenBracket, location),
                ']' => self.single(TokenClass::CloseBracket, location),
                ';' => self.single(TokenClass::Semicolon, location),
                ':' => self.single(TokenClass::Colon, location),
                ',' => self.single(TokenClass::Comma, location),

                '#' => match self.scan_comment(location) {
                    Some(lexeme) => lexeme,
                    None => continue,
                },

                '\'' | '"' => self.scan_string(TokenClass::StringLiteral, start, location)?,
                '`' => self.scan_string(TokenClass::TemplateStringLiteral, start, location)?,

                'b' if matches!(self.peek_next(), Some('\'' | '"')) => {
                    self.advance(); // consume 'b'
                    self.scan_string(TokenClass::BinaryStringLiteral, start, location)?
                }

                _ if is_id_start(ch) => self.scan_identifier(start, location),

                other => {
                    return Err(LexError::new(
                        location,
                        LexErrorKind::UnexpectedCharacter(other),
                    ));
                }
            };

            return Ok(Some(lexeme));
        }
    }

    fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }

    fn rest(&self) -> &'a str {
        &self.source[self.offset..]
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn advance_by(&mut self, count: usize) {
        for _ in 0..count {
            self.advance();
        }
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    fn slice(&self, start: usize) -> &'a str {
        &self.source[start..self.offset]
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(ch) if ch.is_whitespace()) {
            self.advance();
        }
    }

    fn single(&mut self, class: TokenClass, location: SourceLocation) -> Lexeme {
        let start = self.offset;
        self.advance();
        Lexeme::new(class, self.slice(start), location)
    }

    fn scan_hex_number(
        &mut self,
        start: usize,
        location: SourceLocation,
    ) -> Result<Lexeme, LexError> {
        self.advance_by(2); // consume '0x'
        let digits_start = self.offset;

        while matches!(self.peek(), Some(ch) if ch.is_ascii_hexdigit()) {
            self.advance();
        }

        let digits = self.slice(digits_start);
        let value = BigUint::from_str_radix(digits, 16)
            .map_err(|_| LexError::new(location, LexErrorKind::EmptyHexLiteral))?;

        Ok(Lexeme::with_literal(
            TokenClass::IntLiteral,
            self.slice(start),
            value.to_str_radix(10),
            location,
        ))
    }

    fn scan_number(&mut self, start: usize, location: SourceLocation) -> Result<Lexeme, LexError> {
        let mut is_float = false;

        loop {
            match self.peek() {
                Some(ch) if ch.is_ascii_digit() => {
                    self.advance();
                }
                // A dot only belongs to the number when a digit follows it;
                // `1..2` and `1.name` leave the dot to the operator scanner.
                Some('.') if matches!(self.peek_next(), Some(ch) if ch.is_ascii_digit()) => {
                    if is_float {
                        return Err(LexError::new(
                            self.location(),
                            LexErrorKind::MultipleDecimalPoints,
                        ));
                    }
                    is_float = true;
                    self.advance();
                }
                _ => break,
            }
        }

        let class = if is_float {
            TokenClass::FloatLiteral
        } else {
            TokenClass::IntLiteral
        };
        Ok(Lexeme::new(class, self.slice(start), location))
    }

    /// Scans an operator using maximal munch. Returns `None` when the
    /// operator turned out to open a block comment.
    fn scan_operator(
        &mut self,
        start: usize,
        location: SourceLocation,
    ) -> Result<Option<Lexeme>, LexError> {
        let rest = self.rest();

        if let Some(op) = THREE_CHAR_OPERATORS.iter().find(|op| rest.starts_with(**op)) {
            self.advance_by(op.len());
            return Ok(Some(Lexeme::new(TokenClass::Operator, *op, location)));
        }

        if let Some(op) = TWO_CHAR_OPERATORS.iter().find(|op| rest.starts_with(**op)) {
            self.advance_by(op.len());
            return match *op {
                "/*" => {
                    self.skip_block_comment(location)?;
                    Ok(None)
                }
                ".?" => Ok(Some(Lexeme::new(
                    TokenClass::MemberDefaultAccess,
                    self.slice(start),
                    location,
                ))),
                _ => Ok(Some(Lexeme::new(TokenClass::Operator, *op, location))),
            };
        }

        let class = if rest.starts_with('.') {
            TokenClass::MemberAccess
        } else {
            TokenClass::Operator
        };
        self.advance();
        Ok(Some(Lexeme::new(class, self.slice(start), location)))
    }

    fn skip_block_comment(&mut self, location: SourceLocation) -> Result<(), LexError> {
        while !self.rest().starts_with("*/") {
            if self.advance().is_none() {
                return Err(LexError::new(location, LexErrorKind::UnterminatedComment));
            }
        }
        self.advance_by(2);
        Ok(())
    }

    /// Consumes a `#` comment up to the end of the line. Returns a hint
    /// lexeme for `# analysis <action> <name>`.
    fn scan_comment(&mut self, location: SourceLocation) -> Option<Lexeme> {
        self.advance(); // consume '#'
        let start = self.offset;
        while matches!(self.peek(), Some(ch) if ch != '\n') {
            self.advance();
        }

        let comment = self.slice(start).trim();
        let parts: Vec<&str> = comment.split_whitespace().collect();
        match parts.as_slice() {
            ["analysis", action, name] => {
                let hint = format!("{}:{}", action, name);
                Some(Lexeme::new(TokenClass::SourceAnalysisHint, hint, location))
            }
            _ => None,
        }
    }

    fn scan_string(
        &mut self,
        class: TokenClass,
        start: usize,
        location: SourceLocation,
    ) -> Result<Lexeme, LexError> {
        let Some(delimiter) = self.advance() else {
            return Err(LexError::new(location, LexErrorKind::UnterminatedString));
        };
        let mut value = String::new();

        loop {
            let escape_location = self.location();
            match self.advance() {
                None => return Err(LexError::new(location, LexErrorKind::UnterminatedString)),
                Some(ch) if ch == delimiter => break,
                Some('\\') => {
                    let Some(escaped) = self.advance() else {
                        return Err(LexError::new(location, LexErrorKind::UnterminatedString));
                    };
                    value.push(match escaped {
                        '"' => '"',
                        '\'' => '\'',
                        'n' => '\n',
                        'r' => '\r',
                        'b' => '\u{8}',
                        't' => '\t',
                        'f' => '\u{c}',
                        other => {
                            return Err(LexError::new(
                                escape_location,
                                LexErrorKind::UnrecognizedEscape(other),
                            ));
                        }
                    });
                }
                Some(ch) => value.push(ch),
            }
        }

        Ok(Lexeme::with_literal(class, self.slice(start), value, location))
    }

    fn scan_identifier(&mut self, start: usize, location: SourceLocation) -> Lexeme {
        self.advance();
        while matches!(self.peek(), Some(ch) if is_id_continue(ch)) {
            self.advance();
        }

        let name = self.slice(start);
        let class = if Keyword::lookup(name).is_some() {
            TokenClass::Keyword
        } else if OPERATOR_WORDS.contains(&name) {
            TokenClass::Operator
        } else {
            TokenClass::Identifier
        };
        Lexeme::new(class, name, location)
    }
}

/// Checks if a character can start an identifier.
fn is_id_start(ch: char) -> bool {
    ch == '_' || unicode_xid::UnicodeXID::is_xid_start(ch)
}

/// Checks if a character can continue an identifier.
fn is_id_continue(ch: char) -> bool {
    ch == '_' || unicode_xid::UnicodeXID::is_xid_continue(ch)
}

impl Iterator for Scanner<'_> {
    type Item = Result<Lexeme, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_lexeme().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(src: &str) -> Vec<TokenClass> {
        Scanner::new(src)
            .scan()
            .unwrap()
            .into_iter()
            .map(|l| l.class)
            .collect()
    }

    fn texts(src: &str) -> Vec<String> {
        Scanner::new(src)
            .scan()
            .unwrap()
            .into_iter()
            .map(|l| l.text)
            .collect()
    }

    fn scan_err(src: &str) -> LexError {
        Scanner::new(src).scan().unwrap_err()
    }

    #[test]
    fn test_structural_tokens() {
        assert_eq!(
            classes("{ } ( ) [ ] ; : ,"),
            vec![
                TokenClass::OpenBrace,
                TokenClass::CloseBrace,
                TokenClass::OpenParen,
                TokenClass::CloseParen,
                TokenClass::OpenBracket,
                TokenClass::CloseBracket,
                TokenClass::Semicolon,
                TokenClass::Colon,
                TokenClass::Comma,
            ]
        );
    }

    #[test]
    fn test_empty_and_whitespace_only() {
        assert!(Scanner::new("").scan().unwrap().is_empty());
        assert!(Scanner::new(" \t\r\n  ").scan().unwrap().is_empty());
    }

    #[test]
    fn test_locations() {
        let lexemes = Scanner::new("a\n  bc d").scan().unwrap();
        assert_eq!(lexemes[0].location, SourceLocation::new(1, 0));
        assert_eq!(lexemes[1].location, SourceLocation::new(2, 2));
        assert_eq!(lexemes[2].location, SourceLocation::new(2, 5));
    }

    #[test]
    fn test_identifiers_and_keywords() {
        let lexemes = Scanner::new("fn _tmp9 when self").scan().unwrap();
        assert_eq!(lexemes[0].class, TokenClass::Keyword);
        assert_eq!(lexemes[1].class, TokenClass::Identifier);
        assert_eq!(lexemes[1].text, "_tmp9");
        assert_eq!(lexemes[2].class, TokenClass::Identifier);
        assert_eq!(lexemes[3].class, TokenClass::Keyword);
    }

    #[test]
    fn test_operator_words() {
        assert_eq!(
            classes("and or is isnot as android"),
            vec![
                TokenClass::Operator,
                TokenClass::Operator,
                TokenClass::Operator,
                TokenClass::Operator,
                TokenClass::Operator,
                TokenClass::Identifier,
            ]
        );
    }

    #[test]
    fn test_unicode_identifier() {
        let lexemes = Scanner::new("größe").scan().unwrap();
        assert_eq!(lexemes.len(), 1);
        assert_eq!(lexemes[0].class, TokenClass::Identifier);
    }

    #[test]
    fn test_numbers() {
        let lexemes = Scanner::new("42 3.14 0x1337").scan().unwrap();
        assert_eq!(lexemes[0].class, TokenClass::IntLiteral);
        assert_eq!(lexemes[1].class, TokenClass::FloatLiteral);
        assert_eq!(lexemes[1].literal, "3.14");
        assert_eq!(lexemes[2].class, TokenClass::IntLiteral);
        assert_eq!(lexemes[2].text, "0x1337");
        assert_eq!(lexemes[2].literal, "4919");
    }

    #[test]
    fn test_hex_is_case_insensitive() {
        let lexemes = Scanner::new("0xFf 0xfF").scan().unwrap();
        assert_eq!(lexemes[0].literal, "255");
        assert_eq!(lexemes[1].literal, "255");
    }

    #[test]
    fn test_hex_beyond_u64() {
        let lexemes = Scanner::new("0x10000000000000000").scan().unwrap();
        assert_eq!(lexemes[0].literal, "18446744073709551616");
    }

    #[test]
    fn test_empty_hex_is_error() {
        let err = scan_err("0x");
        assert_eq!(err.kind, LexErrorKind::EmptyHexLiteral);
        assert_eq!(err.location, SourceLocation::new(1, 0));
    }

    #[test]
    fn test_second_decimal_point_is_error() {
        let err = scan_err("1.2.3");
        assert_eq!(err.kind, LexErrorKind::MultipleDecimalPoints);
        assert_eq!(err.location, SourceLocation::new(1, 3));
    }

    #[test]
    fn test_range_after_integer() {
        assert_eq!(texts("1...2"), vec!["1", "...", "2"]);
        assert_eq!(texts("1..2"), vec!["1", "..", "2"]);
    }

    #[test]
    fn test_member_access_after_integer() {
        assert_eq!(
            classes("1.abs"),
            vec![
                TokenClass::IntLiteral,
                TokenClass::MemberAccess,
                TokenClass::Identifier
            ]
        );
    }

    #[test]
    fn test_strings() {
        let lexemes = Scanner::new(r#""hello" 'world' `tpl`"#).scan().unwrap();
        assert_eq!(lexemes[0].class, TokenClass::StringLiteral);
        assert_eq!(lexemes[0].literal, "hello");
        assert_eq!(lexemes[0].text, "\"hello\"");
        assert_eq!(lexemes[1].literal, "world");
        assert_eq!(lexemes[2].class, TokenClass::TemplateStringLiteral);
        assert_eq!(lexemes[2].literal, "tpl");
    }

    #[test]
    fn test_other_quote_inside_string() {
        let lexemes = Scanner::new(r#""it's""#).scan().unwrap();
        assert_eq!(lexemes[0].literal, "it's");
    }

    #[test]
    fn test_escapes() {
        let lexemes = Scanner::new(r#""a\nb" '\'\"\r\t\b\f'"#).scan().unwrap();
        assert_eq!(lexemes[0].literal, "a\nb");
        assert_eq!(lexemes[1].literal, "'\"\r\t\u{8}\u{c}");
    }

    #[test]
    fn test_unknown_escape() {
        let err = scan_err(r#""a\qb""#);
        assert_eq!(err.kind, LexErrorKind::UnrecognizedEscape('q'));
        assert_eq!(err.location, SourceLocation::new(1, 2));
    }

    #[test]
    fn test_unterminated_string() {
        let err = scan_err("x = 'abc");
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
        assert_eq!(err.location, SourceLocation::new(1, 4));
    }

    #[test]
    fn test_binary_strings() {
        let lexemes = Scanner::new("b\"raw\" b").scan().unwrap();
        assert_eq!(lexemes[0].class, TokenClass::BinaryStringLiteral);
        assert_eq!(lexemes[0].literal, "raw");
        assert_eq!(lexemes[0].text, "b\"raw\"");
        assert_eq!(lexemes[1].class, TokenClass::Identifier);
    }

    #[test]
    fn test_binary_string_escape_checked() {
        assert_eq!(scan_err("b'\\x'").kind, LexErrorKind::UnrecognizedEscape('x'));
    }

    #[test]
    fn test_unexpected_character() {
        let err = scan_err("a $ b");
        assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter('$'));
        assert_eq!(err.location, SourceLocation::new(1, 2));
    }

    #[test]
    fn test_line_comment() {
        assert_eq!(texts("1 # comment\n2"), vec!["1", "2"]);
        assert_eq!(texts("# only a comment"), Vec::<String>::new());
    }

    #[test]
    fn test_analysis_hint() {
        let lexemes = Scanner::new("#  analysis global   print  \nx").scan().unwrap();
        assert_eq!(lexemes[0].class, TokenClass::SourceAnalysisHint);
        assert_eq!(lexemes[0].text, "global:print");
        assert_eq!(lexemes[1].text, "x");
    }

    #[test]
    fn test_analysis_hint_needs_three_parts() {
        assert!(Scanner::new("# analysis global").scan().unwrap().is_empty());
        assert!(Scanner::new("# analysis a b c").scan().unwrap().is_empty());
    }

    #[test]
    fn test_block_comment() {
        assert_eq!(texts("1 /* a\n * b */ 2"), vec!["1", "2"]);
        let lexemes = Scanner::new("/* x\n*/ y").scan().unwrap();
        assert_eq!(lexemes[0].location, SourceLocation::new(2, 3));
    }

    #[test]
    fn test_unterminated_block_comment() {
        assert_eq!(scan_err("1 /* open").kind, LexErrorKind::UnterminatedComment);
    }

    #[test]
    fn test_iterator_stops_at_error() {
        let items: Vec<_> = Scanner::new("a ` b").collect();
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(items[1].is_err());
    }
}
