// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Lexeme definitions for the Xenon lexer.

use std::fmt;

use xenon_macros::str_enum;

/// A position in the source text.
///
/// Lines are 1-based, columns are 0-based and counted in characters.
/// [`SourceLocation::ZERO`] marks synthetic nodes and the end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SourceLocation {
    /// Line number (1-based)
    pub line: u32,
    /// Column number (0-based)
    pub column: u32,
}

impl SourceLocation {
    /// The sentinel location.
    pub const ZERO: SourceLocation = SourceLocation { line: 0, column: 0 };

    /// Creates a new location.
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Returns true for the sentinel location.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

str_enum! {
    /// The closed set of lexeme classes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum TokenClass {
        /// `'...'` or `"..."`
        StringLiteral => "StringLiteral",
        /// `b'...'` or `b"..."`
        BinaryStringLiteral => "BinaryStringLiteral",
        /// `` `...` ``
        TemplateStringLiteral => "TemplateStringLiteral",
        /// Decimal or hexadecimal integer
        IntLiteral => "IntLiteral",
        /// Decimal number with a fractional part
        FloatLiteral => "FloatLiteral",
        /// Reserved word
        Keyword => "Keyword",
        /// Symbolic or word operator
        Operator => "Operator",
        /// Name
        Identifier => "Identifier",
        /// `.`
        MemberAccess => "MemberAccess",
        /// `.?`
        MemberDefaultAccess => "MemberDefaultAccess",
        /// `{`
        OpenBrace => "OpenBrace",
        /// `}`
        CloseBrace => "CloseBrace",
        /// `(`
        OpenParen => "OpenParen",
        /// `)`
        CloseParen => "CloseParen",
        /// `[`
        OpenBracket => "OpenBracket",
        /// `]`
        CloseBracket => "CloseBracket",
        /// `;`
        Semicolon => "Semicolon",
        /// `:`
        Colon => "Colon",
        /// `,`
        Comma => "Comma",
        /// `# analysis <action> <name>`
        SourceAnalysisHint => "SourceAnalysisHint",
    }
}

impl TokenClass {
    /// Returns true if this class carries a literal value.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenClass::StringLiteral
                | TokenClass::BinaryStringLiteral
                | TokenClass::TemplateStringLiteral
                | TokenClass::IntLiteral
                | TokenClass::FloatLiteral
        )
    }

    /// Returns true for string-like literal classes.
    pub fn is_string(&self) -> bool {
        matches!(
            self,
            TokenClass::StringLiteral
                | TokenClass::BinaryStringLiteral
                | TokenClass::TemplateStringLiteral
        )
    }
}

str_enum! {
    /// Reserved words.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Keyword {
        // control flow
        /// `if`
        If => "if",
        /// `else`
        Else => "else",
        /// `do`
        Do => "do",
        /// `while`
        While => "while",
        /// `for`
        For => "for",
        /// `in`
        In => "in",
        /// `break`
        Break => "break",
        /// `continue`
        Continue => "continue",
        /// `match`
        Match => "match",
        /// `case`
        Case => "case",
        /// `default`
        Default => "default",
        /// `yield`
        Yield => "yield",
        /// `return`
        Return => "return",
        // type definitions
        /// `fn`
        Fn => "fn",
        /// `class`
        Class => "class",
        /// `enum`
        Enum => "enum",
        /// `contract`
        Contract => "contract",
        /// `trait`
        Trait => "trait",
        /// `mixin`
        Mixin => "mixin",
        /// `extend`
        Extend => "extend",
        // class members
        /// `super`
        Super => "super",
        /// `self`
        SelfValue => "self",
        // constants
        /// `true`
        True => "true",
        /// `false`
        False => "false",
        /// `null`
        Null => "null",
        // exceptions
        /// `raise`
        Raise => "raise",
        /// `try`
        Try => "try",
        /// `except`
        Except => "except",
        // packages
        /// `use`
        Use => "use",
        /// `from`
        From => "from",
        /// `with`
        With => "with",
    }
}

/// Operators spelled as words. They lex with [`TokenClass::Operator`].
pub const OPERATOR_WORDS: &[&str] = &["and", "or", "is", "isnot", "as"];

/// A classified, located unit of source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    /// The class of the lexeme
    pub class: TokenClass,
    /// The raw source text
    pub text: String,
    /// The derived value (decoded string, decimal integer, hint text)
    pub literal: String,
    /// Where the lexeme starts
    pub location: SourceLocation,
}

impl Lexeme {
    /// Creates a lexeme whose literal value is its text.
    pub fn new(class: TokenClass, text: impl Into<String>, location: SourceLocation) -> Self {
        let text = text.into();
        Self {
            class,
            literal: text.clone(),
            text,
            location,
        }
    }

    /// Creates a lexeme with a derived literal value.
    pub fn with_literal(
        class: TokenClass,
        text: impl Into<String>,
        literal: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self {
            class,
            text: text.into(),
            literal: literal.into(),
            location,
        }
    }

    /// Returns true if the lexeme has the given class.
    pub fn is(&self, class: TokenClass) -> bool {
        self.class == class
    }

    /// Returns true if the lexeme has the given class and text.
    pub fn is_exact(&self, class: TokenClass, text: &str) -> bool {
        self.class == class && self.text == text
    }

    /// Returns the keyword this lexeme spells, if it is one.
    pub fn keyword(&self) -> Option<Keyword> {
        if self.class == TokenClass::Keyword {
            Keyword::lookup(&self.text)
        } else {
            None
        }
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<22} {:<8} {}",
            self.class,
            self.location.to_string(),
            self.text
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        assert_eq!(SourceLocation::new(3, 14).to_string(), "3:14");
    }

    #[test]
    fn test_location_zero() {
        assert!(SourceLocation::ZERO.is_zero());
        assert!(SourceLocation::default().is_zero());
        assert!(!SourceLocation::new(1, 0).is_zero());
    }

    #[test]
    fn test_location_ordering() {
        assert!(SourceLocation::new(1, 9) < SourceLocation::new(2, 0));
        assert!(SourceLocation::new(2, 1) > SourceLocation::new(2, 0));
    }

    #[test]
    fn test_lexeme_literal_defaults_to_text() {
        let lexeme = Lexeme::new(TokenClass::Identifier, "foo", SourceLocation::new(1, 0));
        assert_eq!(lexeme.literal, "foo");
        assert!(lexeme.is(TokenClass::Identifier));
        assert!(lexeme.is_exact(TokenClass::Identifier, "foo"));
        assert!(!lexeme.is_exact(TokenClass::Keyword, "foo"));
    }

    #[test]
    fn test_lexeme_with_literal() {
        let lexeme = Lexeme::with_literal(
            TokenClass::IntLiteral,
            "0xff",
            "255",
            SourceLocation::new(1, 0),
        );
        assert_eq!(lexeme.text, "0xff");
        assert_eq!(lexeme.literal, "255");
    }

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(Keyword::lookup("fn"), Some(Keyword::Fn));
        assert_eq!(Keyword::lookup("self"), Some(Keyword::SelfValue));
        assert_eq!(Keyword::lookup("when"), None);
        assert_eq!(Keyword::lookup("and"), None);
        assert_eq!(Keyword::ALL.len(), 31);
    }

    #[test]
    fn test_lexeme_keyword() {
        let kw = Lexeme::new(TokenClass::Keyword, "null", SourceLocation::new(1, 0));
        let id = Lexeme::new(TokenClass::Identifier, "null", SourceLocation::new(1, 0));
        assert_eq!(kw.keyword(), Some(Keyword::Null));
        assert_eq!(id.keyword(), None);
    }

    #[test]
    fn test_token_class_predicates() {
        assert!(TokenClass::IntLiteral.is_literal());
        assert!(TokenClass::TemplateStringLiteral.is_string());
        assert!(!TokenClass::Identifier.is_literal());
        assert!(!TokenClass::FloatLiteral.is_string());
    }

    #[test]
    fn test_token_class_display() {
        assert_eq!(TokenClass::CloseParen.to_string(), "CloseParen");
    }
}
