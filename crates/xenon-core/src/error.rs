// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error types for the Xenon compiler.
//!
//! Three families are kept apart so tooling can tell "your program is
//! invalid" from "the compiler has a bug":
//!
//! - [`LexError`] - a malformed token; always fatal to the scan
//! - [`ParseError`] - a grammar violation, collected in [`ParseErrors`]
//! - [`Error::Internal`] - a broken compiler invariant

use std::fmt;

use thiserror::Error;

use crate::lexer::SourceLocation;

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while compiling a source text
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Malformed token
    #[error("{0}")]
    Lex(#[from] LexError),

    /// One or more grammar violations
    #[error("{0}")]
    Syntax(#[from] ParseErrors),

    /// Names that resolve nowhere, under a denying name policy
    #[error("{}", render_diagnostics(.0))]
    UndefinedNames(Vec<Diagnostic>),

    /// Compiler bug
    #[error("Internal compiler error: {0}")]
    Internal(String),
}

impl Error {
    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if this error reports a compiler bug rather than a
    /// problem with the source text.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }

    /// Location of the first problem, when one is known.
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            Self::Lex(err) => Some(err.location),
            Self::Syntax(errs) => errs.first().map(ParseError::location),
            Self::UndefinedNames(diags) => diags.first().map(|d| d.location),
            Self::Internal(_) => None,
        }
    }
}

/// A malformed token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("At Line {} Pos {}: {kind}", .location.line, .location.column)]
pub struct LexError {
    /// Where scanning failed
    pub location: SourceLocation,
    /// What went wrong
    pub kind: LexErrorKind,
}

impl LexError {
    /// Creates a new lex error.
    pub fn new(location: SourceLocation, kind: LexErrorKind) -> Self {
        Self { location, kind }
    }
}

/// The reasons a scan can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// A character that starts no token
    #[error("Unexpected character '{0}'.")]
    UnexpectedCharacter(char),

    /// End of input inside a string literal
    #[error("Unterminated string literal.")]
    UnterminatedString,

    /// End of input inside a block comment
    #[error("Unterminated block comment.")]
    UnterminatedComment,

    /// A backslash followed by a character outside the escape set
    #[error("Unrecognized escape sequence '\\{0}'.")]
    UnrecognizedEscape(char),

    /// A second decimal point inside a number
    #[error("Floating point numbers can only have one decimal point.")]
    MultipleDecimalPoints,

    /// `0x` with no digits after it
    #[error("Hexadecimal literal has no digits.")]
    EmptyHexLiteral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ChainLine {
    Describe(String),
    Solution(String),
}

/// A grammar violation with an accumulating description chain.
///
/// Renders as a header naming the location, followed by one `| D |` line
/// per description and one `| S |` line per suggested solution:
///
/// ```text
/// At Line 3 Pos 7:
/// | D | Unexpected token: ')' (CloseParen)
/// | S | Remove the stray parenthesis
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    location: SourceLocation,
    lines: Vec<ChainLine>,
}

impl ParseError {
    /// Creates an error with only a header.
    pub fn new(location: SourceLocation) -> Self {
        Self {
            location,
            lines: Vec::new(),
        }
    }

    /// Appends a description line.
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.lines.push(ChainLine::Describe(text.into()));
        self
    }

    /// Appends a solution line.
    pub fn solution(mut self, text: impl Into<String>) -> Self {
        self.lines.push(ChainLine::Solution(text.into()));
        self
    }

    /// The location the error refers to.
    pub fn location(&self) -> SourceLocation {
        self.location
    }

    /// The description lines, in order.
    pub fn descriptions(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|line| match line {
            ChainLine::Describe(text) => Some(text.as_str()),
            ChainLine::Solution(_) => None,
        })
    }

    /// The solution lines, in order.
    pub fn solutions(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|line| match line {
            ChainLine::Solution(text) => Some(text.as_str()),
            ChainLine::Describe(_) => None,
        })
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "At Line {} Pos {}:",
            self.location.line, self.location.column
        )?;
        for line in &self.lines {
            match line {
                ChainLine::Describe(text) => write!(f, "\n| D | {}", text)?,
                ChainLine::Solution(text) => write!(f, "\n| S | {}", text)?,
            }
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Every grammar violation collected during one parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrors(Vec<ParseError>);

impl ParseErrors {
    /// Wraps collected errors.
    pub fn new(errors: Vec<ParseError>) -> Self {
        Self(errors)
    }

    /// The first error, if any.
    pub fn first(&self) -> Option<&ParseError> {
        self.0.first()
    }

    /// Number of errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing was collected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the errors in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, ParseError> {
        self.0.iter()
    }

    /// Unwraps the collected errors.
    pub fn into_vec(self) -> Vec<ParseError> {
        self.0
    }
}

impl From<ParseError> for ParseErrors {
    fn from(err: ParseError) -> Self {
        Self(vec![err])
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n\n")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Compilation continues
    Warning,
    /// Compilation fails
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// A located message produced by analysis or code generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// How serious it is
    pub severity: Severity,
    /// Where it applies
    pub location: SourceLocation,
    /// What it says
    pub message: String,
}

impl Diagnostic {
    /// Creates a warning.
    pub fn warning(location: SourceLocation, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            location,
            message: message.into(),
        }
    }

    /// Creates an error.
    pub fn error(location: SourceLocation, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            location,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.severity, self.location, self.message)
    }
}

fn render_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(Diagnostic::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_header_only() {
        let err = ParseError::new(SourceLocation::new(4, 2));
        assert_eq!(err.to_string(), "At Line 4 Pos 2:");
    }

    #[test]
    fn test_parse_error_chain_order() {
        let err = ParseError::new(SourceLocation::new(1, 5))
            .describe("Unexpected end of file.")
            .solution("Close the block")
            .describe("Inside function 'f'");
        assert_eq!(
            err.to_string(),
            "At Line 1 Pos 5:\n| D | Unexpected end of file.\n| S | Close the block\n| D | Inside function 'f'"
        );
        assert_eq!(err.descriptions().count(), 2);
        assert_eq!(err.solutions().collect::<Vec<_>>(), vec!["Close the block"]);
    }

    #[test]
    fn test_parse_errors_joined() {
        let errs = ParseErrors::new(vec![
            ParseError::new(SourceLocation::new(1, 0)).describe("a"),
            ParseError::new(SourceLocation::new(2, 0)).describe("b"),
        ]);
        assert_eq!(
            errs.to_string(),
            "At Line 1 Pos 0:\n| D | a\n\nAt Line 2 Pos 0:\n| D | b"
        );
        assert_eq!(errs.len(), 2);
    }

    #[test]
    fn test_lex_error_display() {
        let err = LexError::new(SourceLocation::new(2, 3), LexErrorKind::UnterminatedString);
        assert_eq!(err.to_string(), "At Line 2 Pos 3: Unterminated string literal.");
        let err = LexError::new(SourceLocation::new(1, 1), LexErrorKind::UnrecognizedEscape('q'));
        assert_eq!(
            err.to_string(),
            "At Line 1 Pos 1: Unrecognized escape sequence '\\q'."
        );
    }

    #[test]
    fn test_error_location() {
        let err: Error = LexError::new(SourceLocation::new(7, 1), LexErrorKind::EmptyHexLiteral).into();
        assert_eq!(err.location(), Some(SourceLocation::new(7, 1)));
        assert!(!err.is_internal());
        assert!(Error::internal("boom").is_internal());
        assert_eq!(Error::internal("boom").location(), None);
    }

    #[test]
    fn test_undefined_names_display() {
        let err = Error::UndefinedNames(vec![
            Diagnostic::error(SourceLocation::new(1, 0), "undefined name 'x'"),
            Diagnostic::error(SourceLocation::new(2, 4), "undefined name 'y'"),
        ]);
        assert_eq!(
            err.to_string(),
            "error at 1:0: undefined name 'x'\nerror at 2:4: undefined name 'y'"
        );
    }
}
