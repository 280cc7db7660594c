// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! A forward-only cursor over scanned lexemes.

use crate::lexer::{Lexeme, SourceLocation, TokenClass};

/// A forward-only cursor over a lexeme sequence.
#[derive(Debug, Clone)]
pub struct Cursor {
    lexemes: Vec<Lexeme>,
    position: usize,
}

impl Cursor {
    /// Creates a cursor positioned at the first lexeme.
    pub fn new(lexemes: Vec<Lexeme>) -> Self {
        Self {
            lexemes,
            position: 0,
        }
    }

    /// The lexeme under the cursor.
    pub fn current(&self) -> Option<&Lexeme> {
        self.lexemes.get(self.position)
    }

    /// The lexeme `offset` positions past the current one.
    pub fn peek(&self, offset: usize) -> Option<&Lexeme> {
        self.lexemes.get(self.position + offset)
    }

    /// Consumes and returns the current lexeme.
    pub fn advance(&mut self) -> Option<Lexeme> {
        let lexeme = self.lexemes.get(self.position).cloned();
        if lexeme.is_some() {
            self.position += 1;
        }
        lexeme
    }

    /// Returns true once every lexeme has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.position >= self.lexemes.len()
    }

    /// Returns true if the current lexeme has the given class.
    pub fn check(&self, class: TokenClass) -> bool {
        self.current().is_some_and(|l| l.is(class))
    }

    /// Returns true if the current lexeme has the given class and text.
    pub fn check_exact(&self, class: TokenClass, text: &str) -> bool {
        self.current().is_some_and(|l| l.is_exact(class, text))
    }

    /// Consumes the current lexeme if it has the given class.
    pub fn eat(&mut self, class: TokenClass) -> bool {
        if self.check(class) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Location of the current lexeme. At the end of input this is the
    /// location of the last lexeme, or [`SourceLocation::ZERO`] for an
    /// empty sequence.
    pub fn location(&self) -> SourceLocation {
        self.current()
            .or_else(|| self.lexemes.last())
            .map_or(SourceLocation::ZERO, |l| l.location)
    }
}
