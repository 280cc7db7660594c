// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Operator scanning documentation.
//!
//! This module documents the operator scanning logic in `scanner.rs`.
//! Any of the characters `+-*/=<>~!&^|%@?.` starts an operator, and the
//! scanner applies maximal munch over fixed windows.
//!
//! ## Windows
//!
//! | Window | Operators |
//! |--------|-----------|
//! | 3 chars | `<<=` `>>=` `...` |
//! | 2 chars | `>>` `<<` `&&` `\|\|` `==` `!=` `=>` `<=` `>=` `+=` `-=` `*=` `/=` `%=` `&=` `^=` `\|=` `??` `..` `.?` |
//! | 1 char | `+` `-` `*` `/` `=` `<` `>` `~` `!` `&` `^` `\|` `%` `@` `?` `.` |
//!
//! ## Special Classes
//!
//! | Text | Class |
//! |------|-------|
//! | `.` | `MemberAccess` |
//! | `.?` | `MemberDefaultAccess` |
//! | `/*` | opens a block comment, no lexeme |
//! | `and` `or` `is` `isnot` `as` | `Operator` (scanned as words) |
//!
//! ## Lookahead Logic
//!
//! ```text
//! // For input "<<=1"
//! scan_operator():
//!   "<<=" matches the 3-char window -> Operator("<<=")
//!
//! // For input "1...2"
//! scan_number() stops before '.', because '.' is not followed by a digit
//! scan_operator():
//!   "..." matches the 3-char window -> Operator("...")
//! ```

// This module serves as documentation. The actual implementation is in scanner.rs.

#[cfg(test)]
mod tests {
    use crate::lexer::{Scanner, TokenClass};

    fn scan_all(src: &str) -> Vec<(TokenClass, String)> {
        Scanner::new(src)
            .scan()
            .unwrap()
            .into_iter()
            .map(|l| (l.class, l.text))
            .collect()
    }

    fn scan_single(src: &str) -> (TokenClass, String) {
        let mut lexemes = scan_all(src);
        assert_eq!(lexemes.len(), 1, "expected one lexeme for {:?}", src);
        lexemes.remove(0)
    }

    fn op(text: &str) -> (TokenClass, String) {
        (TokenClass::Operator, text.to_string())
    }

    #[test]
    fn test_three_char_operators() {
        for text in ["<<=", ">>=", "..."] {
            assert_eq!(scan_single(text), op(text));
        }
    }

    #[test]
    fn test_two_char_operators() {
        for text in [
            ">>", "<<", "&&", "||", "==", "!=", "=>", "<=", ">=", "+=", "-=", "*=", "/=", "%=",
            "&=", "^=", "|=", "??", "..",
        ] {
            assert_eq!(scan_single(text), op(text));
        }
    }

    #[test]
    fn test_single_char_operators() {
        for text in ["+", "-", "*", "/", "=", "<", ">", "~", "!", "&", "^", "|", "%", "@", "?"] {
            assert_eq!(scan_single(text), op(text));
        }
    }

    #[test]
    fn test_shift_assign_is_one_lexeme() {
        assert_eq!(scan_all("x<<=1"), vec![
            (TokenClass::Identifier, "x".to_string()),
            op("<<="),
            (TokenClass::IntLiteral, "1".to_string()),
        ]);
    }

    #[test]
    fn test_inclusive_range_is_one_lexeme() {
        assert_eq!(scan_all("1...2"), vec![
            (TokenClass::IntLiteral, "1".to_string()),
            op("..."),
            (TokenClass::IntLiteral, "2".to_string()),
        ]);
    }

    #[test]
    fn test_four_dots() {
        assert_eq!(scan_all("...."), vec![
            op("..."),
            (TokenClass::MemberAccess, ".".to_string()),
        ]);
    }

    #[test]
    fn test_member_access_classes() {
        assert_eq!(scan_single("."), (TokenClass::MemberAccess, ".".to_string()));
        assert_eq!(
            scan_single(".?"),
            (TokenClass::MemberDefaultAccess, ".?".to_string())
        );
    }

    #[test]
    fn test_adjacent_operators_split() {
        assert_eq!(scan_all("=!"), vec![op("="), op("!")]);
        assert_eq!(scan_all("-~"), vec![op("-"), op("~")]);
    }

    #[test]
    fn test_block_comment_between_operators() {
        assert_eq!(scan_all("+/* - */-"), vec![op("+"), op("-")]);
    }

    #[test]
    fn test_division_is_not_comment() {
        assert_eq!(scan_all("6 / 2"), vec![
            (TokenClass::IntLiteral, "6".to_string()),
            op("/"),
            (TokenClass::IntLiteral, "2".to_string()),
        ]);
    }
}
