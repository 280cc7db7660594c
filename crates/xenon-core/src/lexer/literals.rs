// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Literal scanning documentation.
//!
//! This module documents the literal scanning logic in `scanner.rs`.
//!
//! ## Numeric Literals
//!
//! ```text
//! 42        -> IntLiteral
//! 3.14      -> FloatLiteral
//! 0x1337    -> IntLiteral, literal value "4919"
//! 1.2.3     -> error at the second '.'
//! 1..2      -> IntLiteral, Operator(".."), IntLiteral
//! 1.2.      -> FloatLiteral, MemberAccess
//! 1.2.x     -> FloatLiteral, MemberAccess, Identifier
//! ```
//!
//! A `.` joins a decimal literal only when a digit follows it. A second
//! dot after a float is therefore an error only when a digit follows it
//! (`1.2.3`); otherwise the number ends and the dot is scanned as an
//! operator or member access.
//! Hexadecimal digits are case-insensitive and have no length limit; the
//! literal value is the decimal text of the number.
//!
//! Methods: `scan_number`, `scan_hex_number`
//!
//! ## String Literals
//!
//! Method: `scan_string`
//!
//! | Opening | Class |
//! |---------|-------|
//! | `'` or `"` | `StringLiteral` |
//! | `` ` `` | `TemplateStringLiteral` |
//! | `b'` or `b"` | `BinaryStringLiteral` |
//!
//! The string ends at the next unescaped copy of its opening delimiter.
//! Line breaks may appear inside.
//!
//! ### Escape Sequences
//!
//! | Escape | Meaning |
//! |--------|---------|
//! | `\"` | Double quote |
//! | `\'` | Single quote |
//! | `\n` | Newline |
//! | `\r` | Carriage return |
//! | `\b` | Backspace |
//! | `\t` | Tab |
//! | `\f` | Form feed |
//!
//! Anything else after a backslash is an error.
//!
//! ## Identifiers and Keywords
//!
//! Method: `scan_identifier`
//!
//! - Start: `_` or a Unicode XID start character
//! - Continue: `_` or a Unicode XID continue character
//!
//! The text is then checked against the keyword table, then against the
//! operator words `and or is isnot as`.

// This module serves as documentation. The actual implementation is in scanner.rs.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::error::LexErrorKind;
    use crate::lexer::{Lexeme, Scanner, SourceLocation, TokenClass};

    fn scan_single(src: &str) -> Lexeme {
        let mut lexemes = Scanner::new(src).scan().unwrap();
        assert_eq!(lexemes.len(), 1, "expected one lexeme for {:?}", src);
        lexemes.remove(0)
    }

    #[test]
    fn test_integer() {
        let lexeme = scan_single("42");
        assert_eq!(lexeme.class, TokenClass::IntLiteral);
        assert_eq!(lexeme.literal, "42");
    }

    #[test]
    fn test_float() {
        let lexeme = scan_single("3.14");
        assert_eq!(lexeme.class, TokenClass::FloatLiteral);
        assert_eq!(lexeme.literal, "3.14");
    }

    #[test]
    fn test_hex_example() {
        assert_eq!(scan_single("0x1337").literal, "4919");
    }

    #[test]
    fn test_leading_zero_decimal() {
        assert_eq!(scan_single("007").literal, "007");
    }

    #[test]
    fn test_multiline_string() {
        assert_eq!(scan_single("'a\nb'").literal, "a\nb");
    }

    #[test]
    fn test_template_keeps_quotes() {
        assert_eq!(scan_single("`say \"hi\"`").literal, "say \"hi\"");
    }

    #[test]
    fn test_empty_strings() {
        assert_eq!(scan_single("''").literal, "");
        assert_eq!(scan_single("b\"\"").literal, "");
    }

    #[test]
    fn test_backslash_is_not_an_escape() {
        let err = Scanner::new(r"'\\'").scan().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnrecognizedEscape('\\'));
    }

    #[test]
    fn test_second_dot_without_digit_ends_float() {
        let classes = |src: &str| {
            Scanner::new(src)
                .scan()
                .unwrap()
                .into_iter()
                .map(|l| l.class)
                .collect::<Vec<_>>()
        };
        assert_eq!(
            classes("1.2."),
            vec![TokenClass::FloatLiteral, TokenClass::MemberAccess]
        );
        assert_eq!(
            classes("1.2.x"),
            vec![
                TokenClass::FloatLiteral,
                TokenClass::MemberAccess,
                TokenClass::Identifier
            ]
        );
        let err = Scanner::new("1.2.3").scan().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::MultipleDecimalPoints);
    }

    proptest! {
        #[test]
        fn prop_hex_literal_matches_base16(value in any::<u64>(), upper in any::<bool>()) {
            let digits = if upper { format!("{:X}", value) } else { format!("{:x}", value) };
            let lexeme = scan_single(&format!("0x{}", digits));
            prop_assert_eq!(lexeme.class, TokenClass::IntLiteral);
            prop_assert_eq!(lexeme.literal, value.to_string());
        }

        #[test]
        fn prop_second_decimal_point_fails(
            whole in "[0-9]{1,6}",
            first in "[0-9]{1,6}",
            second in "[0-9]{1,6}",
        ) {
            let source = format!("{}.{}.{}", whole, first, second);
            let err = Scanner::new(&source).scan().unwrap_err();
            prop_assert_eq!(err.kind, LexErrorKind::MultipleDecimalPoints);
            let column = (whole.len() + 1 + first.len()) as u32;
            prop_assert_eq!(err.location, SourceLocation::new(1, column));
        }

        #[test]
        fn prop_identifiers_round_trip(name in "[a-z_][a-z0-9_]{0,12}") {
            let lexemes = Scanner::new(&name).scan().unwrap();
            prop_assert_eq!(lexemes.len(), 1);
            prop_assert_eq!(&lexemes[0].text, &name);
        }
    }
}
