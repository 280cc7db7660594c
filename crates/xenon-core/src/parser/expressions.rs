// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Expression parsing documentation.
//!
//! This module documents the expression parsing logic found in `parser.rs`.
//!
//! ## Operator Precedence (lowest to highest)
//!
//! | Level | Operators | Associativity | Method |
//! |-------|-----------|---------------|--------|
//! | 1 | `=` `+=` `-=` `*=` `/=` `%=` `^=` `&=` `\|=` `<<=` `>>=` | Right | `parse_assignment` |
//! | 2 | `when` ... `else` | Right | `parse_ternary` |
//! | 3 | `..` `...` | Left | `parse_range` |
//! | 4 | `or` `??` | Left | `parse_logical_or` |
//! | 5 | `and` | Left | `parse_logical_and` |
//! | 6 | `\|` | Left | `parse_bitwise_or` |
//! | 7 | `^` | Left | `parse_bitwise_xor` |
//! | 8 | `&` | Left | `parse_bitwise_and` |
//! | 9 | `==` `!=` | Left | `parse_equality` |
//! | 10 | `>` `<` `>=` `<=` `is` `isnot` | Left | `parse_relational` |
//! | 11 | `<<` `>>` | Left | `parse_shift` |
//! | 12 | `+` `-` | Left | `parse_additive` |
//! | 13 | `*` `/` `%` | Left | `parse_multiplicative` |
//! | 14 | `-` `~` `!` (prefix) | Right | `parse_unary` |
//! | 15 | `()` `.` `.?` | Left | `parse_postfix` |
//!
//! ## Compound Assignment
//!
//! `x op= y` is rewritten while parsing:
//!
//! ```text
//! x += 1   ->   Assign(x, Add(x, 1))
//! ```
//!
//! Only names may appear on the left of an assignment.
//!
//! ## Parentheses
//!
//! | Source | Result |
//! |--------|--------|
//! | `(x)` | `x` |
//! | `()` | empty tuple |
//! | `(x,)` | one-element tuple |
//! | `(x, y)` | tuple |
//! | `(x, y) => body` | lambda |
//!
//! A lambda body is either a code block or a single expression.
//!
//! ## Literals
//!
//! | Lexeme | Node |
//! |--------|------|
//! | `IntLiteral` | `Integer` (arbitrary precision) |
//! | `FloatLiteral` | `Float` |
//! | string classes | `String` with its `StringKind` |
//! | `true` `false` | `Boolean` |
//! | `null` | `Null` |

// This module serves as documentation. The actual implementation is in parser.rs.
