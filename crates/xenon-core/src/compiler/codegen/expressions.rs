// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Expression compilation documentation.
//!
//! This module documents the expression compilation logic in `mod.rs`.
//! Every expression leaves exactly one value on the stack.
//!
//! ## Expression Compilation Overview
//!
//! | Expression | Key Operations | Stack Effect |
//! |------------|----------------|--------------|
//! | Literal | `LoadConst` / `LoadTrue` / `LoadNull` | Push value |
//! | Name | `LoadLocal` / `LoadAttribute` / `LoadGlobal` | Push value |
//! | Binary | `Add` / `Equals` / etc | Pop 2, push 1 |
//! | Unary | `Negate` / `BitwiseNot` / `LogicalNot` | Pop 1, push 1 |
//! | Assignment | `Dup`, `Store*` | Value stays |
//! | Call | `Invoke n` | Pop n+1, push result |
//! | Member | `LoadMember` / `LoadMemberOrNull` | Pop 1, push 1 |
//! | List / Tuple | `BuildList n` / `BuildTuple n` | Pop n, push 1 |
//! | Lambda | `BuildTuple`, `LoadConst`, `BuildFunction` | Push function |
//! | Ternary | `JumpIfFalse`, `Jump` | Pop 1, push 1 |
//!
//! ## Short-Circuit Operators
//!
//! `and`, `or` and `??` keep the left value when it decides the result:
//!
//! ```text
//! Expression: a and b
//!
//!   <a>
//!   dup
//!   jump_if_false L0   ; pops the copy
//!   pop
//!   <b>
//! L0:
//! ```
//!
//! `or` uses `jump_if_true` and `??` uses `jump_if_not_null`.
//!
//! ## Functions
//!
//! A function value is built from a tuple of parameter names and the
//! compiled body:
//!
//! ```text
//! fn f(a: Int) { }
//!
//!   load_const  "a"
//!   build_tuple 1
//!   load_const  <code f>
//!   build_function 8        ; HasTypeHintedParameters
//!   store_local f
//! ```
//!
//! The body of `f` starts by checking each hinted parameter:
//! `load_* Int; cast_local a`.

#[cfg(test)]
mod tests {
    use crate::compiler::bytecode::OpCode;
    use crate::session::compile;

    fn ops(src: &str) -> Vec<OpCode> {
        compile(src)
            .unwrap()
            .module
            .initializer()
            .instructions()
            .iter()
            .map(|i| i.opcode)
            .collect()
    }

    #[test]
    fn test_every_expression_statement_is_balanced() {
        for src in ["1", "x = 1", "[1, 2]", "(1, 2)", "-1", "1 + 2", "f(1)", "o.x"] {
            assert_eq!(ops(src).last(), Some(&OpCode::Pop), "{src}");
        }
    }

    #[test]
    fn test_chained_assignment() {
        assert_eq!(
            ops("x = y = 2"),
            vec![
                OpCode::LoadConst,
                OpCode::Dup,
                OpCode::StoreLocal,
                OpCode::Dup,
                OpCode::StoreLocal,
                OpCode::Pop,
            ]
        );
    }

    #[test]
    fn test_call_evaluates_target_first() {
        assert_eq!(
            ops("f(a, 1)"),
            vec![
                OpCode::LoadGlobal,
                OpCode::LoadGlobal,
                OpCode::LoadConst,
                OpCode::Invoke,
                OpCode::Pop,
            ]
        );
    }

    #[test]
    fn test_comparison_chain_is_left_associative() {
        assert_eq!(
            ops("1 < 2 == true"),
            vec![
                OpCode::LoadConst,
                OpCode::LoadConst,
                OpCode::LessThan,
                OpCode::LoadTrue,
                OpCode::Equals,
                OpCode::Pop,
            ]
        );
    }
}
