// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Human-readable module listings.
//!
//! ```text
//! constants:
//!     0  name x
//!     1  int 1
//!
//! initializer:
//!     0  load_const           1       ; int 1
//!     1  dup
//!     2  store_global         0       ; name x
//!     3  pop
//! ```

use std::fmt::Write;

use super::bytecode::Instruction;
use super::module::{ConstantPool, Module};

/// Renders the constant pool, the initializer and every function body.
pub fn disassemble(module: &Module) -> String {
    let mut out = String::new();
    let pool = module.constants();

    out.push_str("constants:\n");
    for (index, constant) in pool.iter().enumerate() {
        let _ = writeln!(out, "    {:<3}{}", index, constant);
    }

    out.push_str("\ninitializer:\n");
    render_instructions(&mut out, module.initializer().instructions(), pool);

    for code in module.functions() {
        let _ = write!(out, "\ncode <{}>:\n", code.name);
        render_instructions(&mut out, &code.instructions, pool);
    }

    out
}

fn render_instructions(out: &mut String, instructions: &[Instruction], pool: &ConstantPool) {
    for (index, instruction) in instructions.iter().enumerate() {
        let _ = write!(out, "    {:<3}{}", index, instruction);
        if instruction.opcode.references_constant() {
            if let Some(constant) = pool.get(instruction.operand as usize) {
                let _ = write!(out, "{:>8}; {}", "", constant);
            }
        } else if instruction.opcode.is_jump() {
            let _ = write!(out, "{:>8}; -> {}", "", instruction.operand);
        }
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::compile;

    #[test]
    fn test_listing_sections() {
        let compilation = compile("fn f(a) { a }").unwrap();
        let listing = disassemble(&compilation.module);
        assert!(listing.starts_with("constants:\n"));
        assert!(listing.contains("\ninitializer:\n"));
        assert!(listing.contains("\ncode <f>:\n"));
        assert!(listing.contains("build_function"));
    }

    #[test]
    fn test_constant_annotations() {
        let compilation = compile("# analysis global x\nx = 1").unwrap();
        let listing = disassemble(&compilation.module);
        assert!(listing.contains("; int 1"));
        assert!(listing.contains("; name x"));
    }

    #[test]
    fn test_jump_annotations() {
        let compilation = compile("# analysis global a\n# analysis global b\na or b").unwrap();
        let listing = disassemble(&compilation.module);
        assert!(listing.contains("jump_if_true"));
        assert!(listing.contains("; -> 5"));
    }
}
