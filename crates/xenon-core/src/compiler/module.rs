// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Compiled modules and their constant pools.

use std::fmt;
use std::hash::{Hash, Hasher};

use num_bigint::BigInt;
use rustc_hash::FxHashMap;

use super::bytecode::Bytecode;
use super::emitter::Emitter;

/// A compile-time object stored in the constant pool.
#[derive(Debug, Clone)]
pub enum Constant {
    /// An identifier, referenced by load and store instructions
    Name(String),
    /// A string literal or parameter name
    String(String),
    /// A binary string literal
    Bytes(Vec<u8>),
    /// An integer literal
    Integer(BigInt),
    /// A float literal
    Float(f64),
    /// A compiled function body
    Code(Bytecode),
}

impl PartialEq for Constant {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Constant::Name(a), Constant::Name(b)) => a == b,
            (Constant::String(a), Constant::String(b)) => a == b,
            (Constant::Bytes(a), Constant::Bytes(b)) => a == b,
            (Constant::Integer(a), Constant::Integer(b)) => a == b,
            // Bitwise, so NaN equals itself and 0.0 differs from -0.0
            (Constant::Float(a), Constant::Float(b)) => a.to_bits() == b.to_bits(),
            (Constant::Code(a), Constant::Code(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Constant {}

impl Hash for Constant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Constant::Name(s) | Constant::String(s) => s.hash(state),
            Constant::Bytes(b) => b.hash(state),
            Constant::Integer(i) => i.hash(state),
            Constant::Float(f) => f.to_bits().hash(state),
            Constant::Code(code) => code.hash(state),
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Name(name) => write!(f, "name {}", name),
            Constant::String(s) => write!(f, "string {:?}", s),
            Constant::Bytes(bytes) => write!(f, "bytes {:?}", String::from_utf8_lossy(bytes)),
            Constant::Integer(i) => write!(f, "int {}", i),
            Constant::Float(x) => write!(f, "float {:?}", x),
            Constant::Code(code) => write!(f, "code <{}> ({} instructions)", code.name, code.len()),
        }
    }
}

/// An ordered, deduplicated table of constants.
#[derive(Debug, Clone, Default)]
pub struct ConstantPool {
    constants: Vec<Constant>,
    index: FxHashMap<Constant, usize>,
}

impl ConstantPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index of `constant`, appending it if no equal constant
    /// is present yet.
    pub fn define(&mut self, constant: Constant) -> usize {
        if let Some(&index) = self.index.get(&constant) {
            return index;
        }
        let index = self.constants.len();
        self.index.insert(constant.clone(), index);
        self.constants.push(constant);
        index
    }

    /// Looks up a constant by index.
    pub fn get(&self, index: usize) -> Option<&Constant> {
        self.constants.get(index)
    }

    /// Number of constants.
    pub fn len(&self) -> usize {
        self.constants.len()
    }

    /// Returns true if the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }

    /// Iterates over the constants in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, Constant> {
        self.constants.iter()
    }
}

/// The result of compiling one source unit.
#[derive(Debug, Clone, Default)]
pub struct Module {
    pub(crate) constants: ConstantPool,
    pub(crate) initializer: Emitter,
}

impl Module {
    /// Creates an empty module.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the pool index of `constant`, adding it if needed.
    pub fn define_constant(&mut self, constant: Constant) -> usize {
        self.constants.define(constant)
    }

    /// The constant pool.
    pub fn constants(&self) -> &ConstantPool {
        &self.constants
    }

    /// The top-level code.
    pub fn initializer(&self) -> &Emitter {
        &self.initializer
    }

    /// Every compiled function body in the pool, in pool order.
    pub fn functions(&self) -> impl Iterator<Item = &Bytecode> {
        self.constants.iter().filter_map(|constant| match constant {
            Constant::Code(code) => Some(code),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::bytecode::{Instruction, OpCode};

    #[test]
    fn test_define_deduplicates_by_value() {
        let mut pool = ConstantPool::new();
        let a = pool.define(Constant::String("hello".to_string()));
        let b = pool.define(Constant::Integer(BigInt::from(7)));
        let c = pool.define(Constant::String("hello".to_string()));
        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_name_and_string_are_distinct() {
        let mut pool = ConstantPool::new();
        let name = pool.define(Constant::Name("x".to_string()));
        let string = pool.define(Constant::String("x".to_string()));
        assert_ne!(name, string);
    }

    #[test]
    fn test_float_equality_is_bitwise() {
        let mut pool = ConstantPool::new();
        let nan = pool.define(Constant::Float(f64::NAN));
        assert_eq!(pool.define(Constant::Float(f64::NAN)), nan);
        let zero = pool.define(Constant::Float(0.0));
        assert_ne!(pool.define(Constant::Float(-0.0)), zero);
    }

    #[test]
    fn test_code_constants_deduplicate() {
        let code = || {
            Constant::Code(Bytecode::new(
                "f",
                vec![Instruction::simple(OpCode::LoadNull)],
            ))
        };
        let mut module = Module::new();
        let a = module.define_constant(code());
        let b = module.define_constant(code());
        assert_eq!(a, b);
        assert_eq!(module.functions().count(), 1);
    }

    #[test]
    fn test_constant_display() {
        assert_eq!(Constant::Name("x".to_string()).to_string(), "name x");
        assert_eq!(Constant::String("a\n".to_string()).to_string(), "string \"a\\n\"");
        assert_eq!(Constant::Float(1.0).to_string(), "float 1.0");
        assert_eq!(Constant::Bytes(b"ab".to_vec()).to_string(), "bytes \"ab\"");
    }
}
