// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Bytecode definitions.

use std::fmt;

use xenon_macros::{flag_set, opcode_enum};

/// A finished instruction stream for one function body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Bytecode {
    /// Name of the function the code belongs to
    pub name: String,
    /// The resolved instructions
    pub instructions: Vec<Instruction>,
}

impl Bytecode {
    /// Creates a bytecode blob.
    pub fn new(name: impl Into<String>, instructions: Vec<Instruction>) -> Self {
        Self {
            name: name.into(),
            instructions,
        }
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if there are no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// A single bytecode instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    /// The operation code
    pub opcode: OpCode,
    /// Constant index, count, flags or jump target, depending on the opcode
    pub operand: u32,
}

impl Instruction {
    /// Creates an instruction.
    pub const fn new(opcode: OpCode, operand: u32) -> Self {
        Self { opcode, operand }
    }

    /// Creates an instruction whose operand is unused.
    pub const fn simple(opcode: OpCode) -> Self {
        Self { opcode, operand: 0 }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.opcode.has_operand() {
            write!(f, "{:<20} {}", self.opcode, self.operand)
        } else {
            write!(f, "{}", self.opcode)
        }
    }
}

opcode_enum! {
    /// Operation codes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum OpCode {
        /// No operation
        Nop = 0 => "nop",

        // Loads and stores; operand is a name constant
        /// Push a local
        LoadLocal = 1 => "load_local",
        /// Push a global
        LoadGlobal = 2 => "load_global",
        /// Push a constant
        LoadConst = 3 => "load_const",
        /// Push an attribute of the enclosing instance
        LoadAttribute = 4 => "load_attribute",
        /// Check the local against the type on top of the stack
        CastLocal = 5 => "cast_local",
        /// Build a tuple from the top `operand` values
        BuildTuple = 6 => "build_tuple",
        /// Build a function from a parameter tuple and code; operand is flags
        BuildFunction = 7 => "build_function",
        /// Store into a local
        StoreLocal = 8 => "store_local",
        /// Store into a global
        StoreGlobal = 9 => "store_global",
        /// Store into an attribute of the enclosing instance
        StoreAttribute = 10 => "store_attribute",

        // Literals and aggregates
        /// Push true
        LoadTrue = 11 => "load_true",
        /// Push false
        LoadFalse = 12 => "load_false",
        /// Push null
        LoadNull = 13 => "load_null",
        /// Build a list from the top `operand` values
        BuildList = 14 => "build_list",
        /// Call with `operand` arguments
        Invoke = 15 => "invoke",
        /// Replace the top value with one of its members
        LoadMember = 16 => "load_member",
        /// Like `LoadMember`, yielding null for a missing member
        LoadMemberOrNull = 17 => "load_member_or_null",

        // Stack and control flow; jump operands are instruction indices
        /// Pop the top value
        Pop = 18 => "pop",
        /// Duplicate the top value
        Dup = 19 => "dup",
        /// Unconditional jump
        Jump = 20 => "jump",
        /// Pop and jump if true
        JumpIfTrue = 21 => "jump_if_true",
        /// Pop and jump if false
        JumpIfFalse = 22 => "jump_if_false",
        /// Pop and jump unless null
        JumpIfNotNull = 23 => "jump_if_not_null",
        /// Return the top value
        Return = 24 => "return",

        // Binary operators
        /// Add
        Add = 25 => "add",
        /// Subtract
        Subtract = 26 => "subtract",
        /// Multiply
        Multiply = 27 => "multiply",
        /// Divide
        Divide = 28 => "divide",
        /// Modulo
        Modulo = 29 => "modulo",
        /// Left shift
        ShiftLeft = 30 => "shift_left",
        /// Right shift
        ShiftRight = 31 => "shift_right",
        /// Bitwise AND
        BitwiseAnd = 32 => "bitwise_and",
        /// Bitwise OR
        BitwiseOr = 33 => "bitwise_or",
        /// Bitwise XOR
        BitwiseXor = 34 => "bitwise_xor",
        /// Equal
        Equals = 35 => "equals",
        /// Not equal
        NotEquals = 36 => "not_equals",
        /// Greater than
        GreaterThan = 37 => "greater_than",
        /// Greater than or equal
        GreaterThanOrEqual = 38 => "greater_than_or_equal",
        /// Less than
        LessThan = 39 => "less_than",
        /// Less than or equal
        LessThanOrEqual = 40 => "less_than_or_equal",
        /// `is`
        IsCompatible = 41 => "is_compatible",
        /// `isnot`
        IsNotCompatible = 42 => "is_not_compatible",
        /// `...`
        InclusiveRange = 43 => "inclusive_range",
        /// `..`
        ExclusiveRange = 44 => "exclusive_range",

        // Unary operators
        /// Arithmetic negation
        Negate = 45 => "negate",
        /// Bitwise NOT
        BitwiseNot = 46 => "bitwise_not",
        /// Logical NOT
        LogicalNot = 47 => "logical_not",
    }
}

impl OpCode {
    /// Returns true if the operand carries meaning.
    pub fn has_operand(&self) -> bool {
        matches!(
            self,
            OpCode::LoadLocal
                | OpCode::LoadGlobal
                | OpCode::LoadConst
                | OpCode::LoadAttribute
                | OpCode::CastLocal
                | OpCode::BuildTuple
                | OpCode::BuildFunction
                | OpCode::StoreLocal
                | OpCode::StoreGlobal
                | OpCode::StoreAttribute
                | OpCode::BuildList
                | OpCode::Invoke
                | OpCode::LoadMember
                | OpCode::LoadMemberOrNull
        ) || self.is_jump()
    }

    /// Returns true if the operand is an instruction index.
    pub fn is_jump(&self) -> bool {
        matches!(
            self,
            OpCode::Jump | OpCode::JumpIfTrue | OpCode::JumpIfFalse | OpCode::JumpIfNotNull
        )
    }

    /// Returns true if the operand is a constant pool index.
    pub fn references_constant(&self) -> bool {
        matches!(
            self,
            OpCode::LoadLocal
                | OpCode::LoadGlobal
                | OpCode::LoadConst
                | OpCode::LoadAttribute
                | OpCode::CastLocal
                | OpCode::StoreLocal
                | OpCode::StoreGlobal
                | OpCode::StoreAttribute
                | OpCode::LoadMember
                | OpCode::LoadMemberOrNull
        )
    }
}

flag_set! {
    /// Traits of a built function, carried in the `BuildFunction` operand.
    pub MethodFlags: u32 {
        /// Takes a variadic argument list
        ACCEPTS_VARIADIC_ARGS = 0x01 => "AcceptsVariadicArgs",
        /// Takes keyword arguments
        ACCEPTS_KEYWORD_ARGS = 0x02 => "AcceptsKeywordArgs",
        /// Has parameters with default values
        HAS_DEFAULT_PARAMETERS = 0x04 => "HasDefaultParameters",
        /// Has parameters with type hints
        HAS_TYPE_HINTED_PARAMETERS = 0x08 => "HasTypeHintedParameters",
    }
}
