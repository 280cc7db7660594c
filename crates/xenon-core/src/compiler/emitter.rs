// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Instruction buffers and jump labels.
//!
//! Jumps are emitted against a [`Label`] before the target is known. The
//! emitter remembers which instruction refers to which label, and
//! [`Emitter::resolve`] rewrites those operands once the whole body has
//! been emitted:
//!
//! ```text
//! emit_label(JumpIfFalse, L1)   // 0: jump_if_false <placeholder>
//! emit(...)                     // 1
//! set_label_position(L1)        // L1 = 2
//! emit(...)                     // 2
//! resolve()                     // 0: jump_if_false 2
//! ```

use std::fmt;

use rustc_hash::FxHashMap;

use super::bytecode::{Bytecode, Instruction, OpCode};
use crate::error::{Error, Result};

/// Operand carried by a jump until its label is resolved.
pub const LABEL_PLACEHOLDER: u32 = u32::MAX;

/// A jump target inside one emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label {
    id: u32,
}

impl Label {
    /// The label's id, unique within its compilation session.
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.id)
    }
}

/// Hands out session-unique label ids.
#[derive(Debug, Default)]
pub struct LabelGenerator {
    next: u32,
}

impl LabelGenerator {
    /// Creates a generator starting at id 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh label.
    pub fn next_label(&mut self) -> Label {
        let label = Label { id: self.next };
        self.next += 1;
        label
    }

    /// Number of labels handed out so far.
    pub fn count(&self) -> u32 {
        self.next
    }
}

/// The append-only instruction buffer of one function body or module
/// initializer.
#[derive(Debug, Clone, Default)]
pub struct Emitter {
    instructions: Vec<Instruction>,
    pending: FxHashMap<usize, Label>,
    positions: FxHashMap<Label, usize>,
    resolved: bool,
}

impl Emitter {
    /// Creates an empty emitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an instruction without an operand.
    pub fn emit(&mut self, opcode: OpCode) -> usize {
        self.push(Instruction::simple(opcode))
    }

    /// Appends an instruction with an operand.
    pub fn emit_with(&mut self, opcode: OpCode, operand: u32) -> usize {
        self.push(Instruction::new(opcode, operand))
    }

    /// Appends an instruction whose operand becomes the position of
    /// `label` on [`Emitter::resolve`].
    pub fn emit_label(&mut self, opcode: OpCode, label: Label) -> usize {
        let index = self.instructions.len();
        self.pending.insert(index, label);
        self.push(Instruction::new(opcode, LABEL_PLACEHOLDER))
    }

    /// Positions `label` at the next instruction to be emitted.
    pub fn set_label_position(&mut self, label: Label) {
        self.positions.insert(label, self.instructions.len());
    }

    /// Rewrites every label reference to its position. Must run exactly
    /// once, after the last instruction was emitted.
    pub fn resolve(&mut self) -> Result<()> {
        if self.resolved {
            return Err(Error::internal("emitter resolved twice"));
        }

        let mut pending: Vec<_> = self.pending.drain().collect();
        pending.sort_unstable();

        for (index, label) in pending {
            let position = self.positions.get(&label).ok_or_else(|| {
                Error::internal(format!("label {} was never positioned", label))
            })?;
            let instruction = self.instructions.get_mut(index).ok_or_else(|| {
                Error::internal(format!("label {} refers to missing instruction {}", label, index))
            })?;
            instruction.operand = *position as u32;
        }

        self.resolved = true;
        tracing::trace!(instructions = self.instructions.len(), "emitter resolved");
        Ok(())
    }

    /// Returns true once [`Emitter::resolve`] has run.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// The instructions emitted so far.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Converts a resolved emitter into bytecode.
    pub fn into_bytecode(self, name: impl Into<String>) -> Result<Bytecode> {
        if !self.resolved {
            return Err(Error::internal("bytecode taken from an unresolved emitter"));
        }
        Ok(Bytecode::new(name, self.instructions))
    }

    fn push(&mut self, instruction: Instruction) -> usize {
        debug_assert!(!self.resolved, "emit after resolve");
        let index = self.instructions.len();
        tracing::trace!(index, %instruction, "emit");
        self.instructions.push(instruction);
        index
    }
}
