// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Scope management for name resolution.
//!
//! Slots come from one counter shared by the whole table; they are never
//! reset when a scope is entered or left, so every symbol of a
//! compilation unit has a distinct slot.
//!
//! Scopes are kept in creation order. Analysis creates them with
//! [`SymbolTable::push_scope`]; the code generator then walks the same
//! tree in the same order and re-enters them with
//! [`SymbolTable::enter_scope`], seeing every symbol analysis recorded.

use crate::error::{Error, Result};

/// A declared name and its slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// The declared name
    pub name: String,
    /// The slot assigned at declaration
    pub slot: usize,
}

/// The symbols of one lexical block.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    symbols: Vec<Symbol>,
}

impl Scope {
    /// Creates an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a symbol.
    pub fn add(&mut self, symbol: Symbol) {
        self.symbols.push(symbol);
    }

    /// Finds the most recent symbol named `name`.
    pub fn find(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().rev().find(|s| s.name == name)
    }

    /// Finds the symbol occupying `slot`.
    pub fn find_by_slot(&self, slot: usize) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.slot == slot)
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if no symbol was declared.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterates over the symbols in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }
}

/// The global scope plus every nested scope of a compilation unit.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    active: Vec<usize>,
    next_slot: usize,
    next_entry: usize,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Creates a table holding only the global scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new()],
            active: vec![0],
            next_slot: 0,
            next_entry: 1,
        }
    }

    /// Creates a new scope nested in the current one and makes it current.
    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
        self.active.push(self.scopes.len() - 1);
    }

    /// Leaves the current scope.
    pub fn pop_scope(&mut self) -> Result<()> {
        if self.active.len() <= 1 {
            return Err(Error::internal(
                "Attempt to leave global scope. This is a compiler bug.",
            ));
        }
        self.active.pop();
        Ok(())
    }

    /// Re-enters the next scope in creation order.
    pub fn enter_scope(&mut self) -> Result<()> {
        if self.next_entry >= self.scopes.len() {
            return Err(Error::internal(format!(
                "scope {} entered but only {} were analyzed",
                self.next_entry,
                self.scopes.len() - 1
            )));
        }
        self.active.push(self.next_entry);
        self.next_entry += 1;
        Ok(())
    }

    /// Leaves a re-entered scope.
    pub fn leave_scope(&mut self) -> Result<()> {
        self.pop_scope()
    }

    /// Returns to the global scope and rewinds [`SymbolTable::enter_scope`]
    /// to the first nested scope.
    pub fn reset_cursor(&mut self) {
        self.active.truncate(1);
        self.next_entry = 1;
    }

    /// Declares `name` in the current scope with a fresh slot.
    pub fn add_symbol(&mut self, name: &str) -> usize {
        let index = self.current_index();
        self.add_to(index, name)
    }

    /// Declares `name` in the global scope with a fresh slot, whatever the
    /// current scope is.
    pub fn add_global_symbol(&mut self, name: &str) -> usize {
        self.add_to(0, name)
    }

    /// Returns the slot of `name` in the current scope, declaring it if
    /// absent.
    pub fn declare(&mut self, name: &str) -> usize {
        match self.current_scope().find(name) {
            Some(symbol) => symbol.slot,
            None => self.add_symbol(name),
        }
    }

    /// Finds `name`, searching from the innermost active scope outward.
    pub fn find_symbol(&self, name: &str) -> Option<&Symbol> {
        self.active
            .iter()
            .rev()
            .find_map(|&index| self.scopes[index].find(name))
    }

    /// The current scope.
    pub fn current_scope(&self) -> &Scope {
        &self.scopes[self.current_index()]
    }

    /// The global scope.
    pub fn global_scope(&self) -> &Scope {
        &self.scopes[0]
    }

    /// Every scope, global first, then in creation order.
    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    /// Number of active scopes, counting the global one.
    pub fn depth(&self) -> usize {
        self.active.len()
    }

    /// Number of slots handed out.
    pub fn slot_count(&self) -> usize {
        self.next_slot
    }

    fn current_index(&self) -> usize {
        self.active.last().copied().unwrap_or(0)
    }

    fn add_to(&mut self, index: usize, name: &str) -> usize {
        let slot = self.next_slot;
        self.next_slot += 1;
        self.scopes[index].add(Symbol {
            name: name.to_string(),
            slot,
        });
        tracing::trace!(name, slot, scope = index, "symbol added");
        slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_new() {
        let table = SymbolTable::new();
        assert_eq!(table.depth(), 1);
        assert!(table.global_scope().is_empty());
        assert_eq!(table.slot_count(), 0);
    }

    #[test]
    fn test_pop_global_is_internal_error() {
        let mut table = SymbolTable::new();
        let err = table.pop_scope().unwrap_err();
        assert!(err.is_internal());
        assert_eq!(
            err.to_string(),
            "Internal compiler error: Attempt to leave global scope. This is a compiler bug."
        );
    }

    #[test]
    fn test_slots_are_table_wide() {
        let mut table = SymbolTable::new();
        assert_eq!(table.add_symbol("a"), 0);
        table.push_scope();
        assert_eq!(table.add_symbol("b"), 1);
        table.pop_scope().unwrap();
        table.push_scope();
        assert_eq!(table.add_symbol("c"), 2);
        assert_eq!(table.slot_count(), 3);
    }

    #[test]
    fn test_innermost_shadows_outer() {
        let mut table = SymbolTable::new();
        table.add_symbol("a");
        table.push_scope();
        let inner = table.add_symbol("a");
        assert_eq!(table.find_symbol("a").map(|s| s.slot), Some(inner));
        table.pop_scope().unwrap();
        assert_eq!(table.find_symbol("a").map(|s| s.slot), Some(0));
    }

    #[test]
    fn test_popped_scope_is_invisible() {
        let mut table = SymbolTable::new();
        table.push_scope();
        table.add_symbol("x");
        table.pop_scope().unwrap();
        assert!(table.find_symbol("x").is_none());
    }

    #[test]
    fn test_global_symbol_from_nested_scope() {
        let mut table = SymbolTable::new();
        table.push_scope();
        table.push_scope();
        let slot = table.add_global_symbol("print");
        assert!(table.current_scope().is_empty());
        assert_eq!(table.global_scope().find("print").map(|s| s.slot), Some(slot));
        table.pop_scope().unwrap();
        table.pop_scope().unwrap();
        assert!(table.find_symbol("print").is_some());
    }

    #[test]
    fn test_declare_is_idempotent_per_scope() {
        let mut table = SymbolTable::new();
        let a = table.declare("a");
        assert_eq!(table.declare("a"), a);
        table.push_scope();
        assert_ne!(table.declare("a"), a);
    }

    #[test]
    fn test_reenter_scopes_in_creation_order() {
        let mut table = SymbolTable::new();
        table.push_scope();
        table.add_symbol("first");
        table.pop_scope().unwrap();
        table.push_scope();
        table.add_symbol("second");
        table.pop_scope().unwrap();

        table.reset_cursor();
        table.enter_scope().unwrap();
        assert!(table.find_symbol("first").is_some());
        assert!(table.find_symbol("second").is_none());
        table.leave_scope().unwrap();
        table.enter_scope().unwrap();
        assert!(table.find_symbol("second").is_some());
        table.leave_scope().unwrap();
        assert!(table.enter_scope().unwrap_err().is_internal());
    }

    #[test]
    fn test_find_by_slot() {
        let mut scope = Scope::new();
        scope.add(Symbol {
            name: "x".to_string(),
            slot: 4,
        });
        assert_eq!(scope.find_by_slot(4).map(|s| s.name.as_str()), Some("x"));
        assert!(scope.find_by_slot(5).is_none());
    }
}
