//flat symbol table, one namespace for the whole program
//regardless of block nesting, each entry remembers the block it was declared in

use crate::ast::VarType;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub var_type: VarType,
    pub has_value: bool,
    // block path of the declaration, the name is only reachable inside it
    pub scope: Vec<usize>,
}

impl SymbolEntry {
    pub fn visible_from(&self, scope: &[usize]) -> bool {
        scope.starts_with(&self.scope)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlreadyDeclared;

#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: HashMap<String, SymbolEntry>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(
        &mut self,
        name: &str,
        var_type: VarType,
        has_value: bool,
        scope: &[usize],
    ) -> Result<(), AlreadyDeclared> {
        if self.entries.contains_key(name) {
            return Err(AlreadyDeclared);
        }
        self.entries.insert(
            name.to_string(),
            SymbolEntry {
                var_type,
                has_value,
                scope: scope.to_vec(),
            },
        );
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&SymbolEntry> {
        self.entries.get(name)
    }

    // A loop variable taken over by a later loop lives in that loop's block
    pub fn move_to_scope(&mut self, name: &str, scope: &[usize]) -> bool {
        match self.entries.get_mut(name) {
            Some(entry) => {
                entry.scope = scope.to_vec();
                true
            }
            None => false,
        }
    }

    // Returns false when the name was never declared
    pub fn mark_assigned(&mut self, name: &str) -> bool {
        match self.entries.get_mut(name) {
            Some(entry) => {
                entry.has_value = true;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
