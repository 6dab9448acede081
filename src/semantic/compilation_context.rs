//state shared by all semantic actions of one compilation:
//symbol table, deferred-use worklist, block nesting and diagnostics

use super::pending_uses::{AssignmentLog, PendingUses};
use super::semantic_error::SemanticError;
use super::symbol_table::SymbolTable;
use crate::ast::Identifier;
use std::collections::HashSet;

#[derive(Debug)]
pub struct CompilationContext {
    pub(crate) symbols: SymbolTable,
    pub(crate) pending: PendingUses,
    pub(crate) assignments: AssignmentLog,
    pub(crate) loop_variables: HashSet<String>,
    pub(crate) active_loops: Vec<String>,
    diagnostics: Vec<SemanticError>,
    scope_path: Vec<usize>,
    next_scope: usize,
    step: usize,
}

impl Default for CompilationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl CompilationContext {
    pub fn new() -> Self {
        Self {
            symbols: SymbolTable::new(),
            pending: PendingUses::default(),
            assignments: AssignmentLog::default(),
            loop_variables: HashSet::new(),
            active_loops: Vec::new(),
            diagnostics: Vec::new(),
            scope_path: vec![0],
            next_scope: 1,
            step: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn diagnostics(&self) -> &[SemanticError] {
        &self.diagnostics
    }

    pub(crate) fn push_diagnostic(&mut self, error: SemanticError) {
        tracing::debug!(%error, "semantic diagnostic");
        self.diagnostics.push(error);
    }

    // Every reduction gets a sequence number, uses and assignments are ordered by it
    pub(crate) fn next_step(&mut self) -> usize {
        self.step += 1;
        self.step
    }

    pub(crate) fn step(&self) -> usize {
        self.step
    }

    pub(crate) fn scope_path(&self) -> &[usize] {
        &self.scope_path
    }

    pub(crate) fn open_scope(&mut self) {
        self.scope_path.push(self.next_scope);
        self.next_scope += 1;
    }

    pub(crate) fn close_scope(&mut self) {
        if self.scope_path.len() > 1 {
            self.scope_path.pop();
        }
    }

    pub(crate) fn record_use(&mut self, ident: &Identifier) {
        self.pending.record(ident, self.step, &self.scope_path);
    }

    pub(crate) fn record_assignment(&mut self, name: &str) {
        self.symbols.mark_assigned(name);
        self.assignments.record(name, self.step, &self.scope_path);
    }
}
