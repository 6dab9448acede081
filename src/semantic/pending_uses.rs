//worklist of variable uses that can only be validated once the whole
//program has been reduced, plus the log of assignment sites they are checked against

use crate::ast::{Identifier, VarType};
use crate::lexer_tokenizer::Span;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    Any,
    Type(VarType),
    // both sides of an equality were unresolved, the other side's name
    SameAs(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingUse {
    pub name: String,
    pub span: Span,
    pub step: usize,
    pub scope: Vec<usize>,
    pub expected: Expected,
}

#[derive(Debug, Default)]
pub struct PendingUses {
    entries: Vec<PendingUse>,
}

impl PendingUses {
    pub fn record(&mut self, ident: &Identifier, step: usize, scope: &[usize]) {
        self.entries.push(PendingUse {
            name: ident.name.clone(),
            span: ident.span,
            step,
            scope: scope.to_vec(),
            expected: Expected::Any,
        });
    }

    // Narrows the expectation of an already recorded use
    pub fn expect(&mut self, ident: &Identifier, expected: Expected) {
        let entry = self
            .entries
            .iter_mut()
            .rev()
            .find(|e| e.name == ident.name && e.span == ident.span);
        if let Some(entry) = entry {
            if entry.expected == Expected::Any {
                entry.expected = expected;
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingUse> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentSite {
    pub step: usize,
    pub scope: Vec<usize>,
}

impl AssignmentSite {
    // The site covers a use reduced later in the same block or a nested one
    pub fn dominates(&self, pending: &PendingUse) -> bool {
        self.step < pending.step && pending.scope.starts_with(&self.scope)
    }
}

#[derive(Debug, Default)]
pub struct AssignmentLog {
    sites: HashMap<String, Vec<AssignmentSite>>,
}

impl AssignmentLog {
    pub fn record(&mut self, name: &str, step: usize, scope: &[usize]) {
        self.sites
            .entry(name.to_string())
            .or_default()
            .push(AssignmentSite {
                step,
                scope: scope.to_vec(),
            });
    }

    pub fn covers(&self, pending: &PendingUse) -> bool {
        self.sites
            .get(&pending.name)
            .is_some_and(|sites| sites.iter().any(|site| site.dominates(pending)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str, start: usize) -> Identifier {
        Identifier::new(name, Span::new(start, start + name.len()))
    }

    #[test]
    fn expect_refines_matching_use_only_once() {
        let mut uses = PendingUses::default();
        uses.record(&ident("x", 0), 1, &[0]);
        uses.record(&ident("x", 10), 2, &[0]);

        uses.expect(&ident("x", 10), Expected::Type(VarType::Bool));
        uses.expect(&ident("x", 10), Expected::Type(VarType::Int));

        let expected: Vec<_> = uses.iter().map(|u| u.expected.clone()).collect();
        assert_eq!(expected, vec![Expected::Any, Expected::Type(VarType::Bool)]);
    }

    #[test]
    fn assignment_in_enclosing_block_dominates() {
        let mut log = AssignmentLog::default();
        log.record("x", 3, &[0]);
        let mut uses = PendingUses::default();
        uses.record(&ident("x", 0), 7, &[0, 2]);
        let pending = uses.iter().next().unwrap();
        assert!(log.covers(pending));
    }

    #[test]
    fn assignment_in_sibling_block_does_not_dominate() {
        let mut log = AssignmentLog::default();
        log.record("x", 3, &[0, 1]);
        let mut uses = PendingUses::default();
        uses.record(&ident("x", 0), 7, &[0]);
        uses.record(&ident("x", 5), 8, &[0, 2]);
        assert!(uses.iter().all(|u| !log.covers(u)));
    }

    #[test]
    fn later_assignment_does_not_dominate() {
        let mut log = AssignmentLog::default();
        log.record("x", 9, &[0]);
        let mut uses = PendingUses::default();
        uses.record(&ident("x", 0), 4, &[0]);
        assert!(!log.covers(uses.iter().next().unwrap()));
    }
}
