//! Term storage keyed by name.

use std::collections::HashMap;

use crate::graph::Term;

/// Name → definition store.
///
/// Iteration follows the position where each name was first seen; a later
/// `put` for the same name replaces the definition in place.
#[derive(Debug, Default)]
pub struct TermStore {
    terms: Vec<Term>,
    index: HashMap<String, usize>,
}

impl TermStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a term, or overwrite the definition of an existing one (last write wins).
    pub fn put(&mut self, name: impl Into<String>, definition: impl Into<String>) {
        let name = name.into();
        let definition = definition.into();
        match self.index.get(&name) {
            Some(&pos) => self.terms[pos].definition = definition,
            None => {
                self.index.insert(name.clone(), self.terms.len());
                self.terms.push(Term { name, definition });
            }
        }
    }

    /// Exact-match lookup. No trimming or case folding.
    pub fn get(&self, name: &str) -> Option<&Term> {
        self.index.get(name).map(|&pos| &self.terms[pos])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Every stored term, one per distinct name.
    pub fn all(&self) -> &[Term] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
