//! Query facade over the loaded glossary graph.

use crate::graph::path::{find_path, PathResult};
use crate::graph::{GraphStats, Relation, RelationIndex, Term, TermStore};

/// Depth substituted when a relation query supplies a non-positive depth.
pub const DEFAULT_RELATION_DEPTH: usize = 1;

/// Depth substituted when a path query supplies a non-positive depth.
pub const DEFAULT_PATH_DEPTH: usize = 10;

/// Result of a single term lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermLookup {
    Found(Term),
    NotFound,
}

/// Every stored term plus the count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermListing {
    pub terms: Vec<Term>,
    pub total_count: usize,
}

/// Relations touching one term plus the count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationListing {
    pub relations: Vec<Relation>,
    pub total_count: usize,
}

/// Read-only query surface over a fully loaded graph.
///
/// Construct it through [`GraphEngine::builder`] (or [`crate::ingest::load_graph`]);
/// once built there is no way to mutate it, so it can be shared freely behind an `Arc`.
#[derive(Debug, Default)]
pub struct GraphEngine {
    terms: TermStore,
    relations: RelationIndex,
}

/// Load-time handle that owns the stores while rows are being added.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    terms: TermStore,
    relations: RelationIndex,
}

impl GraphBuilder {
    pub fn add_term(&mut self, name: impl Into<String>, definition: impl Into<String>) -> &mut Self {
        self.terms.put(name, definition);
        self
    }

    pub fn add_relation(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        relation_type: impl Into<String>,
    ) -> &mut Self {
        self.relations.add_edge(source, target, relation_type);
        self
    }

    pub fn build(self) -> GraphEngine {
        GraphEngine {
            terms: self.terms,
            relations: self.relations,
        }
    }
}

impl GraphEngine {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// Build from already-extracted rows: `(term, definition)` and `(source, target, relation)`.
    pub fn from_rows<T, R>(terms: T, relations: R) -> Self
    where
        T: IntoIterator<Item = (String, String)>,
        R: IntoIterator<Item = (String, String, String)>,
    {
        let mut builder = Self::builder();
        for (name, definition) in terms {
            builder.add_term(name, definition);
        }
        for (source, target, relation_type) in relations {
            builder.add_relation(source, target, relation_type);
        }
        builder.build()
    }

    pub fn get_term(&self, name: &str) -> TermLookup {
        match self.terms.get(name) {
            Some(term) => TermLookup::Found(term.clone()),
            None => TermLookup::NotFound,
        }
    }

    pub fn all_terms(&self) -> TermListing {
        let terms = self.terms.all().to_vec();
        TermListing {
            total_count: terms.len(),
            terms,
        }
    }

    /// Immediate relations of `name`, outgoing first then incoming.
    ///
    /// `max_depth` is normalised (non-positive becomes 1) but only direct
    /// neighbours are ever listed.
    pub fn term_relations(&self, name: &str, max_depth: i32) -> RelationListing {
        let depth = positive_or(max_depth, DEFAULT_RELATION_DEPTH);
        log::debug!("Listing relations of '{}' (depth {})", name, depth);

        let relations = self.relations.relations_of(name);
        RelationListing {
            total_count: relations.len(),
            relations,
        }
    }

    /// Shortest hop path between two terms; non-positive `max_depth` becomes 10.
    pub fn find_path(&self, source: &str, target: &str, max_depth: i32) -> PathResult {
        let depth = positive_or(max_depth, DEFAULT_PATH_DEPTH);
        find_path(&self.terms, &self.relations, source, target, depth)
    }

    /// Graph statistics; non-positive `top_n` becomes 5.
    pub fn stats(&self, top_n: i32) -> GraphStats {
        GraphStats::compute(&self.terms, &self.relations, positive_or(top_n, 5))
    }

    pub fn terms(&self) -> &TermStore {
        &self.terms
    }

    pub fn relations(&self) -> &RelationIndex {
        &self.relations
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn relation_count(&self) -> usize {
        self.relations.edge_count()
    }
}

/// Non-positive values select `default`.
fn positive_or(requested: i32, default: usize) -> usize {
    if requested <= 0 {
        default
    } else {
        requested as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> String {
        v.to_string()
    }

    fn abc() -> GraphEngine {
        GraphEngine::from_rows(
            vec![(s("A"), s("defA")), (s("B"), s("defB")), (s("C"), s("defC"))],
            vec![(s("A"), s("B"), s("uses")), (s("B"), s("C"), s("implements"))],
        )
    }

    fn rel(source: &str, target: &str, relation_type: &str) -> Relation {
        Relation {
            source: s(source),
            target: s(target),
            relation_type: s(relation_type),
        }
    }

    #[test]
    fn test_get_term() {
        let engine = abc();
        assert_eq!(
            engine.get_term("B"),
            TermLookup::Found(Term { name: s("B"), definition: s("defB") })
        );
        assert_eq!(engine.get_term("Z"), TermLookup::NotFound);
        assert_eq!(engine.get_term(""), TermLookup::NotFound);
    }

    #[test]
    fn test_lookup_returns_last_definition() {
        let engine = GraphEngine::from_rows(
            vec![(s("A"), s("old")), (s("B"), s("b")), (s("A"), s("new"))],
            Vec::new(),
        );
        assert_eq!(
            engine.get_term("A"),
            TermLookup::Found(Term { name: s("A"), definition: s("new") })
        );
        assert_eq!(engine.all_terms().total_count, 2);
    }

    #[test]
    fn test_all_terms() {
        let listing = abc().all_terms();
        assert_eq!(listing.total_count, 3);
        assert_eq!(listing.terms.len(), 3);
        assert_eq!(listing.terms[0].name, "A");
    }

    #[test]
    fn test_term_relations_shape() {
        let engine = abc();
        let listing = engine.term_relations("B", 0);
        assert_eq!(listing.total_count, 2);
        assert_eq!(
            listing.relations,
            vec![rel("B", "C", "implements"), rel("A", "B", "uses")]
        );
    }

    #[test]
    fn test_term_relations_ignores_depth() {
        let engine = abc();
        assert_eq!(engine.term_relations("A", 1), engine.term_relations("A", 5));
        assert_eq!(engine.term_relations("A", -3).total_count, 1);
        assert_eq!(engine.term_relations("Z", 1).total_count, 0);
    }

    #[test]
    fn test_find_path_scenarios() {
        let engine = abc();

        let result = engine.find_path("A", "C", 10);
        assert!(result.path_exists());
        assert_eq!(result.path(), &[s("A"), s("B"), s("C")]);

        let result = engine.find_path("C", "A", 10);
        assert_eq!(result.path(), &[s("C"), s("B"), s("A")]);

        let result = engine.find_path("A", "Z", 10);
        assert!(!result.path_exists());
        assert_eq!(result, PathResult::UnknownTerm);
    }

    #[test]
    fn test_find_path_default_depth() {
        // A chain of 11 terms: 10 hops fits the default bound, the explicit bound of 9 does not.
        let names: Vec<String> = (0..11).map(|i| format!("T{}", i)).collect();
        let terms = names.iter().map(|n| (n.clone(), s("")));
        let edges = names.windows(2).map(|w| (w[0].clone(), w[1].clone(), s("next")));
        let engine = GraphEngine::from_rows(terms, edges);

        assert!(engine.find_path("T0", "T10", 0).path_exists());
        assert!(engine.find_path("T0", "T10", -1).path_exists());
        assert!(!engine.find_path("T0", "T10", 9).path_exists());
    }

    #[test]
    fn test_counts_and_stats() {
        let engine = abc();
        assert_eq!(engine.term_count(), 3);
        assert_eq!(engine.relation_count(), 2);

        let stats = engine.stats(0);
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.top_connected[0].name, "B");
    }

    #[test]
    fn test_builder_chaining() {
        let mut builder = GraphEngine::builder();
        builder
            .add_term("X", "x")
            .add_term("Y", "y")
            .add_relation("X", "Y", "links");
        let engine = builder.build();

        assert!(engine.find_path("Y", "X", 1).path_exists());
    }
}
