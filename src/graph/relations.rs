//! Forward and reverse adjacency over typed, directed relations.

use std::collections::HashMap;

use crate::graph::{Edge, Relation};

/// Bidirectional relation index.
///
/// `forward[s]` holds `(target, type)` and `reverse[t]` holds `(source, type)`,
/// both in ingestion order. Names are opaque: an edge may reference terms that
/// are not in the [`TermStore`](crate::graph::TermStore). Duplicate edges are kept.
#[derive(Debug, Default)]
pub struct RelationIndex {
    forward: HashMap<String, Vec<Edge>>,
    reverse: HashMap<String, Vec<Edge>>,
    edges: Vec<Relation>,
}

impl RelationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `source --relation_type--> target` in both directions.
    pub fn add_edge(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        relation_type: impl Into<String>,
    ) {
        let relation = Relation {
            source: source.into(),
            target: target.into(),
            relation_type: relation_type.into(),
        };

        self.forward
            .entry(relation.source.clone())
            .or_default()
            .push(Edge {
                neighbor: relation.target.clone(),
                relation_type: relation.relation_type.clone(),
            });
        self.reverse
            .entry(relation.target.clone())
            .or_default()
            .push(Edge {
                neighbor: relation.source.clone(),
                relation_type: relation.relation_type.clone(),
            });
        self.edges.push(relation);
    }

    /// Edges leaving `name`; empty when the name has none.
    pub fn outgoing(&self, name: &str) -> &[Edge] {
        self.forward.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Edges arriving at `name`; empty when the name has none.
    pub fn incoming(&self, name: &str) -> &[Edge] {
        self.reverse.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Outgoing relations of `name` followed by its incoming relations.
    ///
    /// Every relation keeps its stored direction, so the list mixes records
    /// where `name` is the source with records where it is the target and
    /// carries no flag telling them apart.
    pub fn relations_of(&self, name: &str) -> Vec<Relation> {
        let outgoing = self.outgoing(name).iter().map(|edge| Relation {
            source: name.to_string(),
            target: edge.neighbor.clone(),
            relation_type: edge.relation_type.clone(),
        });
        let incoming = self.incoming(name).iter().map(|edge| Relation {
            source: edge.neighbor.clone(),
            target: name.to_string(),
            relation_type: edge.relation_type.clone(),
        });
        outgoing.chain(incoming).collect()
    }

    /// Every relation in ingestion order.
    pub fn edges(&self) -> &[Relation] {
        &self.edges
    }

    /// Total number of relations, duplicates included.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(source: &str, target: &str, relation_type: &str) -> Relation {
        Relation {
            source: source.to_string(),
            target: target.to_string(),
            relation_type: relation_type.to_string(),
        }
    }

    fn neighbors(edges: &[Edge]) -> Vec<(&str, &str)> {
        edges
            .iter()
            .map(|e| (e.neighbor.as_str(), e.relation_type.as_str()))
            .collect()
    }

    #[test]
    fn test_reverse_is_transpose_of_forward() {
        let mut index = RelationIndex::new();
        index.add_edge("A", "B", "uses");
        index.add_edge("A", "C", "extends");
        index.add_edge("D", "B", "uses");

        assert_eq!(neighbors(index.outgoing("A")), vec![("B", "uses"), ("C", "extends")]);
        assert_eq!(neighbors(index.incoming("B")), vec![("A", "uses"), ("D", "uses")]);
        assert_eq!(neighbors(index.incoming("C")), vec![("A", "extends")]);
        assert!(index.outgoing("B").is_empty());
    }

    #[test]
    fn test_unknown_name_is_empty() {
        let index = RelationIndex::new();
        assert!(index.outgoing("missing").is_empty());
        assert!(index.incoming("missing").is_empty());
        assert!(index.relations_of("missing").is_empty());
    }

    #[test]
    fn test_relations_of_outgoing_then_incoming() {
        let mut index = RelationIndex::new();
        index.add_edge("A", "B", "uses");
        index.add_edge("B", "C", "implements");

        assert_eq!(
            index.relations_of("B"),
            vec![rel("B", "C", "implements"), rel("A", "B", "uses")]
        );
    }

    #[test]
    fn test_relations_of_length_matches_adjacency() {
        let mut index = RelationIndex::new();
        index.add_edge("A", "B", "uses");
        index.add_edge("B", "A", "part_of");
        index.add_edge("B", "B", "self");
        index.add_edge("C", "B", "uses");

        for name in ["A", "B", "C", "Z"] {
            assert_eq!(
                index.relations_of(name).len(),
                index.outgoing(name).len() + index.incoming(name).len()
            );
        }
    }

    #[test]
    fn test_duplicates_preserved() {
        let mut index = RelationIndex::new();
        index.add_edge("A", "B", "uses");
        index.add_edge("A", "B", "uses");

        assert_eq!(index.edge_count(), 2);
        assert_eq!(index.outgoing("A").len(), 2);
        assert_eq!(index.relations_of("B").len(), 2);
    }

    #[test]
    fn test_edges_without_terms() {
        let mut index = RelationIndex::new();
        index.add_edge("ghost", "phantom", "haunts");

        assert_eq!(index.edges(), &[rel("ghost", "phantom", "haunts")]);
    }
}
