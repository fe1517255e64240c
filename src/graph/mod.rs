//! Glossary graph: term storage, bidirectional relation index and BFS path search.
//!
//! The graph is built once at startup (see [`crate::ingest`]) and then shared
//! read-only behind an `Arc<GraphEngine>` by every query worker.

mod engine;
mod path;
mod relations;
mod stats;
mod terms;

pub use engine::{
    GraphBuilder, GraphEngine, RelationListing, TermListing, TermLookup, DEFAULT_PATH_DEPTH,
    DEFAULT_RELATION_DEPTH,
};
pub use path::{find_path, PathResult};
pub use relations::RelationIndex;
pub use stats::{GraphStats, TopTerm};
pub use terms::TermStore;

use serde::{Deserialize, Serialize};

/// A glossary term: the vertex type of the graph, keyed by `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub name: String,
    pub definition: String,
}

/// A directed, typed relation (source --relation_type--> target).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub source: String,
    pub target: String,
    pub relation_type: String,
}

/// One adjacency entry: the term on the far side of an edge plus the edge's type.
///
/// In the forward index `neighbor` is the edge target; in the reverse index it
/// is the edge source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub neighbor: String,
    pub relation_type: String,
}
