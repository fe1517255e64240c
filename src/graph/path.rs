//! Depth-bounded breadth-first path search.
//!
//! Hops may follow a relation in its stored direction or against it, so
//! connectivity is undirected while each relation keeps its own direction.

use std::collections::HashSet;

use crate::graph::{RelationIndex, TermStore};

/// Outcome of a path search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathResult {
    /// Source or target is not a known term.
    UnknownTerm,
    /// Source and target are the same term; no traversal happened.
    Trivial { path: Vec<String> },
    /// Shortest hop path from source to target, both ends included.
    Found { path: Vec<String> },
    /// No path within the depth bound.
    NotFound,
}

impl PathResult {
    pub fn path_exists(&self) -> bool {
        matches!(self, PathResult::Trivial { .. } | PathResult::Found { .. })
    }

    /// The path, or an empty slice when none exists.
    pub fn path(&self) -> &[String] {
        match self {
            PathResult::Trivial { path } | PathResult::Found { path } => path.as_slice(),
            PathResult::UnknownTerm | PathResult::NotFound => &[],
        }
    }

    pub fn into_path(self) -> Vec<String> {
        match self {
            PathResult::Trivial { path } | PathResult::Found { path } => path,
            PathResult::UnknownTerm | PathResult::NotFound => Vec::new(),
        }
    }

    /// Human-readable explanation sent back to callers.
    pub fn message(&self) -> &'static str {
        match self {
            PathResult::UnknownTerm => "One or both terms not found",
            PathResult::Trivial { .. } => "Terms are identical",
            PathResult::Found { .. } => "Path found",
            PathResult::NotFound => "No path found within maximum depth",
        }
    }
}

/// Find a fewest-hops path from `source` to `target` using at most `max_depth`
/// expansion rounds.
///
/// Each round expands the whole frontier in order. For every frontier entry the
/// outgoing edges are scanned before the incoming ones, and the target check
/// runs before the visited check, so ties resolve to the first discovery in
/// that order.
pub fn find_path(
    terms: &TermStore,
    relations: &RelationIndex,
    source: &str,
    target: &str,
    max_depth: usize,
) -> PathResult {
    if !terms.contains(source) || !terms.contains(target) {
        return PathResult::UnknownTerm;
    }

    if source == target {
        return PathResult::Trivial {
            path: vec![source.to_string()],
        };
    }

    let mut frontier: Vec<(&str, Vec<&str>)> = vec![(source, vec![source])];
    let mut visited: HashSet<&str> = HashSet::from([source]);
    let mut depth = 0;

    while !frontier.is_empty() && depth < max_depth {
        let mut next = Vec::new();

        for (current, path) in &frontier {
            let neighbors = relations
                .outgoing(current)
                .iter()
                .chain(relations.incoming(current))
                .map(|edge| edge.neighbor.as_str());

            for neighbor in neighbors {
                if neighbor == target {
                    let mut found: Vec<String> = path.iter().map(|s| s.to_string()).collect();
                    found.push(neighbor.to_string());
                    return PathResult::Found { path: found };
                }
                if visited.insert(neighbor) {
                    let mut extended = path.clone();
                    extended.push(neighbor);
                    next.push((neighbor, extended));
                }
            }
        }

        frontier = next;
        depth += 1;
    }

    PathResult::NotFound
}
