//! Summary statistics over the glossary graph.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::graph::{RelationIndex, TermStore};

/// A term and its degree in the simple directed view of the graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopTerm {
    pub name: String,
    pub degree: usize,
}

/// Graph-wide counts.
///
/// Nodes are all term names plus every relation endpoint. Edges are distinct
/// `(source, target)` pairs: repeated relations and relation types collapse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub average_degree: f64,
    pub top_connected: Vec<TopTerm>,
    pub component_count: usize,
    pub largest_component: usize,
    pub is_connected: bool,
}

impl GraphStats {
    pub fn compute(terms: &TermStore, relations: &RelationIndex, top_n: usize) -> Self {
        let mut nodes: Vec<&str> = Vec::new();
        let mut ids: HashMap<&str, usize> = HashMap::new();

        for term in terms.all() {
            node_id(&term.name, &mut nodes, &mut ids);
        }

        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        for relation in relations.edges() {
            let s = node_id(&relation.source, &mut nodes, &mut ids);
            let t = node_id(&relation.target, &mut nodes, &mut ids);
            if seen.insert((s, t)) {
                edges.push((s, t));
            }
        }

        let node_count = nodes.len();
        let mut degree = vec![0usize; node_count];
        let mut components = DisjointSet::new(node_count);
        for &(s, t) in &edges {
            degree[s] += 1;
            degree[t] += 1;
            components.union(s, t);
        }

        let mut ranked: Vec<usize> = (0..node_count).collect();
        // Stable sort keeps node order among equal degrees.
        ranked.sort_by(|a, b| degree[*b].cmp(&degree[*a]));
        let top_connected = ranked
            .into_iter()
            .take(top_n)
            .map(|i| TopTerm {
                name: nodes[i].to_string(),
                degree: degree[i],
            })
            .collect();

        let mut sizes: HashMap<usize, usize> = HashMap::new();
        for i in 0..node_count {
            *sizes.entry(components.find(i)).or_default() += 1;
        }
        let component_count = sizes.len();

        let average_degree = if node_count == 0 {
            0.0
        } else {
            2.0 * edges.len() as f64 / node_count as f64
        };

        Self {
            node_count,
            edge_count: edges.len(),
            average_degree,
            top_connected,
            component_count,
            largest_component: sizes.values().copied().max().unwrap_or(0),
            is_connected: component_count == 1,
        }
    }
}

fn node_id<'a>(name: &'a str, nodes: &mut Vec<&'a str>, ids: &mut HashMap<&'a str, usize>) -> usize {
    *ids.entry(name).or_insert_with(|| {
        nodes.push(name);
        nodes.len() - 1
    })
}

struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            self.parent[rb] = ra;
        }
    }
}
