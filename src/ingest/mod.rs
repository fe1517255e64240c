//! Startup ingestion: read `terms.csv` and `links.csv` and build the graph once.

pub mod metadata;
pub mod tables;

pub use metadata::compute_file_hash;
pub use tables::{read_relations, read_terms, RelationRow, TermRow};

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::graph::GraphEngine;

/// What was loaded, from where, and when.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub terms_path: PathBuf,
    pub links_path: PathBuf,
    /// Distinct term names after last-write-wins.
    pub term_count: usize,
    pub relation_count: usize,
    pub terms_sha256: String,
    pub links_sha256: String,
    pub loaded_at: DateTime<Utc>,
}

/// Load both tables and build the graph.
///
/// Any failure (missing file, missing column, short row) is returned before a
/// graph exists, so callers never see a partially loaded engine.
pub fn load_graph(terms_path: &Path, links_path: &Path) -> Result<(GraphEngine, LoadReport)> {
    log::info!("Loading terms from {}", terms_path.display());
    let term_rows = read_terms(terms_path)?;
    log::info!("Loading relations from {}", links_path.display());
    let relation_rows = read_relations(links_path)?;

    let terms_sha256 = compute_file_hash(terms_path)?;
    let links_sha256 = compute_file_hash(links_path)?;

    let mut builder = GraphEngine::builder();
    for row in term_rows {
        builder.add_term(row.term, row.definition);
    }
    for row in relation_rows {
        builder.add_relation(row.source, row.target, row.relation);
    }
    let engine = builder.build();

    log::info!("Loaded terms: {}", engine.term_count());
    log::info!("Loaded relations: {}", engine.relation_count());

    let report = LoadReport {
        terms_path: terms_path.to_path_buf(),
        links_path: links_path.to_path_buf(),
        term_count: engine.term_count(),
        relation_count: engine.relation_count(),
        terms_sha256,
        links_sha256,
        loaded_at: Utc::now(),
    };

    Ok((engine, report))
}
