pub mod config;
pub mod error;
pub mod graph;
pub mod ingest;
pub mod rpc;

pub use config::Config;
pub use error::{GlossaryError, Result};
pub use graph::{GraphEngine, PathResult, Relation, Term};
pub use ingest::{load_graph, LoadReport};
