//! JSON-RPC query service over the glossary graph.

pub mod http;
pub mod service;
pub mod stdio;
pub mod types;

pub use http::HttpServer;
pub use service::GlossaryService;
pub use stdio::StdioServer;
