use thiserror::Error;

/// Main error type for glossary-graph
#[derive(Error, Debug)]
pub enum GlossaryError {
    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV input (bad quoting, missing field in a row, bad UTF-8)
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from the header row
    #[error("Missing required column '{column}' in {path}")]
    MissingColumn { path: String, column: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON-RPC protocol errors
    #[error("Protocol error: {0}")]
    Protocol(String),
}

/// Convenient Result type using GlossaryError
pub type Result<T> = std::result::Result<T, GlossaryError>;
