use sha2::{Digest, Sha256};
use std::path::Path;

use crate::error::{GlossaryError, Result};

/// Compute SHA256 hash of file content (hex encoded)
pub fn compute_file_hash(path: &Path) -> Result<String> {
    let content = std::fs::read(path).map_err(GlossaryError::Io)?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    let hash = hasher.finalize();
    Ok(format!("{:x}", hash))
}
