//! CSV readers for the terms and relations tables.
//!
//! Both tables carry a header row; columns are matched by name, so their order
//! is free and extra columns are ignored.

use std::fs::File;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{GlossaryError, Result};

/// Column names required in the terms table.
pub const TERM_COLUMNS: &[&str] = &["term", "definition"];

/// Column names required in the relations table.
pub const RELATION_COLUMNS: &[&str] = &["source", "target", "relation"];

/// One row of the terms table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TermRow {
    pub term: String,
    pub definition: String,
}

/// One row of the relations table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelationRow {
    pub source: String,
    pub target: String,
    pub relation: String,
}

/// Read every row of the terms table in file order.
pub fn read_terms(path: &Path) -> Result<Vec<TermRow>> {
    read_table(path, TERM_COLUMNS)
}

/// Read every row of the relations table in file order.
pub fn read_relations(path: &Path) -> Result<Vec<RelationRow>> {
    read_table(path, RELATION_COLUMNS)
}

fn read_table<T: DeserializeOwned>(path: &Path, required: &[&str]) -> Result<Vec<T>> {
    let display = path.display().to_string();

    let file = File::open(path).map_err(|e| {
        GlossaryError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to open {}: {}", display, e),
        ))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file);

    let headers = reader.headers().map_err(|source| GlossaryError::Csv {
        path: display.clone(),
        source,
    })?;
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(GlossaryError::MissingColumn {
                path: display,
                column: column.to_string(),
            });
        }
    }

    let mut rows = Vec::new();
    for record in reader.deserialize::<T>() {
        let row = record.map_err(|source| GlossaryError::Csv {
            path: display.clone(),
            source,
        })?;
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_read_terms() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "terms.csv",
            "term,definition\nAPI,Application programming interface\n\"UI, client\",\"Quoted, with comma\"\n",
        );

        let rows = read_terms(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].term, "API");
        assert_eq!(rows[1].term, "UI, client");
        assert_eq!(rows[1].definition, "Quoted, with comma");
    }

    #[test]
    fn test_columns_matched_by_name() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "links.csv",
            "relation,note,target,source\nuses,ignored,B,A\n",
        );

        let rows = read_relations(&path).unwrap();
        assert_eq!(
            rows,
            vec![RelationRow {
                source: "A".to_string(),
                target: "B".to_string(),
                relation: "uses".to_string(),
            }]
        );
    }

    #[test]
    fn test_non_ascii_terms() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "terms.csv",
            "term,definition\nИнтерпретатор UI,Компонент\n",
        );

        let rows = read_terms(&path).unwrap();
        assert_eq!(rows[0].term, "Интерпретатор UI");
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_terms(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, GlossaryError::Io(_)));
        assert!(err.to_string().contains("absent.csv"));
    }

    #[test]
    fn test_missing_column() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "links.csv", "source,target\nA,B\n");

        let err = read_relations(&path).unwrap_err();
        match err {
            GlossaryError::MissingColumn { column, .. } => assert_eq!(column, "relation"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_short_row_is_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "links.csv", "source,target,relation\nA,B,uses\nC,D\n");

        let err = read_relations(&path).unwrap_err();
        assert!(matches!(err, GlossaryError::Csv { .. }));
    }

    #[test]
    fn test_header_only() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "terms.csv", "term,definition\n");

        assert!(read_terms(&path).unwrap().is_empty());
    }
}
