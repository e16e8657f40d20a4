use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Statement formats accepted at the upload boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatementKind {
    /// Bank-issued PDF. No text extraction yet; served by the demo statement.
    Pdf,
    /// `date,description,amount` export
    Csv,
    /// Text already extracted from a statement, one transaction per line
    Text,
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("unsupported file type: {} (expected a PDF, CSV or extracted-text statement)", .0.display())]
    UnsupportedFile(PathBuf),

    #[error("reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {kind:?} statement: {source}")]
    Parse {
        kind: StatementKind,
        #[source]
        source: anyhow::Error,
    },

    #[error("no transactions found in {}", .0.display())]
    Empty(PathBuf),
}
