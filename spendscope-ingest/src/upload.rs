//! Upload boundary: validate the file type, then hand off to the matching parser.

use spendscope_core::RawTransaction;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::demo::demo_statement_after;
use crate::parsers::{parse_csv_reader, parse_statement_text};
use crate::types::{IngestError, StatementKind};

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Simulated processing time before a PDF's demo statement is returned
    pub processing_delay: Duration,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            processing_delay: Duration::from_millis(2000),
        }
    }
}

/// Decide the statement kind from content first, extension second.
pub fn detect_kind(path: &Path, contents: &[u8]) -> Result<StatementKind, IngestError> {
    if contents.starts_with(PDF_MAGIC) {
        return Ok(StatementKind::Pdf);
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("csv") => Ok(StatementKind::Csv),
        Some("txt") => Ok(StatementKind::Text),
        // A .pdf without the PDF header is not a PDF
        _ => Err(IngestError::UnsupportedFile(path.to_path_buf())),
    }
}

/// Read, validate and parse a statement file into raw transactions.
pub async fn load_statement(
    path: impl AsRef<Path>,
    opts: &LoadOptions,
) -> Result<Vec<RawTransaction>, IngestError> {
    let path = path.as_ref();
    let contents = tokio::fs::read(path).await.map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let kind = detect_kind(path, &contents)?;
    info!(path = %path.display(), ?kind, "loading statement");

    let txns = match kind {
        StatementKind::Pdf => {
            warn!("PDF text extraction is not available; using the demo statement");
            demo_statement_after(opts.processing_delay).await
        }
        StatementKind::Csv => parse_csv_reader(contents.as_slice())
            .map_err(|source| IngestError::Parse { kind, source })?,
        StatementKind::Text => parse_statement_text(&String::from_utf8_lossy(&contents))
            .map_err(|source| IngestError::Parse { kind, source })?,
    };

    if txns.is_empty() {
        return Err(IngestError::Empty(path.to_path_buf()));
    }
    Ok(txns)
}
