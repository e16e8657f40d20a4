//! spendscope-ingest: statement upload validation, CSV/text parsers, and the demo statement.

pub mod demo;
pub mod parsers;
pub mod types;
pub mod upload;

pub use demo::demo_statement;
pub use types::{IngestError, StatementKind};
pub use upload::{LoadOptions, detect_kind, load_statement};
