use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by table loading and dump ingestion. Unresolvable
/// prices and malformed individual entries are not errors; they are skipped
/// where they occur.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("missing required table: {} ({hint})", path.display())]
    MissingTable { path: PathBuf, hint: &'static str },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode {}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("price dump fetch failed")]
    Fetch(#[from] reqwest::Error),

    #[error("price dump has an unexpected shape")]
    DumpFormat(#[source] serde_json::Error),
}
