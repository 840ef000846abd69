//! Dataset files: article collections, raw HTML pages and result tables

pub mod loader;
pub mod tsv;

pub use loader::{load_articles, load_extractions, load_html, write_articles};
pub use tsv::{TsvError, TsvRow, TsvTable};

use std::path::PathBuf;

/// Errors raised while reading or writing dataset files
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid article collection {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid table {path}: {source}")]
    Tsv {
        path: PathBuf,
        #[source]
        source: TsvError,
    },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }
}
