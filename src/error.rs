//! Typed errors for the indexing and search pipeline.
//!
//! Library code returns these so callers can tell a corrupt index apart from
//! an I/O problem or a rejected query. The CLI wraps them in `anyhow`.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures while reading or validating an index in the JSON exchange format.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("malformed index data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid index token {token:?}: expected exactly 2 characters")]
    InvalidToken { token: String },

    #[error("index token {token:?} appears more than once")]
    DuplicateToken { token: String },

    #[error("index token {token:?} refers to record {position}, but the dataset has {record_count} records")]
    PositionOutOfRange {
        token: String,
        position: u32,
        record_count: usize,
    },

    #[error("cannot index {count} records: positions are limited to u32")]
    TooManyRecords { count: usize },

    #[error("failed to access index file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl IndexError {
    /// Attach `path` to a serde_json failure that came from the underlying
    /// reader or writer; anything else is a shape or syntax problem.
    pub(crate) fn from_json_at(err: serde_json::Error, path: &Path) -> Self {
        if err.is_io() {
            IndexError::Io {
                path: path.to_path_buf(),
                source: err.into(),
            }
        } else {
            IndexError::Malformed(err)
        }
    }
}

/// Rejected search input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("query must be at least 2 characters long (got {len})")]
    TooShort { len: usize },
}

/// Failures while loading the tabular dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("required column {0:?} is missing from the header")]
    MissingColumn(String),

    #[error("row {row} has {found} fields, header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unterminated quoted field starting on row {row}")]
    UnterminatedQuote { row: usize },

    #[error("the dataset has no header row")]
    MissingHeader,

    #[error("unknown text encoding {0:?}")]
    UnknownEncoding(String),

    #[error("input is not valid {encoding}")]
    Decode { encoding: &'static str },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failures while assembling a search session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Index(#[from] IndexError),
}
