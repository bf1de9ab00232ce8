//! Serialization of the index into its JSON exchange format.
//!
//! The format is a single object: keys are 2-character tokens, values are
//! arrays of record positions. Tokens are written in sorted order and
//! positions ascending so the same index always produces the same bytes.
//! Non-ASCII tokens are written as-is, not `\u` escaped.

use crate::error::IndexError;
use crate::index::types::{InvertedIndex, PostingSet};
use serde::ser::{Serialize, Serializer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

struct Postings<'a>(&'a PostingSet);

impl Serialize for Postings<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl Serialize for InvertedIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        serializer.collect_map(entries.into_iter().map(|(token, set)| (token, Postings(set))))
    }
}

/// Encode an index as a JSON string
pub fn to_json(index: &InvertedIndex) -> Result<String, IndexError> {
    Ok(serde_json::to_string(index)?)
}

/// Encode an index as JSON into a writer
pub fn write_json<W: Write>(index: &InvertedIndex, writer: W) -> Result<(), IndexError> {
    serde_json::to_writer(writer, index)?;
    Ok(())
}

/// Write an index to a JSON file, replacing any existing file
pub fn write_index_file(index: &InvertedIndex, path: &Path) -> Result<(), IndexError> {
    let io_err = |source| IndexError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, index).map_err(|e| IndexError::from_json_at(e, path))?;
    writer.flush().map_err(io_err)?;

    info!(path = %path.display(), tokens = index.token_count(), "wrote index file");
    Ok(())
}
