//! Parsing and validation of the JSON exchange format.
//!
//! Anything that does not decode to an object of 2-character keys mapping to
//! arrays of non-negative integers is reported as an [`IndexError`]; a corrupt
//! index would otherwise silently produce empty or partial results.

use crate::error::IndexError;
use crate::index::types::{InvertedIndex, PostingSet, RecordId};
use crate::utils::is_bigram;
use rustc_hash::FxHashMap;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::collections::hash_map::Entry;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;

/// Top-level object entries in document order, repeated keys included
struct RawIndex(Vec<(String, Vec<RecordId>)>);

impl<'de> Deserialize<'de> for RawIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RawIndexVisitor;

        impl<'de> Visitor<'de> for RawIndexVisitor {
            type Value = RawIndex;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping tokens to arrays of record positions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawIndex, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry()? {
                    entries.push(entry);
                }
                Ok(RawIndex(entries))
            }
        }

        deserializer.deserialize_map(RawIndexVisitor)
    }
}

/// Decode an index from a JSON string
pub fn from_json(json: &str) -> Result<InvertedIndex, IndexError> {
    let raw: RawIndex = serde_json::from_str(json)?;
    validate(raw)
}

/// Decode an index from a reader
pub fn read_json<R: Read>(reader: R) -> Result<InvertedIndex, IndexError> {
    let raw: RawIndex = serde_json::from_reader(reader)?;
    validate(raw)
}

/// Load an index from a JSON file
pub fn read_index_file(path: &Path) -> Result<InvertedIndex, IndexError> {
    let file = File::open(path).map_err(|source| IndexError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: RawIndex = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| IndexError::from_json_at(e, path))?;
    let index = validate(raw)?;

    info!(path = %path.display(), tokens = index.token_count(), "loaded index file");
    Ok(index)
}

/// Array order and duplicate positions are not significant; duplicate keys are
fn validate(raw: RawIndex) -> Result<InvertedIndex, IndexError> {
    let mut postings = FxHashMap::with_capacity_and_hasher(raw.0.len(), Default::default());

    for (token, positions) in raw.0 {
        if !is_bigram(&token) {
            return Err(IndexError::InvalidToken { token });
        }
        match postings.entry(token) {
            Entry::Occupied(slot) => {
                return Err(IndexError::DuplicateToken {
                    token: slot.key().clone(),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(positions.into_iter().collect::<PostingSet>());
            }
        }
    }

    Ok(InvertedIndex::from_postings(postings))
}
