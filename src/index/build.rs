use crate::error::IndexError;
use crate::index::types::{InvertedIndex, PostingSet, RecordId};
use crate::utils::progress;
use crate::utils::tokenize;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::time::Instant;
use tracing::info;

/// Records per parallel build chunk
const CHUNK_SIZE: usize = 8192;

/// Partial index over one chunk, keyed by slices of the normalized strings
type PartialIndex<'a> = FxHashMap<&'a str, PostingSet>;

/// Build the inverted index over normalized strings.
///
/// Position `i` of `normalized` becomes record id `i`. Every bigram of
/// `normalized[i]` has `i` in its posting set, and no other set does.
pub fn build_index(normalized: &[String]) -> Result<InvertedIndex, IndexError> {
    build_index_with_progress(normalized, true)
}

/// Build the inverted index, reporting progress unless `silent`
pub fn build_index_with_progress(
    normalized: &[String],
    silent: bool,
) -> Result<InvertedIndex, IndexError> {
    if RecordId::try_from(normalized.len()).is_err() {
        return Err(IndexError::TooManyRecords {
            count: normalized.len(),
        });
    }

    let start = Instant::now();
    let progress_bar = progress::bar(normalized.len() as u64, "Building index...", silent);
    let pb = progress_bar.clone();

    // Chunks are tokenized in parallel, then merged with set unions
    let merged = normalized
        .par_chunks(CHUNK_SIZE)
        .enumerate()
        .map(|(chunk_idx, chunk)| {
            let partial = index_chunk(chunk, chunk_idx * CHUNK_SIZE);
            if let Some(ref pb) = pb {
                pb.inc(chunk.len() as u64);
            }
            partial
        })
        .reduce(PartialIndex::default, merge_partials);

    let postings = merged
        .into_iter()
        .map(|(token, set)| (token.to_owned(), set))
        .collect();
    let index = InvertedIndex::from_postings(postings);

    progress::finish(
        progress_bar,
        format!("Indexed {} records ({} tokens)", normalized.len(), index.token_count()),
    );
    info!(
        records = normalized.len(),
        tokens = index.token_count(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "built inverted index"
    );

    Ok(index)
}

fn index_chunk(chunk: &[String], offset: usize) -> PartialIndex<'_> {
    let mut partial = PartialIndex::default();
    for (i, text) in chunk.iter().enumerate() {
        // Fits: the total record count was checked against RecordId::MAX
        let id = (offset + i) as RecordId;
        for token in tokenize(text) {
            partial.entry(token).or_default().insert(id);
        }
    }
    partial
}

fn merge_partials<'a>(mut left: PartialIndex<'a>, mut right: PartialIndex<'a>) -> PartialIndex<'a> {
    if left.len() < right.len() {
        std::mem::swap(&mut left, &mut right);
    }
    for (token, set) in right {
        *left.entry(token).or_default() |= set;
    }
    left
}
