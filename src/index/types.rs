use crate::error::IndexError;
use roaring::RoaringBitmap;
use rustc_hash::FxHashMap;

/// Position of a record in its dataset (0-based)
pub type RecordId = u32;

/// Set of record positions containing one token
pub type PostingSet = RoaringBitmap;

/// Mapping from bigram to the positions of the records that contain it.
///
/// Built once per dataset and read-only afterwards, so a shared reference can
/// serve any number of concurrent queries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvertedIndex {
    postings: FxHashMap<String, PostingSet>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_postings(postings: FxHashMap<String, PostingSet>) -> Self {
        Self { postings }
    }

    /// Posting set of a token; `None` when the token never occurs in the corpus
    #[inline]
    pub fn get(&self, token: &str) -> Option<&PostingSet> {
        self.postings.get(token)
    }

    pub fn contains_token(&self, token: &str) -> bool {
        self.postings.contains_key(token)
    }

    /// Number of distinct tokens
    pub fn token_count(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PostingSet)> {
        self.postings.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Sum of all posting set sizes
    pub fn total_postings(&self) -> u64 {
        self.postings.values().map(|set| set.len()).sum()
    }

    /// Largest record position referenced by any posting set
    pub fn max_position(&self) -> Option<RecordId> {
        self.postings.values().filter_map(|set| set.max()).max()
    }

    /// Check that every posting refers to a record in a dataset of `record_count` rows
    pub fn validate_positions(&self, record_count: usize) -> Result<(), IndexError> {
        for (token, set) in &self.postings {
            if let Some(position) = set.max() {
                if position as usize >= record_count {
                    return Err(IndexError::PositionOutOfRange {
                        token: token.clone(),
                        position,
                        record_count,
                    });
                }
            }
        }
        Ok(())
    }
}
