//! Search session: the dataset, its normalized strings and index, held together.
//!
//! A [`Snapshot`] is immutable once built. [`SearchSession`] hands out shared
//! references to the current snapshot; reloading builds a new snapshot and
//! swaps the reference, so in-flight searches keep reading the old one.

use crate::dataset::{normalize_all, Dataset, FieldSchema, ResolvedSchema};
use crate::error::{QueryError, SessionError};
use crate::index::{build_index_with_progress, InvertedIndex, RecordId};
use crate::output::format_results;
use crate::query::{Query, QueryExecutor};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::{debug, info};

/// A loaded dataset with its search strings and inverted index
#[derive(Debug)]
pub struct Snapshot {
    dataset: Dataset,
    schema: ResolvedSchema,
    normalized: Vec<String>,
    index: InvertedIndex,
}

impl Snapshot {
    /// Normalize the dataset and build a fresh index over it
    pub fn build(dataset: Dataset, schema: &FieldSchema, silent: bool) -> Result<Self, SessionError> {
        let schema = schema.resolve(&dataset)?;
        let normalized = normalize_all(&dataset, &schema.search_columns);
        let index = build_index_with_progress(&normalized, silent)?;

        Ok(Self {
            dataset,
            schema,
            normalized,
            index,
        })
    }

    /// Pair a dataset with a previously built index.
    ///
    /// The index must not refer to records beyond the end of the dataset.
    pub fn with_index(
        dataset: Dataset,
        schema: &FieldSchema,
        index: InvertedIndex,
    ) -> Result<Self, SessionError> {
        let schema = schema.resolve(&dataset)?;
        index.validate_positions(dataset.len())?;
        let normalized = normalize_all(&dataset, &schema.search_columns);

        Ok(Self {
            dataset,
            schema,
            normalized,
            index,
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn schema(&self) -> &ResolvedSchema {
        &self.schema
    }

    pub fn normalized(&self) -> &[String] {
        &self.normalized
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    pub fn executor(&self) -> QueryExecutor<'_> {
        QueryExecutor::new(&self.index, &self.normalized)
    }

    /// Display strings for the given positions
    pub fn format(&self, positions: &[RecordId]) -> Vec<String> {
        format_results(&self.dataset, positions, &self.schema)
    }
}

/// Result of one search, tied to the snapshot it ran against
#[derive(Debug, Clone)]
pub struct SearchHits {
    snapshot: Arc<Snapshot>,
    positions: Arc<[RecordId]>,
}

impl SearchHits {
    pub fn positions(&self) -> &[RecordId] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Display strings for the hits, in hit order
    pub fn lines(&self) -> Vec<String> {
        self.snapshot.format(&self.positions)
    }
}

struct Current {
    generation: u64,
    snapshot: Arc<Snapshot>,
}

struct CachedHits {
    generation: u64,
    positions: Arc<[RecordId]>,
}

/// Owns the current snapshot and serves queries against it
pub struct SearchSession {
    current: RwLock<Current>,
    next_generation: AtomicU64,
    cache: Option<Mutex<LruCache<String, CachedHits>>>,
}

impl SearchSession {
    /// `cache_size` of 0 disables the query cache
    pub fn new(snapshot: Snapshot, cache_size: usize) -> Self {
        Self {
            current: RwLock::new(Current {
                generation: 0,
                snapshot: Arc::new(snapshot),
            }),
            next_generation: AtomicU64::new(1),
            cache: NonZeroUsize::new(cache_size).map(|n| Mutex::new(LruCache::new(n))),
        }
    }

    /// The snapshot queries currently run against
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current().1
    }

    fn current(&self) -> (u64, Arc<Snapshot>) {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        (current.generation, Arc::clone(&current.snapshot))
    }

    /// Swap in a new snapshot. Searches already running finish on the old one.
    pub fn replace(&self, snapshot: Snapshot) {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            *current = Current {
                generation,
                snapshot: Arc::new(snapshot),
            };
        }

        if let Some(cache) = &self.cache {
            cache.lock().unwrap_or_else(PoisonError::into_inner).clear();
        }
        info!(generation, "replaced search snapshot");
    }

    /// Run a raw query string; fewer than two characters is rejected
    pub fn search(&self, input: &str) -> Result<SearchHits, QueryError> {
        let query = Query::parse(input)?;
        Ok(self.search_query(&query))
    }

    pub fn search_query(&self, query: &Query) -> SearchHits {
        let (generation, snapshot) = self.current();

        if let Some(positions) = self.cached(query.as_str(), generation) {
            debug!(query = query.as_str(), "query cache hit");
            return SearchHits { snapshot, positions };
        }

        let positions: Arc<[RecordId]> = snapshot.executor().execute(query).into();

        if let Some(cache) = &self.cache {
            cache.lock().unwrap_or_else(PoisonError::into_inner).put(
                query.as_str().to_string(),
                CachedHits {
                    generation,
                    positions: Arc::clone(&positions),
                },
            );
        }

        SearchHits { snapshot, positions }
    }

    fn cached(&self, query: &str, generation: u64) -> Option<Arc<[RecordId]>> {
        let cache = self.cache.as_ref()?;
        let mut cache = cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache
            .get(query)
            .filter(|hit| hit.generation == generation)
            .map(|hit| Arc::clone(&hit.positions))
    }
}
