use crate::index::types::{InvertedIndex, PostingSet, RecordId};
use crate::query::parser::Query;
use memchr::memmem::Finder;
use tracing::debug;

/// Intersect the posting sets of every bigram in the query.
///
/// A bigram missing from the index means no record can contain the query,
/// so the result is empty. The candidates contain every bigram of the query
/// but not necessarily the query as a contiguous substring.
pub fn resolve_candidates(index: &InvertedIndex, query: &Query) -> PostingSet {
    let mut sets: Vec<&PostingSet> = Vec::new();
    for bigram in query.bigrams() {
        match index.get(bigram) {
            Some(set) => sets.push(set),
            None => return PostingSet::new(),
        }
    }

    // Smallest set first keeps every intermediate result small
    sets.sort_by_key(|s| s.len());

    let Some((first, rest)) = sets.split_first() else {
        return PostingSet::new();
    };

    let mut result = (*first).clone();
    for set in rest {
        if result.is_empty() {
            break;
        }
        result &= *set;
    }
    result
}

/// Candidate record positions for a query, ascending
pub fn resolve(index: &InvertedIndex, query: &Query) -> Vec<RecordId> {
    resolve_candidates(index, query).iter().collect()
}

/// Keep the candidates whose normalized string contains `query` literally.
///
/// Output follows input order. Positions outside `normalized` are dropped.
pub fn filter_exact(normalized: &[String], candidates: &[RecordId], query: &str) -> Vec<RecordId> {
    let finder = Finder::new(query.as_bytes());
    candidates
        .iter()
        .copied()
        .filter(|&id| {
            normalized
                .get(id as usize)
                .is_some_and(|text| finder.find(text.as_bytes()).is_some())
        })
        .collect()
}

/// Runs queries against one index and the normalized strings it was built from
pub struct QueryExecutor<'a> {
    index: &'a InvertedIndex,
    normalized: &'a [String],
}

impl<'a> QueryExecutor<'a> {
    pub fn new(index: &'a InvertedIndex, normalized: &'a [String]) -> Self {
        Self { index, normalized }
    }

    /// Positions of the records whose normalized string contains the query, ascending
    pub fn execute(&self, query: &Query) -> Vec<RecordId> {
        let candidates = resolve(self.index, query);
        let matches = filter_exact(self.normalized, &candidates, query.as_str());

        debug!(
            query = query.as_str(),
            candidates = candidates.len(),
            matches = matches.len(),
            "executed query"
        );
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build::build_index;
    use crate::query::parser::parse_query;

    fn corpus() -> Vec<String> {
        ["東京都渋谷区", "東京都新宿区", "大阪府大阪市"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn q(s: &str) -> Query {
        parse_query(s).unwrap()
    }

    #[test]
    fn test_resolve_intersection() {
        let index = build_index(&corpus()).unwrap();
        assert_eq!(resolve(&index, &q("東京都新宿")), vec![1]);
        assert_eq!(resolve(&index, &q("東京")), vec![0, 1]);
        assert_eq!(resolve(&index, &q("大阪")), vec![2]);
    }

    #[test]
    fn test_resolve_missing_token_is_empty() {
        let index = build_index(&corpus()).unwrap();
        assert!(resolve(&index, &q("名古屋")).is_empty());
        // "京都" exists but "都大" does not
        assert!(resolve(&index, &q("京都大")).is_empty());
    }

    #[test]
    fn test_resolve_is_necessary_not_sufficient() {
        let strings = vec!["BCDAB".to_string()];
        let index = build_index(&strings).unwrap();

        // All of AB, BC, CD occur in record 0, but "ABCD" does not
        let candidates = resolve(&index, &q("ABCD"));
        assert_eq!(candidates, vec![0]);
        assert!(filter_exact(&strings, &candidates, "ABCD").is_empty());
    }

    #[test]
    fn test_filter_exact_keeps_order() {
        let strings = corpus();
        assert_eq!(filter_exact(&strings, &[1, 0], "東京都"), vec![1, 0]);
        assert_eq!(filter_exact(&strings, &[0, 1, 2], "新宿区"), vec![1]);
    }

    #[test]
    fn test_filter_exact_out_of_range() {
        let strings = corpus();
        assert_eq!(filter_exact(&strings, &[2, 9], "大阪"), vec![2]);
    }

    #[test]
    fn test_execute_end_to_end() {
        let strings = corpus();
        let index = build_index(&strings).unwrap();
        let executor = QueryExecutor::new(&index, &strings);

        assert_eq!(executor.execute(&q("東京都新宿")), vec![1]);
        assert_eq!(executor.execute(&q("大阪")), vec![2]);
        assert!(executor.execute(&q("渋谷新宿")).is_empty());
    }

    #[test]
    fn test_execute_repeated_bigrams() {
        let strings = vec!["大阪府大阪市".to_string(), "大阪市".to_string()];
        let index = build_index(&strings).unwrap();
        let executor = QueryExecutor::new(&index, &strings);

        assert_eq!(executor.execute(&q("大阪府大阪")), vec![0]);
    }
}
