//! # addrgram - 2-gram address search
//!
//! addrgram builds a bigram (2-character) inverted index over address
//! records and answers substring queries against it.
//!
//! ## Architecture
//!
//! - [`dataset`] - Records, CSV loading and search-string normalization
//! - [`index`] - Inverted index building, JSON exchange format, statistics
//! - [`query`] - Query validation, posting-set intersection, exact-match filtering
//! - [`output`] - Result formatting
//! - [`session`] - Dataset + index snapshot with atomic reload and query cache
//! - [`utils`] - Tokenizer, text decoding, configuration, progress bars
//!
//! ## Quick Start
//!
//! ```
//! use addrgram::index::build_index;
//! use addrgram::query::{parse_query, QueryExecutor};
//!
//! let strings: Vec<String> = ["東京都渋谷区", "東京都新宿区", "大阪府大阪市"]
//!     .into_iter()
//!     .map(String::from)
//!     .collect();
//! let index = build_index(&strings).unwrap();
//!
//! let query = parse_query("東京都新宿").unwrap();
//! let executor = QueryExecutor::new(&index, &strings);
//! assert_eq!(executor.execute(&query), vec![1]);
//! ```
//!
//! ## How a query runs
//!
//! 1. The query is split into bigrams, the same way records were.
//! 2. The posting sets of all bigrams are intersected. A bigram missing from
//!    the index ends the search with no results.
//! 3. Each candidate's normalized string is checked for the query as a
//!    literal substring, since shared bigrams do not imply contiguity.

pub mod dataset;
pub mod error;
pub mod index;
pub mod output;
pub mod query;
pub mod session;
pub mod utils;
