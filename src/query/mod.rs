pub mod executor;
pub mod parser;

pub use executor::{filter_exact, resolve, resolve_candidates, QueryExecutor};
pub use parser::{parse_query, Query, MIN_QUERY_CHARS};
