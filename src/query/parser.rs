use crate::error::QueryError;
use crate::utils::{char_len, unique_bigrams, Bigram};

/// Minimum number of characters for a query to have at least one bigram
pub const MIN_QUERY_CHARS: usize = 2;

/// A search query that is known to contain at least one bigram
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    text: String,
}

impl Query {
    /// Validate raw input. Shorter than two characters is rejected; the text
    /// is otherwise kept verbatim and matched literally.
    pub fn parse(input: &str) -> Result<Self, QueryError> {
        let len = char_len(input);
        if len < MIN_QUERY_CHARS {
            return Err(QueryError::TooShort { len });
        }
        Ok(Self {
            text: input.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Distinct bigrams of the query; never empty
    pub fn bigrams(&self) -> Vec<Bigram<'_>> {
        unique_bigrams(&self.text)
    }
}

/// Parse a query string
pub fn parse_query(input: &str) -> Result<Query, QueryError> {
    Query::parse(input)
}
