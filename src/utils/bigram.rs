use std::iter;

/// A bigram is a slice of exactly two consecutive characters (code points).
pub type Bigram<'a> = &'a str;

/// Split a string into overlapping 2-character tokens, left to right.
///
/// Duplicates are kept: "東京東京" yields ["東京", "京東", "東京"].
/// Strings shorter than two characters yield no tokens. The same function is
/// used for records and for queries so both sides agree on token boundaries.
pub fn tokenize(s: &str) -> Vec<Bigram<'_>> {
    // Byte offset of every char boundary, including the end of the string
    let bounds: Vec<usize> = s
        .char_indices()
        .map(|(i, _)| i)
        .chain(iter::once(s.len()))
        .collect();

    if bounds.len() < 3 {
        return Vec::new();
    }

    bounds.windows(3).map(|w| &s[w[0]..w[2]]).collect()
}

/// Bigrams of a query with duplicates removed, sorted.
pub fn unique_bigrams(s: &str) -> Vec<Bigram<'_>> {
    let mut bigrams = tokenize(s);
    bigrams.sort_unstable();
    bigrams.dedup();
    bigrams
}

/// Number of characters (code points) in a string.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Whether a string is a well-formed bigram key.
#[inline]
pub fn is_bigram(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some() && chars.next().is_some() && chars.next().is_none()
}
