use crate::dataset::record::{Dataset, Record};
use rayon::prelude::*;

/// Build the search string for one record.
///
/// Values of `columns` are concatenated in order, absent values skipped, and
/// every whitespace character (including U+3000) removed.
pub fn normalize(record: &Record, columns: &[usize]) -> String {
    let mut out = String::new();
    for value in columns.iter().filter_map(|&c| record.get(c)) {
        out.extend(value.chars().filter(|c| !c.is_whitespace()));
    }
    out
}

/// Normalize every record, preserving record order.
///
/// Position `i` of the result always belongs to record `i`.
pub fn normalize_all(dataset: &Dataset, columns: &[usize]) -> Vec<String> {
    dataset
        .records()
        .par_iter()
        .map(|record| normalize(record, columns))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_skips_absent_and_whitespace() {
        let record = Record::new(vec![
            Some("東京都".into()),
            None,
            Some(" 渋谷区 ".into()),
            Some("道玄坂\u{3000}１丁目".into()),
        ]);
        assert_eq!(normalize(&record, &[0, 1, 2, 3]), "東京都渋谷区道玄坂１丁目");
    }

    #[test]
    fn test_normalize_respects_column_order() {
        let record = Record::new(vec![Some("B".into()), Some("A".into())]);
        assert_eq!(normalize(&record, &[1, 0]), "AB");
        assert_eq!(normalize(&record, &[0]), "B");
    }

    #[test]
    fn test_normalize_empty_record() {
        let record = Record::new(vec![None, Some(" \t".into())]);
        assert_eq!(normalize(&record, &[0, 1]), "");
    }

    #[test]
    fn test_normalize_all_preserves_order() {
        let rows: Vec<Vec<String>> = (0..500).map(|i| vec![format!("r {i}")]).collect();
        let dataset = Dataset::from_strings(&["x".to_string()], &rows).unwrap();
        let strings = normalize_all(&dataset, &[0]);

        assert_eq!(strings.len(), dataset.len());
        for (i, s) in strings.iter().enumerate() {
            assert_eq!(s, &format!("r{i}"));
        }
    }
}
