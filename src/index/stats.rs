use crate::index::reader::read_index_file;
use crate::index::types::InvertedIndex;
use anyhow::{Context, Result};
use std::path::Path;

/// Summary figures for an index
#[derive(Debug, Clone, PartialEq)]
pub struct IndexStats {
    pub token_count: usize,
    pub total_postings: u64,
    pub max_position: Option<u32>,
    /// Tokens with the largest posting sets, largest first
    pub largest: Vec<(String, u64)>,
}

impl IndexStats {
    pub fn collect(index: &InvertedIndex, top: usize) -> Self {
        let mut sizes: Vec<(&str, u64)> = index.iter().map(|(t, set)| (t, set.len())).collect();
        sizes.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        Self {
            token_count: index.token_count(),
            total_postings: index.total_postings(),
            max_position: index.max_position(),
            largest: sizes
                .into_iter()
                .take(top)
                .map(|(t, n)| (t.to_string(), n))
                .collect(),
        }
    }

    /// Average number of records per token
    pub fn mean_posting_len(&self) -> f64 {
        if self.token_count == 0 {
            0.0
        } else {
            self.total_postings as f64 / self.token_count as f64
        }
    }
}

/// Display index statistics
pub fn show_stats(index_path: &Path) -> Result<()> {
    let index = read_index_file(index_path)
        .with_context(|| format!("Failed to load index {}", index_path.display()))?;
    let stats = IndexStats::collect(&index, 15);

    println!("Index Statistics");
    println!("================");
    println!();
    println!("Index file:       {}", index_path.display());
    println!("Tokens:           {}", stats.token_count);
    println!("Postings:         {}", stats.total_postings);
    println!("Mean postings:    {:.2}", stats.mean_posting_len());
    match stats.max_position {
        Some(max) => println!("Records (min):    {}", max as u64 + 1),
        None => println!("Records (min):    0"),
    }

    if !stats.largest.is_empty() {
        println!();
        println!("Most frequent tokens:");
        for (token, count) in &stats.largest {
            println!("  {}  {}", token, count);
        }
    }

    if let Ok(meta) = std::fs::metadata(index_path) {
        println!();
        println!("Index size:       {}", format_size(meta.len()));
    }

    Ok(())
}

/// Format byte size to human readable
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build::build_index;

    #[test]
    fn test_collect_stats() {
        let strings: Vec<String> = ["東京都渋谷区", "東京都新宿区", "大阪府大阪市"]
            .into_iter()
            .map(String::from)
            .collect();
        let index = build_index(&strings).unwrap();
        let stats = IndexStats::collect(&index, 2);

        assert_eq!(stats.token_count, index.token_count());
        // "大阪" repeats within record 2 but is posted once
        assert_eq!(stats.total_postings, 14);
        assert_eq!(stats.max_position, Some(2));
        assert_eq!(
            stats.largest,
            vec![("京都".to_string(), 2), ("東京".to_string(), 2)]
        );
    }

    #[test]
    fn test_empty_stats() {
        let stats = IndexStats::collect(&InvertedIndex::new(), 5);
        assert_eq!(stats.token_count, 0);
        assert_eq!(stats.mean_posting_len(), 0.0);
        assert!(stats.largest.is_empty());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 bytes");
        assert_eq!(format_size(2048), "2.00 KB");
    }
}
