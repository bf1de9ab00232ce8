//! End-to-end tests of the library pipeline: CSV text to formatted results.

use addrgram::dataset::{normalize_all, parse_csv, FieldSchema};
use addrgram::error::IndexError;
use addrgram::index::{build_index, from_json, read_index_file, to_json, write_index_file};
use addrgram::query::{filter_exact, parse_query, resolve, QueryExecutor};
use addrgram::session::{SearchSession, Snapshot};
use addrgram::utils::{tokenize, AppConfig};
use std::collections::HashSet;

const POSTAL_CSV: &str = "\
郵便番号,都道府県,市区町村,町域,字丁目,京都通り名,事業所名,事業所住所
1500043,東京都,渋谷区,道玄坂,,,,
1600022,東京都,新宿区,新宿,三丁目,,,
6040000,京都府,京都市中京区,,,烏丸通二条下る,,
5300001,大阪府,大阪市北区,梅田,,,,
1000005,,,,,,株式会社 丸の内商事,東京都千代田区丸の内 1-1
";

fn corpus() -> Vec<String> {
    ["東京都渋谷区", "東京都新宿区", "大阪府大阪市"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[test]
fn test_documented_examples() {
    let strings = corpus();
    let index = build_index(&strings).unwrap();

    let query = parse_query("東京都新宿").unwrap();
    assert_eq!(tokenize(query.as_str()), vec!["東京", "京都", "都新", "新宿"]);
    let candidates = resolve(&index, &query);
    assert_eq!(candidates, vec![1]);
    assert_eq!(filter_exact(&strings, &candidates, query.as_str()), vec![1]);

    let query = parse_query("大阪").unwrap();
    assert_eq!(resolve(&index, &query), vec![2]);

    assert!(parse_query("東").is_err());

    let query = parse_query("名古屋").unwrap();
    assert!(resolve(&index, &query).is_empty());
}

#[test]
fn test_resolve_matches_brute_force() {
    let strings: Vec<String> = [
        "東京都千代田区丸の内",
        "東京都中央区銀座",
        "京都府京都市左京区",
        "京都府京都市東山区祇園町",
        "大阪府大阪市中央区",
        "北海道札幌市中央区",
        "",
        "区",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    let index = build_index(&strings).unwrap();

    for q in ["京都", "中央区", "東京都", "京都市東", "市中央", "区銀座", "道札幌市", "丸の内"] {
        let query = parse_query(q).unwrap();
        let bigrams = tokenize(q);

        let expected_candidates: Vec<u32> = (0..strings.len() as u32)
            .filter(|&i| {
                let own: HashSet<&str> = tokenize(&strings[i as usize]).into_iter().collect();
                bigrams.iter().all(|b| own.contains(b))
            })
            .collect();
        let candidates = resolve(&index, &query);
        assert_eq!(candidates, expected_candidates, "candidates for {q}");

        let expected_matches: Vec<u32> = (0..strings.len() as u32)
            .filter(|&i| strings[i as usize].contains(q))
            .collect();
        let executor = QueryExecutor::new(&index, &strings);
        assert_eq!(executor.execute(&query), expected_matches, "matches for {q}");
    }
}

#[test]
fn test_index_file_roundtrip() {
    let strings = corpus();
    let index = build_index(&strings).unwrap();

    let path = std::env::temp_dir().join(format!("addrgram_pipeline_{}.json", std::process::id()));
    write_index_file(&index, &path).unwrap();
    let loaded = read_index_file(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded, index);
    assert_eq!(from_json(&to_json(&loaded).unwrap()).unwrap(), index);
}

#[test]
fn test_corrupt_index_is_reported() {
    assert!(matches!(from_json("{\"東京\": [0, 1"), Err(IndexError::Malformed(_))));
    assert!(matches!(from_json("{\"東京都\": [0]}"), Err(IndexError::InvalidToken { .. })));
}

#[test]
fn test_postal_csv_session() {
    let dataset = parse_csv(POSTAL_CSV).unwrap();
    let schema = AppConfig::default().schema();
    let snapshot = Snapshot::build(dataset, &schema, true).unwrap();

    // Whitespace inside values is removed from the search string
    assert_eq!(
        snapshot.normalized()[4],
        "株式会社丸の内商事東京都千代田区丸の内1-1"
    );

    let session = SearchSession::new(snapshot, 8);

    let hits = session.search("新宿三丁目").unwrap();
    assert_eq!(hits.lines(), vec!["1600022\u{3000}東京都新宿区新宿三丁目".to_string()]);

    let hits = session.search("烏丸通").unwrap();
    assert_eq!(hits.lines(), vec!["6040000\u{3000}京都府京都市中京区烏丸通二条下る".to_string()]);

    let hits = session.search("丸の内商事").unwrap();
    assert_eq!(
        hits.lines(),
        vec!["1000005\u{3000}株式会社 丸の内商事東京都千代田区丸の内 1-1".to_string()]
    );

    let hits = session.search("東京都").unwrap();
    assert_eq!(hits.positions(), &[0, 1, 4]);

    // Queries are matched literally; the search string has no spaces
    assert!(session.search("株式会社 丸の内").unwrap().is_empty());
}

#[test]
fn test_prebuilt_index_with_dataset() {
    let schema = AppConfig::default().schema();
    let dataset = parse_csv(POSTAL_CSV).unwrap();
    let resolved = schema.resolve(&dataset).unwrap();
    let normalized = normalize_all(&dataset, &resolved.search_columns);
    let json = to_json(&build_index(&normalized).unwrap()).unwrap();

    let snapshot = Snapshot::with_index(dataset, &schema, from_json(&json).unwrap()).unwrap();
    let session = SearchSession::new(snapshot, 0);
    assert_eq!(session.search("梅田").unwrap().positions(), &[3]);
}

#[test]
fn test_custom_schema() {
    let dataset = parse_csv("id,city,street\n1,Springfield,Evergreen Terrace\n2,Shelbyville,Main St\n").unwrap();
    let schema = FieldSchema::new(vec!["city".into(), "street".into()], "id".into(), ' ');
    let session = SearchSession::new(Snapshot::build(dataset, &schema, true).unwrap(), 4);

    let hits = session.search("fieldEvergreen").unwrap();
    assert_eq!(hits.lines(), vec!["1 SpringfieldEvergreen Terrace".to_string()]);
    assert_eq!(session.search("MainSt").unwrap().positions(), &[1]);
}
