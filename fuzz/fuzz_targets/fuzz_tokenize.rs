#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Token count must always be one less than the character count
    let tokens = addrgram::utils::tokenize(data);
    assert_eq!(tokens.len(), data.chars().count().saturating_sub(1));
    assert!(tokens.iter().all(|t| addrgram::utils::is_bigram(t)));

    let _ = addrgram::query::parse_query(data);
});
