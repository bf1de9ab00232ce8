#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Arbitrary input must decode to an index or a typed error, never panic
    if let Ok(index) = addrgram::index::from_json(data) {
        let json = addrgram::index::to_json(&index).unwrap();
        assert_eq!(addrgram::index::from_json(&json).unwrap(), index);
    }
});
