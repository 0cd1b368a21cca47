#![no_main]

use csvquote::{FIELD_SENTINEL, QuoteConfig, RECORD_SENTINEL, restore, sanitize};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: Vec<u8>| {
    let configs = vec![
        // Comma separated
        QuoteConfig::default(),
        // Tab separated
        QuoteConfig::default().with_delimiter(b'\t'),
        // Semicolons, single quotes, carriage returns
        QuoteConfig::new(b';', b'\'', b'\r').unwrap(),
    ];

    for config in configs {
        let hidden = sanitize(&config, &data);

        // Verify: one byte out for every byte in
        assert_eq!(hidden.len(), data.len());

        // Verify: quotes are never rewritten
        for (before, after) in data.iter().zip(&hidden) {
            if *before == config.quote() {
                assert_eq!(before, after);
            }
        }

        // Verify: restore undoes sanitize when the input has no sentinels
        if !data.contains(&FIELD_SENTINEL) && !data.contains(&RECORD_SENTINEL) {
            assert_eq!(restore(&config, &hidden), data);
        }
    }
});
