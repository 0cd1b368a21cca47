#![no_main]

use std::io::Cursor;

use csvquote::{Mode, QuoteConfig, Transcoder, copy};
use libfuzzer_sys::fuzz_target;

fn drive(config: QuoteConfig, data: &[u8]) -> Vec<u8> {
    let mut transcoder = Transcoder::new(config);
    let mut out = Vec::with_capacity(data.len());
    copy(&mut transcoder, Cursor::new(data), &mut out).unwrap();
    out
}

fuzz_target!(|input: (u8, Vec<u8>)| {
    let (split, data) = input;
    let small = usize::from(split).max(1);

    for mode in [Mode::Sanitize, Mode::Restore] {
        let config = QuoteConfig::default().with_mode(mode);

        // Verify: driver output does not depend on chunk size
        let reference = drive(config, &data);
        assert_eq!(drive(config.with_chunk_size(small), &data), reference);

        // Verify: neither does splitting pushes
        let mut transcoder = Transcoder::new(config);
        let mut pushed = Vec::with_capacity(data.len());
        for piece in data.chunks(small) {
            pushed.extend_from_slice(&transcoder.push(piece));
        }
        assert_eq!(pushed, reference);
    }
});
