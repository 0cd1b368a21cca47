//! Property-based tests for the transcoder.
//!
//! ## Test Categories
//! 1. **Round trip**: restore undoes sanitize on sentinel-free input
//! 2. **Length**: both modes map one byte to one byte
//! 3. **Passthrough**: bytes outside quotes never change
//! 4. **Chunk invariance**: driver chunk size and push splits never matter

use std::io::Cursor;

use csvquote::{
    FIELD_SENTINEL, Mode, QuoteConfig, RECORD_SENTINEL, Transcoder, copy, restore, sanitize,
};
use proptest::prelude::*;

// ─────────────────────────────────────────────────────────────────────────────
// Proptest Strategies
// ─────────────────────────────────────────────────────────────────────────────

fn non_sentinel() -> impl Strategy<Value = u8> {
    any::<u8>().prop_filter("sentinel byte", |b| *b != FIELD_SENTINEL && *b != RECORD_SENTINEL)
}

/// Valid configurations: three distinct non-sentinel bytes.
fn valid_config() -> impl Strategy<Value = QuoteConfig> {
    prop_oneof![
        Just((b',', b'"', b'\n')),
        Just((b'\t', b'"', b'\n')),
        Just((b';', b'\'', b'\r')),
        (non_sentinel(), non_sentinel(), non_sentinel()),
    ]
    .prop_filter("bytes must be distinct", |(d, q, r)| d != q && d != r && q != r)
    .prop_map(|(d, q, r)| QuoteConfig::new(d, q, r).unwrap())
}

/// Input dense in the configured bytes, free of sentinels.
fn csv_like(config: QuoteConfig) -> impl Strategy<Value = Vec<u8>> {
    let byte = prop_oneof![
        3 => Just(config.quote()),
        2 => Just(config.delimiter()),
        2 => Just(config.record_separator()),
        3 => non_sentinel(),
    ];
    prop::collection::vec(byte, 0..512)
}

fn config_and_input() -> impl Strategy<Value = (QuoteConfig, Vec<u8>)> {
    valid_config().prop_flat_map(|config| (Just(config), csv_like(config)))
}

fn drive(config: QuoteConfig, data: &[u8]) -> Vec<u8> {
    let mut transcoder = Transcoder::new(config);
    let mut out = Vec::new();
    copy(&mut transcoder, Cursor::new(data), &mut out).unwrap();
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Properties
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn prop_round_trip((config, data) in config_and_input()) {
        prop_assert_eq!(restore(&config, &sanitize(&config, &data)), data);
    }

    #[test]
    fn prop_length_preserved(config in valid_config(), data in prop::collection::vec(any::<u8>(), 0..512)) {
        prop_assert_eq!(sanitize(&config, &data).len(), data.len());
        prop_assert_eq!(restore(&config, &data).len(), data.len());
    }

    #[test]
    fn prop_restore_without_sentinels_is_identity((config, data) in config_and_input()) {
        prop_assert_eq!(restore(&config, &data), data);
    }

    #[test]
    fn prop_quote_free_input_untouched(
        config in valid_config(),
        data in prop::collection::vec(non_sentinel(), 0..512),
    ) {
        let data: Vec<u8> = data.into_iter().filter(|b| *b != config.quote()).collect();
        prop_assert_eq!(sanitize(&config, &data), data);
    }

    #[test]
    fn prop_sanitized_output_hides_inner_bytes((config, data) in config_and_input()) {
        // Only bytes that are not inside quotes may still be delimiters or separators,
        // and quotes themselves are never rewritten.
        let out = sanitize(&config, &data);
        let quotes_in = data.iter().filter(|&&b| b == config.quote()).count();
        let quotes_out = out.iter().filter(|&&b| b == config.quote()).count();
        prop_assert_eq!(quotes_in, quotes_out);

        let mut transcoder = Transcoder::new(config);
        for (&before, &after) in data.iter().zip(&out) {
            let was_quoted = transcoder.state() == csvquote::QuoteState::Quoted;
            transcoder.transcode_byte(before);
            if before != after {
                prop_assert!(was_quoted);
                prop_assert!(after == FIELD_SENTINEL || after == RECORD_SENTINEL);
            }
        }
    }

    #[test]
    fn prop_chunk_size_invariance(
        (config, data) in config_and_input(),
        c1 in 1usize..64,
        c2 in 64usize..2048,
    ) {
        let a = drive(config.with_chunk_size(c1), &data);
        let b = drive(config.with_chunk_size(c2), &data);
        prop_assert_eq!(&a, &b);

        let restoring = config.with_mode(Mode::Restore);
        prop_assert_eq!(drive(restoring.with_chunk_size(c1), &a), drive(restoring.with_chunk_size(c2), &a));
    }

    #[test]
    fn prop_push_split_invariance((config, data) in config_and_input(), split in 1usize..32) {
        let whole = sanitize(&config, &data);

        let mut transcoder = Transcoder::new(config);
        let mut pieces = Vec::with_capacity(data.len());
        for piece in data.chunks(split) {
            pieces.extend_from_slice(&transcoder.push(piece));
        }
        prop_assert_eq!(pieces, whole);
    }
}
