//! Basic transcoding example.
//!
//! Run with:
//!     cargo run --example sync_basic

use std::io::Cursor;

use csvquote::{Mode, QuoteConfig, Transcoder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data = b"id,note\n1,\"hello, world\"\n2,\"two\nlines\"\n3,\"say \"\"hi\"\"\"\n";

    println!("Input ({} bytes):\n{}", data.len(), String::from_utf8_lossy(data));

    // Sanitize: hide in-quote delimiters and newlines
    let mut transcoder = Transcoder::new(QuoteConfig::default());
    let mut hidden = Vec::with_capacity(data.len());
    for chunk in transcoder.transcode(Cursor::new(&data[..])) {
        hidden.extend_from_slice(&chunk?);
    }

    println!("Sanitized, one record per line:");
    for (n, line) in hidden.split(|&b| b == b'\n').filter(|l| !l.is_empty()).enumerate() {
        let fields = line.split(|&b| b == b',').count();
        println!("  record {}: {} fields, {:?}", n, fields, String::from_utf8_lossy(line));
    }

    // Restore: put them back
    let mut restorer = Transcoder::new(QuoteConfig::default().with_mode(Mode::Restore));
    let restored = restorer.push(&hidden);

    assert_eq!(&restored[..], &data[..]);
    println!("\nRestored output matches input.");

    Ok(())
}
