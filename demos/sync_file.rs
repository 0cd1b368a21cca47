//! File transcoding example.
//!
//! Run with:
//!     cargo run --example sync_file -- /path/to/file.csv

use std::env;
use std::fs::File;

use csvquote::{QuoteConfig, Transcoder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "Cargo.toml".to_string());

    println!("Sanitizing file: {}\n", path);

    let file = File::open(&path)?;
    let metadata = file.metadata()?;
    println!("File size: {} bytes\n", metadata.len());

    // Larger reads for big files
    let config = QuoteConfig::default().with_chunk_size(64 * 1024);
    let mut transcoder = Transcoder::new(config);

    let mut total_chunks = 0;
    let mut total_bytes = 0;
    let mut records = 0;

    for chunk in transcoder.transcode(file) {
        let chunk = chunk?;
        total_chunks += 1;
        total_bytes += chunk.len();
        records += chunk.iter().filter(|&&b| b == config.record_separator()).count();
    }

    println!("Total: {} chunks, {} bytes, {} records", total_chunks, total_bytes, records);
    println!("Ended inside a quoted field: {}", transcoder.is_quoted());

    Ok(())
}
