//! Async file transcoding with tokio.
//!
//! Bridges a tokio file to `futures-io` with `tokio-util`'s compat layer and
//! writes the sanitized bytes to stdout.
//!
//! Run with:
//!     cargo run --example async_tokio --features async-io -- /path/to/file.csv

use std::env;

use csvquote::{QuoteConfig, Transcoder, transcode_async};
use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tokio_util::compat::TokioAsyncReadCompatExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "Cargo.toml".to_string());

    let file = tokio::fs::File::open(&path).await?;
    let mut stream = transcode_async(file.compat(), Transcoder::new(QuoteConfig::default()));
    let mut stdout = tokio::io::stdout();

    while let Some(chunk) = stream.next().await {
        stdout.write_all(&chunk?).await?;
    }
    stdout.flush().await?;

    Ok(())
}
