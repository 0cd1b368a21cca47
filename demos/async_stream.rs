//! Async streaming example.
//!
//! Several inputs are transcoded concurrently, each with its own transcoder.
//! The transcoder is synchronous and can also be driven from async code.
//!
//! Run with:
//!     cargo run --example async_stream --features async-io

use csvquote::{QuoteConfig, Transcoder, transcode_async};
use futures_util::StreamExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let inputs: Vec<Vec<u8>> = (0..3)
        .map(|id| {
            (0..1_000)
                .flat_map(|i| format!("{id},{i},\"a, b\nc\"\n").into_bytes())
                .collect()
        })
        .collect();

    println!("Transcoding {} streams concurrently...\n", inputs.len());

    let config = QuoteConfig::default().with_chunk_size(8 * 1024);

    let handles: Vec<_> = inputs
        .into_iter()
        .enumerate()
        .map(|(stream_id, data)| {
            tokio::spawn(async move {
                let mut stream = transcode_async(data.as_slice(), Transcoder::new(config));
                let mut chunks = 0;
                let mut lines = 0;
                while let Some(chunk) = stream.next().await {
                    let chunk = chunk?;
                    chunks += 1;
                    lines += chunk.iter().filter(|&&b| b == b'\n').count();
                }
                Ok::<_, csvquote::QuoteError>((stream_id, chunks, lines))
            })
        })
        .collect();

    for handle in handles {
        let (stream_id, chunks, lines) = handle.await??;
        println!("Stream {}: {} chunks, {} lines", stream_id, chunks, lines);
    }

    Ok(())
}
