//! Async stream adapter for transcoding.
//!
//! This module provides asynchronous transcoding using the `futures-io::AsyncRead`
//! trait, making it runtime-agnostic and compatible with tokio, async-std,
//! smol, and other async runtimes.
//!
//! # Example
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use csvquote::{transcode_async, QuoteConfig, Transcoder};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), csvquote::QuoteError> {
//!     let mut stream = transcode_async(reader, Transcoder::new(QuoteConfig::default()));
//!
//!     while let Some(chunk) = stream.next().await {
//!         let chunk = chunk?;
//!         println!("Chunk: {} bytes", chunk.len());
//!     }
//!     Ok(())
//! }
//! ```

use std::io::ErrorKind;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;
use tracing::{debug, trace};

use crate::error::QuoteError;
use crate::transcode::Transcoder;

pin_project! {
    /// A stream that yields transcoded chunks from an async reader.
    ///
    /// This uses `futures_io::AsyncRead` which is runtime-agnostic.
    /// Works with tokio, async-std, smol, or any futures-compatible runtime.
    ///
    /// Chunks hold at most `chunk_size` bytes. The stream ends at end of
    /// input or after yielding the first error. In header mode it is empty
    /// and the reader is never polled.
    pub struct TranscodeStream<R> {
        #[pin]
        reader: R,
        transcoder: Transcoder,
        buffer: BytesMut,
        chunk_size: usize,
        finished: bool,
    }
}

impl<R> TranscodeStream<R> {
    /// Creates a new transcode stream from an async reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - An async reader implementing `AsyncRead`
    /// * `transcoder` - The transcoder to run, possibly mid-stream
    pub fn new(reader: R, transcoder: Transcoder) -> Self {
        let chunk_size = transcoder.config().chunk_size().max(1);
        let finished = !transcoder.mode().transforms();
        if finished {
            debug!("header mode has no transform, input left unread");
        }

        Self {
            reader,
            transcoder,
            buffer: BytesMut::with_capacity(chunk_size),
            chunk_size,
            finished,
        }
    }

    /// Returns the transcoder driving this stream.
    pub fn transcoder(&self) -> &Transcoder {
        &self.transcoder
    }

    /// Consumes the stream and returns the transcoder.
    ///
    /// The quote state is kept, so the transcoder can continue into the
    /// next input of the same logical stream.
    pub fn into_transcoder(self) -> Transcoder {
        self.transcoder
    }
}

impl<R: AsyncRead> Stream for TranscodeStream<R> {
    type Item = Result<Bytes, QuoteError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        loop {
            this.buffer.resize(*this.chunk_size, 0);
            match this.reader.as_mut().poll_read(cx, &mut this.buffer[..]) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Err(e)) if e.kind() == ErrorKind::Interrupted => continue,
                Poll::Ready(Err(e)) => {
                    this.buffer.clear();
                    *this.finished = true;
                    return Poll::Ready(Some(Err(QuoteError::Io(e))));
                }
                Poll::Ready(Ok(0)) => {
                    this.buffer.clear();
                    *this.finished = true;
                    debug!(
                        offset = this.transcoder.offset(),
                        quoted = this.transcoder.is_quoted(),
                        "end of input"
                    );
                    return Poll::Ready(None);
                }
                Poll::Ready(Ok(n)) => {
                    this.buffer.truncate(n);
                    this.transcoder.transcode_in_place(&mut this.buffer[..]);
                    trace!(len = n, offset = this.transcoder.offset(), "chunk transcoded");
                    return Poll::Ready(Some(Ok(this.buffer.split().freeze())));
                }
            }
        }
    }
}

/// Creates a transcode stream from an async reader.
///
/// Uses `futures_io::AsyncRead` for runtime-agnostic async I/O.
/// This works with any async runtime (tokio, async-std, smol, etc.).
///
/// # Runtime Compatibility
///
/// For tokio users, you can use `tokio_util::compat` to convert
/// `tokio::io::AsyncRead` to `futures_io::AsyncRead`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use csvquote::{transcode_async, QuoteConfig, Transcoder};
///
/// let tokio_reader = tokio::fs::File::open("data.csv").await?;
/// let stream = transcode_async(tokio_reader.compat(), Transcoder::new(QuoteConfig::default()));
/// ```
///
/// # Returns
///
/// A `TranscodeStream` that implements `Stream<Item = Result<Bytes, QuoteError>>`
pub fn transcode_async<R: AsyncRead>(reader: R, transcoder: Transcoder) -> TranscodeStream<R> {
    TranscodeStream::new(reader, transcoder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Mode, QuoteConfig};
    use futures_util::StreamExt;

    async fn collect_all<R: AsyncRead + Unpin>(
        stream: &mut TranscodeStream<R>,
    ) -> Result<Vec<u8>, QuoteError> {
        let mut out = Vec::new();
        while let Some(chunk) = stream.next().await {
            out.extend_from_slice(&chunk?);
        }
        Ok(out)
    }

    #[tokio::test]
    async fn test_transcode_stream_empty() {
        let reader: &[u8] = &[];
        let stream = TranscodeStream::new(reader, Transcoder::default());
        let chunks: Vec<_> = stream.collect().await;
        assert!(chunks.is_empty());
    }

    #[tokio::test]
    async fn test_transcode_stream_small_chunks() {
        let data = b"a,\"b,c\",d\n\"line1\nline2\",x\n";
        let reader: &[u8] = data;
        let config = QuoteConfig::default().with_chunk_size(3);
        let stream = TranscodeStream::new(reader, Transcoder::new(config));

        let chunks: Vec<_> = stream.collect().await;
        let chunks: Vec<Bytes> = chunks.into_iter().collect::<Result<Vec<_>, _>>().unwrap();

        assert!(chunks.iter().all(|c| c.len() <= 3));
        assert_eq!(
            chunks.concat(),
            b"a,\"b\x1Fc\",d\n\"line1\x1Eline2\",x\n".to_vec()
        );
    }

    #[tokio::test]
    async fn test_transcode_stream_state_continues_into_next_input() {
        let first: &[u8] = b"\"open,";
        let second: &[u8] = b"still\",closed\n";

        let mut stream = transcode_async(first, Transcoder::default());
        let mut out = collect_all(&mut stream).await.unwrap();
        let transcoder = stream.into_transcoder();
        assert!(transcoder.is_quoted());

        let mut stream = transcode_async(second, transcoder);
        out.extend(collect_all(&mut stream).await.unwrap());

        assert_eq!(out, b"\"open\x1Fstill\",closed\n");
    }

    #[tokio::test]
    async fn test_transcode_stream_header_mode() {
        let reader: &[u8] = b"a,b\n";
        let config = QuoteConfig::default().with_mode(Mode::Header);
        let stream = transcode_async(reader, Transcoder::new(config));
        let chunks: Vec<_> = stream.collect().await;
        assert!(chunks.is_empty());
    }
}
