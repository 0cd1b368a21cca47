//! Chunked reader adapter - TranscodeIter.
//!
//! Reads a [`std::io::Read`] source in chunks of the configured size and
//! yields each chunk transcoded. Only one chunk is held at a time; the
//! buffer is reclaimed once the caller drops the previous chunk.

use std::io::{ErrorKind, Read};

use bytes::{Bytes, BytesMut};
use tracing::{debug, trace};

use crate::error::QuoteError;
use crate::transcode::Transcoder;

/// An iterator that yields transcoded chunks from a reader.
///
/// Created by [`Transcoder::transcode`]. Each item holds at most
/// `chunk_size` bytes and is exactly as long as the bytes read for it.
/// Reads interrupted by a signal are retried; any other read error is
/// yielded once and ends the iteration.
///
/// In header mode the iterator is empty and the reader is never touched.
///
/// # Example
///
/// ```
/// use csvquote::{QuoteConfig, Transcoder};
/// use std::io::Cursor;
///
/// let mut transcoder = Transcoder::new(QuoteConfig::default().with_chunk_size(4));
/// let mut iter = transcoder.transcode(Cursor::new(&b"\"1,2\",3\n"[..]));
///
/// assert_eq!(&iter.next().unwrap()?[..], b"\"1\x1F2");
/// assert_eq!(&iter.next().unwrap()?[..], b"\",3\n");
/// assert!(iter.next().is_none());
/// # Ok::<(), csvquote::QuoteError>(())
/// ```
pub struct TranscodeIter<'a, R> {
    reader: R,
    transcoder: &'a mut Transcoder,
    buffer: BytesMut,
    chunk_size: usize,
    finished: bool,
}

impl<'a, R: Read> TranscodeIter<'a, R> {
    pub(crate) fn new(reader: R, transcoder: &'a mut Transcoder) -> Self {
        let config = *transcoder.config();
        let chunk_size = config.chunk_size().max(1);

        debug!(
            delimiter = config.delimiter(),
            quote = config.quote(),
            record_separator = config.record_separator(),
            mode = %config.mode(),
            chunk_size,
            "transcoding stream"
        );

        let finished = !config.mode().transforms();
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
}

impl<R: Read> Iterator for TranscodeIter<'_, R> {
    type Item = Result<Bytes, QuoteError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            self.buffer.resize(self.chunk_size, 0);
            match self.reader.read(&mut self.buffer[..]) {
                Ok(0) => {
                    self.buffer.clear();
                    self.finished = true;
                    debug!(
                        offset = self.transcoder.offset(),
                        quoted = self.transcoder.is_quoted(),
                        "end of input"
                    );
                    return None;
                }
                Ok(n) => {
                    self.buffer.truncate(n);
                    self.transcoder.transcode_in_place(&mut self.buffer);
                    trace!(len = n, offset = self.transcoder.offset(), "chunk transcoded");
                    return Some(Ok(self.buffer.split().freeze()));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.buffer.clear();
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Mode, QuoteConfig};
    use std::io::{self, Cursor};

    /// Reader that fails with `Interrupted` before every real read.
    struct Flaky<R> {
        inner: R,
        interrupt_next: bool,
    }

    impl<R: Read> Read for Flaky<R> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt_next = !self.interrupt_next;
            if self.interrupt_next {
                return Err(io::Error::new(ErrorKind::Interrupted, "signal"));
            }
            self.inner.read(buf)
        }
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }
    }

    #[test]
    fn test_iter_empty() {
        let mut transcoder = Transcoder::default();
        assert!(transcoder.transcode(Cursor::new(&b""[..])).next().is_none());
    }

    #[test]
    fn test_iter_chunks_bounded_by_chunk_size() {
        let data: Vec<u8> = (0..1000).map(|i| (i % 256) as u8).collect();
        let mut transcoder = Transcoder::new(QuoteConfig::default().with_chunk_size(64));

        let chunks: Vec<_> = transcoder
            .transcode(Cursor::new(&data))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert!(chunks.iter().all(|c| c.len() <= 64));
        let total_len: usize = chunks.iter().map(|c| c.len()).sum();
        assert_eq!(total_len, data.len());
        assert_eq!(transcoder.offset(), data.len() as u64);
    }

    #[test]
    fn test_iter_retries_interrupted_reads() {
        let reader = Flaky {
            inner: Cursor::new(&b"\"a,b\"\n"[..]),
            interrupt_next: false,
        };
        let mut transcoder = Transcoder::new(QuoteConfig::default().with_chunk_size(2));
        let out: Vec<u8> = transcoder
            .transcode(reader)
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
            .concat();
        assert_eq!(out, b"\"a\x1Fb\"\n");
    }

    #[test]
    fn test_iter_stops_after_error() {
        let mut transcoder = Transcoder::default();
        let mut iter = transcoder.transcode(Broken);
        assert!(matches!(iter.next(), Some(Err(QuoteError::Io(_)))));
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_iter_header_mode_reads_nothing() {
        let mut transcoder = Transcoder::new(QuoteConfig::default().with_mode(Mode::Header));
        // Broken would error if it were read
        assert!(transcoder.transcode(Broken).next().is_none());
    }
}
