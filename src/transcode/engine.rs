//! Core transcoding engine - Transcoder with streaming API.
//!
//! This module ties the sanitize state machine and the restore table to a
//! configuration and owns the quote state for the whole run:
//!
//! - [`Transcoder`] - Stateful engine selected once from [`Mode`]
//! - `push()` - Feed data in any size (1 byte, 4KB, 1MB, etc.)
//! - `transcode_in_place()` - Rewrite a buffer without allocating
//!
//! # Example
//!
//! ```
//! use csvquote::{QuoteConfig, Transcoder};
//!
//! let mut transcoder = Transcoder::new(QuoteConfig::default());
//!
//! // The quoted field spans both pushes
//! let first = transcoder.push(b"a,\"b,");
//! let second = transcoder.push(b"c\",d\n");
//!
//! assert_eq!(&first[..], b"a,\"b\x1F");
//! assert_eq!(&second[..], b"c\",d\n");
//! ```

use std::io::Read;

use bytes::{Bytes, BytesMut};

use super::restore::Restorer;
use super::sanitize::{QuoteState, Sanitizer};
use crate::config::{Mode, QuoteConfig};
use crate::driver::TranscodeIter;

/// Mode implementation chosen at construction.
#[derive(Debug, Clone, Copy)]
enum Kind {
    Sanitize(Sanitizer),
    Restore(Restorer),
    Header,
}

/// A transcoder that rewrites a byte stream one byte at a time.
///
/// `Transcoder` owns the [`QuoteState`] for one logical stream. Feed it every
/// byte of the stream in order, through as many calls as convenient, and the
/// output is the same as if the stream had been fed in one piece.
///
/// # Determinism
///
/// Identical byte streams produce identical output, regardless of:
/// - How many bytes are pushed at once (1 byte vs 1MB)
/// - Where call boundaries fall (even between the two quotes of an escape)
/// - Number of `push()` calls
///
/// # Length
///
/// Every mode maps one byte to exactly one byte, so output length always
/// equals input length.
///
/// # Example
///
/// ```
/// use csvquote::{Mode, QuoteConfig, Transcoder};
///
/// let mut sanitizer = Transcoder::new(QuoteConfig::default());
/// let hidden = sanitizer.push(b"\"line1\nline2\",x\n");
/// assert_eq!(&hidden[..], b"\"line1\x1Eline2\",x\n");
///
/// let mut restorer = Transcoder::new(QuoteConfig::default().with_mode(Mode::Restore));
/// let shown = restorer.push(&hidden);
/// assert_eq!(&shown[..], b"\"line1\nline2\",x\n");
/// ```
#[derive(Debug, Clone)]
pub struct Transcoder {
    kind: Kind,
    state: QuoteState,
    offset: u64,
    config: QuoteConfig,
}

impl Transcoder {
    /// Creates a new transcoder with the given configuration.
    ///
    /// The configuration is taken as is; call [`QuoteConfig::validate`]
    /// first if it was assembled with the unchecked builder setters.
    pub fn new(config: QuoteConfig) -> Self {
        let kind = match config.mode() {
            Mode::Sanitize => Kind::Sanitize(Sanitizer::new(
                config.delimiter(),
                config.quote(),
                config.record_separator(),
            )),
            Mode::Restore => Kind::Restore(Restorer::new(
                config.delimiter(),
                config.record_separator(),
            )),
            Mode::Header => Kind::Header,
        };

        Self {
            kind,
            state: QuoteState::default(),
            offset: 0,
            config,
        }
    }

    /// Transcodes a single byte and advances the state.
    #[inline]
    pub fn transcode_byte(&mut self, byte: u8) -> u8 {
        self.offset += 1;
        match &self.kind {
            Kind::Sanitize(sanitizer) => {
                let (emitted, next) = sanitizer.step(self.state, byte);
                self.state = next;
                emitted
            }
            Kind::Restore(restorer) => restorer.map(byte),
            Kind::Header => byte,
        }
    }

    /// Rewrites `buf` in place.
    pub fn transcode_in_place(&mut self, buf: &mut [u8]) {
        self.offset += buf.len() as u64;
        match &self.kind {
            Kind::Sanitize(sanitizer) => {
                let mut state = self.state;
                for byte in buf.iter_mut() {
                    let (emitted, next) = sanitizer.step(state, *byte);
                    *byte = emitted;
                    state = next;
                }
                self.state = state;
            }
            Kind::Restore(restorer) => {
                for byte in buf.iter_mut() {
                    *byte = restorer.map(*byte);
                }
            }
            Kind::Header => {}
        }
    }

    /// Transcodes `data` into a new buffer, keeping state for the next call.
    ///
    /// # Example
    ///
    /// ```
    /// use csvquote::{QuoteConfig, Transcoder};
    ///
    /// let mut transcoder = Transcoder::new(QuoteConfig::default());
    /// let out = transcoder.push(b"\"a\"\"b\",c\n");
    ///
    /// // Doubled quote kept, comma after the closing quote untouched
    /// assert_eq!(&out[..], b"\"a\"\"b\",c\n");
    /// ```
    pub fn push(&mut self, data: &[u8]) -> Bytes {
        let mut out = BytesMut::from(data);
        self.transcode_in_place(&mut out);
        out.freeze()
    }

    /// Creates a chunking iterator over a reader.
    ///
    /// The iterator borrows the transcoder, so the quote state carries on
    /// into whatever reader is transcoded next.
    ///
    /// # Example
    ///
    /// ```
    /// use csvquote::{QuoteConfig, Transcoder};
    /// use std::io::Cursor;
    ///
    /// let mut transcoder = Transcoder::new(QuoteConfig::default().with_chunk_size(3));
    /// let out: Vec<u8> = transcoder
    ///     .transcode(Cursor::new(&b"a,\"b,c\",d\n"[..]))
    ///     .collect::<Result<Vec<_>, _>>()?
    ///     .concat();
    ///
    /// assert_eq!(out, b"a,\"b\x1Fc\",d\n");
    /// # Ok::<(), csvquote::QuoteError>(())
    /// ```
    pub fn transcode<R: Read>(&mut self, reader: R) -> TranscodeIter<'_, R> {
        TranscodeIter::new(reader, self)
    }

    /// Resets the transcoder state for a new, unrelated stream.
    ///
    /// Clears the quote state and offset.
    pub fn reset(&mut self) {
        self.state = QuoteState::default();
        self.offset = 0;
    }

    /// Returns the current quote state.
    ///
    /// Always [`QuoteState::Unquoted`] outside sanitize mode.
    pub fn state(&self) -> QuoteState {
        self.state
    }

    /// Returns `true` if the stream currently sits inside a quoted field.
    pub fn is_quoted(&self) -> bool {
        self.state != QuoteState::Unquoted
    }

    /// Returns the number of bytes transcoded so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the mode this transcoder runs in.
    pub fn mode(&self) -> Mode {
        self.config.mode()
    }

    /// Returns the configuration used by this transcoder.
    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }
}

impl Default for Transcoder {
    fn default() -> Self {
        Self::new(QuoteConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcoder_empty() {
        let mut transcoder = Transcoder::default();
        assert!(transcoder.push(b"").is_empty());
        assert_eq!(transcoder.offset(), 0);
        assert_eq!(transcoder.state(), QuoteState::Unquoted);
    }

    #[test]
    fn test_byte_and_slice_paths_agree() {
        let input = b"x,\"y\"\",\nz\",w\n\"open,";

        let mut by_byte = Transcoder::default();
        let bytes: Vec<u8> = input.iter().map(|&b| by_byte.transcode_byte(b)).collect();

        let mut by_slice = Transcoder::default();
        let mut buf = input.to_vec();
        by_slice.transcode_in_place(&mut buf);

        assert_eq!(bytes, buf);
        assert_eq!(by_byte.state(), by_slice.state());
        assert_eq!(by_byte.offset(), by_slice.offset());
    }

    #[test]
    fn test_state_spans_pushes() {
        let mut transcoder = Transcoder::default();
        transcoder.push(b"a,\"b");
        assert!(transcoder.is_quoted());

        // Escape split across two pushes
        transcoder.push(b"\"");
        assert_eq!(transcoder.state(), QuoteState::PendingQuoteEnd);
        let out = transcoder.push(b"\",c");
        assert_eq!(&out[..], b"\"\x1Fc");
        assert_eq!(transcoder.state(), QuoteState::Quoted);
    }

    #[test]
    fn test_restore_is_stateless() {
        let mut transcoder = Transcoder::new(QuoteConfig::default().with_mode(Mode::Restore));
        let out = transcoder.push(b"\"a\x1Fb\x1E\"");
        assert_eq!(&out[..], b"\"a,b\n\"");
        assert_eq!(transcoder.state(), QuoteState::Unquoted);
        assert!(!transcoder.is_quoted());
    }

    #[test]
    fn test_header_mode_is_identity() {
        let mut transcoder = Transcoder::new(QuoteConfig::default().with_mode(Mode::Header));
        let out = transcoder.push(b"\"a,b\"\x1F");
        assert_eq!(&out[..], b"\"a,b\"\x1F");
    }

    #[test]
    fn test_reset() {
        let mut transcoder = Transcoder::default();
        transcoder.push(b"\"open");
        assert!(transcoder.is_quoted());
        assert_eq!(transcoder.offset(), 5);

        transcoder.reset();
        assert!(!transcoder.is_quoted());
        assert_eq!(transcoder.offset(), 0);
        assert_eq!(&transcoder.push(b"a,b")[..], b"a,b");
    }
}
