//! csvquote
//!
//! Quote-aware byte transcoding for CSV/TSV streams.
//!
//! Line- and field-oriented tools (`cut`, `awk`, `grep`, `sort`) split on
//! every delimiter and newline, including the ones inside quoted fields.
//! `csvquote` hides those bytes behind non-printing sentinels so the tools
//! see each quoted field as atomic, then puts them back afterwards:
//!
//! - sanitize: in-quote delimiter -> `0x1F`, in-quote record separator -> `0x1E`
//! - restore: `0x1F` -> delimiter, `0x1E` -> record separator
//!
//! The crate intentionally:
//! - does NOT parse records or fields
//! - does NOT validate quoting (unbalanced quotes pass through)
//! - does NOT support multi-byte delimiters or quotes
//!
//! The transform is one byte in, one byte out, and any split of the input
//! into chunks produces the same output.
//!
//! # Sync
//!
//! ```no_run
//! use std::fs::File;
//! use std::io;
//! use csvquote::{copy, QuoteConfig, QuoteError, Transcoder};
//!
//! fn main() -> Result<(), QuoteError> {
//!     let file = File::open("data.csv")?;
//!     let mut transcoder = Transcoder::new(QuoteConfig::default());
//!
//!     copy(&mut transcoder, file, io::stdout().lock())?;
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
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
//!         println!("chunk {}", chunk.len());
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod driver;
mod error;
mod transcode;

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface
//

pub use config::{
    DEFAULT_CHUNK_SIZE, DEFAULT_DELIMITER, DEFAULT_QUOTE, DEFAULT_RECORD_SEPARATOR,
    FIELD_SENTINEL, Mode, QuoteConfig, RECORD_SENTINEL,
};
pub use driver::{TranscodeIter, copy, copy_paths};
pub use error::{QuoteError, Result};
pub use transcode::{QuoteState, Restorer, Sanitizer, Transcoder, restore, sanitize};

#[cfg(feature = "async-io")]
pub use async_stream::{TranscodeStream, transcode_async};
