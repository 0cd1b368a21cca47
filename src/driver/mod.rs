//! Streaming driver for moving bytes through a transcoder.
//!
//! - [`TranscodeIter`] - Lazy iterator of transcoded chunks from a reader
//! - [`copy`] - Reader to writer, chunk by chunk
//! - [`copy_paths`] - Several files to one writer, one continuous state

mod copy;
mod iter;

pub use copy::{copy, copy_paths};
pub use iter::TranscodeIter;
