//! Async streaming support for transcoding.
//!
//! This module provides asynchronous transcoding using the `futures-io::AsyncRead`
//! trait, making it runtime-agnostic and compatible with tokio, async-std,
//! smol, and other async runtimes.
//!
//! - [`transcode_async`] - Creates an async stream of transcoded chunks from an async reader
//!
//! This module requires the `async-io` feature to be enabled.

mod stream;

pub use stream::{TranscodeStream, transcode_async};
