//! Error types for csvquote.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while transcoding a stream.
///
/// Unbalanced quoting is never an error: the transcoder has no notion of a
/// well-formed record and simply ends the run in whatever state it reached.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// An I/O error occurred while reading input or writing output.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A named input could not be opened.
    #[error("failed to open file {}: {source}", path.display())]
    Open {
        /// The path that was passed in.
        path: PathBuf,
        /// The underlying open failure.
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QuoteError>;
