//! Configuration for transcoding behavior.
//!
//! - [`QuoteConfig`] - The three significant bytes, the mode and the driver chunk size
//! - [`Mode`] - Which direction the transcoder runs
//!
//! # Example
//!
//! ```
//! use csvquote::{Mode, QuoteConfig};
//!
//! // Tab separated, restoring
//! let config = QuoteConfig::default()
//!     .with_delimiter(b'\t')
//!     .with_mode(Mode::Restore);
//! config.validate()?;
//!
//! # Ok::<(), csvquote::QuoteError>(())
//! ```

use std::fmt;

use crate::error::QuoteError;

/// Sentinel written in place of a delimiter found inside a quoted field
/// (ASCII unit separator).
pub const FIELD_SENTINEL: u8 = 0x1F;

/// Sentinel written in place of a record separator found inside a quoted
/// field (ASCII record separator).
pub const RECORD_SENTINEL: u8 = 0x1E;

/// Default field delimiter.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Default quote character.
pub const DEFAULT_QUOTE: u8 = b'"';

/// Default record separator.
pub const DEFAULT_RECORD_SEPARATOR: u8 = b'\n';

/// Default driver chunk size (4 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 4 * 1024;

/// Direction of the transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Hide in-quote delimiters and record separators behind sentinels.
    #[default]
    Sanitize,
    /// Turn sentinels back into the configured bytes.
    Restore,
    /// Recognized placeholder. Consumes no input and produces no output.
    Header,
}

impl Mode {
    /// Returns `true` if this mode reads and rewrites input.
    pub const fn transforms(self) -> bool {
        !matches!(self, Mode::Header)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Sanitize => "sanitize",
            Mode::Restore => "restore",
            Mode::Header => "header",
        };
        f.write_str(name)
    }
}

/// Configuration for a transcoding run.
///
/// The delimiter, quote and record separator must be pairwise distinct.
/// Input must not already contain [`FIELD_SENTINEL`] or [`RECORD_SENTINEL`]
/// if the output is going to be restored: restore cannot tell a genuine
/// sentinel from a substituted one. That second condition is not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuoteConfig {
    delimiter: u8,
    quote: u8,
    record_separator: u8,
    mode: Mode,
    chunk_size: usize,
}

impl QuoteConfig {
    /// Creates a new sanitizing configuration.
    ///
    /// Returns error if any two of the bytes are equal.
    pub fn new(delimiter: u8, quote: u8, record_separator: u8) -> Result<Self, QuoteError> {
        let config = Self {
            delimiter,
            quote,
            record_separator,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the quote character.
    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    /// Sets the record separator.
    pub fn with_record_separator(mut self, record_separator: u8) -> Self {
        self.record_separator = record_separator;
        self
    }

    /// Sets the mode.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the driver chunk size in bytes.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Returns the field delimiter.
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Returns the quote character.
    pub fn quote(&self) -> u8 {
        self.quote
    }

    /// Returns the record separator.
    pub fn record_separator(&self) -> u8 {
        self.record_separator
    }

    /// Returns the mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the driver chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), QuoteError> {
        if self.delimiter == self.quote {
            return Err(QuoteError::InvalidConfig {
                message: "delimiter and quote must differ",
            });
        }

        if self.delimiter == self.record_separator {
            return Err(QuoteError::InvalidConfig {
                message: "delimiter and record separator must differ",
            });
        }

        if self.quote == self.record_separator {
            return Err(QuoteError::InvalidConfig {
                message: "quote and record separator must differ",
            });
        }

        if self.chunk_size == 0 {
            return Err(QuoteError::InvalidConfig {
                message: "chunk size must be non-zero",
            });
        }

        Ok(())
    }
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            quote: DEFAULT_QUOTE,
            record_separator: DEFAULT_RECORD_SEPARATOR,
            mode: Mode::Sanitize,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}
