//! Stateless sentinel reversal.

use crate::config::{FIELD_SENTINEL, RECORD_SENTINEL};

/// Maps sentinels back to the configured delimiter and record separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Restorer {
    delimiter: u8,
    record_separator: u8,
}

impl Restorer {
    /// Creates a restorer for the given bytes.
    pub const fn new(delimiter: u8, record_separator: u8) -> Self {
        Self {
            delimiter,
            record_separator,
        }
    }

    /// Restores a single byte.
    #[inline]
    pub fn map(&self, byte: u8) -> u8 {
        match byte {
            FIELD_SENTINEL => self.delimiter,
            RECORD_SENTINEL => self.record_separator,
            other => other,
        }
    }
}
