//! Quote-aware sanitizing state machine.
//!
//! Walks the stream one byte at a time and tracks whether the current byte
//! sits inside a quoted field. Inside quotes, the delimiter becomes
//! [`FIELD_SENTINEL`] and the record separator becomes [`RECORD_SENTINEL`].
//! Every other byte, and every byte outside quotes, passes through.
//!
//! A quote seen while quoted is ambiguous: it either closes the field or is
//! the first half of a doubled (escaped) quote. The machine parks in
//! [`QuoteState::PendingQuoteEnd`] and lets the next byte decide. Because the
//! decision only needs the state value, a chunk boundary may fall anywhere,
//! including between the two quotes of an escape.

use crate::config::{FIELD_SENTINEL, RECORD_SENTINEL};

/// Position of the stream relative to quoted fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuoteState {
    /// Outside any quoted field.
    #[default]
    Unquoted,
    /// Inside a quoted field.
    Quoted,
    /// Saw a quote while quoted; the next byte decides whether it was an
    /// escaped quote or the end of the field.
    PendingQuoteEnd,
}

/// Sanitizing transition function for one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sanitizer {
    delimiter: u8,
    quote: u8,
    record_separator: u8,
}

impl Sanitizer {
    /// Creates a sanitizer for the given bytes.
    pub const fn new(delimiter: u8, quote: u8, record_separator: u8) -> Self {
        Self {
            delimiter,
            quote,
            record_separator,
        }
    }

    /// Maps one input byte to its output byte and the next state.
    ///
    /// The byte that follows a closing quote is emitted untouched even when
    /// it is the delimiter or record separator: the field already ended.
    #[inline]
    pub fn step(&self, state: QuoteState, byte: u8) -> (u8, QuoteState) {
        match state {
            QuoteState::Unquoted => {
                if byte == self.quote {
                    (byte, QuoteState::Quoted)
                } else {
                    (byte, QuoteState::Unquoted)
                }
            }
            QuoteState::Quoted => {
                if byte == self.quote {
                    (byte, QuoteState::PendingQuoteEnd)
                } else if byte == self.delimiter {
                    (FIELD_SENTINEL, QuoteState::Quoted)
                } else if byte == self.record_separator {
                    (RECORD_SENTINEL, QuoteState::Quoted)
                } else {
                    (byte, QuoteState::Quoted)
                }
            }
            QuoteState::PendingQuoteEnd => {
                if byte == self.quote {
                    (byte, QuoteState::Quoted)
                } else {
                    (byte, QuoteState::Unquoted)
                }
            }
        }
    }
}
