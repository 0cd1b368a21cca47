//! Byte transcoders.
//!
//! - [`Transcoder`] - Stateful engine owning the quote state for one run
//! - [`Sanitizer`] - Quote-aware transition function
//! - [`Restorer`] - Sentinel-to-original mapping

mod engine;
mod restore;
mod sanitize;

pub use engine::Transcoder;
pub use restore::Restorer;
pub use sanitize::{QuoteState, Sanitizer};

use crate::config::{Mode, QuoteConfig};

/// Sanitizes a whole buffer with a fresh transcoder.
///
/// The mode in `config` is ignored.
///
/// ```
/// use csvquote::{sanitize, QuoteConfig};
///
/// let out = sanitize(&QuoteConfig::default(), b"a,\"b,c\",d\n");
/// assert_eq!(out, b"a,\"b\x1Fc\",d\n");
/// ```
pub fn sanitize(config: &QuoteConfig, data: &[u8]) -> Vec<u8> {
    run_whole(config.with_mode(Mode::Sanitize), data)
}

/// Restores a whole buffer.
///
/// The mode in `config` is ignored.
///
/// ```
/// use csvquote::{restore, QuoteConfig};
///
/// let out = restore(&QuoteConfig::default(), b"a,\"b\x1Fc\",d\n");
/// assert_eq!(out, b"a,\"b,c\",d\n");
/// ```
pub fn restore(config: &QuoteConfig, data: &[u8]) -> Vec<u8> {
    run_whole(config.with_mode(Mode::Restore), data)
}

fn run_whole(config: QuoteConfig, data: &[u8]) -> Vec<u8> {
    let mut out = data.to_vec();
    Transcoder::new(config).transcode_in_place(&mut out);
    out
}
