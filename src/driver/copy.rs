//! Reader-to-writer copy loops.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{QuoteError, Result};
use crate::transcode::Transcoder;

/// Copies `reader` to `writer` through the transcoder.
///
/// Each chunk is written in full before the next one is read. A failed or
/// short write aborts the copy; output already written stays written.
/// Returns the number of bytes written.
///
/// # Example
///
/// ```
/// use csvquote::{copy, QuoteConfig, Transcoder};
///
/// let mut transcoder = Transcoder::new(QuoteConfig::default());
/// let mut out = Vec::new();
/// let written = copy(&mut transcoder, &b"a,\"b,c\",d\n"[..], &mut out)?;
///
/// assert_eq!(written, 10);
/// assert_eq!(out, b"a,\"b\x1Fc\",d\n");
/// # Ok::<(), csvquote::QuoteError>(())
/// ```
pub fn copy<R: Read, W: Write>(
    transcoder: &mut Transcoder,
    reader: R,
    mut writer: W,
) -> Result<u64> {
    let mut written = 0u64;
    for chunk in transcoder.transcode(reader) {
        let chunk = chunk?;
        writer.write_all(&chunk)?;
        written += chunk.len() as u64;
    }
    writer.flush()?;
    Ok(written)
}

/// Copies each file in order to `writer` through one transcoder.
///
/// The quote state is not reset between files: the inputs are treated as
/// one logical stream, so a quoted field may open in one file and close in
/// the next. The first file that cannot be opened aborts the run.
pub fn copy_paths<I, P, W>(transcoder: &mut Transcoder, paths: I, mut writer: W) -> Result<u64>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
    W: Write,
{
    let mut written = 0u64;
    for path in paths {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| QuoteError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), quoted = transcoder.is_quoted(), "input opened");
        written += copy(transcoder, file, &mut writer)?;
    }
    Ok(written)
}
