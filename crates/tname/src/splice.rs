//! Regenerate the marked region of an existing header in place

use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

const BEGIN_TAG: &str = "--begin generated--";
const END_TAG: &str = "--end generated--";

/// Splice-specific errors
#[derive(Error, Debug)]
pub enum SpliceError {
    #[error("no line containing '--begin generated--' found")]
    MissingBegin,

    #[error("no line containing '--end generated--' after the begin marker (line {begin_line})")]
    MissingEnd { begin_line: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Replace everything strictly between the begin and end marker lines with
/// `body`. Marker lines and the rest of the text are kept byte for byte.
pub fn splice(header: &str, body: &str) -> Result<String, SpliceError> {
    let mut offset = 0usize;
    let mut begin = None;
    let mut end = None;

    for (idx, line) in header.split_inclusive('\n').enumerate() {
        let next = offset + line.len();
        match begin {
            None if line.contains(BEGIN_TAG) => begin = Some((idx + 1, next)),
            Some(_) if line.contains(END_TAG) => {
                end = Some(offset);
                break;
            }
            _ => {}
        }
        offset = next;
    }

    let (begin_line, body_start) = begin.ok_or(SpliceError::MissingBegin)?;
    let body_end = end.ok_or(SpliceError::MissingEnd { begin_line })?;

    let mut out = String::with_capacity(header.len() + body.len());
    out.push_str(&header[..body_start]);
    out.push_str(body);
    out.push_str(&header[body_end..]);
    Ok(out)
}

/// Leading spaces of the begin marker line, if there is one
pub fn marker_indent(header: &str) -> Option<usize> {
    header
        .lines()
        .find(|line| line.contains(BEGIN_TAG))
        .map(|line| line.len() - line.trim_start_matches(' ').len())
}

/// Splice generated text into the file at `path`.
///
/// `render` receives the begin marker's indentation and returns the body.
/// The file is only rewritten when its content changes. Returns whether it
/// did (or, with `check_only`, whether it would have).
pub fn splice_file<F>(path: &Path, check_only: bool, render: F) -> Result<bool, SpliceError>
where
    F: FnOnce(usize) -> String,
{
    let current = fs::read_to_string(path)?;
    let body = render(marker_indent(&current).unwrap_or(0));
    let updated = splice(&current, &body)?;

    if updated == current {
        info!(path = %path.display(), "generated region up to date");
        return Ok(false);
    }

    if !check_only {
        fs::write(path, &updated)?;
        info!(path = %path.display(), "generated region rewritten");
    }
    Ok(true)
}
