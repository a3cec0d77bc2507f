//! Reading the raw trace in file order.
//!
//! Order is significant: it defines simulated time. Lines are kept verbatim
//! (with their 1-based line number) so the driver can report problems
//! against the source.

use crate::utils::error::TraceError;
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One raw line of the trace with its position in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceLine {
    /// 1-based line number in the source
    pub number: usize,

    /// Line content without the trailing newline
    pub text: String,

    /// Source bytes were not valid UTF-8; `text` holds a lossy decoding
    pub invalid_utf8: bool,
}

impl TraceLine {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
            invalid_utf8: false,
        }
    }

    /// Decode raw line bytes, replacing invalid UTF-8 sequences
    pub fn from_bytes(number: usize, bytes: &[u8]) -> Self {
        match std::str::from_utf8(bytes) {
            Ok(text) => Self::new(number, text),
            Err(_) => {
                warn!("Line {} is not valid UTF-8", number);
                Self {
                    number,
                    text: String::from_utf8_lossy(bytes).into_owned(),
                    invalid_utf8: true,
                }
            }
        }
    }

    /// True for lines the driver skips silently
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Read every line of a trace from any buffered reader
///
/// **Public** - collaborator entry point used by the driver and tests
///
/// Lines are read as bytes so one badly encoded line cannot abort the run.
pub fn read_trace<R: BufRead>(mut reader: R) -> Result<Vec<TraceLine>, TraceError> {
    let mut lines = Vec::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let mut content = buf.as_slice();
        if let Some(rest) = content.strip_suffix(b"\n") {
            content = rest;
        }
        if let Some(rest) = content.strip_suffix(b"\r") {
            content = rest;
        }

        lines.push(TraceLine::from_bytes(lines.len() + 1, content));
    }

    debug!("Read {} trace lines", lines.len());
    Ok(lines)
}

/// Read a trace file from disk
///
/// # Errors
/// * `TraceError::SourceUnavailable` - file missing or unreadable
/// * `TraceError::ReadFailed` - I/O error while reading
pub fn read_trace_file(path: impl AsRef<Path>) -> Result<Vec<TraceLine>, TraceError> {
    let path = path.as_ref();

    info!("Reading trace from: {}", path.display());

    let file = File::open(path).map_err(|source| TraceError::SourceUnavailable {
        path: path.display().to_string(),
        source,
    })?;

    read_trace(BufReader::new(file))
}

/// Build trace lines from in-memory strings (numbered from 1)
pub fn lines_from<I, S>(raw: I) -> Vec<TraceLine>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    raw.into_iter()
        .enumerate()
        .map(|(index, text)| TraceLine::new(index + 1, text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_trace_preserves_order_and_numbers() {
        let input = "CPU, 10\n\nSYSCALL, 1\r\nEND_IO, 1\n";
        let lines = read_trace(Cursor::new(input)).unwrap();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], TraceLine::new(1, "CPU, 10"));
        assert!(lines[1].is_blank());
        assert_eq!(lines[2], TraceLine::new(3, "SYSCALL, 1"));
        assert_eq!(lines[3].number, 4);
    }

    #[test]
    fn test_read_trace_invalid_utf8_is_lossy() {
        let lines = read_trace(Cursor::new(b"CPU, 1\n\xff, 2\nCPU, 3".to_vec())).unwrap();

        assert_eq!(lines.len(), 3);
        assert!(!lines[0].invalid_utf8);
        assert!(lines[1].invalid_utf8);
        assert_eq!(lines[1].text, "\u{FFFD}, 2");
        assert_eq!(lines[2], TraceLine::new(3, "CPU, 3"));
    }

    #[test]
    fn test_read_trace_file_missing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = read_trace_file(temp_dir.path().join("missing.txt"));
        assert!(matches!(result, Err(TraceError::SourceUnavailable { .. })));
    }

    #[test]
    fn test_lines_from() {
        let lines = lines_from(["CPU, 1", "FOO"]);
        assert_eq!(lines[1], TraceLine::new(2, "FOO"));
    }
}
