//! Loading the vector and device tables.
//!
//! Both files hold one entry per line; blank lines are skipped and
//! surrounding whitespace is ignored.

use super::DeviceTable;
use crate::utils::error::TableError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Load ISR addresses, one per non-empty line
pub fn load_vectors<R: BufRead>(reader: R) -> Result<Vec<String>, TableError> {
    let mut vectors = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let address = line.trim();
        if !address.is_empty() {
            vectors.push(address.to_string());
        }
    }

    debug!("Loaded {} vector table entries", vectors.len());
    Ok(vectors)
}

/// Load average service delays, one non-negative integer per non-empty line
///
/// # Errors
/// * `TableError::InvalidEntry` - a line is not a non-negative integer
pub fn load_delays<R: BufRead>(reader: R) -> Result<Vec<u64>, TableError> {
    let mut delays = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let content = line.trim();
        if content.is_empty() {
            continue;
        }

        let delay = content.parse::<u64>().map_err(|_| TableError::InvalidEntry {
            line: index + 1,
            content: content.to_string(),
        })?;
        delays.push(delay);
    }

    debug!("Loaded {} device table entries", delays.len());
    Ok(delays)
}

/// Load the vector table from a file
pub fn load_vector_file(path: impl AsRef<Path>) -> Result<Vec<String>, TableError> {
    load_vectors(open(path.as_ref())?)
}

/// Load the device delay table from a file
pub fn load_delay_file(path: impl AsRef<Path>) -> Result<Vec<u64>, TableError> {
    load_delays(open(path.as_ref())?)
}

/// Load both tables and pair them
///
/// **Public** - used by the simulate command
pub fn load_tables(
    vector_path: impl AsRef<Path>,
    device_path: impl AsRef<Path>,
) -> Result<DeviceTable, TableError> {
    let vectors = load_vector_file(vector_path)?;
    let delays = load_delay_file(device_path)?;

    let table = DeviceTable::new(vectors, delays);
    info!("Device tables ready: {} usable devices", table.len());

    Ok(table)
}

/// **Private** - open a table file, mapping absence to `SourceUnavailable`
fn open(path: &Path) -> Result<BufReader<File>, TableError> {
    debug!("Opening table: {}", path.display());

    File::open(path)
        .map(BufReader::new)
        .map_err(|source| TableError::SourceUnavailable {
            path: path.display().to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_load_vectors_skips_blank_lines() {
        let vectors = load_vectors(Cursor::new("0x01E3\n\n  0x029C  \n")).unwrap();
        assert_eq!(vectors, vec!["0x01E3", "0x029C"]);
    }

    #[test]
    fn test_load_delays() {
        let delays = load_delays(Cursor::new("110\n150\n\n90\n")).unwrap();
        assert_eq!(delays, vec![110, 150, 90]);
    }

    #[test]
    fn test_load_delays_invalid_entry() {
        let err = load_delays(Cursor::new("110\nslow\n")).unwrap_err();
        assert!(matches!(err, TableError::InvalidEntry { line: 2, .. }));
    }

    #[test]
    fn test_load_delays_rejects_negative() {
        assert!(load_delays(Cursor::new("-10\n")).is_err());
    }

    #[test]
    fn test_missing_table_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = load_vector_file(temp_dir.path().join("nope.txt"));
        assert!(matches!(result, Err(TableError::SourceUnavailable { .. })));
    }
}
