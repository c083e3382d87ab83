//! The running archive file (`bing-wallpaper.md`).
//!
//! The archive is both an output and the only persisted state: each run reads
//! it back, prepends today's wallpaper and rewrites it in full.
//!
//! ## File Format
//!
//! ```text
//! ## Bing Wallpaper
//!
//! #### 🚀Latest collection time: 2024-01-15 08:00:00
//!
//! 2024-01-15 | [Frozen lake (© Someone/Getty Images)](https://cn.bing.com/th?id=OHR.FrozenLake_UHD.jpg)
//!
//! 2024-01-14 | [Desert dunes (© Someone Else)](https://cn.bing.com/th?id=OHR.Dunes_UHD.jpg)
//!
//! ```
//!
//! Data rows follow the micro-format `<date> | [<description>](<url>)`. The
//! separator tokens are a contract between [`write_archive`] and
//! [`read_archive`]: every row written must parse back into an equal record.
//! Lines that are not data rows (title, timestamp, blank lines) are skipped
//! on read.
//!
//! ## Missing File
//!
//! A missing archive is treated as empty history, so the very first run works
//! without seeding the file.

use crate::merge::distinct;
use crate::record::Wallpaper;
use regex::Regex;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("failed to read archive {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write archive {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// `<date> | [<description>](<url>)`. The date stops at the first separator;
/// the description runs to the last `](` so captions may contain brackets.
/// Whitespace around the separator and at either end of the line is ignored,
/// so hand-edited rows survive the next rewrite.
static ROW_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<date>.*?)\s+\|\s*\[(?P<description>.*)\]\((?P<url>.*)\)\s*$")
        .expect("archive row pattern must compile")
});

/// Parse one archive line. Returns `None` for anything that is not a data row.
pub fn parse_row(line: &str) -> Option<Wallpaper> {
    let caps = ROW_PATTERN.captures(line)?;
    Some(Wallpaper::new(
        &caps["date"],
        &caps["description"],
        &caps["url"],
    ))
}

/// Read all records from an archive file, in file order (newest first).
pub fn read_archive(path: &Path) -> Result<Vec<Wallpaper>, ArchiveError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no archive yet, starting with empty history");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(ArchiveError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let records: Vec<Wallpaper> = content.lines().filter_map(parse_row).collect();
    debug!(path = %path.display(), rows = records.len(), "parsed archive");
    Ok(records)
}

/// Title and timestamp block shared by the archive and the summary page.
pub(crate) fn render_header(title: &str, timestamp: &str) -> String {
    format!("## {title}\n\n#### 🚀Latest collection time: {timestamp}\n\n")
}

/// Render the full archive: header followed by one row per distinct record.
pub fn render_archive(title: &str, timestamp: &str, records: &[Wallpaper]) -> String {
    let mut out = render_header(title, timestamp);
    for record in distinct(records) {
        out.push_str(&record.table_row());
    }
    out
}

/// Overwrite (or create) the archive file with the rendered content.
pub fn write_archive(
    path: &Path,
    title: &str,
    timestamp: &str,
    records: &[Wallpaper],
) -> Result<(), ArchiveError> {
    let content = render_archive(title, timestamp, records);
    fs::write(path, content).map_err(|source| ArchiveError::Write {
        path: path.to_path_buf(),
        source,
    })
}
