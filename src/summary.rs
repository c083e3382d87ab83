//! The summary page (`README.md`).
//!
//! Highlights the newest wallpaper and lays out every distinct record as a
//! three-column gallery table:
//!
//! ```text
//! ## Bing Wallpaper
//!
//! #### 🚀Latest collection time: 2024-01-15 08:00:00
//!
//! ![Frozen lake](https://.../th?id=OHR.Lake_UHD.jpg&w=960)
//! Today: [Frozen lake](https://.../th?id=OHR.Lake_UHD.jpg)
//! |      |      |      |
//! | :--: | :--: | :--: |
//! |![..](..) 2024-01-15 [download 4k](..)|![..](..) 2024-01-14 [download 4k](..)|![..](..) 2024-01-13 [download 4k](..)|
//! |![..](..) 2024-01-12 [download 4k](..)|
//! ```
//!
//! Each cell opens with `|`; a row is closed with `|` after every third cell,
//! and once more at the end if the last row was left open.

use crate::archive::render_header;
use crate::merge::distinct;
use crate::record::Wallpaper;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const COLUMNS: usize = 3;
const TABLE_HEADER: &str = "|      |      |      |\n| :--: | :--: | :--: |\n";

#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("cannot render a summary without any wallpapers")]
    EmptyArchive,
    #[error("failed to write summary {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Render the summary page. The first record is treated as today's wallpaper.
pub fn render_summary(
    title: &str,
    timestamp: &str,
    records: &[Wallpaper],
) -> Result<String, SummaryError> {
    let today = records.first().ok_or(SummaryError::EmptyArchive)?;

    let mut out = render_header(title, timestamp);
    out.push_str(&format!(
        "![{}]({})\n",
        today.description(),
        today.large_url()
    ));
    out.push_str(&format!(
        "Today: [{}]({})\n",
        today.description(),
        today.url()
    ));
    out.push_str(TABLE_HEADER);
    out.push_str(&render_gallery(&distinct(records)));
    Ok(out)
}

/// Gallery rows for already-deduplicated records.
fn render_gallery(records: &[Wallpaper]) -> String {
    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        out.push('|');
        out.push_str(&record.inline_markdown());
        if (i + 1) % COLUMNS == 0 {
            out.push_str("|\n");
        }
    }
    if records.len() % COLUMNS != 0 {
        out.push_str("|\n");
    }
    out
}

/// Overwrite (or create) the summary file.
pub fn write_summary(
    path: &Path,
    title: &str,
    timestamp: &str,
    records: &[Wallpaper],
) -> Result<(), SummaryError> {
    let content = render_summary(title, timestamp, records)?;
    fs::write(path, content).map_err(|source| SummaryError::Write {
        path: path.to_path_buf(),
        source,
    })
}
