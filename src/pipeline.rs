//! The daily run: read → fetch → merge → write archive → write summary.
//!
//! Every stage propagates its error immediately; there is no retry and no
//! partial-success reporting. Reading and fetching both happen before the
//! first write, so a network or parse failure leaves existing files untouched.
//! A crash between the two writes can leave them out of step; the next
//! successful run repairs that since both files are regenerated in full.

use crate::archive::{self, ArchiveError};
use crate::config::{ConfigError, WallpaperConfig};
use crate::fetch::{self, FetchError, ParseError};
use crate::merge::{distinct, merge};
use crate::record::Wallpaper;
use crate::summary::{self, SummaryError};
use chrono::Local;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Format of the "latest collection time" line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Error, Debug)]
pub enum RunError {
    #[error("loading config: {0}")]
    Config(#[from] ConfigError),
    #[error("reading archive: {0}")]
    ArchiveRead(#[source] ArchiveError),
    #[error("fetching wallpaper: {0}")]
    Fetch(#[from] FetchError),
    #[error("parsing API response: {0}")]
    Parse(#[from] ParseError),
    #[error("writing archive: {0}")]
    ArchiveWrite(#[source] ArchiveError),
    #[error("writing summary: {0}")]
    Summary(#[from] SummaryError),
}

/// What a successful run produced, for CLI output.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub latest: Wallpaper,
    /// Records found in the archive before this run.
    pub previous: usize,
    /// Distinct records written after merging.
    pub written: usize,
    /// Whether today's wallpaper was already in the archive.
    pub duplicate: bool,
    pub archive_path: PathBuf,
    pub summary_path: PathBuf,
}

/// Summary of an existing archive, for `check`.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub archive_path: PathBuf,
    pub records: usize,
    pub distinct: usize,
    pub latest: Option<Wallpaper>,
}

/// Current local time in [`TIMESTAMP_FORMAT`].
pub fn timestamp_now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Execute one full run inside `dir`, stamping both files with `timestamp`.
pub fn run(config: &WallpaperConfig, dir: &Path, timestamp: &str) -> Result<RunReport, RunError> {
    let archive_path = dir.join(&config.output.archive);
    let summary_path = dir.join(&config.output.summary);

    info!(path = %archive_path.display(), "reading archive");
    let history = archive::read_archive(&archive_path).map_err(RunError::ArchiveRead)?;
    let previous = history.len();

    let body = fetch::fetch_body(&config.api)?;
    let latest = fetch::parse_response(&body, &config.api.host)?;
    info!(date = latest.date(), description = latest.description(), "fetched wallpaper");

    let duplicate = history.contains(&latest);
    let merged = merge(history, latest.clone());
    let written = distinct(&merged).len();

    info!(path = %archive_path.display(), records = written, "writing archive");
    archive::write_archive(&archive_path, &config.output.title, timestamp, &merged)
        .map_err(RunError::ArchiveWrite)?;

    info!(path = %summary_path.display(), "writing summary");
    summary::write_summary(&summary_path, &config.output.title, timestamp, &merged)?;

    Ok(RunReport {
        latest,
        previous,
        written,
        duplicate,
        archive_path,
        summary_path,
    })
}

/// Read the archive without fetching or writing anything.
pub fn check(config: &WallpaperConfig, dir: &Path) -> Result<CheckReport, RunError> {
    let archive_path = dir.join(&config.output.archive);
    let records = archive::read_archive(&archive_path).map_err(RunError::ArchiveRead)?;
    Ok(CheckReport {
        records: records.len(),
        distinct: distinct(&records).len(),
        latest: records.first().cloned(),
        archive_path,
    })
}
