//! Shared test utilities for the bing-wallpaper test suite.
//!
//! Provides record builders, archive fixtures on disk, canned API responses,
//! and proptest strategies for property tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_archive(&[wallpaper(2), wallpaper(1)]);
//! let records = read_archive(&tmp.path().join(ARCHIVE_FILE)).unwrap();
//! assert_eq!(records, vec![wallpaper(2), wallpaper(1)]);
//! ```

use proptest::prelude::*;
use std::path::Path;
use tempfile::TempDir;

use crate::archive;
use crate::record::Wallpaper;

/// Archive filename used by fixtures.
pub const ARCHIVE_FILE: &str = "bing-wallpaper.md";

/// Timestamp used wherever a render needs one.
pub const FIXED_TIMESTAMP: &str = "2024-01-15 08:00:00";

// =========================================================================
// Record builders
// =========================================================================

/// Deterministic record keyed by `n`. Different `n` → different record.
pub fn wallpaper(n: u32) -> Wallpaper {
    Wallpaper::new(
        format!("2024-01-{:02}", n % 28 + 1),
        format!("Wallpaper {n} (© Photographer {n}/Getty Images)"),
        format!("https://cn.bing.com/th?id=OHR.Wallpaper{n}_ZH-CN{n}_UHD.jpg"),
    )
}

/// `count` distinct records, newest first.
pub fn wallpapers(count: u32) -> Vec<Wallpaper> {
    (0..count).rev().map(wallpaper).collect()
}

// =========================================================================
// Filesystem fixtures
// =========================================================================

/// Write an archive containing `records` into a fresh temp directory.
pub fn setup_archive(records: &[Wallpaper]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    archive::write_archive(
        &tmp.path().join(ARCHIVE_FILE),
        "Bing Wallpaper",
        FIXED_TIMESTAMP,
        records,
    )
    .unwrap();
    tmp
}

/// Read a file that a test expects to exist. Panics with the path on miss.
pub fn read_file(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

// =========================================================================
// API responses
// =========================================================================

/// A response body shaped like the real `HPImageArchive` JSON.
pub fn api_response(url: &str, copyright: &str, enddate: &str) -> String {
    serde_json::json!({
        "images": [{
            "startdate": "20240114",
            "fullstartdate": "202401141600",
            "enddate": enddate,
            "url": url,
            "urlbase": "/th?id=OHR.FrozenLake_ZH-CN123",
            "copyright": copyright,
            "copyrightlink": "https://www.bing.com/search?q=lake",
            "title": "",
            "hsh": "abc123"
        }],
        "tooltips": {
            "loading": "正在加载...",
            "previous": "上一个图像",
            "next": "下一个图像"
        }
    })
    .to_string()
}

// =========================================================================
// Proptest strategies
// =========================================================================

/// Arbitrary record that survives the archive micro-format: single-line
/// description, URL without `&`, whitespace or parentheses.
pub fn arb_wallpaper() -> impl Strategy<Value = Wallpaper> {
    (
        "20[0-9]{2}-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9])",
        "[^\n\r]{0,40}",
        "https://cn\\.bing\\.com/th\\?id=OHR\\.[A-Za-z0-9_-]{1,24}_UHD\\.jpg",
    )
        .prop_map(|(date, description, url)| Wallpaper::new(date, description, url))
}

/// Record drawn from a small pool, so generated sequences contain duplicates.
pub fn pooled_wallpaper() -> impl Strategy<Value = Wallpaper> {
    (0u32..6).prop_map(wallpaper)
}
