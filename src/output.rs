//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects. Diagnostics go through `tracing` on
//! stderr; this module is only the final, human-facing result.
//!
//! # Output Format
//!
//! ## Run
//!
//! ```text
//! Today 2024-01-15 Frozen lake (© Someone/Getty Images)
//!     Image: https://cn.bing.com/th?id=OHR.FrozenLake_ZH-CN123_UHD.jpg
//!     Archive: bing-wallpaper.md (41 → 42 wallpapers)
//!     Summary: README.md
//! ```
//!
//! ## Check
//!
//! ```text
//! Archive bing-wallpaper.md
//!     42 rows, 42 distinct
//!     Latest: 2024-01-15 Frozen lake (© Someone/Getty Images)
//! ```

use crate::pipeline::{CheckReport, RunReport};
use crate::record::Wallpaper;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `<date> <description>` identity line for a record.
fn wallpaper_line(w: &Wallpaper) -> String {
    format!("{} {}", w.date(), w.description())
}

/// Pluralize a wallpaper count.
fn wallpaper_count(n: usize) -> String {
    match n {
        1 => "1 wallpaper".to_string(),
        n => format!("{n} wallpapers"),
    }
}

// ============================================================================
// Run output
// ============================================================================

/// Format the result of a full run.
pub fn format_run_output(report: &RunReport) -> Vec<String> {
    let mut lines = vec![format!("Today {}", wallpaper_line(&report.latest))];
    lines.push(format!("{}Image: {}", indent(1), report.latest.url()));

    let archive_detail = if report.duplicate {
        format!("{}, already archived", wallpaper_count(report.written))
    } else {
        format!("{} → {}", report.previous, wallpaper_count(report.written))
    };
    lines.push(format!(
        "{}Archive: {} ({})",
        indent(1),
        report.archive_path.display(),
        archive_detail
    ));
    lines.push(format!(
        "{}Summary: {}",
        indent(1),
        report.summary_path.display()
    ));
    lines
}

pub fn print_run_output(report: &RunReport) {
    for line in format_run_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the archive inventory shown by `check`.
pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    let mut lines = vec![format!("Archive {}", report.archive_path.display())];
    if report.records == 0 {
        lines.push(format!("{}empty", indent(1)));
        return lines;
    }
    lines.push(format!(
        "{}{} rows, {} distinct",
        indent(1),
        report.records,
        report.distinct
    ));
    if let Some(latest) = &report.latest {
        lines.push(format!("{}Latest: {}", indent(1), wallpaper_line(latest)));
    }
    lines
}

pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}
