//! # Bing Wallpaper
//!
//! Collects the Bing image of the day into two Markdown files: a running
//! archive (`bing-wallpaper.md`) and a gallery page (`README.md`). Meant to be
//! run once a day, typically from a scheduled CI job that commits the result.
//!
//! # Architecture: One Linear Run
//!
//! ```text
//! 1. Read      bing-wallpaper.md  →  Vec<Wallpaper>   (newest first)
//! 2. Fetch     HPImageArchive API →  Wallpaper        (today)
//! 3. Merge     today + history    →  Vec<Wallpaper>   (today at index 0)
//! 4. Write     archive            →  bing-wallpaper.md
//! 5. Write     summary            →  README.md
//! ```
//!
//! The archive is the only persisted state: it is both the output of step 4
//! and the input of step 1 on the next run, so its row format must round-trip
//! exactly. Duplicates are tolerated in memory and removed by each writer.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`record`] | The `Wallpaper` value and its Markdown renderings |
//! | [`archive`] | Archive file reader and writer (row micro-format) |
//! | [`fetch`] | HTTP fetch and JSON parsing of today's wallpaper |
//! | [`merge`] | Prepend today's record; structural dedup |
//! | [`summary`] | Gallery page renderer and writer |
//! | [`pipeline`] | Orchestrates a run; stage-tagged errors |
//! | [`config`] | `wallpaper.toml` loading, merging, and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Missing Archive Means Empty History
//!
//! A first run in an empty directory works without seeding any file. Any other
//! read failure (permissions, invalid UTF-8) still aborts the run.
//!
//! ## Read and Fetch Before Any Write
//!
//! Both fallible inputs are resolved before either file is touched, so a
//! network outage never truncates the archive. The two writes are not
//! transactional; a crash between them is repaired by the next run.

pub mod archive;
pub mod config;
pub mod fetch;
pub mod merge;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod summary;

#[cfg(test)]
pub(crate) mod test_helpers;
