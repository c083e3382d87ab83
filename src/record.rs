//! The wallpaper record and its Markdown renderings.
//!
//! A [`Wallpaper`] is one image-of-the-day entry: the date it was published,
//! the copyright line Bing ships as its description, and the base image URL.
//! Records compare structurally, which is what the dedup in
//! [`merge::distinct`](crate::merge::distinct) relies on.
//!
//! ## URL Variants
//!
//! The stored `url` never carries a query tail. Rendered variants append fixed
//! Bing thumbnail parameters:
//!
//! ```text
//! large:     <url>&w=960
//! thumbnail: <url>&pid=hp&w=384&h=216&rs=1&c=4
//! ```

/// Query suffix for the highlight image on the summary page.
pub const LARGE_SUFFIX: &str = "&w=960";

/// Query suffix for the gallery thumbnails on the summary page.
pub const THUMBNAIL_SUFFIX: &str = "&pid=hp&w=384&h=216&rs=1&c=4";

/// One wallpaper-of-the-day entry.
///
/// Immutable once built; fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Wallpaper {
    date: String,
    description: String,
    url: String,
}

impl Wallpaper {
    /// Store the triple as given. The caller is responsible for stripping any
    /// query string from `url`.
    pub fn new(
        date: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            url: url.into(),
        }
    }

    /// ISO calendar date, e.g. `2024-01-15`.
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Base image URL without query suffix.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Higher-resolution variant used for the summary highlight.
    pub fn large_url(&self) -> String {
        format!("{}{}", self.url, LARGE_SUFFIX)
    }

    /// Single-line gallery cell: thumbnail image, date caption and a link to
    /// the full-resolution original.
    ///
    /// ```text
    /// ![desc](url&pid=hp&w=384&h=216&rs=1&c=4) 2024-01-15 [download 4k](url)
    /// ```
    pub fn inline_markdown(&self) -> String {
        format!(
            "![{}]({}{}) {} [download 4k]({})",
            self.description, self.url, THUMBNAIL_SUFFIX, self.date, self.url
        )
    }

    /// Archive row followed by a blank line: `date | [desc](url)\n\n`.
    ///
    /// This is the exact micro-format [`archive::parse_row`](crate::archive::parse_row)
    /// reads back.
    pub fn table_row(&self) -> String {
        format!("{} | [{}]({})\n\n", self.date, self.description, self.url)
    }
}
