//! Run configuration.
//!
//! Handles loading, validating, and merging `wallpaper.toml`. Stock defaults
//! reproduce the canonical setup (China-region Bing endpoint, `README.md` +
//! `bing-wallpaper.md`), so the file is optional and a bare invocation just
//! works.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [api]
//! endpoint = "https://cn.bing.com/HPImageArchive.aspx?format=js&idx=0&n=1&nc=1618537156988&pid=hp&uhd=1&uhdwidth=3840&uhdheight=2160"
//! host = "https://cn.bing.com"   # Prefix for the relative image URL
//!
//! [output]
//! title = "Bing Wallpaper"       # Heading of both generated files
//! archive = "bing-wallpaper.md"  # Running archive (read back every run)
//! summary = "README.md"          # Gallery page
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [api]
//! endpoint = "https://www.bing.com/HPImageArchive.aspx?format=js&idx=0&n=1&mkt=en-US"
//! host = "https://www.bing.com"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = "wallpaper.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Full configuration for one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WallpaperConfig {
    /// Where today's wallpaper comes from.
    pub api: ApiConfig,
    /// Where and how the Markdown files are written.
    pub output: OutputConfig,
}

impl WallpaperConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_http_url(&self.api.endpoint) {
            return Err(ConfigError::Validation(
                "api.endpoint must be an http(s) URL".into(),
            ));
        }
        if !is_http_url(&self.api.host) {
            return Err(ConfigError::Validation(
                "api.host must be an http(s) URL".into(),
            ));
        }
        if self.api.host.ends_with('/') {
            return Err(ConfigError::Validation(
                "api.host must not end with '/'".into(),
            ));
        }
        if self.output.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output.title must not be empty".into(),
            ));
        }
        if self.output.archive.as_os_str().is_empty() || self.output.summary.as_os_str().is_empty()
        {
            return Err(ConfigError::Validation(
                "output.archive and output.summary must not be empty".into(),
            ));
        }
        if self.output.archive == self.output.summary {
            return Err(ConfigError::Validation(
                "output.archive and output.summary must be different files".into(),
            ));
        }
        Ok(())
    }
}

fn is_http_url(s: &str) -> bool {
    s.starts_with("https://") || s.starts_with("http://")
}

/// Image-of-the-day API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Full request URL, including the market and UHD query parameters.
    pub endpoint: String,
    /// Scheme + host prepended to the relative image path in the response.
    pub host: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://cn.bing.com/HPImageArchive.aspx?format=js&idx=0&n=1&nc=1618537156988&pid=hp&uhd=1&uhdwidth=3840&uhdheight=2160".to_string(),
            host: "https://cn.bing.com".to_string(),
        }
    }
}

/// Generated file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Heading written at the top of both files.
    pub title: String,
    /// Archive path, relative to the working directory.
    pub archive: PathBuf,
    /// Summary path, relative to the working directory.
    pub summary: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            title: "Bing Wallpaper".to_string(),
            archive: PathBuf::from("bing-wallpaper.md"),
            summary: PathBuf::from("README.md"),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(WallpaperConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `wallpaper.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<WallpaperConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: WallpaperConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `wallpaper.toml` in the given directory, falling back to
/// stock defaults for anything not set.
pub fn load_config(dir: &Path) -> Result<WallpaperConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `wallpaper.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Bing Wallpaper Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Image-of-the-day API
# ---------------------------------------------------------------------------
[api]
# Request URL. idx=0&n=1 asks for today's image only; uhd=1 requests the
# 3840x2160 variant.
endpoint = "https://cn.bing.com/HPImageArchive.aspx?format=js&idx=0&n=1&nc=1618537156988&pid=hp&uhd=1&uhdwidth=3840&uhdheight=2160"

# Prepended to the relative image path returned by the API. No trailing slash.
host = "https://cn.bing.com"

# ---------------------------------------------------------------------------
# Generated files
# ---------------------------------------------------------------------------
[output]
# Heading of both Markdown files.
title = "Bing Wallpaper"

# Running archive, one row per wallpaper. Read back on every run.
archive = "bing-wallpaper.md"

# Gallery page with today's wallpaper highlighted.
summary = "README.md"
"##
}
