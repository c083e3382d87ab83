//! Fetching and parsing today's wallpaper from the Bing image archive API.
//!
//! One blocking GET per run. The response looks like:
//!
//! ```json
//! {
//!   "images": [
//!     {
//!       "enddate": "20240115",
//!       "url": "/th?id=OHR.FrozenLake_ZH-CN123_UHD.jpg&rf=LaDigue_UHD.jpg&pid=hp&w=3840&h=2160&rs=1&c=4",
//!       "copyright": "Frozen lake (© Someone/Getty Images)",
//!       ...
//!     }
//!   ],
//!   ...
//! }
//! ```
//!
//! Only the first image is used. Its relative `url` is prefixed with the
//! configured host and cut at the first `&`, and `enddate` is reformatted to an
//! ISO date. There is no retry: any failure aborts the run before anything is
//! written.

use crate::config::ApiConfig;
use crate::record::Wallpaper;
use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed API response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("API response contains no images")]
    NoImages,
    #[error("invalid enddate {value:?}: {source}")]
    Date {
        value: String,
        source: chrono::ParseError,
    },
}

/// The subset of the API response this tool reads. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    images: Vec<ApiImage>,
}

#[derive(Debug, Deserialize)]
struct ApiImage {
    url: String,
    copyright: String,
    enddate: String,
}

/// GET the configured endpoint and return the body of a 2xx response.
pub fn fetch_body(api: &ApiConfig) -> Result<String, FetchError> {
    let request_error = |source: reqwest::Error| FetchError::Request {
        url: api.endpoint.clone(),
        source,
    };

    info!(endpoint = %api.endpoint, "fetching today's wallpaper");
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("bing-wallpaper/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(request_error)?;
    let response = client
        .get(&api.endpoint)
        .send()
        .map_err(request_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: api.endpoint.clone(),
            status,
        });
    }
    response.text().map_err(request_error)
}

/// Turn an API response body into a record.
pub fn parse_response(body: &str, host: &str) -> Result<Wallpaper, ParseError> {
    let response: ArchiveResponse = serde_json::from_str(body)?;
    let image = response
        .images
        .into_iter()
        .next()
        .ok_or(ParseError::NoImages)?;

    let url = absolute_url(host, &image.url);
    let date = reformat_date(&image.enddate)?;
    debug!(%date, %url, "parsed API response");
    Ok(Wallpaper::new(date, image.copyright, url))
}

/// Prefix `relative` with `host` and drop everything from the first `&` on.
///
/// A URL without `&` is kept whole.
pub fn absolute_url(host: &str, relative: &str) -> String {
    let full = format!("{host}{relative}");
    match full.find('&') {
        Some(pos) => full[..pos].to_string(),
        None => full,
    }
}

/// `YYYYMMDD` → `YYYY-MM-DD`. Rejects anything that is not a real calendar date.
pub fn reformat_date(compact: &str) -> Result<String, ParseError> {
    let date = NaiveDate::parse_from_str(compact, "%Y%m%d").map_err(|source| ParseError::Date {
        value: compact.to_string(),
        source,
    })?;
    Ok(date.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::api_response;

    const HOST: &str = "https://cn.bing.com";

    fn api_config(endpoint: String) -> ApiConfig {
        ApiConfig {
            endpoint,
            host: HOST.to_string(),
        }
    }

    // =========================================================================
    // absolute_url / reformat_date
    // =========================================================================

    #[test]
    fn absolute_url_truncates_at_first_ampersand() {
        assert_eq!(
            absolute_url("https://host", "/th?id=ABC&rf=xyz&w=100"),
            "https://host/th?id=ABC"
        );
    }

    #[test]
    fn absolute_url_without_query_tail_is_kept() {
        assert_eq!(
            absolute_url("https://host", "/th?id=ABC"),
            "https://host/th?id=ABC"
        );
    }

    #[test]
    fn reformat_date_to_iso() {
        assert_eq!(reformat_date("20240115").unwrap(), "2024-01-15");
    }

    #[test]
    fn reformat_date_rejects_garbage() {
        assert!(matches!(reformat_date("2024-01-15"), Err(ParseError::Date { .. })));
        assert!(matches!(reformat_date("20241301"), Err(ParseError::Date { .. })));
        assert!(matches!(reformat_date(""), Err(ParseError::Date { .. })));
    }

    // =========================================================================
    // parse_response
    // =========================================================================

    #[test]
    fn parse_response_builds_record() {
        let body = api_response(
            "/th?id=OHR.FrozenLake_ZH-CN123_UHD.jpg&rf=LaDigue_UHD.jpg&pid=hp&w=3840&h=2160&rs=1&c=4",
            "Frozen lake (© Someone/Getty Images)",
            "20240115",
        );
        let record = parse_response(&body, HOST).unwrap();
        assert_eq!(record.date(), "2024-01-15");
        assert_eq!(record.description(), "Frozen lake (© Someone/Getty Images)");
        assert_eq!(
            record.url(),
            "https://cn.bing.com/th?id=OHR.FrozenLake_ZH-CN123_UHD.jpg"
        );
    }

    #[test]
    fn parse_response_uses_first_image() {
        let body = r#"{"images": [
            {"url": "/th?id=first&x=1", "copyright": "First", "enddate": "20240115"},
            {"url": "/th?id=second&x=1", "copyright": "Second", "enddate": "20240114"}
        ]}"#;
        let record = parse_response(body, HOST).unwrap();
        assert_eq!(record.description(), "First");
    }

    #[test]
    fn parse_response_empty_images() {
        let result = parse_response(r#"{"images": []}"#, HOST);
        assert!(matches!(result, Err(ParseError::NoImages)));
    }

    #[test]
    fn parse_response_missing_field() {
        let body = r#"{"images": [{"url": "/th?id=a&b", "enddate": "20240115"}]}"#;
        assert!(matches!(parse_response(body, HOST), Err(ParseError::Json(_))));
    }

    #[test]
    fn parse_response_not_json() {
        assert!(matches!(
            parse_response("<html>oops</html>", HOST),
            Err(ParseError::Json(_))
        ));
    }

    #[test]
    fn parse_response_bad_enddate() {
        let body = api_response("/th?id=a&b", "Caption", "yesterday");
        assert!(matches!(
            parse_response(&body, HOST),
            Err(ParseError::Date { .. })
        ));
    }

    // =========================================================================
    // fetch_body
    // =========================================================================

    #[test]
    fn fetch_body_returns_response_text() {
        let mut server = mockito::Server::new();
        let body = api_response("/th?id=a&b", "Caption", "20240115");
        let mock = server
            .mock("GET", "/HPImageArchive.aspx")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(&body)
            .create();

        let config = api_config(format!("{}/HPImageArchive.aspx?format=js&idx=0&n=1", server.url()));
        let fetched = fetch_body(&config).unwrap();

        assert_eq!(fetched, body);
        mock.assert();
    }

    #[test]
    fn fetch_body_non_success_status() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/HPImageArchive.aspx")
            .with_status(503)
            .create();

        let config = api_config(format!("{}/HPImageArchive.aspx", server.url()));
        let result = fetch_body(&config);

        match result {
            Err(FetchError::Status { status, .. }) => assert_eq!(status.as_u16(), 503),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn fetch_body_connection_refused() {
        // Port 9 (discard) is not listening on loopback in test environments.
        let config = api_config("http://127.0.0.1:9/HPImageArchive.aspx".to_string());
        assert!(matches!(fetch_body(&config), Err(FetchError::Request { .. })));
    }
}
