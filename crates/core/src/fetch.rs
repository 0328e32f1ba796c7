//! Source-document fetching from URLs, files, and stdin.
//!
//! The pipeline only needs a non-empty HTML string; where it comes from is a
//! collaborator concern. A blocked or bot-challenged fetch that yields an
//! empty body is reported as [`TraductoError::EmptyDocument`] so the caller
//! can substitute a secondary renderer.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::{Result, TraductoError};

/// HTTP client configuration for fetching source pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: "Mozilla/5.0 (compatible; Traducto/0.3; +https://github.com/traducto/traducto)".to_string(),
        }
    }
}

/// Fetch HTML content from a URL.
///
/// Performs an HTTP GET with browser-like headers, follows redirects, and
/// respects the configured timeout.
///
/// # Errors
///
/// [`TraductoError::InvalidUrl`] for unparseable URLs,
/// [`TraductoError::Timeout`] when the deadline passes,
/// [`TraductoError::EmptyDocument`] when the response body is blank, and
/// [`TraductoError::HttpError`] for other transport failures.
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = Url::parse(url).map_err(|e| TraductoError::InvalidUrl(e.to_string()))?;

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(TraductoError::HttpError)?;

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                TraductoError::Timeout { timeout: config.timeout }
            } else {
                TraductoError::HttpError(e)
            }
        })?;

    let content = response.text().await?;

    if content.trim().is_empty() {
        return Err(TraductoError::EmptyDocument);
    }

    Ok(content)
}

/// Read HTML content from a local file.
///
/// Callers should validate and sanitize the path when accepting user input.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(TraductoError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(TraductoError::from)
    }
}

/// Read HTML content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(TraductoError::from)?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 30);
        assert!(config.user_agent.contains("Traducto"));
    }

    #[test]
    fn test_fetch_url_invalid() {
        let config = FetchConfig::default();
        let result = std::thread::spawn(move || {
            tokio::runtime::Runtime::new()
                .unwrap()
                .block_on(fetch_url("not-a-url", &config))
        })
        .join()
        .unwrap();

        assert!(matches!(result, Err(TraductoError::InvalidUrl(_))));
    }

    #[test]
    fn test_fetch_file_not_found() {
        let result = fetch_file("/nonexistent/path/file.html");
        assert!(matches!(result, Err(TraductoError::FileNotFound(_))));
    }

    #[test]
    fn test_fetch_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, "<p>hi</p>").unwrap();

        let content = fetch_file(path.to_str().unwrap()).unwrap();
        assert_eq!(content, "<p>hi</p>");
    }
}
