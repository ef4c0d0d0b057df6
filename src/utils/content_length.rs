//! Content length extraction utilities.
//!
//! An asset is only accepted when the number of bytes received matches the
//! `Content-Length` the server declared, so the header is mandatory here.

use crate::error::DownloadError;
use reqwest::{header::CONTENT_LENGTH, Response};

/// Parse a `Content-Length` header value.
///
/// Returns None if the value is not a plain non-negative integer.
///
/// # Example
///
/// ```rust
/// use ghdl::utils::parse_content_length;
///
/// assert_eq!(parse_content_length("2048"), Some(2048));
/// assert_eq!(parse_content_length("abc"), None);
/// ```
pub fn parse_content_length(value: &str) -> Option<u64> {
    let value = value.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse::<u64>().ok()
}

/// Extract the declared content length of a response.
///
/// A missing header, a non UTF-8 value or an unparsable value are all errors.
pub fn declared_content_length(response: &Response) -> Result<u64, DownloadError> {
    let header = response
        .headers()
        .get(CONTENT_LENGTH)
        .ok_or_else(|| DownloadError::ContentLength("header is missing".into()))?;
    let value = header
        .to_str()
        .map_err(|e| DownloadError::ContentLength(e.to_string()))?;
    parse_content_length(value)
        .ok_or_else(|| DownloadError::ContentLength(format!("\"{}\" is not a length", value)))
}
