//! Target URL validation.
//!
//! ASCII target URLs are stored exactly as submitted. URLs containing
//! non-ASCII characters are stored in their serialized form (punycode host,
//! percent-encoded path), which is what a `Location` header can carry.

use std::borrow::Cow;
use url::Url;

/// Reasons a target URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,

    #[error("URL contains whitespace or control characters")]
    InvalidCharacters,
}

/// Checks that `input` is an absolute `http`/`https` URL with a host and
/// returns the string to store for it.
///
/// Visible-ASCII input is returned unchanged. Input with non-ASCII characters
/// is returned in its serialized ASCII form. Whitespace and control
/// characters are rejected either way.
///
/// # Errors
///
/// Returns the first [`UrlValidationError`] that applies.
///
/// # Examples
///
/// ```
/// use urlsnip::utils::url_validator::validate_target_url;
///
/// assert_eq!(validate_target_url("https://example.com").unwrap(), "https://example.com");
/// assert_eq!(
///     validate_target_url("https://bücher.example/").unwrap(),
///     "https://xn--bcher-kva.example/"
/// );
/// assert!(validate_target_url("example.com").is_err());
/// assert!(validate_target_url("javascript:alert(1)").is_err());
/// ```
pub fn validate_target_url(input: &str) -> Result<Cow<'_, str>, UrlValidationError> {
    if input
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(UrlValidationError::InvalidCharacters);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlValidationError::MissingHost),
    }

    if input.is_ascii() {
        Ok(Cow::Borrowed(input))
    } else {
        Ok(Cow::Owned(url.into()))
    }
}
