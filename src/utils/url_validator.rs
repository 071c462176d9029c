//! Destination URL validation.
//!
//! A destination must be an absolute `http` or `https` URL with a host. The
//! stored form is the parsed one, so the scheme and host come back lowercased
//! and default ports are dropped. Fragments are kept since the visitor's
//! browser needs them after the redirect.

use url::Url;

/// Errors that can occur while validating a destination URL.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// A destination URL that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedUrl {
    url: Url,
}

impl ValidatedUrl {
    /// Host component, used as the default link title.
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn into_string(self) -> String {
        self.url.into()
    }
}

/// Parses and validates a destination URL.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for malformed or relative URLs.
/// Returns [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes.
/// Returns [`UrlValidationError::MissingHost`] when no host is present.
pub fn validate_url(input: &str) -> Result<ValidatedUrl, UrlValidationError> {
    let url = Url::parse(input.trim())
        .map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(ValidatedUrl { url }),
        _ => Err(UrlValidationError::MissingHost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_simple_https() {
        let url = validate_url("https://example.com/page").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page");
        assert_eq!(url.host(), "example.com");
    }

    #[test]
    fn test_validate_lowercases_host_and_drops_default_port() {
        let url = validate_url("HTTPS://EXAMPLE.COM:443/Path").unwrap();
        assert_eq!(url.as_str(), "https://example.com/Path");
    }

    #[test]
    fn test_validate_keeps_fragment_and_query() {
        let url = validate_url("https://example.com/page?utm=x#section").unwrap();
        assert_eq!(url.into_string(), "https://example.com/page?utm=x#section");
    }

    #[test]
    fn test_validate_keeps_custom_port() {
        let url = validate_url("http://localhost:8080/test").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/test");
        assert_eq!(url.host(), "localhost");
    }

    #[test]
    fn test_validate_trims_whitespace() {
        let url = validate_url("  https://example.com  ").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn test_validate_rejects_garbage() {
        assert!(matches!(
            validate_url("not a valid url"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(matches!(
            validate_url(""),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_validate_rejects_relative_url() {
        assert!(matches!(
            validate_url("example.com/page"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_validate_rejects_other_schemes() {
        for input in [
            "ftp://example.com/file.txt",
            "javascript:alert('xss')",
            "mailto:test@example.com",
            "file:///etc/passwd",
        ] {
            assert!(
                matches!(
                    validate_url(input),
                    Err(UrlValidationError::UnsupportedProtocol)
                ),
                "{input} should be rejected"
            );
        }
    }
}
