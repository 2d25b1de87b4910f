//! HTTP source — fetch the client config document from a server.
//!
//! Feature-gated behind `http` to keep the default build minimal.

use crate::error::{Error, Result};

/// GET a URL and return the body as text.
pub fn fetch_text(url: &str) -> Result<String> {
    log::debug!("reel: fetching {}", url);
    let response = ureq::get(url).call().map_err(|e| Error::Http(e.to_string()))?;
    response
        .into_body()
        .read_to_string()
        .map_err(|e| Error::Http(e.to_string()))
}

/// Check if a location looks like an HTTP URL.
pub fn is_http_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_http_url_checks_scheme() {
        assert!(is_http_url("https://photos.example.com/api/v1/config"));
        assert!(is_http_url("http://localhost:2342/api/v1/config"));
        assert!(!is_http_url("/etc/reel/config.json"));
        assert!(!is_http_url("config.json"));
    }

    #[test]
    fn unreachable_host_is_http_error() {
        let err = fetch_text("http://127.0.0.1:1/config").unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }
}
