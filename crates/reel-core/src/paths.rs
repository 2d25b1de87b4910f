//! URL conventions of the media server.
//!
//! Pure functions mapping assets to resource URLs. Endpoints and tokens
//! come from [`crate::config::ClientConfig`]; nothing is percent-encoded
//! because hashes and tokens are URL-safe by construction.

use crate::models::{CapabilitySet, Format};
use crate::negotiate::resolve_format;

// ---------------------------------------------------------------------------
// Videos
// ---------------------------------------------------------------------------

/// `{base}/videos/{hash}/{token}/{format}`, format defaulting to AVC.
///
/// Empty when `hash` is empty: there is nothing to play, and callers check
/// for the empty string instead of handling an error.
pub fn video_url(base: &str, hash: &str, token: &str, format: Option<Format>) -> String {
    if hash.is_empty() {
        return String::new();
    }
    let format = format.unwrap_or_default();
    format!("{}/videos/{}/{}/{}", base, hash, token, format)
}

/// Negotiate a format for the source, then build its video URL.
pub fn resolve_video_url(
    base: &str,
    hash: &str,
    token: &str,
    codec: &str,
    mime: &str,
    caps: &CapabilitySet,
) -> String {
    video_url(base, hash, token, Some(resolve_format(codec, mime, caps)))
}

/// Content type of the format negotiated for the source.
pub fn resolve_content_type(codec: &str, mime: &str, caps: &CapabilitySet) -> &'static str {
    resolve_format(codec, mime, caps).content_type()
}

// ---------------------------------------------------------------------------
// Thumbnails
// ---------------------------------------------------------------------------

pub const NOT_FOUND_IMAGE: &str = "img/404.jpg";

/// `{content_uri}/t/{hash}/{token}/{size}`.
///
/// Falls back to `video_hash` when the asset has no primary file hash, and
/// to the static 404 image when neither is known.
pub fn thumbnail_url(
    content_uri: &str,
    static_uri: &str,
    hash: &str,
    video_hash: &str,
    token: &str,
    size: &str,
) -> String {
    let hash = if hash.is_empty() { video_hash } else { hash };
    if hash.is_empty() {
        return format!("{}/{}", static_uri, NOT_FOUND_IMAGE);
    }
    format!("{}/t/{}/{}/{}", content_uri, hash, token, size)
}

// ---------------------------------------------------------------------------
// Downloads
// ---------------------------------------------------------------------------

/// `{api_uri}/dl/{hash}?t={token}`. Empty when `hash` is empty.
pub fn download_url(api_uri: &str, hash: &str, token: &str) -> String {
    if hash.is_empty() {
        return String::new();
    }
    format!("{}/dl/{}?t={}", api_uri, hash, token)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "011df944f313a05f89d170a561fad09ce6cef44e";

    #[test]
    fn video_url_layout() {
        assert_eq!(
            video_url("/api/v1", HASH, "public", Some(Format::Vp9)),
            format!("/api/v1/videos/{HASH}/public/vp9")
        );
    }

    #[test]
    fn video_url_defaults_to_avc() {
        assert_eq!(
            video_url("https://example.com/api/v1", "abc", "tok", None),
            "https://example.com/api/v1/videos/abc/tok/avc"
        );
    }

    #[test]
    fn video_url_empty_hash_is_empty() {
        for format in Format::ALL.map(Some).into_iter().chain([None]) {
            assert_eq!(video_url("/api/v1", "", "tok", format), "");
        }
        assert_eq!(video_url("", "", "", None), "");
    }

    #[test]
    fn resolve_video_url_negotiates() {
        let caps = CapabilitySet::none().with(Format::Hevc, true);
        assert_eq!(
            resolve_video_url("/api/v1", "abc", "tok", "hvc1", "", &caps),
            "/api/v1/videos/abc/tok/hevc"
        );
        assert_eq!(
            resolve_video_url("/api/v1", "abc", "tok", "hvc1", "", &CapabilitySet::none()),
            "/api/v1/videos/abc/tok/avc"
        );
        assert_eq!(resolve_video_url("/api/v1", "", "tok", "hvc1", "", &caps), "");
    }

    #[test]
    fn resolve_content_type_negotiates() {
        let caps = CapabilitySet::none().with(Format::Vp9, true);
        assert_eq!(
            resolve_content_type("vp09", "", &caps),
            r#"video/webm; codecs="vp09.00.10.08""#
        );
        assert_eq!(
            resolve_content_type("", "", &caps),
            r#"video/mp4; codecs="avc1.640028""#
        );
    }

    #[test]
    fn thumbnail_url_layout() {
        assert_eq!(
            thumbnail_url("https://example.com", "/static", HASH, "", "12345678", "fit_720"),
            format!("https://example.com/t/{HASH}/12345678/fit_720")
        );
    }

    #[test]
    fn thumbnail_url_uses_video_hash() {
        assert_eq!(
            thumbnail_url("/api/v1", "/static", "", "vid", "tok", "tile_500"),
            "/api/v1/t/vid/tok/tile_500"
        );
    }

    #[test]
    fn thumbnail_url_without_hash_is_404() {
        assert_eq!(
            thumbnail_url("/api/v1", "/static", "", "", "tok", "tile_500"),
            "/static/img/404.jpg"
        );
    }

    #[test]
    fn download_url_layout() {
        assert_eq!(download_url("/api/v1", "abc", "dl"), "/api/v1/dl/abc?t=dl");
        assert_eq!(download_url("/api/v1", "", "dl"), "");
    }
}
