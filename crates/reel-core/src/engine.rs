//! reel engine — capabilities plus configuration, resolved once.
//!
//! Owns the capability set probed at startup and the client config.
//! Every method is a pure lookup over those two; the engine holds no
//! mutable state and can be shared across threads behind an `Arc`.

use serde::Serialize;

use crate::config::ClientConfig;
use crate::effects::{probe, PlaybackProbe};
use crate::models::{select_video_file, AssetRef, CapabilitySet, Format, MediaFile};
use crate::negotiate::{self, Decision};
use crate::paths;
use crate::thumb;

// ---------------------------------------------------------------------------
// VideoSource
// ---------------------------------------------------------------------------

/// Everything a player element needs to load one video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoSource {
    pub format: Format,
    pub url: String,
    pub content_type: &'static str,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Engine {
    config: ClientConfig,
    caps: CapabilitySet,
}

impl Engine {
    /// Boot the engine, probing the runtime once for decode support.
    pub fn new(config: ClientConfig, env: &dyn PlaybackProbe) -> Self {
        let caps = probe(env);
        Self::with_capabilities(config, caps)
    }

    /// Boot the engine with capabilities determined elsewhere.
    pub fn with_capabilities(config: ClientConfig, caps: CapabilitySet) -> Self {
        Self { config, caps }
    }

    /// Boot from config alone, using its `capabilities` block.
    ///
    /// Without one, nothing but the AVC default is ever negotiated.
    pub fn from_config(config: ClientConfig) -> Self {
        let caps = config.capabilities.unwrap_or_else(|| {
            log::info!("reel: no capabilities configured, serving avc only");
            CapabilitySet::none()
        });
        Self::with_capabilities(config, caps)
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.caps
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Negotiation
    // -----------------------------------------------------------------------

    pub fn resolve_format(&self, codec: &str, mime: &str) -> Format {
        negotiate::resolve_format(codec, mime, &self.caps)
    }

    pub fn explain(&self, codec: &str, mime: &str) -> Decision {
        negotiate::explain(codec, mime, &self.caps)
    }

    pub fn content_type(&self, codec: &str, mime: &str) -> &'static str {
        paths::resolve_content_type(codec, mime, &self.caps)
    }

    // -----------------------------------------------------------------------
    // URLs
    // -----------------------------------------------------------------------

    /// Video URL for an asset in the negotiated format; empty without a hash.
    pub fn video_url(&self, asset: &AssetRef) -> String {
        paths::resolve_video_url(
            &self.config.video_uri,
            &asset.hash,
            &self.config.preview_token,
            asset.codec(),
            asset.mime(),
            &self.caps,
        )
    }

    /// Video URL in an explicit format, skipping negotiation.
    pub fn video_format_url(&self, hash: &str, format: Option<Format>) -> String {
        paths::video_url(&self.config.video_uri, hash, &self.config.preview_token, format)
    }

    pub fn thumb_size(&self, width: u32, height: u32) -> &str {
        thumb::resolve_thumbnail_size(width, height, &self.config.thumbs)
    }

    pub fn thumbnail_url(&self, hash: &str, video_hash: &str, size: &str) -> String {
        paths::thumbnail_url(
            &self.config.content_uri,
            &self.config.static_uri,
            hash,
            video_hash,
            &self.config.preview_token,
            size,
        )
    }

    pub fn download_url(&self, hash: &str) -> String {
        paths::download_url(&self.config.api_uri, hash, &self.config.download_token)
    }

    /// Resolve the playable source of a multi-file asset.
    ///
    /// Streams the file picked by [`select_video_file`]. Without one, the
    /// asset's own hash is served as AVC.
    pub fn video_source(&self, files: &[MediaFile], fallback_hash: &str) -> VideoSource {
        let asset = match select_video_file(files) {
            Some(file) => file.asset_ref(),
            None => {
                log::debug!("reel: no video file among {} files, using {}", files.len(), fallback_hash);
                AssetRef::new(fallback_hash)
            }
        };
        let format = self.resolve_format(asset.codec(), asset.mime());
        VideoSource {
            format,
            url: self.video_format_url(&asset.hash, Some(format)),
            content_type: format.content_type(),
        }
    }
}
