//! Client configuration — endpoints, tokens and thumbnail sizes.
//!
//! Same JSON document the media server hands to its web client; unknown
//! keys are ignored so the full document can be loaded as-is.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::CapabilitySet;
use crate::thumb::{default_sizes, is_ascending, ThumbSize};

/// Environment variable naming a config file (or URL with feature `http`).
pub const CONFIG_ENV: &str = "REEL_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    /// Prefix for `/videos/...` URLs.
    pub video_uri: String,
    /// Prefix for `/t/...` thumbnail URLs.
    pub content_uri: String,
    pub static_uri: String,
    /// Prefix for `/dl/...` download URLs.
    pub api_uri: String,
    pub preview_token: String,
    pub download_token: String,
    /// Available thumbnail sizes, ascending.
    pub thumbs: Vec<ThumbSize>,
    /// Precomputed capabilities, skipping the runtime probe when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<CapabilitySet>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            video_uri: "/api/v1".into(),
            content_uri: "/api/v1".into(),
            static_uri: "/static".into(),
            api_uri: "/api/v1".into(),
            preview_token: "public".into(),
            download_token: "public".into(),
            thumbs: default_sizes(),
            capabilities: None,
        }
    }
}

impl ClientConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ClientConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("reel: loading config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Fetch the config document from a server.
    #[cfg(feature = "http")]
    pub fn fetch(url: &str) -> Result<Self> {
        let json = crate::effects::http::fetch_text(url)?;
        Self::from_json(&json)
    }

    /// Load from a file path, or from an HTTP URL when built with `http`.
    pub fn open(location: &str) -> Result<Self> {
        #[cfg(feature = "http")]
        {
            if crate::effects::http::is_http_url(location) {
                return Self::fetch(location);
            }
        }
        Self::load(location)
    }

    /// Load from `$REEL_CONFIG`, or defaults when it is unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var(CONFIG_ENV) {
            Ok(location) if !location.is_empty() => Self::open(&location),
            _ => Ok(Self::default()),
        }
    }

    /// Reject size entries without a tag. An unsorted size list is allowed
    /// but logged, since thumbnail selection is first-fit.
    pub fn validate(&self) -> Result<()> {
        if let Some(t) = self.thumbs.iter().find(|t| t.size.is_empty()) {
            return Err(Error::InvalidConfig(format!(
                "thumbnail size {}x{} has no size tag",
                t.w, t.h
            )));
        }
        if !is_ascending(&self.thumbs) {
            log::warn!("reel: thumbnail sizes are not in ascending order; first fit wins");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Format;
    use once_cell::sync::Lazy;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    fn write_config(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("tempfile");
        file.write_all(json.as_bytes()).expect("write");
        file
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config = ClientConfig::from_json("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.thumbs.len(), 6);
    }

    #[test]
    fn camel_case_fields() {
        let config = ClientConfig::from_json(
            r#"{
                "videoUri": "https://photos.example.com/api/v1",
                "contentUri": "https://cdn.example.com/api/v1",
                "previewToken": "abc123",
                "thumbs": [{"w": 100, "h": 100, "size": "tile_100"}],
                "capabilities": {"avc": true, "vp9": true},
                "siteTitle": "ignored"
            }"#,
        )
        .unwrap();
        assert_eq!(config.video_uri, "https://photos.example.com/api/v1");
        assert_eq!(config.content_uri, "https://cdn.example.com/api/v1");
        assert_eq!(config.preview_token, "abc123");
        assert_eq!(config.static_uri, "/static");
        assert_eq!(config.thumbs, vec![ThumbSize::new(100, 100, "tile_100")]);
        let caps = config.capabilities.unwrap();
        assert!(caps.supports(Format::Vp9));
        assert!(!caps.supports(Format::Hevc));
    }

    #[test]
    fn load_from_file() {
        let file = write_config(r#"{"previewToken": "from-file"}"#);
        let config = ClientConfig::load(file.path()).unwrap();
        assert_eq!(config.preview_token, "from-file");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ClientConfig::load("/nonexistent/reel.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn bad_json_is_json_error() {
        let err = ClientConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn thumb_without_tag_is_invalid() {
        let err = ClientConfig::from_json(r#"{"thumbs": [{"w": 1, "h": 1, "size": ""}]}"#)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn unsorted_thumbs_are_kept_as_given() {
        let config = ClientConfig::from_json(
            r#"{"thumbs": [{"w": 500, "h": 500, "size": "m"}, {"w": 100, "h": 100, "size": "s"}]}"#,
        )
        .unwrap();
        assert_eq!(config.thumbs[0].size, "m");
    }

    #[test]
    fn from_env_reads_path() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let file = write_config(r#"{"videoUri": "/env/api"}"#);
        std::env::set_var(CONFIG_ENV, file.path());
        let config = ClientConfig::from_env();
        std::env::remove_var(CONFIG_ENV);
        assert_eq!(config.unwrap().video_uri, "/env/api");
    }

    #[test]
    fn from_env_unset_is_default() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        std::env::remove_var(CONFIG_ENV);
        assert_eq!(ClientConfig::from_env().unwrap(), ClientConfig::default());
    }
}
