//! Asset references and the files behind them.

use serde::{Deserialize, Serialize};

use super::media::{CODEC_AVC, FORMAT_GIF, FORMAT_MP4};

/// One playable resource on the server, as seen by a negotiation call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssetRef {
    pub hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
}

impl AssetRef {
    pub fn new(hash: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            codec: None,
            mime: None,
        }
    }

    pub fn with_codec(mut self, codec: impl Into<String>) -> Self {
        self.codec = Some(codec.into());
        self
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    pub fn codec(&self) -> &str {
        self.codec.as_deref().unwrap_or("")
    }

    pub fn mime(&self) -> &str {
        self.mime.as_deref().unwrap_or("")
    }
}

/// A file belonging to a multi-file asset (original, sidecar, video, ...).
///
/// Field names follow the server's file JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct MediaFile {
    pub hash: String,
    pub codec: String,
    pub mime: String,
    pub file_type: String,
    pub video: bool,
    pub frames: u32,
    /// Nanoseconds.
    pub duration: Option<i64>,
    pub width: u32,
    pub height: u32,
}

impl MediaFile {
    pub fn asset_ref(&self) -> AssetRef {
        AssetRef {
            hash: self.hash.clone(),
            codec: Some(self.codec.clone()).filter(|c| !c.is_empty()),
            mime: Some(self.mime.clone()).filter(|m| !m.is_empty()),
        }
    }

    fn is_animated(&self) -> bool {
        self.file_type == FORMAT_GIF || self.frames > 0 || self.duration.is_some_and(|d| d != 0)
    }
}

/// Pick the file to stream for an asset.
///
/// Order: an AVC-encoded file, then any MP4, then anything flagged as
/// video, then an animated file.
pub fn select_video_file(files: &[MediaFile]) -> Option<&MediaFile> {
    files
        .iter()
        .find(|f| f.codec == CODEC_AVC)
        .or_else(|| files.iter().find(|f| f.file_type == FORMAT_MP4))
        .or_else(|| files.iter().find(|f| f.video))
        .or_else(|| files.iter().find(|f| f.is_animated()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(hash: &str, codec: &str, file_type: &str) -> MediaFile {
        MediaFile {
            hash: hash.into(),
            codec: codec.into(),
            file_type: file_type.into(),
            ..Default::default()
        }
    }

    #[test]
    fn prefers_avc_over_mp4() {
        let files = vec![
            file("jpg", "jpeg", "jpg"),
            file("hevc", "hvc1", "mp4"),
            file("avc", "avc1", "mov"),
        ];
        assert_eq!(select_video_file(&files).unwrap().hash, "avc");
    }

    #[test]
    fn falls_back_to_mp4_then_video_flag() {
        let files = vec![file("jpg", "jpeg", "jpg"), file("mp4", "hvc1", "mp4")];
        assert_eq!(select_video_file(&files).unwrap().hash, "mp4");

        let mut mkv = file("mkv", "vp09", "mkv");
        mkv.video = true;
        let files = vec![file("jpg", "jpeg", "jpg"), mkv];
        assert_eq!(select_video_file(&files).unwrap().hash, "mkv");
    }

    #[test]
    fn animated_file_is_last_resort() {
        let mut live = file("heic", "hvc1", "heic");
        live.frames = 30;
        let files = vec![file("jpg", "jpeg", "jpg"), live];
        assert_eq!(select_video_file(&files).unwrap().hash, "heic");

        let files = vec![file("jpg", "jpeg", "jpg"), file("gif", "", "gif")];
        assert_eq!(select_video_file(&files).unwrap().hash, "gif");
    }

    #[test]
    fn no_playable_file() {
        assert!(select_video_file(&[]).is_none());
        assert!(select_video_file(&[file("jpg", "jpeg", "jpg")]).is_none());
    }

    #[test]
    fn asset_ref_drops_empty_fields() {
        let r = file("abc", "", "mp4").asset_ref();
        assert_eq!(r, AssetRef::new("abc"));
        assert_eq!(r.codec(), "");

        let json = serde_json::json!({"Hash": "f00", "Codec": "vp09", "FileType": "webm"});
        let f: MediaFile = serde_json::from_value(json).unwrap();
        assert_eq!(f.asset_ref(), AssetRef::new("f00").with_codec("vp09"));
    }
}
