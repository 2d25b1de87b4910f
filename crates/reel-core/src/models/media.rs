//! Media classification types, codec tags and content types.
//!
//! Tags are plain strings on the wire. `Format` is the closed set of
//! delivery formats the video endpoint can serve; codec tags stay `&str`
//! because sources report arbitrary values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

// ---------------------------------------------------------------------------
// Codec tags (as reported by the source file)
// ---------------------------------------------------------------------------

pub const CODEC_AVC: &str = "avc1";
pub const CODEC_AVC3: &str = "avc3";
pub const CODEC_HEVC: &str = "hvc1";
pub const CODEC_HEV1: &str = "hev1";
pub const CODEC_VVC: &str = "vvc1";
pub const CODEC_EVC: &str = "evc1";
pub const CODEC_OGV: &str = "ogv";
pub const CODEC_VP8: &str = "vp8";
pub const CODEC_VP9: &str = "vp09";
pub const CODEC_AV1: &str = "av01";
pub const CODEC_AV1C: &str = "av1c";

// ---------------------------------------------------------------------------
// File format tags
// ---------------------------------------------------------------------------

pub const FORMAT_MP4: &str = "mp4";
pub const FORMAT_AVC: &str = "avc";
pub const FORMAT_HEVC: &str = "hevc";
pub const FORMAT_HEV1: &str = "hev1";
pub const FORMAT_VVC: &str = "vvc";
pub const FORMAT_EVC: &str = "evc";
pub const FORMAT_OGG: &str = "ogg";
pub const FORMAT_WEBM: &str = "webm";
pub const FORMAT_VP8: &str = "vp8";
pub const FORMAT_VP9: &str = "vp9";
pub const FORMAT_AV1: &str = "av1";
pub const FORMAT_WEBP: &str = "webp";
pub const FORMAT_GIF: &str = "gif";

// ---------------------------------------------------------------------------
// Content types (MIME)
// ---------------------------------------------------------------------------

pub const CONTENT_TYPE_MP4: &str = "video/mp4";
/// AVC High Profile, Level 4.
pub const CONTENT_TYPE_AVC: &str = r#"video/mp4; codecs="avc1.640028""#;
pub const CONTENT_TYPE_HEVC: &str = r#"video/mp4; codecs="hvc1.2.4.L120.B0""#;
pub const CONTENT_TYPE_HEV1: &str = r#"video/mp4; codecs="hev1.2.4.L120.B0""#;
pub const CONTENT_TYPE_VVC: &str = r#"video/mp4; codecs="vvc1""#;
pub const CONTENT_TYPE_OGV: &str = "video/ogg";
pub const CONTENT_TYPE_WEBM: &str = "video/webm";
pub const CONTENT_TYPE_VP8: &str = r#"video/webm; codecs="vp8""#;
pub const CONTENT_TYPE_VP9: &str = r#"video/webm; codecs="vp09.00.10.08""#;
/// AV1 Main Profile.
pub const CONTENT_TYPE_AV1: &str = r#"video/webm; codecs="av01.2.10M.10""#;

// ---------------------------------------------------------------------------
// Format
// ---------------------------------------------------------------------------

/// Delivery format served by the video endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Avc,
    Hevc,
    Hev1,
    Vvc,
    Ogg,
    Vp8,
    Vp9,
    Av1,
    Webm,
}

impl Format {
    /// Every format, in negotiation precedence order.
    pub const ALL: [Format; 9] = [
        Format::Avc,
        Format::Hevc,
        Format::Hev1,
        Format::Vvc,
        Format::Ogg,
        Format::Vp8,
        Format::Vp9,
        Format::Av1,
        Format::Webm,
    ];

    /// Tag used in video URLs.
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Avc => FORMAT_AVC,
            Format::Hevc => FORMAT_HEVC,
            Format::Hev1 => FORMAT_HEV1,
            Format::Vvc => FORMAT_VVC,
            Format::Ogg => FORMAT_OGG,
            Format::Vp8 => FORMAT_VP8,
            Format::Vp9 => FORMAT_VP9,
            Format::Av1 => FORMAT_AV1,
            Format::Webm => FORMAT_WEBM,
        }
    }

    /// Canonical content type for this format. Also the MIME string the
    /// capability probe asks the runtime about.
    pub fn content_type(self) -> &'static str {
        match self {
            Format::Avc => CONTENT_TYPE_AVC,
            Format::Hevc => CONTENT_TYPE_HEVC,
            Format::Hev1 => CONTENT_TYPE_HEV1,
            Format::Vvc => CONTENT_TYPE_VVC,
            Format::Ogg => CONTENT_TYPE_OGV,
            Format::Vp8 => CONTENT_TYPE_VP8,
            Format::Vp9 => CONTENT_TYPE_VP9,
            Format::Av1 => CONTENT_TYPE_AV1,
            Format::Webm => CONTENT_TYPE_WEBM,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| Error::UnknownFormat(s.to_string()))
    }
}

/// Content type for a format or codec tag.
///
/// Accepts the format tags plus the codec tags that name the same stream
/// (`av01`, `av1c`, `ogv`, `vp09`, `hvc1`). Anything else is served as
/// plain `video/mp4`.
pub fn content_type_for(tag: &str) -> &'static str {
    match tag {
        FORMAT_AVC => CONTENT_TYPE_AVC,
        CODEC_OGV | FORMAT_OGG => CONTENT_TYPE_OGV,
        FORMAT_VP8 => CONTENT_TYPE_VP8,
        CODEC_VP9 | FORMAT_VP9 => CONTENT_TYPE_VP9,
        CODEC_AV1C | CODEC_AV1 | FORMAT_AV1 => CONTENT_TYPE_AV1,
        FORMAT_WEBM => CONTENT_TYPE_WEBM,
        CODEC_HEVC | FORMAT_HEVC => CONTENT_TYPE_HEVC,
        FORMAT_HEV1 => CONTENT_TYPE_HEV1,
        FORMAT_VVC => CONTENT_TYPE_VVC,
        _ => CONTENT_TYPE_MP4,
    }
}

// ---------------------------------------------------------------------------
// Display names
// ---------------------------------------------------------------------------

/// Short codec label for info panels, e.g. `"HEVC"` for `hvc1`.
pub fn codec_label(codec: &str) -> String {
    let label = match codec {
        "" => "",
        CODEC_AV1C | CODEC_AV1 => "AV1",
        CODEC_AVC | CODEC_AVC3 | FORMAT_AVC => "AVC",
        "hvc" | CODEC_HEV1 | CODEC_HEVC | FORMAT_HEVC => "HEVC",
        CODEC_VVC | FORMAT_VVC => "VVC",
        CODEC_EVC | FORMAT_EVC => "EVC",
        FORMAT_WEBM => "WebM",
        FORMAT_VP8 => "VP8",
        CODEC_VP9 | FORMAT_VP9 => "VP9",
        "extended webp" | FORMAT_WEBP => "WebP",
        other => return other.to_uppercase(),
    };
    label.to_string()
}

/// Descriptive codec name, e.g. `"Versatile Video Coding (VVC) / H.266"`.
pub fn codec_name(codec: &str) -> String {
    let name = match codec {
        "" => "",
        "mov" | "qt" | "qt  " => "Apple QuickTime (MOV)",
        FORMAT_AVC | CODEC_AVC => "Advanced Video Coding (AVC) / H.264",
        CODEC_AVC3 => "Advanced Video Coding (AVC) Bitstream",
        "hvc" | "hev" | CODEC_HEVC | FORMAT_HEVC => "High Efficiency Video Coding (HEVC) / H.265",
        CODEC_HEV1 => "High Efficiency Video Coding (HEVC) Bitstream",
        FORMAT_VVC | CODEC_VVC => "Versatile Video Coding (VVC) / H.266",
        FORMAT_EVC | CODEC_EVC => "Essential Video Coding (MPEG-5 Part 1)",
        FORMAT_AV1 | CODEC_AV1C | "av1C" | CODEC_AV1 => "AOMedia Video 1 (AV1)",
        FORMAT_VP8 => "Google VP8",
        CODEC_VP9 | FORMAT_VP9 => "Google VP9",
        FORMAT_OGG | CODEC_OGV => "Ogg Media",
        FORMAT_WEBM => "Google WebM",
        "mkv" => "Matroska Multimedia Container (MKV)",
        "mjpg" => "Motion JPEG (M-JPEG)",
        FORMAT_GIF => "Graphics Interchange Format (GIF)",
        other => return other.to_uppercase(),
    };
    name.to_string()
}
