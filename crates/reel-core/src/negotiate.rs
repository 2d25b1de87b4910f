//! Format negotiation — pick one delivery format for a source.
//!
//! The source is described by its codec tag and MIME string, either of
//! which may be empty. Rules are tried in table order and the first rule
//! whose capability flag is set and whose codec/MIME test matches wins.
//! AVC is both the answer for undescribed or AVC sources and the final
//! fallback, so negotiation always produces a format.
//!
//! Comparisons are case-sensitive against the lowercase constants below.
//! Callers normalize casing.

use std::fmt;

use crate::models::media::{
    CODEC_AV1, CODEC_AV1C, CODEC_HEV1, CODEC_HEVC, CODEC_OGV, CODEC_VVC, CONTENT_TYPE_OGV,
    CONTENT_TYPE_WEBM, FORMAT_AV1, FORMAT_OGG, FORMAT_VVC, FORMAT_WEBM,
};
use crate::models::{CapabilitySet, Format};

pub const MIME_PREFIX_AVC: &str = r#"video/mp4; codecs="avc"#;
pub const MIME_PREFIX_HEVC: &str = r#"video/mp4; codecs="hvc"#;
pub const MIME_PREFIX_HEV1: &str = r#"video/mp4; codecs="hev"#;
pub const MIME_PREFIX_VVC: &str = r#"video/mp4; codecs="vvc"#;
pub const MIME_PREFIX_VP8: &str = r#"video/mp4; codecs="vp8"#;
pub const MIME_PREFIX_VP9: &str = r#"video/mp4; codecs="vp09"#;
pub const MIME_PREFIX_AV1: &str = r#"video/webm; codecs="av01"#;

/// One capability-gated negotiation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// Result of the rule; its capability flag gates the rule.
    pub format: Format,
    /// Codec tags matched exactly.
    pub codecs: &'static [&'static str],
    /// MIME prefix, if the rule matches on one.
    pub mime_prefix: Option<&'static str>,
    /// Exact MIME, if the rule matches on one.
    pub mime_exact: Option<&'static str>,
}

impl Rule {
    pub fn matches(&self, codec: &str, mime: &str, caps: &CapabilitySet) -> bool {
        caps.supports(self.format) && self.matches_source(codec, mime)
    }

    fn matches_source(&self, codec: &str, mime: &str) -> bool {
        if !codec.is_empty() && self.codecs.contains(&codec) {
            return true;
        }
        if mime.is_empty() {
            return false;
        }
        self.mime_prefix.is_some_and(|p| mime.starts_with(p)) || self.mime_exact == Some(mime)
    }
}

/// Negotiation rules in precedence order.
pub static RULES: &[Rule] = &[
    Rule {
        format: Format::Hevc,
        codecs: &[CODEC_HEVC],
        mime_prefix: Some(MIME_PREFIX_HEVC),
        mime_exact: None,
    },
    Rule {
        format: Format::Hev1,
        codecs: &[CODEC_HEV1],
        mime_prefix: Some(MIME_PREFIX_HEV1),
        mime_exact: None,
    },
    Rule {
        format: Format::Vvc,
        codecs: &[CODEC_VVC, FORMAT_VVC],
        mime_prefix: Some(MIME_PREFIX_VVC),
        mime_exact: None,
    },
    Rule {
        format: Format::Ogg,
        codecs: &[CODEC_OGV, FORMAT_OGG],
        mime_prefix: None,
        mime_exact: Some(CONTENT_TYPE_OGV),
    },
    Rule {
        format: Format::Vp8,
        codecs: &["vp8", "vp08"],
        mime_prefix: Some(MIME_PREFIX_VP8),
        mime_exact: None,
    },
    Rule {
        format: Format::Vp9,
        codecs: &["vp9", "vp09"],
        mime_prefix: Some(MIME_PREFIX_VP9),
        mime_exact: None,
    },
    Rule {
        format: Format::Av1,
        codecs: &[CODEC_AV1, CODEC_AV1C, FORMAT_AV1],
        mime_prefix: Some(MIME_PREFIX_AV1),
        mime_exact: None,
    },
    Rule {
        format: Format::Webm,
        codecs: &[FORMAT_WEBM],
        mime_prefix: None,
        mime_exact: Some(CONTENT_TYPE_WEBM),
    },
];

/// How a format was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Source is undescribed or already AVC.
    Avc,
    /// `RULES[index]` matched.
    Rule { index: usize, format: Format },
    /// Nothing matched; AVC fallback.
    Fallback,
}

impl Decision {
    pub fn format(self) -> Format {
        match self {
            Decision::Avc | Decision::Fallback => Format::Avc,
            Decision::Rule { format, .. } => format,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Avc => write!(f, "avc (source is AVC or undescribed)"),
            Decision::Rule { index, format } => write!(f, "{} (rule {})", format, index + 1),
            Decision::Fallback => write!(f, "avc (fallback, no playable match)"),
        }
    }
}

/// Negotiate and report which step decided.
pub fn explain(codec: &str, mime: &str, caps: &CapabilitySet) -> Decision {
    if (codec.is_empty() && mime.is_empty()) || mime.starts_with(MIME_PREFIX_AVC) {
        return Decision::Avc;
    }

    RULES
        .iter()
        .position(|rule| rule.matches(codec, mime, caps))
        .map(|index| Decision::Rule {
            index,
            format: RULES[index].format,
        })
        .unwrap_or(Decision::Fallback)
}

/// Pick the delivery format for a source. Empty strings mean "unknown".
pub fn resolve_format(codec: &str, mime: &str, caps: &CapabilitySet) -> Format {
    explain(codec, mime, caps).format()
}

/// [`resolve_format`] for optional source fields.
pub fn resolve_format_opt(codec: Option<&str>, mime: Option<&str>, caps: &CapabilitySet) -> Format {
    resolve_format(codec.unwrap_or(""), mime.unwrap_or(""), caps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::media::*;

    /// Canonical (codec, mime) source for each format.
    const SOURCES: &[(Format, &str, &str)] = &[
        (Format::Hevc, CODEC_HEVC, CONTENT_TYPE_HEVC),
        (Format::Hev1, CODEC_HEV1, CONTENT_TYPE_HEV1),
        (Format::Vvc, CODEC_VVC, CONTENT_TYPE_VVC),
        (Format::Ogg, CODEC_OGV, CONTENT_TYPE_OGV),
        (Format::Vp8, "vp08", r#"video/mp4; codecs="vp8""#),
        (Format::Vp9, CODEC_VP9, r#"video/mp4; codecs="vp09.00.10.08""#),
        (Format::Av1, CODEC_AV1, CONTENT_TYPE_AV1),
        (Format::Webm, FORMAT_WEBM, CONTENT_TYPE_WEBM),
    ];

    fn only(format: Format) -> CapabilitySet {
        CapabilitySet::none().with(format, true)
    }

    fn every_caps() -> impl Iterator<Item = CapabilitySet> {
        (0u32..512).map(|bits| {
            Format::ALL
                .into_iter()
                .enumerate()
                .fold(CapabilitySet::none(), |caps, (i, f)| caps.with(f, bits & (1 << i) != 0))
        })
    }

    #[test]
    fn rule_table_follows_precedence() {
        let order: Vec<Format> = RULES.iter().map(|r| r.format).collect();
        assert_eq!(order, Format::ALL[1..].to_vec());
    }

    #[test]
    fn canonical_sources_with_flag() {
        for &(format, codec, mime) in SOURCES {
            let caps = only(format);
            assert_eq!(resolve_format(codec, mime, &caps), format, "{codec} {mime}");
            assert_eq!(resolve_format(codec, "", &caps), format, "codec only {codec}");
            assert_eq!(resolve_format("", mime, &caps), format, "mime only {mime}");
        }
    }

    #[test]
    fn canonical_sources_without_flag_fall_back() {
        for &(format, codec, mime) in SOURCES {
            let caps = CapabilitySet::all().with(format, false);
            assert_eq!(resolve_format(codec, mime, &caps), Format::Avc, "{codec} {mime}");
        }
    }

    #[test]
    fn undescribed_source_is_avc_for_any_caps() {
        for caps in every_caps() {
            assert_eq!(resolve_format("", "", &caps), Format::Avc);
            assert_eq!(explain("", "", &caps), Decision::Avc);
        }
    }

    #[test]
    fn avc_source_ignores_capabilities() {
        for caps in every_caps() {
            assert_eq!(resolve_format("avc1", CONTENT_TYPE_AVC, &caps), Format::Avc);
        }
        // The AVC MIME wins even over a codec tag that names another format.
        assert_eq!(resolve_format("hvc1", CONTENT_TYPE_AVC, &CapabilitySet::all()), Format::Avc);
    }

    #[test]
    fn vp09_codec_only() {
        let caps = only(Format::Vp9);
        let format = resolve_format("vp09", "", &caps);
        assert_eq!(format, Format::Vp9);
        assert_eq!(format.content_type(), r#"video/webm; codecs="vp09.00.10.08""#);
    }

    #[test]
    fn plain_webm_mime() {
        let caps = only(Format::Webm);
        assert_eq!(resolve_format("", "video/webm", &caps), Format::Webm);
        assert_eq!(resolve_format("", "video/webm", &CapabilitySet::none()), Format::Avc);
    }

    #[test]
    fn first_matching_rule_wins() {
        // Codec says HEVC, MIME says AV1: HEVC is earlier in the table.
        let caps = CapabilitySet::all();
        assert_eq!(resolve_format("hvc1", CONTENT_TYPE_AV1, &caps), Format::Hevc);
        // Without HEVC support the AV1 MIME is used instead.
        let caps = caps.with(Format::Hevc, false);
        assert_eq!(resolve_format("hvc1", CONTENT_TYPE_AV1, &caps), Format::Av1);
    }

    #[test]
    fn hevc_mime_prefix_does_not_match_hev1() {
        let caps = only(Format::Hevc);
        assert_eq!(resolve_format("", CONTENT_TYPE_HEV1, &caps), Format::Avc);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let caps = CapabilitySet::all();
        assert_eq!(resolve_format("HVC1", "", &caps), Format::Avc);
        assert_eq!(resolve_format("", "VIDEO/WEBM", &caps), Format::Avc);
    }

    #[test]
    fn unknown_source_falls_back() {
        let caps = CapabilitySet::all();
        assert_eq!(explain("prores", "video/quicktime", &caps), Decision::Fallback);
        assert_eq!(resolve_format("prores", "video/quicktime", &caps), Format::Avc);
    }

    #[test]
    fn explain_reports_rule() {
        let decision = explain("av1c", "", &CapabilitySet::all());
        assert_eq!(decision, Decision::Rule { index: 6, format: Format::Av1 });
        assert_eq!(decision.to_string(), "av1 (rule 7)");
    }

    #[test]
    fn deterministic() {
        let caps = only(Format::Vvc).with(Format::Av1, true);
        for &(_, codec, mime) in SOURCES {
            assert_eq!(resolve_format(codec, mime, &caps), resolve_format(codec, mime, &caps));
        }
    }

    #[test]
    fn negotiated_format_has_content_type() {
        for caps in every_caps() {
            for &(_, codec, mime) in SOURCES {
                let ct = resolve_format(codec, mime, &caps).content_type();
                assert!(ct.starts_with("video/"), "{ct}");
            }
        }
    }

    #[test]
    fn optional_inputs() {
        let caps = only(Format::Av1);
        assert_eq!(resolve_format_opt(None, None, &caps), Format::Avc);
        assert_eq!(resolve_format_opt(Some("av01"), None, &caps), Format::Av1);
    }
}
