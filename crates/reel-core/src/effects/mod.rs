use std::fmt;

/// Answer of a runtime decode-support query for one MIME string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CanPlay {
    #[default]
    No,
    Maybe,
    Probably,
}

impl CanPlay {
    /// Parse the usual `""` / `"maybe"` / `"probably"` answer.
    /// Anything unrecognized counts as `No`.
    pub fn parse(answer: &str) -> Self {
        match answer {
            "probably" => CanPlay::Probably,
            "maybe" => CanPlay::Maybe,
            _ => CanPlay::No,
        }
    }

    pub fn is_playable(self) -> bool {
        !matches!(self, CanPlay::No)
    }
}

impl fmt::Display for CanPlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CanPlay::No => "",
            CanPlay::Maybe => "maybe",
            CanPlay::Probably => "probably",
        })
    }
}

/// Trait for the runtime's media decode-support query.
///
/// The capability probe uses this to abstract over browsers, native
/// players and headless hosts. Implementations must answer any MIME
/// string without side effects.
pub trait PlaybackProbe: Send + Sync {
    /// Whether the runtime can play video at all.
    fn supports_video(&self) -> bool;
    fn can_play_type(&self, mime: &str) -> CanPlay;
}

/// Probe for hosts without any video playback.
///
/// Every capability comes out false. Use for headless/server-side
/// resolution where only URL building matters.
pub struct NoopProbe;

impl PlaybackProbe for NoopProbe {
    fn supports_video(&self) -> bool { false }
    fn can_play_type(&self, _: &str) -> CanPlay { CanPlay::No }
}

#[cfg(feature = "http")]
pub mod http;
pub mod probe;

pub use probe::{probe, FixedProbe, ListProbe};
