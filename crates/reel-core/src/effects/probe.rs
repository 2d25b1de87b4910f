//! Capability probe — ask the runtime once which formats it can decode.

use crate::effects::{CanPlay, PlaybackProbe};
use crate::models::{CapabilitySet, Format};

/// Build the capability set for a runtime.
///
/// Each of the canonical content types is queried once. A runtime without
/// any video support is never queried; all flags come back false.
pub fn probe(env: &dyn PlaybackProbe) -> CapabilitySet {
    let mut caps = CapabilitySet::none();

    if !env.supports_video() {
        log::info!("reel: runtime has no video playback, all formats disabled");
        return caps;
    }

    for format in Format::ALL {
        let answer = env.can_play_type(format.content_type());
        log::debug!("reel: can_play_type({}) = {:?}", format.content_type(), answer);
        caps.set(format, answer.is_playable());
    }

    log::info!("reel: playable formats {:?}", caps.formats());
    caps
}

/// Probe answering `Probably` for a fixed list of MIME strings.
///
/// Matching is exact. Used by the CLI (`--supports`) and tests.
#[derive(Debug, Clone, Default)]
pub struct ListProbe {
    supported: Vec<String>,
}

impl ListProbe {
    pub fn new<I, S>(supported: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            supported: supported.into_iter().map(Into::into).collect(),
        }
    }

    /// Probe that supports the canonical content type of each given format.
    pub fn formats(formats: &[Format]) -> Self {
        Self::new(formats.iter().map(|f| f.content_type()))
    }
}

impl PlaybackProbe for ListProbe {
    fn supports_video(&self) -> bool {
        !self.supported.is_empty()
    }

    fn can_play_type(&self, mime: &str) -> CanPlay {
        if self.supported.iter().any(|s| s == mime) {
            CanPlay::Probably
        } else {
            CanPlay::No
        }
    }
}

/// Probe replaying a capability set computed elsewhere (e.g. sent by a
/// browser client as JSON).
#[derive(Debug, Clone, Copy)]
pub struct FixedProbe(pub CapabilitySet);

impl PlaybackProbe for FixedProbe {
    fn supports_video(&self) -> bool {
        true
    }

    fn can_play_type(&self, mime: &str) -> CanPlay {
        let playable = Format::ALL
            .into_iter()
            .any(|f| f.content_type() == mime && self.0.supports(f));
        if playable {
            CanPlay::Probably
        } else {
            CanPlay::No
        }
    }
}
