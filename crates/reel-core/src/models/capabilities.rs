//! Decode capabilities of the playback runtime.

use serde::{Deserialize, Serialize};

use super::media::Format;

/// Which delivery formats the runtime reports it can decode.
///
/// Built once by [`crate::effects::probe`] and never changed afterwards.
/// Missing fields deserialize as `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilitySet {
    pub avc: bool,
    pub hevc: bool,
    pub hev1: bool,
    pub vvc: bool,
    /// Ogg Theora.
    pub ogv: bool,
    pub vp8: bool,
    pub vp9: bool,
    pub av1: bool,
    pub webm: bool,
}

impl CapabilitySet {
    /// Nothing playable.
    pub const fn none() -> Self {
        Self {
            avc: false,
            hevc: false,
            hev1: false,
            vvc: false,
            ogv: false,
            vp8: false,
            vp9: false,
            av1: false,
            webm: false,
        }
    }

    /// Everything playable.
    pub const fn all() -> Self {
        Self {
            avc: true,
            hevc: true,
            hev1: true,
            vvc: true,
            ogv: true,
            vp8: true,
            vp9: true,
            av1: true,
            webm: true,
        }
    }

    pub fn supports(&self, format: Format) -> bool {
        match format {
            Format::Avc => self.avc,
            Format::Hevc => self.hevc,
            Format::Hev1 => self.hev1,
            Format::Vvc => self.vvc,
            Format::Ogg => self.ogv,
            Format::Vp8 => self.vp8,
            Format::Vp9 => self.vp9,
            Format::Av1 => self.av1,
            Format::Webm => self.webm,
        }
    }

    /// Set a single flag. Only used while the set is being built.
    pub(crate) fn set(&mut self, format: Format, value: bool) {
        let flag = match format {
            Format::Avc => &mut self.avc,
            Format::Hevc => &mut self.hevc,
            Format::Hev1 => &mut self.hev1,
            Format::Vvc => &mut self.vvc,
            Format::Ogg => &mut self.ogv,
            Format::Vp8 => &mut self.vp8,
            Format::Vp9 => &mut self.vp9,
            Format::Av1 => &mut self.av1,
            Format::Webm => &mut self.webm,
        };
        *flag = value;
    }

    /// Builder-style copy with one flag changed.
    pub fn with(mut self, format: Format, value: bool) -> Self {
        self.set(format, value);
        self
    }

    /// Supported formats in precedence order.
    pub fn formats(&self) -> Vec<Format> {
        Format::ALL.into_iter().filter(|f| self.supports(*f)).collect()
    }
}
