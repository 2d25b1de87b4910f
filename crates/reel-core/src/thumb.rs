//! Thumbnail size selection.

use serde::{Deserialize, Serialize};

/// Size tag used when no configured size is large enough.
pub const FALLBACK_SIZE: &str = "fit_7680";

/// A thumbnail size the server can render, e.g. `fit_1920` at 1920x1200.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbSize {
    pub w: u32,
    pub h: u32,
    pub size: String,
}

impl ThumbSize {
    pub fn new(w: u32, h: u32, size: impl Into<String>) -> Self {
        Self { w, h, size: size.into() }
    }

    fn covers(&self, width: u32, height: u32) -> bool {
        self.w >= width && self.h >= height
    }
}

/// The viewer's fit sizes, ascending.
pub fn default_sizes() -> Vec<ThumbSize> {
    vec![
        ThumbSize::new(720, 720, "fit_720"),
        ThumbSize::new(1280, 1024, "fit_1280"),
        ThumbSize::new(1920, 1200, "fit_1920"),
        ThumbSize::new(2560, 1600, "fit_2560"),
        ThumbSize::new(4096, 4096, "fit_4096"),
        ThumbSize::new(7680, 4320, FALLBACK_SIZE),
    ]
}

/// Pick the size tag for a display area of `width` x `height` device
/// pixels (device pixel ratio already applied).
///
/// Returns the first entry, in the given order, at least as wide and as
/// high as requested. This is first-fit: `sizes` must be sorted
/// ascending for the result to be the smallest sufficient size. Unsorted
/// input is not reordered.
pub fn resolve_thumbnail_size(width: u32, height: u32, sizes: &[ThumbSize]) -> &str {
    sizes
        .iter()
        .find(|t| t.covers(width, height))
        .map(|t| t.size.as_str())
        .unwrap_or(FALLBACK_SIZE)
}

/// Whether both dimensions are non-decreasing along the list.
pub fn is_ascending(sizes: &[ThumbSize]) -> bool {
    sizes.windows(2).all(|w| w[0].w <= w[1].w && w[0].h <= w[1].h)
}
