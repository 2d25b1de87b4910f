//! reel-core — video format negotiation and media URL resolution.
//!
//! Given what a playback runtime can decode and what a source file is,
//! pick one delivery format and build the URLs and content types a
//! player needs.
//!
//! # Architecture
//!
//! ```text
//! Layer 0: Models (formats, capability flags, assets)
//! Layer 1: Effects (runtime capability probe, config fetch)
//! Layer 2: Pure resolution (negotiate, paths, thumb)
//! Layer 3: Engine (capabilities + config, shared by callers)
//! ```

pub mod config;
pub mod effects;
pub mod engine;
pub mod error;
pub mod models;
pub mod negotiate;
pub mod paths;
pub mod thumb;

pub use config::ClientConfig;
pub use engine::{Engine, VideoSource};
pub use error::{Error, Result};
pub use models::*;
pub use thumb::ThumbSize;
