//! reel data models.
//!
//! Types exist where Rust type safety helps: a closed enum for the
//! delivery format, a flag set for capabilities. Codec tags and MIME
//! strings coming from sources stay plain strings.

pub mod asset;
pub mod capabilities;
pub mod media;

pub use asset::{select_video_file, AssetRef, MediaFile};
pub use capabilities::CapabilitySet;
pub use media::{content_type_for, Format};
