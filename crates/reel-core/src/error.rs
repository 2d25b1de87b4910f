//! Error type for the fallible edges of reel.
//!
//! Negotiation and URL resolution are total and never return errors.
//! Only configuration loading and tag parsing can fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown video format: {0:?}")]
    UnknownFormat(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[cfg(feature = "http")]
    #[error("http: {0}")]
    Http(String),
}

pub type Result<T> = std::result::Result<T, Error>;
