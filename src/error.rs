//! Error types for the outer surfaces of the crate.
//!
//! The detection core (ranking, finger scan, hand selection, assembly) never
//! fails: degenerate input resolves to "no finger" or "no hand". Errors only
//! come from configuration, frame sources, and image I/O.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HandError {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A frame source could not be opened or read
    #[error("Frame source error: {0}")]
    Source(String),

    /// Image decoding or encoding failed
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Timestamp formatting error: {0}")]
    Timestamp(#[from] time::error::Format),
}

pub type HandResult<T> = Result<T, HandError>;
