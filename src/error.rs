use thiserror::Error;

/// Convenience alias used throughout the scoring core.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that abort a scoring run.
#[derive(Debug, Error)]
pub enum Error {
    /// The image could not be read, fetched, or decoded.
    #[error("cannot load image from {location}: {cause}")]
    SourceUnreadable {
        location: String,
        #[source]
        cause: SourceError,
    },

    /// The image has no pixels in at least one dimension.
    #[error("image has invalid dimensions {width}x{height}")]
    InvalidImageDimensions { width: u32, height: u32 },

    /// No display probe produced a usable screen resolution.
    #[error("could not detect screen resolution: {0}")]
    NoScreen(String),
}

/// Underlying reason an image source was unreadable.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Decode(#[from] image::ImageError),

    #[error("{0}")]
    Fetch(#[from] reqwest::Error),

    #[error("server answered with status {0}")]
    HttpStatus(reqwest::StatusCode),

    /// Pixel data whose channel layout cannot be clamped into RGB(A).
    #[error("malformed color sample: {reason}")]
    MalformedColorSample { reason: String },
}

impl Error {
    pub(crate) fn unreadable(location: impl Into<String>, cause: impl Into<SourceError>) -> Self {
        Error::SourceUnreadable {
            location: location.into(),
            cause: cause.into(),
        }
    }
}
