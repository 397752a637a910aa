//! Error types shared across the crate.

use thiserror::Error;

/// Convenience alias used by every fallible operation in the crate.
pub type AvatarResult<T> = Result<T, AvatarError>;

/// Errors produced while loading a source photo or exporting a composite.
///
/// Drawing itself is infallible: degenerate shapes are skipped rather than
/// reported.
#[derive(Debug, Error)]
pub enum AvatarError {
    /// The uploaded bytes are not a recognised image format.
    #[error("not an image: upload rejected before decoding")]
    NotAnImage,

    /// The bytes looked like an image but could not be decoded.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// The output surface could not be allocated.
    #[error("surface error: {0}")]
    Surface(String),

    /// PNG encoding of the finished raster failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// A style profile could not be parsed or serialised.
    #[error("profile error: {0}")]
    Profile(#[from] serde_json::Error),

    /// Reading or writing a file failed (command-line paths only).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AvatarError {
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(AvatarError::NotAnImage.to_string().contains("not an image"));
        assert!(
            AvatarError::surface("x")
                .to_string()
                .contains("surface error:")
        );
        assert!(AvatarError::encode("x").to_string().contains("encode error:"));
    }

    #[test]
    fn io_errors_convert() {
        let err: AvatarError = std::io::Error::other("boom").into();
        assert!(err.to_string().contains("boom"));
    }
}
