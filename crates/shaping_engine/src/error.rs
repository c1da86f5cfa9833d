//! Error types for the shaping engine

use crate::FontHandle;
use std::collections::TryReserveError;
use std::str::Utf8Error;
use thiserror::Error;

/// Errors raised while loading or discovering fonts
#[derive(Debug, Error)]
pub enum TextError {
    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Invalid font data: {0}")]
    InvalidFontData(String),

    #[error("Font discovery failed: {0}")]
    DiscoveryFailed(String),

    #[error("Font loading failed: {0}")]
    LoadingFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TextError>;

/// Coarse classification of a [`ShapeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller passed unusable text or options
    Input,
    /// A font could not be found or resolved
    Resource,
    /// The font backend failed for a reason other than a missing glyph
    FontBackend,
    /// A buffer could not grow
    Allocation,
}

/// Errors that abort a whole shaping call
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("Input is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] Utf8Error),

    #[error("Font size must be positive, got {0}")]
    InvalidSize(f32),

    #[error("Font handle {0} does not resolve")]
    UnknownFont(FontHandle),

    #[error("No usable font: {0}")]
    NoUsableFont(String),

    #[error("Font backend error in {handle}: {message}")]
    FontBackend { handle: FontHandle, message: String },

    #[error("Allocation failed: {0}")]
    Allocation(#[from] TryReserveError),
}

impl ShapeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShapeError::InvalidEncoding(_) | ShapeError::InvalidSize(_) => ErrorKind::Input,
            ShapeError::UnknownFont(_) | ShapeError::NoUsableFont(_) => ErrorKind::Resource,
            ShapeError::FontBackend { .. } => ErrorKind::FontBackend,
            ShapeError::Allocation(_) => ErrorKind::Allocation,
        }
    }
}

impl From<TextError> for ShapeError {
    fn from(err: TextError) -> Self {
        ShapeError::NoUsableFont(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(ShapeError::InvalidSize(0.0).kind(), ErrorKind::Input);
        assert_eq!(ShapeError::UnknownFont(FontHandle(7)).kind(), ErrorKind::Resource);
        assert_eq!(
            ShapeError::FontBackend {
                handle: FontHandle(1),
                message: "bad hmtx".into()
            }
            .kind(),
            ErrorKind::FontBackend
        );

        let bytes = vec![b'a', 0xff];
        let utf8 = std::str::from_utf8(&bytes).unwrap_err();
        assert_eq!(ShapeError::from(utf8).kind(), ErrorKind::Input);
    }

    #[test]
    fn test_text_error_maps_to_resource() {
        let err: ShapeError = TextError::FontNotFound("sans-serif".into()).into();
        assert_eq!(err.kind(), ErrorKind::Resource);
        assert!(err.to_string().contains("sans-serif"));
    }
}
