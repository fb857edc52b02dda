/// Convenience alias used by every fallible operation in the workspace.
pub type Result<T> = std::result::Result<T, ImageError>;

/// Errors returned by the image operations.
///
/// All checks run before the first output sample is written, so an error
/// never comes with a partially filled buffer.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ImageError {
    #[error("invalid argument `{param}`: {reason}")]
    InvalidArgument { param: &'static str, reason: String },

    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
}

impl ImageError {
    pub fn invalid_argument(param: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            param,
            reason: reason.into(),
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

/// Problems with the shape or backing storage of an input buffer.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    #[error("zero-area image (width={width}, height={height})")]
    ZeroArea { width: usize, height: usize },

    #[error("image shape mismatch (expected {expected_width}x{expected_height}, got {width}x{height})")]
    ShapeMismatch {
        expected_width: usize,
        expected_height: usize,
        width: usize,
        height: usize,
    },

    #[error("invalid buffer length (expected {expected} samples, got {got})")]
    BufferLength { expected: usize, got: usize },

    #[error("planar image has no channels")]
    NoChannels,
}
