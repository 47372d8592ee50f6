use thiserror::Error;

use crate::defines::*;

/// Machine-checkable category of a [`CodecError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    InvalidFrameAlignment,
    FrameTooLarge,
    EncoderUnavailable,
    DecoderUnavailable,
    CodecFailure,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::InvalidArgument => "invalid_argument",
            Self::InvalidFrameAlignment => "invalid_frame_alignment",
            Self::FrameTooLarge => "frame_too_large",
            Self::EncoderUnavailable => "encoder_unavailable",
            Self::DecoderUnavailable => "decoder_unavailable",
            Self::CodecFailure => "codec_failure",
        };
        f.write_str(s)
    }
}

/// A status code returned by libopus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeError {
    pub code: i32,
}

impl NativeError {
    pub const fn new(code: i32) -> Self {
        Self { code }
    }

    /// Returns the fixed human-readable description of the code.
    pub fn description(&self) -> &'static str {
        match self.code {
            OPUS_OK => "OK",
            OPUS_BAD_ARG => "One or more invalid/out-of-range arguments",
            OPUS_BUFFER_TOO_SMALL => "Buffer too small",
            OPUS_INTERNAL_ERROR => "Internal libopus error",
            OPUS_INVALID_PACKET => "Corrupted compressed data",
            OPUS_UNIMPLEMENTED => "Invalid/unsupported request",
            OPUS_INVALID_STATE => "Encoder/decoder in invalid state",
            OPUS_ALLOC_FAIL => "Memory allocation failed",
            _ => "Unknown libopus error",
        }
    }
}

impl std::fmt::Display for NativeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.code)
    }
}

impl std::error::Error for NativeError {}

/// Errors returned by a codec session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("opus: invalid argument: {0}")]
    InvalidArgument(String),

    #[error("opus: pcm buffer length {len} must be a multiple of {stride} bytes (channels*2)")]
    InvalidFrameAlignment { len: usize, stride: usize },

    #[error("opus: frame of {frame_size} samples exceeds maximum of {max}")]
    FrameTooLarge { frame_size: usize, max: usize },

    #[error("opus: encoder create failed: {0}")]
    EncoderUnavailable(NativeError),

    #[error("opus: decoder create failed: {0}")]
    DecoderUnavailable(NativeError),

    #[error("opus: {0}")]
    CodecFailure(NativeError),
}

impl CodecError {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::InvalidFrameAlignment { .. } => ErrorKind::InvalidFrameAlignment,
            Self::FrameTooLarge { .. } => ErrorKind::FrameTooLarge,
            Self::EncoderUnavailable(_) => ErrorKind::EncoderUnavailable,
            Self::DecoderUnavailable(_) => ErrorKind::DecoderUnavailable,
            Self::CodecFailure(_) => ErrorKind::CodecFailure,
        }
    }

    /// Returns the underlying libopus status, if the error came from it.
    pub fn native(&self) -> Option<NativeError> {
        match self {
            Self::EncoderUnavailable(e) | Self::DecoderUnavailable(e) | Self::CodecFailure(e) => {
                Some(*e)
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
