//! The native primitives a [`CodecSession`](crate::CodecSession) is built on.

use serde::{Deserialize, Serialize};

use crate::defines::*;
use crate::error::NativeError;

/// Opus application type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Application {
    /// Best quality for voice signals.
    #[serde(rename = "voip")]
    VoIP,
    /// Best quality for non-voice signals.
    #[default]
    Audio,
    /// Minimum possible coding delay.
    RestrictedLowdelay,
}

impl Application {
    pub fn to_ffi(self) -> i32 {
        match self {
            Self::VoIP => OPUS_APPLICATION_VOIP,
            Self::Audio => OPUS_APPLICATION_AUDIO,
            Self::RestrictedLowdelay => OPUS_APPLICATION_RESTRICTED_LOWDELAY,
        }
    }

    pub fn from_ffi(value: i32) -> Option<Self> {
        match value {
            OPUS_APPLICATION_VOIP => Some(Self::VoIP),
            OPUS_APPLICATION_AUDIO => Some(Self::Audio),
            OPUS_APPLICATION_RESTRICTED_LOWDELAY => Some(Self::RestrictedLowdelay),
            _ => None,
        }
    }
}

impl std::fmt::Display for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VoIP => write!(f, "voip"),
            Self::Audio => write!(f, "audio"),
            Self::RestrictedLowdelay => write!(f, "restricted_lowdelay"),
        }
    }
}

/// Encoder/decoder primitives of an Opus implementation.
///
/// Handles are released by dropping them; release never fails.
///
/// `encode`, `decode` and the ctl calls return the raw libopus status: a
/// non-negative count (or `OPUS_OK`) on success, a negative error code
/// otherwise.
pub trait Backend {
    type Encoder;
    type Decoder;

    fn create_encoder(
        &self,
        sample_rate: i32,
        channels: i32,
        application: Application,
    ) -> Result<Self::Encoder, NativeError>;

    fn create_decoder(&self, sample_rate: i32, channels: i32) -> Result<Self::Decoder, NativeError>;

    /// Encodes `frame_size` samples per channel from `pcm` into `out`.
    /// Returns the packet length in bytes.
    fn encode(&self, enc: &mut Self::Encoder, pcm: &[i16], frame_size: i32, out: &mut [u8]) -> i32;

    /// Decodes `packet` into `out`, which holds at most `frame_size` samples
    /// per channel. Returns the decoded samples per channel.
    fn decode(
        &self,
        dec: &mut Self::Decoder,
        packet: &[u8],
        out: &mut [i16],
        frame_size: i32,
        fec: bool,
    ) -> i32;

    /// Applies an integer-argument request. Implementations must refuse
    /// requests outside [`crate::defines::is_encoder_set_request`] (and the
    /// matching predicate for each ctl method) with `OPUS_UNIMPLEMENTED`.
    fn encoder_ctl(&self, enc: &mut Self::Encoder, request: i32, value: i32) -> i32;

    fn encoder_ctl_get(&self, enc: &mut Self::Encoder, request: i32, value: &mut i32) -> i32;

    fn decoder_ctl(&self, dec: &mut Self::Decoder, request: i32, value: i32) -> i32;

    fn decoder_ctl_get(&self, dec: &mut Self::Decoder, request: i32, value: &mut i32) -> i32;
}
