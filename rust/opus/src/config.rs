//! Session configuration.
//!
//! A [`SessionConfig`] is plain data that can be read from YAML or JSON and
//! turned into a [`CodecSession`] with its tunables applied.

use serde::{Deserialize, Serialize};

use crate::backend::{Application, Backend};
use crate::error::{CodecError, Result};
use crate::session::CodecSession;
use crate::toc::FrameDuration;

/// Default sample rate.
pub const DEFAULT_SAMPLE_RATE: i32 = 48000;
/// Default frame duration in milliseconds.
pub const DEFAULT_FRAME_DURATION_MS: u32 = 20;

/// Parameters of a codec session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_sample_rate")]
    pub sample_rate: i32,

    #[serde(default = "default_channels")]
    pub channels: i32,

    #[serde(default)]
    pub application: Application,

    /// Target bitrate in bits per second.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<i32>,

    /// Encoder complexity (0-10).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vbr: Option<bool>,

    /// Expected packet loss percentage (0-100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packet_loss_perc: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inband_fec: Option<bool>,

    /// Frame duration used when splitting a PCM stream into frames.
    #[serde(default = "default_frame_duration_ms")]
    pub frame_duration_ms: u32,
}

fn default_sample_rate() -> i32 {
    DEFAULT_SAMPLE_RATE
}

fn default_channels() -> i32 {
    1
}

fn default_frame_duration_ms() -> u32 {
    DEFAULT_FRAME_DURATION_MS
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: 1,
            application: Application::default(),
            bitrate: None,
            complexity: None,
            vbr: None,
            packet_loss_perc: None,
            inband_fec: None,
            frame_duration_ms: DEFAULT_FRAME_DURATION_MS,
        }
    }
}

impl SessionConfig {
    /// Checks the fields this layer owns. Rate and channel support is left
    /// to libopus.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate <= 0 {
            return Err(CodecError::invalid_argument(format!(
                "sample_rate must be positive, got {}",
                self.sample_rate
            )));
        }
        if self.channels <= 0 {
            return Err(CodecError::invalid_argument(format!(
                "channels must be positive, got {}",
                self.channels
            )));
        }
        self.frame_duration()?;
        Ok(())
    }

    pub fn frame_duration(&self) -> Result<FrameDuration> {
        FrameDuration::from_millis(self.frame_duration_ms).ok_or_else(|| {
            CodecError::invalid_argument(format!(
                "frame_duration_ms must be one of 5, 10, 20, 40, 60, got {}",
                self.frame_duration_ms
            ))
        })
    }

    /// Returns true if any encoder tunable is set.
    pub fn has_encoder_tunables(&self) -> bool {
        self.bitrate.is_some()
            || self.complexity.is_some()
            || self.vbr.is_some()
            || self.packet_loss_perc.is_some()
            || self.inband_fec.is_some()
    }

    /// Creates a session over `backend` and applies every configured
    /// tunable. Tunables force encoder creation.
    pub fn open_with<B: Backend>(&self, backend: B) -> Result<CodecSession<B>> {
        self.validate()?;
        let mut session =
            CodecSession::with_backend(backend, self.sample_rate, self.channels, self.application)?;

        if let Some(bitrate) = self.bitrate {
            session.set_bitrate(bitrate)?;
        }
        if let Some(complexity) = self.complexity {
            session.set_complexity(complexity)?;
        }
        if let Some(vbr) = self.vbr {
            session.set_vbr(vbr)?;
        }
        if let Some(perc) = self.packet_loss_perc {
            session.set_packet_loss_perc(perc)?;
        }
        if let Some(fec) = self.inband_fec {
            session.set_inband_fec(fec)?;
        }
        Ok(session)
    }

    /// Creates a libopus session.
    #[cfg(feature = "libopus")]
    pub fn open(&self) -> Result<CodecSession<crate::libopus::Libopus>> {
        self.open_with(crate::libopus::Libopus)
    }
}
