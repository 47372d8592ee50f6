//! Session-oriented Opus encoding and decoding.
//!
//! This crate turns the libopus frame primitives into a reusable session:
//!
//! - `session`: [`CodecSession`], a lazily created encoder/decoder pair with
//!   fixed scratch buffers
//! - `backend`: the [`Backend`] trait the session is built on
//! - `libopus`: the libopus backend (feature `libopus`)
//! - `host`: argument checking for host bindings
//! - `config`: serde-friendly [`SessionConfig`]
//! - `toc`: packet TOC inspection (RFC 6716 Section 3.1)
//!
//! # Example
//!
//! ```ignore
//! use giztoy_opus::CodecSession;
//!
//! let mut session = CodecSession::new(48000, 1)?;
//! session.set_bitrate(32000)?;
//!
//! // 20ms of silence at 48kHz mono
//! let pcm = vec![0u8; 960 * 2];
//! let packet = session.encode(&pcm)?;
//! let decoded = session.decode(&packet)?;
//! assert_eq!(decoded.len(), pcm.len());
//! ```

pub mod backend;
pub mod config;
pub mod defines;
pub mod error;
pub mod host;
pub mod session;
pub mod toc;

#[cfg(feature = "libopus")]
mod ffi;
#[cfg(feature = "libopus")]
pub mod libopus;

#[cfg(test)]
mod testing;

pub use backend::{Application, Backend};
pub use config::SessionConfig;
pub use defines::{MAX_FRAME_SIZE, MAX_PACKET_SIZE};
pub use error::{CodecError, ErrorKind, NativeError, Result};
pub use host::{HostSession, HostValue};
pub use session::CodecSession;
pub use toc::{FrameDuration, Toc};

#[cfg(feature = "libopus")]
pub use libopus::Libopus;
