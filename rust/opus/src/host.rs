//! Per-call contract exposed to a host binding layer.
//!
//! A host runtime hands over loosely typed arguments. [`HostSession`]
//! checks arity and types before anything reaches the codec, so malformed
//! calls fail with [`ErrorKind::InvalidArgument`](crate::ErrorKind) and
//! never touch native state.

use crate::backend::{Application, Backend};
use crate::error::{CodecError, Result};
use crate::session::CodecSession;

/// A value crossing the host boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Bytes(Vec<u8>),
}

impl HostValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
        }
    }
}

impl From<i32> for HostValue {
    fn from(v: i32) -> Self {
        Self::Number(v as f64)
    }
}

impl From<Vec<u8>> for HostValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<&[u8]> for HostValue {
    fn from(v: &[u8]) -> Self {
        Self::Bytes(v.to_vec())
    }
}

/// Method names a host may call.
pub const METHODS: [&str; 6] = [
    "encode",
    "decode",
    "applyEncoderCTL",
    "applyDecoderCTL",
    "setBitrate",
    "getBitrate",
];

/// A [`CodecSession`] behind the host calling convention.
pub struct HostSession<B: Backend> {
    session: CodecSession<B>,
}

impl<B: Backend> std::fmt::Debug for HostSession<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostSession").field("session", &self.session).finish()
    }
}

impl<B: Backend> HostSession<B> {
    /// Constructs from `(sampleRate: number, channels: number)`.
    pub fn construct(backend: B, args: &[HostValue]) -> Result<Self> {
        const USAGE: &str = "expected (rate: number, channels: number)";
        if args.len() < 2 {
            return Err(CodecError::invalid_argument(USAGE));
        }
        let rate = int_arg(args, 0, USAGE)?;
        let channels = int_arg(args, 1, USAGE)?;
        let session = CodecSession::with_backend(backend, rate, channels, Application::Audio)?;
        Ok(Self { session })
    }

    pub fn session(&self) -> &CodecSession<B> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut CodecSession<B> {
        &mut self.session
    }

    pub fn into_session(self) -> CodecSession<B> {
        self.session
    }

    /// Dispatches a method call by name.
    pub fn call(&mut self, method: &str, args: &[HostValue]) -> Result<HostValue> {
        match method {
            "encode" => self.encode(args),
            "decode" => self.decode(args),
            "applyEncoderCTL" => self.apply_encoder_ctl(args),
            "applyDecoderCTL" => self.apply_decoder_ctl(args),
            "setBitrate" => self.set_bitrate(args),
            "getBitrate" => self.get_bitrate(),
            _ => Err(CodecError::invalid_argument(format!(
                "unknown method {:?}, expected one of {}",
                method,
                METHODS.join(", ")
            ))),
        }
    }

    /// `encode(pcm: bytes) -> bytes`
    pub fn encode(&mut self, args: &[HostValue]) -> Result<HostValue> {
        let pcm = bytes_arg(args, 0, "argument must be bytes containing 16-bit PCM")?;
        self.session.encode(pcm).map(HostValue::Bytes)
    }

    /// `decode(packet: bytes) -> bytes`
    pub fn decode(&mut self, args: &[HostValue]) -> Result<HostValue> {
        let packet = bytes_arg(args, 0, "argument must be bytes")?;
        self.session.decode(packet).map(HostValue::Bytes)
    }

    /// `applyEncoderCTL(ctl: number, value: number) -> number`
    pub fn apply_encoder_ctl(&mut self, args: &[HostValue]) -> Result<HostValue> {
        let (ctl, value) = ctl_args(args)?;
        self.session.apply_encoder_ctl(ctl, value)?;
        Ok(HostValue::from(crate::defines::OPUS_OK))
    }

    /// `applyDecoderCTL(ctl: number, value: number) -> number`
    pub fn apply_decoder_ctl(&mut self, args: &[HostValue]) -> Result<HostValue> {
        let (ctl, value) = ctl_args(args)?;
        self.session.apply_decoder_ctl(ctl, value)?;
        Ok(HostValue::from(crate::defines::OPUS_OK))
    }

    /// `setBitrate(bitrate: number) -> number`
    pub fn set_bitrate(&mut self, args: &[HostValue]) -> Result<HostValue> {
        let bitrate = int_arg(args, 0, "expected bitrate (number)")?;
        self.session.set_bitrate(bitrate)?;
        Ok(HostValue::from(crate::defines::OPUS_OK))
    }

    /// `getBitrate() -> number`
    pub fn get_bitrate(&mut self) -> Result<HostValue> {
        self.session.get_bitrate().map(HostValue::from)
    }
}

fn ctl_args(args: &[HostValue]) -> Result<(i32, i32)> {
    const USAGE: &str = "expected (ctl: number, value: number)";
    if args.len() < 2 {
        return Err(CodecError::invalid_argument(USAGE));
    }
    Ok((int_arg(args, 0, USAGE)?, int_arg(args, 1, USAGE)?))
}

fn bytes_arg<'a>(args: &'a [HostValue], index: usize, usage: &str) -> Result<&'a [u8]> {
    match args.get(index) {
        Some(HostValue::Bytes(b)) => Ok(b),
        Some(other) => Err(CodecError::invalid_argument(format!(
            "{}, got {}",
            usage,
            other.type_name()
        ))),
        None => Err(CodecError::invalid_argument(usage)),
    }
}

/// Reads a number argument, truncated toward zero.
fn int_arg(args: &[HostValue], index: usize, usage: &str) -> Result<i32> {
    let n = match args.get(index) {
        Some(HostValue::Number(n)) => *n,
        Some(other) => {
            return Err(CodecError::invalid_argument(format!(
                "{}, got {} at position {}",
                usage,
                other.type_name(),
                index
            )));
        }
        None => return Err(CodecError::invalid_argument(usage)),
    };
    if !n.is_finite() {
        return Err(CodecError::invalid_argument(format!(
            "{}, got non-finite number at position {}",
            usage, index
        )));
    }
    let t = n.trunc();
    if t < i32::MIN as f64 || t > i32::MAX as f64 {
        return Err(CodecError::invalid_argument(format!(
            "{}, number {} at position {} is out of range",
            usage, n, index
        )));
    }
    Ok(t as i32)
}
