//! Opus codec session.
//!
//! A [`CodecSession`] owns at most one encoder and one decoder for a fixed
//! sample rate and channel count, created lazily on first use, plus two
//! fixed-capacity scratch buffers reused by every call. Results are always
//! copied out of the scratch buffers.

use tracing::{debug, warn};

use crate::backend::{Application, Backend};
use crate::defines::*;
use crate::error::{CodecError, NativeError, Result};
use crate::toc::FrameDuration;

/// Opus channel counts never exceed 255; scratch sizing relies on this bound.
const MAX_CHANNELS: i32 = 255;

/// An encoder/decoder pair over a [`Backend`].
///
/// All operations take `&mut self`; use one session per stream.
pub struct CodecSession<B: Backend> {
    backend: B,
    sample_rate: i32,
    channels: i32,
    application: Application,
    encoder: Option<B::Encoder>,
    decoder: Option<B::Decoder>,
    /// `MAX_FRAME_SIZE * channels` samples: decode output and encode input staging.
    pcm: Box<[i16]>,
    /// `MAX_PACKET_SIZE` bytes of encode output.
    packet: Box<[u8]>,
}

#[cfg(feature = "libopus")]
impl CodecSession<crate::libopus::Libopus> {
    /// Creates a libopus session for general audio.
    pub fn new(sample_rate: i32, channels: i32) -> Result<Self> {
        Self::with_application(sample_rate, channels, Application::Audio)
    }

    /// Creates a libopus session with the given application profile.
    pub fn with_application(sample_rate: i32, channels: i32, application: Application) -> Result<Self> {
        Self::with_backend(crate::libopus::Libopus, sample_rate, channels, application)
    }
}

impl<B: Backend> CodecSession<B> {
    /// Creates a session over `backend`.
    ///
    /// Only positivity is checked here; whether libopus supports the rate
    /// and channel count is reported by the first encoder/decoder creation.
    pub fn with_backend(
        backend: B,
        sample_rate: i32,
        channels: i32,
        application: Application,
    ) -> Result<Self> {
        if sample_rate <= 0 {
            return Err(CodecError::invalid_argument(format!(
                "sample rate must be positive, got {}",
                sample_rate
            )));
        }
        if channels <= 0 || channels > MAX_CHANNELS {
            return Err(CodecError::invalid_argument(format!(
                "channels must be in 1..={}, got {}",
                MAX_CHANNELS, channels
            )));
        }

        Ok(Self {
            backend,
            sample_rate,
            channels,
            application,
            encoder: None,
            decoder: None,
            pcm: vec![0i16; MAX_FRAME_SIZE * channels as usize].into_boxed_slice(),
            packet: vec![0u8; MAX_PACKET_SIZE].into_boxed_slice(),
        })
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> i32 {
        self.sample_rate
    }

    /// Number of interleaved channels.
    pub fn channels(&self) -> i32 {
        self.channels
    }

    /// Application profile the encoder is created with.
    pub fn application(&self) -> Application {
        self.application
    }

    /// Returns the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns true once the encoder has been created.
    pub fn has_encoder(&self) -> bool {
        self.encoder.is_some()
    }

    /// Returns true once the decoder has been created.
    pub fn has_decoder(&self) -> bool {
        self.decoder.is_some()
    }

    /// Samples per channel in a frame of the given duration.
    pub fn frame_size_for_duration(&self, fd: FrameDuration) -> usize {
        fd.samples(self.sample_rate)
    }

    /// PCM bytes in a frame of the given duration.
    pub fn frame_bytes_for_duration(&self, fd: FrameDuration) -> usize {
        self.frame_size_for_duration(fd) * self.channels as usize * 2
    }

    /// Encodes one frame of interleaved 16-bit little-endian PCM.
    ///
    /// The frame size is derived from the buffer length and must be one of
    /// the durations libopus accepts.
    pub fn encode(&mut self, pcm: &[u8]) -> Result<Vec<u8>> {
        let enc = Self::ensure_encoder(
            &self.backend,
            &mut self.encoder,
            self.sample_rate,
            self.channels,
            self.application,
        )?;

        let frame_size = checked_frame_size(pcm.len(), self.channels as usize)?;
        let staged = &mut self.pcm[..frame_size * self.channels as usize];
        for (dst, src) in staged.iter_mut().zip(pcm.chunks_exact(2)) {
            *dst = i16::from_le_bytes([src[0], src[1]]);
        }

        let n = self.backend.encode(enc, staged, frame_size as i32, &mut self.packet);
        self.take_packet(n)
    }

    /// Encodes one frame of interleaved samples.
    pub fn encode_samples(&mut self, pcm: &[i16]) -> Result<Vec<u8>> {
        let enc = Self::ensure_encoder(
            &self.backend,
            &mut self.encoder,
            self.sample_rate,
            self.channels,
            self.application,
        )?;

        let frame_size = checked_frame_size(pcm.len() * 2, self.channels as usize)?;
        let n = self.backend.encode(enc, pcm, frame_size as i32, &mut self.packet);
        self.take_packet(n)
    }

    /// Decodes one packet into interleaved 16-bit little-endian PCM.
    pub fn decode(&mut self, packet: &[u8]) -> Result<Vec<u8>> {
        let n = self.decode_to_scratch(packet)?;
        let mut out = Vec::with_capacity(n * 2);
        for s in &self.pcm[..n] {
            out.extend_from_slice(&s.to_le_bytes());
        }
        Ok(out)
    }

    /// Decodes one packet into interleaved samples.
    pub fn decode_samples(&mut self, packet: &[u8]) -> Result<Vec<i16>> {
        let n = self.decode_to_scratch(packet)?;
        Ok(self.pcm[..n].to_vec())
    }

    /// Applies a set-style encoder control request.
    ///
    /// Only requests taking a single integer argument are passed through;
    /// anything else fails with `OPUS_UNIMPLEMENTED` without a native call.
    pub fn apply_encoder_ctl(&mut self, request: i32, value: i32) -> Result<()> {
        check_request(request, is_encoder_set_request(request), "encoder set")?;
        let enc = Self::ensure_encoder(
            &self.backend,
            &mut self.encoder,
            self.sample_rate,
            self.channels,
            self.application,
        )?;
        check_status(self.backend.encoder_ctl(enc, request, value))
    }

    /// Applies a get-style encoder control request and returns the value.
    pub fn encoder_ctl_get(&mut self, request: i32) -> Result<i32> {
        check_request(request, is_encoder_get_request(request), "encoder get")?;
        let enc = Self::ensure_encoder(
            &self.backend,
            &mut self.encoder,
            self.sample_rate,
            self.channels,
            self.application,
        )?;
        let mut value = 0;
        check_status(self.backend.encoder_ctl_get(enc, request, &mut value))?;
        Ok(value)
    }

    /// Applies a set-style decoder control request.
    pub fn apply_decoder_ctl(&mut self, request: i32, value: i32) -> Result<()> {
        check_request(request, is_decoder_set_request(request), "decoder set")?;
        let dec = Self::ensure_decoder(&self.backend, &mut self.decoder, self.sample_rate, self.channels)?;
        check_status(self.backend.decoder_ctl(dec, request, value))
    }

    /// Applies a get-style decoder control request and returns the value.
    pub fn decoder_ctl_get(&mut self, request: i32) -> Result<i32> {
        check_request(request, is_decoder_get_request(request), "decoder get")?;
        let dec = Self::ensure_decoder(&self.backend, &mut self.decoder, self.sample_rate, self.channels)?;
        let mut value = 0;
        check_status(self.backend.decoder_ctl_get(dec, request, &mut value))?;
        Ok(value)
    }

    /// Sets the target bitrate in bits per second (or `OPUS_AUTO` /
    /// `OPUS_BITRATE_MAX`).
    pub fn set_bitrate(&mut self, bitrate: i32) -> Result<()> {
        self.apply_encoder_ctl(OPUS_SET_BITRATE_REQUEST, bitrate)
    }

    /// Returns the encoder's current bitrate in bits per second.
    pub fn get_bitrate(&mut self) -> Result<i32> {
        self.encoder_ctl_get(OPUS_GET_BITRATE_REQUEST)
    }

    /// Sets the encoder complexity (0-10).
    pub fn set_complexity(&mut self, complexity: i32) -> Result<()> {
        self.apply_encoder_ctl(OPUS_SET_COMPLEXITY_REQUEST, complexity)
    }

    /// Enables or disables variable bitrate.
    pub fn set_vbr(&mut self, enabled: bool) -> Result<()> {
        self.apply_encoder_ctl(OPUS_SET_VBR_REQUEST, enabled as i32)
    }

    pub fn set_inband_fec(&mut self, enabled: bool) -> Result<()> {
        self.apply_encoder_ctl(OPUS_SET_INBAND_FEC_REQUEST, enabled as i32)
    }

    /// Hints the expected packet loss percentage (0-100).
    pub fn set_packet_loss_perc(&mut self, percent: i32) -> Result<()> {
        self.apply_encoder_ctl(OPUS_SET_PACKET_LOSS_PERC_REQUEST, percent)
    }

    fn ensure_encoder<'a>(
        backend: &B,
        slot: &'a mut Option<B::Encoder>,
        sample_rate: i32,
        channels: i32,
        application: Application,
    ) -> Result<&'a mut B::Encoder> {
        let enc = match slot.take() {
            Some(enc) => enc,
            None => match backend.create_encoder(sample_rate, channels, application) {
                Ok(enc) => {
                    debug!(
                        "opus: encoder created, rate={}, channels={}, application={}",
                        sample_rate, channels, application
                    );
                    enc
                }
                Err(e) => {
                    warn!("opus: encoder create failed: {}", e);
                    return Err(CodecError::EncoderUnavailable(e));
                }
            },
        };
        Ok(slot.insert(enc))
    }

    fn ensure_decoder<'a>(
        backend: &B,
        slot: &'a mut Option<B::Decoder>,
        sample_rate: i32,
        channels: i32,
    ) -> Result<&'a mut B::Decoder> {
        let dec = match slot.take() {
            Some(dec) => dec,
            None => match backend.create_decoder(sample_rate, channels) {
                Ok(dec) => {
                    debug!("opus: decoder created, rate={}, channels={}", sample_rate, channels);
                    dec
                }
                Err(e) => {
                    warn!("opus: decoder create failed: {}", e);
                    return Err(CodecError::DecoderUnavailable(e));
                }
            },
        };
        Ok(slot.insert(dec))
    }

    /// Copies the first `n` bytes of the packet scratch.
    fn take_packet(&self, n: i32) -> Result<Vec<u8>> {
        if n < 0 {
            let e = NativeError::new(n);
            debug!("opus: encode failed: {}", e);
            return Err(CodecError::CodecFailure(e));
        }
        let n = n as usize;
        if n > self.packet.len() {
            warn!(
                "opus: encode reported {} bytes, packet buffer holds {}",
                n,
                self.packet.len()
            );
            return Err(CodecError::CodecFailure(NativeError::new(OPUS_INTERNAL_ERROR)));
        }
        Ok(self.packet[..n].to_vec())
    }

    /// Decodes into the pcm scratch. Returns the number of interleaved
    /// samples written.
    fn decode_to_scratch(&mut self, packet: &[u8]) -> Result<usize> {
        if packet.is_empty() {
            return Err(CodecError::invalid_argument("packet must not be empty"));
        }
        let dec = Self::ensure_decoder(&self.backend, &mut self.decoder, self.sample_rate, self.channels)?;

        let n = self
            .backend
            .decode(dec, packet, &mut self.pcm, MAX_FRAME_SIZE as i32, false);
        if n < 0 {
            let e = NativeError::new(n);
            debug!("opus: decode failed: {}", e);
            return Err(CodecError::CodecFailure(e));
        }

        let samples = n as usize * self.channels as usize;
        if samples > self.pcm.len() {
            warn!(
                "opus: decode reported {} samples, pcm buffer holds {}",
                samples,
                self.pcm.len()
            );
            return Err(CodecError::CodecFailure(NativeError::new(OPUS_INTERNAL_ERROR)));
        }
        Ok(samples)
    }
}

impl<B: Backend> std::fmt::Debug for CodecSession<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecSession")
            .field("sample_rate", &self.sample_rate)
            .field("channels", &self.channels)
            .field("application", &self.application)
            .field("has_encoder", &self.encoder.is_some())
            .field("has_decoder", &self.decoder.is_some())
            .finish()
    }
}

/// Validates a PCM byte length and returns the frame size in samples per
/// channel.
fn checked_frame_size(len: usize, channels: usize) -> Result<usize> {
    let stride = 2 * channels;
    if len % stride != 0 {
        return Err(CodecError::InvalidFrameAlignment { len, stride });
    }
    let frame_size = len / stride;
    if frame_size > MAX_FRAME_SIZE {
        return Err(CodecError::FrameTooLarge {
            frame_size,
            max: MAX_FRAME_SIZE,
        });
    }
    Ok(frame_size)
}

/// Rejects a ctl request whose argument type is not known to match the call.
fn check_request(request: i32, supported: bool, what: &str) -> Result<()> {
    if !supported {
        debug!("opus: {} request {} rejected", what, request);
        return Err(CodecError::CodecFailure(NativeError::new(OPUS_UNIMPLEMENTED)));
    }
    Ok(())
}

fn check_status(rc: i32) -> Result<()> {
    if rc != OPUS_OK {
        return Err(CodecError::CodecFailure(NativeError::new(rc)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::testing::Scripted;

    fn session(backend: Scripted, channels: i32) -> CodecSession<Scripted> {
        CodecSession::with_backend(backend, 48000, channels, Application::Audio).unwrap()
    }

    #[test]
    fn test_new_rejects_non_positive() {
        let err = CodecSession::with_backend(Scripted::new(), 0, 1, Application::Audio).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = CodecSession::with_backend(Scripted::new(), 48000, -2, Application::Audio).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = CodecSession::with_backend(Scripted::new(), 48000, 256, Application::Audio).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_new_is_lazy() {
        let s = session(Scripted::new(), 2);
        assert!(!s.has_encoder());
        assert!(!s.has_decoder());
        assert_eq!(s.backend().calls.create_encoder.get(), 0);
        assert_eq!(s.backend().calls.create_decoder.get(), 0);
        assert_eq!(s.pcm.len(), MAX_FRAME_SIZE * 2);
        assert_eq!(s.packet.len(), MAX_PACKET_SIZE);
    }

    #[test]
    fn test_drop_without_use() {
        let backend = Scripted::new();
        let calls = backend.calls.clone();
        drop(session(backend, 1));
        assert_eq!(calls.encoders_dropped.get(), 0);
        assert_eq!(calls.decoders_dropped.get(), 0);
    }

    #[test]
    fn test_drop_releases_each_state_once() {
        let backend = Scripted::new();
        let calls = backend.calls.clone();
        let mut s = session(backend, 1);
        s.encode(&[0u8; 1920]).unwrap();
        s.decode(&[0xFC, 0, 0]).unwrap();
        s.encode(&[0u8; 1920]).unwrap();
        drop(s);
        assert_eq!(calls.encoders_dropped.get(), 1);
        assert_eq!(calls.decoders_dropped.get(), 1);
    }

    #[test]
    fn test_ensure_encoder_idempotent() {
        let mut s = session(Scripted::new(), 1);
        s.get_bitrate().unwrap();
        s.get_bitrate().unwrap();
        s.encode(&[0u8; 1920]).unwrap();
        assert_eq!(s.backend().calls.create_encoder.get(), 1);
        assert_eq!(s.backend().calls.create_decoder.get(), 0);
    }

    #[test]
    fn test_ensure_encoder_retries_after_failure() {
        let mut s = session(Scripted::new().fail_create_encoder(OPUS_ALLOC_FAIL), 1);

        let err = s.encode(&[0u8; 1920]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EncoderUnavailable);
        assert_eq!(err.native().unwrap().description(), "Memory allocation failed");
        assert!(!s.has_encoder());

        assert!(s.encode(&[0u8; 1920]).is_ok());
        assert!(s.has_encoder());
        assert_eq!(s.backend().calls.create_encoder.get(), 2);
    }

    #[test]
    fn test_ensure_decoder_retries_after_failure() {
        let mut s = session(Scripted::new().fail_create_decoder(OPUS_BAD_ARG), 1);

        let err = s.decode(&[0xFC]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecoderUnavailable);
        assert_eq!(s.backend().calls.decode.get(), 0);

        assert!(s.decode(&[0xFC]).is_ok());
        assert_eq!(s.backend().calls.create_decoder.get(), 2);
    }

    #[test]
    fn test_encode_misaligned() {
        let mut s = session(Scripted::new(), 1);
        let err = s.encode(&[0u8; 3]).unwrap_err();
        assert_eq!(err, CodecError::InvalidFrameAlignment { len: 3, stride: 2 });
        assert_eq!(s.backend().calls.encode.get(), 0);

        let mut s = session(Scripted::new(), 2);
        let err = s.encode(&[0u8; 6]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFrameAlignment);
        assert_eq!(s.backend().calls.encode.get(), 0);
    }

    #[test]
    fn test_encode_frame_too_large() {
        let mut s = session(Scripted::new(), 2);
        let err = s.encode(&vec![0u8; (MAX_FRAME_SIZE + 1) * 4]).unwrap_err();
        assert_eq!(
            err,
            CodecError::FrameTooLarge {
                frame_size: MAX_FRAME_SIZE + 1,
                max: MAX_FRAME_SIZE
            }
        );
        assert_eq!(s.backend().calls.encode.get(), 0);

        // Exactly the maximum is accepted.
        assert!(s.encode(&vec![0u8; MAX_FRAME_SIZE * 4]).is_ok());
    }

    #[test]
    fn test_encode_unavailable_before_alignment() {
        let mut s = session(Scripted::new().fail_create_encoder(OPUS_BAD_ARG), 1);
        let err = s.encode(&[0u8; 3]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EncoderUnavailable);
    }

    #[test]
    fn test_encode_copies_valid_prefix() {
        let mut s = session(Scripted::new(), 1);
        let mut pcm = vec![0u8; 1920];
        pcm[0] = 7;
        let first = s.encode(&pcm).unwrap();
        assert_eq!(first, vec![0xFC, 7, (960 % 256) as u8]);

        pcm[0] = 9;
        let second = s.encode(&pcm).unwrap();
        assert_eq!(second[1], 9);
        // The earlier result is unaffected by scratch reuse.
        assert_eq!(first[1], 7);
    }

    #[test]
    fn test_encode_samples() {
        let mut s = session(Scripted::new(), 2);
        let packet = s.encode_samples(&[5i16; 960 * 2]).unwrap();
        assert_eq!(packet[1], 5);

        let err = s.encode_samples(&[0i16; 3]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFrameAlignment);
    }

    #[test]
    fn test_encode_error_mapping() {
        let cases = [
            (OPUS_BAD_ARG, "One or more invalid/out-of-range arguments"),
            (OPUS_BUFFER_TOO_SMALL, "Buffer too small"),
            (OPUS_INTERNAL_ERROR, "Internal libopus error"),
            (OPUS_INVALID_PACKET, "Corrupted compressed data"),
            (OPUS_UNIMPLEMENTED, "Invalid/unsupported request"),
            (OPUS_INVALID_STATE, "Encoder/decoder in invalid state"),
            (OPUS_ALLOC_FAIL, "Memory allocation failed"),
            (-99, "Unknown libopus error"),
        ];
        for (code, want) in cases {
            let mut s = session(Scripted::new().fail_encode(code), 1);
            let err = s.encode(&[0u8; 1920]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::CodecFailure);
            assert_eq!(err.native().unwrap().code, code);
            assert_eq!(err.native().unwrap().description(), want);
        }
    }

    #[test]
    fn test_decode_output_length() {
        let mut s = session(Scripted::new(), 1);
        let pcm = s.decode(&[0x01, 0x02]).unwrap();
        assert_eq!(pcm.len(), 1920);
        assert_eq!(&pcm[..4], &[1, 0, 1, 0]);

        let mut s = session(Scripted::new(), 2);
        let samples = s.decode_samples(&[0x03]).unwrap();
        assert_eq!(samples.len(), 1920);
        assert!(samples.iter().all(|&v| v == 3));
    }

    #[test]
    fn test_decode_empty_packet() {
        let mut s = session(Scripted::new(), 1);
        let err = s.decode(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(!s.has_decoder());
    }

    #[test]
    fn test_decode_failure() {
        let mut s = session(Scripted::new().fail_decode(OPUS_INVALID_PACKET), 1);
        let err = s.decode(&[0xFF]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CodecFailure);
        assert_eq!(err.native().unwrap().description(), "Corrupted compressed data");

        // The decoder survives a failed packet.
        assert!(s.decode(&[0xFF]).is_ok());
        assert_eq!(s.backend().calls.create_decoder.get(), 1);
    }

    #[test]
    fn test_bitrate_roundtrip() {
        let mut s = session(Scripted::new(), 2);
        s.set_bitrate(64000).unwrap();
        assert_eq!(s.get_bitrate().unwrap(), 64000);
    }

    #[test]
    fn test_encoder_ctl_failure() {
        let mut s = session(Scripted::new(), 1);
        let err = s.apply_encoder_ctl(9999, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CodecFailure);
        assert_eq!(err.native().unwrap().code, OPUS_UNIMPLEMENTED);

        let mut s = session(Scripted::new().fail_ctl(OPUS_BAD_ARG), 1);
        let err = s.set_bitrate(1).unwrap_err();
        assert_eq!(err.native().unwrap().code, OPUS_BAD_ARG);
    }

    #[test]
    fn test_ctl_request_direction_checked() {
        let mut s = session(Scripted::new(), 1);

        // Get-style ids on the set path would make libopus write through `value`.
        for request in [OPUS_GET_BITRATE_REQUEST, OPUS_GET_SAMPLE_RATE_REQUEST] {
            let err = s.apply_encoder_ctl(request, 4096).unwrap_err();
            assert_eq!(err.native(), Some(NativeError::new(OPUS_UNIMPLEMENTED)));
        }
        let err = s.apply_decoder_ctl(OPUS_GET_GAIN_REQUEST, 4096).unwrap_err();
        assert_eq!(err.native(), Some(NativeError::new(OPUS_UNIMPLEMENTED)));

        // Set-style ids on the get path would read the out-pointer as an int.
        let err = s.encoder_ctl_get(OPUS_SET_BITRATE_REQUEST).unwrap_err();
        assert_eq!(err.native(), Some(NativeError::new(OPUS_UNIMPLEMENTED)));
        let err = s.decoder_ctl_get(OPUS_SET_GAIN_REQUEST).unwrap_err();
        assert_eq!(err.native(), Some(NativeError::new(OPUS_UNIMPLEMENTED)));

        // Encoder requests are not decoder requests.
        let err = s.apply_decoder_ctl(OPUS_SET_BITRATE_REQUEST, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CodecFailure);

        assert_eq!(s.backend().calls.encoder_ctl.get(), 0);
        assert_eq!(s.backend().calls.decoder_ctl.get(), 0);
        assert!(!s.has_encoder());
        assert!(!s.has_decoder());
    }

    #[test]
    fn test_encode_overreported_length() {
        let mut s = session(Scripted::new().report_encoded(MAX_PACKET_SIZE as i32 + 1), 1);
        let err = s.encode(&[0u8; 1920]).unwrap_err();
        assert_eq!(err.native(), Some(NativeError::new(OPUS_INTERNAL_ERROR)));

        // Exactly the packet capacity is fine.
        let mut s = session(Scripted::new().report_encoded(MAX_PACKET_SIZE as i32), 1);
        assert_eq!(s.encode(&[0u8; 1920]).unwrap().len(), MAX_PACKET_SIZE);
    }

    #[test]
    fn test_decode_overreported_length() {
        let mut s = session(Scripted::new().report_decoded(MAX_FRAME_SIZE as i32 + 1), 2);
        let err = s.decode(&[0xFC]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CodecFailure);
        assert_eq!(err.native(), Some(NativeError::new(OPUS_INTERNAL_ERROR)));

        let mut s = session(Scripted::new().report_decoded(MAX_FRAME_SIZE as i32), 2);
        assert_eq!(s.decode_samples(&[0xFC]).unwrap().len(), MAX_FRAME_SIZE * 2);
    }

    #[test]
    fn test_encoder_ctl_unavailable() {
        let mut s = session(Scripted::new().fail_create_encoder(OPUS_INTERNAL_ERROR), 1);
        let err = s.set_bitrate(32000).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EncoderUnavailable);
        assert_eq!(s.backend().calls.encoder_ctl.get(), 0);
    }

    #[test]
    fn test_decoder_ctl() {
        let mut s = session(Scripted::new(), 1);
        s.apply_decoder_ctl(OPUS_SET_GAIN_REQUEST, -512).unwrap();
        assert_eq!(s.decoder_ctl_get(OPUS_GET_GAIN_REQUEST).unwrap(), -512);
        assert!(s.has_decoder());
        assert!(!s.has_encoder());
    }

    #[test]
    fn test_decoder_ctl_unavailable() {
        let mut s = session(Scripted::new().fail_create_decoder(OPUS_ALLOC_FAIL), 1);
        let err = s.apply_decoder_ctl(OPUS_SET_GAIN_REQUEST, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecoderUnavailable);
    }

    #[test]
    fn test_typed_ctls() {
        let mut s = session(Scripted::new(), 1);
        s.set_complexity(5).unwrap();
        s.set_vbr(false).unwrap();
        s.set_inband_fec(true).unwrap();
        s.set_packet_loss_perc(10).unwrap();
        assert_eq!(s.backend().calls.encoder_ctl.get(), 4);
    }

    #[test]
    fn test_frame_size_for_duration() {
        let s = session(Scripted::new(), 2);
        assert_eq!(s.frame_size_for_duration(FrameDuration::Ms10), 480);
        assert_eq!(s.frame_size_for_duration(FrameDuration::Ms20), 960);
        assert_eq!(s.frame_bytes_for_duration(FrameDuration::Ms20), 3840);
    }

    #[test]
    fn test_debug_format() {
        let s = session(Scripted::new(), 1);
        let dbg = format!("{:?}", s);
        assert!(dbg.contains("sample_rate: 48000"));
        assert!(dbg.contains("has_encoder: false"));
    }
}
