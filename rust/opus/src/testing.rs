//! A scripted [`Backend`] that records every native call.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::backend::{Application, Backend};
use crate::defines::*;
use crate::error::NativeError;

/// Call counters shared between a [`Scripted`] backend and its handles.
#[derive(Debug, Default)]
pub struct Calls {
    pub create_encoder: Cell<usize>,
    pub create_decoder: Cell<usize>,
    pub encode: Cell<usize>,
    pub decode: Cell<usize>,
    pub encoder_ctl: Cell<usize>,
    pub decoder_ctl: Cell<usize>,
    pub encoders_dropped: Cell<usize>,
    pub decoders_dropped: Cell<usize>,
}

fn bump(c: &Cell<usize>) {
    c.set(c.get() + 1);
}

pub struct FakeEncoder {
    calls: Rc<Calls>,
    bitrate: i32,
}

impl Drop for FakeEncoder {
    fn drop(&mut self) {
        bump(&self.calls.encoders_dropped);
    }
}

pub struct FakeDecoder {
    calls: Rc<Calls>,
    channels: usize,
    gain: i32,
}

impl Drop for FakeDecoder {
    fn drop(&mut self) {
        bump(&self.calls.decoders_dropped);
    }
}

/// Backend whose native results can be queued per primitive. When a queue
/// is empty the primitive succeeds:
///
/// - encode writes `[0xFC, pcm[0] as u8, frame_size as u8]` and returns 3;
/// - decode fills 960 samples per channel (or fewer if capped) with the
///   first packet byte and returns the sample count.
#[derive(Debug, Default)]
pub struct Scripted {
    pub calls: Rc<Calls>,
    pub create_encoder_results: RefCell<VecDeque<i32>>,
    pub create_decoder_results: RefCell<VecDeque<i32>>,
    pub encode_results: RefCell<VecDeque<i32>>,
    pub decode_results: RefCell<VecDeque<i32>>,
    pub ctl_results: RefCell<VecDeque<i32>>,
}

impl Scripted {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_create_encoder(self, code: i32) -> Self {
        self.create_encoder_results.borrow_mut().push_back(code);
        self
    }

    pub fn fail_create_decoder(self, code: i32) -> Self {
        self.create_decoder_results.borrow_mut().push_back(code);
        self
    }

    pub fn fail_encode(self, code: i32) -> Self {
        self.encode_results.borrow_mut().push_back(code);
        self
    }

    pub fn fail_decode(self, code: i32) -> Self {
        self.decode_results.borrow_mut().push_back(code);
        self
    }

    /// Queues a byte count for encode to report, regardless of what it wrote.
    pub fn report_encoded(self, n: i32) -> Self {
        self.encode_results.borrow_mut().push_back(n);
        self
    }

    /// Queues a samples-per-channel count for decode to report.
    pub fn report_decoded(self, n: i32) -> Self {
        self.decode_results.borrow_mut().push_back(n);
        self
    }

    pub fn fail_ctl(self, code: i32) -> Self {
        self.ctl_results.borrow_mut().push_back(code);
        self
    }

    fn next_ctl(&self) -> i32 {
        self.ctl_results.borrow_mut().pop_front().unwrap_or(OPUS_OK)
    }
}

impl Backend for Scripted {
    type Encoder = FakeEncoder;
    type Decoder = FakeDecoder;

    fn create_encoder(
        &self,
        _sample_rate: i32,
        _channels: i32,
        _application: Application,
    ) -> Result<FakeEncoder, NativeError> {
        bump(&self.calls.create_encoder);
        match self.create_encoder_results.borrow_mut().pop_front() {
            Some(code) if code != OPUS_OK => Err(NativeError::new(code)),
            _ => Ok(FakeEncoder {
                calls: self.calls.clone(),
                bitrate: OPUS_AUTO,
            }),
        }
    }

    fn create_decoder(&self, _sample_rate: i32, channels: i32) -> Result<FakeDecoder, NativeError> {
        bump(&self.calls.create_decoder);
        match self.create_decoder_results.borrow_mut().pop_front() {
            Some(code) if code != OPUS_OK => Err(NativeError::new(code)),
            _ => Ok(FakeDecoder {
                calls: self.calls.clone(),
                channels: channels as usize,
                gain: 0,
            }),
        }
    }

    fn encode(&self, _enc: &mut FakeEncoder, pcm: &[i16], frame_size: i32, out: &mut [u8]) -> i32 {
        bump(&self.calls.encode);
        if let Some(code) = self.encode_results.borrow_mut().pop_front() {
            return code;
        }
        let first = pcm.first().copied().unwrap_or(0);
        out[..3].copy_from_slice(&[0xFC, first as u8, frame_size as u8]);
        3
    }

    fn decode(
        &self,
        dec: &mut FakeDecoder,
        packet: &[u8],
        out: &mut [i16],
        frame_size: i32,
        _fec: bool,
    ) -> i32 {
        bump(&self.calls.decode);
        if let Some(code) = self.decode_results.borrow_mut().pop_front() {
            return code;
        }
        let n = (frame_size as usize).min(960);
        let value = packet.first().copied().unwrap_or(0) as i16;
        out[..n * dec.channels].fill(value);
        n as i32
    }

    fn encoder_ctl(&self, enc: &mut FakeEncoder, request: i32, value: i32) -> i32 {
        bump(&self.calls.encoder_ctl);
        let rc = self.next_ctl();
        if rc != OPUS_OK {
            return rc;
        }
        match request {
            OPUS_SET_BITRATE_REQUEST => {
                enc.bitrate = value;
                OPUS_OK
            }
            OPUS_SET_COMPLEXITY_REQUEST
            | OPUS_SET_VBR_REQUEST
            | OPUS_SET_INBAND_FEC_REQUEST
            | OPUS_SET_PACKET_LOSS_PERC_REQUEST => OPUS_OK,
            _ => OPUS_UNIMPLEMENTED,
        }
    }

    fn encoder_ctl_get(&self, enc: &mut FakeEncoder, request: i32, value: &mut i32) -> i32 {
        bump(&self.calls.encoder_ctl);
        let rc = self.next_ctl();
        if rc != OPUS_OK {
            return rc;
        }
        match request {
            OPUS_GET_BITRATE_REQUEST => {
                *value = enc.bitrate;
                OPUS_OK
            }
            _ => OPUS_UNIMPLEMENTED,
        }
    }

    fn decoder_ctl(&self, dec: &mut FakeDecoder, request: i32, value: i32) -> i32 {
        bump(&self.calls.decoder_ctl);
        let rc = self.next_ctl();
        if rc != OPUS_OK {
            return rc;
        }
        match request {
            OPUS_SET_GAIN_REQUEST => {
                dec.gain = value;
                OPUS_OK
            }
            _ => OPUS_UNIMPLEMENTED,
        }
    }

    fn decoder_ctl_get(&self, dec: &mut FakeDecoder, request: i32, value: &mut i32) -> i32 {
        bump(&self.calls.decoder_ctl);
        let rc = self.next_ctl();
        if rc != OPUS_OK {
            return rc;
        }
        match request {
            OPUS_GET_GAIN_REQUEST => {
                *value = dec.gain;
                OPUS_OK
            }
            _ => OPUS_UNIMPLEMENTED,
        }
    }
}
