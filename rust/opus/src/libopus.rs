//! [`Backend`] over the system libopus.

use std::os::raw::c_int;
use std::ptr::NonNull;

use crate::backend::{Application, Backend};
use crate::defines::*;
use crate::error::NativeError;
use crate::ffi;

/// The libopus backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct Libopus;

/// Owned libopus encoder state.
pub struct EncoderHandle {
    ptr: NonNull<ffi::OpusEncoder>,
    channels: usize,
}

/// Owned libopus decoder state.
pub struct DecoderHandle {
    ptr: NonNull<ffi::OpusDecoder>,
    channels: usize,
}

// Safety: libopus states carry no thread affinity; a handle is only ever
// used through `&mut` and is never shared.
unsafe impl Send for EncoderHandle {}
unsafe impl Send for DecoderHandle {}

impl Drop for EncoderHandle {
    fn drop(&mut self) {
        unsafe { ffi::opus_encoder_destroy(self.ptr.as_ptr()) };
    }
}

impl Drop for DecoderHandle {
    fn drop(&mut self) {
        unsafe { ffi::opus_decoder_destroy(self.ptr.as_ptr()) };
    }
}

impl Backend for Libopus {
    type Encoder = EncoderHandle;
    type Decoder = DecoderHandle;

    fn create_encoder(
        &self,
        sample_rate: i32,
        channels: i32,
        application: Application,
    ) -> Result<EncoderHandle, NativeError> {
        let mut error: c_int = OPUS_OK;
        let ptr = unsafe {
            ffi::opus_encoder_create(sample_rate, channels, application.to_ffi(), &mut error)
        };

        match NonNull::new(ptr) {
            Some(ptr) if error == OPUS_OK => Ok(EncoderHandle {
                ptr,
                channels: channels as usize,
            }),
            Some(ptr) => {
                unsafe { ffi::opus_encoder_destroy(ptr.as_ptr()) };
                Err(NativeError::new(error))
            }
            None if error == OPUS_OK => Err(NativeError::new(OPUS_ALLOC_FAIL)),
            None => Err(NativeError::new(error)),
        }
    }

    fn create_decoder(&self, sample_rate: i32, channels: i32) -> Result<DecoderHandle, NativeError> {
        let mut error: c_int = OPUS_OK;
        let ptr = unsafe { ffi::opus_decoder_create(sample_rate, channels, &mut error) };

        match NonNull::new(ptr) {
            Some(ptr) if error == OPUS_OK => Ok(DecoderHandle {
                ptr,
                channels: channels as usize,
            }),
            Some(ptr) => {
                unsafe { ffi::opus_decoder_destroy(ptr.as_ptr()) };
                Err(NativeError::new(error))
            }
            None if error == OPUS_OK => Err(NativeError::new(OPUS_ALLOC_FAIL)),
            None => Err(NativeError::new(error)),
        }
    }

    fn encode(&self, enc: &mut EncoderHandle, pcm: &[i16], frame_size: i32, out: &mut [u8]) -> i32 {
        // libopus reads frame_size * channels samples.
        if frame_size < 0 || pcm.len() < frame_size as usize * enc.channels {
            return OPUS_BAD_ARG;
        }
        let max_data_bytes = i32::try_from(out.len()).unwrap_or(i32::MAX);

        unsafe {
            ffi::opus_encode(
                enc.ptr.as_ptr(),
                pcm.as_ptr(),
                frame_size,
                out.as_mut_ptr(),
                max_data_bytes,
            )
        }
    }

    fn decode(
        &self,
        dec: &mut DecoderHandle,
        packet: &[u8],
        out: &mut [i16],
        frame_size: i32,
        fec: bool,
    ) -> i32 {
        if frame_size < 0 || out.len() < frame_size as usize * dec.channels {
            return OPUS_BUFFER_TOO_SMALL;
        }
        let Ok(len) = i32::try_from(packet.len()) else {
            return OPUS_BAD_ARG;
        };

        unsafe {
            ffi::opus_decode(
                dec.ptr.as_ptr(),
                packet.as_ptr(),
                len,
                out.as_mut_ptr(),
                frame_size,
                fec as c_int,
            )
        }
    }

    // Requests outside the classified sets are refused: passing an int where
    // libopus expects a pointer (or the reverse) is undefined behavior.

    fn encoder_ctl(&self, enc: &mut EncoderHandle, request: i32, value: i32) -> i32 {
        if !is_encoder_set_request(request) {
            return OPUS_UNIMPLEMENTED;
        }
        unsafe { ffi::opus_encoder_ctl(enc.ptr.as_ptr(), request, value as c_int) }
    }

    fn encoder_ctl_get(&self, enc: &mut EncoderHandle, request: i32, value: &mut i32) -> i32 {
        if !is_encoder_get_request(request) {
            return OPUS_UNIMPLEMENTED;
        }
        unsafe { ffi::opus_encoder_ctl(enc.ptr.as_ptr(), request, value as *mut i32) }
    }

    fn decoder_ctl(&self, dec: &mut DecoderHandle, request: i32, value: i32) -> i32 {
        if !is_decoder_set_request(request) {
            return OPUS_UNIMPLEMENTED;
        }
        unsafe { ffi::opus_decoder_ctl(dec.ptr.as_ptr(), request, value as c_int) }
    }

    fn decoder_ctl_get(&self, dec: &mut DecoderHandle, request: i32, value: &mut i32) -> i32 {
        if !is_decoder_get_request(request) {
            return OPUS_UNIMPLEMENTED;
        }
        unsafe { ffi::opus_decoder_ctl(dec.ptr.as_ptr(), request, value as *mut i32) }
    }
}
