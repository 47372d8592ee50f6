//! Constants shared with libopus (from opus_defines.h) and the fixed
//! protocol limits of a codec session.

/// Maximum frame size in samples per channel (120 ms at 48 kHz).
pub const MAX_FRAME_SIZE: usize = 5760;

/// Maximum size of one compressed packet in bytes.
pub const MAX_PACKET_SIZE: usize = 1276;

// Return codes
pub const OPUS_OK: i32 = 0;
pub const OPUS_BAD_ARG: i32 = -1;
pub const OPUS_BUFFER_TOO_SMALL: i32 = -2;
pub const OPUS_INTERNAL_ERROR: i32 = -3;
pub const OPUS_INVALID_PACKET: i32 = -4;
pub const OPUS_UNIMPLEMENTED: i32 = -5;
pub const OPUS_INVALID_STATE: i32 = -6;
pub const OPUS_ALLOC_FAIL: i32 = -7;

// Application types
pub const OPUS_APPLICATION_VOIP: i32 = 2048;
pub const OPUS_APPLICATION_AUDIO: i32 = 2049;
pub const OPUS_APPLICATION_RESTRICTED_LOWDELAY: i32 = 2051;

// CTL request codes
pub const OPUS_SET_APPLICATION_REQUEST: i32 = 4000;
pub const OPUS_GET_APPLICATION_REQUEST: i32 = 4001;
pub const OPUS_SET_BITRATE_REQUEST: i32 = 4002;
pub const OPUS_GET_BITRATE_REQUEST: i32 = 4003;
pub const OPUS_SET_MAX_BANDWIDTH_REQUEST: i32 = 4004;
pub const OPUS_GET_MAX_BANDWIDTH_REQUEST: i32 = 4005;
pub const OPUS_SET_VBR_REQUEST: i32 = 4006;
pub const OPUS_GET_VBR_REQUEST: i32 = 4007;
pub const OPUS_SET_BANDWIDTH_REQUEST: i32 = 4008;
pub const OPUS_GET_BANDWIDTH_REQUEST: i32 = 4009;
pub const OPUS_SET_COMPLEXITY_REQUEST: i32 = 4010;
pub const OPUS_GET_COMPLEXITY_REQUEST: i32 = 4011;
pub const OPUS_SET_INBAND_FEC_REQUEST: i32 = 4012;
pub const OPUS_GET_INBAND_FEC_REQUEST: i32 = 4013;
pub const OPUS_SET_PACKET_LOSS_PERC_REQUEST: i32 = 4014;
pub const OPUS_GET_PACKET_LOSS_PERC_REQUEST: i32 = 4015;
pub const OPUS_SET_DTX_REQUEST: i32 = 4016;
pub const OPUS_GET_DTX_REQUEST: i32 = 4017;
pub const OPUS_SET_VBR_CONSTRAINT_REQUEST: i32 = 4020;
pub const OPUS_GET_VBR_CONSTRAINT_REQUEST: i32 = 4021;
pub const OPUS_SET_FORCE_CHANNELS_REQUEST: i32 = 4022;
pub const OPUS_GET_FORCE_CHANNELS_REQUEST: i32 = 4023;
pub const OPUS_SET_SIGNAL_REQUEST: i32 = 4024;
pub const OPUS_GET_SIGNAL_REQUEST: i32 = 4025;
pub const OPUS_GET_LOOKAHEAD_REQUEST: i32 = 4027;
pub const OPUS_GET_SAMPLE_RATE_REQUEST: i32 = 4029;
pub const OPUS_GET_FINAL_RANGE_REQUEST: i32 = 4031;
pub const OPUS_GET_PITCH_REQUEST: i32 = 4033;
pub const OPUS_SET_GAIN_REQUEST: i32 = 4034;
pub const OPUS_SET_LSB_DEPTH_REQUEST: i32 = 4036;
pub const OPUS_GET_LSB_DEPTH_REQUEST: i32 = 4037;
pub const OPUS_GET_LAST_PACKET_DURATION_REQUEST: i32 = 4039;
pub const OPUS_SET_EXPERT_FRAME_DURATION_REQUEST: i32 = 4040;
pub const OPUS_GET_EXPERT_FRAME_DURATION_REQUEST: i32 = 4041;
pub const OPUS_SET_PREDICTION_DISABLED_REQUEST: i32 = 4042;
pub const OPUS_GET_PREDICTION_DISABLED_REQUEST: i32 = 4043;
pub const OPUS_GET_GAIN_REQUEST: i32 = 4045;
pub const OPUS_SET_PHASE_INVERSION_DISABLED_REQUEST: i32 = 4046;
pub const OPUS_GET_PHASE_INVERSION_DISABLED_REQUEST: i32 = 4047;
pub const OPUS_GET_IN_DTX_REQUEST: i32 = 4049;

// The ctl entry points are variadic: the request id decides whether the
// argument is read as an int or written through as an `opus_int32*`. Only
// the requests classified below may be passed through, each with the
// argument type it expects.

/// Encoder requests taking one `opus_int32` argument.
pub fn is_encoder_set_request(request: i32) -> bool {
    matches!(
        request,
        OPUS_SET_APPLICATION_REQUEST
            | OPUS_SET_BITRATE_REQUEST
            | OPUS_SET_MAX_BANDWIDTH_REQUEST
            | OPUS_SET_VBR_REQUEST
            | OPUS_SET_BANDWIDTH_REQUEST
            | OPUS_SET_COMPLEXITY_REQUEST
            | OPUS_SET_INBAND_FEC_REQUEST
            | OPUS_SET_PACKET_LOSS_PERC_REQUEST
            | OPUS_SET_DTX_REQUEST
            | OPUS_SET_VBR_CONSTRAINT_REQUEST
            | OPUS_SET_FORCE_CHANNELS_REQUEST
            | OPUS_SET_SIGNAL_REQUEST
            | OPUS_SET_LSB_DEPTH_REQUEST
            | OPUS_SET_EXPERT_FRAME_DURATION_REQUEST
            | OPUS_SET_PREDICTION_DISABLED_REQUEST
            | OPUS_SET_PHASE_INVERSION_DISABLED_REQUEST
    )
}

/// Encoder requests writing one 32-bit value through a pointer.
pub fn is_encoder_get_request(request: i32) -> bool {
    matches!(
        request,
        OPUS_GET_APPLICATION_REQUEST
            | OPUS_GET_BITRATE_REQUEST
            | OPUS_GET_MAX_BANDWIDTH_REQUEST
            | OPUS_GET_VBR_REQUEST
            | OPUS_GET_BANDWIDTH_REQUEST
            | OPUS_GET_COMPLEXITY_REQUEST
            | OPUS_GET_INBAND_FEC_REQUEST
            | OPUS_GET_PACKET_LOSS_PERC_REQUEST
            | OPUS_GET_DTX_REQUEST
            | OPUS_GET_VBR_CONSTRAINT_REQUEST
            | OPUS_GET_FORCE_CHANNELS_REQUEST
            | OPUS_GET_SIGNAL_REQUEST
            | OPUS_GET_LOOKAHEAD_REQUEST
            | OPUS_GET_SAMPLE_RATE_REQUEST
            | OPUS_GET_FINAL_RANGE_REQUEST
            | OPUS_GET_LSB_DEPTH_REQUEST
            | OPUS_GET_EXPERT_FRAME_DURATION_REQUEST
            | OPUS_GET_PREDICTION_DISABLED_REQUEST
            | OPUS_GET_PHASE_INVERSION_DISABLED_REQUEST
            | OPUS_GET_IN_DTX_REQUEST
    )
}

/// Decoder requests taking one `opus_int32` argument.
pub fn is_decoder_set_request(request: i32) -> bool {
    matches!(
        request,
        OPUS_SET_GAIN_REQUEST | OPUS_SET_PHASE_INVERSION_DISABLED_REQUEST
    )
}

/// Decoder requests writing one 32-bit value through a pointer.
pub fn is_decoder_get_request(request: i32) -> bool {
    matches!(
        request,
        OPUS_GET_BANDWIDTH_REQUEST
            | OPUS_GET_SAMPLE_RATE_REQUEST
            | OPUS_GET_FINAL_RANGE_REQUEST
            | OPUS_GET_PITCH_REQUEST
            | OPUS_GET_LAST_PACKET_DURATION_REQUEST
            | OPUS_GET_GAIN_REQUEST
            | OPUS_GET_PHASE_INVERSION_DISABLED_REQUEST
    )
}

// Special bitrate values
pub const OPUS_AUTO: i32 = -1000;
pub const OPUS_BITRATE_MAX: i32 = -1;
