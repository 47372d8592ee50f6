//! Opus packet TOC (Table of Contents) inspection.
//!
//! Implements RFC 6716 Section 3.1.

use std::time::Duration;

/// TOC byte from an Opus packet header.
///
/// Layout:
/// ```text
///          0 1 2 3 4 5 6 7
///         +-+-+-+-+-+-+-+-+
///         | config  |s| c |
///         +-+-+-+-+-+-+-+-+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toc(pub u8);

impl Toc {
    /// Reads the TOC of a packet. Returns `None` for an empty packet.
    pub fn of(packet: &[u8]) -> Option<Self> {
        packet.first().copied().map(Self)
    }

    /// Returns the configuration number (0-31).
    pub fn configuration(&self) -> u8 {
        self.0 >> 3
    }

    pub fn mode(&self) -> Mode {
        match self.configuration() {
            0..=11 => Mode::Silk,
            12..=15 => Mode::Hybrid,
            _ => Mode::Celt,
        }
    }

    pub fn bandwidth(&self) -> Bandwidth {
        match self.configuration() {
            0..=3 | 16..=19 => Bandwidth::Narrowband,
            4..=7 => Bandwidth::Mediumband,
            8..=11 | 20..=23 => Bandwidth::Wideband,
            12..=13 | 24..=27 => Bandwidth::Superwideband,
            _ => Bandwidth::Fullband,
        }
    }

    /// Returns the duration of each frame in the packet.
    pub fn frame_duration(&self) -> FrameDuration {
        let c = self.configuration();
        if c >= 16 {
            // CELT cycles 2.5/5/10/20ms within each bandwidth.
            return match c % 4 {
                0 => FrameDuration::Ms2_5,
                1 => FrameDuration::Ms5,
                2 => FrameDuration::Ms10,
                _ => FrameDuration::Ms20,
            };
        }
        if c >= 12 {
            // Hybrid is 10/20ms.
            return if c % 2 == 0 { FrameDuration::Ms10 } else { FrameDuration::Ms20 };
        }
        match c % 4 {
            0 => FrameDuration::Ms10,
            1 => FrameDuration::Ms20,
            2 => FrameDuration::Ms40,
            _ => FrameDuration::Ms60,
        }
    }

    pub fn is_stereo(&self) -> bool {
        self.0 & 0b100 != 0
    }

    pub fn frame_code(&self) -> FrameCode {
        match self.0 & 0b11 {
            0 => FrameCode::One,
            1 => FrameCode::TwoEqual,
            2 => FrameCode::TwoDifferent,
            _ => FrameCode::Arbitrary,
        }
    }
}

impl std::fmt::Display for Toc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "opus_toc: config={}, stereo={}, mode={}, bw={}, {}, {}",
            self.configuration(),
            self.is_stereo(),
            self.mode(),
            self.bandwidth(),
            self.frame_code(),
            self.frame_duration(),
        )
    }
}

/// Number of frames in a packet. Returns `None` when the packet is empty or
/// a code 3 packet is missing its frame count byte.
pub fn frame_count(packet: &[u8]) -> Option<usize> {
    let toc = Toc::of(packet)?;
    match toc.frame_code() {
        FrameCode::One => Some(1),
        FrameCode::TwoEqual | FrameCode::TwoDifferent => Some(2),
        FrameCode::Arbitrary => packet.get(1).map(|b| (b & 0b0011_1111) as usize),
    }
}

/// Total audio duration carried by a packet.
pub fn packet_duration(packet: &[u8]) -> Option<Duration> {
    let toc = Toc::of(packet)?;
    let n = frame_count(packet)?;
    Some(toc.frame_duration().duration() * n as u32)
}

/// Coding mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Silk,
    Hybrid,
    Celt,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Silk => write!(f, "SILK"),
            Self::Hybrid => write!(f, "Hybrid"),
            Self::Celt => write!(f, "CELT"),
        }
    }
}

/// Frame code indicating number of frames per packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameCode {
    One,
    TwoEqual,
    TwoDifferent,
    Arbitrary,
}

impl std::fmt::Display for FrameCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::One => write!(f, "One Frame"),
            Self::TwoEqual => write!(f, "Two Equal Frames"),
            Self::TwoDifferent => write!(f, "Two Different Frames"),
            Self::Arbitrary => write!(f, "Arbitrary Frames"),
        }
    }
}

/// Duration of one Opus frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameDuration {
    Ms2_5,
    Ms5,
    Ms10,
    Ms20,
    Ms40,
    Ms60,
}

impl FrameDuration {
    /// Parses a whole-millisecond duration. 2.5ms has no whole-millisecond
    /// form and is not accepted here.
    pub fn from_millis(ms: u32) -> Option<Self> {
        match ms {
            5 => Some(Self::Ms5),
            10 => Some(Self::Ms10),
            20 => Some(Self::Ms20),
            40 => Some(Self::Ms40),
            60 => Some(Self::Ms60),
            _ => None,
        }
    }

    pub fn micros(&self) -> u32 {
        match self {
            Self::Ms2_5 => 2_500,
            Self::Ms5 => 5_000,
            Self::Ms10 => 10_000,
            Self::Ms20 => 20_000,
            Self::Ms40 => 40_000,
            Self::Ms60 => 60_000,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_micros(self.micros() as u64)
    }

    /// Samples per channel for this duration at `sample_rate`.
    pub fn samples(&self, sample_rate: i32) -> usize {
        (sample_rate.max(0) as u64 * self.micros() as u64 / 1_000_000) as usize
    }
}

impl std::fmt::Display for FrameDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ms2_5 => write!(f, "2.5ms"),
            Self::Ms5 => write!(f, "5ms"),
            Self::Ms10 => write!(f, "10ms"),
            Self::Ms20 => write!(f, "20ms"),
            Self::Ms40 => write!(f, "40ms"),
            Self::Ms60 => write!(f, "60ms"),
        }
    }
}

/// Audio bandwidth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bandwidth {
    /// 4 kHz audio bandwidth.
    Narrowband,
    /// 6 kHz audio bandwidth.
    Mediumband,
    /// 8 kHz audio bandwidth.
    Wideband,
    /// 12 kHz audio bandwidth.
    Superwideband,
    /// 20 kHz audio bandwidth.
    Fullband,
}

impl Bandwidth {
    /// Returns the effective sample rate for this bandwidth.
    pub fn sample_rate(&self) -> i32 {
        match self {
            Self::Narrowband => 8000,
            Self::Mediumband => 12000,
            Self::Wideband => 16000,
            Self::Superwideband => 24000,
            Self::Fullband => 48000,
        }
    }
}

impl std::fmt::Display for Bandwidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Narrowband => write!(f, "Narrowband"),
            Self::Mediumband => write!(f, "Mediumband"),
            Self::Wideband => write!(f, "Wideband"),
            Self::Superwideband => write!(f, "Superwideband"),
            Self::Fullband => write!(f, "Fullband"),
        }
    }
}
