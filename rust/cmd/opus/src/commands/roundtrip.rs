//! Encode/decode round trip of a raw PCM file.

use std::borrow::Cow;

use anyhow::Context as _;
use clap::Args;
use serde::Serialize;

use giztoy_opus::Toc;

use super::{format_bytes, output_bytes, output_result, print_verbose, session_config};
use crate::Cli;

/// Encode then decode a raw s16le PCM file.
///
/// The input is split into frames of `frame_duration_ms`; a trailing
/// partial frame is zero-padded. Decoded PCM is written to -o if given.
#[derive(Args)]
pub struct RoundtripCommand {
    /// Raw interleaved 16-bit little-endian PCM file
    input: String,
}

#[derive(Debug, Serialize)]
struct RoundtripReport {
    frames: usize,
    pcm_bytes: usize,
    packet_bytes: usize,
    average_bitrate: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_toc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_file: Option<String>,
}

impl RoundtripCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = session_config(cli)?;
        let fd = cfg.frame_duration()?;
        let mut session = cfg.open().context("failed to open codec session")?;
        let frame_bytes = session.frame_bytes_for_duration(fd);
        if frame_bytes == 0 {
            anyhow::bail!("frame duration {} is too short at {} Hz", fd, cfg.sample_rate);
        }

        let pcm = std::fs::read(&self.input)
            .with_context(|| format!("failed to read {}", self.input))?;
        if pcm.is_empty() {
            anyhow::bail!("input file {} is empty", self.input);
        }
        print_verbose(
            cli,
            &format!("Input: {} ({}), {} per frame", self.input, format_bytes(pcm.len()), fd),
        );

        let mut decoded = Vec::with_capacity(pcm.len() + frame_bytes);
        let mut frames = 0;
        let mut packet_bytes = 0;
        let mut first_toc = None;

        for (i, chunk) in pcm.chunks(frame_bytes).enumerate() {
            let frame = pad_frame(chunk, frame_bytes);
            let packet = session
                .encode(&frame)
                .with_context(|| format!("encode frame {}", i))?;
            if first_toc.is_none() {
                first_toc = Toc::of(&packet).map(|t| t.to_string());
            }
            tracing::debug!("frame {}: {} PCM bytes -> {} packet bytes", i, frame.len(), packet.len());
            packet_bytes += packet.len();
            frames += 1;

            let out = session
                .decode(&packet)
                .with_context(|| format!("decode frame {}", i))?;
            decoded.extend_from_slice(&out);
        }
        decoded.truncate(pcm.len());

        if let Some(path) = cli.output.as_deref() {
            output_bytes(&decoded, path)?;
            print_verbose(cli, &format!("Decoded PCM saved to: {}", path));
        }

        let report = RoundtripReport {
            frames,
            pcm_bytes: pcm.len(),
            packet_bytes,
            average_bitrate: average_bitrate(packet_bytes, frames, fd.micros()),
            first_toc,
            output_file: cli.output.clone(),
        };
        output_result(&report, cli.json)
    }
}

/// Zero-pads a short trailing chunk to a whole frame.
fn pad_frame(chunk: &[u8], frame_bytes: usize) -> Cow<'_, [u8]> {
    if chunk.len() == frame_bytes {
        return Cow::Borrowed(chunk);
    }
    let mut padded = chunk.to_vec();
    padded.resize(frame_bytes, 0);
    Cow::Owned(padded)
}

/// Bits per second over `frames` frames of `frame_micros` each.
fn average_bitrate(packet_bytes: usize, frames: usize, frame_micros: u32) -> u64 {
    let total_micros = frames as u64 * frame_micros as u64;
    if total_micros == 0 {
        return 0;
    }
    packet_bytes as u64 * 8 * 1_000_000 / total_micros
}
