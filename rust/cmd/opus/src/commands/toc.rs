//! Packet TOC inspection.

use clap::Args;
use serde::Serialize;

use giztoy_opus::Toc;
use giztoy_opus::toc::{frame_count, packet_duration};

use super::output_result;
use crate::Cli;

/// Describe the TOC byte of a packet.
#[derive(Args)]
pub struct TocCommand {
    /// Packet bytes as hex (at least the TOC byte)
    packet: String,
}

#[derive(Debug, Serialize)]
struct TocInfo {
    configuration: u8,
    mode: String,
    bandwidth: String,
    stereo: bool,
    frame_code: String,
    frame_duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    frame_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    packet_duration_us: Option<u128>,
}

impl TocCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let info = describe(&self.packet)?;
        output_result(&info, cli.json)
    }
}

fn describe(hex_packet: &str) -> anyhow::Result<TocInfo> {
    let packet = hex::decode(hex_packet.trim())?;
    let toc = Toc::of(&packet).ok_or_else(|| anyhow::anyhow!("packet is empty"))?;

    Ok(TocInfo {
        configuration: toc.configuration(),
        mode: toc.mode().to_string(),
        bandwidth: toc.bandwidth().to_string(),
        stereo: toc.is_stereo(),
        frame_code: toc.frame_code().to_string(),
        frame_duration: toc.frame_duration().to_string(),
        frame_count: frame_count(&packet),
        packet_duration_us: packet_duration(&packet).map(|d| d.as_micros()),
    })
}
