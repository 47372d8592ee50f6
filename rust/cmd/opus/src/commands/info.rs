//! Effective session settings.

use anyhow::Context as _;
use clap::Args;
use serde::Serialize;

use giztoy_opus::defines::{OPUS_GET_COMPLEXITY_REQUEST, OPUS_GET_VBR_REQUEST};
use giztoy_opus::{MAX_FRAME_SIZE, MAX_PACKET_SIZE};

use super::{output_result, session_config};
use crate::Cli;

/// Show the effective session settings.
///
/// Forces encoder creation, so an unsupported rate or channel count is
/// reported here.
#[derive(Args)]
pub struct InfoCommand {}

#[derive(Debug, Serialize)]
struct SessionInfo {
    sample_rate: i32,
    channels: i32,
    application: String,
    bitrate: i32,
    complexity: i32,
    vbr: bool,
    frame_duration: String,
    frame_samples: usize,
    max_frame_size: usize,
    max_packet_size: usize,
}

impl InfoCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = session_config(cli)?;
        let fd = cfg.frame_duration()?;
        let mut session = cfg.open().context("failed to open codec session")?;

        let bitrate = session.get_bitrate().context("failed to read bitrate")?;
        let complexity = session
            .encoder_ctl_get(OPUS_GET_COMPLEXITY_REQUEST)
            .context("failed to read complexity")?;
        let vbr = session
            .encoder_ctl_get(OPUS_GET_VBR_REQUEST)
            .context("failed to read vbr")?;

        let info = SessionInfo {
            sample_rate: session.sample_rate(),
            channels: session.channels(),
            application: session.application().to_string(),
            bitrate,
            complexity,
            vbr: vbr != 0,
            frame_duration: fd.to_string(),
            frame_samples: session.frame_size_for_duration(fd),
            max_frame_size: MAX_FRAME_SIZE,
            max_packet_size: MAX_PACKET_SIZE,
        };
        output_result(&info, cli.json)
    }
}
