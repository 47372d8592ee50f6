//! Opus CLI - drives libopus codec sessions from the command line.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{InfoCommand, RoundtripCommand, TocCommand};

/// Opus CLI - encode and decode raw PCM through a codec session.
///
/// Session parameters come from a YAML or JSON file (-f) and can be
/// overridden with flags:
///
///   sample_rate: 48000
///   channels: 1
///   application: audio
///   bitrate: 32000
///   frame_duration_ms: 20
#[derive(Parser)]
#[command(name = "opus")]
#[command(about = "Opus codec session CLI tool")]
#[command(version)]
pub struct Cli {
    /// Session config file (YAML or JSON)
    #[arg(short = 'f', long = "file", global = true)]
    pub input: Option<String>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long, global = true)]
    pub output: Option<String>,

    /// Sample rate override
    #[arg(long, global = true)]
    pub rate: Option<i32>,

    /// Channel count override
    #[arg(long, global = true)]
    pub channels: Option<i32>,

    /// Application override (voip, audio, restricted_lowdelay)
    #[arg(long, global = true)]
    pub application: Option<String>,

    /// Bitrate override in bits per second
    #[arg(long, global = true)]
    pub bitrate: Option<i32>,

    /// Output as JSON (for piping)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encode then decode a raw s16le PCM file
    Roundtrip(RoundtripCommand),
    /// Show the effective session settings
    Info(InfoCommand),
    /// Describe the TOC byte of a packet
    Toc(TocCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Roundtrip(cmd) => cmd.run(&cli),
        Commands::Info(cmd) => cmd.run(&cli),
        Commands::Toc(cmd) => cmd.run(&cli),
    }
}
