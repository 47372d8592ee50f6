//! Utility functions for CLI commands.

use std::path::Path;

use anyhow::Context as _;
use giztoy_opus::{Application, SessionConfig};

use crate::Cli;

/// Loads the session config from `-f` (if given) and applies flag overrides.
pub fn session_config(cli: &Cli) -> anyhow::Result<SessionConfig> {
    let mut cfg = match cli.input.as_deref() {
        Some(path) => load_config(path)?,
        None => SessionConfig::default(),
    };

    if let Some(rate) = cli.rate {
        cfg.sample_rate = rate;
    }
    if let Some(channels) = cli.channels {
        cfg.channels = channels;
    }
    if let Some(app) = cli.application.as_deref() {
        cfg.application = parse_application(app)?;
    }
    if let Some(bitrate) = cli.bitrate {
        cfg.bitrate = Some(bitrate);
    }

    cfg.validate()?;
    tracing::debug!("session config: {:?}", cfg);
    print_verbose(
        cli,
        &format!(
            "Session: rate={} channels={} application={}",
            cfg.sample_rate, cfg.channels, cfg.application
        ),
    );
    Ok(cfg)
}

/// Loads a session config from a YAML or JSON file.
pub fn load_config(path: &str) -> anyhow::Result<SessionConfig> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("yaml");

    let cfg = match ext.to_lowercase().as_str() {
        "json" => serde_json::from_str(&content)?,
        _ => serde_yaml::from_str(&content)?,
    };

    Ok(cfg)
}

pub fn parse_application(s: &str) -> anyhow::Result<Application> {
    serde_yaml::from_str(s).map_err(|_| {
        anyhow::anyhow!(
            "unknown application '{}', expected voip, audio or restricted_lowdelay",
            s
        )
    })
}

/// Outputs binary data to a file.
pub fn output_bytes(data: &[u8], output_path: &str) -> anyhow::Result<()> {
    std::fs::write(output_path, data)?;
    Ok(())
}

/// Outputs result as JSON or YAML.
pub fn output_result<T: serde::Serialize>(result: &T, as_json: bool) -> anyhow::Result<()> {
    let output = if as_json {
        serde_json::to_string_pretty(result)? + "\n"
    } else {
        serde_yaml::to_string(result)?
    };
    print!("{}", output);
    Ok(())
}

/// Prints verbose output if enabled.
pub fn print_verbose(cli: &Cli, msg: &str) {
    if cli.verbose {
        eprintln!("[verbose] {}", msg);
    }
}

/// Formats bytes to human readable string.
pub fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
