//! Clock-style rendering of transcript offsets and the matching parsers.

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

/// How hours are rendered in a clock label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ClockStyle {
    /// `0:01:05`
    #[default]
    Compact,
    /// `00:01:05`
    Padded,
}

/// Render an offset in seconds as a clock label, truncating to whole seconds
pub fn format_clock(seconds: f64, style: ClockStyle) -> String {
    let whole = if seconds.is_finite() && seconds > 0.0 {
        seconds.trunc() as u64
    } else {
        0
    };
    let hours = whole / 3600;
    let minutes = (whole % 3600) / 60;
    let secs = whole % 60;
    match style {
        ClockStyle::Compact => format!("{}:{:02}:{:02}", hours, minutes, secs),
        ClockStyle::Padded => format!("{:02}:{:02}:{:02}", hours, minutes, secs),
    }
}

pub fn format_range(begin: f64, end: f64, style: ClockStyle) -> String {
    format!(
        "{} - {}",
        format_clock(begin, style),
        format_clock(end, style)
    )
}

/// Parse plain seconds, `MM:SS` or `H:MM:SS` into seconds
pub fn parse_clock(raw: &str) -> Result<f64> {
    let raw = raw.trim();
    if !raw.contains(':') {
        let seconds: f64 = raw
            .parse()
            .with_context(|| format!("Failed to parse seconds value '{}'", raw))?;
        ensure!(
            seconds.is_finite() && seconds >= 0.0,
            "Time values must be non-negative"
        );
        return Ok(seconds);
    }

    let parts: Vec<&str> = raw.split(':').collect();
    ensure!(
        (2..=3).contains(&parts.len()),
        "Time format must be MM:SS or H:MM:SS"
    );

    let mut total = 0.0;
    for (part, label) in parts.iter().rev().zip(["seconds", "minutes", "hours"]) {
        let value = part
            .parse::<f64>()
            .with_context(|| format!("Invalid {} component '{}'", label, part))?;
        ensure!(
            value.is_finite() && value >= 0.0,
            "{} must be non-negative",
            label
        );
        let scale = match label {
            "seconds" => 1.0,
            "minutes" => 60.0,
            _ => 3600.0,
        };
        total += value * scale;
    }
    Ok(total)
}

/// Parse a `"<begin> - <end>"` label back into its offsets
pub fn parse_range(raw: &str) -> Result<(f64, f64)> {
    let (begin, end) = raw
        .split_once(" - ")
        .with_context(|| format!("Timestamp range '{}' is missing ' - ' separator", raw))?;
    Ok((parse_clock(begin)?, parse_clock(end)?))
}
